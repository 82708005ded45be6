//! Default content and styles per element kind.
//!
//! This is what a freshly inserted element looks like before the user edits
//! it. Both functions are pure and cover every kind; `Unknown` yields empty
//! values instead of failing.

use crate::element::{
    ButtonContent, ContainerContent, ElementContent, ElementKind, FormContent, FormField,
    HeadingContent, ImageContent, Styles, TextContent,
};
use serde_json::{Map, Value};

pub const HEADING_TEXT: &str = "Your Headline Here";
pub const HEADING_LEVEL: u8 = 2;
pub const PARAGRAPH_TEXT: &str = "Add your text here. Click to edit this paragraph.";
pub const BUTTON_LABEL: &str = "Click Here";
pub const IMAGE_SRC: &str = "https://via.placeholder.com/600x300";
pub const IMAGE_ALT: &str = "Image";
pub const SUBMIT_LABEL: &str = "Submit";
pub const CONTAINER_BACKGROUND: &str = "#f3f4f6";

/// Initial content for a new element of `kind`.
pub fn content_for(kind: ElementKind) -> ElementContent {
    match kind {
        ElementKind::Heading => ElementContent::Heading(HeadingContent::default()),
        ElementKind::Text => ElementContent::Text(TextContent::default()),
        ElementKind::Button => ElementContent::Button(ButtonContent::default()),
        ElementKind::Image => ElementContent::Image(ImageContent::default()),
        ElementKind::Form => ElementContent::Form(FormContent::default()),
        ElementKind::Container => ElementContent::Container(ContainerContent::default()),
        ElementKind::Unknown => ElementContent::Unknown {
            kind: ElementKind::Unknown.as_str().to_string(),
            raw: Value::Object(Map::new()),
        },
    }
}

/// Initial styles for a new element of `kind`.
pub fn styles_for(kind: ElementKind) -> Styles {
    let pairs: &[(&str, &str)] = match kind {
        ElementKind::Heading => &[
            ("font-size", "32px"),
            ("font-weight", "bold"),
            ("color", "#1f2937"),
            ("text-align", "center"),
            ("margin", "16px 0"),
        ],
        ElementKind::Text => &[
            ("font-size", "16px"),
            ("color", "#4b5563"),
            ("line-height", "1.6"),
            ("margin", "8px 0"),
        ],
        ElementKind::Button => &[
            ("background-color", "#3b82f6"),
            ("color", "#ffffff"),
            ("padding", "12px 24px"),
            ("border-radius", "6px"),
            ("text-align", "center"),
        ],
        ElementKind::Image => &[("width", "100%"), ("border-radius", "8px")],
        ElementKind::Form => &[
            ("padding", "24px"),
            ("background-color", "#f9fafb"),
            ("border-radius", "8px"),
        ],
        ElementKind::Container => &[
            ("background-color", CONTAINER_BACKGROUND),
            ("padding", "20px"),
            ("border-radius", "8px"),
        ],
        ElementKind::Unknown => &[],
    };
    pairs.iter().copied().collect()
}

impl Default for HeadingContent {
    fn default() -> Self {
        Self {
            text: HEADING_TEXT.to_string(),
            level: HEADING_LEVEL,
        }
    }
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: PARAGRAPH_TEXT.to_string(),
        }
    }
}

impl Default for ButtonContent {
    fn default() -> Self {
        Self {
            label: BUTTON_LABEL.to_string(),
            target: None,
        }
    }
}

impl Default for ImageContent {
    fn default() -> Self {
        Self {
            src: IMAGE_SRC.to_string(),
            alt: IMAGE_ALT.to_string(),
        }
    }
}

impl Default for FormContent {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField {
                    name: "name".into(),
                    label: "Your Name".into(),
                    input_type: "text".into(),
                    required: true,
                },
                FormField {
                    name: "email".into(),
                    label: "Email Address".into(),
                    input_type: "email".into(),
                    required: true,
                },
            ],
            submit_label: SUBMIT_LABEL.to_string(),
        }
    }
}
