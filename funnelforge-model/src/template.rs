//! Template gallery. Each template starts a page with a preset element
//! sequence built on the default factory.

use crate::element::{
    ButtonContent, ElementContent, ElementKind, HeadingContent, ImageContent, TextContent,
    VisualElement,
};
use crate::error::ModelError;
use crate::page::Page;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageTemplate {
    Blank,
    LeadMagnet,
    Webinar,
    ProductLaunch,
    ThankYou,
}

impl PageTemplate {
    pub const ALL: [PageTemplate; 5] = [
        PageTemplate::Blank,
        PageTemplate::LeadMagnet,
        PageTemplate::Webinar,
        PageTemplate::ProductLaunch,
        PageTemplate::ThankYou,
    ];

    pub const fn slug(&self) -> &'static str {
        match self {
            PageTemplate::Blank => "blank",
            PageTemplate::LeadMagnet => "lead-magnet",
            PageTemplate::Webinar => "webinar",
            PageTemplate::ProductLaunch => "product-launch",
            PageTemplate::ThankYou => "thank-you",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            PageTemplate::Blank => "Start from an empty page",
            PageTemplate::LeadMagnet => "Capture emails in exchange for a free resource",
            PageTemplate::Webinar => "Register attendees for a live or recorded webinar",
            PageTemplate::ProductLaunch => "Announce a product with a hero, benefits and a call to action",
            PageTemplate::ThankYou => "Confirm a signup and point to the next step",
        }
    }

    /// The page type label recorded on pages created from this template.
    pub const fn page_type(&self) -> &'static str {
        match self {
            PageTemplate::ThankYou => "thank-you-page",
            PageTemplate::Webinar => "registration-page",
            PageTemplate::ProductLaunch => "sales-page",
            PageTemplate::Blank | PageTemplate::LeadMagnet => "landing-page",
        }
    }

    /// Creates a draft page named `name` populated with this template's elements.
    pub fn instantiate(&self, name: impl Into<String>) -> Page {
        let mut page = Page::new(name, self.page_type()).with_description(self.description());
        for element in self.elements() {
            page.elements.add_element(element);
        }
        page
    }

    fn elements(&self) -> Vec<VisualElement> {
        match self {
            PageTemplate::Blank => Vec::new(),
            PageTemplate::LeadMagnet => vec![
                heading("Get Your Free Guide", 1),
                text("Download the step-by-step playbook our customers use to grow."),
                VisualElement::new(ElementKind::Image),
                VisualElement::new(ElementKind::Form),
            ],
            PageTemplate::Webinar => vec![
                heading("Join Our Free Live Training", 1),
                text("Save your seat. Spots are limited."),
                VisualElement::new(ElementKind::Form),
                button("Reserve My Spot", None),
            ],
            PageTemplate::ProductLaunch => vec![
                heading("Introducing Something New", 1),
                text("Everything you need, nothing you don't."),
                VisualElement::with_content(ElementContent::Image(ImageContent {
                    src: "https://via.placeholder.com/1200x600".into(),
                    alt: "Product preview".into(),
                })),
                heading("Why You'll Love It", 2),
                text("Faster results. Simpler workflows. Support that answers."),
                button("Buy Now", Some("#checkout")),
            ],
            PageTemplate::ThankYou => vec![
                heading("Thank You!", 1),
                text("Check your inbox. Your download link is on its way."),
                button("Back to Home", Some("/")),
            ],
        }
    }
}

fn heading(text: &str, level: u8) -> VisualElement {
    VisualElement::with_content(ElementContent::Heading(HeadingContent {
        text: text.into(),
        level,
    }))
}

fn text(text: &str) -> VisualElement {
    VisualElement::with_content(ElementContent::Text(TextContent { text: text.into() }))
}

fn button(label: &str, target: Option<&str>) -> VisualElement {
    VisualElement::with_content(ElementContent::Button(ButtonContent {
        label: label.into(),
        target: target.map(Into::into),
    }))
}

impl fmt::Display for PageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for PageTemplate {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.slug() == wanted)
            .ok_or_else(|| ModelError::UnknownTemplate(s.to_string()))
    }
}
