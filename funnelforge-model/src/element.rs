use crate::defaults;
use crate::error::{ModelError, ModelResult};
use funnelforge_types::ElementId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// The closed set of element kinds an editor can place.
///
/// `Unknown` never comes from the editor; it is what persisted data with an
/// unrecognized `type` string loads as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Heading,
    Text,
    Button,
    Image,
    Form,
    Container,
    Unknown,
}

impl ElementKind {
    /// Every kind the editor palette offers.
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Heading,
        ElementKind::Text,
        ElementKind::Button,
        ElementKind::Image,
        ElementKind::Form,
        ElementKind::Container,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Heading => "heading",
            ElementKind::Text => "text",
            ElementKind::Button => "button",
            ElementKind::Image => "image",
            ElementKind::Form => "form",
            ElementKind::Container => "container",
            ElementKind::Unknown => "unknown",
        }
    }

    /// Maps a type name to a kind. Names outside the palette map to `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "heading" => ElementKind::Heading,
            "text" | "paragraph" => ElementKind::Text,
            "button" => ElementKind::Button,
            "image" => ElementKind::Image,
            "form" => ElementKind::Form,
            "container" | "section" => ElementKind::Container,
            _ => ElementKind::Unknown,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentational attributes (CSS property → value), kept sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Styles(BTreeMap<String, String>);

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.0.remove(property)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Inline CSS declaration list, e.g. `color: #fff; padding: 4px`.
    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Styles {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Free-form placement coordinates. List-based layouts ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingContent {
    pub text: String,
    /// HTML heading level, 1..=6.
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonContent {
    pub label: String,
    /// Link target. `None` until the user wires the button up.
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageContent {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub input_type: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormContent {
    pub fields: Vec<FormField>,
    pub submit_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerContent {
    pub children: Vec<VisualElement>,
}

/// Kind-specific content. The variant is the element's type, so a renderer
/// never sees a content shape that does not belong to its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementContent {
    Heading(HeadingContent),
    Text(TextContent),
    Button(ButtonContent),
    Image(ImageContent),
    Form(FormContent),
    Container(ContainerContent),
    /// Content of a type this build does not know, kept verbatim.
    Unknown { kind: String, raw: Value },
}

impl ElementContent {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementContent::Heading(_) => ElementKind::Heading,
            ElementContent::Text(_) => ElementKind::Text,
            ElementContent::Button(_) => ElementKind::Button,
            ElementContent::Image(_) => ElementKind::Image,
            ElementContent::Form(_) => ElementKind::Form,
            ElementContent::Container(_) => ElementKind::Container,
            ElementContent::Unknown { .. } => ElementKind::Unknown,
        }
    }

    /// The `type` string written to storage. Unknown content keeps its original name.
    pub fn type_name(&self) -> &str {
        match self {
            ElementContent::Unknown { kind, .. } => kind,
            other => other.kind().as_str(),
        }
    }

    /// Primary human-readable text of the element, if it has one.
    pub fn text(&self) -> Option<&str> {
        match self {
            ElementContent::Heading(c) => Some(&c.text),
            ElementContent::Text(c) => Some(&c.text),
            ElementContent::Button(c) => Some(&c.label),
            ElementContent::Image(c) => Some(&c.alt),
            ElementContent::Form(c) => Some(&c.submit_label),
            ElementContent::Container(_) => None,
            ElementContent::Unknown { raw, .. } => raw
                .get("text")
                .or_else(|| raw.get("content"))
                .and_then(Value::as_str),
        }
    }

    fn to_value(&self) -> Value {
        let value = match self {
            ElementContent::Heading(c) => serde_json::to_value(c),
            ElementContent::Text(c) => serde_json::to_value(c),
            ElementContent::Button(c) => serde_json::to_value(c),
            ElementContent::Image(c) => serde_json::to_value(c),
            ElementContent::Form(c) => serde_json::to_value(c),
            ElementContent::Container(c) => serde_json::to_value(c),
            ElementContent::Unknown { raw, .. } => Ok(raw.clone()),
        };
        value.unwrap_or_default()
    }

    /// Rebuilds typed content from a stored `type` name and content object.
    fn from_parts(type_name: &str, value: Value) -> Result<Self, serde_json::Error> {
        let value = if value.is_null() {
            Value::Object(Map::new())
        } else {
            value
        };
        Ok(match ElementKind::from_name(type_name) {
            ElementKind::Heading => ElementContent::Heading(serde_json::from_value(value)?),
            ElementKind::Text => ElementContent::Text(serde_json::from_value(value)?),
            ElementKind::Button => ElementContent::Button(serde_json::from_value(value)?),
            ElementKind::Image => ElementContent::Image(serde_json::from_value(value)?),
            ElementKind::Form => ElementContent::Form(serde_json::from_value(value)?),
            ElementKind::Container => ElementContent::Container(serde_json::from_value(value)?),
            ElementKind::Unknown => ElementContent::Unknown {
                kind: type_name.to_string(),
                raw: value,
            },
        })
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            ElementContent::Heading(c) if !(1..=6).contains(&c.level) => {
                Err(format!("heading level {} is outside 1..=6", c.level))
            }
            _ => Ok(()),
        }
    }

    /// Merges named fields into the content. Either every field applies or
    /// the content is left untouched.
    pub fn apply_patch(&mut self, patch: &Map<String, Value>) -> ModelResult<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let kind = self.kind();

        if let ElementContent::Unknown { raw, .. } = self {
            if !raw.is_object() {
                *raw = Value::Object(Map::new());
            }
            if let Value::Object(fields) = raw {
                fields.extend(patch.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            return Ok(());
        }

        let mut fields = match self.to_value() {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        for (key, value) in patch {
            if kind == ElementKind::Container && key == "children" {
                return Err(ModelError::InvalidPatch {
                    kind,
                    reason: "children are edited through the element store".into(),
                });
            }
            if !fields.contains_key(key) {
                return Err(ModelError::InvalidPatch {
                    kind,
                    reason: format!("unknown field `{key}`"),
                });
            }
            fields.insert(key.clone(), value.clone());
        }

        let updated = Self::from_parts(kind.as_str(), Value::Object(fields)).map_err(|e| {
            ModelError::InvalidPatch {
                kind,
                reason: e.to_string(),
            }
        })?;
        updated
            .validate()
            .map_err(|reason| ModelError::InvalidPatch { kind, reason })?;
        *self = updated;
        Ok(())
    }
}

/// A partial update keyed by element id.
///
/// `content` holds the content fields to overwrite, `styles` the properties
/// to set. The element's kind cannot change through a patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementPatch {
    pub content: Map<String, Value>,
    pub styles: BTreeMap<String, String>,
    pub remove_styles: Vec<String>,
    pub position: Option<Position>,
    pub clear_position: bool,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set_content(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.content.insert(field.into(), value.into());
        self
    }

    #[must_use]
    pub fn set_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    #[must_use]
    pub fn remove_style(mut self, property: impl Into<String>) -> Self {
        self.remove_styles.push(property.into());
        self
    }

    #[must_use]
    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position { x, y });
        self.clear_position = false;
        self
    }

    #[must_use]
    pub fn clear_position(mut self) -> Self {
        self.position = None;
        self.clear_position = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
            && self.styles.is_empty()
            && self.remove_styles.is_empty()
            && self.position.is_none()
            && !self.clear_position
    }
}

/// One placeable unit on a page.
///
/// Persisted as `{"id", "type", "content", "styles", "position"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawElement", into = "RawElement")]
pub struct VisualElement {
    pub id: ElementId,
    pub content: ElementContent,
    pub styles: Styles,
    pub position: Option<Position>,
}

impl VisualElement {
    /// Creates an element of `kind` with its default content and styles.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            content: defaults::content_for(kind),
            styles: defaults::styles_for(kind),
            position: None,
        }
    }

    /// Creates an element from prepared content, using the kind's default styles.
    pub fn with_content(content: ElementContent) -> Self {
        let kind = content.kind();
        Self {
            id: ElementId::new(),
            content,
            styles: defaults::styles_for(kind),
            position: None,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.content.kind()
    }

    pub fn children(&self) -> Option<&[VisualElement]> {
        match &self.content {
            ElementContent::Container(c) => Some(&c.children),
            _ => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<VisualElement>> {
        match &mut self.content {
            ElementContent::Container(c) => Some(&mut c.children),
            _ => None,
        }
    }

    /// Applies a patch. A content patch that does not fit leaves the whole
    /// element unchanged.
    pub fn apply(&mut self, patch: &ElementPatch) -> ModelResult<()> {
        self.content.apply_patch(&patch.content)?;
        for property in &patch.remove_styles {
            self.styles.remove(property);
        }
        for (property, value) in &patch.styles {
            self.styles.set(property.clone(), value.clone());
        }
        if patch.clear_position {
            self.position = None;
        } else if let Some(position) = patch.position {
            self.position = Some(position);
        }
        Ok(())
    }

    /// Deep copy with fresh ids for this element and all nested children.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.refresh_ids();
        copy
    }

    pub(crate) fn refresh_ids(&mut self) {
        self.id = ElementId::new();
        if let Some(children) = self.children_mut() {
            for child in children {
                child.refresh_ids();
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawElement {
    id: ElementId,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Value,
    #[serde(default)]
    styles: Styles,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
}

impl TryFrom<RawElement> for VisualElement {
    type Error = serde_json::Error;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id,
            content: ElementContent::from_parts(&raw.kind, raw.content)?,
            styles: raw.styles,
            position: raw.position,
        })
    }
}

impl From<VisualElement> for RawElement {
    fn from(element: VisualElement) -> Self {
        Self {
            id: element.id,
            kind: element.content.type_name().to_string(),
            content: element.content.to_value(),
            styles: element.styles,
            position: element.position,
        }
    }
}
