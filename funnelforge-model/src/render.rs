//! Render dispatch: element kind → HTML fragment.
//!
//! Every fragment carries `data-element-id`, the click target a front end
//! maps to `select(id)`. The selected element gets the `selected` class.
//! Unknown kinds render a placeholder instead of failing.

use crate::element::{ElementContent, VisualElement};
use crate::page::Page;
use funnelforge_types::ElementId;
use std::fmt::Write;

/// Text shown for elements whose kind this build cannot render.
pub const FALLBACK_TEXT: &str = "Unsupported element";

/// Renders one element (and its children) as an HTML fragment.
pub fn render_element(element: &VisualElement, selected: Option<&ElementId>) -> String {
    let mut out = String::new();
    write_element(&mut out, element, selected);
    out
}

/// Renders every element of the page in order inside a page wrapper that
/// applies the page settings.
pub fn render_page(page: &Page) -> String {
    let selected = page.elements.selected();
    let settings = &page.settings;
    let mut out = String::new();
    let _ = write!(
        out,
        "<main class=\"ff-page\" data-page-id=\"{}\" style=\"background-color: {}; max-width: {}; font-family: {}; margin: 0 auto\">",
        escape(page.id.as_str()),
        escape(&settings.background_color),
        escape(&settings.max_width),
        escape(&settings.font_family),
    );
    for element in page.elements.iter() {
        write_element(&mut out, element, selected);
    }
    out.push_str("</main>");
    out
}

fn write_element(out: &mut String, element: &VisualElement, selected: Option<&ElementId>) {
    let attrs = attributes(element, selected);
    let _ = match &element.content {
        ElementContent::Heading(c) => {
            let level = c.level.clamp(1, 6);
            write!(out, "<h{level} {attrs}>{}</h{level}>", escape(&c.text))
        }
        ElementContent::Text(c) => write!(out, "<p {attrs}>{}</p>", escape(&c.text)),
        ElementContent::Button(c) => match &c.target {
            Some(target) => write!(
                out,
                "<a href=\"{}\" {attrs}>{}</a>",
                escape(target),
                escape(&c.label)
            ),
            None => write!(out, "<button type=\"button\" {attrs}>{}</button>", escape(&c.label)),
        },
        ElementContent::Image(c) => write!(
            out,
            "<img src=\"{}\" alt=\"{}\" {attrs}/>",
            escape(&c.src),
            escape(&c.alt)
        ),
        ElementContent::Form(c) => {
            let _ = write!(out, "<form {attrs}>");
            for field in &c.fields {
                let _ = write!(
                    out,
                    "<label>{}<input type=\"{}\" name=\"{}\"{}/></label>",
                    escape(&field.label),
                    escape(&field.input_type),
                    escape(&field.name),
                    if field.required { " required" } else { "" },
                );
            }
            write!(
                out,
                "<button type=\"submit\">{}</button></form>",
                escape(&c.submit_label)
            )
        }
        ElementContent::Container(c) => {
            let _ = write!(out, "<div {attrs}>");
            for child in &c.children {
                write_element(out, child, selected);
            }
            write!(out, "</div>")
        }
        ElementContent::Unknown { .. } => {
            let text = element.content.text().unwrap_or(FALLBACK_TEXT);
            write!(out, "<div {attrs}>{}</div>", escape(text))
        }
    };
}

fn attributes(element: &VisualElement, selected: Option<&ElementId>) -> String {
    let kind = element.kind();
    let mut class = format!("ff-element ff-{kind}");
    if selected == Some(&element.id) {
        class.push_str(" selected");
    }
    let mut attrs = format!(
        "data-element-id=\"{}\" class=\"{class}\"",
        escape(element.id.as_str())
    );
    if !element.styles.is_empty() {
        let _ = write!(attrs, " style=\"{}\"", escape(&element.styles.to_css()));
    }
    attrs
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
