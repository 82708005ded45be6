use funnelforge_model::render::{render_element, render_page, FALLBACK_TEXT};
use funnelforge_model::{ElementContent, ElementKind, ElementPatch, Page, VisualElement};
use serde_json::json;

#[test]
fn heading_renders_with_level_and_styles() {
    let element = VisualElement::new(ElementKind::Heading);
    let html = render_element(&element, None);
    assert!(html.starts_with("<h2 "));
    assert!(html.ends_with("</h2>"));
    assert!(html.contains(&format!("data-element-id=\"{}\"", element.id)));
    assert!(html.contains("font-size: 32px"));
    assert!(!html.contains("selected"));
}

#[test]
fn selected_element_gets_class() {
    let element = VisualElement::new(ElementKind::Text);
    let html = render_element(&element, Some(&element.id));
    assert!(html.contains("class=\"ff-element ff-text selected\""));
}

#[test]
fn button_without_target_renders_button_tag() {
    let element = VisualElement::new(ElementKind::Button);
    assert!(render_element(&element, None).starts_with("<button type=\"button\""));
}

#[test]
fn button_with_target_renders_link() {
    let mut element = VisualElement::new(ElementKind::Button);
    element
        .apply(&ElementPatch::new().set_content("target", "/buy"))
        .unwrap();
    assert!(render_element(&element, None).starts_with("<a href=\"/buy\""));
}

#[test]
fn form_renders_fields_and_submit() {
    let html = render_element(&VisualElement::new(ElementKind::Form), None);
    assert!(html.contains("name=\"email\" required"));
    assert!(html.contains("<button type=\"submit\">Submit</button></form>"));
}

#[test]
fn container_renders_children() {
    let mut container = VisualElement::new(ElementKind::Container);
    let child = VisualElement::new(ElementKind::Image);
    let child_id = child.id.clone();
    if let ElementContent::Container(c) = &mut container.content {
        c.children.push(child);
    }
    let html = render_element(&container, Some(&child_id));
    assert!(html.starts_with("<div "));
    assert!(html.contains("<img src="));
    assert!(html.contains("ff-image selected"));
}

#[test]
fn text_is_escaped() {
    let mut element = VisualElement::new(ElementKind::Text);
    element
        .apply(&ElementPatch::new().set_content("text", "<script>\"x\" & y</script>"))
        .unwrap();
    let html = render_element(&element, None);
    assert!(html.contains("&lt;script&gt;&quot;x&quot; &amp; y&lt;/script&gt;"));
}

#[test]
fn unknown_kind_renders_fallback() {
    let element = VisualElement::with_content(ElementContent::Unknown {
        kind: "video".into(),
        raw: json!({}),
    });
    let html = render_element(&element, None);
    assert!(html.contains(FALLBACK_TEXT));
    assert!(html.contains("ff-unknown"));
}

#[test]
fn unknown_kind_prefers_raw_text() {
    let element = VisualElement::with_content(ElementContent::Unknown {
        kind: "quote".into(),
        raw: json!({"text": "Be bold"}),
    });
    assert!(render_element(&element, None).contains(">Be bold</div>"));
}

#[test]
fn page_renders_elements_in_order() {
    let mut page = Page::new("p", "landing-page");
    page.add(ElementKind::Heading);
    page.add(ElementKind::Button);
    let html = render_page(&page);
    assert!(html.starts_with("<main class=\"ff-page\""));
    let heading = html.find("<h2").unwrap();
    let button = html.find("<button").unwrap();
    assert!(heading < button);
    assert!(html.ends_with("</main>"));
}

#[test]
fn element_id_attribute_is_escaped() {
    let mut element = VisualElement::new(ElementKind::Text);
    element.id = funnelforge_types::ElementId::parse("a\"b").unwrap();
    assert!(render_element(&element, None).contains("data-element-id=\"a&quot;b\""));
}
