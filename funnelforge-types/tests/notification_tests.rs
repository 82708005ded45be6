use funnelforge_types::{Notification, NotificationLevel};

#[test]
fn constructors_set_level() {
    assert_eq!(Notification::info("a").level, NotificationLevel::Info);
    assert_eq!(Notification::success("a").level, NotificationLevel::Success);
    assert!(Notification::error("a").is_error());
}

#[test]
fn display_includes_description() {
    let n = Notification::error("Save failed").with_description("disk full");
    assert_eq!(n.to_string(), "Save failed: disk full");
    assert_eq!(Notification::success("Saved").to_string(), "Saved");
}

#[test]
fn serde_omits_missing_description() {
    let json = serde_json::to_value(Notification::info("Working")).unwrap();
    assert_eq!(json["level"], "info");
    assert!(json.get("description").is_none());
}
