#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

//! End-to-end manager behavior against an in-memory page and backend.

use std::cell::RefCell;
use std::rc::Rc;

use themeroot::transport::MemoryTransport;
use themeroot::{
    ColorField, Document, ManagerConfig, MemoryDocument, Method, SyncError, ThemeDescriptor,
    ThemeManager, css_assignments, default_theme,
};

type TestManager = ThemeManager<MemoryDocument, MemoryTransport>;

fn manager_with(document: MemoryDocument, transport: MemoryTransport) -> TestManager {
    ThemeManager::new(document, transport, ManagerConfig::public())
}

fn blue() -> ThemeDescriptor {
    ThemeDescriptor::new()
        .with_color(ColorField::PrimaryColor, "#3498db")
        .with_color(ColorField::PrimaryDark, "#2980b9")
}

fn property(manager: &TestManager, name: &str) -> Option<String> {
    manager.document().style_property(name)
}

// =============================================================================
// init
// =============================================================================

#[test]
fn init_applies_embedded_theme() {
    let document = MemoryDocument::new().with_data(
        "theme",
        r##"{"primaryColor": "#123456", "borderRadius": "sharp"}"##,
    );
    let manager = manager_with(document, MemoryTransport::new());

    let applied = manager.init().expect("embedded theme");

    assert_eq!(applied.color(ColorField::PrimaryColor), Some("#123456"));
    assert_eq!(property(&manager, "--primary-color").as_deref(), Some("#123456"));
    assert_eq!(property(&manager, "--radius-sm").as_deref(), Some("4px"));
    assert_eq!(
        property(&manager, "--primary-gradient").as_deref(),
        Some("linear-gradient(135deg, #123456 0%, #764ba2 100%)")
    );
}

#[test]
fn init_ignores_malformed_embedded_theme() {
    let document = MemoryDocument::new().with_data("theme", "{not json");
    let manager = manager_with(document, MemoryTransport::new());

    assert_eq!(manager.init(), None);
    assert!(manager.document().properties().is_empty());
}

#[test]
fn init_without_embedded_theme_is_a_no_op() {
    let manager = manager_with(MemoryDocument::new(), MemoryTransport::new());
    assert_eq!(manager.init(), None);
    assert!(manager.document().properties().is_empty());
}

#[test]
fn init_reads_configured_attribute() {
    let document = MemoryDocument::new()
        .with_data("theme", r##"{"primaryColor": "#000000"}"##)
        .with_data("adminTheme", r##"{"primaryColor": "#ffffff"}"##);
    let config = ManagerConfig::admin().with_theme_attribute("adminTheme");
    let manager = ThemeManager::new(document, MemoryTransport::new(), config);

    manager.init();
    assert_eq!(property(&manager, "--primary-color").as_deref(), Some("#ffffff"));
}

// =============================================================================
// apply / reset
// =============================================================================

#[test]
fn reset_reproduces_default_palette() {
    let manager = manager_with(MemoryDocument::new(), MemoryTransport::new());
    manager.apply_theme(&blue());
    manager.reset_theme();

    for assignment in css_assignments(&default_theme()) {
        assert_eq!(
            property(&manager, assignment.property).as_deref(),
            Some(assignment.value.as_str()),
            "{}",
            assignment.property
        );
    }
    assert_eq!(property(&manager, "--primary-color").as_deref(), Some("#667eea"));
}

#[test]
fn absent_fields_keep_previous_values() {
    let manager = manager_with(MemoryDocument::new(), MemoryTransport::new());
    manager.reset_theme();
    manager.apply_theme(&ThemeDescriptor::new().with_color(ColorField::ErrorColor, "red"));

    assert_eq!(property(&manager, "--error-color").as_deref(), Some("red"));
    assert_eq!(property(&manager, "--info-color").as_deref(), Some("#3182ce"));
}

#[test]
fn refused_writes_are_not_surfaced() {
    let manager = manager_with(MemoryDocument::new().read_only(), MemoryTransport::new());
    manager.apply_theme(&blue());
    assert!(manager.document().properties().is_empty());
}

#[test]
fn preset_catalog_default_matches_reset() {
    let manager = manager_with(MemoryDocument::new(), MemoryTransport::new());
    let catalog = manager.preset_themes();
    assert_eq!(
        catalog["default"].theme().color(ColorField::PrimaryColor),
        Some("#667eea")
    );
    assert_eq!(catalog["default"].theme(), manager.default_theme());
}

// =============================================================================
// save_theme
// =============================================================================

#[tokio::test]
async fn save_success_applies_and_returns_echo() {
    let transport = MemoryTransport::new().reply(
        200,
        r##"{"success": true, "message": "ok", "theme": {"primaryColor": "#3498db"}}"##,
    );
    let document = MemoryDocument::new().with_cookies("sessionid=x; csrftoken=tok123");
    let manager = manager_with(document, transport);

    let echoed = manager.save_theme(&blue()).await.expect("save succeeds");

    assert_eq!(
        echoed.and_then(|t| t.color(ColorField::PrimaryColor).map(str::to_string)),
        Some("#3498db".to_string())
    );
    assert_eq!(property(&manager, "--primary-dark").as_deref(), Some("#2980b9"));

    let requests = manager.transport().requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, "/api/theme/save/");
    assert_eq!(request.header_value("X-CSRFToken"), Some("tok123"));
    assert_eq!(request.header_value("Content-Type"), Some("application/json"));

    let sent = ThemeDescriptor::from_json(request.body.as_deref().unwrap_or_default()).unwrap();
    assert_eq!(sent, blue());
}

#[tokio::test]
async fn save_success_with_malformed_echo_still_applies() {
    let transport =
        MemoryTransport::new().reply(200, r#"{"success": true, "theme": {"primaryColor": 5}}"#);
    let manager = manager_with(MemoryDocument::new(), transport);
    let theme = ThemeDescriptor::new().with_color(ColorField::PrimaryColor, "#111111");

    let echoed = manager.save_theme(&theme).await.expect("save succeeds");

    assert_eq!(echoed, None);
    assert_eq!(property(&manager, "--primary-color").as_deref(), Some("#111111"));
}

#[tokio::test]
async fn active_theme_malformed_payload_is_decode_error() {
    let transport =
        MemoryTransport::new().reply(200, r#"{"success": true, "theme": {"primaryColor": 5}}"#);
    let manager = manager_with(MemoryDocument::new(), transport);

    let err = manager.fetch_active_theme().await.unwrap_err();
    assert!(matches!(err, SyncError::Decode(_)));
}

#[tokio::test]
async fn save_with_custom_csrf_names() {
    let transport = MemoryTransport::new().reply(200, r#"{"success": true}"#);
    let document = MemoryDocument::new().with_cookies("csrftoken=wrong; xsrf=right");
    let config = ManagerConfig::public()
        .with_csrf_cookie("xsrf")
        .with_csrf_header("X-XSRF-Token");
    let manager = ThemeManager::new(document, transport, config);

    manager.save_theme(&blue()).await.unwrap();

    let request = &manager.transport().requests()[0];
    assert_eq!(request.header_value("X-XSRF-Token"), Some("right"));
    assert_eq!(request.header_value("X-CSRFToken"), None);
}

#[tokio::test]
async fn save_without_csrf_cookie_omits_header() {
    let transport = MemoryTransport::new().reply(200, r#"{"success": true}"#);
    let manager = manager_with(MemoryDocument::new(), transport);

    assert_eq!(manager.save_theme(&blue()).await.unwrap(), None);
    assert_eq!(manager.transport().requests()[0].header_value("X-CSRFToken"), None);
}

#[tokio::test]
async fn save_transport_failure_changes_nothing() {
    let manager = manager_with(MemoryDocument::new(), MemoryTransport::new().fail("offline"));
    manager.reset_theme();
    let before = manager.document().properties();

    let err = manager.save_theme(&blue()).await.unwrap_err();

    assert!(matches!(err, SyncError::Transport(_)));
    assert_eq!(manager.document().properties(), before);
}

#[tokio::test]
async fn save_rejected_with_ok_status_is_failure() {
    let transport =
        MemoryTransport::new().reply(200, r#"{"success": false, "error": "Invalid color"}"#);
    let manager = manager_with(MemoryDocument::new(), transport);

    let err = manager.save_theme(&blue()).await.unwrap_err();

    assert_eq!(err.user_message(), "Invalid color");
    assert!(manager.document().properties().is_empty());
}

#[tokio::test]
async fn save_server_error_without_message_uses_fallback() {
    let transport = MemoryTransport::new().reply(500, r#"{"success": false}"#);
    let manager = manager_with(MemoryDocument::new(), transport);

    let err = manager.save_theme(&blue()).await.unwrap_err();

    assert!(matches!(err, SyncError::Http { status: 500, .. }));
    assert_eq!(err.user_message(), "Failed to save theme");
}

#[tokio::test]
async fn save_uses_admin_prefix() {
    let transport = MemoryTransport::new().reply(200, r#"{"success": true}"#);
    let manager = ThemeManager::new(MemoryDocument::new(), transport, ManagerConfig::admin());

    manager.save_theme(&blue()).await.unwrap();
    assert_eq!(
        manager.transport().requests()[0].url,
        "/administracion/api/theme/save/"
    );
}

#[tokio::test]
async fn save_notifies_listeners() {
    let transport = MemoryTransport::new().reply(200, r#"{"success": true}"#);
    let manager = manager_with(MemoryDocument::new(), transport);
    let seen = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&seen);
    manager.on_change(move |_| *counter.borrow_mut() += 1);

    manager.save_theme(&blue()).await.unwrap();
    assert_eq!(*seen.borrow(), 1);
}

// =============================================================================
// get_active_theme
// =============================================================================

#[tokio::test]
async fn active_theme_success() {
    let transport = MemoryTransport::new().reply(
        200,
        r##"{"success": true, "theme": {"primaryColor": "#e74c3c", "shadowIntensity": "strong"}}"##,
    );
    let manager = manager_with(MemoryDocument::new(), transport);

    let theme = manager.get_active_theme().await.expect("active theme");

    assert_eq!(theme.color(ColorField::PrimaryColor), Some("#e74c3c"));
    let request = &manager.transport().requests()[0];
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url, "/api/theme/active/");
    assert_eq!(request.body, None);
    // Fetching never applies.
    assert!(manager.document().properties().is_empty());
}

#[tokio::test]
async fn active_theme_null_is_none() {
    let transport = MemoryTransport::new()
        .reply(200, r#"{"success": true, "theme": null}"#)
        .reply(200, r#"{"success": true, "theme": null}"#);
    let manager = manager_with(MemoryDocument::new(), transport);

    assert_eq!(manager.get_active_theme().await, None);
    assert!(matches!(manager.fetch_active_theme().await, Ok(None)));
}

#[tokio::test]
async fn active_theme_failures_are_none() {
    let transport = MemoryTransport::new()
        .fail("offline")
        .reply(404, "<h1>Not Found</h1>")
        .reply(200, r#"{"success": false}"#);
    let manager = manager_with(MemoryDocument::new(), transport);

    assert_eq!(manager.get_active_theme().await, None);
    assert_eq!(manager.get_active_theme().await, None);
    assert_eq!(manager.get_active_theme().await, None);
}

#[tokio::test]
async fn fetch_active_theme_reports_reason() {
    let transport = MemoryTransport::new().reply(403, "forbidden");
    let manager = manager_with(MemoryDocument::new(), transport);

    let err = manager.fetch_active_theme().await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to fetch active theme");
}

// =============================================================================
// cookies
// =============================================================================

#[test]
fn cookie_lookup() {
    let document = MemoryDocument::new().with_cookies("a=1; csrftoken=abc%20def; b=2");
    let manager = manager_with(document, MemoryTransport::new());

    assert_eq!(manager.get_cookie("csrftoken").as_deref(), Some("abc def"));
    assert_eq!(manager.get_cookie("a").as_deref(), Some("1"));
    assert_eq!(manager.get_cookie("missing"), None);
}

#[test]
fn cookie_without_store_is_none() {
    let manager = manager_with(MemoryDocument::new(), MemoryTransport::new());
    assert_eq!(manager.get_cookie("csrftoken"), None);
}
