use approx::assert_abs_diff_eq;
use indexmap::IndexMap;
use trace_view::TraceViewError;
use trace_view::api::{TracePage, TracePageConfig};
use trace_view::core::{Span, SpanId, TimeRange, Trace, TraceId};
use trace_view::interaction::{RangeGesture, ShortcutAction, ShortcutBindings};

fn loaded_page(config: TracePageConfig) -> TracePage {
    let mut page = TracePage::new(config).expect("page init");
    page.navigate(TraceId::new("t-1"), None);
    page.on_trace_loaded(
        Trace::new(
            TraceId::new("t-1"),
            vec![
                Span::new("root", "svc", "op", 0.0, 10.0),
                Span::new("other", "svc", "op", 2.0, 3.0),
            ],
        )
        .expect("valid trace"),
    );
    page
}

#[test]
fn named_shortcuts_drive_view_range() {
    let mut page = loaded_page(TracePageConfig::default());

    assert!(page.handle_shortcut("zoomInFast"));
    let range = page.view_range();
    assert_abs_diff_eq!(range.start, 0.05, epsilon = 1e-12);
    assert_abs_diff_eq!(range.end, 0.95, epsilon = 1e-12);

    assert!(page.handle_shortcut("panRight"));
    let range = page.view_range();
    assert_abs_diff_eq!(range.start, 0.055, epsilon = 1e-12);
    assert_abs_diff_eq!(range.end, 0.955, epsilon = 1e-12);
}

#[test]
fn unknown_shortcut_name_is_ignored() {
    let mut page = loaded_page(TracePageConfig::default());
    assert!(!page.handle_shortcut("collapseAll"));
    assert_eq!(page.view_range(), TimeRange::FULL);
}

#[test]
fn default_key_bindings_resolve_gestures_and_search_actions() {
    let mut page = loaded_page(TracePageConfig::default());

    assert!(page.handle_key("shift+up"));
    assert_abs_diff_eq!(page.view_range().start, 0.05, epsilon = 1e-12);

    assert!(page.handle_key("F"));
    assert_eq!(page.scroll_cursor(), Some(&SpanId::new("root")));

    page.set_search_text("svc");
    assert!(page.handle_key("escape"));
    assert_eq!(page.search_text(), "");

    assert!(!page.handle_key("ctrl+z"));
}

#[test]
fn config_overrides_layer_over_defaults() {
    let mut config = TracePageConfig::default();
    config
        .shortcuts
        .insert("w".to_owned(), "zoomIn".to_owned());
    config
        .shortcuts
        .insert("up".to_owned(), "panRightFast".to_owned());
    let mut page = loaded_page(config);

    assert_eq!(
        page.shortcuts().resolve("w"),
        Some(ShortcutAction::Gesture(RangeGesture::ZoomIn))
    );
    assert!(page.handle_key("up"));
    let range = page.view_range();
    assert_abs_diff_eq!(range.start, 0.05, epsilon = 1e-12);
    assert_abs_diff_eq!(range.end, 1.0, epsilon = 1e-12);

    assert_eq!(
        page.shortcuts().resolve("a"),
        Some(ShortcutAction::Gesture(RangeGesture::PanLeft))
    );
}

#[test]
fn unknown_override_action_is_a_config_error() {
    let mut overrides = IndexMap::new();
    overrides.insert("x".to_owned(), "explode".to_owned());
    assert!(matches!(
        ShortcutBindings::with_overrides(&overrides),
        Err(TraceViewError::InvalidConfig(_))
    ));

    let mut config = TracePageConfig::default();
    config.shortcuts = overrides;
    assert!(TracePage::new(config).is_err());
}

#[test]
fn bindings_can_be_rebound_at_runtime() {
    let mut page = loaded_page(TracePageConfig::default());
    assert!(page.shortcuts_mut().unbind("left"));
    assert!(!page.handle_key("left"));

    page.shortcuts_mut()
        .bind("ctrl+left", ShortcutAction::Gesture(RangeGesture::PanLeftFast))
        .expect("valid combo");
    assert_eq!(
        page.shortcuts()
            .combos_for(ShortcutAction::Gesture(RangeGesture::PanLeftFast)),
        vec!["shift+a", "shift+left", "ctrl+left"]
    );
    assert!(page.shortcuts_mut().bind("  ", ShortcutAction::ClearSearch).is_err());
    assert!(ShortcutBindings::empty().is_empty());
    assert_eq!(ShortcutBindings::default().len(), 15);
}
