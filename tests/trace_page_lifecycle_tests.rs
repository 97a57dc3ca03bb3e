use approx::assert_abs_diff_eq;
use trace_view::api::{
    DisplaySource, FetchRequest, NavigationRequest, TraceFetchState, TracePage, TracePageConfig,
    TraceViewType,
};
use trace_view::core::{Span, SpanId, SpanReference, TimeRange, Trace, TraceId};
use trace_view::interaction::{RangeGesture, Reframe, ViewRangeTimeUpdate};

fn sample_trace(trace_id: &str) -> Trace {
    let child = |id: &str, parent: &str, start: f64| {
        Span::new(id, "svc", "op", start, 10.0)
            .with_reference(SpanReference::child_of(TraceId::new(trace_id), SpanId::new(parent)))
    };
    Trace::new(
        TraceId::new(trace_id),
        vec![
            Span::new("root", "svc", "root-op", 0.0, 100.0),
            child("a", "root", 10.0),
            child("a1", "a", 12.0),
            child("b", "root", 50.0),
        ],
    )
    .expect("valid trace")
}

fn loaded_page(trace_id: &str, focus: Option<&str>) -> TracePage {
    let mut page = TracePage::new(TracePageConfig::default()).expect("page init");
    page.navigate(TraceId::new(trace_id), focus.map(SpanId::new));
    page.on_trace_loading(&TraceId::new(trace_id));
    assert!(page.on_trace_loaded(sample_trace(trace_id)));
    page
}

#[test]
fn navigation_requests_fetch_once_per_trace_id() {
    let mut page = TracePage::new(TracePageConfig::default()).expect("page init");
    assert_eq!(page.fetch_state(), &TraceFetchState::Idle);
    assert_eq!(page.displayed_trace(), None);
    assert_eq!(page.display_source(), DisplaySource::None);

    let request = page.navigate(TraceId::new("t-1"), None);
    assert_eq!(
        request,
        Some(FetchRequest {
            trace_id: TraceId::new("t-1")
        })
    );

    page.on_trace_loading(&TraceId::new("t-1"));
    assert_eq!(page.fetch_state(), &TraceFetchState::Loading);
    assert_eq!(page.navigate(TraceId::new("t-1"), None), None);

    page.on_trace_loaded(sample_trace("t-1"));
    assert_eq!(page.fetch_state(), &TraceFetchState::Loaded);
    assert_eq!(page.navigate(TraceId::new("t-1"), None), None);
    assert_eq!(page.display_source(), DisplaySource::Original);
}

#[test]
fn stale_fetch_results_are_discarded() {
    let mut page = TracePage::new(TracePageConfig::default()).expect("page init");
    page.navigate(TraceId::new("first"), None);
    page.navigate(TraceId::new("second"), None);

    assert!(!page.on_trace_loaded(sample_trace("first")));
    assert!(page.displayed_trace().is_none());
    assert!(!page.on_trace_error(&TraceId::new("first"), "timeout"));
    assert_eq!(page.fetch_state(), &TraceFetchState::Idle);

    assert!(page.on_trace_loaded(sample_trace("second")));
    assert_eq!(
        page.displayed_trace().map(|trace| trace.trace_id().clone()),
        Some(TraceId::new("second"))
    );
}

#[test]
fn fetch_error_keeps_last_good_trace_and_allows_retry() {
    let mut page = loaded_page("t-1", None);
    assert!(page.on_trace_error(&TraceId::new("t-1"), "502 bad gateway"));
    assert_eq!(
        page.fetch_state(),
        &TraceFetchState::Failed("502 bad gateway".to_owned())
    );
    assert!(page.displayed_trace().is_some());
    assert!(page.navigate(TraceId::new("t-1"), None).is_some());
}

#[test]
fn focus_from_navigation_reroots_display() {
    let page = loaded_page("t-1", Some("a"));
    assert_eq!(page.display_source(), DisplaySource::Subtrace);
    let displayed = page.displayed_trace().expect("displayed");
    assert_eq!(displayed.span_count(), 2);
    assert_eq!(displayed.start_time(), 10.0);
    assert_eq!(displayed.end_time(), 22.0);
    assert_eq!(page.original_trace().map(Trace::span_count), Some(4));
}

#[test]
fn stale_focus_id_falls_back_to_full_trace() {
    let page = loaded_page("t-1", Some("does-not-exist"));
    assert_eq!(page.display_source(), DisplaySource::Original);
    assert_eq!(page.displayed_trace().map(Trace::span_count), Some(4));
    assert_eq!(page.focus_span_id(), Some(&SpanId::new("does-not-exist")));
}

#[test]
fn empty_focus_id_is_treated_as_absent() {
    let page = loaded_page("t-1", Some(""));
    assert_eq!(page.focus_span_id(), None);
    assert_eq!(page.display_source(), DisplaySource::Original);
}

#[test]
fn focus_change_resets_view_range() {
    let mut page = loaded_page("t-1", None);
    page.set_view_range(0.2, 0.4, None).expect("valid range");
    page.navigate(TraceId::new("t-1"), Some(SpanId::new("b")));
    assert_eq!(page.view_range(), TimeRange::FULL);
    assert_eq!(page.display_source(), DisplaySource::Subtrace);
}

#[test]
fn refocusing_uses_cached_subtrace() {
    let mut page = loaded_page("t-1", Some("a"));
    page.set_focus_span(None);
    page.set_focus_span(Some(SpanId::new("a")));
    let stats = page.snapshot().cache;
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}

#[test]
fn trace_reload_invalidates_cache() {
    let mut page = loaded_page("t-1", Some("a"));
    assert_eq!(page.snapshot().cache.size, 1);
    page.on_trace_loaded(sample_trace("t-1"));
    let stats = page.snapshot().cache;
    assert_eq!(stats.size, 1);
    assert_eq!(stats.misses, 2);
}

#[test]
fn navigation_requests_carry_current_trace_id() {
    let mut page = TracePage::new(TracePageConfig::default()).expect("page init");
    assert_eq!(page.request_focus(SpanId::new("a")), None);
    assert_eq!(page.request_reset_root(), None);

    page.navigate(TraceId::new("t-1"), None);
    assert_eq!(
        page.request_focus(SpanId::new("a")),
        Some(NavigationRequest::Focus {
            trace_id: TraceId::new("t-1"),
            span_id: SpanId::new("a"),
        })
    );
    assert_eq!(page.request_focus(SpanId::new("")), None);
    assert_eq!(
        page.request_reset_root(),
        Some(NavigationRequest::ResetRoot {
            trace_id: TraceId::new("t-1")
        })
    );
}

#[test]
fn page_view_range_operations_delegate_to_controller() {
    let mut page = loaded_page("t-1", None);

    let range = page.apply_gesture(RangeGesture::ZoomInFast);
    assert_abs_diff_eq!(range.start, 0.05, epsilon = 1e-12);
    assert_abs_diff_eq!(range.end, 0.95, epsilon = 1e-12);

    let range = page.adjust_view_range(-0.05, 0.05, None).expect("finite");
    assert_abs_diff_eq!(range.start, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(range.end, 1.0, epsilon = 1e-12);

    page.update_view_range_partial(
        ViewRangeTimeUpdate::default().with_reframe(Some(Reframe {
            anchor: 0.3,
            shift: 0.6,
        })),
    );
    assert_eq!(
        page.view_range_time().reframe,
        Some(Reframe {
            anchor: 0.3,
            shift: 0.6
        })
    );

    page.set_view_range(0.3, 0.6, None).expect("valid range");
    assert_eq!(page.view_range_time().reframe, None);
    assert_eq!(page.reset_view_range(), TimeRange::FULL);
}

#[test]
fn view_type_defaults_from_config_and_switches() {
    let config = TracePageConfig::default().with_default_view(TraceViewType::Flamegraph);
    let mut page = TracePage::new(config).expect("page init");
    assert_eq!(page.view_type(), TraceViewType::Flamegraph);
    assert!(!page.set_view_type(TraceViewType::Flamegraph));
    assert!(page.set_view_type(TraceViewType::Statistics));
    assert_eq!(page.view_type(), TraceViewType::Statistics);
}

#[test]
fn summary_follows_displayed_trace() {
    let mut page = loaded_page("t-1", None);
    assert_eq!(page.summary().map(|summary| summary.span_count), Some(4));
    assert_eq!(page.summary().map(|summary| summary.depth), Some(3));
    page.set_focus_span(Some(SpanId::new("a1")));
    assert_eq!(page.summary().map(|summary| summary.span_count), Some(1));
    assert_eq!(page.summary().map(|summary| summary.duration), Some(10.0));
}
