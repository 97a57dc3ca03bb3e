use trace_view::api::{TracePage, TracePageConfig};
use trace_view::core::{Span, SpanId, SpanQuery, SpanReference, Tag, Trace, TraceId, filter_spans};

fn child(id: &str, parent: &str, service: &str, operation: &str, start: f64) -> Span {
    Span::new(id, service, operation, start, 5.0)
        .with_reference(SpanReference::child_of(TraceId::new("t-1"), SpanId::new(parent)))
}

fn sample_trace() -> Trace {
    Trace::new(
        TraceId::new("t-1"),
        vec![
            Span::new("root", "frontend", "GET /cart", 0.0, 100.0),
            child("pay", "root", "payments", "charge", 40.0).with_tag(Tag::new("http.status_code", 500_i64)),
            child("inv", "root", "inventory", "reserve", 10.0),
            child("inv-db", "inv", "postgres", "SELECT stock", 12.0),
            child("pay-db", "pay", "postgres", "INSERT charge", 45.0)
                .with_tag(Tag::new("db.user", "Billing")),
        ],
    )
    .expect("valid trace")
}

fn loaded_page() -> TracePage {
    let mut page = TracePage::new(TracePageConfig::default()).expect("page init");
    page.navigate(TraceId::new("t-1"), None);
    page.on_trace_loaded(sample_trace());
    page
}

fn ids(matches: Option<&indexmap::IndexSet<SpanId>>) -> Vec<&str> {
    matches
        .map(|set| set.iter().map(SpanId::as_str).collect())
        .unwrap_or_default()
}

#[test]
fn blank_query_means_no_filter() {
    let trace = sample_trace();
    assert!(filter_spans("", trace.spans()).is_none());
    assert!(filter_spans("   ", trace.spans()).is_none());
    assert!(SpanQuery::parse(" - ").is_empty());
}

#[test]
fn tokens_match_case_insensitively_and_all_must_hold() {
    let trace = sample_trace();
    let hits = filter_spans("POSTGRES charge", trace.spans()).expect("query");
    assert_eq!(
        hits.iter().map(SpanId::as_str).collect::<Vec<_>>(),
        vec!["pay-db"]
    );

    let hits = filter_spans("db.user=billing", trace.spans()).expect("query");
    assert_eq!(hits.len(), 1);

    let hits = filter_spans("http.status_code=500", trace.spans()).expect("query");
    assert!(hits.contains(&SpanId::new("pay")));
}

#[test]
fn negated_tokens_exclude_matches() {
    let trace = sample_trace();
    let hits = filter_spans("postgres -insert", trace.spans()).expect("query");
    assert_eq!(
        hits.iter().map(SpanId::as_str).collect::<Vec<_>>(),
        vec!["inv-db"]
    );
}

#[test]
fn page_search_tracks_displayed_trace() {
    let mut page = loaded_page();
    page.set_search_text("postgres");
    assert_eq!(page.search_text(), "postgres");
    assert_eq!(ids(page.search_matches()), vec!["inv-db", "pay-db"]);

    page.set_focus_span(Some(SpanId::new("pay")));
    assert_eq!(ids(page.search_matches()), vec!["pay-db"]);

    page.clear_search();
    assert!(page.search_matches().is_none());
    assert_eq!(page.search_text(), "");
}

#[test]
fn scrolling_walks_matches_in_display_order_and_wraps() {
    let mut page = loaded_page();
    page.set_search_text("postgres");

    assert_eq!(page.scroll_to_next_match(), Some(SpanId::new("inv-db")));
    assert_eq!(page.scroll_to_next_match(), Some(SpanId::new("pay-db")));
    assert_eq!(page.scroll_to_next_match(), Some(SpanId::new("inv-db")));
    assert_eq!(page.scroll_to_prev_match(), Some(SpanId::new("pay-db")));
    assert_eq!(page.scroll_cursor(), Some(&SpanId::new("pay-db")));
}

#[test]
fn scrolling_without_search_visits_every_span() {
    let mut page = loaded_page();
    let visited: Vec<SpanId> = (0..5).filter_map(|_| page.scroll_to_next_match()).collect();
    assert_eq!(
        visited,
        ["root", "inv", "inv-db", "pay", "pay-db"]
            .into_iter()
            .map(SpanId::new)
            .collect::<Vec<_>>()
    );
    assert_eq!(page.scroll_to_prev_match(), Some(SpanId::new("pay")));
}

#[test]
fn scrolling_with_no_matches_or_no_trace_is_a_no_op() {
    let mut empty = TracePage::new(TracePageConfig::default()).expect("page init");
    assert_eq!(empty.scroll_to_next_match(), None);

    let mut page = loaded_page();
    page.set_search_text("nothing-matches-this");
    assert_eq!(ids(page.search_matches()), Vec::<&str>::new());
    assert_eq!(page.scroll_to_next_match(), None);
    assert_eq!(page.scroll_cursor(), None);
}

#[test]
fn cursor_outside_new_subtrace_is_dropped() {
    let mut page = loaded_page();
    page.set_search_text("postgres");
    page.scroll_to_next_match();
    assert_eq!(page.scroll_cursor(), Some(&SpanId::new("inv-db")));

    page.set_focus_span(Some(SpanId::new("pay")));
    assert_eq!(page.scroll_cursor(), None);
    assert_eq!(page.scroll_to_next_match(), Some(SpanId::new("pay-db")));
}
