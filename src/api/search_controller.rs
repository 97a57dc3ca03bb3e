use indexmap::IndexSet;

use crate::core::{SpanId, filter_spans};

use super::TracePage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollDirection {
    Next,
    Prev,
}

impl TracePage {
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search.text
    }

    /// Ids of displayed spans matching the search, in trace order.
    ///
    /// `None` when no search is active.
    #[must_use]
    pub fn search_matches(&self) -> Option<&IndexSet<SpanId>> {
        self.search.matches.as_ref()
    }

    #[must_use]
    pub fn scroll_cursor(&self) -> Option<&SpanId> {
        self.search.scroll_cursor.as_ref()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search.text = text.into();
        self.search.scroll_cursor = None;
        self.refresh_search_matches();
    }

    pub fn clear_search(&mut self) {
        self.search.text.clear();
        self.search.matches = None;
        self.search.scroll_cursor = None;
    }

    /// Moves to the next highlighted span (or next span when no search is
    /// active) in display order, wrapping at the end.
    pub fn scroll_to_next_match(&mut self) -> Option<SpanId> {
        self.scroll(ScrollDirection::Next)
    }

    /// Moves to the previous highlighted span, wrapping at the start.
    pub fn scroll_to_prev_match(&mut self) -> Option<SpanId> {
        self.scroll(ScrollDirection::Prev)
    }

    pub(super) fn refresh_search_matches(&mut self) {
        self.search.matches = self
            .displayed_trace()
            .and_then(|trace| filter_spans(&self.search.text, trace.spans()));
        let cursor_still_valid = match (&self.search.scroll_cursor, &self.search.matches) {
            (Some(cursor), Some(matches)) => matches.contains(cursor),
            (Some(cursor), None) => self
                .displayed_trace()
                .is_some_and(|trace| trace.contains(cursor)),
            (None, _) => true,
        };
        if !cursor_still_valid {
            self.search.scroll_cursor = None;
        }
    }

    fn scroll(&mut self, direction: ScrollDirection) -> Option<SpanId> {
        let trace = self.displayed_trace()?;
        let candidates: Vec<&SpanId> = trace
            .tree()
            .display_order()
            .into_iter()
            .map(|span| &span.span_id)
            .filter(|id| {
                self.search
                    .matches
                    .as_ref()
                    .is_none_or(|matches| matches.contains(*id))
            })
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let current = self
            .search
            .scroll_cursor
            .as_ref()
            .and_then(|cursor| candidates.iter().position(|id| *id == cursor));
        let last = candidates.len() - 1;
        let target = match (direction, current) {
            (ScrollDirection::Next, Some(position)) if position < last => position + 1,
            (ScrollDirection::Next, _) => 0,
            (ScrollDirection::Prev, Some(position)) if position > 0 => position - 1,
            (ScrollDirection::Prev, _) => last,
        };

        let target = candidates[target].clone();
        self.search.scroll_cursor = Some(target.clone());
        Some(target)
    }
}
