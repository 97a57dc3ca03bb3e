use indexmap::IndexSet;

use crate::core::{Span, SpanId};

#[derive(Debug, Clone, PartialEq, Eq)]
enum SearchToken {
    Text(String),
    TagEquals { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchClause {
    token: SearchToken,
    negated: bool,
}

/// Parsed span search query.
///
/// Tokens are whitespace separated and case-insensitive; every token must
/// hold. `key=value` matches a tag exactly, a leading `-` negates a token,
/// and bare tokens match as substrings of service, operation, span id and
/// tag keys/values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpanQuery {
    clauses: Vec<SearchClause>,
}

impl SpanQuery {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let clauses = text
            .split_whitespace()
            .filter_map(|raw| {
                let (negated, body) = match raw.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, raw),
                };
                if body.is_empty() {
                    return None;
                }
                let body = body.to_lowercase();
                let token = match body.split_once('=') {
                    Some((key, value)) if !key.is_empty() => SearchToken::TagEquals {
                        key: key.to_owned(),
                        value: value.to_owned(),
                    },
                    _ => SearchToken::Text(body),
                };
                Some(SearchClause { token, negated })
            })
            .collect();
        Self { clauses }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    #[must_use]
    pub fn matches(&self, span: &Span) -> bool {
        self.clauses
            .iter()
            .all(|clause| token_matches(&clause.token, span) != clause.negated)
    }
}

fn token_matches(token: &SearchToken, span: &Span) -> bool {
    match token {
        SearchToken::TagEquals { key, value } => span.tags.iter().any(|tag| {
            tag.key.to_lowercase() == *key && tag.value.to_string().to_lowercase() == *value
        }),
        SearchToken::Text(needle) => {
            let contains = |haystack: &str| haystack.to_lowercase().contains(needle.as_str());
            contains(&span.service_name)
                || contains(&span.operation_name)
                || contains(span.span_id.as_str())
                || span
                    .tags
                    .iter()
                    .any(|tag| contains(&tag.key) || contains(&tag.value.to_string()))
        }
    }
}

/// Returns the ids of spans matching `text`, in trace order.
///
/// Returns `None` for a blank query, which callers treat as "no filter".
#[must_use]
pub fn filter_spans(text: &str, spans: &[Span]) -> Option<IndexSet<SpanId>> {
    let query = SpanQuery::parse(text);
    if query.is_empty() {
        return None;
    }
    Some(matching_ids(&query, spans))
}

#[cfg(not(feature = "parallel-search"))]
fn matching_ids(query: &SpanQuery, spans: &[Span]) -> IndexSet<SpanId> {
    spans
        .iter()
        .filter(|span| query.matches(span))
        .map(|span| span.span_id.clone())
        .collect()
}

#[cfg(feature = "parallel-search")]
fn matching_ids(query: &SpanQuery, spans: &[Span]) -> IndexSet<SpanId> {
    use rayon::prelude::*;

    let hits: Vec<bool> = spans.par_iter().map(|span| query.matches(span)).collect();
    spans
        .iter()
        .zip(hits)
        .filter(|(_, hit)| *hit)
        .map(|(span, _)| span.span_id.clone())
        .collect()
}
