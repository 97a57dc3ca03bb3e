use ordered_float::OrderedFloat;

use crate::core::{Span, SpanId, Trace};

/// Parent/child index over a trace, resolved from span references.
///
/// A span whose parent is missing from the trace is a root. Children are
/// ordered by start time, ties broken by position in the trace.
#[derive(Debug, Clone)]
pub struct SpanTree<'a> {
    trace: &'a Trace,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl<'a> SpanTree<'a> {
    #[must_use]
    pub fn build(trace: &'a Trace) -> Self {
        let spans = trace.spans();
        let mut parents = vec![None; spans.len()];
        let mut children = vec![Vec::new(); spans.len()];
        let mut roots = Vec::new();

        for (position, span) in spans.iter().enumerate() {
            let parent = span
                .parent_id()
                .and_then(|parent_id| trace.position_of(parent_id))
                .filter(|&parent| parent != position);
            match parent {
                Some(parent) => {
                    parents[position] = Some(parent);
                    children[parent].push(position);
                }
                None => roots.push(position),
            }
        }

        let order_key = |&position: &usize| (OrderedFloat(spans[position].start_time), position);
        for siblings in &mut children {
            siblings.sort_by_key(order_key);
        }
        roots.sort_by_key(order_key);

        Self {
            trace,
            parents,
            children,
            roots,
        }
    }

    #[must_use]
    pub fn roots(&self) -> Vec<&'a Span> {
        self.roots
            .iter()
            .map(|&position| &self.trace.spans()[position])
            .collect()
    }

    #[must_use]
    pub fn parent(&self, span_id: &SpanId) -> Option<&'a Span> {
        let position = self.trace.position_of(span_id)?;
        self.parents[position].map(|parent| &self.trace.spans()[parent])
    }

    #[must_use]
    pub fn children(&self, span_id: &SpanId) -> Vec<&'a Span> {
        self.trace
            .position_of(span_id)
            .map(|position| {
                self.children[position]
                    .iter()
                    .map(|&child| &self.trace.spans()[child])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Stable pre-order walk of `span_id` and all of its descendants.
    ///
    /// Returns an empty list when the span is not part of the trace.
    #[must_use]
    pub fn preorder_from(&self, span_id: &SpanId) -> Vec<&'a Span> {
        let Some(start) = self.trace.position_of(span_id) else {
            return Vec::new();
        };
        self.preorder_positions(start)
            .into_iter()
            .map(|position| &self.trace.spans()[position])
            .collect()
    }

    /// Full display order: every root subtree, roots ordered by start time.
    #[must_use]
    pub fn display_order(&self) -> Vec<&'a Span> {
        self.roots
            .iter()
            .flat_map(|&root| self.preorder_positions(root))
            .map(|position| &self.trace.spans()[position])
            .collect()
    }

    /// Distance from the nearest root; roots have depth 0.
    #[must_use]
    pub fn depth(&self, span_id: &SpanId) -> Option<usize> {
        let mut position = self.trace.position_of(span_id)?;
        let mut depth = 0;
        while let Some(parent) = self.parents[position] {
            depth += 1;
            if depth > self.parents.len() {
                // reference cycle
                return None;
            }
            position = parent;
        }
        Some(depth)
    }

    /// Number of levels reachable from the roots (a lone root counts as 1).
    #[must_use]
    pub fn depth_levels(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(usize, usize)> = self.roots.iter().map(|&root| (root, 1)).collect();
        while let Some((position, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(self.children[position].iter().map(|&child| (child, level + 1)));
        }
        deepest
    }

    fn preorder_positions(&self, start: usize) -> Vec<usize> {
        let mut visited = vec![false; self.parents.len()];
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(position) = stack.pop() {
            if visited[position] {
                continue;
            }
            visited[position] = true;
            order.push(position);
            stack.extend(self.children[position].iter().rev().copied());
        }
        order
    }
}
