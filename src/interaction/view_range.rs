use serde::{Deserialize, Serialize};

use crate::core::time_range::below_floor;
use crate::core::{MAX_VIEW_START, MIN_VIEW_END, MIN_VIEW_RANGE, TimeRange};
use crate::error::{TraceViewError, TraceViewResult};

use super::{RangeGesture, RangeSource};

/// In-progress drag reframe: the fixed anchor and the moving edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reframe {
    pub anchor: f64,
    pub shift: f64,
}

/// Committed view range plus provisional drag/hover state.
///
/// Only `current` is clamped; the preview fields are stored as given so
/// live-preview rendering can follow the pointer before a commit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewRangeTime {
    pub current: TimeRange,
    pub cursor: Option<f64>,
    pub reframe: Option<Reframe>,
    pub shift_start: Option<f64>,
    pub shift_end: Option<f64>,
}

/// Partial update for the preview fields of [`ViewRangeTime`].
///
/// `None` leaves a field untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewRangeTimeUpdate {
    pub cursor: Option<Option<f64>>,
    pub reframe: Option<Option<Reframe>>,
    pub shift_start: Option<Option<f64>>,
    pub shift_end: Option<Option<f64>>,
}

impl ViewRangeTimeUpdate {
    #[must_use]
    pub fn with_cursor(mut self, cursor: Option<f64>) -> Self {
        self.cursor = Some(cursor);
        self
    }

    #[must_use]
    pub fn with_reframe(mut self, reframe: Option<Reframe>) -> Self {
        self.reframe = Some(reframe);
        self
    }

    #[must_use]
    pub fn with_shift_start(mut self, shift_start: Option<f64>) -> Self {
        self.shift_start = Some(shift_start);
        self
    }

    #[must_use]
    pub fn with_shift_end(mut self, shift_end: Option<f64>) -> Self {
        self.shift_end = Some(shift_end);
        self
    }
}

/// Committed range change, reported to tracking when a source is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeChange {
    pub source: RangeSource,
    pub new_range: TimeRange,
    pub old_range: TimeRange,
}

/// Single-writer owner of the visible time range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewRangeController {
    time: ViewRangeTime,
}

impl ViewRangeController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn range(&self) -> TimeRange {
        self.time.current
    }

    #[must_use]
    pub fn time(&self) -> ViewRangeTime {
        self.time
    }

    /// Resets to the full range and drops any preview state.
    pub fn initialize(&mut self) {
        self.time = ViewRangeTime::default();
    }

    /// Applies additive deltas with clamping and the minimum-width floor.
    ///
    /// When the result is narrower than `MIN_VIEW_RANGE`, same-direction
    /// deltas (pans) pin the end to `start + MIN_VIEW_RANGE`, while
    /// opposite-direction deltas (zooms) snap to a minimum window centered on
    /// the previous range.
    pub fn adjust(
        &mut self,
        start_delta: f64,
        end_delta: f64,
        source: Option<RangeSource>,
    ) -> TraceViewResult<Option<RangeChange>> {
        if !start_delta.is_finite() || !end_delta.is_finite() {
            return Err(TraceViewError::InvalidData(
                "view range deltas must be finite".to_owned(),
            ));
        }

        let old = self.time.current;
        let mut start = (old.start + start_delta).clamp(0.0, MAX_VIEW_START);
        let mut end = (old.end + end_delta).clamp(MIN_VIEW_END, 1.0);

        if below_floor(start, end) {
            let same_direction = (start_delta < 0.0 && end_delta < 0.0)
                || (start_delta > 0.0 && end_delta > 0.0);
            if same_direction {
                end = start + MIN_VIEW_RANGE;
            } else {
                let window = TimeRange::min_window_at(old.center());
                start = window.start;
                end = window.end;
            }
        }

        Ok(self.commit(TimeRange { start, end }, source))
    }

    pub fn apply_gesture(&mut self, gesture: RangeGesture) -> TraceViewResult<Option<RangeChange>> {
        let adjustment = gesture.adjustment();
        self.adjust(
            adjustment.start_delta,
            adjustment.end_delta,
            Some(RangeSource::Shortcut(gesture)),
        )
    }

    /// Sets the range directly, e.g. when a drag selection is committed.
    ///
    /// The pair is ordered and clamped to `[0, 1]`; windows narrower than
    /// the floor widen around their center. Preview state is cleared.
    pub fn set_explicit_range(
        &mut self,
        start: f64,
        end: f64,
        source: Option<RangeSource>,
    ) -> TraceViewResult<Option<RangeChange>> {
        if !start.is_finite() || !end.is_finite() {
            return Err(TraceViewError::InvalidRange { start, end });
        }

        let lo = start.min(end).clamp(0.0, 1.0);
        let hi = start.max(end).clamp(0.0, 1.0);
        let range = if below_floor(lo, hi) {
            TimeRange::min_window_at(lo + (hi - lo) / 2.0)
        } else {
            TimeRange { start: lo, end: hi }
        };

        self.time.cursor = None;
        self.time.reframe = None;
        self.time.shift_start = None;
        self.time.shift_end = None;
        Ok(self.commit(range, source))
    }

    /// Merges provisional drag/hover fields without clamping.
    pub fn update_partial(&mut self, update: ViewRangeTimeUpdate) {
        if let Some(cursor) = update.cursor {
            self.time.cursor = cursor;
        }
        if let Some(reframe) = update.reframe {
            self.time.reframe = reframe;
        }
        if let Some(shift_start) = update.shift_start {
            self.time.shift_start = shift_start;
        }
        if let Some(shift_end) = update.shift_end {
            self.time.shift_end = shift_end;
        }
    }

    fn commit(&mut self, candidate: TimeRange, source: Option<RangeSource>) -> Option<RangeChange> {
        let old_range = self.time.current;
        let new_range = candidate.repaired();
        debug_assert!(new_range.is_valid(), "view range invariant violated: {new_range:?}");
        self.time.current = new_range;
        source.map(|source| RangeChange {
            source,
            new_range,
            old_range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_partial_only_touches_given_fields() {
        let mut controller = ViewRangeController::new();
        controller.update_partial(
            ViewRangeTimeUpdate::default()
                .with_cursor(Some(0.4))
                .with_shift_start(Some(-0.2)),
        );
        controller.update_partial(ViewRangeTimeUpdate::default().with_shift_end(Some(1.3)));

        let time = controller.time();
        assert_eq!(time.cursor, Some(0.4));
        assert_eq!(time.shift_start, Some(-0.2));
        assert_eq!(time.shift_end, Some(1.3));
        assert_eq!(time.current, TimeRange::FULL);

        controller.update_partial(ViewRangeTimeUpdate::default().with_cursor(None));
        assert_eq!(controller.time().cursor, None);
    }

    #[test]
    fn commit_without_source_reports_nothing() {
        let mut controller = ViewRangeController::new();
        let change = controller.adjust(0.1, -0.1, None).expect("finite deltas");
        assert!(change.is_none());
        assert!((controller.range().start - 0.1).abs() <= 1e-12);
    }
}
