use serde::{Deserialize, Serialize};

use crate::error::{TraceViewError, TraceViewResult};

/// Narrowest visible window, as a fraction of the trace duration.
pub const MIN_VIEW_RANGE: f64 = 0.01;
/// Upper clamp applied to a range start while adjusting.
pub const MAX_VIEW_START: f64 = 0.99;
/// Lower clamp applied to a range end while adjusting.
pub const MIN_VIEW_END: f64 = 0.01;
/// Delta magnitude of the base pan/zoom gestures.
pub const VIEW_CHANGE_BASE: f64 = 0.005;
/// Delta magnitude of the fast pan/zoom gestures.
pub const VIEW_CHANGE_FAST: f64 = 0.05;
/// Float tolerance used when checking the minimum-width floor.
pub const RANGE_EPSILON: f64 = 1e-9;

/// Visible fraction `[start, end]` of a trace's total duration.
///
/// Invariant: `0 <= start < end <= 1` and `end - start >= MIN_VIEW_RANGE`
/// (within `RANGE_EPSILON`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub const FULL: Self = Self {
        start: 0.0,
        end: 1.0,
    };

    /// Builds a validated range.
    pub fn new(start: f64, end: f64) -> TraceViewResult<Self> {
        let range = Self { start, end };
        if !range.is_valid() {
            return Err(TraceViewError::InvalidRange { start, end });
        }
        Ok(range)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn center(self) -> f64 {
        self.start + self.width() / 2.0
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.start >= 0.0
            && self.end <= 1.0
            && self.start < self.end
            && !below_floor(self.start, self.end)
    }

    /// Centered minimum-width window kept inside `[0, 1]`.
    #[must_use]
    pub(crate) fn min_window_at(center: f64) -> Self {
        let start = (center - MIN_VIEW_RANGE / 2.0).clamp(0.0, 1.0 - MIN_VIEW_RANGE);
        let end = (start + MIN_VIEW_RANGE).min(1.0);
        Self { start, end }
    }

    /// Repairs float drift so the returned value always satisfies the
    /// range invariant.
    #[must_use]
    pub(crate) fn repaired(self) -> Self {
        let mut start = self.start.max(0.0);
        let mut end = self.end.min(1.0);
        if below_floor(start, end) {
            end = (start + MIN_VIEW_RANGE).min(1.0);
            start = start.min(end - MIN_VIEW_RANGE).max(0.0);
        }
        Self { start, end }
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::FULL
    }
}

pub(crate) fn below_floor(start: f64, end: f64) -> bool {
    end - start < MIN_VIEW_RANGE - RANGE_EPSILON
}
