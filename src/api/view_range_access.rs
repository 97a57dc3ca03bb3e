use crate::core::TimeRange;
use crate::error::TraceViewResult;
use crate::extensions::TrackingEvent;
use crate::interaction::{
    RangeChange, RangeGesture, RangeSource, ViewRangeTime, ViewRangeTimeUpdate,
};

use super::TracePage;

impl TracePage {
    #[must_use]
    pub fn view_range(&self) -> TimeRange {
        self.view_range.range()
    }

    #[must_use]
    pub fn view_range_time(&self) -> ViewRangeTime {
        self.view_range.time()
    }

    pub fn adjust_view_range(
        &mut self,
        start_delta: f64,
        end_delta: f64,
        source: Option<RangeSource>,
    ) -> TraceViewResult<TimeRange> {
        let change = self.view_range.adjust(start_delta, end_delta, source)?;
        self.track_range_change(change);
        Ok(self.view_range.range())
    }

    pub fn apply_gesture(&mut self, gesture: RangeGesture) -> TimeRange {
        // Gesture deltas are constants, so adjusting cannot fail.
        if let Ok(change) = self.view_range.apply_gesture(gesture) {
            self.track_range_change(change);
        }
        self.view_range.range()
    }

    pub fn set_view_range(
        &mut self,
        start: f64,
        end: f64,
        source: Option<RangeSource>,
    ) -> TraceViewResult<TimeRange> {
        let change = self.view_range.set_explicit_range(start, end, source)?;
        self.track_range_change(change);
        Ok(self.view_range.range())
    }

    pub fn reset_view_range(&mut self) -> TimeRange {
        if let Ok(change) = self
            .view_range
            .set_explicit_range(0.0, 1.0, Some(RangeSource::Reset))
        {
            self.track_range_change(change);
        }
        self.view_range.range()
    }

    pub fn update_view_range_partial(&mut self, update: ViewRangeTimeUpdate) {
        self.view_range.update_partial(update);
    }

    fn track_range_change(&mut self, change: Option<RangeChange>) {
        if let Some(change) = change {
            self.emit_tracking_event(TrackingEvent::RangeAdjusted {
                source: change.source,
                new_range: change.new_range,
                old_range: change.old_range,
            });
        }
    }
}
