use serde::{Deserialize, Serialize};

use crate::core::{VIEW_CHANGE_BASE, VIEW_CHANGE_FAST};

pub mod shortcuts;
pub mod view_range;

pub use shortcuts::{ShortcutAction, ShortcutBindings};
pub use view_range::{RangeChange, Reframe, ViewRangeController, ViewRangeTime, ViewRangeTimeUpdate};

/// Additive deltas applied to the current view range before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeAdjustment {
    pub start_delta: f64,
    pub end_delta: f64,
}

impl RangeAdjustment {
    #[must_use]
    pub fn new(start_delta: f64, end_delta: f64) -> Self {
        Self {
            start_delta,
            end_delta,
        }
    }
}

/// Discrete pan/zoom gestures, each at a base and a fast magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeGesture {
    PanLeft,
    PanLeftFast,
    PanRight,
    PanRightFast,
    ZoomIn,
    ZoomInFast,
    ZoomOut,
    ZoomOutFast,
}

impl RangeGesture {
    pub const ALL: [Self; 8] = [
        Self::PanLeft,
        Self::PanLeftFast,
        Self::PanRight,
        Self::PanRightFast,
        Self::ZoomIn,
        Self::ZoomInFast,
        Self::ZoomOut,
        Self::ZoomOutFast,
    ];

    #[must_use]
    pub fn adjustment(self) -> RangeAdjustment {
        let (b, f) = (VIEW_CHANGE_BASE, VIEW_CHANGE_FAST);
        match self {
            Self::PanLeft => RangeAdjustment::new(-b, -b),
            Self::PanLeftFast => RangeAdjustment::new(-f, -f),
            Self::PanRight => RangeAdjustment::new(b, b),
            Self::PanRightFast => RangeAdjustment::new(f, f),
            Self::ZoomIn => RangeAdjustment::new(b, -b),
            Self::ZoomInFast => RangeAdjustment::new(f, -f),
            Self::ZoomOut => RangeAdjustment::new(-b, b),
            Self::ZoomOutFast => RangeAdjustment::new(-f, f),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::PanLeft => "panLeft",
            Self::PanLeftFast => "panLeftFast",
            Self::PanRight => "panRight",
            Self::PanRightFast => "panRightFast",
            Self::ZoomIn => "zoomIn",
            Self::ZoomInFast => "zoomInFast",
            Self::ZoomOut => "zoomOut",
            Self::ZoomOutFast => "zoomOutFast",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|gesture| gesture.name() == name)
    }
}

/// Origin of a view range change, reported with tracking events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "gesture", rename_all = "kebab-case")]
pub enum RangeSource {
    Shortcut(RangeGesture),
    Minimap,
    TimelineHeader,
    Reframe,
    Reset,
}
