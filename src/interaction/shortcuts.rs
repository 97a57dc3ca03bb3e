use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{TraceViewError, TraceViewResult};

use super::RangeGesture;

/// Named action a keyboard dispatcher can trigger on the trace page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShortcutAction {
    Gesture(RangeGesture),
    ScrollToNextMatch,
    ScrollToPrevMatch,
    ClearSearch,
}

impl ShortcutAction {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "scrollToNextVisibleSpan" => Some(Self::ScrollToNextMatch),
            "scrollToPrevVisibleSpan" => Some(Self::ScrollToPrevMatch),
            "clearSearch" => Some(Self::ClearSearch),
            other => RangeGesture::from_name(other).map(Self::Gesture),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Gesture(gesture) => gesture.name(),
            Self::ScrollToNextMatch => "scrollToNextVisibleSpan",
            Self::ScrollToPrevMatch => "scrollToPrevVisibleSpan",
            Self::ClearSearch => "clearSearch",
        }
    }
}

/// Key-combo to action table owned by a trace page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutBindings {
    bindings: IndexMap<String, ShortcutAction>,
}

impl Default for ShortcutBindings {
    fn default() -> Self {
        use RangeGesture::*;
        use ShortcutAction::*;

        let defaults = [
            ("a", Gesture(PanLeft)),
            ("left", Gesture(PanLeft)),
            ("shift+a", Gesture(PanLeftFast)),
            ("shift+left", Gesture(PanLeftFast)),
            ("d", Gesture(PanRight)),
            ("right", Gesture(PanRight)),
            ("shift+d", Gesture(PanRightFast)),
            ("shift+right", Gesture(PanRightFast)),
            ("up", Gesture(ZoomIn)),
            ("shift+up", Gesture(ZoomInFast)),
            ("down", Gesture(ZoomOut)),
            ("shift+down", Gesture(ZoomOutFast)),
            ("f", ScrollToNextMatch),
            ("b", ScrollToPrevMatch),
            ("escape", ClearSearch),
        ];

        Self {
            bindings: defaults
                .into_iter()
                .map(|(combo, action)| (combo.to_owned(), action))
                .collect(),
        }
    }
}

impl ShortcutBindings {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: IndexMap::new(),
        }
    }

    /// Builds bindings from `combo -> action name` pairs layered over the
    /// defaults.
    pub fn with_overrides(overrides: &IndexMap<String, String>) -> TraceViewResult<Self> {
        let mut bindings = Self::default();
        for (combo, name) in overrides {
            let action = ShortcutAction::from_name(name).ok_or_else(|| {
                TraceViewError::InvalidConfig(format!(
                    "unknown shortcut action `{name}` for `{combo}`"
                ))
            })?;
            bindings.bind(combo, action)?;
        }
        Ok(bindings)
    }

    pub fn bind(&mut self, combo: &str, action: ShortcutAction) -> TraceViewResult<()> {
        let combo = normalize_combo(combo);
        if combo.is_empty() {
            return Err(TraceViewError::InvalidConfig(
                "shortcut combo must not be empty".to_owned(),
            ));
        }
        self.bindings.insert(combo, action);
        Ok(())
    }

    /// Removes a binding. Returns `true` when one existed.
    pub fn unbind(&mut self, combo: &str) -> bool {
        self.bindings.shift_remove(&normalize_combo(combo)).is_some()
    }

    #[must_use]
    pub fn resolve(&self, combo: &str) -> Option<ShortcutAction> {
        self.bindings.get(&normalize_combo(combo)).copied()
    }

    /// Key combos bound to `action`, in binding order.
    #[must_use]
    pub fn combos_for(&self, action: ShortcutAction) -> Vec<&str> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(combo, _)| combo.as_str())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn normalize_combo(combo: &str) -> String {
    combo.trim().to_ascii_lowercase()
}
