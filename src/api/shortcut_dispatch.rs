use tracing::debug;

use crate::interaction::ShortcutAction;

use super::TracePage;

impl TracePage {
    /// Runs a shortcut callback by its registered name, e.g. `panLeftFast`.
    ///
    /// Unknown names are ignored and reported as `false`.
    pub fn handle_shortcut(&mut self, name: &str) -> bool {
        match ShortcutAction::from_name(name) {
            Some(action) => {
                self.run_shortcut_action(action);
                true
            }
            None => {
                debug!(shortcut = name, "ignoring unknown shortcut name");
                false
            }
        }
    }

    /// Resolves a key combo through the page bindings and runs its action.
    pub fn handle_key(&mut self, combo: &str) -> bool {
        match self.shortcuts.resolve(combo) {
            Some(action) => {
                self.run_shortcut_action(action);
                true
            }
            None => false,
        }
    }

    pub fn run_shortcut_action(&mut self, action: ShortcutAction) {
        match action {
            ShortcutAction::Gesture(gesture) => {
                let _ = self.apply_gesture(gesture);
            }
            ShortcutAction::ScrollToNextMatch => {
                let _ = self.scroll_to_next_match();
            }
            ShortcutAction::ScrollToPrevMatch => {
                let _ = self.scroll_to_prev_match();
            }
            ShortcutAction::ClearSearch => self.clear_search(),
        }
    }
}
