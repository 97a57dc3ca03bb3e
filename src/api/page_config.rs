use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{TraceViewError, TraceViewResult};
use crate::extensions::{RepresentationConfig, RepresentationRegistry};
use crate::interaction::ShortcutBindings;

use super::TraceViewType;

/// Host-supplied trace page configuration.
///
/// Serializable so hosts can load it from their own config files; every
/// field has a default so partial documents are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracePageConfig {
    pub archive_enabled: bool,
    pub critical_path_enabled: bool,
    pub default_view: TraceViewType,
    pub representations: Vec<RepresentationConfig>,
    /// `key combo -> action name` overrides layered over the default bindings.
    pub shortcuts: IndexMap<String, String>,
}

impl Default for TracePageConfig {
    fn default() -> Self {
        Self {
            archive_enabled: false,
            critical_path_enabled: true,
            default_view: TraceViewType::Timeline,
            representations: Vec::new(),
            shortcuts: IndexMap::new(),
        }
    }
}

impl TracePageConfig {
    #[must_use]
    pub fn with_archive_enabled(mut self, enabled: bool) -> Self {
        self.archive_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_default_view(mut self, view: TraceViewType) -> Self {
        self.default_view = view;
        self
    }

    #[must_use]
    pub fn with_representation(mut self, representation: RepresentationConfig) -> Self {
        self.representations.push(representation);
        self
    }

    pub fn to_json_pretty(&self) -> TraceViewResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TraceViewError::InvalidConfig(format!("failed to serialize trace page config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> TraceViewResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            TraceViewError::InvalidConfig(format!("failed to parse trace page config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that representations and shortcut overrides resolve.
    pub fn validate(&self) -> TraceViewResult<()> {
        self.representation_registry()?;
        self.shortcut_bindings()?;
        Ok(())
    }

    pub(super) fn representation_registry(&self) -> TraceViewResult<RepresentationRegistry> {
        RepresentationRegistry::from_configs(&self.representations)
    }

    pub(super) fn shortcut_bindings(&self) -> TraceViewResult<ShortcutBindings> {
        ShortcutBindings::with_overrides(&self.shortcuts)
    }
}
