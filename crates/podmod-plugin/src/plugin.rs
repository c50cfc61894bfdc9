use std::time::Duration;

use serde::Serialize;

use crate::config::ProjectConfig;
use crate::error::PluginResult;
use crate::store::ManifestStore;

// ---------------------------------------------------------------------------
// StepOutcome
// ---------------------------------------------------------------------------

/// What a single plugin did to the filesystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The plugin's option was off; nothing was read or written.
    Skipped,
    /// The target already had the up-to-date block; nothing was written.
    Unchanged,
    /// The block was inserted. `cleared_stale` is set when an older block
    /// with the same tag was removed first.
    Patched { cleared_stale: bool },
    /// The block was removed.
    Removed,
    /// Removal was requested but the target had no block.
    NotPresent,
}

impl StepOutcome {
    /// Returns `true` if the plugin wrote to the filesystem.
    pub fn wrote(&self) -> bool {
        matches!(self, Self::Patched { .. } | Self::Removed)
    }
}

/// A plugin's result: the configuration to hand on plus what happened.
#[derive(Clone, Debug)]
pub struct Applied {
    pub config: ProjectConfig,
    pub outcome: StepOutcome,
}

/// Recorded result of one step in a [`crate::PluginPipeline`] run.
#[derive(Clone, Debug, Serialize)]
pub struct StepReport {
    /// Name of the plugin that ran.
    pub plugin: String,
    /// What it did.
    #[serde(flatten)]
    pub outcome: StepOutcome,
    /// Wall-clock time the step took.
    #[serde(skip)]
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// ConfigPlugin trait
// ---------------------------------------------------------------------------

/// A single step in the configuration modification sequence.
///
/// A plugin receives the project configuration by value and must return it
/// unmodified; its effects go to files through the [`ManifestStore`].
///
/// The trait is object-safe and `Send + Sync` so plugins can be stored in
/// a `Vec<Box<dyn ConfigPlugin>>`.
pub trait ConfigPlugin: Send + Sync {
    /// Human-readable name of this plugin (e.g., "withMobileVlcKit").
    fn name(&self) -> &str;

    /// Run the plugin against the project described by `config`.
    fn apply(&self, config: ProjectConfig, store: &dyn ManifestStore) -> PluginResult<Applied>;
}
