use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::ProjectConfig;
use crate::error::{PluginError, PluginResult};
use crate::plugin::{ConfigPlugin, StepReport};
use crate::store::ManifestStore;

/// The outcome of running every plugin in a pipeline.
#[derive(Clone, Debug)]
pub struct PipelineResult {
    /// The configuration returned by the last plugin.
    pub config: ProjectConfig,
    /// Per-step reports in execution order.
    pub steps: Vec<StepReport>,
    /// Total wall-clock time for the run.
    pub elapsed: Duration,
}

impl PipelineResult {
    /// Number of steps that wrote to the filesystem.
    pub fn writes(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome.wrote()).count()
    }
}

/// An ordered sequence of plugins sharing one configuration.
///
/// Each plugin receives the configuration returned by the previous one.
/// The pipeline is **fail-fast**: the first plugin error stops the run and
/// is returned wrapped with the plugin's name.
#[derive(Default)]
pub struct PluginPipeline {
    plugins: Vec<Box<dyn ConfigPlugin>>,
}

impl PluginPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plugin to the end of the pipeline.
    pub fn add_plugin(&mut self, plugin: Box<dyn ConfigPlugin>) {
        self.plugins.push(plugin);
    }

    /// Builder form of [`Self::add_plugin`].
    pub fn with(mut self, plugin: impl ConfigPlugin + 'static) -> Self {
        self.add_plugin(Box::new(plugin));
        self
    }

    /// Number of plugins in the pipeline.
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Run every plugin in order.
    pub fn run(
        &self,
        config: ProjectConfig,
        store: &dyn ManifestStore,
    ) -> PluginResult<PipelineResult> {
        let pipeline_start = Instant::now();
        let mut config = config;
        let mut steps = Vec::with_capacity(self.plugins.len());

        for plugin in &self.plugins {
            let step_start = Instant::now();
            let applied = plugin
                .apply(config, store)
                .map_err(|e| PluginError::step(plugin.name(), e))?;
            let elapsed = step_start.elapsed();

            debug!(plugin = plugin.name(), outcome = ?applied.outcome, ?elapsed, "plugin step done");
            steps.push(StepReport {
                plugin: plugin.name().to_string(),
                outcome: applied.outcome,
                elapsed,
            });
            config = applied.config;
        }

        Ok(PipelineResult {
            config,
            steps,
            elapsed: pipeline_start.elapsed(),
        })
    }
}
