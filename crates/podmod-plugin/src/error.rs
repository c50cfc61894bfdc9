use std::io;
use std::path::PathBuf;

use podmod_merge::MergeError;

/// Errors that can occur while running configuration plugins.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// The target manifest could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The patched manifest could not be written back.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The merge engine rejected the manifest (no anchor, broken markers).
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// A configuration value is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The configuration file is not valid TOML for the expected schema.
    #[error("failed to parse {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A plugin in a pipeline failed.
    #[error("plugin '{plugin}' failed: {source}")]
    Step {
        plugin: String,
        #[source]
        source: Box<PluginError>,
    },
}

impl PluginError {
    /// Wrap `source` as the failure of the named pipeline step.
    pub fn step(plugin: impl Into<String>, source: PluginError) -> Self {
        Self::Step {
            plugin: plugin.into(),
            source: Box::new(source),
        }
    }

    /// The innermost error, unwrapping pipeline step context.
    pub fn root(&self) -> &PluginError {
        match self {
            Self::Step { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Convenience alias for plugin results.
pub type PluginResult<T> = Result<T, PluginError>;
