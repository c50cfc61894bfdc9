//! Configuration plugins for podmod.
//!
//! A plugin is one step of a project's configuration modification sequence:
//! it receives the [`ProjectConfig`], edits files through a
//! [`ManifestStore`], and hands the configuration on unchanged. The
//! [`VlcKitPlugin`] adds a pinned VLCKit dependency to the iOS Podfile when
//! `ios.includeVLCKit` is set.
//!
//! # Quick Start
//!
//! ```rust
//! use podmod_plugin::{with_mobile_vlc_kit, InMemoryManifestStore, PluginOptions, ProjectConfig};
//!
//! let store = InMemoryManifestStore::new();
//! store.insert("/app/ios/Podfile", "use_expo_modules!\ntarget 'App' do\nend");
//!
//! let config = ProjectConfig::new("App", "/app", "ios");
//! let options = PluginOptions::with_vlc_kit(true);
//! let out = with_mobile_vlc_kit(config.clone(), &options, &store).unwrap();
//! assert_eq!(out, config);
//! let podfile = store.get(std::path::Path::new("/app/ios/Podfile")).unwrap();
//! assert!(podfile.contains("pod 'VLCKit', '4.0.0a10'"));
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod plugin;
pub mod store;
pub mod vlckit;

// Re-exports for convenience.
pub use config::{Flag, IosOptions, ModRequest, PluginOptions, PodmodConfig, ProjectConfig};
pub use error::{PluginError, PluginResult};
pub use pipeline::{PipelineResult, PluginPipeline};
pub use plugin::{Applied, ConfigPlugin, StepOutcome, StepReport};
pub use store::{FsManifestStore, InMemoryManifestStore, ManifestStore};
pub use vlckit::{with_mobile_vlc_kit, PatchMode, PodDependency, SectionStatus, VlcKitPlugin};
