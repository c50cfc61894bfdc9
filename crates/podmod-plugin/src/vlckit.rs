//! The VLCKit Podfile plugin.
//!
//! When `ios.includeVLCKit` is set, adds `pod 'VLCKit', '4.0.0a10'` to the
//! generated Podfile, three lines below `use_expo_modules!`, inside a
//! `withVlcMediaPlayer` generated section.

use std::fmt;
use std::path::PathBuf;

use podmod_merge::{
    content_hash, find_section, merge_contents, remove_contents, Anchor, GeneratedBlock, Manifest,
    MergeOutcome,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{PluginOptions, ProjectConfig};
use crate::error::PluginResult;
use crate::plugin::{Applied, ConfigPlugin, StepOutcome};
use crate::store::ManifestStore;

/// File name of the manifest inside the iOS project root.
pub const PODFILE: &str = "Podfile";
/// Tag written into the generated section markers.
pub const TAG: &str = "withVlcMediaPlayer";
/// Anchor token, matched case-insensitively.
pub const ANCHOR: &str = "use_expo_modules!";
/// Lines between the anchor and the generated section.
pub const OFFSET: usize = 3;
/// Marker comment prefix (Ruby comment, indented into the target block).
pub const COMMENT: &str = "  #";
/// Indent of the declaration inside the target block.
const INDENT: &str = "  ";

/// A single `pod` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PodDependency {
    pub name: String,
    pub version: String,
}

impl PodDependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// The pinned VLCKit release.
    pub fn vlckit() -> Self {
        Self::new("VLCKit", "4.0.0a10")
    }
}

impl fmt::Display for PodDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pod '{}', '{}'", self.name, self.version)
    }
}

/// State of the generated section in a Podfile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    /// No section with the tag.
    Absent,
    /// The section header carries the hash of what the plugin would write.
    Current,
    /// A section with the tag exists but its header hash differs.
    Stale,
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Absent => "absent",
            Self::Current => "current",
            Self::Stale => "stale",
        })
    }
}

/// What [`VlcKitPlugin`] does when applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PatchMode {
    /// Insert (or refresh) the section when the option is set.
    #[default]
    Apply,
    /// Remove the section regardless of the option.
    Remove,
}

/// Adds the VLCKit dependency to the project's Podfile.
#[derive(Clone, Debug)]
pub struct VlcKitPlugin {
    options: PluginOptions,
    mode: PatchMode,
    dependency: PodDependency,
}

impl VlcKitPlugin {
    /// A plugin that patches when `options` enable VLCKit.
    pub fn new(options: PluginOptions) -> Self {
        Self {
            options,
            mode: PatchMode::Apply,
            dependency: PodDependency::vlckit(),
        }
    }

    /// A plugin that strips a previously inserted section.
    pub fn removal() -> Self {
        Self {
            options: PluginOptions::default(),
            mode: PatchMode::Remove,
            dependency: PodDependency::vlckit(),
        }
    }

    pub fn mode(&self) -> PatchMode {
        self.mode
    }

    /// Returns `true` if the gate lets the patch run.
    pub fn is_enabled(&self) -> bool {
        self.options.include_vlc_kit()
    }

    /// The Podfile location for `config`.
    pub fn podfile_path(config: &ProjectConfig) -> PathBuf {
        config.mod_request.platform_project_root.join(PODFILE)
    }

    /// The generated block this plugin writes.
    pub fn block(&self) -> GeneratedBlock {
        GeneratedBlock {
            new_src: format!("{INDENT}{}", self.dependency),
            tag: TAG.to_string(),
            anchor: Anchor::literal(ANCHOR),
            offset: OFFSET,
            comment: COMMENT.to_string(),
        }
    }

    /// Compute the patched Podfile text without touching any file.
    pub fn plan(&self, src: &str) -> PluginResult<MergeOutcome> {
        self.warn_on_manual_declaration(src);
        Ok(merge_contents(src, &self.block())?)
    }

    /// Compute the Podfile text with the section removed.
    pub fn plan_removal(&self, src: &str) -> PluginResult<MergeOutcome> {
        Ok(remove_contents(src, TAG)?)
    }

    /// Inspect the generated section in `src`.
    ///
    /// Only the header hash is compared, the same check [`merge_contents`]
    /// uses, so `Current` always means an apply would leave the file alone.
    pub fn status(&self, src: &str) -> PluginResult<SectionStatus> {
        let manifest = Manifest::parse(src);
        let Some(span) = find_section(&manifest, TAG)? else {
            return Ok(SectionStatus::Absent);
        };
        let expected = content_hash(&self.block().new_src);
        let current = span.recorded_hash(&manifest) == Some(expected.as_str());
        Ok(if current {
            SectionStatus::Current
        } else {
            SectionStatus::Stale
        })
    }

    fn warn_on_manual_declaration(&self, src: &str) {
        let manifest = Manifest::parse(src);
        let span = find_section(&manifest, TAG).ok().flatten();
        let manual: Vec<usize> = manifest
            .pod_declarations(&self.dependency.name)
            .into_iter()
            .filter(|&i| span.map_or(true, |s| i < s.begin || i > s.end))
            .collect();
        if let Some(&line) = manual.first() {
            warn!(
                pod = %self.dependency.name,
                line = line + 1,
                "Podfile already declares this pod outside the generated section"
            );
        }
    }

    fn patch(&self, config: &ProjectConfig, store: &dyn ManifestStore) -> PluginResult<StepOutcome> {
        if !self.is_enabled() {
            debug!("ios.includeVLCKit not set; leaving Podfile alone");
            return Ok(StepOutcome::Skipped);
        }

        let path = Self::podfile_path(config);
        let contents = store.read(&path)?;
        let outcome = self.plan(&contents)?;
        if !outcome.is_changed() {
            debug!(path = %path.display(), "Podfile already patched");
            return Ok(StepOutcome::Unchanged);
        }

        if outcome.did_clear {
            warn!(path = %path.display(), tag = TAG, "replacing stale generated section");
        }
        store.write(&path, &outcome.contents)?;
        info!(path = %path.display(), dependency = %self.dependency, "patched Podfile");
        Ok(StepOutcome::Patched {
            cleared_stale: outcome.did_clear,
        })
    }

    fn unpatch(&self, config: &ProjectConfig, store: &dyn ManifestStore) -> PluginResult<StepOutcome> {
        let path = Self::podfile_path(config);
        let contents = store.read(&path)?;
        let outcome = self.plan_removal(&contents)?;
        if !outcome.did_clear {
            debug!(path = %path.display(), "no generated section to remove");
            return Ok(StepOutcome::NotPresent);
        }
        store.write(&path, &outcome.contents)?;
        info!(path = %path.display(), tag = TAG, "removed generated section");
        Ok(StepOutcome::Removed)
    }
}

impl ConfigPlugin for VlcKitPlugin {
    fn name(&self) -> &str {
        "withMobileVlcKit"
    }

    fn apply(&self, config: ProjectConfig, store: &dyn ManifestStore) -> PluginResult<Applied> {
        let outcome = match self.mode {
            PatchMode::Apply => self.patch(&config, store)?,
            PatchMode::Remove => self.unpatch(&config, store)?,
        };
        Ok(Applied { config, outcome })
    }
}

/// Add VLCKit to the Podfile when `options` enable it.
///
/// Returns `config` unchanged; the only effect is on the Podfile under
/// `config.mod_request.platform_project_root`. With the option off no file
/// is read or written.
pub fn with_mobile_vlc_kit(
    config: ProjectConfig,
    options: &PluginOptions,
    store: &dyn ManifestStore,
) -> PluginResult<ProjectConfig> {
    VlcKitPlugin::new(options.clone())
        .apply(config, store)
        .map(|applied| applied.config)
}
