use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PluginError, PluginResult};

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

/// The project being configured, threaded through every plugin.
///
/// Plugins never modify it; they mutate files on disk and hand it back so
/// the next plugin in the pipeline can run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Display name of the project.
    pub name: String,
    /// Resolved paths the plugins operate on.
    pub mod_request: ModRequest,
}

/// Filesystem locations resolved before any plugin runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModRequest {
    /// Root of the whole project.
    pub project_root: PathBuf,
    /// Root of the native iOS project (the directory holding the Podfile).
    pub platform_project_root: PathBuf,
}

impl ProjectConfig {
    /// A config for `project_root` with the iOS project in `ios_dir`
    /// (relative to the project root unless absolute).
    pub fn new(
        name: impl Into<String>,
        project_root: impl Into<PathBuf>,
        ios_dir: impl AsRef<Path>,
    ) -> Self {
        let project_root = project_root.into();
        let platform_project_root = project_root.join(ios_dir);
        Self {
            name: name.into(),
            mod_request: ModRequest {
                project_root,
                platform_project_root,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Plugin options
// ---------------------------------------------------------------------------

/// Options for the VLCKit plugin, shaped like the plugin entry in `app.json`:
/// `{ "ios": { "includeVLCKit": true } }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios: Option<IosOptions>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IosOptions {
    #[serde(
        rename = "includeVLCKit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub include_vlc_kit: Option<Flag>,
}

impl PluginOptions {
    /// Options with `ios.includeVLCKit` set to `enabled`.
    pub fn with_vlc_kit(enabled: bool) -> Self {
        Self {
            ios: Some(IosOptions {
                include_vlc_kit: Some(Flag(enabled)),
            }),
        }
    }

    /// Parse options from the JSON form used in `app.json` plugin entries.
    pub fn from_json(json: &str) -> PluginResult<Self> {
        serde_json::from_str(json).map_err(|e| PluginError::Config(e.to_string()))
    }

    /// `true` only when `ios.includeVLCKit` is present and truthy.
    pub fn include_vlc_kit(&self) -> bool {
        self.ios
            .as_ref()
            .and_then(|ios| ios.include_vlc_kit)
            .is_some_and(Flag::is_set)
    }
}

// ---------------------------------------------------------------------------
// Flag
// ---------------------------------------------------------------------------

/// A boolean-like option value.
///
/// Accepts booleans, integers (non-zero is set) and the strings
/// `true`/`yes`/`on`/`1` and `false`/`no`/`off`/`0`/`""` in any case.
/// Anything else is rejected when the configuration is loaded. This is
/// stricter than JavaScript truthiness: `"false"` is off, `"maybe"` is an
/// error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFlag", into = "bool")]
pub struct Flag(pub bool);

impl Flag {
    pub fn is_set(self) -> bool {
        self.0
    }
}

impl From<Flag> for bool {
    fn from(flag: Flag) -> Self {
        flag.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl TryFrom<RawFlag> for Flag {
    type Error = String;

    fn try_from(raw: RawFlag) -> Result<Self, Self::Error> {
        match raw {
            RawFlag::Bool(b) => Ok(Flag(b)),
            RawFlag::Int(n) => Ok(Flag(n != 0)),
            RawFlag::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(Flag(true)),
                "false" | "no" | "off" | "0" | "" => Ok(Flag(false)),
                _ => Err(format!("expected a boolean-like value, got {s:?}")),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// podmod.toml
// ---------------------------------------------------------------------------

/// Contents of a `podmod.toml` file.
///
/// ```toml
/// [project]
/// name = "App"
/// root = "."
/// ios_dir = "ios"
///
/// [ios]
/// includeVLCKit = true
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PodmodConfig {
    pub project: ProjectSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios: Option<IosOptions>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    pub name: String,
    /// Project root, relative to the directory holding the config file.
    pub root: PathBuf,
    /// iOS project directory, relative to `root`.
    pub ios_dir: PathBuf,
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            name: "app".into(),
            root: PathBuf::from("."),
            ios_dir: PathBuf::from("ios"),
        }
    }
}

impl PodmodConfig {
    /// Parse a config from TOML text. `origin` is only used in errors.
    pub fn from_toml_str(text: &str, origin: &Path) -> PluginResult<Self> {
        toml::from_str(text).map_err(|source| PluginError::ParseConfig {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> PluginResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| PluginError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Plugin options carried by this config.
    pub fn options(&self) -> PluginOptions {
        PluginOptions {
            ios: self.ios.clone(),
        }
    }

    /// Resolve the project paths against `base_dir` (the config file's
    /// directory, or the working directory when there is no file).
    pub fn project_config(&self, base_dir: &Path) -> ProjectConfig {
        let root = if self.project.root == Path::new(".") {
            base_dir.to_path_buf()
        } else {
            base_dir.join(&self.project.root)
        };
        ProjectConfig::new(self.project.name.clone(), root, &self.project.ios_dir)
    }
}
