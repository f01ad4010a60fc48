//! Configuration document for mirrorwatch
//!
//! The on-disk format is TOML: an optional `[retry]` record, an optional
//! `[tool]` override, and an ordered `[[rule]]` array. Rule `action` values
//! stay free strings at this layer; validation parses them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::policy::RetryPolicy;
use crate::rule::RawRule;

/// Directory under the platform config dir holding mirrorwatch files.
const APP_DIR: &str = "mirrorwatch";

/// Config file name inside [`APP_DIR`].
const CONFIG_FILE: &str = "mirrorwatch.toml";

/// External-tool override section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSection {
    /// Program to invoke instead of the platform default tool
    pub program: String,
}

/// Parsed configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Retry policy forwarded to the external tool. Absent or non-positive
    /// values mean the tool defaults apply.
    #[serde(default)]
    pub retry: Option<RetryPolicy>,

    /// Optional external-tool override
    #[serde(default)]
    pub tool: Option<ToolSection>,

    /// Watch rules in declaration order
    #[serde(default, rename = "rule")]
    pub rules: Vec<RawRule>,
}

impl Config {
    /// Parse a configuration document from TOML content.
    ///
    /// `origin` is only used for error context. Unknown keys are tolerated.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse {
            path: origin.to_path_buf(),
            message: e.message().to_string(),
        })
    }

    /// Load the config file at `path`. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Some(Self::parse(&content, path)?))
    }

    /// Write this config as TOML at `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| Error::io(path, e))
    }

    /// Default config file location under the platform config directory.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(Error::NoConfigDir)?;
        Ok(base.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Write a sample config at `path` unless a file already exists there.
    ///
    /// The sample carries the default retry policy and one Mirror rule whose
    /// sample directories sit beside the config file. Both directories are
    /// created so the sample runs as written.
    pub fn write_sample(path: &Path) -> Result<()> {
        if path.exists() {
            return Ok(());
        }

        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let source = base.join("sample-source");
        let destination = base.join("sample-destination");
        fs::create_dir_all(&source).map_err(|e| Error::io(&source, e))?;
        fs::create_dir_all(&destination).map_err(|e| Error::io(&destination, e))?;

        let sample = Config {
            retry: Some(RetryPolicy::default()),
            tool: None,
            rules: vec![RawRule::new(
                "Mirror",
                source.to_string_lossy(),
                destination.to_string_lossy(),
            )],
        };
        sample.save(path)?;
        info!(path = %path.display(), "wrote sample configuration");
        Ok(())
    }
}
