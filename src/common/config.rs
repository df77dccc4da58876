//! User configuration stored as TOML.
//!
//! Every field has a default, so an empty or partial file is valid and a
//! missing file behaves like an empty one.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::paths;

pub const DEFAULT_VIVALDI_PAGE: &str = "https://vivaldi.com/zh-hans/download/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppsConfig {
    /// Timeout in seconds for download-page requests (0 = unbounded)
    pub http_timeout_secs: u64,
    /// Timeout in seconds for package downloads (0 = unbounded)
    pub download_timeout_secs: u64,
    /// Where downloaded packages and archives are stored
    pub download_dir: PathBuf,
    /// Page scraped for Vivaldi package links
    pub vivaldi_download_page: String,
    /// Install locale and codec packages alongside the main package
    pub install_extras: bool,
    /// Turn `configure` into `preconfigure` in Firefox's dpkg postinst script
    pub patch_dpkg_postinst: bool,
    /// Parent directory JetBrains IDEs are extracted into
    pub jetbrains_root: PathBuf,
    /// Directory launcher links are created in
    pub bin_dir: PathBuf,
    /// Per-product JetBrains version overrides, keyed by product code
    pub jetbrains_versions: BTreeMap<String, String>,
}

impl Default for AppsConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: 10,
            download_timeout_secs: 0,
            download_dir: PathBuf::from("/tmp"),
            vivaldi_download_page: DEFAULT_VIVALDI_PAGE.to_string(),
            install_extras: true,
            patch_dpkg_postinst: true,
            jetbrains_root: PathBuf::from("/opt"),
            bin_dir: PathBuf::from("/usr/bin"),
            jetbrains_versions: BTreeMap::new(),
        }
    }
}

impl AppsConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("parsing config")
    }

    /// Load the config at `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }
        let contents = self.to_toml()?;
        fs::write(path, contents).with_context(|| format!("writing config to {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing config")
    }

    /// Resolve the config path: explicit override or the default location.
    pub fn path(override_path: Option<&Path>) -> Result<PathBuf> {
        match override_path {
            Some(path) => Ok(path.to_path_buf()),
            None => paths::default_config_path(),
        }
    }

    pub fn download_dir(&self) -> PathBuf {
        paths::expand(&self.download_dir)
    }

    pub fn jetbrains_root(&self) -> PathBuf {
        paths::expand(&self.jetbrains_root)
    }

    pub fn bin_dir(&self) -> PathBuf {
        paths::expand(&self.bin_dir)
    }
}
