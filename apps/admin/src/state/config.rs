//! # Admin Configuration
//!
//! Layered with the `config` crate, later sources winning:
//!
//! ```text
//! built-in defaults
//!      │
//!      ▼
//! <platform config dir>/taraang-admin.toml   (optional)
//!      │
//!      ▼
//! TARAANG_* environment variables            (TARAANG_EXPORT_DIR, ...)
//! ```
//!
//! ## Platform Paths
//! - **Linux**: `~/.config/taraang-admin/taraang-admin.toml`,
//!   exports in `~/.local/share/taraang-admin/exports`
//! - **macOS**: `~/Library/Application Support/in.taraang.taraang-admin/`
//! - **Windows**: `%APPDATA%\taraang\taraang-admin\`

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use taraang_export::{ExportConfig, ExportResult, FileLogoLoader, HttpLogoLoader, LogoLoader};

use super::session::Credentials;

/// Name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "taraang-admin.toml";

#[derive(Debug, Error)]
pub enum AdminConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Login accepted by the admin tool.
    /// Default: "admin"
    pub admin_username: String,

    /// Default: "taraang@2024"
    pub admin_password: String,

    /// Where PDFs are written.
    pub export_dir: PathBuf,

    /// Directory holding `new-logo.png` (used when no logo path/URL is set).
    pub assets_dir: PathBuf,

    /// Exact logo file, overriding `assets_dir`.
    #[serde(default)]
    pub logo_path: Option<PathBuf>,

    /// Fetch the logo from a site instead of disk.
    #[serde(default)]
    pub logo_base_url: Option<String>,

    /// TrueType font for document text; block glyphs when unset.
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    /// Default: 5000
    pub logo_timeout_ms: u64,

    /// Default: 100
    pub settle_delay_ms: u64,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("in", "taraang", "taraang-admin")
}

/// `<platform config dir>/taraang-admin.toml`, when a home directory exists.
pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn default_export_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("exports"))
        .unwrap_or_else(|| PathBuf::from("exports"))
}

impl AdminConfig {
    /// Loads defaults, the platform config file and the environment.
    pub fn load() -> Result<Self, AdminConfigError> {
        AdminConfig::load_from(default_config_file().as_deref())
    }

    /// Like [`AdminConfig::load`] with an explicit (optional) file.
    pub fn load_from(file: Option<&Path>) -> Result<Self, AdminConfigError> {
        let mut builder = Config::builder()
            .set_default("admin_username", "admin")?
            .set_default("admin_password", "taraang@2024")?
            .set_default(
                "export_dir",
                default_export_dir().to_string_lossy().to_string(),
            )?
            .set_default("assets_dir", "assets")?
            .set_default("logo_timeout_ms", 5000_i64)?
            .set_default("settle_delay_ms", 100_i64)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        let config = builder
            .add_source(Environment::with_prefix("TARAANG"))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// The credentials a login attempt is checked against.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.admin_username, &self.admin_password)
    }

    /// Export pipeline settings derived from this configuration.
    pub fn export_config(&self) -> ExportConfig {
        let config = ExportConfig::new(&self.export_dir)
            .logo_timeout(Duration::from_millis(self.logo_timeout_ms))
            .settle_delay(Duration::from_millis(self.settle_delay_ms));
        match &self.font_path {
            Some(path) => config.font_path(path),
            None => config,
        }
    }

    /// URL, then exact file, then the assets directory.
    pub fn logo_loader(&self) -> ExportResult<Arc<dyn LogoLoader>> {
        if let Some(base) = &self.logo_base_url {
            return Ok(Arc::new(HttpLogoLoader::new(base.clone())?));
        }
        Ok(match &self.logo_path {
            Some(path) => Arc::new(FileLogoLoader::fixed(path)),
            None => Arc::new(FileLogoLoader::new(&self.assets_dir)),
        })
    }

    /// Copy safe to print.
    pub fn redacted(&self) -> AdminConfig {
        AdminConfig {
            admin_password: "********".to_string(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(contents: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("taraang-admin-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let missing = std::env::temp_dir().join("taraang-admin-does-not-exist.toml");
        let config = AdminConfig::load_from(Some(missing.as_path())).unwrap();
        // Unless overridden in the environment running the tests
        if std::env::var("TARAANG_ADMIN_USERNAME").is_err() {
            assert_eq!(config.admin_username, "admin");
        }
        if std::env::var("TARAANG_LOGO_TIMEOUT_MS").is_err() {
            assert_eq!(config.logo_timeout_ms, 5000);
        }
        assert!(config.logo_path.is_none() || std::env::var("TARAANG_LOGO_PATH").is_ok());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = temp_file(
            "export_dir = \"/srv/taraang/pdf\"\nsettle_delay_ms = 250\nfont_path = \"fonts/NotoSans.ttf\"\n",
        );
        let config = AdminConfig::load_from(Some(path.as_path())).unwrap();
        let _ = std::fs::remove_file(&path);

        if std::env::var("TARAANG_EXPORT_DIR").is_err() {
            assert_eq!(config.export_dir, PathBuf::from("/srv/taraang/pdf"));
        }
        let export = config.export_config();
        if std::env::var("TARAANG_SETTLE_DELAY_MS").is_err() {
            assert_eq!(export.settle_delay, Duration::from_millis(250));
        }
        assert!(export.font_path.is_some());
    }

    #[test]
    fn test_redacted_hides_password() {
        let config = AdminConfig::load_from(None).unwrap().redacted();
        assert_eq!(config.admin_password, "********");
    }
}
