//! # Application State
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           AppState                                      │
//! │                                                                         │
//! │  ┌──────────────┐   ┌────────────────────┐   ┌───────────────────────┐ │
//! │  │ AdminConfig  │   │ EditorState        │   │ Exporter              │ │
//! │  │ (immutable)  │   │ Arc<Mutex<Editor>> │   │ (stage is shared)     │ │
//! │  └──────────────┘   └────────────────────┘   └───────────────────────┘ │
//! │                                                                         │
//! │  Session lives outside: commands receive an Operator explicitly.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod editor;
mod session;

pub use config::{default_config_file, AdminConfig, AdminConfigError, CONFIG_FILE_NAME};
pub use editor::{Editor, EditorState};
pub use session::{Credentials, Operator, Session};

use chrono::Local;
use tracing::info;

use taraang_export::Exporter;

use crate::error::ApiResult;

pub struct AppState {
    pub config: AdminConfig,
    pub editor: EditorState,
    pub exporter: Exporter,
}

impl AppState {
    /// Builds the exporter from `config`, loading the font when one is set.
    pub async fn new(config: AdminConfig) -> ApiResult<Self> {
        let exporter = Exporter::new(config.export_config(), config.logo_loader()?)
            .load_font()
            .await?;
        info!(export_dir = %config.export_dir.display(), "Admin state initialized");
        Ok(AppState::with_exporter(config, exporter))
    }

    /// State around an existing exporter.
    pub fn with_exporter(config: AdminConfig, exporter: Exporter) -> Self {
        AppState {
            config,
            editor: EditorState::new(Local::now().date_naive()),
            exporter,
        }
    }
}
