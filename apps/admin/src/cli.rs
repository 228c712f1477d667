//! # Command Line
//!
//! ```text
//! taraang-admin [--user U --password P] [--config FILE] [--json]
//!     quotation  preview|summary|export|share <JOB>
//!     invoice    preview|summary|export|share <JOB>
//!     config
//! ```
//!
//! Credentials may also come from `TARAANG_LOGIN_USER` and
//! `TARAANG_LOGIN_PASSWORD`.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use taraang_core::DocumentKind;
use taraang_export::ExportReport;

use crate::commands;
use crate::error::{ApiError, ApiResult};
use crate::state::{AdminConfig, AppState, Credentials, Operator, Session};

#[derive(Debug, Parser)]
#[command(name = "taraang-admin", version, about = "SS Taraang Events back office")]
pub struct Cli {
    /// Admin username
    #[arg(long, env = "TARAANG_LOGIN_USER", global = true)]
    pub user: Option<String>,

    /// Admin password
    #[arg(long, env = "TARAANG_LOGIN_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Configuration file instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print export reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Work with a quotation job file
    Quotation {
        #[command(subcommand)]
        action: DocumentAction,
    },
    /// Work with an invoice job file
    Invoice {
        #[command(subcommand)]
        action: DocumentAction,
    },
    /// Print the effective configuration (password hidden)
    Config,
}

#[derive(Debug, Subcommand)]
pub enum DocumentAction {
    /// Show the form as tables
    Preview { job: PathBuf },
    /// Print the WhatsApp summary text
    Summary { job: PathBuf },
    /// Export a PDF into the export directory
    Export { job: PathBuf },
    /// Print a WhatsApp share link
    Share {
        job: PathBuf,
        /// Recipient; defaults to the phone on the form
        #[arg(long)]
        phone: Option<String>,
    },
}

impl DocumentAction {
    pub fn job(&self) -> &Path {
        match self {
            DocumentAction::Preview { job }
            | DocumentAction::Summary { job }
            | DocumentAction::Export { job }
            | DocumentAction::Share { job, .. } => job,
        }
    }
}

impl Cli {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.user.clone().unwrap_or_default(),
            self.password.clone().unwrap_or_default(),
        )
    }
}

/// Logs in, runs one document command, logs out.
pub async fn run(cli: &Cli, state: &AppState, session: &mut Session) -> ApiResult<String> {
    session.login(&cli.credentials(), &state.config.credentials())?;
    let output = {
        let operator = session.require()?;
        dispatch(cli, state, &operator).await
    };
    session.logout();
    output
}

async fn dispatch(cli: &Cli, state: &AppState, operator: &Operator<'_>) -> ApiResult<String> {
    match &cli.command {
        Command::Quotation { action } => {
            commands::load_quotation(state, operator, action.job()).await?;
            match action {
                DocumentAction::Preview { .. } => Ok(commands::preview_quotation(state, operator)),
                DocumentAction::Summary { .. } => {
                    Ok(commands::quotation_summary_text(state, operator))
                }
                DocumentAction::Export { .. } => {
                    render_report(&commands::export_quotation(state, operator).await?, cli.json)
                }
                DocumentAction::Share { phone, .. } => Ok(commands::share_link(
                    state,
                    operator,
                    DocumentKind::Quotation,
                    phone.as_deref(),
                )),
            }
        }
        Command::Invoice { action } => {
            commands::load_invoice(state, operator, action.job()).await?;
            match action {
                DocumentAction::Preview { .. } => Ok(commands::preview_invoice(state, operator)),
                DocumentAction::Summary { .. } => Ok(commands::invoice_summary_text(state, operator)),
                DocumentAction::Export { .. } => {
                    render_report(&commands::export_invoice(state, operator).await?, cli.json)
                }
                DocumentAction::Share { phone, .. } => Ok(commands::share_link(
                    state,
                    operator,
                    DocumentKind::Invoice,
                    phone.as_deref(),
                )),
            }
        }
        Command::Config => render_config(&state.config),
    }
}

pub fn render_config(config: &AdminConfig) -> ApiResult<String> {
    toml::to_string_pretty(&config.redacted()).map_err(|e| ApiError::internal(e.to_string()))
}

fn render_report(report: &ExportReport, json: bool) -> ApiResult<String> {
    if json {
        return serde_json::to_string_pretty(report).map_err(|e| ApiError::internal(e.to_string()));
    }
    Ok(format!(
        "Saved {}\n  path:  {}\n  page:  {:.1} x {:.1} pt, {} page(s)\n  image: {} x {} px{}",
        report.filename,
        report.path.display(),
        report.page.width_pt,
        report.page.height_pt,
        report.page.pages,
        report.pixel_width,
        report.pixel_height,
        if report.patch.logo_embedded { "" } else { " (no logo)" },
    ))
}
