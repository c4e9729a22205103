//! Command-line surface: one subcommand per dashboard page.

use clap::{Args, Parser, Subcommand};
use email_dashboard_core::results::{RiskFilter, StatusFilter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "email-dashboard",
    version,
    about = "Submit email addresses to a validation API and review the results"
)]
pub struct Cli {
    /// Base URL of the validation API.
    #[arg(long, global = true, env = "EMAIL_VALIDATOR_API_URL")]
    pub api_url: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print raw JSON responses instead of formatted views.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a single email address.
    Validate(ValidateArgs),
    /// Validate a single address using the legacy {email, status} response.
    Simple {
        email: String,
    },
    /// Preview a .csv/.txt email list and submit it for bulk validation.
    Upload(UploadArgs),
    /// Show the results of a batch.
    Results(ResultsArgs),
    /// List previous batches.
    History,
    /// Show aggregate validation analytics.
    Analytics,
    /// Check whether the API is reachable.
    Status {
        /// Keep polling until interrupted.
        #[arg(long, short = 'w')]
        watch: bool,
    },
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    pub email: String,

    /// Skip SMTP verification.
    #[arg(long)]
    pub no_smtp: bool,

    /// Skip disposable email detection.
    #[arg(long)]
    pub no_disposable: bool,

    /// Skip breach monitoring.
    #[arg(long)]
    pub no_breach: bool,
}

#[derive(Args, Debug)]
pub struct UploadArgs {
    pub file: PathBuf,

    /// Only show rows containing this text in the preview.
    #[arg(long, short = 's', default_value = "")]
    pub search: String,

    /// Show the preview without submitting.
    #[arg(long)]
    pub preview_only: bool,

    /// Do not load the batch after submitting.
    #[arg(long)]
    pub no_results: bool,
}

#[derive(Args, Debug)]
pub struct ResultsArgs {
    pub batch_id: String,

    /// Match against email or domain, case-insensitive.
    #[arg(long, short = 's', default_value = "")]
    pub search: String,

    /// all, valid, invalid, disposable, role-based, breached
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// all, low, medium, high
    #[arg(long, default_value = "all")]
    pub risk: RiskFilter,

    /// Write the batch's valid emails to this file or directory.
    #[arg(long, short = 'e')]
    pub export: Option<PathBuf>,
}
