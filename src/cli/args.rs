//! CLI argument parsing
//!
//! ```text
//! measurements-dashboard [options] [tui]
//! measurements-dashboard [options] search [--patient-id ID] [--from T] [--to T] [--json]
//!
//! OPTIONS:
//!   --api-base <URL>   Measurement Store base URL
//!   --timeout <SECS>   Request timeout
//!   --config <FILE>    TOML config file
//!   --log-dir <DIR>    Log directory for TUI sessions
//! ```

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};

use crate::config::Overrides;
use crate::query::filter::{parse_local_datetime, FilterInput};

/// Parsed CLI arguments
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "measurements-dashboard",
    version,
    about = "Search stored blood pressure and heart rate measurements"
)]
pub struct Args {
    /// Measurement Store base URL (default http://localhost:8080)
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// TOML config file with an [api] section
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for TUI session logs
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

/// CLI modes
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Mode {
    /// Interactive terminal dashboard (default)
    Tui,

    /// Run one search and print the results
    Search(SearchArgs),
}

/// Criteria for a one-shot search
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct SearchArgs {
    /// Patient identifier (blank = all patients)
    #[arg(long, default_value = "", value_name = "ID")]
    pub patient_id: String,

    /// Window start, local time (YYYY-MM-DDTHH:MM[:SS])
    #[arg(long, value_name = "TIME", value_parser = parse_time_arg)]
    pub from: Option<NaiveDateTime>,

    /// Window end, local time (YYYY-MM-DDTHH:MM[:SS])
    #[arg(long, value_name = "TIME", value_parser = parse_time_arg)]
    pub to: Option<NaiveDateTime>,

    /// Print the raw JSON array instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Configuration values given on the command line
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config_file: self.config.clone(),
            base_url: self.api_base.clone(),
            timeout_secs: self.timeout,
        }
    }

    /// Selected mode (TUI when no subcommand was given)
    pub fn mode(&self) -> Mode {
        self.mode.clone().unwrap_or(Mode::Tui)
    }
}

impl SearchArgs {
    /// Filter form equivalent of these arguments
    pub fn filter_input(&self) -> FilterInput {
        FilterInput::new(self.patient_id.clone(), self.from, self.to)
    }
}

fn parse_time_arg(value: &str) -> Result<NaiveDateTime, String> {
    parse_local_datetime(value)
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM[:SS] ({})", e))
}
