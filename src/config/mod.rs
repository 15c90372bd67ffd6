use crate::domain::model::{DelayRange, SendMode};
use crate::utils::error::{BroadcastError, Result};
use crate::utils::validation::{
    validate_file_exists, validate_non_empty_string, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "wa-broadcast")]
#[command(about = "Send WhatsApp broadcast messages to multiple contacts")]
pub struct CliConfig {
    #[arg(
        short = 'n',
        long = "numbers",
        default_value = "../sample/numbers.csv",
        help = "Path to CSV file with contacts (name,number)"
    )]
    pub numbers: String,

    #[arg(
        short = 'm',
        long = "message",
        default_value = "../sample/message.txt",
        help = "Path to text file with message template"
    )]
    pub message: String,

    #[arg(
        short = 'f',
        long = "full",
        help = "Send to all contacts (default: test mode with first contact only)"
    )]
    pub full: bool,

    #[arg(
        short = 'd',
        long = "delay",
        default_value = "15-35",
        help = "Delay range in seconds (e.g., \"15-35\")"
    )]
    pub delay: String,

    #[arg(
        long,
        default_value = "http://127.0.0.1:8799",
        help = "Base URL of the local gateway bridge"
    )]
    pub gateway: String,

    #[arg(
        long = "client-id",
        default_value = "wa-broadcast",
        help = "Client identifier scoping the gateway session directory"
    )]
    pub client_id: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Validated, immutable run parameters derived from the CLI surface.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub numbers_path: PathBuf,
    pub message_path: PathBuf,
    pub mode: SendMode,
    pub delay: DelayRange,
}

impl CliConfig {
    pub fn resolve(&self) -> Result<RunConfig> {
        let delay = parse_delay_range(&self.delay)?;
        let mode = if self.full {
            SendMode::Full
        } else {
            SendMode::Test
        };

        Ok(RunConfig {
            numbers_path: PathBuf::from(&self.numbers),
            message_path: PathBuf::from(&self.message),
            mode,
            delay,
        })
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        // The delay format is rejected before anything touches the
        // filesystem or the gateway.
        parse_delay_range(&self.delay)?;
        validate_url("gateway", &self.gateway)?;
        validate_non_empty_string("client-id", &self.client_id)?;
        validate_file_exists("numbers file", &self.numbers)?;
        validate_file_exists("message file", &self.message)?;
        Ok(())
    }
}

/// Parses an inclusive `MIN-MAX` seconds range, e.g. `15-35`.
pub fn parse_delay_range(raw: &str) -> Result<DelayRange> {
    let invalid = || BroadcastError::ConfigError {
        message: format!("invalid delay format: {:?} (use MIN-MAX, e.g. 15-35)", raw),
    };

    let (min, max) = raw.split_once('-').ok_or_else(invalid)?;
    let min: u64 = min.trim().parse().map_err(|_| invalid())?;
    let max: u64 = max.trim().parse().map_err(|_| invalid())?;

    DelayRange::from_secs(min, max)
}
