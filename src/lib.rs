pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::gateway::HttpGateway;
pub use config::{CliConfig, RunConfig};
pub use core::broadcast::Broadcaster;
pub use core::pacing::RandomPacer;
pub use utils::error::{BroadcastError, Result};
