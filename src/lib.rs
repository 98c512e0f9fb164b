pub mod config;
pub mod utils;
pub mod web;
pub mod webhook;

use std::sync::Arc;
use std::time::Instant;

use config::Config;
use utils::logger::OperatorLog;

/// Immutable state shared by every request handler.
pub struct AppContext {
    pub config: Config,
    pub log: Arc<dyn OperatorLog>,
    pub started_at: Instant,
}

impl AppContext {
    pub fn new(config: Config, log: Arc<dyn OperatorLog>) -> Self {
        Self {
            config,
            log,
            started_at: Instant::now(),
        }
    }
}
