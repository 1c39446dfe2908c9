//! Raffle Server - daily prize raffle backend for the dealership site
//!
//! Visitors register once and are entered in the raffle of the day. Extra
//! entries come from visits, referrals and test drives, and each entry is
//! one unit of weight when the winner is drawn.
//!
//! ```text
//! raffle-server/src/
//! ├── core/          # config, state, server, startup errors
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── raffle/        # lifecycle, draw, entries, registration, stats
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging, validation, time helpers
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod raffle;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerError, ServerState};
pub use raffle::RaffleService;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// Start logging as configured
///
/// Production logs are JSON; `LOG_DIR` adds a daily rotating file.
pub fn setup_logging(config: &Config) -> anyhow::Result<()> {
    init_logger_with_file(
        &config.log_level,
        config.is_production(),
        config.log_dir.as_deref(),
    )
}

pub fn print_banner() {
    println!(
        r#"
    ____        __________
   / __ \____ _/ __/ __/ /__
  / /_/ / __ `/ /_/ /_/ / _ \
 / _, _/ /_/ / __/ __/ /  __/
/_/ |_|\__,_/_/ /_/ /_/\___/
    "#
    );
}
