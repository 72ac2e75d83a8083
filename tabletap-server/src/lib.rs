//! TableTap Server - QR-code table ordering backend
//!
//! Diners scan a table QR code, browse the menu, submit orders, and check
//! out; staff manage tables, sessions, orders, and the menu through an
//! authenticated admin API.
//!
//! # Module structure
//!
//! ```text
//! tabletap-server/src/
//! ├── core/          # Configuration, state, HTTP server
//! ├── auth/          # JWT authentication, admin cache
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # Embedded database: models + repositories
//! └── utils/         # Logging and helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export common types
pub use auth::{AdminStaff, CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app};
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Set up the process environment: dotenv, then logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; ignore a missing file
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
  ______      __    __   ______
 /_  __/___ _/ /_  / /__/_  __/___ _____
  / / / __ `/ __ \/ / _ \/ / / __ `/ __ \
 / / / /_/ / /_/ / /  __/ / / /_/ / /_/ /
/_/  \__,_/_.___/_/\___/_/  \__,_/ .___/
                                /_/
    "#
    );
}
