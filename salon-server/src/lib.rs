//! Salon Server - multi-tenant salon management backend
//!
//! One server behind the four salon apps (admin, client, employee,
//! manager): organizations and per-organization roles, client check-ins,
//! sale tracking and end-of-day cash reconciliation.
//!
//! # Module structure
//!
//! ```text
//! salon-server/src/
//! ├── core/            # configuration, state, HTTP server
//! ├── auth/            # JWT sessions, access policies, extractors
//! ├── api/             # HTTP routes and handlers
//! ├── db/              # embedded SurrealDB, models, repositories
//! ├── reconciliation.rs# end-of-day cash math
//! └── utils/           # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod reconciliation;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load .env and initialize logging. Call once at startup.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("WORK_DIR")
        .map(|dir| format!("{}/logs", dir))
        .ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____       __
  / ___/____ _/ /___  ____
  \__ \/ __ `/ / __ \/ __ \
 ___/ / /_/ / / /_/ / / / /
/____/\__,_/_/\____/_/ /_/
    "#
    );
}
