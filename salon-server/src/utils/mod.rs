//! Utility module - common helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error type
//! - [`logger`] - tracing setup

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult};
