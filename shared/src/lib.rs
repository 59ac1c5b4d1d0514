//! Shared types for the salon management suite
//!
//! Common types used by the server and any client applications:
//! the fixed role vocabulary and the auth/API request-response DTOs.

pub mod client;
pub mod role;

// Re-exports
pub use client::{LoginRequest, LoginResponse, ProfileUpdateRequest, RegisterRequest, UserInfo};
pub use role::{Role, RoleParseError};
pub use serde::{Deserialize, Serialize};
