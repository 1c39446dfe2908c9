//! Data models
//!
//! Shared between raffle-server and the marketing site (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64`, all timestamps are unix millis.

pub mod participation;
pub mod prize;
pub mod raffle;
pub mod user;

// Re-exports
pub use participation::*;
pub use prize::*;
pub use raffle::*;
pub use user::*;
