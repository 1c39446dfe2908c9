//! Utility module: shared error types, logging, validation and time helpers
//!
//! - [`AppError`] - application error type (from shared::error)
//! - [`ApiResponse`] - error response body (from shared::error)

pub mod logger;
pub mod time;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
