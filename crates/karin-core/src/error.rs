//! # Core Validation Errors
//!
//! Structured errors for identifier construction in `karin-core`.
//! Uses `thiserror` for ergonomic error definitions with diagnostic context.

use thiserror::Error;

/// Errors from validating core identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Case identifier was empty or whitespace-only.
    #[error("invalid case id: must be a non-empty string")]
    InvalidCaseId,

    /// Tenant identifier was empty or whitespace-only.
    #[error("invalid tenant id: must be a non-empty string")]
    InvalidTenantId,

    /// Deadline identifier was empty or whitespace-only.
    #[error("invalid deadline id: must be a non-empty string")]
    InvalidDeadlineId,
}
