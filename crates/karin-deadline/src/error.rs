//! # Engine Error Types
//!
//! Structured errors for the deadline engine. Every condition here is
//! recoverable at the call site: the caller surfaces "cannot advance"
//! or "invalid extension" to the end user and retries with corrected
//! input. The engine never uses errors for internal control flow.

use thiserror::Error;

use karin_core::{DeadlineId, ProcessStage};

/// Errors from deadline-engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Extension requested with a non-positive day count.
    #[error("invalid extension: extra days must be positive, got {0}")]
    InvalidExtensionDays(i64),

    /// Extension requested without a justifying reason.
    #[error("invalid extension: a non-empty reason is required")]
    MissingExtensionReason,

    /// The referenced deadline id is absent from the instance set.
    #[error("deadline not found: {0}")]
    DeadlineNotFound(DeadlineId),

    /// Stage advancement attempted while mandatory deadlines are open.
    #[error("cannot advance from stage {stage}: {open} mandatory deadline(s) outstanding")]
    StageBlocked {
        /// The stage the case is stuck in.
        stage: ProcessStage,
        /// Number of outstanding mandatory deadlines.
        open: usize,
        /// Identifiers of the blocking instances, for diagnostics.
        blocking: Vec<DeadlineId>,
    },
}
