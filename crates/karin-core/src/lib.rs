//! # karin-core — Foundational Types
//!
//! Shared primitives for the Karin Stack legal-process engine:
//!
//! - **Identity** ([`identity`]): Validated newtypes for case, tenant,
//!   and deadline identifiers.
//!
//! - **Stage** ([`stage`]): The [`ProcessStage`] enum encoding the fixed
//!   Ley Karin process graph. Every stage has at most one unconditional
//!   successor; skipping of optional stages is driven by the case
//!   context, not by the graph itself.
//!
//! - **Case** ([`case`]): The immutable [`CaseContext`] value object and
//!   the circumstance predicates that gate optional stages and their
//!   deadlines.
//!
//! - **Error** ([`error`]): Validation error hierarchy for identifier
//!   construction.
//!
//! ## Design Principle
//!
//! The process graph is an exhaustive-match enum, never a string-keyed
//! map. Adding a fourteenth stage is a compile error until every
//! successor, ordinal, and display path has been updated.

pub mod case;
pub mod error;
pub mod identity;
pub mod stage;

// Re-export primary types.
pub use case::{CaseCircumstances, CaseContext};
pub use error::ValidationError;
pub use identity::{CaseId, DeadlineId, TenantId};
pub use stage::ProcessStage;
