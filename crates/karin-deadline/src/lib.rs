//! # karin-deadline — Ley Karin Legal-Deadline Engine
//!
//! Computes the ordered, conditional sequence of legal-process deadlines
//! for a workplace-harassment case under Ley 21.643 (Ley Karin):
//!
//! - **Calendar** ([`calendar`]): Administrative business-day and
//!   calendar-day arithmetic over a configurable holiday set.
//!
//! - **Catalog** ([`catalog`]): The static, ordered registry of
//!   statutory deadline templates.
//!
//! - **Instance** ([`instance`]): Deadline instances materialized for a
//!   case, with status and days-remaining derived — never cached — from
//!   an explicit `now`.
//!
//! - **Flow** ([`flow`]): Stage advancement over the fixed process
//!   graph, skipping optional stages the case circumstances exclude,
//!   and blocking advancement while mandatory deadlines are open.
//!
//! - **Engine** ([`engine`]): Orchestration — deadline instantiation,
//!   completion, extension, progress, critical alerts, and the
//!   executive summary.
//!
//! ## Design Principle
//!
//! Every operation is a pure function over immutable value objects.
//! Mutating operations return new collections; the caller persists
//! them. Wall-clock time is always an explicit `now: NaiveDate`
//! parameter, so the same stored case data evaluated at two different
//! times yields different derived status by construction, and every
//! computation is reproducible in tests.

pub mod calendar;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod flow;
pub mod instance;
pub mod report;

// Re-export primary types.

// Error types
pub use error::EngineError;

// Calendar arithmetic
pub use calendar::{CalendarType, HolidayCalendar};

// Deadline catalog
pub use catalog::{DeadlineCatalog, DeadlineTemplate, Priority};

// Instances
pub use instance::{CompletionRecord, DeadlineInstance, DeadlineStatus, ExtensionRecord};

// Stage flow
pub use flow::{can_advance, next_stage, AdvanceCheck};

// Engine
pub use engine::DeadlineEngine;

// Reporting
pub use report::{AlertKind, ComplianceLevel, CriticalAlert, ExecutiveSummary};
