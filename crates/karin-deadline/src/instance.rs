//! # Deadline Instances
//!
//! A [`DeadlineInstance`] is a catalog template materialized for one
//! case: computed start and end dates plus completion/extension
//! metadata. Status and days-remaining are **derived on every read**
//! from an explicit `now` — the stored values are a convenience
//! snapshot for serialization, never ground truth. Callers must call
//! [`DeadlineInstance::refreshed`] (or the engine operations, which do
//! so) before trusting them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use karin_core::{DeadlineId, ProcessStage};

use crate::catalog::Priority;

/// Days before the end date at which an open deadline starts warning.
pub const WARNING_WINDOW_DAYS: i64 = 2;

/// The live status of a deadline instance.
///
/// Precedence: `Completed` > `Overdue` > `Warning` > `Active`.
/// Completion is recorded state; the other three are pure functions of
/// (end date, now).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineStatus {
    /// Fulfilled and closed.
    Completed,
    /// The end date has passed without completion.
    Overdue,
    /// Within the warning window (two days or fewer remaining).
    Warning,
    /// Open with time remaining.
    Active,
}

impl DeadlineStatus {
    /// The canonical string identifier for serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::Warning => "warning",
            Self::Active => "active",
        }
    }
}

impl std::fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extension metadata recorded when a deadline is prolonged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRecord {
    /// End date before the first extension.
    pub original_end_date: NaiveDate,
    /// Justification supplied by the extender. Never empty.
    pub reason: String,
    /// Total calendar days added across all extensions.
    pub extended_by_days: u32,
    /// Actor who granted the (latest) extension.
    pub extended_by: String,
}

/// Completion metadata recorded when a deadline is fulfilled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Date the deadline was marked complete.
    pub completed_at: NaiveDate,
    /// Actor who completed it.
    pub completed_by: String,
}

/// A deadline template materialized for a specific case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineInstance {
    /// Deterministic identifier: `<case-id>:<template-key>`.
    pub id: DeadlineId,
    /// Template key this instance was materialized from.
    pub template_key: String,
    /// Display name, copied from the template.
    pub name: String,
    /// Description, copied from the template.
    pub description: String,
    /// Stage the deadline is associated with.
    pub stage: ProcessStage,
    /// Alert priority.
    pub priority: Priority,
    /// Mandatory legal requirement flag.
    pub legal_requirement: bool,
    /// Computed start date.
    pub start_date: NaiveDate,
    /// Computed end date. Invariant: `end_date >= start_date`.
    pub end_date: NaiveDate,
    /// Status snapshot as of the last refresh. Recompute on read.
    pub status: DeadlineStatus,
    /// Days-remaining snapshot as of the last refresh. Recompute on read.
    pub days_remaining: i64,
    /// Extension metadata, present once the instance has been prolonged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<ExtensionRecord>,
    /// Completion metadata, present once the instance is completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<CompletionRecord>,
}

impl DeadlineInstance {
    /// Derive the status as of `now`.
    ///
    /// Completion overrides date arithmetic. Otherwise: past the end
    /// date is `Overdue`; within [`WARNING_WINDOW_DAYS`] of the end
    /// date (inclusive) is `Warning`; anything earlier is `Active`.
    pub fn status_at(&self, now: NaiveDate) -> DeadlineStatus {
        if self.completion.is_some() {
            return DeadlineStatus::Completed;
        }
        let remaining = (self.end_date - now).num_days();
        if remaining < 0 {
            DeadlineStatus::Overdue
        } else if remaining <= WARNING_WINDOW_DAYS {
            DeadlineStatus::Warning
        } else {
            DeadlineStatus::Active
        }
    }

    /// Derive days remaining as of `now`, floored at zero once overdue.
    ///
    /// Calendar-day subtraction, even for business-day deadlines; the
    /// consuming dashboards render this number as-is.
    pub fn days_remaining_at(&self, now: NaiveDate) -> i64 {
        (self.end_date - now).num_days().max(0)
    }

    /// Return a copy with the status and days-remaining snapshots
    /// recomputed as of `now`.
    pub fn refreshed(&self, now: NaiveDate) -> Self {
        Self {
            status: self.status_at(now),
            days_remaining: self.days_remaining_at(now),
            ..self.clone()
        }
    }

    /// Whether the deadline is still open (not completed).
    pub fn is_open(&self) -> bool {
        self.completion.is_none()
    }
}
