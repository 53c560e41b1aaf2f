//! # Alerts & Executive Summary
//!
//! Plain-data reporting outputs consumed by the dashboard layer:
//! prioritized critical alerts and the per-case executive summary with
//! its three-valued compliance classification.

use chrono::NaiveDate;
use serde::Serialize;

use karin_core::{DeadlineId, ProcessStage};

/// Class of a critical alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// A mandatory deadline has passed without completion.
    Overdue,
    /// A high-priority deadline is inside the warning window.
    Warning,
}

/// A prioritized alert extracted from a case's deadline set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriticalAlert {
    /// Alert class. Overdue alerts sort before warnings.
    pub kind: AlertKind,
    /// The deadline that raised the alert.
    pub deadline_id: DeadlineId,
    /// Display name of the deadline.
    pub deadline_name: String,
    /// Stage the deadline belongs to.
    pub stage: ProcessStage,
    /// Days past the end date (overdue) or until it (warning).
    pub days: i64,
    /// Rendered message for notification channels.
    pub message: String,
}

/// Three-valued compliance classification of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceLevel {
    /// No overdue or warning alerts.
    Compliant,
    /// At least one warning alert, no overdue alerts.
    AtRisk,
    /// At least one overdue alert.
    NonCompliant,
}

impl ComplianceLevel {
    /// The canonical string identifier for serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::AtRisk => "at_risk",
            Self::NonCompliant => "non_compliant",
        }
    }
}

impl std::fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregated per-case summary for the executive dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutiveSummary {
    /// Display name of the current stage.
    pub current_stage: String,
    /// Weighted progress, 0 through 100.
    pub progress: u8,
    /// Identifier of the earliest still-active deadline, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_deadline_id: Option<DeadlineId>,
    /// Display name of that deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_deadline_name: Option<String>,
    /// Number of critical alerts currently raised.
    pub alert_count: usize,
    /// End date of the last deadline in sorted order. `None` renders
    /// as "undetermined" in the UI.
    pub estimated_completion: Option<NaiveDate>,
    /// Compliance classification.
    pub compliance: ComplianceLevel,
}
