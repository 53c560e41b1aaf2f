//! # Stage Flow
//!
//! Advancement over the fixed Ley Karin stage graph. The graph itself
//! lives on [`ProcessStage::successor`]; this module layers the two
//! case-specific rules on top:
//!
//! 1. **Skipping** — optional stages the case circumstances exclude are
//!    skipped forward past, repeatedly, until an applicable stage or
//!    the terminal stage is reached.
//! 2. **Blocking** — a stage cannot be advanced past while any
//!    non-completed, legal-requirement deadline instance is associated
//!    with it.

use serde::Serialize;

use karin_core::{CaseContext, DeadlineId, ProcessStage};

use crate::error::EngineError;
use crate::instance::DeadlineInstance;

/// The next applicable stage for a case, or `None` at terminal.
///
/// Looks up the unconditional successor, then skips forward past every
/// stage that [`CaseContext::stage_applies`] excludes. The loop is
/// bounded by the graph length: every skip moves strictly forward.
pub fn next_stage(current: ProcessStage, ctx: &CaseContext) -> Option<ProcessStage> {
    let mut candidate = current.successor();
    while let Some(stage) = candidate {
        if ctx.stage_applies(stage) {
            return Some(stage);
        }
        candidate = stage.successor();
    }
    None
}

/// Result of a stage-advancement check.
///
/// Serialized to the UI layer so it can render the blocking deadlines
/// to the case manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvanceCheck {
    /// Whether the current stage may be advanced past.
    pub allowed: bool,
    /// Human-readable reason when blocked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Identifiers of the blocking instances.
    pub blocking: Vec<DeadlineId>,
}

impl AdvanceCheck {
    fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
            blocking: Vec::new(),
        }
    }
}

/// Check whether the current stage may be advanced past.
///
/// Advancement is blocked if any non-completed, legal-requirement
/// instance is associated with the current stage. Non-mandatory
/// deadlines never block.
pub fn can_advance(current: ProcessStage, instances: &[DeadlineInstance]) -> AdvanceCheck {
    let blocking: Vec<DeadlineId> = instances
        .iter()
        .filter(|i| i.stage == current && i.legal_requirement && i.is_open())
        .map(|i| i.id.clone())
        .collect();

    if blocking.is_empty() {
        AdvanceCheck::allowed()
    } else {
        AdvanceCheck {
            allowed: false,
            reason: Some(format!(
                "{} mandatory deadline(s) for stage {} are not completed",
                blocking.len(),
                current.display_name()
            )),
            blocking,
        }
    }
}

/// Advance to the next applicable stage, or fail if blocked.
///
/// Returns `Ok(None)` when the case is already at the terminal stage.
///
/// # Errors
///
/// Returns [`EngineError::StageBlocked`] when mandatory deadlines for
/// the current stage remain open.
pub fn advance_stage(
    ctx: &CaseContext,
    instances: &[DeadlineInstance],
) -> Result<Option<ProcessStage>, EngineError> {
    let check = can_advance(ctx.current_stage, instances);
    if !check.allowed {
        return Err(EngineError::StageBlocked {
            stage: ctx.current_stage,
            open: check.blocking.len(),
            blocking: check.blocking,
        });
    }
    Ok(next_stage(ctx.current_stage, ctx))
}
