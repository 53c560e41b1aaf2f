//! # Case Context
//!
//! The immutable per-case input to the deadline engine: identifiers,
//! current stage, reception date, and the three gating circumstances
//! that decide which optional stages and deadlines apply.
//!
//! A context is created once when a case enters the legal-process flow
//! and **re-derived** (never mutated) whenever a gating circumstance
//! changes — see [`CaseContext::with_circumstances`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identity::{CaseId, TenantId};
use crate::stage::ProcessStage;

/// The three boolean circumstances that gate optional stages.
///
/// All default to `false`, which is the most common configuration:
/// a complete complaint, investigated internally, with no extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseCircumstances {
    /// The initial complaint was incomplete and must be corrected
    /// before the process can continue.
    pub requires_subsanation: bool,
    /// The case is referred straight to the Dirección del Trabajo,
    /// bypassing the internal investigation.
    pub is_direct_to_authority: bool,
    /// An extension of the investigation window has been requested.
    pub extension_requested: bool,
}

/// Immutable per-case input to the deadline engine.
///
/// Holds everything the engine needs to compute the applicable deadline
/// instances for one case: who the case belongs to, where it stands in
/// the process, when it was received, and which optional stages apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseContext {
    /// Case identifier from the intake application.
    pub case_id: CaseId,
    /// Tenant the case belongs to.
    pub tenant_id: TenantId,
    /// The stage the case is currently in.
    pub current_stage: ProcessStage,
    /// Date the complaint was received. All statutory deadlines are
    /// anchored directly or transitively on this date.
    pub reception_date: NaiveDate,
    /// Gating circumstances for optional stages.
    pub circumstances: CaseCircumstances,
}

impl CaseContext {
    /// Create a context for a case entering the legal-process flow.
    ///
    /// New cases start at [`ProcessStage::Reception`].
    pub fn new(
        case_id: CaseId,
        tenant_id: TenantId,
        reception_date: NaiveDate,
        circumstances: CaseCircumstances,
    ) -> Self {
        Self {
            case_id,
            tenant_id,
            current_stage: ProcessStage::Reception,
            reception_date,
            circumstances,
        }
    }

    /// Whether a stage applies to this case under its circumstances.
    ///
    /// This is the single applicability predicate shared by stage
    /// skipping and deadline-template gating:
    ///
    /// - `Subsanation` applies only when the complaint requires
    ///   correction;
    /// - `Investigation` applies only when the case is *not* referred
    ///   directly to the labor authority;
    /// - `InvestigationExtension` applies only when an extension was
    ///   requested — and never for direct-to-authority cases, which
    ///   have no investigation to extend;
    /// - every other stage always applies.
    pub fn stage_applies(&self, stage: ProcessStage) -> bool {
        match stage {
            ProcessStage::Subsanation => self.circumstances.requires_subsanation,
            ProcessStage::Investigation => !self.circumstances.is_direct_to_authority,
            ProcessStage::InvestigationExtension => {
                self.circumstances.extension_requested
                    && !self.circumstances.is_direct_to_authority
            }
            _ => true,
        }
    }

    /// Re-derive the context with different circumstances.
    ///
    /// The original context is left untouched; callers persist the new
    /// value and recompute deadlines from it.
    pub fn with_circumstances(&self, circumstances: CaseCircumstances) -> Self {
        Self {
            circumstances,
            ..self.clone()
        }
    }

    /// Re-derive the context at a different current stage.
    pub fn at_stage(&self, stage: ProcessStage) -> Self {
        Self {
            current_stage: stage,
            ..self.clone()
        }
    }
}
