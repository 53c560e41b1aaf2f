//! # Ley Karin Process Stages
//!
//! The fixed stage graph of the Ley Karin legal process. Each stage has
//! at most one unconditional successor; three stages are *optional* and
//! may be skipped depending on the case circumstances (see
//! [`CaseContext::stage_applies`](crate::case::CaseContext::stage_applies)).
//!
//! ## Stage Graph
//!
//! ```text
//! Reception ─▶ Subsanation* ─▶ PrecautionaryMeasures ─▶ DtNotification
//!                                                            │
//!                                                            ▼
//!          InvestigationExtension* ◀─ Investigation* ◀────────┘
//!                      │
//!                      ▼
//! ReportCreation ─▶ ReportApproval ─▶ DtSubmission ─▶ DtResolution
//!                                                          │
//!                                                          ▼
//!          MeasuresAdoption ─▶ Sanctions ─▶ FinalClosure (terminal)
//!
//! * optional — skipped when the case circumstances make it inapplicable
//! ```

use serde::{Deserialize, Serialize};

/// One step of the Ley Karin legal process.
///
/// Exactly one stage is current for a case at any time.
/// [`FinalClosure`](ProcessStage::FinalClosure) is terminal and has no
/// successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStage {
    /// Complaint received and registered.
    Reception,
    /// Correction/completion of an incomplete complaint. Optional.
    Subsanation,
    /// Adoption of precautionary measures protecting the complainant.
    PrecautionaryMeasures,
    /// Notification of the Dirección del Trabajo.
    DtNotification,
    /// Internal investigation. Optional — bypassed when the case is
    /// referred directly to the labor authority.
    Investigation,
    /// Extension of the investigation window. Optional.
    InvestigationExtension,
    /// Drafting of the investigation report.
    ReportCreation,
    /// Internal approval of the report.
    ReportApproval,
    /// Submission of the report to the Dirección del Trabajo.
    DtSubmission,
    /// Resolution by the Dirección del Trabajo.
    DtResolution,
    /// Adoption of the measures ordered in the resolution.
    MeasuresAdoption,
    /// Application of sanctions.
    Sanctions,
    /// Case closure. Terminal stage.
    FinalClosure,
}

impl ProcessStage {
    /// All stages in process order.
    pub fn all() -> &'static [ProcessStage] {
        &[
            Self::Reception,
            Self::Subsanation,
            Self::PrecautionaryMeasures,
            Self::DtNotification,
            Self::Investigation,
            Self::InvestigationExtension,
            Self::ReportCreation,
            Self::ReportApproval,
            Self::DtSubmission,
            Self::DtResolution,
            Self::MeasuresAdoption,
            Self::Sanctions,
            Self::FinalClosure,
        ]
    }

    /// The canonical string identifier for serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reception => "reception",
            Self::Subsanation => "subsanation",
            Self::PrecautionaryMeasures => "precautionary_measures",
            Self::DtNotification => "dt_notification",
            Self::Investigation => "investigation",
            Self::InvestigationExtension => "investigation_extension",
            Self::ReportCreation => "report_creation",
            Self::ReportApproval => "report_approval",
            Self::DtSubmission => "dt_submission",
            Self::DtResolution => "dt_resolution",
            Self::MeasuresAdoption => "measures_adoption",
            Self::Sanctions => "sanctions",
            Self::FinalClosure => "final_closure",
        }
    }

    /// Spanish display label for the UI layer.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Reception => "Recepción de la denuncia",
            Self::Subsanation => "Subsanación de la denuncia",
            Self::PrecautionaryMeasures => "Medidas de resguardo",
            Self::DtNotification => "Notificación a la Dirección del Trabajo",
            Self::Investigation => "Investigación interna",
            Self::InvestigationExtension => "Prórroga de la investigación",
            Self::ReportCreation => "Elaboración del informe",
            Self::ReportApproval => "Aprobación del informe",
            Self::DtSubmission => "Remisión del informe a la DT",
            Self::DtResolution => "Pronunciamiento de la DT",
            Self::MeasuresAdoption => "Adopción de medidas",
            Self::Sanctions => "Aplicación de sanciones",
            Self::FinalClosure => "Cierre del caso",
        }
    }

    /// 1-based position of this stage in process order.
    ///
    /// Used by the progress computation: `FinalClosure` has ordinal 13
    /// out of 13 total stages.
    pub fn ordinal(&self) -> u32 {
        match self {
            Self::Reception => 1,
            Self::Subsanation => 2,
            Self::PrecautionaryMeasures => 3,
            Self::DtNotification => 4,
            Self::Investigation => 5,
            Self::InvestigationExtension => 6,
            Self::ReportCreation => 7,
            Self::ReportApproval => 8,
            Self::DtSubmission => 9,
            Self::DtResolution => 10,
            Self::MeasuresAdoption => 11,
            Self::Sanctions => 12,
            Self::FinalClosure => 13,
        }
    }

    /// Total number of stages in the process.
    pub fn total() -> u32 {
        Self::all().len() as u32
    }

    /// The unconditional successor in the fixed stage graph.
    ///
    /// Returns `None` for the terminal stage. Circumstance-based
    /// skipping of optional stages is applied on top of this map by
    /// the flow module in `karin-deadline`; the graph itself is fixed.
    pub fn successor(&self) -> Option<ProcessStage> {
        match self {
            Self::Reception => Some(Self::Subsanation),
            Self::Subsanation => Some(Self::PrecautionaryMeasures),
            Self::PrecautionaryMeasures => Some(Self::DtNotification),
            Self::DtNotification => Some(Self::Investigation),
            Self::Investigation => Some(Self::InvestigationExtension),
            Self::InvestigationExtension => Some(Self::ReportCreation),
            Self::ReportCreation => Some(Self::ReportApproval),
            Self::ReportApproval => Some(Self::DtSubmission),
            Self::DtSubmission => Some(Self::DtResolution),
            Self::DtResolution => Some(Self::MeasuresAdoption),
            Self::MeasuresAdoption => Some(Self::Sanctions),
            Self::Sanctions => Some(Self::FinalClosure),
            Self::FinalClosure => None,
        }
    }

    /// Whether this stage is terminal (no successor).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::FinalClosure)
    }
}

impl std::fmt::Display for ProcessStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
