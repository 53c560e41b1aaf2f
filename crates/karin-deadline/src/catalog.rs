//! # Statutory Deadline Catalog
//!
//! The static, ordered registry of Ley Karin deadline templates. Each
//! template declares the stage it belongs to, whether it is a mandatory
//! legal requirement (missing it blocks stage advancement), its
//! priority, and its duration in administrative business days or —
//! where the legal reference says "días corridos" — calendar days.
//!
//! Calendar days take precedence over business days when a template
//! sets both.

use serde::{Deserialize, Serialize};

use karin_core::ProcessStage;

/// Alert/escalation priority of a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Statutory deadlines whose breach exposes the employer directly.
    High,
    /// Internal process deadlines.
    Medium,
    /// Administrative follow-ups.
    Low,
}

impl Priority {
    /// The canonical string identifier for serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A static catalog entry describing one statutory deadline.
///
/// Immutable, loaded once. Materialized into a
/// [`DeadlineInstance`](crate::instance::DeadlineInstance) per case by
/// the engine. Serialize-only: catalog data is compiled in, never read
/// back from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadlineTemplate {
    /// Stable snake_case key, used to derive deterministic instance ids.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// What the deadline covers.
    pub description: &'static str,
    /// Stage this deadline is associated with.
    pub stage: ProcessStage,
    /// Mandatory legal requirement: while open, the stage cannot be
    /// advanced past.
    pub legal_requirement: bool,
    /// Alert priority.
    pub priority: Priority,
    /// Duration in administrative business days.
    pub business_days: Option<u32>,
    /// Duration in calendar days ("días corridos"). Takes precedence
    /// over `business_days` when both are set.
    pub calendar_days: Option<u32>,
    /// Statutory citation.
    pub legal_reference: Option<&'static str>,
}

/// The ordered, immutable list of deadline templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineCatalog {
    templates: Vec<DeadlineTemplate>,
}

impl DeadlineCatalog {
    /// Build a catalog from an explicit template list.
    ///
    /// Order is preserved; it decides tie-breaks when instances share
    /// an end date.
    pub fn new(templates: Vec<DeadlineTemplate>) -> Self {
        Self { templates }
    }

    /// The built-in Ley 21.643 catalog.
    pub fn ley_karin() -> Self {
        Self::new(vec![
            DeadlineTemplate {
                key: "subsanacion",
                name: "Subsanación de la denuncia",
                description: "Plazo para que la persona denunciante complete o corrija \
                              una denuncia incompleta.",
                stage: ProcessStage::Subsanation,
                legal_requirement: true,
                priority: Priority::High,
                business_days: Some(5),
                calendar_days: None,
                legal_reference: Some("Ley 21.643, art. 211-B Código del Trabajo"),
            },
            DeadlineTemplate {
                key: "medidas_resguardo",
                name: "Medidas de resguardo",
                description: "Adopción de medidas inmediatas de resguardo hacia la \
                              persona denunciante.",
                stage: ProcessStage::PrecautionaryMeasures,
                legal_requirement: true,
                priority: Priority::High,
                business_days: Some(3),
                calendar_days: None,
                legal_reference: Some("Ley 21.643, art. 211-B Código del Trabajo"),
            },
            DeadlineTemplate {
                key: "notificacion_dt",
                name: "Notificación a la Dirección del Trabajo",
                description: "Informar a la DT la recepción de la denuncia.",
                stage: ProcessStage::DtNotification,
                legal_requirement: true,
                priority: Priority::High,
                business_days: Some(3),
                calendar_days: None,
                legal_reference: Some("Ley 21.643, art. 211-C Código del Trabajo"),
            },
            DeadlineTemplate {
                key: "investigacion",
                name: "Investigación interna",
                description: "Desarrollo y cierre de la investigación interna.",
                stage: ProcessStage::Investigation,
                legal_requirement: true,
                priority: Priority::High,
                business_days: Some(30),
                calendar_days: None,
                legal_reference: Some("Ley 21.643, art. 211-C Código del Trabajo"),
            },
            DeadlineTemplate {
                key: "prorroga_investigacion",
                name: "Prórroga de la investigación",
                description: "Ventana adicional de investigación cuando la prórroga \
                              fue solicitada y concedida.",
                stage: ProcessStage::InvestigationExtension,
                legal_requirement: true,
                priority: Priority::Medium,
                business_days: Some(30),
                calendar_days: None,
                legal_reference: Some("Ley 21.643, art. 211-C Código del Trabajo"),
            },
            DeadlineTemplate {
                key: "informe_investigacion",
                name: "Elaboración del informe",
                description: "Redacción del informe de conclusiones de la investigación.",
                stage: ProcessStage::ReportCreation,
                legal_requirement: true,
                priority: Priority::Medium,
                business_days: Some(2),
                calendar_days: None,
                legal_reference: None,
            },
            DeadlineTemplate {
                key: "remision_dt",
                name: "Remisión del informe a la DT",
                description: "Envío del informe y sus conclusiones a la Dirección \
                              del Trabajo.",
                stage: ProcessStage::DtSubmission,
                legal_requirement: true,
                priority: Priority::High,
                business_days: Some(2),
                calendar_days: None,
                legal_reference: Some("Ley 21.643, art. 211-C Código del Trabajo"),
            },
            DeadlineTemplate {
                key: "adopcion_medidas",
                name: "Adopción de medidas",
                description: "Implementación de las medidas y sanciones que \
                              correspondan tras el pronunciamiento.",
                stage: ProcessStage::MeasuresAdoption,
                legal_requirement: true,
                priority: Priority::High,
                business_days: None,
                calendar_days: Some(15),
                legal_reference: Some("Ley 21.643, art. 211-C Código del Trabajo (corridos)"),
            },
            DeadlineTemplate {
                key: "sanciones",
                name: "Aplicación de sanciones",
                description: "Aplicación de las sanciones internas determinadas.",
                stage: ProcessStage::Sanctions,
                legal_requirement: false,
                priority: Priority::Medium,
                business_days: Some(15),
                calendar_days: None,
                legal_reference: None,
            },
        ])
    }

    /// Iterate the templates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &DeadlineTemplate> {
        self.templates.iter()
    }

    /// Look up a template by key.
    pub fn get(&self, key: &str) -> Option<&DeadlineTemplate> {
        self.templates.iter().find(|t| t.key == key)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for DeadlineCatalog {
    fn default() -> Self {
        Self::ley_karin()
    }
}
