//! # Deadline Engine
//!
//! Orchestration over the catalog, calendar, and stage flow: computes
//! the applicable deadline instances for a case, applies completion and
//! extension transitions, and derives progress, critical alerts, and
//! the executive summary.
//!
//! Every operation is pure over immutable inputs: mutating operations
//! return a new instance collection for the caller to persist, and the
//! evaluation time is always an explicit `now` parameter.

use chrono::NaiveDate;

use karin_core::{CaseContext, DeadlineId, ProcessStage};

use crate::calendar::{CalendarType, HolidayCalendar};
use crate::catalog::{DeadlineCatalog, DeadlineTemplate, Priority};
use crate::error::EngineError;
use crate::instance::{CompletionRecord, DeadlineInstance, DeadlineStatus, ExtensionRecord};
use crate::report::{AlertKind, ComplianceLevel, CriticalAlert, ExecutiveSummary};

/// Subsanation window: administrative business days granted to correct
/// an incomplete complaint before the investigation clock starts.
const SUBSANATION_WINDOW_DAYS: u32 = 5;

/// Standard investigation window in administrative business days.
const INVESTIGATION_WINDOW_DAYS: u32 = 30;

/// Investigation window when an extension was requested.
const EXTENDED_INVESTIGATION_WINDOW_DAYS: u32 = 60;

/// Authority-response window after the investigation closes: 2 business
/// days to submit the report plus 30 for the Dirección del Trabajo to
/// rule. Fixed offset; an earlier actual response does not shorten it.
const AUTHORITY_RESPONSE_WINDOW_DAYS: u32 = 32;

/// Weight of the stage position in the progress score.
const STAGE_PROGRESS_WEIGHT: f64 = 70.0;

/// Weight of the completed-deadline fraction in the progress score.
const COMPLETION_PROGRESS_WEIGHT: f64 = 30.0;

/// The Ley Karin deadline engine.
///
/// Holds the immutable template catalog and working-day calendar. All
/// methods are side-effect-free; the engine never initiates writes.
#[derive(Debug, Clone)]
pub struct DeadlineEngine {
    catalog: DeadlineCatalog,
    calendar: HolidayCalendar,
}

impl DeadlineEngine {
    /// Build an engine over a custom catalog and calendar.
    pub fn new(catalog: DeadlineCatalog, calendar: HolidayCalendar) -> Self {
        Self { catalog, calendar }
    }

    /// The default engine: built-in Ley 21.643 catalog over the Chilean
    /// holiday calendar.
    pub fn ley_karin() -> Self {
        Self::new(DeadlineCatalog::ley_karin(), HolidayCalendar::chilean())
    }

    /// The template catalog this engine instantiates from.
    pub fn catalog(&self) -> &DeadlineCatalog {
        &self.catalog
    }

    /// The working-day calendar this engine computes with.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Compute the applicable deadline instances for a case.
    ///
    /// Templates whose stage the case circumstances exclude are never
    /// instantiated. The result is sorted ascending by end date, with
    /// catalog order breaking ties, and carries status snapshots as of
    /// `now`.
    pub fn compute_deadlines(&self, ctx: &CaseContext, now: NaiveDate) -> Vec<DeadlineInstance> {
        let mut instances: Vec<DeadlineInstance> = self
            .catalog
            .iter()
            .filter(|template| ctx.stage_applies(template.stage))
            .map(|template| self.instantiate(template, ctx, now))
            .collect();

        instances.sort_by_key(|i| i.end_date);
        tracing::debug!(
            case_id = %ctx.case_id,
            count = instances.len(),
            "computed deadline instances"
        );
        instances
    }

    /// Materialize one template for the case.
    fn instantiate(
        &self,
        template: &DeadlineTemplate,
        ctx: &CaseContext,
        now: NaiveDate,
    ) -> DeadlineInstance {
        let start_date = self.start_date_for(template.stage, ctx);
        let end_date = match (template.calendar_days, template.business_days) {
            // Calendar days take precedence when both are set.
            (Some(days), _) => self.calendar.add_calendar_days(start_date, days),
            (None, Some(days)) => {
                self.calendar
                    .add_business_days(start_date, days, CalendarType::Administrative)
            }
            (None, None) => {
                tracing::warn!(key = template.key, "template has no duration");
                start_date
            }
        };

        DeadlineInstance {
            id: DeadlineId::for_case(&ctx.case_id, template.key),
            template_key: template.key.to_string(),
            name: template.name.to_string(),
            description: template.description.to_string(),
            stage: template.stage,
            priority: template.priority,
            legal_requirement: template.legal_requirement,
            start_date,
            end_date,
            status: DeadlineStatus::Active,
            days_remaining: 0,
            extension: None,
            completion: None,
        }
        .refreshed(now)
    }

    /// Start date for a deadline by stage-specific rule.
    ///
    /// Reception-anchored stages start at the reception date; the
    /// investigation chain is anchored on the investigation start,
    /// which itself shifts by the subsanation window when subsanation
    /// applies. Unlisted stages default to the reception date.
    fn start_date_for(&self, stage: ProcessStage, ctx: &CaseContext) -> NaiveDate {
        let reception = ctx.reception_date;
        match stage {
            ProcessStage::Subsanation
            | ProcessStage::PrecautionaryMeasures
            | ProcessStage::DtNotification => reception,
            ProcessStage::Investigation => self.investigation_start(ctx),
            ProcessStage::InvestigationExtension => self.calendar.add_business_days(
                self.investigation_start(ctx),
                INVESTIGATION_WINDOW_DAYS,
                CalendarType::Administrative,
            ),
            ProcessStage::DtSubmission => self.dt_submission_start(ctx),
            ProcessStage::MeasuresAdoption => self.calendar.add_business_days(
                self.dt_submission_start(ctx),
                AUTHORITY_RESPONSE_WINDOW_DAYS,
                CalendarType::Administrative,
            ),
            _ => reception,
        }
    }

    /// Investigation start: reception date, shifted by the subsanation
    /// window when the complaint requires correction.
    fn investigation_start(&self, ctx: &CaseContext) -> NaiveDate {
        if ctx.circumstances.requires_subsanation {
            self.calendar.add_business_days(
                ctx.reception_date,
                SUBSANATION_WINDOW_DAYS,
                CalendarType::Administrative,
            )
        } else {
            ctx.reception_date
        }
    }

    /// DT-submission start: investigation start plus the (possibly
    /// extended) investigation window.
    fn dt_submission_start(&self, ctx: &CaseContext) -> NaiveDate {
        let window = if ctx.circumstances.extension_requested {
            EXTENDED_INVESTIGATION_WINDOW_DAYS
        } else {
            INVESTIGATION_WINDOW_DAYS
        };
        self.calendar.add_business_days(
            self.investigation_start(ctx),
            window,
            CalendarType::Administrative,
        )
    }

    /// Mark a deadline completed, recording completer and date.
    ///
    /// Pure: returns a new collection, the input is untouched.
    /// Idempotent: completing an already-completed deadline is a no-op
    /// that preserves the original completion record.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DeadlineNotFound`] for an unknown id.
    pub fn complete_deadline(
        &self,
        instances: &[DeadlineInstance],
        id: &DeadlineId,
        completed_by: &str,
        now: NaiveDate,
    ) -> Result<Vec<DeadlineInstance>, EngineError> {
        if !instances.iter().any(|i| &i.id == id) {
            return Err(EngineError::DeadlineNotFound(id.clone()));
        }
        Ok(instances
            .iter()
            .map(|instance| {
                if &instance.id == id && instance.completion.is_none() {
                    let mut completed = instance.clone();
                    completed.completion = Some(CompletionRecord {
                        completed_at: now,
                        completed_by: completed_by.to_string(),
                    });
                    completed.refreshed(now)
                } else {
                    instance.refreshed(now)
                }
            })
            .collect())
    }

    /// Extend a deadline by `extra_days` calendar days.
    ///
    /// The original end date is preserved on the first extension only;
    /// repeated extensions accumulate `extended_by_days` and keep the
    /// first recorded original. The result is re-sorted since the end
    /// date moved.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidExtensionDays`] when `extra_days <= 0`;
    /// - [`EngineError::MissingExtensionReason`] when `reason` is blank;
    /// - [`EngineError::DeadlineNotFound`] for an unknown id.
    ///
    /// On any error the input collection is unchanged (nothing is
    /// returned to persist).
    pub fn extend_deadline(
        &self,
        instances: &[DeadlineInstance],
        id: &DeadlineId,
        extra_days: i64,
        reason: &str,
        extended_by: &str,
        now: NaiveDate,
    ) -> Result<Vec<DeadlineInstance>, EngineError> {
        if extra_days <= 0 {
            return Err(EngineError::InvalidExtensionDays(extra_days));
        }
        if reason.trim().is_empty() {
            return Err(EngineError::MissingExtensionReason);
        }
        if !instances.iter().any(|i| &i.id == id) {
            return Err(EngineError::DeadlineNotFound(id.clone()));
        }
        let extra = extra_days as u32;

        let mut extended: Vec<DeadlineInstance> = instances
            .iter()
            .map(|instance| {
                if &instance.id != id {
                    return instance.refreshed(now);
                }
                let mut updated = instance.clone();
                let previous_end = updated.end_date;
                updated.end_date = self.calendar.add_calendar_days(previous_end, extra);
                updated.extension = Some(match &instance.extension {
                    Some(existing) => ExtensionRecord {
                        original_end_date: existing.original_end_date,
                        reason: reason.to_string(),
                        extended_by_days: existing.extended_by_days + extra,
                        extended_by: extended_by.to_string(),
                    },
                    None => ExtensionRecord {
                        original_end_date: previous_end,
                        reason: reason.to_string(),
                        extended_by_days: extra,
                        extended_by: extended_by.to_string(),
                    },
                });
                updated.refreshed(now)
            })
            .collect();

        extended.sort_by_key(|i| i.end_date);
        Ok(extended)
    }

    /// Weighted progress score in 0..=100.
    ///
    /// 70% from the current stage's ordinal position among all stages,
    /// 30% from the fraction of completed instances, rounded to the
    /// nearest integer. An empty instance list contributes zero to the
    /// completion term.
    pub fn progress(&self, current_stage: ProcessStage, instances: &[DeadlineInstance]) -> u8 {
        let stage_fraction = f64::from(current_stage.ordinal()) / f64::from(ProcessStage::total());
        let completion_fraction = if instances.is_empty() {
            0.0
        } else {
            let completed = instances.iter().filter(|i| i.completion.is_some()).count();
            completed as f64 / instances.len() as f64
        };
        let score = STAGE_PROGRESS_WEIGHT * stage_fraction
            + COMPLETION_PROGRESS_WEIGHT * completion_fraction;
        score.round() as u8
    }

    /// Extract the prioritized critical alerts from an instance set.
    ///
    /// Overdue legal-requirement instances raise overdue alerts;
    /// high-priority instances in the warning window raise warning
    /// alerts. Overdue alerts come first; relative order within each
    /// class follows the input order.
    pub fn critical_alerts(
        &self,
        instances: &[DeadlineInstance],
        now: NaiveDate,
    ) -> Vec<CriticalAlert> {
        let mut alerts: Vec<CriticalAlert> = instances
            .iter()
            .filter(|i| i.legal_requirement && i.status_at(now) == DeadlineStatus::Overdue)
            .map(|i| {
                let days_over = (now - i.end_date).num_days();
                CriticalAlert {
                    kind: AlertKind::Overdue,
                    deadline_id: i.id.clone(),
                    deadline_name: i.name.clone(),
                    stage: i.stage,
                    days: days_over,
                    message: format!(
                        "Plazo legal vencido: {} ({} día(s) de atraso)",
                        i.name, days_over
                    ),
                }
            })
            .collect();

        alerts.extend(
            instances
                .iter()
                .filter(|i| {
                    i.priority == Priority::High && i.status_at(now) == DeadlineStatus::Warning
                })
                .map(|i| {
                    let days_left = i.days_remaining_at(now);
                    CriticalAlert {
                        kind: AlertKind::Warning,
                        deadline_id: i.id.clone(),
                        deadline_name: i.name.clone(),
                        stage: i.stage,
                        days: days_left,
                        message: format!(
                            "Plazo próximo a vencer: {} ({} día(s) restantes)",
                            i.name, days_left
                        ),
                    }
                }),
        );

        alerts
    }

    /// Aggregate the executive summary for a case.
    pub fn executive_summary(
        &self,
        ctx: &CaseContext,
        instances: &[DeadlineInstance],
        now: NaiveDate,
    ) -> ExecutiveSummary {
        let mut sorted: Vec<DeadlineInstance> =
            instances.iter().map(|i| i.refreshed(now)).collect();
        sorted.sort_by_key(|i| i.end_date);

        let next_active = sorted
            .iter()
            .find(|i| i.status == DeadlineStatus::Active)
            .cloned();
        let alerts = self.critical_alerts(&sorted, now);
        let compliance = if alerts.iter().any(|a| a.kind == AlertKind::Overdue) {
            ComplianceLevel::NonCompliant
        } else if alerts.iter().any(|a| a.kind == AlertKind::Warning) {
            ComplianceLevel::AtRisk
        } else {
            ComplianceLevel::Compliant
        };

        ExecutiveSummary {
            current_stage: ctx.current_stage.display_name().to_string(),
            progress: self.progress(ctx.current_stage, &sorted),
            next_deadline_id: next_active.as_ref().map(|i| i.id.clone()),
            next_deadline_name: next_active.map(|i| i.name),
            alert_count: alerts.len(),
            estimated_completion: sorted.last().map(|i| i.end_date),
            compliance,
        }
    }
}

impl Default for DeadlineEngine {
    fn default() -> Self {
        Self::ley_karin()
    }
}
