//! # Legal-Process Flow Integration Tests
//!
//! End-to-end scenarios over the deadline engine and stage flow:
//! - Standard case: reception on a Tuesday, no optional stages
//! - Subsanation shifting the investigation clock
//! - Extension shifting the DT-submission window
//! - Direct-to-authority referral bypassing the investigation
//! - Full advancement from reception to closure, gated on mandatory
//!   deadline completion

use chrono::NaiveDate;
use karin_core::{CaseCircumstances, CaseContext, CaseId, ProcessStage, TenantId};
use karin_deadline::{can_advance, next_stage, DeadlineEngine, DeadlineInstance};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn context(circumstances: CaseCircumstances) -> CaseContext {
    CaseContext::new(
        CaseId::new("case-flow-1").unwrap(),
        TenantId::new("tenant-acme").unwrap(),
        // Tuesday.
        date(2024, 1, 2),
        circumstances,
    )
}

fn by_key<'a>(instances: &'a [DeadlineInstance], key: &str) -> &'a DeadlineInstance {
    instances
        .iter()
        .find(|i| i.template_key == key)
        .unwrap_or_else(|| panic!("missing instance {key}"))
}

// ---------------------------------------------------------------------------
// 1. Standard case scenario
// ---------------------------------------------------------------------------

#[test]
fn standard_case_anchors_investigation_on_reception() {
    let engine = DeadlineEngine::ley_karin();
    let ctx = context(CaseCircumstances::default());
    let instances = engine.compute_deadlines(&ctx, date(2024, 1, 2));

    // No subsanation offset: the investigation starts the day the
    // complaint was received.
    assert_eq!(by_key(&instances, "investigacion").start_date, date(2024, 1, 2));

    // DT submission opens 30 administrative business days later.
    assert_eq!(by_key(&instances, "remision_dt").start_date, date(2024, 2, 13));

    // No subsanation instance exists at all.
    assert!(instances.iter().all(|i| i.stage != ProcessStage::Subsanation));

    // Sorted ascending by end date.
    for window in instances.windows(2) {
        assert!(window[0].end_date <= window[1].end_date);
    }
}

// ---------------------------------------------------------------------------
// 2. Extension scenario
// ---------------------------------------------------------------------------

#[test]
fn extension_shifts_submission_window_to_sixty_days() {
    let engine = DeadlineEngine::ley_karin();
    let ctx = context(CaseCircumstances {
        extension_requested: true,
        ..Default::default()
    });
    let instances = engine.compute_deadlines(&ctx, date(2024, 1, 2));

    // The extension window opens where the standard window would close.
    let extension = by_key(&instances, "prorroga_investigacion");
    assert_eq!(extension.start_date, date(2024, 2, 13));
    assert_eq!(extension.stage, ProcessStage::InvestigationExtension);

    // DT submission shifts to investigation start + 60 business days.
    let submission = by_key(&instances, "remision_dt");
    let baseline = context(CaseCircumstances::default());
    let baseline_submission_start = engine
        .compute_deadlines(&baseline, date(2024, 1, 2))
        .iter()
        .find(|i| i.template_key == "remision_dt")
        .unwrap()
        .start_date;
    assert!(submission.start_date > baseline_submission_start);
}

// ---------------------------------------------------------------------------
// 3. Direct-to-authority scenario
// ---------------------------------------------------------------------------

#[test]
fn direct_referral_bypasses_internal_investigation() {
    let engine = DeadlineEngine::ley_karin();
    let ctx = context(CaseCircumstances {
        is_direct_to_authority: true,
        ..Default::default()
    });
    let instances = engine.compute_deadlines(&ctx, date(2024, 1, 2));

    assert!(instances.iter().all(|i| i.stage != ProcessStage::Investigation));

    // The flow jumps from DT notification straight past the (skipped)
    // investigation stages.
    assert_eq!(
        next_stage(ProcessStage::DtNotification, &ctx),
        Some(ProcessStage::ReportCreation)
    );
}

// ---------------------------------------------------------------------------
// 4. Full advancement scenario
// ---------------------------------------------------------------------------

#[test]
fn case_advances_to_closure_once_mandatory_deadlines_complete() {
    let engine = DeadlineEngine::ley_karin();
    let now = date(2024, 1, 2);
    let mut ctx = context(CaseCircumstances::default());
    let mut instances = engine.compute_deadlines(&ctx, now);

    let mut hops = 0;
    loop {
        // Complete every mandatory deadline of the current stage, then
        // advance.
        let blocking: Vec<_> = can_advance(ctx.current_stage, &instances).blocking;
        for id in blocking {
            instances = engine
                .complete_deadline(&instances, &id, "hr-manager", now)
                .unwrap();
        }
        let check = can_advance(ctx.current_stage, &instances);
        assert!(check.allowed, "stage {} still blocked", ctx.current_stage);

        match next_stage(ctx.current_stage, &ctx) {
            Some(next) => ctx = ctx.at_stage(next),
            None => break,
        }
        hops += 1;
        assert!(hops < 20, "flow did not terminate");
    }

    assert_eq!(ctx.current_stage, ProcessStage::FinalClosure);
    assert!(instances.iter().all(|i| !i.is_open() || !i.legal_requirement));
}

#[test]
fn open_mandatory_deadline_blocks_the_stage() {
    let engine = DeadlineEngine::ley_karin();
    let now = date(2024, 1, 2);
    let ctx = context(CaseCircumstances::default()).at_stage(ProcessStage::Investigation);
    let instances = engine.compute_deadlines(&ctx, now);

    let check = can_advance(ProcessStage::Investigation, &instances);
    assert!(!check.allowed);
    assert_eq!(check.blocking.len(), 1);
    assert_eq!(
        check.blocking[0].as_str(),
        "case-flow-1:investigacion"
    );
}
