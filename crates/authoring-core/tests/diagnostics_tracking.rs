use authoring_core::{
    AuthoringEngine, DiagnosticRange, EditDelta, EditOrigin, EngineConfig, ManualScheduler,
    ReflowConfig, Term, Timestamp, TrackerPhase,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn dictionary() -> Vec<Term> {
    ["patient", "has", "a", "fever", "and", "cough", "no", "rash"]
        .into_iter()
        .map(|w| Term::word(w, "general"))
        .collect()
}

fn ms(millis: u64) -> Timestamp {
    Timestamp::from_millis(millis)
}

fn ready_engine(text: &str) -> AuthoringEngine<ManualScheduler> {
    let mut engine =
        AuthoringEngine::new(EngineConfig::default(), ManualScheduler::new()).unwrap();
    engine.on_index_ready(dictionary(), ms(0));
    engine.load_document(text, ms(0));
    engine.advance_to(ms(300));
    engine
}

#[test]
fn test_initial_rescan_after_load() {
    let engine = ready_engine("Patient has a fevr and cogh.");
    assert_eq!(
        &*engine.diagnostics(),
        &[
            DiagnosticRange::new(14, 18, "fevr"),
            DiagnosticRange::new(23, 27, "cogh"),
        ]
    );
    assert_eq!(engine.status().rescans_completed, 1);
}

#[test]
fn test_edits_remap_synchronously_before_rescan() {
    let mut engine = ready_engine("Patient has a fevr and cogh.");

    // Delete "Patient " (8 chars): both ranges shift left immediately.
    engine
        .on_edit(EditDelta::delete(0, 8), EditOrigin::Input, 0, ms(400))
        .unwrap();
    assert_eq!(
        &*engine.diagnostics(),
        &[
            DiagnosticRange::new(6, 10, "fevr"),
            DiagnosticRange::new(15, 19, "cogh"),
        ]
    );
    assert!(matches!(
        engine.status().tracker_phase,
        TrackerPhase::PendingRescan { .. }
    ));

    // Fix "fevr" by replacing its last two letters: the straddled range is dropped right away.
    engine
        .on_edit(EditDelta::new(8, 10, "ver"), EditOrigin::Input, 11, ms(450))
        .unwrap();
    assert_eq!(
        &*engine.diagnostics(),
        &[DiagnosticRange::new(16, 20, "cogh")]
    );
    assert_eq!(engine.document().text(), "has a fever and cogh.");
}

#[test]
fn test_rapid_typing_coalesces_into_one_rescan() {
    let mut engine = ready_engine("");
    let mut cursor = 0;
    for (i, ch) in "fevr rash".chars().enumerate() {
        let now = ms(1_000 + i as u64 * 100);
        engine
            .on_edit(
                EditDelta::insert(cursor, ch.to_string()),
                EditOrigin::Input,
                cursor + 1,
                now,
            )
            .unwrap();
        cursor += 1;
    }
    // Last keystroke at 1_800; nothing fires before 2_100.
    assert_eq!(engine.advance_to(ms(2_099)), 0);
    assert!(engine.diagnostics().is_empty());
    assert_eq!(engine.scheduler().pending_count(), 1);

    assert_eq!(engine.advance_to(ms(2_100)), 1);
    assert_eq!(&*engine.diagnostics(), &[DiagnosticRange::new(0, 4, "fevr")]);
    assert_eq!(engine.status().rescans_completed, 2);
}

#[test]
fn test_cursor_moves_leave_ranges_and_timers_alone() {
    let mut engine = ready_engine("a fevr");
    let before = engine.diagnostics();
    engine.on_cursor_move(3, ms(500)).unwrap();
    engine.on_cursor_move(6, ms(510)).unwrap();
    assert!(Arc::ptr_eq(&before, &engine.diagnostics()));
    assert_eq!(engine.status().tracker_phase, TrackerPhase::Idle);
}

#[test]
fn test_reflow_edits_remap_without_restarting_debounce() {
    let config = EngineConfig {
        reflow: ReflowConfig {
            enabled: true,
            max_width: 12,
            tab_width: 4,
        },
        ..EngineConfig::default()
    };
    let mut engine = AuthoringEngine::new(config, ManualScheduler::new()).unwrap();
    engine.on_index_ready(dictionary(), ms(0));
    engine.load_document("patient has fevr and no rash", ms(0));
    engine.advance_to(ms(300));
    let flagged = engine.diagnostics();
    assert_eq!(&*flagged, &[DiagnosticRange::new(12, 16, "fevr")]);

    let breaks = engine.plan_reflow();
    assert!(!breaks.is_empty());
    for delta in breaks {
        engine
            .on_edit(delta, EditOrigin::Programmatic, 0, ms(1_000))
            .unwrap();
    }
    assert_eq!(engine.document().text(), "patient has\nfevr and no\nrash");
    assert_eq!(engine.status().tracker_phase, TrackerPhase::Idle);
    assert_eq!(engine.scheduler().pending_count(), 0);
    assert_eq!(&*engine.diagnostics(), &*flagged);
}

#[test]
fn test_custom_predicate_overrides_index() {
    let mut engine = ready_engine("fevr rash");
    assert_eq!(engine.diagnostics().len(), 1);

    engine.set_spell_predicate(Arc::new(|word: &str| word.len() > 3), ms(500));
    engine.advance_to(ms(800));
    assert!(engine.diagnostics().is_empty());
}

#[test]
fn test_predicate_arrival_ends_cold_start() {
    let mut engine =
        AuthoringEngine::new(EngineConfig::default(), ManualScheduler::new()).unwrap();
    engine.load_document("fevr", ms(0));
    engine
        .on_edit(EditDelta::insert(4, " x"), EditOrigin::Input, 6, ms(10))
        .unwrap();
    assert_eq!(engine.advance_to(ms(5_000)), 0);
    assert!(engine.diagnostics().is_empty());

    engine.on_index_ready(dictionary(), ms(5_000));
    assert_eq!(engine.advance_to(ms(5_300)), 1);
    assert_eq!(
        &*engine.diagnostics(),
        &[
            DiagnosticRange::new(0, 4, "fevr"),
            DiagnosticRange::new(5, 6, "x"),
        ]
    );
}
