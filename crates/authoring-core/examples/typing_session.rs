//! Scripted typing session against a toy host.
//!
//! Run with `RUST_LOG=authoring_core=debug cargo run --example typing_session`.

use authoring_core::{
    AuthoringEngine, DebugConfig, EditDelta, EditOrigin, EditorHost, EngineConfig, HostRequest,
    ManualScheduler, Replacement, Term, Timestamp, dispatch_all,
};
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct PrintingHost {
    text: Vec<char>,
    cursor: usize,
    echoes: Vec<(EditDelta, usize)>,
}

impl EditorHost for PrintingHost {
    fn apply_replacement(&mut self, replacement: Replacement) {
        println!(
            "  host: replace {}..{} with {:?}",
            replacement.from, replacement.to, replacement.insert_text
        );
        self.text
            .splice(replacement.from..replacement.to, replacement.insert_text.chars());
        self.cursor = replacement.new_cursor_pos;
        self.echoes
            .push((replacement.to_delta(), replacement.new_cursor_pos));
    }

    fn request_open_picker(&mut self, anchor: usize) {
        println!("  host: open picker at {anchor}");
    }

    fn request_close_picker(&mut self) {
        println!("  host: close picker");
    }
}

fn catalog() -> Vec<Term> {
    vec![
        Term::word("fracture", "ortho"),
        Term::word("fever", "general"),
        Term::word("cough", "general"),
        Term::template(
            "Discharge Summary",
            "discharge",
            "Discharge summary:\nDiagnosis:\nFollow-up:",
        ),
        Term::template("Consultation", "consult", "Consultation note:"),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = EngineConfig {
        debug: DebugConfig { enabled: true },
        ..EngineConfig::default()
    };
    let mut engine = AuthoringEngine::new(config, ManualScheduler::new())?;
    engine.on_index_ready(catalog(), Timestamp::ZERO);

    let mut host = PrintingHost::default();
    let mut now = 0u64;

    for ch in "Pt has fevr. template:disc".chars() {
        now += 40;
        let at = host.cursor;
        host.text.insert(at, ch);
        host.cursor += 1;
        let requests = engine.on_edit(
            EditDelta::insert(at, ch.to_string()),
            EditOrigin::Input,
            host.cursor,
            Timestamp::from_millis(now),
        )?;
        if !requests.is_empty() {
            println!("after {ch:?}: {requests:?}");
        }
        dispatch_all(requests, &mut host);
    }

    if let Some(picker) = engine.picker() {
        println!("picker filter {:?}:", picker.filter_text);
        for item in &picker.items {
            println!("  {:<20} {:?} score={}", item.term.text, item.class, item.score);
        }
    }

    let requests = engine.select(0, Timestamp::from_millis(now))?;
    for request in &requests {
        if let HostRequest::ApplyReplacement(replacement) = request {
            println!("selected: {:?}", replacement.insert_text);
        }
    }
    dispatch_all(requests, &mut host);
    for (delta, cursor) in std::mem::take(&mut host.echoes) {
        engine.on_edit(delta, EditOrigin::Input, cursor, Timestamp::from_millis(now))?;
    }

    now += 1_000;
    engine.advance_to(Timestamp::from_millis(now));

    println!("document:\n{}", host.text.iter().collect::<String>());
    for range in engine.diagnostics().iter() {
        println!("flagged {}..{} {:?}", range.from, range.to, range.word);
    }
    println!("{:#?}", engine.status());
    Ok(())
}
