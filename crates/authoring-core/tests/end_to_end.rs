use authoring_core::{
    AuthoringEngine, EditDelta, EditOrigin, EditorHost, EngineConfig, HostRequest,
    ManualScheduler, Replacement, Term, Timestamp, dispatch_all,
};
use pretty_assertions::assert_eq;

/// Minimal widget stand-in: owns the text, applies replacements, and queues the resulting
/// deltas so the test can report them back to the engine.
#[derive(Default)]
struct RecordingHost {
    text: Vec<char>,
    cursor: usize,
    picker_anchor: Option<usize>,
    opened: usize,
    closed: usize,
    pending: Vec<(EditDelta, usize)>,
}

impl RecordingHost {
    fn text(&self) -> String {
        self.text.iter().collect()
    }
}

impl EditorHost for RecordingHost {
    fn apply_replacement(&mut self, replacement: Replacement) {
        self.text.splice(
            replacement.from..replacement.to,
            replacement.insert_text.chars(),
        );
        self.cursor = replacement.new_cursor_pos;
        self.pending
            .push((replacement.to_delta(), replacement.new_cursor_pos));
    }

    fn request_open_picker(&mut self, anchor: usize) {
        self.picker_anchor = Some(anchor);
        self.opened += 1;
    }

    fn request_close_picker(&mut self) {
        self.picker_anchor = None;
        self.closed += 1;
    }
}

struct Session {
    engine: AuthoringEngine<ManualScheduler>,
    host: RecordingHost,
    now: u64,
}

impl Session {
    fn new(terms: Vec<Term>) -> Self {
        let mut engine =
            AuthoringEngine::new(EngineConfig::default(), ManualScheduler::new()).unwrap();
        engine.on_index_ready(terms, Timestamp::ZERO);
        Self {
            engine,
            host: RecordingHost::default(),
            now: 0,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.now)
    }

    fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.now += 20;
            let at = self.host.cursor;
            self.host.text.insert(at, ch);
            self.host.cursor += 1;
            let requests = self
                .engine
                .on_edit(
                    EditDelta::insert(at, ch.to_string()),
                    EditOrigin::Input,
                    self.host.cursor,
                    self.now(),
                )
                .unwrap();
            dispatch_all(requests, &mut self.host);
        }
    }

    fn feed_back(&mut self) {
        for (delta, cursor) in std::mem::take(&mut self.host.pending) {
            let requests = self
                .engine
                .on_edit(delta, EditOrigin::Input, cursor, self.now())
                .unwrap();
            dispatch_all(requests, &mut self.host);
        }
    }
}

const BODY: &str = "Discharge summary:\nFollow-up template:";

fn catalog() -> Vec<Term> {
    vec![
        Term::word("Findings", "section"),
        Term::template("Discharge Summary", "discharge", BODY),
        Term::template("Consultation", "consult", "Consultation note:"),
        Term::template("Referral (X-ray)", "referral", "Referral for X-ray of"),
    ]
}

#[test]
fn test_template_flow_from_marker_to_insertion() {
    let mut session = Session::new(catalog());

    session.type_text("Findings: ");
    assert_eq!(session.host.opened, 0);

    session.type_text("template:");
    assert_eq!(session.host.picker_anchor, Some(10));
    assert_eq!(session.host.opened, 1);

    session.type_text("disc");
    // Filtering an open picker does not reopen it.
    assert_eq!(session.host.opened, 1);

    let picker = session.engine.picker().unwrap();
    assert_eq!(picker.trigger_pos, 10);
    assert_eq!(picker.filter_text, "disc");
    assert!(picker.items.len() <= 5);
    assert_eq!(picker.items[0].term.text, "Discharge Summary");

    let requests = session.engine.select(0, session.now()).unwrap();
    let expected = Replacement {
        from: 10,
        to: 23,
        insert_text: BODY.to_string(),
        new_cursor_pos: 10 + BODY.chars().count(),
    };
    assert_eq!(
        requests,
        vec![
            HostRequest::ClosePicker,
            HostRequest::ApplyReplacement(expected.clone()),
        ]
    );
    dispatch_all(requests, &mut session.host);
    assert_eq!(session.host.text(), format!("Findings: {BODY}"));
    assert_eq!(session.host.cursor, expected.new_cursor_pos);

    // The inserted body ends with the marker, but the selection just happened.
    session.now += 100;
    session.feed_back();
    assert_eq!(session.host.picker_anchor, None);
    assert!(session.engine.picker().is_none());
    assert_eq!(session.engine.document().text(), session.host.text());

    // Once the cooldown has passed the residual marker is a legitimate trigger again.
    session.now += 500;
    let requests = session
        .engine
        .on_cursor_move(session.host.cursor, session.now())
        .unwrap();
    assert_eq!(
        requests,
        vec![HostRequest::OpenPicker {
            anchor: expected.new_cursor_pos - "template:".len(),
        }]
    );
}

#[test]
fn test_inline_completion_replaces_fragment() {
    let mut session = Session::new(vec![
        Term::word("fracture", "ortho"),
        Term::word("fragment", "ortho"),
        Term::template("Fracture clinic", "ortho", "Fracture clinic referral"),
    ]);

    session.type_text("Distal fr");
    let items = session.engine.inline_completions();
    assert!(items.iter().all(|r| r.term.is_word()));
    assert_eq!(items.len(), 2);

    session.type_text("ac");
    let items = session.engine.inline_completions();
    assert_eq!(items[0].term.text, "fracture");

    let requests = session.engine.accept_inline(&items[0].term).unwrap();
    dispatch_all(requests, &mut session.host);
    session.feed_back();
    assert_eq!(session.host.text(), "Distal fracture");
    assert_eq!(session.engine.document().cursor(), 15);
}

#[test]
fn test_inline_completion_needs_minimum_prefix() {
    let mut session = Session::new(vec![Term::word("fracture", "ortho")]);
    session.type_text("a f");
    assert!(session.engine.inline_completions().is_empty());
}

#[test]
fn test_bare_marker_lists_catalog_in_order() {
    let mut session = Session::new(catalog());
    session.type_text("template:");
    let picker = session.engine.picker().unwrap();
    assert_eq!(picker.filter_text, "");
    let names: Vec<&str> = picker.items.iter().map(|r| r.term.text.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Findings",
            "Discharge Summary",
            "Consultation",
            "Referral (X-ray)",
        ]
    );
}
