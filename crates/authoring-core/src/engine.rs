//! The per-document engine session.
//!
//! [`AuthoringEngine`] wires the components together and is the only type a host has to talk to:
//!
//! ```text
//! host edit ──► on_edit ──► mirror.apply ──► tracker.on_edit (remap, debounce)
//!                                    └────► refresh_trigger ──► detector ──► ranker ──► picker
//! host timer ─► on_timer ──► rescan ──► tracker (atomic swap)
//! host pick ──► select ───► compute_replacement ──► HostRequest::ApplyReplacement
//! ```
//!
//! The engine never mutates the host's document. Everything it wants done is returned as
//! [`HostRequest`] values; the host applies them (see [`EditorHost`]) and reports the resulting
//! edit back through [`AuthoringEngine::on_edit`].

use crate::config::EngineConfig;
use crate::delta::{EditDelta, EditOrigin};
use crate::diagnostics::{DiagnosticRange, DiagnosticTracker, TrackerPhase};
use crate::document::DocumentMirror;
use crate::error::CoreError;
use crate::ranker::{QuerySequencer, QueryTicket, RankedCompletion, rank};
use crate::reflow::plan_reflow;
use crate::replace::{Replacement, compute_replacement, fragment_start};
use crate::scheduler::{ManualScheduler, Scheduler, TimerId, Timestamp};
use crate::spell::SpellPredicate;
use crate::terms::{Term, TermIndex};
use crate::trigger::{TriggerDetector, TriggerMatch};
use std::sync::Arc;

/// Something the engine asks the host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostRequest {
    /// Replace a span of the document and move the caret.
    ApplyReplacement(Replacement),
    /// Show the picker anchored at a character offset.
    OpenPicker {
        /// Offset of the trigger marker.
        anchor: usize,
    },
    /// Hide the picker.
    ClosePicker,
}

/// Host-side capability for applying [`HostRequest`]s.
pub trait EditorHost {
    /// Apply a replacement, then report it back via [`AuthoringEngine::on_edit`].
    fn apply_replacement(&mut self, replacement: Replacement);
    /// Show the picker. Pixel placement of `anchor` is the host's business.
    fn request_open_picker(&mut self, anchor: usize);
    /// Hide the picker.
    fn request_close_picker(&mut self);
}

impl HostRequest {
    /// Forward this request to `host`.
    pub fn dispatch<H: EditorHost + ?Sized>(self, host: &mut H) {
        match self {
            HostRequest::ApplyReplacement(replacement) => host.apply_replacement(replacement),
            HostRequest::OpenPicker { anchor } => host.request_open_picker(anchor),
            HostRequest::ClosePicker => host.request_close_picker(),
        }
    }
}

/// Forward every request to `host`, in order.
pub fn dispatch_all<H: EditorHost + ?Sized>(requests: Vec<HostRequest>, host: &mut H) {
    for request in requests {
        request.dispatch(host);
    }
}

/// A ranking job for the open picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Sequence number; results are applied only if it is still the latest.
    pub ticket: QueryTicket,
    /// Filter text.
    pub query: String,
    /// Maximum number of results.
    pub cap: usize,
}

/// The result of a [`CompletionRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionBatch {
    /// Ticket of the request this answers.
    pub ticket: QueryTicket,
    /// Ranked items.
    pub items: Vec<RankedCompletion>,
}

/// The open template picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerState {
    /// Offset of the trigger marker.
    pub trigger_pos: usize,
    /// Text between the marker and the caret.
    pub filter_text: String,
    /// Ranked items for `filter_text`.
    pub items: Vec<RankedCompletion>,
    /// Ticket of the ranking that produced `items` (`None` until the first result lands).
    pub ticket: Option<QueryTicket>,
}

/// Health report for diagnosing a session whose annotations stopped updating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineStatus {
    /// Whether the term index has been delivered.
    pub index_loaded: bool,
    /// Number of terms in the index.
    pub term_count: usize,
    /// Whether a spell predicate is available.
    pub spell_available: bool,
    /// Diagnostic tracker phase.
    pub tracker_phase: TrackerPhase,
    /// Bumped by every accepted delta and document load.
    pub edit_generation: u64,
    /// Number of flagged ranges.
    pub flagged_count: usize,
    /// Rescans whose result was installed.
    pub rescans_completed: u64,
    /// Completion time of the last installed rescan.
    pub last_rescan_at: Option<Timestamp>,
    /// Rescan results dropped as stale.
    pub stale_rescans: u64,
    /// Completion results dropped as stale.
    pub stale_results_dropped: u64,
    /// Deltas rejected as malformed.
    pub rejected_deltas: u64,
    /// Latest issued completion sequence number.
    pub latest_query_seq: u64,
    /// Whether the picker is open.
    pub picker_open: bool,
}

/// Incremental trigger, completion, and misspelling engine for one document.
pub struct AuthoringEngine<S: Scheduler> {
    config: EngineConfig,
    scheduler: S,
    document: DocumentMirror,
    detector: TriggerDetector,
    tracker: DiagnosticTracker,
    index: TermIndex,
    index_loaded: bool,
    custom_predicate: Option<Arc<dyn SpellPredicate>>,
    sequencer: QuerySequencer,
    picker: Option<PickerState>,
    rejected_deltas: u64,
}

impl<S: Scheduler> AuthoringEngine<S> {
    /// Create an engine for an empty document.
    ///
    /// Fails fast on invalid configuration.
    pub fn new(config: EngineConfig, scheduler: S) -> Result<Self, CoreError> {
        config.validate()?;
        let detector = TriggerDetector::new(&config.trigger)?;
        let tracker = DiagnosticTracker::new(&config.diagnostics)?;
        Ok(Self {
            config,
            scheduler,
            document: DocumentMirror::default(),
            detector,
            tracker,
            index: TermIndex::empty(),
            index_loaded: false,
            custom_predicate: None,
            sequencer: QuerySequencer::new(),
            picker: None,
            rejected_deltas: 0,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The injected scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the injected scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The engine's view of the document.
    pub fn document(&self) -> &DocumentMirror {
        &self.document
    }

    /// The term index (empty until [`on_index_ready`](Self::on_index_ready)).
    pub fn index(&self) -> &TermIndex {
        &self.index
    }

    /// Replace the whole document, e.g. when the host opens a report.
    ///
    /// Clears ranges and schedules a rescan if a predicate is available. An open picker is
    /// closed.
    pub fn load_document(&mut self, text: &str, now: Timestamp) -> Vec<HostRequest> {
        self.document = DocumentMirror::new(text);
        self.detector.reset();
        self.tracker.reset(&mut self.scheduler);
        if self.spell_ready() {
            self.tracker.schedule_rescan(&mut self.scheduler, now);
        }
        if self.debug_enabled() {
            tracing::debug!(chars = self.document.len_chars(), "document loaded");
        }
        match self.picker.take() {
            Some(_) => vec![HostRequest::ClosePicker],
            None => Vec::new(),
        }
    }

    /// Install the term index. May be called again on reload.
    pub fn on_index_ready(&mut self, terms: Vec<Term>, now: Timestamp) {
        self.index = TermIndex::new(terms);
        self.index_loaded = true;
        if self.debug_enabled() {
            tracing::debug!(terms = self.index.len(), "term index ready");
        }
        self.tracker.schedule_rescan(&mut self.scheduler, now);
        if let Some(request) = self.requery() {
            let batch = self.complete(&request);
            self.submit_completions(batch);
        }
    }

    /// Install a spell predicate that takes precedence over the term index.
    pub fn set_spell_predicate(&mut self, predicate: Arc<dyn SpellPredicate>, now: Timestamp) {
        self.custom_predicate = Some(predicate);
        self.tracker.schedule_rescan(&mut self.scheduler, now);
    }

    /// Whether rescans can run.
    pub fn spell_ready(&self) -> bool {
        self.custom_predicate.is_some() || self.index_loaded
    }

    /// Apply a host edit.
    ///
    /// A delta outside the current document, or a caret past the post-edit end, is rejected and
    /// nothing changes.
    pub fn on_edit(
        &mut self,
        delta: EditDelta,
        origin: EditOrigin,
        cursor: usize,
        now: Timestamp,
    ) -> Result<Vec<HostRequest>, CoreError> {
        if let Err(err) = delta.validate(self.document.len_chars()) {
            self.rejected_deltas += 1;
            tracing::warn!(error = %err, "rejecting malformed delta");
            return Err(err.into());
        }
        let len_after = self.document.len_chars() - delta.removed_len() + delta.inserted_len();
        if cursor > len_after {
            self.rejected_deltas += 1;
            tracing::warn!(cursor, len_after, "rejecting delta with out-of-bounds cursor");
            return Err(CoreError::CursorOutOfBounds {
                cursor,
                len: len_after,
            });
        }

        self.document.apply(&delta)?;
        self.document.set_cursor(cursor)?;

        let spell_ready = self.spell_ready();
        self.tracker
            .on_edit(&delta, origin, spell_ready, &mut self.scheduler, now);

        if self.debug_enabled() {
            tracing::debug!(
                from = delta.from,
                to = delta.to,
                inserted = delta.inserted_len(),
                ?origin,
                generation = self.tracker.generation(),
                "edit applied"
            );
        }

        Ok(self.refresh_trigger(now))
    }

    /// Caret moved without an edit. Ranges are untouched; only the trigger is re-evaluated.
    pub fn on_cursor_move(
        &mut self,
        cursor: usize,
        now: Timestamp,
    ) -> Result<Vec<HostRequest>, CoreError> {
        self.document.set_cursor(cursor)?;
        Ok(self.refresh_trigger(now))
    }

    /// Up to `n` characters immediately before the caret.
    pub fn text_before_cursor(&self, n: usize) -> String {
        self.document.text_before_cursor(n).1
    }

    /// A host timer fired. Returns `true` if it ran a rescan.
    pub fn on_timer(&mut self, timer: TimerId, now: Timestamp) -> bool {
        if !self.tracker.on_timer(timer) {
            return false;
        }
        self.run_rescan(now)
    }

    /// Rescan immediately, bypassing the debounce. Returns `false` without a predicate.
    pub fn rescan_now(&mut self, now: Timestamp) -> bool {
        self.run_rescan(now)
    }

    fn run_rescan(&mut self, now: Timestamp) -> bool {
        let predicate: &dyn SpellPredicate = match (&self.custom_predicate, self.index_loaded) {
            (Some(predicate), _) => predicate.as_ref(),
            (None, true) => &self.index,
            (None, false) => return false,
        };
        let text = self.document.text();
        self.tracker.rescan_now(&text, predicate, &mut self.scheduler, now);
        if self.config.debug.enabled {
            tracing::debug!(
                flagged = self.tracker.snapshot().len(),
                generation = self.tracker.generation(),
                "rescan complete"
            );
        }
        true
    }

    /// Immutable snapshot of the flagged ranges.
    pub fn diagnostics(&self) -> Arc<[DiagnosticRange]> {
        self.tracker.snapshot()
    }

    /// The open picker, if any.
    pub fn picker(&self) -> Option<&PickerState> {
        self.picker.as_ref()
    }

    fn refresh_trigger(&mut self, now: Timestamp) -> Vec<HostRequest> {
        let (base, window) = self
            .document
            .text_before_cursor(self.config.trigger.lookback_chars);

        match self.detector.scan_window(&window, base, now) {
            Some(found) => self.open_or_update_picker(found),
            None => match self.picker.take() {
                Some(_) => {
                    if self.debug_enabled() {
                        tracing::debug!("trigger mismatch; closing picker");
                    }
                    vec![HostRequest::ClosePicker]
                }
                None => Vec::new(),
            },
        }
    }

    fn open_or_update_picker(&mut self, found: TriggerMatch) -> Vec<HostRequest> {
        let previous = self.picker.take();
        let reopened = previous
            .as_ref()
            .is_none_or(|p| p.trigger_pos != found.trigger_pos);

        let (items, ticket) = match previous {
            Some(previous) if !reopened => (previous.items, previous.ticket),
            _ => (Vec::new(), None),
        };
        self.picker = Some(PickerState {
            trigger_pos: found.trigger_pos,
            filter_text: found.filter_text,
            items,
            ticket,
        });

        if let Some(request) = self.requery() {
            let batch = self.complete(&request);
            self.submit_completions(batch);
        }

        if reopened {
            if self.debug_enabled() {
                tracing::debug!(anchor = found.trigger_pos, "opening picker");
            }
            vec![HostRequest::OpenPicker {
                anchor: found.trigger_pos,
            }]
        } else {
            Vec::new()
        }
    }

    /// Issue a new ranking request for the open picker, superseding any in flight.
    pub fn requery(&mut self) -> Option<CompletionRequest> {
        let query = self.picker.as_ref()?.filter_text.clone();
        Some(CompletionRequest {
            ticket: self.sequencer.issue(),
            query,
            cap: self.config.completion.trigger_cap,
        })
    }

    /// Rank the index for `request`. Pure; safe to run anywhere the index is shared.
    pub fn complete(&self, request: &CompletionRequest) -> CompletionBatch {
        CompletionBatch {
            ticket: request.ticket,
            items: rank(&request.query, self.index.terms(), request.cap),
        }
    }

    /// Install a ranking result. Returns `false` if it is stale or the picker is closed.
    pub fn submit_completions(&mut self, batch: CompletionBatch) -> bool {
        if !self.sequencer.accept(batch.ticket) {
            return false;
        }
        match self.picker.as_mut() {
            Some(picker) => {
                picker.items = batch.items;
                picker.ticket = Some(batch.ticket);
                true
            }
            None => false,
        }
    }

    /// Choose picker item `index`: close the picker, suppress reopening, and replace the marker
    /// and filter with the chosen term.
    pub fn select(&mut self, index: usize, now: Timestamp) -> Result<Vec<HostRequest>, CoreError> {
        let picker = self
            .picker
            .as_ref()
            .ok_or(CoreError::NoSuchCompletion(index))?;
        let item = picker
            .items
            .get(index)
            .ok_or(CoreError::NoSuchCompletion(index))?;

        let replacement = compute_replacement(
            &self.document.text(),
            picker.trigger_pos,
            self.document.cursor(),
            &item.term,
        )?;

        if self.debug_enabled() {
            tracing::debug!(
                term = %item.term.text,
                from = replacement.from,
                to = replacement.to,
                "completion selected"
            );
        }

        self.detector.select(now);
        self.picker = None;
        Ok(vec![
            HostRequest::ClosePicker,
            HostRequest::ApplyReplacement(replacement),
        ])
    }

    /// Explicit cancel (escape). Suppresses reopening if the picker was open.
    pub fn dismiss(&mut self, now: Timestamp) -> Vec<HostRequest> {
        if self.picker.take().is_none() {
            return Vec::new();
        }
        self.detector.dismiss(now);
        vec![HostRequest::ClosePicker]
    }

    /// Inline word completions for the letter run before the caret.
    ///
    /// Empty while the picker is open or when the fragment is shorter than
    /// `completion.min_inline_prefix`.
    pub fn inline_completions(&self) -> Vec<RankedCompletion> {
        if self.picker.is_some() {
            return Vec::new();
        }
        let fragment = self.inline_fragment().1;
        if fragment.chars().count() < self.config.completion.min_inline_prefix {
            return Vec::new();
        }
        rank(&fragment, self.index.words(), self.config.completion.inline_cap)
    }

    /// Replace the letter run before the caret with `term`.
    pub fn accept_inline(&self, term: &Term) -> Result<Vec<HostRequest>, CoreError> {
        let (start, _) = self.inline_fragment();
        let replacement =
            compute_replacement(&self.document.text(), start, self.document.cursor(), term)?;
        Ok(vec![HostRequest::ApplyReplacement(replacement)])
    }

    fn inline_fragment(&self) -> (usize, String) {
        let (base, window) = self
            .document
            .text_before_cursor(self.config.trigger.lookback_chars);
        let start = fragment_start(&window);
        let fragment: String = window.chars().skip(start).collect();
        (base + start, fragment)
    }

    /// Line breaks the host should apply as programmatic edits. Empty when reflow is disabled.
    pub fn plan_reflow(&self) -> Vec<EditDelta> {
        plan_reflow(&self.document.text(), &self.config.reflow)
    }

    /// Health report.
    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            index_loaded: self.index_loaded,
            term_count: self.index.len(),
            spell_available: self.spell_ready(),
            tracker_phase: self.tracker.phase(),
            edit_generation: self.tracker.generation(),
            flagged_count: self.tracker.snapshot().len(),
            rescans_completed: self.tracker.rescans_completed(),
            last_rescan_at: self.tracker.last_rescan_at(),
            stale_rescans: self.tracker.stale_rescans(),
            stale_results_dropped: self.sequencer.dropped(),
            rejected_deltas: self.rejected_deltas,
            latest_query_seq: self.sequencer.latest(),
            picker_open: self.picker.is_some(),
        }
    }

    fn debug_enabled(&self) -> bool {
        self.config.debug.enabled
    }
}

impl AuthoringEngine<ManualScheduler> {
    /// Advance simulated time, firing every due timer. Returns the number of rescans run.
    pub fn advance_to(&mut self, now: Timestamp) -> usize {
        let due = self.scheduler.take_due(now);
        due.into_iter()
            .filter(|timer| self.on_timer(*timer, now))
            .count()
    }
}
