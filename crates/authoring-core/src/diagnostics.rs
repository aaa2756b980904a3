//! Misspelling range tracking.
//!
//! The tracker keeps the set of flagged word ranges correct while the document changes:
//!
//! - **Remap** runs synchronously on every accepted delta, before anything else. Ranges after the
//!   edit are shifted, ranges inside the removed span are dropped, and ranges that straddle the
//!   edit are dropped as well so the partially edited word is re-validated rather than guessed.
//! - **Rescan** recomputes the whole set from the current text. It is debounced: each user-input
//!   delta restarts a trailing timer, and only the last timer in a burst runs a rescan.
//!   Programmatic deltas (formatting, reflow) are remapped but never restart the timer.
//!
//! The set is published as an `Arc<[DiagnosticRange]>`. A rescan builds the new set off to the
//! side and swaps it in, so consumers never observe a transiently empty or half-built set.

use crate::config::DiagnosticsConfig;
use crate::delta::{EditDelta, EditOrigin};
use crate::error::ConfigError;
use crate::scheduler::{Scheduler, TimerId, Timestamp};
use crate::spell::SpellPredicate;
use crate::tokenize::WordTokenizer;
use std::sync::Arc;
use std::time::Duration;

/// A flagged word occurrence, in character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiagnosticRange {
    /// Start offset (inclusive).
    pub from: usize,
    /// End offset (exclusive).
    pub to: usize,
    /// The flagged word as it appeared when scanned.
    pub word: String,
}

impl DiagnosticRange {
    /// Create a range.
    pub fn new(from: usize, to: usize, word: impl Into<String>) -> Self {
        Self {
            from,
            to,
            word: word.into(),
        }
    }

    /// Map this range through `delta`. Returns `None` if the range must be dropped.
    pub fn remap(&self, delta: &EditDelta) -> Option<Self> {
        if self.to <= delta.from {
            return Some(self.clone());
        }
        if self.from >= delta.to {
            let shift = delta.shift();
            return Some(Self {
                from: shift_offset(self.from, shift),
                to: shift_offset(self.to, shift),
                word: self.word.clone(),
            });
        }
        // Fully inside the removed span, or straddling it.
        None
    }
}

fn shift_offset(offset: usize, shift: isize) -> usize {
    (offset as isize).saturating_add(shift).max(0) as usize
}

/// Where the tracker is in its debounce cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    /// Nothing scheduled.
    Idle,
    /// A trailing debounce timer is pending.
    PendingRescan {
        /// The pending timer.
        timer: TimerId,
    },
    /// A rescan was handed out and has not completed.
    Rescanning {
        /// Edit generation the rescan started from.
        generation: u64,
    },
}

/// Proof that a rescan started at a given edit generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RescanTicket {
    generation: u64,
}

impl RescanTicket {
    /// Edit generation the rescan started from.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Owns the flagged range set for one document session.
#[derive(Debug)]
pub struct DiagnosticTracker {
    ranges: Arc<[DiagnosticRange]>,
    phase: TrackerPhase,
    generation: u64,
    debounce: Duration,
    tokenizer: WordTokenizer,
    rescans_completed: u64,
    stale_rescans: u64,
    last_rescan_at: Option<Timestamp>,
}

impl DiagnosticTracker {
    /// Create an idle tracker with no ranges.
    pub fn new(config: &DiagnosticsConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            ranges: Arc::from(Vec::new()),
            phase: TrackerPhase::Idle,
            generation: 0,
            debounce: config.debounce(),
            tokenizer: WordTokenizer::new(config)?,
            rescans_completed: 0,
            stale_rescans: 0,
            last_rescan_at: None,
        })
    }

    /// Immutable snapshot of the current ranges, in document order.
    pub fn snapshot(&self) -> Arc<[DiagnosticRange]> {
        Arc::clone(&self.ranges)
    }

    /// Current phase.
    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    /// Number of accepted deltas so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of rescans whose result was installed.
    pub fn rescans_completed(&self) -> u64 {
        self.rescans_completed
    }

    /// Number of rescan results dropped because the document changed underneath them.
    pub fn stale_rescans(&self) -> u64 {
        self.stale_rescans
    }

    /// When the last installed rescan completed.
    pub fn last_rescan_at(&self) -> Option<Timestamp> {
        self.last_rescan_at
    }

    /// Remap every range through `delta`.
    pub fn remap(&mut self, delta: &EditDelta) {
        self.generation += 1;
        if self.ranges.is_empty() {
            return;
        }
        let remapped: Vec<DiagnosticRange> =
            self.ranges.iter().filter_map(|r| r.remap(delta)).collect();
        if remapped.len() != self.ranges.len() {
            tracing::trace!(
                dropped = self.ranges.len() - remapped.len(),
                "dropped ranges touched by edit"
            );
        }
        self.ranges = Arc::from(remapped);
    }

    /// Handle an accepted delta: remap, then restart the debounce if the origin calls for it.
    ///
    /// `spell_ready` is `false` while no spell predicate is available; no rescans are scheduled
    /// in that state.
    pub fn on_edit<S: Scheduler>(
        &mut self,
        delta: &EditDelta,
        origin: EditOrigin,
        spell_ready: bool,
        scheduler: &mut S,
        now: Timestamp,
    ) {
        self.remap(delta);
        if spell_ready && origin.restarts_debounce() {
            self.schedule_rescan(scheduler, now);
        }
    }

    /// Start (or restart) the trailing debounce timer.
    pub fn schedule_rescan<S: Scheduler>(&mut self, scheduler: &mut S, now: Timestamp) {
        if let TrackerPhase::PendingRescan { timer } = self.phase {
            scheduler.cancel(timer);
        }
        let timer = scheduler.schedule_after(self.debounce, now);
        self.phase = TrackerPhase::PendingRescan { timer };
    }

    /// Returns `true` if `timer` is the pending debounce timer, i.e. a rescan should run now.
    pub fn on_timer(&mut self, timer: TimerId) -> bool {
        matches!(self.phase, TrackerPhase::PendingRescan { timer: pending } if pending == timer)
    }

    /// Enter the rescanning phase for the current generation.
    ///
    /// A pending debounce timer is cancelled; the rescan supersedes it.
    pub fn begin_rescan<S: Scheduler>(&mut self, scheduler: &mut S) -> RescanTicket {
        if let TrackerPhase::PendingRescan { timer } = self.phase {
            scheduler.cancel(timer);
        }
        self.phase = TrackerPhase::Rescanning {
            generation: self.generation,
        };
        RescanTicket {
            generation: self.generation,
        }
    }

    /// Flag every word in `text` that `predicate` rejects.
    pub fn scan(&self, text: &str, predicate: &dyn SpellPredicate) -> Vec<DiagnosticRange> {
        self.tokenizer
            .words(text)
            .into_iter()
            .filter(|w| !predicate.check_word(w.word))
            .map(|w| DiagnosticRange::new(w.from, w.to, w.word))
            .collect()
    }

    /// Install a rescan result if no delta arrived since `ticket` was issued.
    ///
    /// Returns `false` (and keeps the remapped set) for a stale result.
    pub fn complete_rescan(
        &mut self,
        ticket: RescanTicket,
        ranges: Vec<DiagnosticRange>,
        now: Timestamp,
    ) -> bool {
        if ticket.generation != self.generation {
            self.stale_rescans += 1;
            if matches!(self.phase, TrackerPhase::Rescanning { .. }) {
                self.phase = TrackerPhase::Idle;
            }
            tracing::trace!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale rescan"
            );
            return false;
        }

        self.ranges = Arc::from(ranges);
        self.phase = TrackerPhase::Idle;
        self.rescans_completed += 1;
        self.last_rescan_at = Some(now);
        true
    }

    /// Rescan `text` synchronously and install the result.
    pub fn rescan_now<S: Scheduler>(
        &mut self,
        text: &str,
        predicate: &dyn SpellPredicate,
        scheduler: &mut S,
        now: Timestamp,
    ) {
        let ticket = self.begin_rescan(scheduler);
        let ranges = self.scan(text, predicate);
        self.complete_rescan(ticket, ranges, now);
    }

    /// Drop every range and any pending timer. Tickets issued before the reset become stale.
    pub fn reset<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let TrackerPhase::PendingRescan { timer } = self.phase {
            scheduler.cancel(timer);
        }
        self.generation += 1;
        self.phase = TrackerPhase::Idle;
        self.ranges = Arc::from(Vec::new());
    }
}
