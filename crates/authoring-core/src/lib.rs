#![warn(missing_docs)]
//! Authoring Core - Headless Annotation and Completion Engine for Report Editors
//!
//! # Overview
//!
//! `authoring-core` re-derives three kinds of editor annotations from a continuously changing
//! text buffer, incrementally:
//!
//! - **Trigger detection**: a marker such as `template:` before the caret opens a filtered
//!   template picker.
//! - **Misspelling ranges**: flagged word ranges that stay positioned correctly across edits
//!   (remapped synchronously) and are recomputed after a debounce.
//! - **Ranked completions**: edit-distance ranking over a fixed term index.
//!
//! It owns no widget and never mutates the document. The host reports edits as
//! [`EditDelta`]s and applies the [`HostRequest`]s the engine returns.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  AuthoringEngine (session, host requests)   │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Trigger Detector  │  Diagnostic Tracker    │  ← Edit consumers
//! ├─────────────────────────────────────────────┤
//! │  Ranker  │  Replacement  │  Reflow          │  ← Pure computations
//! ├─────────────────────────────────────────────┤
//! │  Term Index / Spell Predicate / Scheduler   │  ← Injected capabilities
//! ├─────────────────────────────────────────────┤
//! │  Document Mirror (Rope) + Edit Deltas       │  ← Text model
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use authoring_core::{
//!     AuthoringEngine, EditDelta, EditOrigin, EngineConfig, HostRequest, ManualScheduler, Term,
//!     Timestamp,
//! };
//!
//! let mut engine = AuthoringEngine::new(EngineConfig::default(), ManualScheduler::new()).unwrap();
//! engine.on_index_ready(
//!     vec![Term::template("Discharge Summary", "discharge", "Discharge summary: ...")],
//!     Timestamp::ZERO,
//! );
//!
//! let text = "template:disc";
//! let requests = engine
//!     .on_edit(EditDelta::insert(0, text), EditOrigin::Input, 13, Timestamp::ZERO)
//!     .unwrap();
//! assert_eq!(requests, vec![HostRequest::OpenPicker { anchor: 0 }]);
//!
//! let picker = engine.picker().unwrap();
//! assert_eq!(picker.items[0].term.text, "Discharge Summary");
//! ```
//!
//! # Offsets
//!
//! All offsets are character offsets (Unicode scalar values). Hosts whose widget counts UTF-16
//! code units convert at the boundary with [`char_offset_to_utf16`] / [`utf16_to_char_offset`].
//!
//! # Module Description
//!
//! - [`engine`] - Session orchestration and host requests
//! - [`trigger`] - Marker detection with reopen suppression
//! - [`ranker`] - Completion ranking and query sequencing
//! - [`diagnostics`] - Misspelling range remap / debounced rescan
//! - [`replace`] - Replacement span computation
//! - [`reflow`] - Hard line reflow proposals
//! - [`terms`] - Term index
//! - [`scheduler`] - Timestamps and timer capability
//! - [`config`] - Engine configuration

pub mod config;
pub mod delta;
pub mod diagnostics;
pub mod document;
pub mod engine;
mod error;
pub mod ranker;
pub mod reflow;
pub mod replace;
pub mod scheduler;
mod spell;
pub mod terms;
mod text;
pub mod tokenize;
pub mod trigger;

pub use config::{
    CompletionConfig, DebugConfig, DiagnosticsConfig, EngineConfig, ReflowConfig, TriggerConfig,
};
pub use delta::{EditDelta, EditOrigin};
pub use diagnostics::{DiagnosticRange, DiagnosticTracker, RescanTicket, TrackerPhase};
pub use document::DocumentMirror;
pub use engine::{
    AuthoringEngine, CompletionBatch, CompletionRequest, EditorHost, EngineStatus, HostRequest,
    PickerState, dispatch_all,
};
pub use error::{ConfigError, CoreError, DeltaError};
pub use ranker::{MatchClass, QuerySequencer, QueryTicket, RankedCompletion, rank};
pub use reflow::plan_reflow;
pub use replace::{Replacement, compute_replacement};
pub use scheduler::{ManualScheduler, Scheduler, TimerId, Timestamp};
pub use spell::SpellPredicate;
pub use terms::{Term, TermIndex, TermKind};
pub use text::{char_len, char_offset_to_utf16, utf16_to_char_offset};
pub use trigger::{TriggerDetector, TriggerMatch, TriggerState};
