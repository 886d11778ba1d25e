//! Result Aggregation
//!
//! Turns a raw solver document into a [`ParseResult`]: one [`AnswerSet`] per
//! witness of the first call, each with its decoded events and a derived summary.
//!
//! # Example
//!
//! ```
//! use casper_studio::core::{Mode, RawResultDocument};
//! use casper_studio::parsing::result_parser::aggregate;
//!
//! let doc = RawResultDocument::from_json(r#"{
//!     "Solver": "clingo version 5.7.1",
//!     "Call": [{"Witnesses": [{"Value": ["event(e1,surgery,p1,(3,5),2)", "patient(p1)"]}]}],
//!     "Result": "SATISFIABLE"
//! }"#).unwrap();
//!
//! let result = aggregate(Mode::Naive, &doc);
//! assert_eq!(result.answer_sets[0].id, "witness-1");
//! assert_eq!(result.answer_sets[0].summary.event_count, 1);
//! ```

use crate::core::{AnswerSet, AnswerSetSummary, Event, Metadata, Mode, ParseResult, RawResultDocument};
use crate::parsing::atom_parser::decode_event_atom;

/// Build the summary of a set of events.
///
/// An empty set summarizes to all zeros.
pub fn build_summary(events: &[Event]) -> AnswerSetSummary {
    let (Some(start), Some(end)) =
        (events.iter().map(|e| e.start).min(), events.iter().map(|e| e.end).max())
    else {
        return AnswerSetSummary::default();
    };

    let mut summary = AnswerSetSummary {
        event_count: events.len(),
        time_span: end.saturating_sub(start),
        start,
        end,
        ..AnswerSetSummary::default()
    };
    for event in events {
        *summary.types.entry(event.event_type.clone()).or_insert(0) += 1;
    }
    summary
}

/// Build an answer set from the atoms of one witness. Undecodable atoms are dropped.
pub fn build_answer_set<S: AsRef<str>>(witness_index: usize, atoms: &[S]) -> AnswerSet {
    let events: Vec<Event> = atoms.iter().filter_map(|atom| decode_event_atom(atom.as_ref())).collect();
    let summary = build_summary(&events);
    AnswerSet { id: format!("witness-{}", witness_index + 1), witness_index, events, summary }
}

/// Solver metadata of a raw document; absent optional fields stay absent.
pub fn extract_metadata(doc: &RawResultDocument) -> Metadata {
    Metadata {
        solver: doc.solver.clone(),
        result: doc.result.clone(),
        models: doc.models.clone(),
        time: doc.time.clone(),
        threads: doc.threads,
        winner: doc.winner,
        stats: doc.stats.clone(),
    }
}

/// Aggregate a raw solver document into a [`ParseResult`].
///
/// Witness order and atom order are preserved. A document without calls or
/// witnesses yields no answer sets.
pub fn aggregate(mode: Mode, doc: &RawResultDocument) -> ParseResult {
    let answer_sets = doc
        .witnesses()
        .iter()
        .enumerate()
        .map(|(index, witness)| build_answer_set(index, witness.value.as_slice()))
        .collect();

    ParseResult { mode, metadata: extract_metadata(doc), answer_sets }
}

/// Parse JSON text and aggregate it in one step.
pub fn parse_result_json(mode: Mode, text: &str) -> crate::Result<ParseResult> {
    let doc = RawResultDocument::from_json(text)?;
    Ok(aggregate(mode, &doc))
}
