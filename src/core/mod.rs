//! Core data structures and types for CASPER Studio

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub mod raw;
pub mod time;

pub use raw::{RawCall, RawResultDocument, RawWitness};
pub use time::{format_range, to_absolute_time, TimeConfig, TimeUnit};

/// Solver execution profile.
///
/// Selects the reasoning strategy on the solver side and, on the client side, which
/// bundled fixture to fall back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Naive,
    Consistent,
    Preferred,
    Cautious,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Naive, Mode::Consistent, Mode::Preferred, Mode::Cautious];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Naive => "naive",
            Mode::Consistent => "consistent",
            Mode::Preferred => "preferred",
            Mode::Cautious => "cautious",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Naive
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "naive" => Ok(Mode::Naive),
            "consistent" => Ok(Mode::Consistent),
            "preferred" => Ok(Mode::Preferred),
            "cautious" => Ok(Mode::Cautious),
            other => Err(format!(
                "Unknown mode: {}. Use 'naive', 'consistent', 'preferred', or 'cautious'",
                other
            )),
        }
    }
}

/// A clinical event decoded from one `event(...)` atom.
///
/// `start` and `end` are abstract solver time units; `start <= end` is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attribute: Option<String>,
    pub start: i64,
    pub end: i64,
    /// Always within `1..=3`
    pub confidence: u8,
    /// The atom this event was decoded from
    pub raw: String,
}

/// Derived statistics over the events of one answer set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSetSummary {
    pub event_count: usize,
    pub time_span: i64,
    pub start: i64,
    pub end: i64,
    pub types: BTreeMap<String, usize>,
}

/// One witness of the solver, decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSet {
    /// `witness-<n>` with `n` the 1-based witness position
    pub id: String,
    pub witness_index: usize,
    pub events: Vec<Event>,
    pub summary: AnswerSetSummary,
}

/// Model-count block of the solver output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Models {
    #[serde(rename = "Number")]
    pub number: u64,
    #[serde(rename = "More")]
    pub more: String,
}

/// Timing breakdown of the solver output, in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    #[serde(rename = "Total")]
    pub total: f64,
    #[serde(rename = "Solve")]
    pub solve: f64,
    #[serde(rename = "Model")]
    pub model: f64,
    #[serde(rename = "Unsat")]
    pub unsat: f64,
    #[serde(rename = "CPU")]
    pub cpu: f64,
}

/// Solver metadata carried over from the raw document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub solver: String,
    pub result: String,
    pub models: Models,
    pub time: Timing,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub threads: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub winner: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stats: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Everything the visualization layer needs from one solver run.
///
/// Rebuilt wholesale from a raw document; never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub mode: Mode,
    pub metadata: Metadata,
    pub answer_sets: Vec<AnswerSet>,
}

impl ParseResult {
    /// Look up an answer set by its `witness-<n>` id.
    pub fn answer_set(&self, id: &str) -> Option<&AnswerSet> {
        self.answer_sets.iter().find(|set| set.id == id)
    }
}
