//! Raw solver output, as written by clingo's `--outf=2` JSON mode.

use super::{Models, Timing};
use serde::{Deserialize, Serialize};

/// One witness: the atoms of a single answer set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWitness {
    #[serde(rename = "Time", default)]
    pub time: f64,
    #[serde(rename = "Value", default)]
    pub value: Vec<String>,
}

/// One solving call and the witnesses it produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCall {
    #[serde(rename = "Start", default)]
    pub start: f64,
    #[serde(rename = "Stop", default)]
    pub stop: f64,
    #[serde(rename = "Witnesses", default)]
    pub witnesses: Vec<RawWitness>,
}

/// A complete solver result document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResultDocument {
    #[serde(rename = "Solver")]
    pub solver: String,
    #[serde(rename = "Input", default)]
    pub input: Vec<String>,
    #[serde(rename = "Call", default)]
    pub call: Vec<RawCall>,
    #[serde(rename = "Result")]
    pub result: String,
    #[serde(rename = "Models", default)]
    pub models: Models,
    #[serde(rename = "Calls", default)]
    pub calls: u64,
    #[serde(rename = "Time", default)]
    pub time: Timing,
    #[serde(rename = "Threads", default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<u32>,
    #[serde(rename = "Winner", default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<u32>,
    #[serde(rename = "Stats", default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<serde_json::Map<String, serde_json::Value>>,
}

impl RawResultDocument {
    /// Parse a document from its JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Witnesses of the first call; empty when there is no call.
    pub fn witnesses(&self) -> &[RawWitness] {
        self.call.first().map_or(&[], |call| call.witnesses.as_slice())
    }
}
