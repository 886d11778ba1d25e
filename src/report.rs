//! Plain-text rendering of solver statistics and answer sets.

use crate::core::{format_range, AnswerSet, ParseResult, TimeConfig};
use std::fmt::Write;

/// The statistics panel: solver result, model count, threads, total time, and the
/// selected answer set's time range when it has events.
pub fn render_stats(result: &ParseResult, selected: Option<&str>, time_config: &TimeConfig) -> String {
    let metadata = &result.metadata;
    let threads = metadata.threads.map_or_else(|| "n/a".to_string(), |t| t.to_string());

    let mut out = String::new();
    let _ = writeln!(out, "Solver statistics ({})", result.mode);
    let _ = writeln!(out, "  {:<16}{}", "Result", metadata.result);
    let _ = writeln!(out, "  {:<16}{}", "Models", metadata.models.number);
    let _ = writeln!(out, "  {:<16}{}", "Threads", threads);
    let _ = writeln!(out, "  {:<16}{}", "Solve time (s)", metadata.time.total);

    if let Some(set) = selected.and_then(|id| result.answer_set(id)) {
        if set.summary.event_count > 0 {
            let _ = writeln!(out, "Current timeline ({})", set.id);
            let _ = writeln!(
                out,
                "  {} events · {}",
                set.summary.event_count,
                format_range(set.summary.start, set.summary.end, time_config)
            );
        }
    }
    out
}

/// One line per answer set: id, event count, solver time bounds, and type counts.
pub fn render_answer_sets(answer_sets: &[AnswerSet]) -> String {
    let mut out = String::new();
    for set in answer_sets {
        let types: Vec<String> =
            set.summary.types.iter().map(|(name, count)| format!("{}={}", name, count)).collect();
        let _ = writeln!(
            out,
            "{:<12} {:>4} events  [{}, {}]  {}",
            set.id,
            set.summary.event_count,
            set.summary.start,
            set.summary.end,
            types.join(" ")
        );
    }
    out
}
