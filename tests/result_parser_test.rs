//! Result Aggregation Integration Tests
//!
//! Tests turning whole solver documents into per-witness answer sets.

use casper_studio::client::load_fixture;
use casper_studio::core::{Mode, RawResultDocument};
use casper_studio::parsing::result_parser::{aggregate, parse_result_json};

fn document(witnesses: &str) -> RawResultDocument {
    let text = format!(
        r#"{{
            "Solver": "clingo version 5.7.1",
            "Input": ["program.lp"],
            "Call": [{{"Start": 0.0, "Stop": 1.0, "Witnesses": {}}}],
            "Result": "SATISFIABLE",
            "Models": {{"Number": 2, "More": "no"}},
            "Calls": 1,
            "Time": {{"Total": 1.5, "Solve": 1.0, "Model": 0.2, "Unsat": 0.0, "CPU": 1.4}}
        }}"#,
        witnesses
    );
    RawResultDocument::from_json(&text).unwrap()
}

#[test]
fn test_one_answer_set_per_witness_in_order() {
    let doc = document(
        r#"[
            {"Time": 0.1, "Value": ["event(a,typeA,p1,(5,15),2)", "event(b,typeB,p1,(10,12),2)", "event(c,typeA,p1,(3,3),1)"]},
            {"Time": 0.2, "Value": ["event(d,typeC,p2,(1,2),3)"]}
        ]"#,
    );

    let result = aggregate(Mode::Consistent, &doc);
    assert_eq!(result.mode, Mode::Consistent);
    assert_eq!(result.answer_sets.len(), 2);

    let first = &result.answer_sets[0];
    assert_eq!(first.id, "witness-1");
    assert_eq!(first.witness_index, 0);
    let ids: Vec<&str> = first.events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(first.summary.start, 3);
    assert_eq!(first.summary.end, 15);
    assert_eq!(first.summary.time_span, 12);
    assert_eq!(first.summary.types.get("typeA"), Some(&2));

    let second = &result.answer_sets[1];
    assert_eq!(second.id, "witness-2");
    assert_eq!(second.witness_index, 1);
    assert_eq!(second.summary.event_count, 1);
}

#[test]
fn test_malformed_atoms_are_dropped_not_fatal() {
    let doc = document(r#"[{"Time": 0.1, "Value": ["event(a,typeA,p1,(5,15),2)", "event(b", "holds(x)"]}]"#);
    let result = aggregate(Mode::Naive, &doc);
    assert_eq!(result.answer_sets[0].events.len(), 1);
}

#[test]
fn test_witness_without_events_has_zero_summary() {
    let doc = document(r#"[{"Time": 0.1, "Value": ["patient(p1)"]}]"#);
    let summary = &aggregate(Mode::Naive, &doc).answer_sets[0].summary;
    assert_eq!(summary.event_count, 0);
    assert_eq!((summary.start, summary.end, summary.time_span), (0, 0, 0));
    assert!(summary.types.is_empty());
}

#[test]
fn test_empty_witness_list_yields_no_answer_sets() {
    let result = aggregate(Mode::Cautious, &document("[]"));
    assert!(result.answer_sets.is_empty());
}

#[test]
fn test_missing_call_list_yields_no_answer_sets() {
    let result =
        parse_result_json(Mode::Naive, r#"{"Solver": "clingo", "Result": "UNSATISFIABLE"}"#).unwrap();
    assert!(result.answer_sets.is_empty());
    assert_eq!(result.metadata.result, "UNSATISFIABLE");
}

#[test]
fn test_metadata_copied_and_optionals_absent() {
    let result = aggregate(Mode::Naive, &document("[]"));
    let metadata = &result.metadata;
    assert_eq!(metadata.solver, "clingo version 5.7.1");
    assert_eq!(metadata.models.number, 2);
    assert_eq!(metadata.models.more, "no");
    assert!((metadata.time.total - 1.5).abs() < f64::EPSILON);
    assert_eq!(metadata.threads, None);
    assert_eq!(metadata.winner, None);
    assert!(metadata.stats.is_none());

    let json = serde_json::to_value(&result).unwrap();
    let metadata_json = json["metadata"].as_object().unwrap();
    assert!(!metadata_json.contains_key("threads"));
    assert!(!metadata_json.contains_key("winner"));
    assert!(!metadata_json.contains_key("stats"));
}

#[test]
fn test_fixture_with_threads_winner_and_stats() {
    let result = aggregate(Mode::Preferred, &load_fixture(Mode::Preferred).unwrap());
    assert_eq!(result.metadata.threads, Some(4));
    assert_eq!(result.metadata.winner, Some(1));
    assert!(result.metadata.stats.as_ref().unwrap().contains_key("Conflicts"));
}

#[test]
fn test_consistent_fixture_rounds_fractional_confidence() {
    let result = aggregate(Mode::Consistent, &load_fixture(Mode::Consistent).unwrap());
    let second = result.answer_set("witness-2").unwrap();
    let carboplatin = second.events.iter().find(|e| e.id == "e7").unwrap();
    assert_eq!(carboplatin.confidence, 2);
    assert_eq!(second.summary.end, 3500);
}

#[test]
fn test_parse_result_json_rejects_invalid_json() {
    assert!(parse_result_json(Mode::Naive, "{not json").is_err());
}
