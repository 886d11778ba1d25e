use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use casper_studio::client::fixture_json;
use casper_studio::core::Mode;
use casper_studio::parsing::{decode_event_atom, parse_result_json};

const EVENT_TYPES: [&str; 4] = ["diagnosis", "ct_scan", "chemotherapy", "radiotherapy"];

// Alternates plain and attributed atoms so both shapes are measured.
fn synthetic_atoms(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let kind = EVENT_TYPES[i % EVENT_TYPES.len()];
            let start = i * 60;
            if i % 2 == 0 {
                format!("event(e{},{},p{},({},{}),{})", i, kind, i % 16, start, start + 600, i % 3 + 1)
            } else {
                format!("event(e{},{},p{},drug_{},({},{}),1.{})", i, kind, i % 16, i % 7, start, start + 600, i % 10)
            }
        })
        .collect()
}

fn synthetic_document(witnesses: usize, atoms_per_witness: usize) -> String {
    let atoms = serde_json::to_value(synthetic_atoms(atoms_per_witness)).unwrap_or_default();
    let witness_list: Vec<serde_json::Value> = (0..witnesses)
        .map(|i| serde_json::json!({ "Time": i as f64 * 0.01, "Value": atoms }))
        .collect();
    serde_json::json!({
        "Solver": "clingo version 5.7.1",
        "Call": [{ "Witnesses": witness_list }],
        "Result": "SATISFIABLE",
        "Models": { "Number": witnesses, "More": "no" },
        "Time": { "Total": 1.0, "Solve": 0.8, "Model": 0.1, "Unsat": 0.0, "CPU": 1.0 }
    })
    .to_string()
}

fn bench_decode_event_atom(c: &mut Criterion) {
    let atoms = synthetic_atoms(1_000);

    let mut group = c.benchmark_group("atoms");
    group.throughput(Throughput::Elements(atoms.len() as u64));
    group.bench_function("decode_event_atom", |b| {
        b.iter(|| {
            for atom in &atoms {
                black_box(decode_event_atom(black_box(atom)));
            }
        })
    });
    group.finish();
}

fn bench_parse_result_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("results");

    group.bench_function("consistent_fixture", |b| {
        let text = fixture_json(Mode::Consistent);
        b.iter(|| black_box(parse_result_json(Mode::Consistent, black_box(text))))
    });

    let large = synthetic_document(20, 500);
    group.throughput(Throughput::Elements(20 * 500));
    group.bench_function("20_witnesses_x_500_atoms", |b| {
        b.iter(|| black_box(parse_result_json(Mode::Consistent, black_box(&large))))
    });

    group.finish();
}

criterion_group!(atom_decoding, bench_decode_event_atom, bench_parse_result_json);
criterion_main!(atom_decoding);
