//! Decoding of solver output: single atoms and whole result documents

pub mod atom_parser;
pub mod result_parser;

pub use atom_parser::{decode_event_atom, AtomShape};
pub use result_parser::{aggregate, build_summary, parse_result_json};
