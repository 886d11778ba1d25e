//! # CASPER Studio
//!
//! CASPER Studio is the visualization backend for the CASPER answer-set solver,
//! which infers clinical event timelines from patient records.
//!
//! The solver itself is an external program. This crate handles everything around it:
//! decoding the `event(...)` atoms it emits into typed events, grouping them per
//! witness (answer set) with summary statistics, projecting abstract solver time onto
//! calendar time, serving result files over HTTP, and (re)running the solver through
//! its execution script.
//!
//! ## Features
//!
//! - Depth-aware decoding of 5- and 6-argument event atoms
//! - Per-witness aggregation with time span and type counts
//! - HTTP API for listing, reading, and producing result files
//! - Network fetch with a bundled fixture fallback per mode
//!
//! ## Example
//!
//! ```rust
//! use casper_studio::parsing::atom_parser::decode_event_atom;
//!
//! let event = decode_event_atom("event(e1,chemotherapy,p7,cisplatin,(10,40),2)").unwrap();
//! assert_eq!(event.attribute.as_deref(), Some("cisplatin"));
//! assert_eq!((event.start, event.end), (10, 40));
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]

/// Core data structures and types
pub mod core;

/// Parsing of solver atoms and result documents
pub mod parsing;

/// Access to result files on disk
pub mod storage;

/// Invocation of the external solver
pub mod execution;

/// Retrieval of result documents from a running backend
pub mod client;

/// Plain-text solver statistics
pub mod report;

/// Server configuration
pub mod config;

/// HTTP API
pub mod http;

pub mod error {
    //! Error types and result definitions

    use axum::http::StatusCode;
    use std::path::PathBuf;
    use thiserror::Error;

    /// Result type alias for CASPER Studio operations
    pub type Result<T> = std::result::Result<T, Error>;

    /// Main error type for CASPER Studio
    #[derive(Debug, Error)]
    pub enum Error {
        /// A required directory does not exist
        #[error("Directory not found: {}", .0.display())]
        DirectoryNotFound(PathBuf),

        /// The result directory exists but holds no `.json` files
        #[error("No result files found for {app}/{mode}")]
        NoResultFiles { app: String, mode: String },

        /// A named result file does not exist
        #[error("Result file not found: {0}")]
        ResultFileNotFound(String),

        /// A result file is not valid JSON
        #[error("Failed to parse CASPER result JSON ({file})")]
        MalformedResult {
            file: String,
            #[source]
            source: serde_json::Error,
        },

        /// A request carried a missing or invalid parameter
        #[error("{0}")]
        InvalidRequest(String),

        /// A base date or time unit could not be understood
        #[error("Invalid time configuration: {0}")]
        InvalidTimeConfig(String),

        /// The solver process could not be started
        #[error("Failed to launch CASPER execution script: {0}")]
        Spawn(#[source] std::io::Error),

        /// A built-in pattern failed to compile
        #[error("Pattern error: {0}")]
        Pattern(#[from] regex::Error),

        /// A result document could not be retrieved
        #[error("Fetch error: {0}")]
        Fetch(String),

        /// IO error
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        /// JSON error
        #[error("JSON error: {0}")]
        Json(#[from] serde_json::Error),
    }

    impl Error {
        /// HTTP status attached to this error when it reaches the API surface.
        pub fn status_code(&self) -> StatusCode {
            match self {
                Error::DirectoryNotFound(_)
                | Error::NoResultFiles { .. }
                | Error::ResultFileNotFound(_) => StatusCode::NOT_FOUND,
                Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }
}

// Re-export commonly used types
pub use crate::core::{AnswerSet, Event, Mode, ParseResult, TimeConfig, TimeUnit};
pub use error::{Error, Result};
