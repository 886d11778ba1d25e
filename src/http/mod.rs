//! HTTP API module for CASPER Studio
//!
//! Provides REST endpoints for:
//! - Application and result file listing
//! - Raw result document retrieval
//! - Solver runs

pub mod server;

pub use server::{
    build_state, create_server, start_server, ApiError, AppState, AppsResponse, ErrorResponse,
    FilesResponse, SuccessResponse,
};
