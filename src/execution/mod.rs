//! Solver Execution Module
//!
//! The CASPER solver is an external program started through a shell script. This
//! module turns a run request into the script's arguments and runs it.
//!
//! # Components
//!
//! - **SolverInvocation** - Resolves a `RunRequest` (defaults, aliases, repair inference)
//!   into the canonical argument list
//! - **SolverRunner** - Spawns the script, echoes and captures its output, and classifies
//!   the exit code
//!
//! # Example
//!
//! ```ignore
//! use casper_studio::execution::{SolverInvocation, SolverRunner};
//!
//! let invocation = SolverInvocation::new("lung_cancer", Mode::Consistent);
//! let outcome = runner.run(invocation.args()).await?;
//! if outcome.success {
//!     println!("results at {:?}", outcome.output_path);
//! }
//! ```

pub mod invocation;
pub mod runner;

// Re-export main types for convenience
pub use invocation::{infer_repair_flag, parse_additional_parameters, RunRequest, SolverInvocation};
pub use runner::{is_success_exit_code, RunOutcome, SolverRunner, SUCCESS_EXIT_CODES};
