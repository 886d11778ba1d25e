//! Subprocess invocation of the CASPER execution script.

use crate::config::StudioConfig;
use crate::error::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;
use tracing::{info, warn};

/// Exit codes the solver uses for a completed run (clingo's SAT/UNSAT/exhausted outcomes).
pub const SUCCESS_EXIT_CODES: [i32; 4] = [0, 10, 20, 30];

const RESULT_PATH_MARKER: &str = r"Results saved to (.+)";

pub fn is_success_exit_code(code: i32) -> bool {
    SUCCESS_EXIT_CODES.contains(&code)
}

/// Finished run of the execution script.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome {
    pub success: bool,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub output_path: Option<String>,
    pub stdout: String,
    pub stderr: String,
    pub args: Vec<String>,
}

/// Runs the execution script and captures its output.
///
/// Runs are not serialized: each call spawns its own process. Overlapping runs are
/// counted and logged.
pub struct SolverRunner {
    shell: String,
    script: PathBuf,
    working_dir: PathBuf,
    result_path_regex: Regex,
    echo_output: bool,
    in_flight: AtomicUsize,
}

impl SolverRunner {
    pub fn new(config: &StudioConfig) -> Result<Self> {
        Ok(Self {
            shell: config.shell.clone(),
            script: config.execution_script.clone(),
            working_dir: config.root.clone(),
            result_path_regex: Regex::new(RESULT_PATH_MARKER)?,
            echo_output: true,
            in_flight: AtomicUsize::new(0),
        })
    }

    /// Disable echoing of the child's output to this process's stdout/stderr.
    pub fn quiet(mut self) -> Self {
        self.echo_output = false;
        self
    }

    /// Number of runs currently executing.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Path announced on stdout by a `Results saved to <path>` line.
    pub fn extract_result_path(&self, stdout: &str) -> Option<String> {
        self.result_path_regex
            .captures(stdout)
            .and_then(|captures| captures.get(1))
            .map(|path| path.as_str().trim().to_string())
            .filter(|path| !path.is_empty())
    }

    /// Run the execution script with `args` and wait for it to exit.
    ///
    /// A non-success exit code is reported in the outcome, not as an error; only a
    /// failure to start the process is an error.
    pub async fn run(&self, args: Vec<String>) -> Result<RunOutcome> {
        let _guard = InFlightGuard::enter(&self.in_flight);

        info!(script = %self.script.display(), ?args, "Starting CASPER run");

        let mut child = Command::new(&self.shell)
            .arg(&self.script)
            .args(&args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(Error::Spawn)?;

        let stdout = child.stdout.take().ok_or_else(|| Error::Spawn(missing_pipe("stdout")))?;
        let stderr = child.stderr.take().ok_or_else(|| Error::Spawn(missing_pipe("stderr")))?;

        let (stdout, stderr, status) = tokio::try_join!(
            pump(stdout, tokio::io::stdout(), self.echo_output),
            pump(stderr, tokio::io::stderr(), self.echo_output),
            child.wait(),
        )?;

        let exit_code = status.code();
        let success = exit_code.map_or(false, is_success_exit_code);
        let stdout = String::from_utf8_lossy(&stdout).into_owned();
        let stderr = String::from_utf8_lossy(&stderr).into_owned();
        let output_path = self.extract_result_path(&stdout);

        if success {
            info!(?exit_code, output_path = ?output_path, "CASPER run finished");
        } else {
            warn!(?exit_code, "CASPER run failed");
        }

        Ok(RunOutcome { success, exit_code, output_path, stdout, stderr, args })
    }
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        let active = counter.fetch_add(1, Ordering::SeqCst) + 1;
        if active > 1 {
            warn!(active, "Overlapping CASPER runs; runs are not serialized");
        }
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn missing_pipe(name: &str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::BrokenPipe, format!("child {} was not captured", name))
}

/// Copy a child stream to `echo` as it arrives while keeping a full copy.
async fn pump<R, W>(mut reader: R, mut echo: W, echo_enabled: bool) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut captured = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let read = reader.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        if echo_enabled {
            // Losing the echo must not lose the capture.
            let _ = echo.write_all(&chunk[..read]).await;
        }
        captured.extend_from_slice(&chunk[..read]);
    }
    if echo_enabled {
        let _ = echo.flush().await;
    }
    Ok(captured)
}
