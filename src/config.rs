//! Configuration structures and utilities

use std::path::{Path, PathBuf};

/// Default application name when a request does not carry one
pub const DEFAULT_APP: &str = "lung_cancer";

/// Location of everything the backend reads and runs, relative to a CASPER checkout.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Repository root; the solver runs with this as working directory
    pub root: PathBuf,
    /// One subdirectory per application
    pub app_dir: PathBuf,
    /// `<results_dir>/<app>/<mode>/*.json`
    pub results_dir: PathBuf,
    pub execution_script: PathBuf,
    /// Interpreter used to run the execution script
    pub shell: String,
}

impl StudioConfig {
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            app_dir: root.join("app"),
            results_dir: root.join("results"),
            execution_script: root.join("execution").join("run_casper.sh"),
            shell: "bash".to_string(),
            root,
        }
    }

    pub fn with_execution_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.execution_script = script.into();
        self
    }

    /// Root used when none is configured: the parent of the working directory,
    /// matching a backend started from `<root>/studio`.
    pub fn default_root() -> PathBuf {
        std::env::current_dir()
            .ok()
            .and_then(|cwd| cwd.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from(".."))
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self::from_root(Self::default_root())
    }
}
