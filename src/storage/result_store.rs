//! Result files on disk.
//!
//! Solver runs leave their output under `<results_dir>/<app>/<mode>/<name>.json`;
//! applications live under `<app_dir>/<app>`. This store lists and reads them for
//! the HTTP layer.

use crate::config::StudioConfig;
use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;
use tracing::debug;

const RESULT_EXTENSION: &str = ".json";

#[derive(Debug, Clone)]
pub struct ResultStore {
    app_dir: PathBuf,
    results_dir: PathBuf,
}

impl ResultStore {
    pub fn new(app_dir: impl Into<PathBuf>, results_dir: impl Into<PathBuf>) -> Self {
        Self { app_dir: app_dir.into(), results_dir: results_dir.into() }
    }

    pub fn from_config(config: &StudioConfig) -> Self {
        Self::new(&config.app_dir, &config.results_dir)
    }

    /// Names of the application directories, sorted.
    pub async fn list_apps(&self) -> Result<Vec<String>> {
        ensure_directory(&self.app_dir).await?;

        let mut apps = Vec::new();
        let mut entries = fs::read_dir(&self.app_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                apps.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        apps.sort();
        Ok(apps)
    }

    /// `.json` result files of one app and mode, sorted by name in descending order.
    pub async fn list_result_files(&self, app: &str, mode: &str) -> Result<Vec<String>> {
        let target_dir = self.result_dir(app, mode)?;
        ensure_directory(&target_dir).await?;

        let mut files = Vec::new();
        let mut entries = fs::read_dir(&target_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type().await?.is_file() && name.ends_with(RESULT_EXTENSION) {
                files.push(name);
            }
        }
        files.sort_unstable_by(|a, b| b.cmp(a));
        Ok(files)
    }

    /// Most recently modified result file of one app and mode.
    ///
    /// Files with equal modification times keep their name order.
    pub async fn latest_result_file(&self, app: &str, mode: &str) -> Result<String> {
        let files = self.list_result_files(app, mode).await?;
        if files.len() <= 1 {
            return files.into_iter().next().ok_or_else(|| Error::NoResultFiles {
                app: app.to_string(),
                mode: mode.to_string(),
            });
        }

        let target_dir = self.result_dir(app, mode)?;
        let mut timed: Vec<(String, SystemTime)> = Vec::with_capacity(files.len());
        for file in files {
            let modified = fs::metadata(target_dir.join(&file)).await?.modified()?;
            timed.push((file, modified));
        }
        timed.sort_by(|a, b| b.1.cmp(&a.1));

        let (latest, _) = timed.swap_remove(0);
        debug!(app, mode, file = %latest, "Resolved latest result file");
        Ok(latest)
    }

    /// Read a result file as untyped JSON. Without a file name, the latest file is read.
    pub async fn read_result_json(
        &self,
        app: &str,
        mode: &str,
        file: Option<&str>,
    ) -> Result<serde_json::Value> {
        let file_name = match file {
            Some(name) => name.to_string(),
            None => self.latest_result_file(app, mode).await?,
        };
        let safe_name = Path::new(&file_name)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::ResultFileNotFound(file_name.clone()))?;
        let target_path = self.result_dir(app, mode)?.join(&safe_name);

        let text = fs::read_to_string(&target_path).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                Error::ResultFileNotFound(safe_name.clone())
            } else {
                Error::Io(err)
            }
        })?;

        serde_json::from_str(&text)
            .map_err(|source| Error::MalformedResult { file: safe_name, source })
    }

    fn result_dir(&self, app: &str, mode: &str) -> Result<PathBuf> {
        Ok(self.results_dir.join(path_component(app, "app")?).join(path_component(mode, "mode")?))
    }
}

/// Accept `value` only when it names a single plain directory entry.
fn path_component<'a>(value: &'a str, label: &str) -> Result<&'a str> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !value.contains('\\') => Ok(value),
        _ => Err(Error::InvalidRequest(format!("Invalid {}: '{}'", label, value))),
    }
}

async fn ensure_directory(path: &Path) -> Result<()> {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        _ => Err(Error::DirectoryNotFound(path.to_path_buf())),
    }
}
