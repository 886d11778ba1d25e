//! Translation of a run request into the solver's command line.

use crate::config::DEFAULT_APP;
use crate::core::{Mode, TimeUnit};
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Body of `POST /api/run`.
///
/// Several fields have an alias (`appName`/`app`, `mode`/`timeline`,
/// `threads`/`threadCount`, `windowStart`/`window.start`); the first non-empty one wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub app_name: Option<String>,
    pub app: Option<String>,
    pub mode: Option<String>,
    pub timeline: Option<String>,
    pub threads: Option<Value>,
    pub thread_count: Option<Value>,
    pub unit: Option<String>,
    pub repair: Option<Value>,
    pub window_start: Option<Value>,
    pub window_end: Option<Value>,
    pub window: Option<WindowRequest>,
    pub verbose: Option<Value>,
    pub parameters: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowRequest {
    pub start: Option<Value>,
    pub end: Option<Value>,
}

impl RunRequest {
    /// Parse a request body; an empty body is an empty request.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|err| Error::InvalidRequest(format!("Invalid run request body: {}", err)))
    }
}

/// A fully resolved solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverInvocation {
    pub app: String,
    pub mode: Mode,
    pub threads: u32,
    pub unit: TimeUnit,
    pub repair: bool,
    pub verbose: bool,
    /// Start and end of the time window, as given
    pub window: Option<(String, String)>,
    pub extra_args: Vec<String>,
}

impl SolverInvocation {
    pub fn new(app: impl Into<String>, mode: Mode) -> Self {
        Self {
            app: app.into(),
            mode,
            threads: 1,
            unit: TimeUnit::Seconds,
            repair: infer_repair_flag(mode, None),
            verbose: false,
            window: None,
            extra_args: Vec::new(),
        }
    }

    /// Arguments for the execution script, in canonical order.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--app={}", self.app),
            format!("--timeline={}", self.mode),
            format!("--thread-N={}", self.threads),
            format!("--unit={}", self.unit),
            format!("--repair={}", if self.repair { "yes" } else { "no" }),
        ];

        if self.verbose {
            args.push("--verbose".to_string());
        }

        if let Some((start, end)) = &self.window {
            args.push(format!("--window={}-{}", start, end));
        }

        args.extend(self.extra_args.iter().cloned());
        args
    }
}

impl TryFrom<RunRequest> for SolverInvocation {
    type Error = Error;

    fn try_from(request: RunRequest) -> Result<Self> {
        let app = first_non_empty(request.app_name, request.app)
            .unwrap_or_else(|| DEFAULT_APP.to_string());
        let mode = match first_non_empty(request.mode, request.timeline) {
            Some(mode) => mode.parse::<Mode>().map_err(Error::InvalidRequest)?,
            None => Mode::Naive,
        };
        let threads = match first_truthy(request.threads, request.thread_count) {
            Some(value) => parse_thread_count(&value)?,
            None => 1,
        };
        let unit = match request.unit.filter(|unit| !unit.is_empty()) {
            Some(unit) => unit.parse::<TimeUnit>().map_err(Error::InvalidRequest)?,
            None => TimeUnit::Seconds,
        };
        let explicit_repair = request.repair.as_ref().and_then(Value::as_str);
        let repair = infer_repair_flag(mode, explicit_repair);

        let window_start = request
            .window_start
            .and_then(render_window_bound)
            .or_else(|| request.window.as_ref().and_then(|w| w.start.clone()).and_then(render_window_bound));
        let window_end = request
            .window_end
            .and_then(render_window_bound)
            .or_else(|| request.window.as_ref().and_then(|w| w.end.clone()).and_then(render_window_bound));

        let verbose = matches!(request.verbose, Some(Value::Bool(true)))
            || matches!(&request.verbose, Some(Value::String(s)) if s == "yes");

        Ok(Self {
            app,
            mode,
            threads,
            unit,
            repair,
            verbose,
            window: window_start.zip(window_end),
            extra_args: parse_additional_parameters(request.parameters.as_deref().unwrap_or("")),
        })
    }
}

/// Resolve the repair flag: an explicit `"yes"`/`"no"` wins, otherwise repair is on for
/// every mode except naive.
pub fn infer_repair_flag(mode: Mode, explicit: Option<&str>) -> bool {
    match explicit {
        Some("yes") => true,
        Some("no") => false,
        _ => mode != Mode::Naive,
    }
}

/// Split a free-form parameter string into extra arguments.
pub fn parse_additional_parameters(parameters: &str) -> Vec<String> {
    parameters.split_whitespace().map(str::to_string).collect()
}

fn first_non_empty(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary.filter(|s| !s.is_empty()).or_else(|| fallback.filter(|s| !s.is_empty()))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn first_truthy(primary: Option<Value>, fallback: Option<Value>) -> Option<Value> {
    primary.filter(is_truthy).or_else(|| fallback.filter(is_truthy))
}

fn parse_thread_count(value: &Value) -> Result<u32> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| *n > 0)
        .ok_or_else(|| Error::InvalidRequest(format!("Invalid thread count: {}", value)))
}

fn render_window_bound(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invocation(body: Value) -> Result<SolverInvocation> {
        let request: RunRequest = serde_json::from_value(body).unwrap();
        SolverInvocation::try_from(request)
    }

    #[test]
    fn test_defaults() {
        let inv = invocation(json!({})).unwrap();
        assert_eq!(
            inv.args(),
            vec!["--app=lung_cancer", "--timeline=naive", "--thread-N=1", "--unit=seconds", "--repair=no"]
        );
    }

    #[test]
    fn test_repair_inferred_per_mode() {
        assert!(!infer_repair_flag(Mode::Naive, None));
        assert!(infer_repair_flag(Mode::Consistent, None));
        assert!(infer_repair_flag(Mode::Cautious, Some("maybe")));
        assert!(!infer_repair_flag(Mode::Preferred, Some("no")));
        assert!(infer_repair_flag(Mode::Naive, Some("yes")));
    }

    #[test]
    fn test_full_request_in_canonical_order() {
        let inv = invocation(json!({
            "app": "lung_cancer",
            "timeline": "preferred",
            "threadCount": "4",
            "unit": "days",
            "window": {"start": 10, "end": 200},
            "verbose": "yes",
            "parameters": "  --stats  --time-limit=60 "
        }))
        .unwrap();
        assert_eq!(
            inv.args(),
            vec![
                "--app=lung_cancer",
                "--timeline=preferred",
                "--thread-N=4",
                "--unit=days",
                "--repair=yes",
                "--verbose",
                "--window=10-200",
                "--stats",
                "--time-limit=60",
            ]
        );
    }

    #[test]
    fn test_aliases_prefer_primary_names() {
        let inv = invocation(json!({
            "appName": "breast_cancer",
            "app": "ignored",
            "mode": "cautious",
            "timeline": "naive",
            "threads": 2,
            "threadCount": 8,
            "windowStart": "5",
            "windowEnd": 9,
            "window": {"start": 1, "end": 2}
        }))
        .unwrap();
        assert_eq!(inv.app, "breast_cancer");
        assert_eq!(inv.mode, Mode::Cautious);
        assert_eq!(inv.threads, 2);
        assert_eq!(inv.window, Some(("5".to_string(), "9".to_string())));
    }

    #[test]
    fn test_half_window_is_dropped() {
        let inv = invocation(json!({"windowStart": 5})).unwrap();
        assert_eq!(inv.window, None);
        assert!(!inv.args().iter().any(|arg| arg.starts_with("--window")));
    }

    #[test]
    fn test_zero_threads_falls_back_to_one() {
        let inv = invocation(json!({"threads": 0})).unwrap();
        assert_eq!(inv.threads, 1);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(invocation(json!({"mode": "greedy"})), Err(Error::InvalidRequest(_))));
        assert!(matches!(invocation(json!({"unit": "weeks"})), Err(Error::InvalidRequest(_))));
        assert!(matches!(invocation(json!({"threads": "many"})), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_verbose_only_for_true_or_yes() {
        assert!(invocation(json!({"verbose": true})).unwrap().verbose);
        assert!(!invocation(json!({"verbose": "true"})).unwrap().verbose);
        assert!(!invocation(json!({"verbose": false})).unwrap().verbose);
    }

    #[test]
    fn test_empty_body_is_default_request() {
        let request = RunRequest::from_body(b"  ").unwrap();
        assert!(request.app.is_none());
        assert!(matches!(RunRequest::from_body(b"{not json"), Err(Error::InvalidRequest(_))));
    }
}
