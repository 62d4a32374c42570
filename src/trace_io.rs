//! Trace save/load to a run directory (JSON), plus the append-only run log.

use crate::types::ExecutionTrace;
use std::io::Write;
use std::path::Path;
use tracing::instrument;

/// Default filename for a trace under a run directory.
pub const TRACE_FILENAME: &str = "trace.json";

/// Default filename for the append-only run log (one JSON line per run).
pub const RUN_LOG_FILENAME: &str = "runs.jsonl";

/// Saves a trace to `path` as pretty JSON. Creates parent directories if
/// needed.
#[instrument(level = "trace", skip(path, trace))]
pub fn save_trace(path: &Path, trace: &ExecutionTrace) -> Result<(), std::io::Error> {
  let json = serde_json::to_string_pretty(trace)
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, json)
}

/// Loads a trace from `path`. Returns error if the file is missing or invalid
/// JSON.
#[instrument(level = "trace", skip(path))]
pub fn load_trace(path: &Path) -> Result<ExecutionTrace, std::io::Error> {
  let bytes = std::fs::read(path)?;
  serde_json::from_slice(&bytes)
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// Appends one compact JSON line for `trace` to the run log at `path`.
/// Creates the file and parent directories if needed.
#[instrument(level = "trace", skip(path, trace))]
pub fn append_run_log(path: &Path, trace: &ExecutionTrace) -> Result<(), std::io::Error> {
  let line = serde_json::to_string(trace)
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  let mut file = std::fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)?;
  writeln!(file, "{line}")
}
