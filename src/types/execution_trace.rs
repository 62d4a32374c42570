//! Terminal, immutable record of one strategy run.
//!
//! Produced only by the pipeline executor, once, when a run completes or is
//! aborted; consumers read it. A partial trace preserves every completed
//! step's output plus the failing step and reason.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ContextEntry, StepRecord, StepStatus};

/// Overall status of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStatus {
  /// Every operation completed.
  Complete,
  /// The run stopped early; `failure` names the step and reason.
  Partial,
}

impl fmt::Display for TraceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TraceStatus::Complete => write!(f, "complete"),
      TraceStatus::Partial => write!(f, "partial"),
    }
  }
}

/// The operation a partial run stopped at, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFailure {
  pub operation: String,
  pub reason: String,
}

/// Immutable snapshot of a completed or aborted run: the final context plus
/// per-step status, attempts and timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionTrace {
  /// Strategy that was executed.
  pub strategy: String,
  /// The original subject input.
  pub subject: String,
  pub status: TraceStatus,
  /// RFC 3339 timestamp when the run started.
  pub started_at: String,
  /// RFC 3339 timestamp when the run ended.
  pub finished_at: String,
  /// Recorded steps in execution order.
  pub steps: Vec<StepRecord>,
  /// Final context entries; 1:1, in order, with the successful steps.
  pub context: Vec<ContextEntry>,
  /// Set when `status` is partial.
  pub failure: Option<RunFailure>,
}

impl ExecutionTrace {
  pub fn is_complete(&self) -> bool {
    self.status == TraceStatus::Complete
  }

  /// Recorded draw values in execution order. Feeding these back through a
  /// fixed-sequence directive source replays the run deterministically.
  pub fn drawn_directives(&self) -> Vec<&str> {
    self
      .steps
      .iter()
      .filter_map(|s| s.directive.as_deref())
      .collect()
  }

  /// Output of the last successful step (the produced idea, for a complete
  /// run).
  pub fn final_output(&self) -> Option<&str> {
    self
      .steps
      .iter()
      .rev()
      .find(|s| s.status == StepStatus::Succeeded)
      .and_then(|s| s.output.as_deref())
  }
}
