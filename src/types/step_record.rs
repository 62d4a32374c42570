//! Per-step provenance record inside an execution trace.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::OperationKind;

/// Status of one executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
  Succeeded,
  Failed,
}

impl fmt::Display for StepStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StepStatus::Succeeded => write!(f, "succeeded"),
      StepStatus::Failed => write!(f, "failed"),
    }
  }
}

/// One recorded step: what ran, what the instruction resolved to, what it
/// produced, and how many attempts it took.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
  /// Operation that was executed.
  pub operation: String,
  pub kind: OperationKind,
  pub status: StepStatus,
  /// Instruction after placeholder resolution, as sent to the backend.
  /// None when resolution itself failed.
  pub resolved_instruction: Option<String>,
  /// Produced output (success only).
  pub output: Option<String>,
  /// Directive drawn for draw steps, recorded verbatim for replay.
  pub directive: Option<String>,
  /// Attempts consumed (1 = no retry; 0 = never attempted).
  pub attempts: u32,
  pub latency_ms: u64,
  /// Why the step failed (failure only).
  pub failure_reason: Option<String>,
}
