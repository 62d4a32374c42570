//! Pipeline executor: walks a strategy's operations strictly in declared
//! order, threading the context and always returning a trace.
//!
//! Operation order is semantically load-bearing (later instructions reference
//! earlier outputs), so there is no reordering and no parallelism within one
//! run. Per-run errors never escape [PipelineExecutor::run]; they are folded
//! into the returned [ExecutionTrace] so partial creative output survives.

use crate::backend::{BackendError, GenerativeBackend};
use crate::directive::DirectiveSource;
use crate::runner::{OperationResult, OperationRunner, StepError};
use crate::types::{
  ExecutionContext, ExecutionTrace, OperationKind, OperationSpec, RunFailure, StepRecord,
  StepStatus, StrategyDefinition, TraceStatus,
};
use chrono::Utc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

/// Bounded exponential backoff for retryable step failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
  /// Maximum attempts per step (1 = no retry).
  pub max_attempts: u32,
  pub initial_backoff: Duration,
  pub backoff_multiplier: f64,
  pub max_backoff: Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_attempts: 3,
      initial_backoff: Duration::from_millis(250),
      backoff_multiplier: 2.0,
      max_backoff: Duration::from_secs(5),
    }
  }
}

impl RetryPolicy {
  /// Policy that disables retries (single attempt per step).
  pub fn no_retry() -> Self {
    Self {
      max_attempts: 1,
      ..Default::default()
    }
  }

  pub fn with_max_attempts(mut self, attempts: u32) -> Self {
    self.max_attempts = attempts.max(1);
    self
  }

  pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
    self.initial_backoff = backoff;
    self
  }

  pub fn with_max_backoff(mut self, max: Duration) -> Self {
    self.max_backoff = max;
    self
  }

  pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
    self.backoff_multiplier = multiplier;
    self
  }

  /// Backoff before the next attempt, given how many attempts have failed.
  pub(crate) fn backoff_after(&self, failed_attempts: u32) -> Duration {
    let exp = self.initial_backoff.as_millis() as f64
      * self
        .backoff_multiplier
        .powi(failed_attempts.saturating_sub(1) as i32);
    let capped = (exp as u64).min(self.max_backoff.as_millis() as u64);
    Duration::from_millis(capped)
  }
}

/// Options for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunOptions {
  pub retry: RetryPolicy,
  /// Upper bound on one backend attempt. A timed-out attempt counts as a
  /// retryable backend failure.
  pub step_timeout: Duration,
  /// Cooperative cancellation: checked before each step and raced against
  /// in-flight attempts. A cancelled run returns a partial trace.
  pub cancel: CancellationToken,
}

impl Default for RunOptions {
  fn default() -> Self {
    Self {
      retry: RetryPolicy::default(),
      step_timeout: Duration::from_secs(60),
      cancel: CancellationToken::new(),
    }
  }
}

impl RunOptions {
  pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
    self.retry = retry;
    self
  }

  pub fn with_step_timeout(mut self, timeout: Duration) -> Self {
    self.step_timeout = timeout;
    self
  }

  pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
    self.cancel = cancel;
    self
  }
}

/// Outcome of one step after retries.
enum StepOutcome {
  Success {
    result: OperationResult,
    attempts: u32,
  },
  Failure {
    kind: OperationKind,
    resolved_instruction: Option<String>,
    attempts: u32,
    reason: String,
  },
}

/// Walks one strategy's operations in declared order and produces the trace.
pub struct PipelineExecutor<'a> {
  backend: &'a dyn GenerativeBackend,
  directives: &'a dyn DirectiveSource,
  options: RunOptions,
}

impl<'a> PipelineExecutor<'a> {
  pub fn new(
    backend: &'a dyn GenerativeBackend,
    directives: &'a dyn DirectiveSource,
    options: RunOptions,
  ) -> Self {
    Self {
      backend,
      directives,
      options,
    }
  }

  /// Runs the strategy against `subject`. Never fails: per-run errors are
  /// folded into the returned trace, which preserves every completed step's
  /// output up to the point of failure.
  #[instrument(level = "trace", skip(self, strategy, subject), fields(strategy = %strategy.name))]
  pub async fn run(&self, strategy: &StrategyDefinition, subject: &str) -> ExecutionTrace {
    let started_at = Utc::now().to_rfc3339();
    let runner = OperationRunner::new(self.backend, self.directives);
    let mut ctx = ExecutionContext::new(&strategy.name, subject);
    let mut steps = Vec::with_capacity(strategy.operations.len());
    let mut failure = None;

    for op in &strategy.operations {
      if self.options.cancel.is_cancelled() {
        info!(operation = %op.name, "run cancelled before step");
        failure = Some(RunFailure {
          operation: op.name.clone(),
          reason: "cancelled".to_string(),
        });
        break;
      }

      info!(operation = %op.name, kind = %op.kind(), "executing step");
      let start = Instant::now();
      match self.run_step(&runner, op, &ctx).await {
        StepOutcome::Success { result, attempts } => {
          steps.push(StepRecord {
            operation: op.name.clone(),
            kind: result.kind,
            status: StepStatus::Succeeded,
            resolved_instruction: Some(result.resolved_instruction),
            output: Some(result.text.clone()),
            directive: result.directive,
            attempts,
            latency_ms: start.elapsed().as_millis() as u64,
            failure_reason: None,
          });
          ctx.push(&op.name, result.text);
        }
        StepOutcome::Failure {
          kind,
          resolved_instruction,
          attempts,
          reason,
        } => {
          warn!(operation = %op.name, attempts, reason = %reason, "step failed, stopping run");
          steps.push(StepRecord {
            operation: op.name.clone(),
            kind,
            status: StepStatus::Failed,
            resolved_instruction,
            output: None,
            directive: None,
            attempts,
            latency_ms: start.elapsed().as_millis() as u64,
            failure_reason: Some(reason.clone()),
          });
          failure = Some(RunFailure {
            operation: op.name.clone(),
            reason,
          });
          break;
        }
      }
    }

    let status = if failure.is_none() {
      TraceStatus::Complete
    } else {
      TraceStatus::Partial
    };
    info!(status = %status, steps = steps.len(), "run finished");
    ExecutionTrace {
      strategy: strategy.name.clone(),
      subject: subject.to_string(),
      status,
      started_at,
      finished_at: Utc::now().to_rfc3339(),
      steps,
      context: ctx.entries,
      failure,
    }
  }

  /// Runs one operation with the retry policy, per-attempt timeout and
  /// cancellation applied. The instruction is resolved exactly once; every
  /// attempt reuses the prepared form.
  async fn run_step(
    &self,
    runner: &OperationRunner<'a>,
    op: &OperationSpec,
    ctx: &ExecutionContext,
  ) -> StepOutcome {
    let prepared = match runner.prepare(op, ctx) {
      Ok(p) => p,
      Err(e) => {
        return StepOutcome::Failure {
          kind: op.kind(),
          resolved_instruction: None,
          attempts: 0,
          reason: e.to_string(),
        };
      }
    };

    let mut attempts = 0u32;
    loop {
      attempts += 1;
      let attempt = tokio::time::timeout(
        self.options.step_timeout,
        runner.run_prepared(&prepared, ctx),
      );
      let outcome = tokio::select! {
        _ = self.options.cancel.cancelled() => {
          return StepOutcome::Failure {
            kind: prepared.kind,
            resolved_instruction: Some(prepared.resolved_instruction.clone()),
            attempts,
            reason: "cancelled".to_string(),
          };
        }
        res = attempt => match res {
          Ok(inner) => inner,
          Err(_elapsed) => Err(StepError::Backend(BackendError::Timeout(
            self.options.step_timeout.as_millis() as u64,
          ))),
        },
      };

      match outcome {
        Ok(result) => return StepOutcome::Success { result, attempts },
        Err(e) if e.is_retryable() && attempts < self.options.retry.max_attempts => {
          let backoff = self.options.retry.backoff_after(attempts);
          warn!(
            operation = %prepared.operation,
            attempt = attempts,
            backoff_ms = backoff.as_millis() as u64,
            error = %e,
            "retrying step"
          );
          tokio::select! {
            _ = self.options.cancel.cancelled() => {
              return StepOutcome::Failure {
                kind: prepared.kind,
                resolved_instruction: Some(prepared.resolved_instruction.clone()),
                attempts,
                reason: "cancelled".to_string(),
              };
            }
            _ = tokio::time::sleep(backoff) => {}
          }
        }
        Err(e) => {
          return StepOutcome::Failure {
            kind: prepared.kind,
            resolved_instruction: Some(prepared.resolved_instruction.clone()),
            attempts,
            reason: e.to_string(),
          };
        }
      }
    }
  }
}
