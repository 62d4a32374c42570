//! Execute a single operation against the accumulated context.
//!
//! The runner resolves the instruction once ([OperationRunner::prepare]),
//! then runs attempts against the prepared form so retries reuse the same
//! resolved instruction. It never mutates the context; the executor appends
//! results after a step succeeds.

use crate::backend::{BackendError, GenerativeBackend};
use crate::directive::{DirectiveSource, DrawSourceExhausted};
use crate::template::{self, TemplateError};
use crate::types::{ExecutionContext, OperationKind, OperationSpec};
use thiserror::Error;
use tracing::instrument;

/// Why a single operation attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
  /// A referenced value does not exist in context. Fatal: later steps likely
  /// depend on it.
  #[error(transparent)]
  Template(#[from] TemplateError),
  /// Generative call failed. Retryable per policy.
  #[error(transparent)]
  Backend(#[from] BackendError),
  /// No directive available. Fatal for the run.
  #[error(transparent)]
  DrawExhausted(#[from] DrawSourceExhausted),
}

impl StepError {
  /// True for failures the executor may retry.
  pub fn is_retryable(&self) -> bool {
    matches!(self, StepError::Backend(_))
  }
}

/// An operation with its instruction already resolved. Retries reuse this.
#[derive(Debug, Clone)]
pub struct PreparedOperation {
  pub operation: String,
  pub kind: OperationKind,
  pub resolved_instruction: String,
}

/// Result of one successfully executed operation.
#[derive(Debug, Clone)]
pub struct OperationResult {
  pub operation: String,
  pub kind: OperationKind,
  pub resolved_instruction: String,
  /// The produced text; for draw operations this is the drawn directive.
  pub text: String,
  /// Drawn directive for draw operations, verbatim.
  pub directive: Option<String>,
}

/// Executes single operations; stateless beyond the injected seams.
pub struct OperationRunner<'a> {
  backend: &'a dyn GenerativeBackend,
  directives: &'a dyn DirectiveSource,
}

impl<'a> OperationRunner<'a> {
  pub fn new(backend: &'a dyn GenerativeBackend, directives: &'a dyn DirectiveSource) -> Self {
    Self {
      backend,
      directives,
    }
  }

  /// Resolves the operation's instruction against the context. Resolution
  /// happens once per step, before the first attempt.
  #[instrument(level = "trace", skip(self, op, ctx), fields(operation = %op.name))]
  pub fn prepare(
    &self,
    op: &OperationSpec,
    ctx: &ExecutionContext,
  ) -> Result<PreparedOperation, TemplateError> {
    let resolved = template::resolve(&op.instruction, ctx)?;
    Ok(PreparedOperation {
      operation: op.name.clone(),
      kind: op.kind(),
      resolved_instruction: resolved,
    })
  }

  /// Runs one attempt of a prepared operation.
  pub async fn run_prepared(
    &self,
    prepared: &PreparedOperation,
    ctx: &ExecutionContext,
  ) -> Result<OperationResult, StepError> {
    match prepared.kind {
      OperationKind::Draw => {
        let card = self.directives.draw()?;
        Ok(OperationResult {
          operation: prepared.operation.clone(),
          kind: OperationKind::Draw,
          resolved_instruction: prepared.resolved_instruction.clone(),
          text: card.clone(),
          directive: Some(card),
        })
      }
      OperationKind::Generative => {
        let text = self
          .backend
          .generate(&prepared.resolved_instruction, &ctx.transcript())
          .await?;
        Ok(OperationResult {
          operation: prepared.operation.clone(),
          kind: OperationKind::Generative,
          resolved_instruction: prepared.resolved_instruction.clone(),
          text,
          directive: None,
        })
      }
    }
  }

  /// Resolves and runs the operation once (no retry).
  pub async fn execute(
    &self,
    op: &OperationSpec,
    ctx: &ExecutionContext,
  ) -> Result<OperationResult, StepError> {
    let prepared = self.prepare(op, ctx)?;
    self.run_prepared(&prepared, ctx).await
  }
}
