//! Accumulator threaded through one pipeline run.

use serde::{Deserialize, Serialize};

/// One appended entry: a completed operation's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
  pub operation: String,
  pub output: String,
}

/// Accumulator for one in-flight run: the subject plus every completed
/// operation's output in execution order. Append-only; entries are never
/// rewritten. Owned by exactly one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
  /// Name of the strategy being executed.
  pub strategy: String,
  /// The original subject input.
  pub subject: String,
  /// Completed-operation outputs, insertion order preserved.
  pub entries: Vec<ContextEntry>,
}

impl ExecutionContext {
  pub fn new(strategy: impl Into<String>, subject: impl Into<String>) -> Self {
    Self {
      strategy: strategy.into(),
      subject: subject.into(),
      entries: Vec::new(),
    }
  }

  /// Output of a completed operation, if present.
  pub fn output(&self, operation: &str) -> Option<&str> {
    self
      .entries
      .iter()
      .find(|e| e.operation == operation)
      .map(|e| e.output.as_str())
  }

  /// Appends the just-completed operation's output. The executor calls this
  /// exactly once per operation; it must not repeat an operation name.
  pub fn push(&mut self, operation: impl Into<String>, output: impl Into<String>) {
    let operation = operation.into();
    debug_assert!(
      self.output(&operation).is_none(),
      "duplicate context entry for operation '{operation}'"
    );
    self.entries.push(ContextEntry {
      operation,
      output: output.into(),
    });
  }

  /// Text rendering of the accumulated context, fed to the backend alongside
  /// each resolved instruction.
  pub fn transcript(&self) -> String {
    let mut out = format!("subject: {}", self.subject);
    for e in &self.entries {
      out.push('\n');
      out.push_str(&e.operation);
      out.push_str(": ");
      out.push_str(&e.output);
    }
    out
  }
}
