//! A declarative creativity strategy (the canonical persisted JSON shape).

use serde::{Deserialize, Serialize};

use super::OperationSpec;

/// A declarative creativity strategy: named, theory-attributed, with an
/// ordered list of operations. Operation order is load-bearing; later
/// instructions reference earlier outputs.
///
/// `theory_base`, `description` and `example` are documentation, not
/// executable fields; absence is permitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDefinition {
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub theory_base: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  pub operations: Vec<OperationSpec>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub example: Option<String>,
}

impl StrategyDefinition {
  /// Looks up an operation by name.
  pub fn operation(&self, name: &str) -> Option<&OperationSpec> {
    self.operations.iter().find(|o| o.name == name)
  }
}
