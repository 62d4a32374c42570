//! Strategy catalog: parse, validate and serve strategy definitions.
//!
//! Validation rejects the whole load on any defect and reports every defect
//! found, each tagged with the offending strategy/operation, so a malformed
//! definition set can be fixed in one pass rather than iteratively.

use crate::types::StrategyDefinition;
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;
use tracing::{info, instrument};

/// One validation defect, tagged with the offending strategy/operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationDefect {
  #[error("strategy #{index} has an empty name")]
  EmptyStrategyName { index: usize },
  #[error("duplicate strategy name '{name}'")]
  DuplicateStrategyName { name: String },
  #[error("strategy '{strategy}' has no operations")]
  NoOperations { strategy: String },
  #[error("strategy '{strategy}' operation #{index} has an empty name")]
  EmptyOperationName { strategy: String, index: usize },
  #[error("strategy '{strategy}' repeats operation name '{operation}'")]
  DuplicateOperationName { strategy: String, operation: String },
  #[error("strategy '{strategy}' operation '{operation}' has an empty instruction")]
  EmptyInstruction { strategy: String, operation: String },
}

/// Aggregate validation failure: every defect found in the load, not just the
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
  pub defects: Vec<ValidationDefect>,
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "invalid strategy catalog ({} defects):", self.defects.len())?;
    for d in &self.defects {
      write!(f, "\n  - {d}")?;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationError {}

/// Catalog load failure: unparseable document or failed validation.
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("strategy document is not valid JSON: {0}")]
  Parse(#[from] serde_json::Error),
  #[error(transparent)]
  Validation(#[from] ValidationError),
}

/// Unknown strategy name. Fatal to the request only; the backend is never
/// invoked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no strategy named '{name}'")]
pub struct NotFoundError {
  pub name: String,
}

/// Validated, immutable set of strategy definitions with a stable order.
/// Safe for concurrent read access; loaded once per process.
#[derive(Debug, Clone)]
pub struct StrategyCatalog {
  strategies: Vec<StrategyDefinition>,
  index: HashMap<String, usize>,
}

impl StrategyCatalog {
  /// Parses the canonical JSON document (a list of strategy records) and
  /// validates it.
  #[instrument(level = "trace", skip(source))]
  pub fn from_json(source: &str) -> Result<Self, CatalogError> {
    let defs: Vec<StrategyDefinition> = serde_json::from_str(source)?;
    Ok(Self::load(defs)?)
  }

  /// Validates and indexes the given definitions. On any defect the whole
  /// load is rejected, with every defect reported.
  pub fn load(defs: Vec<StrategyDefinition>) -> Result<Self, ValidationError> {
    let defects = validate(&defs);
    if !defects.is_empty() {
      return Err(ValidationError { defects });
    }
    let mut index = HashMap::with_capacity(defs.len());
    for (i, d) in defs.iter().enumerate() {
      index.insert(d.name.clone(), i);
    }
    info!(strategies = defs.len(), "strategy catalog loaded");
    Ok(Self {
      strategies: defs,
      index,
    })
  }

  pub fn get(&self, name: &str) -> Result<&StrategyDefinition, NotFoundError> {
    self
      .index
      .get(name)
      .map(|&i| &self.strategies[i])
      .ok_or_else(|| NotFoundError {
        name: name.to_string(),
      })
  }

  /// Every loaded strategy name, in load order.
  pub fn list(&self) -> Vec<&str> {
    self.strategies.iter().map(|s| s.name.as_str()).collect()
  }

  pub fn len(&self) -> usize {
    self.strategies.len()
  }

  pub fn is_empty(&self) -> bool {
    self.strategies.is_empty()
  }
}

/// Collects every validation defect in the definition list.
#[instrument(level = "trace", skip(defs))]
pub(crate) fn validate(defs: &[StrategyDefinition]) -> Vec<ValidationDefect> {
  let mut defects = Vec::new();
  let mut seen_names: HashSet<&str> = HashSet::new();

  for (i, def) in defs.iter().enumerate() {
    let name = def.name.trim();
    if name.is_empty() {
      defects.push(ValidationDefect::EmptyStrategyName { index: i });
    } else if !seen_names.insert(name) {
      defects.push(ValidationDefect::DuplicateStrategyName {
        name: name.to_string(),
      });
    }
    // Defects below are tagged by strategy name; fall back to the index for
    // unnamed strategies.
    let strategy = if name.is_empty() {
      format!("#{i}")
    } else {
      name.to_string()
    };

    if def.operations.is_empty() {
      defects.push(ValidationDefect::NoOperations {
        strategy: strategy.clone(),
      });
    }

    let mut seen_ops: HashSet<&str> = HashSet::new();
    for (j, op) in def.operations.iter().enumerate() {
      let op_name = op.name.trim();
      if op_name.is_empty() {
        defects.push(ValidationDefect::EmptyOperationName {
          strategy: strategy.clone(),
          index: j,
        });
      } else if !seen_ops.insert(op_name) {
        defects.push(ValidationDefect::DuplicateOperationName {
          strategy: strategy.clone(),
          operation: op_name.to_string(),
        });
      }
      if op.instruction.trim().is_empty() {
        defects.push(ValidationDefect::EmptyInstruction {
          strategy: strategy.clone(),
          operation: if op_name.is_empty() {
            format!("#{j}")
          } else {
            op_name.to_string()
          },
        });
      }
    }
  }

  defects
}
