//! A single named operation inside a strategy definition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Returns true if the operation name marks a draw-style operation.
pub(crate) fn name_is_draw(name: &str) -> bool {
  let name = name.trim();
  name.eq_ignore_ascii_case("draw") || name.to_ascii_lowercase().starts_with("draw_")
}

/// One operation in a strategy: an identifier (unique within its strategy)
/// plus a natural-language instruction template. The template may reference
/// `{{subject}}` and any earlier operation's output as `{{operation_name}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationSpec {
  pub name: String,
  pub instruction: String,
}

impl OperationSpec {
  /// Classifies this operation into the closed kind set.
  pub fn kind(&self) -> OperationKind {
    if name_is_draw(&self.name) {
      OperationKind::Draw
    } else {
      OperationKind::Generative
    }
  }
}

/// Closed set of operation kinds the runner dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
  /// Delegates to the generative backend with the resolved instruction.
  Generative,
  /// Delegates to the directive source; the drawn value is recorded verbatim.
  Draw,
}

impl fmt::Display for OperationKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      OperationKind::Generative => write!(f, "generative"),
      OperationKind::Draw => write!(f, "draw"),
    }
  }
}
