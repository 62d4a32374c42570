//! Placeholder resolution for operation instructions.
//!
//! Instructions reference the run subject as `{{subject}}` and any earlier
//! operation's output as `{{operation_name}}`. An unresolved reference is a
//! hard error, never a silent no-op: later steps likely depend on the missing
//! value.

use crate::types::ExecutionContext;
use thiserror::Error;
use tracing::instrument;

/// Reference name that resolves to the run subject.
pub const SUBJECT_REFERENCE: &str = "subject";

/// Placeholder resolution failure. Fatal to the current run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
  #[error("instruction references '{reference}', which is not the subject or a completed operation")]
  UnresolvedReference { reference: String },
  #[error("unterminated '{{{{' placeholder at byte {at}")]
  UnterminatedPlaceholder { at: usize },
}

/// Resolves `{{name}}` placeholders in `instruction` against the subject and
/// the completed-operation outputs in `ctx`. Text outside placeholders passes
/// through unchanged.
#[instrument(level = "trace", skip(instruction, ctx))]
pub fn resolve(instruction: &str, ctx: &ExecutionContext) -> Result<String, TemplateError> {
  let mut out = String::with_capacity(instruction.len());
  let mut rest = instruction;
  let mut offset = 0usize;

  while let Some(open) = rest.find("{{") {
    out.push_str(&rest[..open]);
    let body = &rest[open + 2..];
    let Some(close) = body.find("}}") else {
      return Err(TemplateError::UnterminatedPlaceholder { at: offset + open });
    };
    let reference = body[..close].trim();
    let value = if reference == SUBJECT_REFERENCE {
      Some(ctx.subject.as_str())
    } else {
      ctx.output(reference)
    };
    match value {
      Some(v) => out.push_str(v),
      None => {
        return Err(TemplateError::UnresolvedReference {
          reference: reference.to_string(),
        });
      }
    }
    offset += open + 2 + close + 2;
    rest = &body[close + 2..];
  }

  out.push_str(rest);
  Ok(out)
}

/// Returns the references named by `instruction`'s placeholders, in order of
/// appearance. Malformed placeholders yield the same errors as [resolve];
/// useful for validating instructions without a live context.
pub fn references(instruction: &str) -> Result<Vec<String>, TemplateError> {
  let mut refs = Vec::new();
  let mut rest = instruction;
  let mut offset = 0usize;
  while let Some(open) = rest.find("{{") {
    let body = &rest[open + 2..];
    let Some(close) = body.find("}}") else {
      return Err(TemplateError::UnterminatedPlaceholder { at: offset + open });
    };
    refs.push(body[..close].trim().to_string());
    offset += open + 2 + close + 2;
    rest = &body[close + 2..];
  }
  Ok(refs)
}
