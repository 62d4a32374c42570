//! Generative backend seam: the component that turns a resolved instruction
//! plus accumulated context into free text. Consumed, not implemented here.

use async_trait::async_trait;
use thiserror::Error;

/// Failure of one generative call. Every variant is retryable per the run's
/// retry policy; exhausting the policy turns it into a partial-trace
/// condition for the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
  #[error("backend transport failure: {0}")]
  Transport(String),
  #[error("backend call timed out after {0} ms")]
  Timeout(u64),
  #[error("backend quota exhausted: {0}")]
  Quota(String),
}

/// Opaque generative capability: resolved instruction and context transcript
/// in, free text out.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
  /// Produces text for `instruction` given the accumulated `context`.
  async fn generate(&self, instruction: &str, context: &str) -> Result<String, BackendError>;
}
