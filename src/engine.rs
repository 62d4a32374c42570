//! Execution API: strategy runs over a validated catalog and the injected
//! backend/directive seams.

use crate::backend::GenerativeBackend;
use crate::catalog::{NotFoundError, StrategyCatalog};
use crate::directive::DirectiveSource;
use crate::executor::{PipelineExecutor, RunOptions};
use crate::types::ExecutionTrace;
use std::sync::Arc;
use tracing::instrument;

/// Entry point for strategy execution: one validated catalog plus the shared
/// backend and directive-source seams. The catalog and both seams are
/// read-only from the engine's perspective, so independent runs may execute
/// concurrently against the same engine.
pub struct StrategyEngine {
  catalog: StrategyCatalog,
  backend: Arc<dyn GenerativeBackend>,
  directives: Arc<dyn DirectiveSource>,
  options: RunOptions,
}

impl StrategyEngine {
  pub fn new(
    catalog: StrategyCatalog,
    backend: Arc<dyn GenerativeBackend>,
    directives: Arc<dyn DirectiveSource>,
  ) -> Self {
    Self {
      catalog,
      backend,
      directives,
      options: RunOptions::default(),
    }
  }

  /// Replaces the default run options (retry policy, step timeout,
  /// cancellation token).
  pub fn with_options(mut self, options: RunOptions) -> Self {
    self.options = options;
    self
  }

  pub fn catalog(&self) -> &StrategyCatalog {
    &self.catalog
  }

  /// Every loaded strategy name, in stable order.
  pub fn list_strategies(&self) -> Vec<&str> {
    self.catalog.list()
  }

  /// Looks up the strategy and runs it against `subject`. An unknown name
  /// fails here, before any backend call; per-run failures come back inside
  /// the returned trace.
  #[instrument(level = "trace", skip(self, subject))]
  pub async fn run_strategy(
    &self,
    name: &str,
    subject: &str,
  ) -> Result<ExecutionTrace, NotFoundError> {
    let strategy = self.catalog.get(name)?;
    let executor = PipelineExecutor::new(
      self.backend.as_ref(),
      self.directives.as_ref(),
      self.options.clone(),
    );
    Ok(executor.run(strategy, subject).await)
  }
}
