//! # ideaweave
//!
//! Creativity strategies as declarative data, executed as ordered pipelines
//! against a generative backend with full provenance.
//!
//! ## Architecture
//!
//! A validated [StrategyCatalog] serves [StrategyDefinition]s; the
//! [PipelineExecutor] walks each strategy's operations strictly in declared
//! order, threading an append-only [ExecutionContext], and always returns an
//! [ExecutionTrace] (per-run failures are folded into the trace, never
//! raised). Draw-style operations pull from a [DirectiveSource] instead of
//! the backend; the recorded draws make traces replayable via
//! [RecordedDirectives]. [StrategyEngine] ties the pieces together as the
//! exposed execution API.

pub mod artifact;
#[cfg(test)]
mod artifact_test;
pub mod backend;
pub mod catalog;
pub mod directive;
pub mod engine;
pub mod executor;
pub mod runner;
pub mod template;
pub mod trace_io;
pub mod types;

pub use artifact::IdeaArtifact;
pub use backend::{BackendError, GenerativeBackend};
pub use catalog::{
  CatalogError, NotFoundError, StrategyCatalog, ValidationDefect, ValidationError,
};
pub use directive::{
  CardDeck, DealtDeck, DirectiveSource, DrawSourceExhausted, RecordedDirectives,
};
pub use engine::StrategyEngine;
pub use executor::{PipelineExecutor, RetryPolicy, RunOptions};
pub use runner::{OperationResult, OperationRunner, PreparedOperation, StepError};
pub use template::TemplateError;
pub use types::{
  ContextEntry, ExecutionContext, ExecutionTrace, OperationKind, OperationSpec, RunFailure,
  StepRecord, StepStatus, StrategyDefinition, TraceStatus,
};
