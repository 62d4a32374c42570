//! Strategy pipeline types: the canonical strategy shape and the run records
//! produced by the executor.
//!
//! [StrategyDefinition] and [OperationSpec] mirror the persisted JSON;
//! [ExecutionContext], [StepRecord] and [ExecutionTrace] are produced while a
//! run is in flight and after it ends.

mod execution_context;
mod execution_trace;
mod operation;
mod step_record;
#[cfg(test)]
mod step_record_test;
mod strategy;
#[cfg(test)]
mod strategy_test;

pub use execution_context::{ContextEntry, ExecutionContext};
pub use execution_trace::{ExecutionTrace, RunFailure, TraceStatus};
pub use operation::{OperationKind, OperationSpec};
pub use step_record::{StepRecord, StepStatus};
pub use strategy::StrategyDefinition;
