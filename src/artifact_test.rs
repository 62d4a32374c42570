//! Tests for `artifact`.

use crate::artifact::IdeaArtifact;
use crate::types::{
  ContextEntry, ExecutionTrace, OperationKind, RunFailure, StepRecord, StepStatus, TraceStatus,
};

fn trace(status: TraceStatus, steps: Vec<StepRecord>) -> ExecutionTrace {
  ExecutionTrace {
    strategy: "Random Stimulus".to_string(),
    subject: "a kettle".to_string(),
    status,
    started_at: "2026-08-06T10:00:00+00:00".to_string(),
    finished_at: "2026-08-06T10:00:02+00:00".to_string(),
    steps,
    context: vec![ContextEntry {
      operation: "connect".to_string(),
      output: "a kettle that whistles a melody".to_string(),
    }],
    failure: if status == TraceStatus::Partial {
      Some(RunFailure {
        operation: "connect".to_string(),
        reason: "backend transport failure: boom".to_string(),
      })
    } else {
      None
    },
  }
}

fn succeeded_step(operation: &str, output: &str) -> StepRecord {
  StepRecord {
    operation: operation.to_string(),
    kind: OperationKind::Generative,
    status: StepStatus::Succeeded,
    resolved_instruction: Some("resolved".to_string()),
    output: Some(output.to_string()),
    directive: None,
    attempts: 1,
    latency_ms: 2,
    failure_reason: None,
  }
}

#[test]
fn from_trace_takes_the_last_output_of_a_complete_run() {
  let t = trace(
    TraceStatus::Complete,
    vec![
      succeeded_step("draw_random_card", "candle"),
      succeeded_step("connect", "a kettle that whistles a melody"),
    ],
  );
  let artifact = IdeaArtifact::from_trace(&t).unwrap();
  assert_eq!(artifact.strategy, "Random Stimulus");
  assert_eq!(artifact.subject, "a kettle");
  assert_eq!(artifact.idea, "a kettle that whistles a melody");
  assert_eq!(artifact.steps, 2);
}

#[test]
fn partial_traces_produce_no_artifact() {
  let t = trace(
    TraceStatus::Partial,
    vec![succeeded_step("draw_random_card", "candle")],
  );
  assert!(IdeaArtifact::from_trace(&t).is_none());
}

#[test]
fn empty_complete_trace_produces_no_artifact() {
  let t = trace(TraceStatus::Complete, vec![]);
  assert!(IdeaArtifact::from_trace(&t).is_none());
}

#[test]
fn save_writes_id_named_file_and_load_round_trips() {
  let t = trace(
    TraceStatus::Complete,
    vec![succeeded_step("connect", "a kettle that whistles a melody")],
  );
  let artifact = IdeaArtifact::from_trace(&t).unwrap();
  let dir = tempfile::tempdir().unwrap();

  let path = artifact.save(dir.path()).unwrap();

  assert_eq!(
    path.file_name().unwrap().to_str().unwrap(),
    format!("{}.json", artifact.id)
  );
  let loaded = IdeaArtifact::load(&path).unwrap();
  assert_eq!(loaded.id, artifact.id);
  assert_eq!(loaded.idea, artifact.idea);
  assert_eq!(loaded.created_at, artifact.created_at);
}
