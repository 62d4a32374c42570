//! Tests for `types::step_record`.

use crate::types::{OperationKind, StepRecord, StepStatus};

#[test]
fn step_record_serializes_to_json() {
  let record = StepRecord {
    operation: "identify_trait".to_string(),
    kind: OperationKind::Generative,
    status: StepStatus::Succeeded,
    resolved_instruction: Some("Identify the most salient trait of Nike-Air shoe.".to_string()),
    output: Some("air cushioning".to_string()),
    directive: None,
    attempts: 1,
    latency_ms: 12,
    failure_reason: None,
  };
  let json = serde_json::to_string(&record).unwrap();
  let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
  assert_eq!(parsed["operation"], "identify_trait");
  assert_eq!(parsed["kind"], "generative");
  assert_eq!(parsed["status"], "succeeded");
  assert_eq!(parsed["attempts"], 1);
  assert_eq!(parsed["output"], "air cushioning");
  assert_eq!(parsed["failure_reason"], serde_json::Value::Null);
}

#[test]
fn failed_step_round_trips() {
  let record = StepRecord {
    operation: "draw_random_card".to_string(),
    kind: OperationKind::Draw,
    status: StepStatus::Failed,
    resolved_instruction: Some("Draw a stimulus card.".to_string()),
    output: None,
    directive: None,
    attempts: 1,
    latency_ms: 0,
    failure_reason: Some("directive source exhausted".to_string()),
  };
  let json = serde_json::to_string(&record).unwrap();
  let back: StepRecord = serde_json::from_str(&json).unwrap();
  assert_eq!(back.status, StepStatus::Failed);
  assert_eq!(back.kind, OperationKind::Draw);
  assert_eq!(
    back.failure_reason.as_deref(),
    Some("directive source exhausted")
  );
}

#[test]
fn status_displays_lowercase() {
  assert_eq!(StepStatus::Succeeded.to_string(), "succeeded");
  assert_eq!(StepStatus::Failed.to_string(), "failed");
}
