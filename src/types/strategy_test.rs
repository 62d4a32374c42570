//! Tests for `types::strategy`.

use crate::types::StrategyDefinition;

#[test]
fn parses_canonical_json_record() {
  let json = r#"
    {
      "name": "Replacement Template",
      "theory_base": "Goldenberg & Mazursky creativity templates",
      "description": "Replace the subject with a symbol of its key trait.",
      "operations": [
        {"name": "identify_trait", "instruction": "Identify the most salient trait of {{subject}}."},
        {"name": "replace", "instruction": "Replace {{subject}} with a symbol of {{identify_trait}}."}
      ],
      "example": "Nike-Air shoe: replace the shoe with a spring."
    }
  "#;
  let s: StrategyDefinition = serde_json::from_str(json).unwrap();
  assert_eq!(s.name, "Replacement Template");
  assert_eq!(
    s.theory_base.as_deref(),
    Some("Goldenberg & Mazursky creativity templates")
  );
  assert_eq!(s.operations.len(), 2);
  assert_eq!(s.operations[0].name, "identify_trait");
  assert_eq!(s.operations[1].name, "replace");
}

#[test]
fn documentation_fields_are_optional() {
  let json = r#"
    {
      "name": "Minimal",
      "operations": [{"name": "only", "instruction": "Do the thing to {{subject}}."}]
    }
  "#;
  let s: StrategyDefinition = serde_json::from_str(json).unwrap();
  assert_eq!(s.theory_base, None);
  assert_eq!(s.description, None);
  assert_eq!(s.example, None);
}

#[test]
fn operation_lookup_by_name() {
  let json = r#"
    {
      "name": "Two Steps",
      "operations": [
        {"name": "first", "instruction": "First on {{subject}}."},
        {"name": "second", "instruction": "Second, using {{first}}."}
      ]
    }
  "#;
  let s: StrategyDefinition = serde_json::from_str(json).unwrap();
  assert!(s.operation("second").is_some());
  assert!(s.operation("third").is_none());
}

#[test]
fn serialization_omits_absent_documentation_fields() {
  let json = r#"{"name": "Minimal", "operations": [{"name": "only", "instruction": "Go."}]}"#;
  let s: StrategyDefinition = serde_json::from_str(json).unwrap();
  let out = serde_json::to_string(&s).unwrap();
  assert!(!out.contains("theory_base"));
  assert!(!out.contains("example"));
}
