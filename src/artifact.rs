//! Idea artifact: the persisted product of a completed run.

use crate::types::ExecutionTrace;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;
use uuid::Uuid;

/// A produced idea with its provenance metadata, persisted as `<id>.json`
/// under an output directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaArtifact {
  pub id: Uuid,
  /// Strategy that produced the idea.
  pub strategy: String,
  /// The original subject input.
  pub subject: String,
  /// Final idea text: the last completed operation's output.
  pub idea: String,
  pub created_at: DateTime<Utc>,
  /// Number of executed steps behind the idea.
  pub steps: u32,
}

impl IdeaArtifact {
  /// Builds an artifact from a complete trace. Returns None for partial
  /// traces and for traces with no output.
  pub fn from_trace(trace: &ExecutionTrace) -> Option<Self> {
    if !trace.is_complete() {
      return None;
    }
    let idea = trace.final_output()?;
    Some(Self {
      id: Uuid::new_v4(),
      strategy: trace.strategy.clone(),
      subject: trace.subject.clone(),
      idea: idea.to_string(),
      created_at: Utc::now(),
      steps: trace.steps.len() as u32,
    })
  }

  /// Saves to `dir/<id>.json`; creates the directory if needed. Returns the
  /// written path.
  #[instrument(level = "trace", skip(self, dir))]
  pub fn save(&self, dir: &Path) -> Result<PathBuf, std::io::Error> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", self.id));
    let json = serde_json::to_string_pretty(self)
      .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    std::fs::write(&path, json)?;
    Ok(path)
  }

  /// Loads an artifact from `path`. Returns error if the file is missing or
  /// invalid JSON.
  pub fn load(path: &Path) -> Result<Self, std::io::Error> {
    let bytes = std::fs::read(path)?;
    serde_json::from_slice(&bytes)
      .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
  }
}
