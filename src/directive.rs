//! Random-directive sources for draw-style operations.
//!
//! The one place true randomness enters a run, kept behind a narrow seam so
//! deterministic replay and tests can substitute a fixed sequence. Draws are
//! independent and not reproducible bit-for-bit; each drawn value is recorded
//! verbatim in the trace, which is the reproducibility contract for replay.

use crate::types::ExecutionTrace;
use rand::Rng;
use std::collections::VecDeque;
use std::sync::Mutex;
use thiserror::Error;

/// No directive available for a draw operation. Terminal for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("directive source exhausted")]
pub struct DrawSourceExhausted;

/// Supplies nondeterministic stimuli for draw operations. Shared across
/// concurrent runs; implementations must be safe for concurrent draws.
pub trait DirectiveSource: Send + Sync {
  fn draw(&self) -> Result<String, DrawSourceExhausted>;
}

/// Fixed pool drawn with replacement: a reusable card deck. Exhausted only
/// when the pool is empty.
#[derive(Debug, Clone)]
pub struct CardDeck {
  cards: Vec<String>,
}

impl CardDeck {
  pub fn new(cards: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      cards: cards.into_iter().map(Into::into).collect(),
    }
  }
}

impl DirectiveSource for CardDeck {
  fn draw(&self) -> Result<String, DrawSourceExhausted> {
    if self.cards.is_empty() {
      return Err(DrawSourceExhausted);
    }
    let i = rand::thread_rng().gen_range(0..self.cards.len());
    Ok(self.cards[i].clone())
  }
}

/// Pool dealt without replacement; exhausted once every card is out.
#[derive(Debug)]
pub struct DealtDeck {
  remaining: Mutex<Vec<String>>,
}

impl DealtDeck {
  pub fn new(cards: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      remaining: Mutex::new(cards.into_iter().map(Into::into).collect()),
    }
  }

  pub fn remaining(&self) -> usize {
    self.remaining.lock().expect("deck lock").len()
  }
}

impl DirectiveSource for DealtDeck {
  fn draw(&self) -> Result<String, DrawSourceExhausted> {
    let mut remaining = self.remaining.lock().expect("deck lock");
    if remaining.is_empty() {
      return Err(DrawSourceExhausted);
    }
    let i = rand::thread_rng().gen_range(0..remaining.len());
    Ok(remaining.swap_remove(i))
  }
}

/// Replays a recorded sequence of directives in order. Substituting a trace's
/// recorded draws makes everything downstream of them deterministic.
#[derive(Debug)]
pub struct RecordedDirectives {
  queue: Mutex<VecDeque<String>>,
}

impl RecordedDirectives {
  pub fn new(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      queue: Mutex::new(values.into_iter().map(Into::into).collect()),
    }
  }

  /// Builds a replay source from the draw values recorded in `trace`.
  pub fn from_trace(trace: &ExecutionTrace) -> Self {
    Self::new(trace.drawn_directives())
  }
}

impl DirectiveSource for RecordedDirectives {
  fn draw(&self) -> Result<String, DrawSourceExhausted> {
    self
      .queue
      .lock()
      .expect("replay queue lock")
      .pop_front()
      .ok_or(DrawSourceExhausted)
  }
}
