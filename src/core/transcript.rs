//! Append-only conversation transcript.

use std::collections::VecDeque;

use crate::core::constants::GREETING;
use crate::core::message::{Message, Role};

/// Ordered record of every turn in the current session.
///
/// Turns are only ever appended; nothing edits or reorders history. The whole
/// transcript is re-sent on every completion request, so memory use and
/// request size grow without bound over a long session.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: VecDeque<Message>,
    initialized: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the opening assistant greeting exactly once.
    ///
    /// Calling this again is a no-op, including after [`clear`], so a cleared
    /// conversation stays empty instead of re-greeting.
    ///
    /// [`clear`]: Transcript::clear
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.turns.push_back(Message::assistant(GREETING));
        self.initialized = true;
    }

    /// Append one turn to the end of the transcript.
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push_back(Message::new(role, content));
    }

    pub fn push(&mut self, message: Message) {
        self.turns.push_back(message);
    }

    /// Drop every stored turn. The initialized flag survives.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.turns.back()
    }
}
