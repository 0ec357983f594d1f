//! Shared constants used across the application

/// Opening assistant turn seeded into every new conversation.
pub const GREETING: &str = "Hi! I'm your Python programming helper. Ask me about Python syntax, standard library, debugging, best practices, algorithms, data structures, type hints, packaging, testing, or performance tips.";

/// Instruction sent ahead of the conversation on every completion request.
/// It is injected at request time and never stored in the transcript.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Placeholder rendered in the reply slot while a completion is in flight.
pub const THINKING_INDICATOR: &str = "Thinking...";
