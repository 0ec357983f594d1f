//! Terminal UI layer for interactive chat sessions.
//!
//! The UI module owns rendering, keyboard handling, and loop control for the
//! text user interface.
//!
//! Key submodules include:
//! - [`chat_loop`]: the main interaction loop that dispatches user input to
//!   [`crate::commands`] and drives completions through [`crate::api`].
//! - [`renderer`]: view composition and frame output.
//!
//! Ownership boundary: this layer presents and captures interaction state, while
//! [`crate::core`] owns domain logic and backend coordination.

pub mod chat_loop;
pub mod renderer;
