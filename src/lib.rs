//! Charmeur is a terminal chat assistant for Python programming questions.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns runtime state, the conversation transcript, generation
//!   settings, and session configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that drives user input and display updates.
//! - [`commands`] implements slash-command parsing and command execution used
//!   by the chat loop.
//! - [`api`] defines chat payloads and the completion client that talks to
//!   OpenAI-compatible endpoints.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which initializes and dispatches into
//! [`core::app`] and [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
