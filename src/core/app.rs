//! Central application state for the chat loop.

use crate::api::error::GenerationError;
use crate::api::CompletionBackend;
use crate::core::message::Role;
use crate::core::session::SessionContext;

/// Mutable state behind the chat screen.
///
/// One submission is in flight at most. `pending` is set while the backend
/// call runs and the whole loop waits on it, so every field here is only
/// touched from the event loop.
pub struct App {
    pub session: SessionContext,
    pub backend: Box<dyn CompletionBackend + Send + Sync>,
    pub input: String,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub pending: bool,
    pub status: Option<String>,
    pub notice: Option<String>,
    pub error: Option<String>,
    pub exit_requested: bool,
}

impl App {
    pub fn new(session: SessionContext, backend: Box<dyn CompletionBackend + Send + Sync>) -> Self {
        Self {
            session,
            backend,
            input: String::new(),
            scroll_offset: 0,
            auto_scroll: true,
            pending: false,
            status: None,
            notice: None,
            error: None,
            exit_requested: false,
        }
    }

    pub fn set_status<S: Into<String>>(&mut self, s: S) {
        self.status = Some(s.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    /// Send one user message through the backend and record the outcome.
    ///
    /// The user turn is appended before the request goes out and stays in the
    /// transcript whether or not the request succeeds. A failure surfaces as
    /// [`App::error`] in place of an assistant reply.
    pub async fn submit(&mut self, text: String) {
        self.begin_submission(text);
        let result = self
            .backend
            .complete(&self.session.settings, &self.session.transcript)
            .await;
        self.finish_submission(result);
    }

    /// Record the outgoing user turn and mark a submission as pending.
    /// The chat loop draws one frame in this state before blocking on the
    /// backend, so the turn and the thinking indicator show up first.
    pub(crate) fn begin_submission(&mut self, text: String) {
        self.error = None;
        self.notice = None;
        self.clear_status();
        self.auto_scroll = true;

        if let Err(err) = self.session.logging.log_message(&format!("You: {text}")) {
            self.set_status(format!("Log error: {err}"));
        }
        self.session.transcript.append(Role::User, text);
        self.pending = true;
    }

    pub(crate) fn finish_submission(&mut self, result: Result<String, GenerationError>) {
        self.pending = false;
        match result {
            Ok(reply) => {
                if let Err(err) = self.session.logging.log_message(&reply) {
                    self.set_status(format!("Log error: {err}"));
                }
                self.session.transcript.append(Role::Assistant, reply);
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
    }

    /// Empty the conversation and reset the viewport. The greeting does not
    /// come back; a cleared session stays cleared.
    pub fn clear_conversation(&mut self) {
        self.session.transcript.clear();
        self.scroll_offset = 0;
        self.auto_scroll = true;
        self.error = None;
        self.notice = None;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
        self.auto_scroll = false;
    }

    /// Scroll toward the newest output. The renderer clamps the offset and
    /// re-enables follow mode once the bottom is reached.
    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }
}
