//! Per-session state and environment credential resolution.

use std::env;
use std::fmt;

use crate::core::settings::GenerationSettings;
use crate::core::transcript::Transcript;
use crate::utils::logging::LoggingState;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Everything one chat session owns: the conversation so far, the generation
/// settings it was started with, and the optional transcript log.
pub struct SessionContext {
    pub transcript: Transcript,
    pub settings: GenerationSettings,
    pub logging: LoggingState,
}

impl SessionContext {
    /// Build a fresh session with the opening greeting already seeded.
    pub fn new(settings: GenerationSettings, logging: LoggingState) -> Self {
        let mut transcript = Transcript::new();
        transcript.initialize();
        Self {
            transcript,
            settings,
            logging,
        }
    }
}

/// API credentials taken from the environment at startup.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug)]
pub struct CredentialsError {
    pub message: String,
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CredentialsError {}

/// Read `OPENAI_API_KEY` and `OPENAI_BASE_URL` from the environment.
///
/// A missing key is a startup error with setup guidance; a missing base URL
/// falls back to the official OpenAI endpoint.
pub fn resolve_env_credentials() -> Result<EnvCredentials, CredentialsError> {
    let api_key = env::var("OPENAI_API_KEY").map_err(|_| CredentialsError {
        message: "OPENAI_API_KEY environment variable not set\n\nTo get started, set your OpenAI API key:\n  export OPENAI_API_KEY=\"your-api-key-here\"\n\nOptionally, point at another OpenAI-compatible endpoint:\n  export OPENAI_BASE_URL=\"https://api.openai.com/v1\"".to_string(),
    })?;

    let base_url =
        env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());

    Ok(EnvCredentials { api_key, base_url })
}

pub(crate) fn initialize_logging(log_file: Option<String>) -> LoggingState {
    let mut logging = LoggingState::new(log_file.clone());
    if let Some(log_path) = log_file {
        if let Err(e) = logging.set_log_file(log_path.clone()) {
            eprintln!(
                "Warning: Failed to enable startup logging ({}): {}",
                log_path, e
            );
        }
    }
    logging
}
