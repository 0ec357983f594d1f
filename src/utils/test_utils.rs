#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::env;
#[cfg(test)]
use std::path::Path;
#[cfg(test)]
use std::sync::{Mutex, MutexGuard, OnceLock};

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use tempfile::TempDir;

#[cfg(test)]
use crate::api::error::GenerationError;
#[cfg(test)]
use crate::api::CompletionBackend;
#[cfg(test)]
use crate::core::app::App;
#[cfg(test)]
use crate::core::session::SessionContext;
#[cfg(test)]
use crate::core::settings::GenerationSettings;
#[cfg(test)]
use crate::core::transcript::Transcript;
#[cfg(test)]
use crate::utils::logging::LoggingState;

#[cfg(test)]
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

#[cfg(test)]
fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Serializes environment mutation across tests and restores the previous
/// values on drop.
#[cfg(test)]
pub struct TestEnvVarGuard {
    _lock: MutexGuard<'static, ()>,
    saved: HashMap<String, Option<String>>,
}

#[cfg(test)]
impl TestEnvVarGuard {
    pub fn new() -> Self {
        Self {
            _lock: env_lock(),
            saved: HashMap::new(),
        }
    }

    pub fn set_var(&mut self, key: &str, value: &str) {
        self.save(key);
        env::set_var(key, value);
    }

    pub fn remove_var(&mut self, key: &str) {
        self.save(key);
        env::remove_var(key);
    }

    fn save(&mut self, key: &str) {
        self.saved
            .entry(key.to_string())
            .or_insert_with(|| env::var(key).ok());
    }
}

#[cfg(test)]
impl Drop for TestEnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain() {
            match value {
                Some(value) => env::set_var(&key, value),
                None => env::remove_var(&key),
            }
        }
    }
}

/// Run `f` with `CHARMEUR_CONFIG_DIR` pointed at a fresh temp directory.
#[cfg(test)]
pub fn with_test_config_env<F: FnOnce(&Path)>(f: F) {
    let mut guard = TestEnvVarGuard::new();
    let dir = TempDir::new().expect("temp config dir");
    guard.set_var("CHARMEUR_CONFIG_DIR", &dir.path().to_string_lossy());
    f(dir.path());
}

/// Backend that always answers with the same canned reply.
#[cfg(test)]
pub struct StaticBackend {
    reply: String,
}

#[cfg(test)]
impl StaticBackend {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl CompletionBackend for StaticBackend {
    async fn complete(
        &self,
        _settings: &GenerationSettings,
        _transcript: &Transcript,
    ) -> Result<String, GenerationError> {
        Ok(self.reply.clone())
    }
}

/// Backend that always fails with the given message.
#[cfg(test)]
pub struct FailingBackend {
    message: String,
}

#[cfg(test)]
impl FailingBackend {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl CompletionBackend for FailingBackend {
    async fn complete(
        &self,
        _settings: &GenerationSettings,
        _transcript: &Transcript,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::new(self.message.clone()))
    }
}

#[cfg(test)]
pub fn create_test_app() -> App {
    create_test_app_with_backend(Box::new(StaticBackend::new("Test reply")))
}

#[cfg(test)]
pub fn create_test_app_with_backend(backend: Box<dyn CompletionBackend + Send + Sync>) -> App {
    let session = SessionContext::new(GenerationSettings::default(), LoggingState::new(None));
    App::new(session, backend)
}
