use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;

/// Appends chat traffic to a plain-text log file, togglable at runtime.
pub struct LoggingState {
    file_path: Option<String>,
    is_active: bool,
}

impl LoggingState {
    pub fn new(log_file: Option<String>) -> Self {
        LoggingState {
            file_path: log_file,
            is_active: false,
        }
    }

    pub fn set_log_file(&mut self, path: String) -> Result<String, Box<dyn std::error::Error>> {
        // Test if we can create/write to the file
        self.test_file_access(&path)?;

        self.file_path = Some(path.clone());
        self.is_active = true;
        self.write_to_log(&format!(
            "## Logging started at {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ))?;

        Ok(format!("Logging enabled to: {path}"))
    }

    pub fn toggle_logging(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        match &self.file_path {
            Some(path) => {
                if self.is_active {
                    // Write the pause marker BEFORE pausing
                    self.log_message("## Logging paused")?;
                    self.is_active = false;
                    Ok(format!("Logging paused (file: {path})"))
                } else {
                    self.is_active = true;
                    Ok(format!("Logging resumed to: {path}"))
                }
            }
            None => {
                Err("No log file specified. Use /log <filename> to enable logging first.".into())
            }
        }
    }

    pub fn log_message(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        if !self.is_active {
            return Ok(());
        }

        self.write_to_log(content)
    }

    fn write_to_log(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        let Some(file_path) = self.file_path.as_ref() else {
            return Ok(());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;

        let mut writer = BufWriter::with_capacity(64 * 1024, file);

        // Write each line of content, preserving the exact formatting
        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }

        // Empty line after each entry for spacing, matching the screen layout
        writeln!(writer)?;

        writer.flush()?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn get_status_string(&self) -> String {
        match (&self.file_path, self.is_active) {
            (None, _) => "disabled".to_string(),
            (Some(path), true) => format!(
                "active ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
            (Some(path), false) => format!(
                "paused ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
        }
    }

    fn test_file_access(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn enabling_writes_a_start_marker() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chat.log");

        let mut logging = LoggingState::new(None);
        let status = logging
            .set_log_file(path.to_string_lossy().to_string())
            .unwrap();

        assert!(status.starts_with("Logging enabled to:"));
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("## Logging started"));
    }

    #[test]
    fn messages_are_appended_with_spacing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chat.log");

        let mut logging = LoggingState::new(None);
        logging
            .set_log_file(path.to_string_lossy().to_string())
            .unwrap();
        logging.log_message("You: what is a generator?").unwrap();
        logging.log_message("A generator is a lazy iterator.").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("You: what is a generator?\n\n"));
        assert!(contents.ends_with("A generator is a lazy iterator.\n\n"));
    }

    #[test]
    fn inactive_logging_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chat.log");

        let logging = LoggingState::new(Some(path.to_string_lossy().to_string()));
        logging.log_message("should not appear").unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn toggle_pauses_and_resumes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chat.log");

        let mut logging = LoggingState::new(None);
        logging
            .set_log_file(path.to_string_lossy().to_string())
            .unwrap();

        let paused = logging.toggle_logging().unwrap();
        assert!(paused.starts_with("Logging paused"));
        assert!(!logging.is_active());

        let resumed = logging.toggle_logging().unwrap();
        assert!(resumed.starts_with("Logging resumed"));
        assert!(logging.is_active());

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("## Logging paused"));
    }

    #[test]
    fn toggle_without_file_is_an_error() {
        let mut logging = LoggingState::new(None);

        let err = logging.toggle_logging().unwrap_err();
        assert!(err.to_string().contains("No log file specified"));
    }

    #[test]
    fn status_string_reflects_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chat.log");

        let mut logging = LoggingState::new(None);
        assert_eq!(logging.get_status_string(), "disabled");

        logging
            .set_log_file(path.to_string_lossy().to_string())
            .unwrap();
        assert_eq!(logging.get_status_string(), "active (chat.log)");

        logging.toggle_logging().unwrap();
        assert_eq!(logging.get_status_string(), "paused (chat.log)");
    }
}
