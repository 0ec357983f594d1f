//! Generation settings: which model to query and how much it may wander.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Temperature used when neither the command line nor the config file sets one.
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// The closed set of models the assistant can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModelId {
    Gpt4,
    Gpt35Turbo,
}

impl ModelId {
    pub const ALL: [ModelId; 2] = [ModelId::Gpt4, ModelId::Gpt35Turbo];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelId::Gpt4 => "gpt-4",
            ModelId::Gpt35Turbo => "gpt-3.5-turbo",
        }
    }

    /// Comma-separated list of every accepted model name, for error messages
    /// and the `/model` command.
    pub fn options() -> String {
        Self::ALL
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for ModelId {
    fn default() -> Self {
        ModelId::Gpt4
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ModelId {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "gpt-4" => Ok(ModelId::Gpt4),
            "gpt-3.5-turbo" => Ok(ModelId::Gpt35Turbo),
            _ => Err(format!(
                "Unknown model: {} (options: {})",
                value,
                ModelId::options()
            )),
        }
    }
}

impl TryFrom<String> for ModelId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ModelId::try_from(value.as_str())
    }
}

impl From<ModelId> for String {
    fn from(model: ModelId) -> Self {
        model.as_str().to_string()
    }
}

/// Check a temperature against the accepted range.
pub fn validate_temperature(value: f64) -> Result<f64, String> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "Temperature must be between 0.0 and 1.0 (got {})",
            value
        ))
    }
}

/// Model and temperature used for every completion request in a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub model: ModelId,
    pub temperature: f64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: ModelId::default(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl GenerationSettings {
    /// Combine command-line flags and config-file defaults into one settings
    /// value. Flags win over config, config wins over the built-in defaults.
    pub fn resolve(
        cli_model: Option<&str>,
        cli_temperature: Option<f64>,
        config_model: Option<ModelId>,
        config_temperature: Option<f64>,
    ) -> Result<Self, String> {
        let model = match cli_model {
            Some(name) => ModelId::try_from(name)?,
            None => config_model.unwrap_or_default(),
        };

        let temperature = match cli_temperature {
            Some(value) => validate_temperature(value)?,
            None => match config_temperature {
                Some(value) => validate_temperature(value)?,
                None => DEFAULT_TEMPERATURE,
            },
        };

        Ok(Self { model, temperature })
    }

    pub fn set_model(&mut self, name: &str) -> Result<(), String> {
        self.model = ModelId::try_from(name)?;
        Ok(())
    }

    pub fn set_temperature(&mut self, value: f64) -> Result<(), String> {
        self.temperature = validate_temperature(value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_names_round_trip() {
        for model in ModelId::ALL {
            assert_eq!(ModelId::try_from(model.as_str()).unwrap(), model);
        }
    }

    #[test]
    fn unknown_model_is_rejected_with_options() {
        let err = ModelId::try_from("gpt-5").unwrap_err();
        assert!(err.contains("Unknown model: gpt-5"));
        assert!(err.contains("gpt-4, gpt-3.5-turbo"));
    }

    #[test]
    fn temperature_range_is_inclusive() {
        assert!(validate_temperature(0.0).is_ok());
        assert!(validate_temperature(1.0).is_ok());
        assert!(validate_temperature(-0.1).is_err());
        assert!(validate_temperature(1.5).is_err());
    }

    #[test]
    fn defaults_are_gpt4_at_low_temperature() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.model, ModelId::Gpt4);
        assert_eq!(settings.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn resolve_prefers_flags_over_config() {
        let settings = GenerationSettings::resolve(
            Some("gpt-3.5-turbo"),
            Some(0.7),
            Some(ModelId::Gpt4),
            Some(0.1),
        )
        .unwrap();

        assert_eq!(settings.model, ModelId::Gpt35Turbo);
        assert_eq!(settings.temperature, 0.7);
    }

    #[test]
    fn resolve_falls_back_to_config_then_defaults() {
        let from_config =
            GenerationSettings::resolve(None, None, Some(ModelId::Gpt35Turbo), Some(0.9)).unwrap();
        assert_eq!(from_config.model, ModelId::Gpt35Turbo);
        assert_eq!(from_config.temperature, 0.9);

        let built_in = GenerationSettings::resolve(None, None, None, None).unwrap();
        assert_eq!(built_in, GenerationSettings::default());
    }

    #[test]
    fn resolve_rejects_out_of_range_flag() {
        let err = GenerationSettings::resolve(None, Some(2.0), None, None).unwrap_err();
        assert!(err.contains("between 0.0 and 1.0"));
    }

    #[test]
    fn set_model_updates_in_place() {
        let mut settings = GenerationSettings::default();
        settings.set_model("gpt-3.5-turbo").unwrap();
        assert_eq!(settings.model, ModelId::Gpt35Turbo);

        assert!(settings.set_model("nonsense").is_err());
        assert_eq!(settings.model, ModelId::Gpt35Turbo);
    }
}
