//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

use std::error::Error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::core::settings::{validate_temperature, ModelId};
use crate::ui::chat_loop::run_chat;

#[derive(Parser)]
#[command(name = "charmeur")]
#[command(version)]
#[command(about = "A terminal chat assistant for Python programming questions")]
#[command(
    long_about = "Charmeur is a full-screen terminal assistant for Python programming questions. \
It keeps the whole conversation on screen, sends it to an OpenAI-compatible API, and renders \
replies with color-coded turns.\n\n\
Environment Variables:\n\
  OPENAI_API_KEY    Your API key (required)\n\
  OPENAI_BASE_URL   Custom API base URL (optional, defaults to https://api.openai.com/v1)\n\n\
Controls:\n\
  Type              Enter your question in the input field\n\
  Enter             Send the message\n\
  Up/Down/Mouse     Scroll through chat history\n\
  PageUp/PageDown   Scroll a screenful at a time\n\
  Ctrl+C            Quit the application\n\
  Backspace         Delete characters in the input field\n\n\
Commands:\n\
  /help             List all commands\n\
  /clear            Clear the conversation\n\
  /model [name]     Show or switch the model\n\
  /temperature <t>  Show or set the sampling temperature\n\
  /log [filename]   Enable, pause, or resume transcript logging\n\
  /dump [filename]  Export the conversation to a file\n\
  /quit             Exit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to use for chat (gpt-4 or gpt-3.5-turbo)
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature between 0.0 and 1.0
    #[arg(short = 't', long, value_name = "TEMP")]
    pub temperature: Option<f64>,

    /// Enable logging to specified file
    #[arg(short = 'l', long, value_name = "FILE")]
    pub log: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Set configuration values, or print them all when no value is given
    Set {
        /// Configuration key (default-model or default-temperature)
        key: String,
        /// Value to set for the key
        value: Option<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key (default-model or default-temperature)
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    // Silent unless RUST_LOG asks for output; diagnostics go to stderr so
    // the alternate screen stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Set { key, value } => {
            if let Err(e) = run_set(&key, value) {
                eprintln!("❌ {e}");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Unset { key } => {
            if let Err(e) = run_unset(&key) {
                eprintln!("❌ {e}");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Chat => run_chat(args.model, args.temperature, args.log).await,
    }
}

fn run_set(key: &str, value: Option<String>) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;

    let Some(value) = value else {
        config.print_all();
        return Ok(());
    };

    match key {
        "default-model" => {
            let model = ModelId::try_from(value.as_str())?;
            config.default_model = Some(model);
            config.save()?;
            println!("✅ Set default-model to: {model}");
        }
        "default-temperature" => {
            let parsed = value
                .parse::<f64>()
                .map_err(|_| format!("Invalid temperature: {value}"))?;
            let temperature = validate_temperature(parsed)?;
            config.default_temperature = Some(temperature);
            config.save()?;
            println!("✅ Set default-temperature to: {temperature}");
        }
        _ => return Err(format!("Unknown config key: {key}").into()),
    }
    Ok(())
}

fn run_unset(key: &str) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;

    match key {
        "default-model" => {
            config.default_model = None;
            config.save()?;
            println!("✅ Unset default-model");
        }
        "default-temperature" => {
            config.default_temperature = None;
            config.save()?;
            println!("✅ Unset default-temperature");
        }
        _ => return Err(format!("Unknown config key: {key}").into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::with_test_config_env;

    #[test]
    fn set_and_unset_default_model_round_trip() {
        with_test_config_env(|_| {
            run_set("default-model", Some("gpt-3.5-turbo".to_string())).unwrap();
            let config = Config::load().unwrap();
            assert_eq!(config.default_model, Some(ModelId::Gpt35Turbo));

            run_unset("default-model").unwrap();
            let config = Config::load().unwrap();
            assert_eq!(config.default_model, None);
        });
    }

    #[test]
    fn set_default_temperature_validates_the_range() {
        with_test_config_env(|_| {
            run_set("default-temperature", Some("0.4".to_string())).unwrap();
            let config = Config::load().unwrap();
            assert_eq!(config.default_temperature, Some(0.4));

            let err = run_set("default-temperature", Some("3.0".to_string())).unwrap_err();
            assert!(err.to_string().contains("between 0.0 and 1.0"));

            let err = run_set("default-temperature", Some("toasty".to_string())).unwrap_err();
            assert!(err.to_string().contains("Invalid temperature"));
        });
    }

    #[test]
    fn set_rejects_models_outside_the_closed_set() {
        with_test_config_env(|_| {
            let err = run_set("default-model", Some("gpt-9".to_string())).unwrap_err();
            assert!(err.to_string().contains("Unknown model"));
        });
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        with_test_config_env(|_| {
            let err = run_set("default-provider", Some("openai".to_string())).unwrap_err();
            assert!(err.to_string().contains("Unknown config key"));

            let err = run_unset("theme").unwrap_err();
            assert!(err.to_string().contains("Unknown config key"));
        });
    }
}
