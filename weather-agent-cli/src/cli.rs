use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use tokio::io::BufReader;
use weather_agent_core::{Config, LocationQuery, channel, orchestrator_from_config};

use crate::output;

const AGENT_NAME: &str = "weather_agent";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-agent", version, about = "Weather lookup agent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Look up current weather for one location.
    Query {
        /// City name, e.g. "London".
        #[arg(long)]
        city: String,

        /// State code; may be left empty outside the US.
        #[arg(long, default_value = "")]
        state: String,

        /// ISO 3166 country code, e.g. "GB".
        #[arg(long)]
        country: String,

        /// Print the raw JSON reply instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Answer newline-delimited JSON queries from stdin on stdout.
    Serve,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Query {
                city,
                state,
                country,
                json,
            } => {
                let orchestrator = orchestrator_from_config(&Config::resolve()?)?;
                let outcome = orchestrator
                    .handle(LocationQuery::new(city, state, country))
                    .await;

                if json {
                    println!("{}", serde_json::to_string_pretty(&outcome.into_response())?);
                } else {
                    print!("{}", output::render(&outcome));
                }
                Ok(())
            }
            Command::Serve => {
                let cfg = Config::resolve()?;
                let orchestrator = orchestrator_from_config(&cfg)?;

                tracing::info!("Starting up {AGENT_NAME}");
                if let Ok(path) = Config::config_file_path() {
                    tracing::info!("Using config file: {}", path.display());
                }

                let stdin = BufReader::new(tokio::io::stdin());
                let replies = channel::serve(orchestrator, stdin, tokio::io::stdout()).await?;

                tracing::info!(replies, "Input closed, shutting down {AGENT_NAME}");
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Used for both geocoding and current weather requests")
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    cfg.set_api_key(api_key);
    let path = cfg.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
