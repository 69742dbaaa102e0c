use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{CustomType, CustomUserError, Select, Text, validator::Validation};
use std::{net::IpAddr, path::PathBuf};
use tracing_subscriber::EnvFilter;
use weather_core::{Config, Dashboard, Location, Notice, config::MAX_SUGGESTIONS};

use crate::{render, web};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Strategic weather monitor")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the dashboard over HTTP.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        bind: IpAddr,

        /// Port to listen on; 0 picks a free one.
        #[arg(long, default_value_t = 0)]
        port: u16,
    },

    /// Show weather for an address.
    Show {
        /// Address or location name.
        address: String,
    },

    /// Pick a location from suggestions and show its weather.
    Search {
        /// Partial location name, at least two characters.
        query: String,
    },

    /// Show weather for all strategic locations.
    Presets,

    /// Edit request settings and strategic locations.
    Configure,
}

impl Cli {
    pub fn init_tracing(&self) {
        let default = match self.command {
            Command::Serve { .. } => "info",
            _ => "warn",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }

    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    pub async fn run(self) -> Result<()> {
        let config = self.load_config()?;

        match self.command {
            Command::Serve { bind, port } => {
                let dashboard = Dashboard::from_config(&config)?;
                web::run(dashboard, bind, port).await?;
            }
            Command::Show { address } => {
                let dashboard = Dashboard::from_config(&config)?;
                let outcome = dashboard.search(&address).await;
                print_notices(&outcome.notices);
                if let Some(card) = outcome.card {
                    println!("{}", render::card(&card));
                }
            }
            Command::Search { query } => {
                let dashboard = Dashboard::from_config(&config)?;
                let suggestions = dashboard.suggestions(&query).await;
                if let Some(error) = &suggestions.error {
                    print_notices(&[Notice::error(error.clone())]);
                    return Ok(());
                }
                if suggestions.locations.is_empty() {
                    println!("No suggestions for '{query}'.");
                    return Ok(());
                }

                let chosen = Select::new("Select a location:", suggestions.locations)
                    .prompt()
                    .context("Location selection was cancelled")?;

                let outcome = dashboard.lookup(chosen).await;
                print_notices(&outcome.notices);
                if let Some(card) = outcome.card {
                    println!("{}", render::card(&card));
                }
            }
            Command::Presets => {
                let dashboard = Dashboard::from_config(&config)?;
                let (cards, notices) = dashboard.strategic().await;
                print_notices(&notices);
                for card in &cards {
                    println!("{}", render::card(card));
                }
            }
            Command::Configure => {
                let updated = configure(config)?;
                let path = match &self.config {
                    Some(path) => {
                        updated.save_to(path)?;
                        path.clone()
                    }
                    None => updated.save()?,
                };
                println!("Configuration saved to {}", path.display());
            }
        }

        Ok(())
    }
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        eprintln!("{}", render::notice(notice));
    }
}

fn configure(mut config: Config) -> Result<Config> {
    config.timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .with_validator(validate_timeout)
        .prompt()?;

    config.suggestion_count = CustomType::<usize>::new("Number of suggestions:")
        .with_default(config.suggestion_count)
        .with_validator(validate_suggestion_count)
        .prompt()?;

    loop {
        let name = Text::new("Add a strategic location (leave empty to finish):").prompt()?;
        let name = name.trim();
        if name.is_empty() {
            break;
        }

        let latitude = CustomType::<f64>::new("Latitude:").prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:").prompt()?;
        config.upsert_location(Location::new(name, latitude, longitude));
    }

    config.validate()?;
    Ok(config)
}

fn validate_timeout(secs: &u64) -> Result<Validation, CustomUserError> {
    if *secs == 0 {
        Ok(Validation::Invalid("Timeout must be at least one second".into()))
    } else {
        Ok(Validation::Valid)
    }
}

fn validate_suggestion_count(count: &usize) -> Result<Validation, CustomUserError> {
    if (1..=MAX_SUGGESTIONS).contains(count) {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid(format!("Enter a number between 1 and {MAX_SUGGESTIONS}").into()))
    }
}
