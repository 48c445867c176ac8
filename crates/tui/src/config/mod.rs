use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::Parser;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/masarif.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Project URL of the hosted backend, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// Public (anon) API key sent with every request.
    pub api_key: String,
    /// Pre-filled e-mail on the sign-in screen.
    pub email: String,
    /// IANA timezone used to decide what "today" is.
    pub timezone: String,
    pub log_file: String,
    pub log_level: String,
    pub state_file: String,
    /// Shows the debts tab and the unpaid badge.
    pub debt_tracking: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:54321".to_string(),
            api_key: String::new(),
            email: String::new(),
            timezone: "Asia/Baghdad".to_string(),
            log_file: "logs/masarif.log".to_string(),
            log_level: "info".to_string(),
            state_file: "config/masarif_state.json".to_string(),
            debt_tracking: true,
        }
    }
}

impl AppConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| AppError::Timezone(format!("{}: {err}", self.timezone)))
    }
}

/// Calendar day in `tz` right now.
pub fn today_in(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

#[derive(Debug, Parser)]
#[command(name = "masarif", about = "Household expense tracker")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override backend URL.
    #[arg(long)]
    base_url: Option<String>,
    /// Override the public API key.
    #[arg(long)]
    api_key: Option<String>,
    /// Override e-mail (password is never read from CLI).
    #[arg(long)]
    email: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Override log file path.
    #[arg(long)]
    log_file: Option<String>,
    /// Hide debt tracking.
    #[arg(long)]
    no_debts: bool,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("MASARIF"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(api_key) = args.api_key {
        settings.api_key = api_key;
    }
    if let Some(email) = args.email {
        settings.email = email;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if args.no_debts {
        settings.debt_tracking = false;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timezone_parses() {
        let config = AppConfig::default();
        assert_eq!(config.tz().unwrap(), chrono_tz::Asia::Baghdad);
        assert!(config.debt_tracking);
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        let config = AppConfig {
            timezone: "Mars/Olympus".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.tz(), Err(AppError::Timezone(_))));
    }
}
