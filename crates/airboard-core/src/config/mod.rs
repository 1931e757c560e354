use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{DEFAULT_MAX_OCCURRENCES, DEFAULT_SAFETY_HORIZON_YEARS, DEFAULT_TIMEZONE};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub serve_origin: Option<String>,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the server address as a string in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// ## Summary
    /// Returns the server origin URL.
    #[must_use]
    pub fn origin(&self) -> String {
        self.serve_origin
            .clone()
            .unwrap_or_else(|| format!("http://{}", self.bind_addr()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Limits applied while materializing recurring events.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Safety default and hard cap on occurrences generated per event.
    pub max_occurrences: u32,
    /// A walk stops once it passes "now" plus this many years.
    pub safety_horizon_years: u32,
    /// IANA zone for events that do not carry their own.
    pub default_timezone: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
            safety_horizon_years: DEFAULT_SAFETY_HORIZON_YEARS,
            default_timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl CalendarConfig {
    /// ## Summary
    /// Checks that the expansion limits can actually bound a walk.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if either limit is zero or the
    /// default timezone is blank.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_occurrences == 0 {
            return Err(CoreError::InvalidConfiguration(
                "calendar.max_occurrences must be positive".to_string(),
            ));
        }
        if self.safety_horizon_years == 0 {
            return Err(CoreError::InvalidConfiguration(
                "calendar.safety_horizon_years must be positive".to_string(),
            ));
        }
        if self.default_timezone.trim().is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "calendar.default_timezone must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// Nested keys use a double underscore, e.g. `CALENDAR__MAX_OCCURRENCES`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating the calendar limits fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("logging.level", "debug")?
            .set_default("calendar.max_occurrences", DEFAULT_MAX_OCCURRENCES)?
            .set_default("calendar.safety_horizon_years", DEFAULT_SAFETY_HORIZON_YEARS)?
            .set_default("calendar.default_timezone", DEFAULT_TIMEZONE)?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.calendar.validate()?;

        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    Settings::load()
}
