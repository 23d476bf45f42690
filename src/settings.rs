use chrono_tz::Tz;
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub graphql_endpoint: Url,
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
    /// Zone whose calendar days are used for bucketing and offset-less dates.
    pub display_timezone: Tz,
    pub events_limit: u8,
    pub occurrences_limit: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // APP_GRAPHQL_ENDPOINT, APP_DISPLAY_TIMEZONE, ...
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default(
                "graphql_endpoint",
                "https://dev.acroworld.de/hasura/v1/graphql",
            )?
            .set_default("debug", false)?
            .set_default("enable_swagger", true)?
            .set_default("port", 8080)?
            .set_default("display_timezone", "UTC")?
            .set_default("events_limit", 6)?
            .set_default("occurrences_limit", 50)?
            .build()?;

        config.try_deserialize()
    }
}
