use std::str::FromStr;

use serde::Deserialize;
use serde_with::serde_as;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use strum::{Display, EnumString};

/// Settings read once at startup, see [`read_config`].
#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    /// Origin of the dashboard frontend, allowed through CORS.
    pub app_url: String,
}

/// Postgres connection settings. The password never shows up in `Debug`.
#[serde_as]
#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
}

impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("port", &self.port)
            .field("host", &self.host)
            .field("database_name", &self.database_name)
            .field("require_ssl", &self.require_ssl)
            .finish()
    }
}

impl DatabaseSettings {
    /// Connection options for the hours database. `require_ssl` turns the
    /// default `prefer` into a hard requirement.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database_name)
            .ssl_mode(match self.require_ssl {
                true => PgSslMode::Require,
                false => PgSslMode::Prefer,
            })
    }
}

/// Loads `config/base.yaml`, then `config/<APP_ENVIRONMENT>.yaml`, then
/// `MAM_*` variables (`MAM_DATABASE__PASSWORD` sets `database.password`).
pub fn read_config() -> Result<Settings, config::ConfigError> {
    let config_dir = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("no current directory: {e}")))?
        .join("config");
    let environment = Environment::current()?;

    config::Config::builder()
        .add_source(config::File::from(config_dir.join("base.yaml")))
        .add_source(config::File::from(
            config_dir.join(format!("{environment}.yaml")),
        ))
        .add_source(
            config::Environment::with_prefix("MAM")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}

/// Deployment flavour, named after its overlay file.
#[derive(Display, Debug, EnumString, PartialEq, Eq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    /// Reads `APP_ENVIRONMENT`, defaulting to `local`.
    fn current() -> Result<Self, config::ConfigError> {
        let raw = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into());
        Self::from_str(&raw)
            .map_err(|e| config::ConfigError::Message(format!("invalid APP_ENVIRONMENT {raw:?}: {e}")))
    }
}
