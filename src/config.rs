//! Process configuration read from the environment (optionally seeded from a `.env` file).

use std::{env, num::NonZeroU64, num::ParseIntError, path::PathBuf};

use thiserror::Error;

/// HTTP port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;
/// Data file used when `TALLY_DATA_FILE` is unset.
pub const DEFAULT_DATA_FILE: &str = "tallies-data.json";
/// Media directory used when `TALLY_MEDIA_DIR` is unset.
pub const DEFAULT_MEDIA_DIR: &str = "gifs";

const TOKEN_ENV: &str = "DISCORD_BOT_TOKEN";
const GUILD_ENV: &str = "DISCORD_GUILD_ID";
const PORT_ENV: &str = "PORT";
const DATA_FILE_ENV: &str = "TALLY_DATA_FILE";
const MEDIA_DIR_ENV: &str = "TALLY_MEDIA_DIR";

/// Malformed configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric variable does not parse.
    #[error("invalid value `{value}` for environment variable `{var}`")]
    InvalidVar {
        /// Variable name.
        var: &'static str,
        /// Raw value read from the environment.
        value: String,
        /// Parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// Credentials and scope of the chat bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordConfig {
    /// Bot token used to log in to the gateway.
    pub token: String,
    /// Guild to register commands in; global registration when absent.
    pub guild_id: Option<NonZeroU64>,
}

/// Immutable runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `None` when no bot token is configured; the HTTP API still runs.
    pub discord: Option<DiscordConfig>,
    /// HTTP listening port.
    pub port: u16,
    /// JSON document holding the tallies.
    pub data_file: PathBuf,
    /// Directory of celebratory media.
    pub media_dir: PathBuf,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let guild_id = get(GUILD_ENV)
            .map(|value| parse(GUILD_ENV, value))
            .transpose()?;
        let discord = get(TOKEN_ENV).map(|token| DiscordConfig { token, guild_id });

        let port = get(PORT_ENV)
            .map(|value| parse(PORT_ENV, value))
            .transpose()?
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            discord,
            port,
            data_file: get(DATA_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
            media_dir: get(MEDIA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MEDIA_DIR)),
        })
    }
}

fn parse<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    value
        .trim()
        .parse()
        .map_err(|source| ConfigError::InvalidVar { var, value, source })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.discord, None);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(config.media_dir, PathBuf::from(DEFAULT_MEDIA_DIR));
    }

    #[test]
    fn reads_every_variable() {
        let config = config(&[
            ("DISCORD_BOT_TOKEN", "secret"),
            ("DISCORD_GUILD_ID", "123456789"),
            ("PORT", "8080"),
            ("TALLY_DATA_FILE", "/data/tallies.json"),
            ("TALLY_MEDIA_DIR", "/data/gifs"),
        ])
        .unwrap();

        let discord = config.discord.unwrap();
        assert_eq!(discord.token, "secret");
        assert_eq!(discord.guild_id.map(NonZeroU64::get), Some(123456789));
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_file, PathBuf::from("/data/tallies.json"));
        assert_eq!(config.media_dir, PathBuf::from("/data/gifs"));
    }

    #[test]
    fn empty_token_disables_bot() {
        let config = config(&[("DISCORD_BOT_TOKEN", "  ")]).unwrap();
        assert!(config.discord.is_none());
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        assert!(matches!(
            config(&[("PORT", "http")]),
            Err(ConfigError::InvalidVar { var: "PORT", .. })
        ));
        assert!(matches!(
            config(&[("DISCORD_GUILD_ID", "0")]),
            Err(ConfigError::InvalidVar {
                var: "DISCORD_GUILD_ID",
                ..
            })
        ));
    }
}
