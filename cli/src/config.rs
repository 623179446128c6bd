use anyhow::Context;
use chrono::TimeDelta;
use floodfill_core as game;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "floodfill.toml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub difficulty: String,
    pub seed: Option<u64>,
    pub user_id: i64,
    pub user_name: String,
    pub starting_balance: f64,
    pub sessions: SessionConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    pub max_sessions: usize,
    pub idle_timeout_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: game::Difficulty::default().name().to_owned(),
            seed: None,
            user_id: 1,
            user_name: "Player".to_owned(),
            starting_balance: floodfill_protocol::STARTING_BALANCE,
            sessions: SessionConfig::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: game::SessionPolicy::DEFAULT_MAX_SESSIONS,
            idle_timeout_secs: game::SessionPolicy::DEFAULT_IDLE_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Reads `path`, or the default file when present, or falls back to defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => {
                log::debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.difficulty()?;
        anyhow::ensure!(
            config.sessions.idle_timeout_secs > 0,
            "sessions.idle_timeout_secs must be positive, got {}",
            config.sessions.idle_timeout_secs
        );
        Ok(config)
    }

    pub fn difficulty(&self) -> anyhow::Result<game::Difficulty> {
        self.difficulty
            .parse()
            .with_context(|| format!("Unknown difficulty {:?}", self.difficulty))
    }

    pub fn session_policy(&self) -> game::SessionPolicy {
        game::SessionPolicy {
            max_sessions: self.sessions.max_sessions,
            idle_timeout: TimeDelta::try_seconds(self.sessions.idle_timeout_secs)
                .unwrap_or(TimeDelta::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn parses_partial_file() {
        let config = Config::parse(
            r#"
            difficulty = "hard"
            seed = 99

            [sessions]
            idle_timeout_secs = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.difficulty().unwrap(), game::Difficulty::Hard);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.sessions.max_sessions, game::SessionPolicy::DEFAULT_MAX_SESSIONS);
        assert_eq!(config.session_policy().idle_timeout, TimeDelta::seconds(60));
    }

    #[test]
    fn rejects_unknown_difficulty_and_fields() {
        assert!(Config::parse(r#"difficulty = "insane""#).is_err());
        assert!(Config::parse("colour = 3").is_err());
    }

    #[test]
    fn rejects_non_positive_idle_timeout() {
        let negative = "[sessions]\nidle_timeout_secs = -5";
        let zero = "[sessions]\nidle_timeout_secs = 0";

        assert!(Config::parse(negative).is_err());
        assert!(Config::parse(zero).is_err());
    }
}
