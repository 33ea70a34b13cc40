//! Engine configuration: table size, rule preset and shuffle seed.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;
use tracing::debug;

use crate::game::{Position, Ruleset, DECK_SIZE};

pub const PLAYERS_ENV: &str = "SLAVE_PLAYERS";
pub const RULESET_ENV: &str = "SLAVE_RULESET";
pub const SEED_ENV: &str = "SLAVE_SEED";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unsupported player count {0}: the hierarchy needs exactly four seats")]
    UnsupportedPlayerCount(usize),
    #[error("Unknown ruleset: {0}")]
    UnknownRuleset(String),
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Named rule presets. See [`Ruleset`] for what each one admits.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RulesetPreset {
    #[default]
    Straights,
    Triples,
}

impl RulesetPreset {
    pub fn ruleset(self) -> Ruleset {
        match self {
            RulesetPreset::Straights => Ruleset::STRAIGHTS,
            RulesetPreset::Triples => Ruleset::TRIPLES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub num_players: usize,
    pub ruleset: RulesetPreset,
    /// Seed for the first deal. `None` shuffles from fresh entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: Position::ALL.len(),
            ruleset: RulesetPreset::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_ruleset(mut self, ruleset: RulesetPreset) -> Self {
        self.ruleset = ruleset;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Defaults overridden by `SLAVE_PLAYERS`, `SLAVE_RULESET` and `SLAVE_SEED`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(PLAYERS_ENV) {
            config.num_players = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: PLAYERS_ENV,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(RULESET_ENV) {
            config.ruleset = RulesetPreset::from_str(value.trim().to_lowercase().as_str())
                .map_err(|_| ConfigError::UnknownRuleset(value.clone()))?;
        }

        if let Some(value) = lookup(SEED_ENV) {
            let seed = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: SEED_ENV,
                value: value.clone(),
            })?;
            config.seed = Some(seed);
        }

        debug!(?config, "Loaded game config from environment");
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_players != Position::ALL.len() || DECK_SIZE % self.num_players != 0 {
            return Err(ConfigError::UnsupportedPlayerCount(self.num_players));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.num_players, 4);
        assert_eq!(config.ruleset, RulesetPreset::Straights);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_other_player_counts() {
        for players in [0, 2, 3, 5, 13] {
            let config = GameConfig {
                num_players: players,
                ..GameConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::UnsupportedPlayerCount(players))
            );
        }
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = GameConfig::from_lookup(lookup(&[
            (RULESET_ENV, "Triples"),
            (SEED_ENV, "42"),
        ]))
        .unwrap();
        assert_eq!(config.ruleset, RulesetPreset::Triples);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.ruleset.ruleset(), Ruleset::TRIPLES);
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        assert_eq!(
            GameConfig::from_lookup(lookup(&[(RULESET_ENV, "poker")])),
            Err(ConfigError::UnknownRuleset("poker".to_string()))
        );
        assert!(matches!(
            GameConfig::from_lookup(lookup(&[(SEED_ENV, "abc")])),
            Err(ConfigError::InvalidValue { name: SEED_ENV, .. })
        ));
        assert_eq!(
            GameConfig::from_lookup(lookup(&[(PLAYERS_ENV, "5")])),
            Err(ConfigError::UnsupportedPlayerCount(5))
        );
    }

    #[test]
    fn test_every_preset_reserves_its_action_space() {
        use strum::IntoEnumIterator;

        let sizes: Vec<(RulesetPreset, usize)> = RulesetPreset::iter()
            .map(|preset| (preset, preset.ruleset().action_space_size))
            .collect();
        assert_eq!(
            sizes,
            vec![(RulesetPreset::Straights, 194), (RulesetPreset::Triples, 157)]
        );
        for preset in RulesetPreset::iter() {
            assert_eq!(preset.ruleset().name, preset.to_string());
        }
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(RulesetPreset::Straights.to_string(), "straights");
        assert_eq!(RulesetPreset::from_str("triples"), Ok(RulesetPreset::Triples));
    }
}
