use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::regret::DEFAULT_MAX_REGRET;
use crate::types::Color;

/// Upper bound accepted for `max_regret`.
pub const MAX_REGRET_LIMIT: u32 = 99;

/// Per-session settings, passed explicitly to [`crate::Game::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Take-backs allowed per colour per game.
    pub max_regret: u32,
    pub red_player: String,
    pub black_player: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            max_regret: DEFAULT_MAX_REGRET,
            red_player: "Red".to_string(),
            black_player: "Black".to_string(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_regret > MAX_REGRET_LIMIT {
            return Err(ConfigError::Validation(format!(
                "max_regret must be <= {MAX_REGRET_LIMIT}"
            )));
        }
        if self.red_player.trim().is_empty() {
            return Err(ConfigError::Validation(
                "red_player must not be empty".into(),
            ));
        }
        if self.black_player.trim().is_empty() {
            return Err(ConfigError::Validation(
                "black_player must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn player_name(&self, color: Color) -> &str {
        match color {
            Color::Red => &self.red_player,
            Color::Black => &self.black_player,
        }
    }

    /// TOML text with every default filled in, for writing a starter file.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.max_regret, 3);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GameConfig = toml::from_str("max_regret = 5").unwrap();
        assert_eq!(config.max_regret, 5);
        assert_eq!(config.red_player, "Red");
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: GameConfig = toml::from_str("").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_validation_rejects_huge_regret_count() {
        let config = GameConfig {
            max_regret: 100,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_blank_name() {
        let config = GameConfig {
            black_player: "  ".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = GameConfig::load_or_default(Path::new("nonexistent_xiangqi.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "max_regret = 1\nred_player = \"Lin\"").unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.max_regret, 1);
        assert_eq!(config.red_player, "Lin");
        assert_eq!(config.black_player, "Black");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        std::fs::write(&path, "max_regret = 500").unwrap();
        assert!(matches!(
            GameConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let text = GameConfig::default_toml().unwrap();
        let config: GameConfig = toml::from_str(&text).unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
