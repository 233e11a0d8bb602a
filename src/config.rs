//! `config.toml`: engine command, catalog location, logic universe.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    engine::{ProcessEngine, SolvingEngine, UnconfiguredEngine},
    error::Result,
    logic::LogicUniverse,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Problem catalog JSON; the built-in catalog when unset.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub engine: EngineConfig,
    /// Replaces the built-in logic list and categories.
    #[serde(default)]
    pub logics: Option<LogicUniverse>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        if let Some(universe) = &config.logics {
            universe.validate()?;
        }
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tableau-tui/config.toml")
    }

    pub fn universe(&self) -> LogicUniverse {
        self.logics.clone().unwrap_or_default()
    }

    pub fn build_engine(&self) -> Box<dyn SolvingEngine> {
        match &self.engine.command {
            Some(command) => Box::new(ProcessEngine::new(
                command.clone(),
                self.engine.args.clone(),
            )),
            None => Box::new(UnconfiguredEngine),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::error::Error;

    #[test]
    fn test_missing_file_gives_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let config = Config::load_from(&dir.path().join("absent.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_save_and_reload() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("sub/config.toml");
        let config = Config {
            catalog: Some(PathBuf::from("/tmp/catalog.json")),
            engine: EngineConfig {
                command: Some("tableau-engine".into()),
                args: vec!["--json".into()],
            },
            logics: None,
        };

        config.save_to(&path)?;
        assert_eq!(Config::load_from(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_parse_universe_override() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[engine]
command = "engine"

[logics]
logics = ["KModalLogic", "TModalLogic"]
categories = ["PropositionalLogic"]
default_category = "PropositionalLogic"
"#,
        )?;

        let config = Config::load_from(&path)?;
        assert_eq!(config.universe().logics, ["KModalLogic", "TModalLogic"]);
        assert!(config.engine.args.is_empty());
        Ok(())
    }

    #[test]
    fn test_invalid_universe_is_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[logics]\nlogics = [\"KModalLogic\"]\ncategories = [\"A\"]\ndefault_category = \"B\"\n",
        )?;

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
        Ok(())
    }
}
