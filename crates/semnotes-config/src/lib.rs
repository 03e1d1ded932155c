use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid exclude pattern {pattern:?}: {source}")]
    InvalidExcludePattern {
        pattern: String,
        source: glob::PatternError,
    },
}

/// User settings for the semnotes tools, stored as TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the `.html` note files
    pub notes_path: PathBuf,
    /// Glob patterns, relative to `notes_path`, of note files to skip
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl Config {
    pub fn new(notes_path: impl Into<PathBuf>) -> Self {
        Self {
            notes_path: notes_path.into(),
            exclude: Vec::new(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded notes path
        config.notes_path = Self::expand_path(&config.notes_path).unwrap_or(config.notes_path);
        config.exclude_patterns()?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/semnotes");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Compiled exclude globs
    pub fn exclude_patterns(&self) -> Result<Vec<Pattern>, ConfigError> {
        self.exclude
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| ConfigError::InvalidExcludePattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }

    /// Whether a note, given by its path relative to `notes_path`, is
    /// excluded. Unparseable patterns never match.
    pub fn is_excluded(&self, relative_path: &str) -> bool {
        self.exclude
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .any(|p| p.matches(relative_path))
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/semnotes/config.toml"));
    }

    #[test]
    fn test_exclude_defaults_to_empty() {
        let config: Config = toml::from_str(r#"notes_path = "/notes""#).unwrap();

        assert_eq!(config, Config::new("/notes"));
        assert!(!config.is_excluded("anything.html"));
    }

    #[test]
    fn test_exclude_patterns_match_relative_paths() {
        let config = Config {
            notes_path: PathBuf::from("/notes"),
            exclude: vec!["archive/**".to_string(), "*.draft.html".to_string()],
        };

        assert!(config.is_excluded("archive/2023/old.html"));
        assert!(config.is_excluded("idea.draft.html"));
        assert!(!config.is_excluded("projects/alpha.html"));
    }

    #[test]
    fn test_invalid_exclude_pattern_fails_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "notes_path = \"/notes\"\nexclude = [\"[unclosed\"]\n",
        )
        .unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidExcludePattern { .. })
        ));
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "notes_path = ").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(&PathBuf::from("~/test/path")).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("SEMNOTES_TEST_VAR", "/test/env/path");
        }

        let expanded = Config::expand_path(&PathBuf::from("$SEMNOTES_TEST_VAR/subdir")).unwrap();
        assert_eq!(expanded, PathBuf::from("/test/env/path/subdir"));

        unsafe {
            env::remove_var("SEMNOTES_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_leaves_plain_paths() {
        assert_eq!(
            Config::expand_path(&PathBuf::from("/absolute/path")).unwrap(),
            PathBuf::from("/absolute/path")
        );
        assert_eq!(
            Config::expand_path(&PathBuf::from("relative/path")).unwrap(),
            PathBuf::from("relative/path")
        );
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load_from_path(temp_dir.path().join("nonexistent.toml")).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let config = Config {
            notes_path: PathBuf::from("/tmp/test-notes"),
            exclude: vec!["trash/*".to_string()],
        };

        config.save_to_path(&config_file).unwrap();
        let loaded = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_with_env_var_in_toml() {
        unsafe {
            env::set_var("SEMNOTES_ROOT", "/custom/notes");
        }
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "notes_path = \"$SEMNOTES_ROOT/mine\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(config.notes_path, PathBuf::from("/custom/notes/mine"));

        unsafe {
            env::remove_var("SEMNOTES_ROOT");
        }
    }
}
