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
}

/// Settings that shape the exported article JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub schema_version: String,
    pub embed_width: u32,
    pub embed_height: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            schema_version: "2.29.1".to_string(),
            embed_width: 580,
            embed_height: 320,
        }
    }
}

/// Writing direction of the editing surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub words_per_minute: u32,
    pub commit_debounce_ms: u64,
    pub focus_delay_ms: u64,
    pub direction: Direction,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
            commit_debounce_ms: 300,
            focus_delay_ms: 50,
            direction: Direction::Ltr,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where exports go when no output file is named
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    pub editor: EditorConfig,
    pub export: ExportConfig,
}

impl Config {
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

        // Expand shell variables and tilde in the output directory
        config.output_dir = config
            .output_dir
            .map(|dir| Self::expand_path(&dir).unwrap_or(dir));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// The config at `config_path`, or defaults when no file exists there
    pub fn load_or_default_from_path<P: AsRef<Path>>(
        config_path: P,
    ) -> Result<Self, ConfigError> {
        Ok(Self::load_from_path(config_path)?.unwrap_or_default())
    }

    /// The stored config, or defaults when no file exists yet
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Self::load_or_default_from_path(Self::config_path())
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
        let config_dir = shellexpand::tilde("~/.config/newsdesk");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
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
        assert!(path_str.ends_with(".config/newsdesk/config.toml"));
    }

    #[test]
    fn test_defaults_match_publishing_expectations() {
        let config = Config::default();

        assert_eq!(config.export.schema_version, "2.29.1");
        assert_eq!((config.export.embed_width, config.export.embed_height), (580, 320));
        assert_eq!(config.editor.words_per_minute, 200);
        assert_eq!(config.editor.commit_debounce_ms, 300);
        assert_eq!(config.editor.focus_delay_ms, 50);
        assert_eq!(config.output_dir, None);
    }

    #[test]
    fn test_partial_toml_fills_in_defaults() {
        let config_content = r#"
[editor]
words_per_minute = 250
direction = "rtl"
"#;

        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(config.editor.words_per_minute, 250);
        assert_eq!(config.editor.direction, Direction::Rtl);
        assert_eq!(config.editor.commit_debounce_ms, 300);
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("NEWSDESK_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$NEWSDESK_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("NEWSDESK_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_or_default_without_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        let config = Config::load_or_default_from_path(&missing).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_reads_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[export]\nschema_version = \"3.0.0\"\n").unwrap();

        let config = Config::load_or_default_from_path(&config_file).unwrap();

        assert_eq!(config.export.schema_version, "3.0.0");
        assert_eq!(config.editor, EditorConfig::default());
    }

    #[test]
    fn test_load_or_default_propagates_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "editor = [not toml").unwrap();

        let error = Config::load_or_default_from_path(&config_file).unwrap_err();

        assert!(matches!(error, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_load_invalid_toml_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "editor = [not toml").unwrap();

        let error = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(error, ConfigError::ConfigParseError { .. }));
        assert!(error.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            output_dir: Some(PathBuf::from("/tmp/exports")),
            editor: EditorConfig {
                words_per_minute: 180,
                ..EditorConfig::default()
            },
            export: ExportConfig {
                schema_version: "3.0.0".to_string(),
                ..ExportConfig::default()
            },
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_output_dir_with_tilde_is_expanded_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "output_dir = \"~/articles\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        let output_dir = config.output_dir.unwrap();

        assert!(!output_dir.to_string_lossy().starts_with('~'));
        assert!(output_dir.to_string_lossy().ends_with("articles"));
    }
}
