use crate::errors::{AppError, AppResult};
use crate::models::WeekStart;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod migrate;

/// Keys every config file is expected to carry.
pub const KNOWN_KEYS: &[&str] = &[
    "database",
    "default_user",
    "week_start",
    "separator_char",
    "color_output",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub default_user: Option<String>,
    #[serde(default)]
    pub week_start: WeekStart,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    #[serde(default = "default_color_output")]
    pub color_output: bool,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}
fn default_color_output() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_user: None,
            week_start: WeekStart::default(),
            separator_char: default_separator_char(),
            color_output: default_color_output(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("tiplogger")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".tiplogger")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("tiplogger.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("tiplogger.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&Self::config_file())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Resolve the database path chosen at `init` time.
    /// Relative names are placed inside the config directory.
    pub fn resolve_db_path(custom: Option<&str>) -> PathBuf {
        match custom {
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    Self::config_dir().join(p)
                }
            }
            None => Self::database_file(),
        }
    }

    /// Initialize configuration and database files.
    /// In test mode the config file is left untouched.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let db_path = Self::resolve_db_path(custom_db);

        if !is_test {
            let mut config = Self::load().unwrap_or_default();
            config.database = db_path.to_string_lossy().to_string();
            config.save()?;
            println!("✅ Config file: {}", Self::config_file().display());
        }

        if let Some(dir) = db_path.parent() {
            fs::create_dir_all(dir)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }

    /// Keys of `KNOWN_KEYS` absent from the YAML file at `path`.
    pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
        if !path.exists() {
            return Ok(KNOWN_KEYS.to_vec());
        }

        let content = fs::read_to_string(path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&content)?;
        let map = value.as_mapping();

        Ok(KNOWN_KEYS
            .iter()
            .copied()
            .filter(|k| {
                map.is_none_or(|m| !m.contains_key(serde_yaml::Value::String(k.to_string())))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp(name: &str) -> PathBuf {
        let p = std::env::temp_dir().join(format!("tiplogger_cfg_{name}.conf"));
        let _ = fs::remove_file(&p);
        p
    }

    #[test]
    fn missing_fields_take_defaults() {
        let p = tmp("partial");
        fs::write(&p, "database: /tmp/x.sqlite\nweek_start: monday\n").unwrap();

        let cfg = Config::load_from(&p).unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.week_start, WeekStart::Monday);
        assert_eq!(cfg.separator_char, "-");
        assert!(cfg.color_output);
        assert!(cfg.default_user.is_none());

        let missing = Config::missing_keys(&p).unwrap();
        assert_eq!(missing, vec!["default_user", "separator_char", "color_output"]);
    }

    #[test]
    fn save_then_load() {
        let p = tmp("roundtrip");
        let cfg = Config {
            default_user: Some("sam@example.com".into()),
            ..Config::default()
        };
        cfg.save_to(&p).unwrap();
        let loaded = Config::load_from(&p).unwrap();
        assert_eq!(loaded.default_user.as_deref(), Some("sam@example.com"));
        assert!(Config::missing_keys(&p).unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let p = tmp("broken");
        fs::write(&p, "week_start: [oops").unwrap();
        assert!(matches!(Config::load_from(&p), Err(AppError::Config(_))));
    }
}
