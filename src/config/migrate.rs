use crate::config::{Config, KNOWN_KEYS};
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Add every missing known key to the YAML file at `path`, using defaults.
/// Values already present (and unknown keys) are preserved.
///
/// Returns the keys that were added; an empty list means nothing changed.
pub fn add_missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let mut root = if path.exists() {
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            Value::Mapping(Mapping::new())
        } else {
            serde_yaml::from_str::<Value>(&content)?
        }
    } else {
        Value::Mapping(Mapping::new())
    };

    let map = root
        .as_mapping_mut()
        .ok_or_else(|| AppError::Config(format!("{} is not a YAML mapping", path.display())))?;

    let defaults = serde_yaml::to_value(Config::default())?;
    let defaults = defaults
        .as_mapping()
        .ok_or_else(|| AppError::Other("default config is not a mapping".into()))?;

    let mut added = Vec::new();
    for key in KNOWN_KEYS {
        let k = Value::String(key.to_string());
        if map.contains_key(&k) {
            continue;
        }
        let v = defaults.get(&k).cloned().unwrap_or(Value::Null);
        map.insert(k, v);
        added.push(*key);
    }

    if !added.is_empty() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_yaml::to_string(&root)?)?;
        tracing::info!(keys = ?added, "config file migrated");
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_existing_values_and_adds_the_rest() {
        let p = std::env::temp_dir().join("tiplogger_cfg_migrate.conf");
        fs::write(&p, "database: /data/tips.sqlite\ncustom: 1\n").unwrap();

        let added = add_missing_keys(&p).unwrap();
        assert_eq!(
            added,
            vec!["default_user", "week_start", "separator_char", "color_output"]
        );

        let cfg = Config::load_from(&p).unwrap();
        assert_eq!(cfg.database, "/data/tips.sqlite");
        assert!(fs::read_to_string(&p).unwrap().contains("custom: 1"));

        assert!(add_missing_keys(&p).unwrap().is_empty());
    }
}
