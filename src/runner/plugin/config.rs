//! Realm configuration file parsing.
//!
//! Expected format:
//! ```toml
//! [[classes]]
//! name = "WmDate"
//!
//! [[classes]]
//! name = "Uuid"
//! global = "Guid"
//!
//! [[classes]]
//! name = "WmTime"
//! enabled = false
//!
//! [formats]
//! date = "yyyy-MM-dd"
//! locale_time = "hh:mm tt"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::registry::PluginError;

/// One exposed class to install.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassConfig {
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Global binding name; defaults to the class name.
    #[serde(default)]
    pub global: Option<String>,
}
impl ClassConfig {
    pub fn new(name: &str) -> Self {
        ClassConfig {
            name: name.to_string(),
            enabled: true,
            global: None,
        }
    }

    pub fn global_name(&self) -> &str {
        self.global.as_deref().unwrap_or(&self.name)
    }
}

fn default_enabled() -> bool {
    true
}

/// Patterns used by the date and time types when turned into strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    pub date: String,
    pub locale_date: String,
    pub time: String,
    pub locale_time: String,
}
impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            date: "yyyy-MM-dd".to_string(),
            locale_date: "MM/dd/yyyy".to_string(),
            time: "HH:mm".to_string(),
            locale_time: "hh:mm tt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RealmConfig {
    pub classes: Vec<ClassConfig>,
    pub formats: FormatConfig,
}
impl RealmConfig {
    pub fn new() -> Self {
        RealmConfig::default()
    }

    pub fn parse(content: &str) -> Result<Self, PluginError> {
        toml::from_str(content).map_err(|e| PluginError::InvalidConfig(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, PluginError> {
        let content = fs::read_to_string(path).map_err(|source| PluginError::Io {
            path: path.display().to_string(),
            source,
        })?;
        RealmConfig::parse(&content)
    }

    pub fn enabled_classes(&self) -> impl Iterator<Item = &ClassConfig> {
        self.classes.iter().filter(|c| c.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_classes_and_formats() {
        let config = RealmConfig::parse(
            r#"
[[classes]]
name = "WmDate"

[[classes]]
name = "Uuid"
global = "Guid"

[[classes]]
name = "WmTime"
enabled = false

[formats]
date = "dd.MM.yyyy"
"#,
        )
        .unwrap();
        assert_eq!(config.classes.len(), 3);
        assert_eq!(config.classes[1].global_name(), "Guid");
        assert_eq!(config.classes[0].global_name(), "WmDate");
        let enabled: Vec<&str> = config.enabled_classes().map(|c| c.name.as_str()).collect();
        assert_eq!(enabled, vec!["WmDate", "Uuid"]);
        assert_eq!(config.formats.date, "dd.MM.yyyy");
        assert_eq!(config.formats.time, "HH:mm");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RealmConfig::parse("").unwrap();
        assert!(config.classes.is_empty());
        assert_eq!(config.formats, FormatConfig::default());
    }

    #[test]
    fn test_invalid_config_is_reported() {
        assert!(matches!(
            RealmConfig::parse("[[classes]]\nenabled = 3"),
            Err(PluginError::InvalidConfig(_))
        ));
    }
}
