//! Registry of exposed classes that can be installed into a realm.

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, warn};

use super::config::{ClassConfig, RealmConfig};
use crate::runner::bridge::error::ConfigError;
use crate::runner::bridge::object_model::ConstructorId;
use crate::runner::ds::realm::Realm;
use crate::runner::std_lib::register_core_classes;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Realm config error: {0}")]
    InvalidConfig(String),
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Class registration error: {0}")]
    Registration(#[from] ConfigError),
    #[error("Class not found: {0}")]
    ClassNotFound(String),
}

/// Defines one exposed class in a realm, returning its constructor.
pub type ClassInstaller = fn(&Realm) -> Result<ConstructorId, ConfigError>;

/// Exposed classes by name, in registration order.
pub struct BuiltInRegistry {
    classes: IndexMap<String, ClassInstaller>,
}

impl BuiltInRegistry {
    pub fn new() -> Self {
        BuiltInRegistry {
            classes: IndexMap::new(),
        }
    }

    /// A registry holding the classes that ship with the crate.
    pub fn with_core() -> Self {
        let mut registry = BuiltInRegistry::new();
        register_core_classes(&mut registry);
        registry
    }

    /// Registers `installer` under `name`, replacing any earlier entry.
    pub fn register_class(&mut self, name: &str, installer: ClassInstaller) {
        self.classes.insert(name.to_string(), installer);
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn class_names(&self) -> Vec<&str> {
        self.classes.keys().map(|k| k.as_str()).collect()
    }

    /// Defines and installs one class as a global.
    pub fn install_class(
        &self,
        realm: &Realm,
        class: &ClassConfig,
    ) -> Result<ConstructorId, PluginError> {
        let installer = self
            .classes
            .get(&class.name)
            .ok_or_else(|| PluginError::ClassNotFound(class.name.to_string()))?;
        let id = installer(realm)?;
        realm.install_global(id, class.global_name())?;
        Ok(id)
    }

    /// Installs the classes `config` lists, or every registered class when it
    /// lists none. Disabled and unknown entries are skipped with a warning.
    pub fn install(
        &self,
        realm: &Realm,
        config: &RealmConfig,
    ) -> Result<Vec<(String, ConstructorId)>, PluginError> {
        let classes: Vec<ClassConfig> = if config.classes.is_empty() {
            self.classes.keys().map(|name| ClassConfig::new(name)).collect()
        } else {
            config.classes.clone()
        };
        let mut installed = Vec::with_capacity(classes.len());
        for class in classes.iter() {
            if !class.enabled {
                warn!(class = %class.name, "class disabled in config, skipping");
                continue;
            }
            if !self.has_class(&class.name) {
                warn!(class = %class.name, "class not registered, skipping");
                continue;
            }
            let id = self.install_class(realm, class)?;
            debug!(class = %class.name, global = class.global_name(), "class installed");
            installed.push((class.global_name().to_string(), id));
        }
        Ok(installed)
    }
}

impl Default for BuiltInRegistry {
    fn default() -> Self {
        BuiltInRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_registry_lists_classes_in_order() {
        let registry = BuiltInRegistry::with_core();
        assert_eq!(registry.class_names(), vec!["WmDate", "WmTime", "Uuid"]);
    }

    #[test]
    fn test_install_honours_config() {
        let registry = BuiltInRegistry::with_core();
        let realm = Realm::new();
        let config = RealmConfig::parse(
            r#"
[[classes]]
name = "Uuid"
global = "Guid"

[[classes]]
name = "WmTime"
enabled = false

[[classes]]
name = "Missing"
"#,
        )
        .unwrap();
        let installed = registry.install(&realm, &config).unwrap();
        assert_eq!(installed.len(), 1);
        assert_eq!(installed[0].0, "Guid");
        assert!(realm.get_global("Guid").unwrap().is_object());
        assert!(realm.get_global("WmTime").unwrap().is_undefined());
    }

    #[test]
    fn test_unknown_class_is_an_error_when_installed_directly() {
        let registry = BuiltInRegistry::new();
        let realm = Realm::new();
        assert!(matches!(
            registry.install_class(&realm, &ClassConfig::new("Nope")),
            Err(PluginError::ClassNotFound(_))
        ));
    }
}
