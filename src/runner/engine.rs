//! A realm bundled with the core classes, for embedding.

use tracing::debug;

use crate::runner::bridge::object_model::ConstructorId;
use crate::runner::bridge::type_registry::{SharedTypeRegistry, TypeRegistry};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::realm::Realm;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::config::RealmConfig;
use crate::runner::plugin::registry::{BuiltInRegistry, PluginError};

pub struct ScriptEngine {
    realm: Realm,
    installed: Vec<(String, ConstructorId)>,
}

impl ScriptEngine {
    /// An engine with every core class installed under its own name.
    pub fn new() -> Result<Self, PluginError> {
        ScriptEngine::with_config(&RealmConfig::default(), TypeRegistry::shared())
    }

    pub fn with_config(
        config: &RealmConfig,
        registry: SharedTypeRegistry,
    ) -> Result<Self, PluginError> {
        let realm = Realm::with_options(registry, config.formats.clone());
        let installed = BuiltInRegistry::with_core().install(&realm, config)?;
        debug!(classes = installed.len(), "script engine ready");
        Ok(ScriptEngine { realm, installed })
    }

    pub fn realm(&self) -> &Realm {
        &self.realm
    }

    pub fn installed(&self) -> &[(String, ConstructorId)] {
        &self.installed
    }

    pub fn global(&self, name: &str) -> Result<JsValue, JErrorType> {
        self.realm.get_global(name)
    }

    /// `new <name>(...args)` against a global constructor.
    pub fn construct(&self, name: &str, args: &[JsValue]) -> Result<JsValue, JErrorType> {
        let constructor = self.global(name)?;
        if constructor.is_undefined() {
            return Err(JErrorType::ReferenceError(format!("{} is not defined", name)));
        }
        self.realm.construct(&constructor, args)
    }

    /// `<name>(...args)` without `new`.
    pub fn call_global(&self, name: &str, args: &[JsValue]) -> Result<JsValue, JErrorType> {
        let function = self.global(name)?;
        if function.is_undefined() {
            return Err(JErrorType::ReferenceError(format!("{} is not defined", name)));
        }
        self.realm.call(&function, &JsValue::Undefined, args)
    }

    pub fn get(&self, target: &JsValue, name: &str) -> Result<JsValue, JErrorType> {
        match target {
            JsValue::Object(o) => self.realm.get(o, &PropertyKey::from(name), target),
            other => Err(JErrorType::TypeError(format!(
                "Cannot read property '{}' of {}",
                name, other
            ))),
        }
    }

    pub fn get_key(&self, target: &JsValue, key: &PropertyKey) -> Result<JsValue, JErrorType> {
        match target {
            JsValue::Object(o) => self.realm.get(o, key, target),
            other => Err(JErrorType::TypeError(format!(
                "Cannot read property '{}' of {}",
                key, other
            ))),
        }
    }

    pub fn set(&self, target: &JsValue, name: &str, value: JsValue) -> Result<bool, JErrorType> {
        match target {
            JsValue::Object(o) => self.realm.set(o, PropertyKey::from(name), value, target),
            other => Err(JErrorType::TypeError(format!(
                "Cannot set property '{}' of {}",
                name, other
            ))),
        }
    }

    /// `target.<name>(...args)`.
    pub fn call_method(&self, target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, JErrorType> {
        let method = self.get(target, name)?;
        self.realm.call(&method, target, args)
    }

    pub fn call_key(&self, target: &JsValue, key: &PropertyKey, args: &[JsValue]) -> Result<JsValue, JErrorType> {
        let method = self.get_key(target, key)?;
        self.realm.call(&method, target, args)
    }
}
