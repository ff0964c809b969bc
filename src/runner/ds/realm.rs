use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use crate::runner::bridge::object_model::{owning_constructor, ConstructorId, ConstructorRecord};
use crate::runner::bridge::type_registry::{SharedTypeRegistry, TypeRegistry};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::{FunctionKind, FunctionObject, NativeFn};
use crate::runner::ds::object::{ArrayObject, JsObjectType, ObjectType, OrdinaryObject};
use crate::runner::ds::object_property::{
    PropertyDescriptor, PropertyDescriptorSetter, PropertyKey,
};
use crate::runner::ds::operations::object::create_data_property;
use crate::runner::ds::operations::test_and_comparison::same_optional_object;
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::config::FormatConfig;
use crate::runner::std_lib::object::install_object_globals;

/// One script world: its intrinsic objects, its global object and the
/// constructors defined for exposed host types.
///
/// Property operations on constructor, prototype and instance objects go
/// through the realm so the owning constructor is initialized first.
pub struct Realm {
    pub(crate) registry: SharedTypeRegistry,
    pub(crate) constructors: RefCell<Vec<Rc<ConstructorRecord>>>,
    pub(crate) by_host_type: RefCell<HashMap<TypeId, ConstructorId>>,
    pub(crate) object_prototype: JsObjectType,
    pub(crate) function_prototype: JsObjectType,
    pub(crate) array_prototype: JsObjectType,
    pub(crate) global: JsObjectType,
    formats: FormatConfig,
}
impl Realm {
    pub fn new() -> Self {
        Realm::with_registry(TypeRegistry::shared())
    }

    /// A realm sharing host type metadata with other realms.
    pub fn with_registry(registry: SharedTypeRegistry) -> Self {
        Realm::with_options(registry, FormatConfig::default())
    }

    pub fn with_options(registry: SharedTypeRegistry, formats: FormatConfig) -> Self {
        let object_prototype = ObjectType::Ordinary(OrdinaryObject::new(None)).into_shared();
        let function_prototype =
            ObjectType::Ordinary(OrdinaryObject::new(Some(object_prototype.clone()))).into_shared();
        let array_prototype =
            ObjectType::Ordinary(OrdinaryObject::new(Some(object_prototype.clone()))).into_shared();
        let global =
            ObjectType::Ordinary(OrdinaryObject::new(Some(object_prototype.clone()))).into_shared();
        let realm = Realm {
            registry,
            constructors: RefCell::new(Vec::new()),
            by_host_type: RefCell::new(HashMap::new()),
            object_prototype,
            function_prototype,
            array_prototype,
            global,
            formats,
        };
        realm.set_default_global_bindings();
        install_object_globals(&realm);
        realm
    }

    fn set_default_global_bindings(&self) {
        let bindings = [
            ("Infinity", JsValue::Number(JsNumberType::PositiveInfinity)),
            ("NaN", JsValue::Number(JsNumberType::NaN)),
            ("undefined", JsValue::Undefined),
        ];
        let mut global = self.global.borrow_mut();
        let base = global.as_js_object_mut().get_object_base_mut();
        for (name, value) in bindings.iter() {
            base.fast_set(
                PropertyKey::from(*name),
                PropertyDescriptor::Data {
                    value: value.clone(),
                    writable: false,
                    enumerable: false,
                    configurable: false,
                },
            );
        }
    }

    pub fn registry(&self) -> &SharedTypeRegistry {
        &self.registry
    }

    pub fn formats(&self) -> &FormatConfig {
        &self.formats
    }

    pub fn global_object(&self) -> &JsObjectType {
        &self.global
    }

    pub fn object_prototype(&self) -> &JsObjectType {
        &self.object_prototype
    }

    pub fn function_prototype(&self) -> &JsObjectType {
        &self.function_prototype
    }

    pub fn array_prototype(&self) -> &JsObjectType {
        &self.array_prototype
    }

    pub fn create_object(&self) -> JsObjectType {
        ObjectType::Ordinary(OrdinaryObject::new(Some(self.object_prototype.clone()))).into_shared()
    }

    pub fn create_array(&self, elements: Vec<JsValue>) -> JsObjectType {
        ObjectType::Array(ArrayObject::new(
            Some(self.array_prototype.clone()),
            elements,
        ))
        .into_shared()
    }

    pub fn create_native_function(&self, name: &str, length: u32, f: NativeFn) -> JsObjectType {
        ObjectType::Function(FunctionObject::new(
            name.to_string(),
            length,
            FunctionKind::Native(f),
            Some(self.function_prototype.clone()),
        ))
        .into_shared()
    }

    /// Adds a writable, configurable, non-enumerable method to `target`.
    pub fn define_native_method(&self, target: &JsObjectType, name: &str, length: u32, f: NativeFn) {
        let function = self.create_native_function(name, length, f);
        target
            .borrow_mut()
            .as_js_object_mut()
            .get_object_base_mut()
            .fast_set(
                PropertyKey::from(name),
                PropertyDescriptor::Data {
                    value: JsValue::Object(function),
                    writable: true,
                    enumerable: false,
                    configurable: true,
                },
            );
    }

    /// Initializes the constructor behind `o`, if it has one.
    pub fn trigger_lazy(&self, o: &JsObjectType) {
        let owner = owning_constructor(&o.borrow());
        if let Some(id) = owner {
            self.ensure_initialized(id);
        }
    }

    pub fn get_prototype_of(&self, o: &JsObjectType) -> Option<JsObjectType> {
        let constructor = match &*o.borrow() {
            ObjectType::Instance(instance) if !instance.prototype_overridden => instance.constructor,
            other => return other.as_js_object().get_object_base().prototype.clone(),
        };
        self.prototype_object(constructor)
    }

    /// Returns `false`, changing nothing, when the object is not extensible
    /// or `prototype` would create a cycle.
    pub fn set_prototype_of(&self, o: &JsObjectType, prototype: Option<JsObjectType>) -> bool {
        let current = self.get_prototype_of(o);
        if !same_optional_object(&current, &prototype) {
            if !o.borrow().as_js_object().is_extensible() {
                return false;
            }
            let mut p = prototype.clone();
            while let Some(candidate) = p {
                if Rc::ptr_eq(&candidate, o) {
                    return false;
                }
                p = self.get_prototype_of(&candidate);
            }
        }
        let mut object = o.borrow_mut();
        if let ObjectType::Instance(instance) = &mut *object {
            instance.prototype_overridden = true;
        }
        object.as_js_object_mut().get_object_base_mut().prototype = prototype;
        trace!("prototype replaced");
        true
    }

    /// `value` must be an object or `null`.
    pub fn set_prototype_of_value(
        &self,
        o: &JsObjectType,
        value: &JsValue,
    ) -> Result<bool, JErrorType> {
        match value {
            JsValue::Object(p) => Ok(self.set_prototype_of(o, Some(p.clone()))),
            JsValue::Null => Ok(self.set_prototype_of(o, None)),
            other => Err(JErrorType::TypeError(format!(
                "Object prototype may only be an Object or null: {}",
                other
            ))),
        }
    }

    pub fn is_extensible(&self, o: &JsObjectType) -> bool {
        o.borrow().as_js_object().is_extensible()
    }

    pub fn prevent_extensions(&self, o: &JsObjectType) -> bool {
        self.trigger_lazy(o);
        o.borrow_mut().as_js_object_mut().prevent_extensions()
    }

    pub fn get_own_property(&self, o: &JsObjectType, p: &PropertyKey) -> Option<PropertyDescriptor> {
        self.trigger_lazy(o);
        o.borrow().as_js_object().get_own_property(p).cloned()
    }

    pub fn define_own_property(
        &self,
        o: &JsObjectType,
        p: PropertyKey,
        descriptor_setter: PropertyDescriptorSetter,
    ) -> bool {
        self.trigger_lazy(o);
        o.borrow_mut()
            .as_js_object_mut()
            .define_own_property(p, descriptor_setter)
    }

    pub fn has_own_property(&self, o: &JsObjectType, p: &PropertyKey) -> bool {
        self.get_own_property(o, p).is_some()
    }

    pub fn has_property(&self, o: &JsObjectType, p: &PropertyKey) -> bool {
        let mut current = Some(o.clone());
        while let Some(object) = current {
            if self.has_own_property(&object, p) {
                return true;
            }
            current = self.get_prototype_of(&object);
        }
        false
    }

    fn find_property(&self, o: &JsObjectType, p: &PropertyKey) -> Option<PropertyDescriptor> {
        let mut current = Some(o.clone());
        while let Some(object) = current {
            if let Some(descriptor) = self.get_own_property(&object, p) {
                return Some(descriptor);
            }
            current = self.get_prototype_of(&object);
        }
        None
    }

    /// [[Get]] along the prototype chain; getters run with `receiver` as
    /// `this`.
    pub fn get(&self, o: &JsObjectType, p: &PropertyKey, receiver: &JsValue) -> Result<JsValue, JErrorType> {
        match self.find_property(o, p) {
            Some(PropertyDescriptor::Data { value, .. }) => Ok(value),
            Some(PropertyDescriptor::Accessor { get: Some(getter), .. }) => {
                self.call(&JsValue::Object(getter), receiver, &[])
            }
            Some(PropertyDescriptor::Accessor { get: None, .. }) | None => Ok(JsValue::Undefined),
        }
    }

    /// [[Set]]: `Ok(false)` when the assignment is refused.
    pub fn set(
        &self,
        o: &JsObjectType,
        p: PropertyKey,
        value: JsValue,
        receiver: &JsValue,
    ) -> Result<bool, JErrorType> {
        match self.find_property(o, &p) {
            Some(PropertyDescriptor::Accessor { set: Some(setter), .. }) => {
                self.call(&JsValue::Object(setter), receiver, &[value])?;
                Ok(true)
            }
            Some(PropertyDescriptor::Accessor { set: None, .. }) => Ok(false),
            Some(PropertyDescriptor::Data {
                writable: false, ..
            }) => Ok(false),
            _ => {
                let receiver = match receiver {
                    JsValue::Object(r) => r,
                    _ => return Ok(false),
                };
                match self.get_own_property(receiver, &p) {
                    Some(existing) => {
                        if existing.is_accessor_descriptor() || !existing.is_writable() {
                            return Ok(false);
                        }
                        Ok(self.define_own_property(
                            receiver,
                            p,
                            PropertyDescriptorSetter::value_only(value),
                        ))
                    }
                    None => Ok(create_data_property(self, receiver, p, value)),
                }
            }
        }
    }

    pub fn delete(&self, o: &JsObjectType, p: &PropertyKey) -> bool {
        self.trigger_lazy(o);
        o.borrow_mut().as_js_object_mut().delete(p)
    }

    pub fn own_property_keys(&self, o: &JsObjectType) -> Vec<PropertyKey> {
        self.trigger_lazy(o);
        o.borrow().as_js_object().own_property_keys()
    }

    pub fn call(&self, f: &JsValue, this: &JsValue, args: &[JsValue]) -> Result<JsValue, JErrorType> {
        let function = match f {
            JsValue::Object(o) => match &*o.borrow() {
                ObjectType::Function(function) => Some((function.kind.clone(), function.name.to_string())),
                _ => None,
            },
            _ => None,
        };
        match function {
            Some((FunctionKind::Native(native), _)) => native(self, this, args),
            Some((FunctionKind::Adapter(adapter), _)) => adapter.invoke(self, this, args),
            Some((FunctionKind::Constructor(_), name)) => Err(JErrorType::TypeError(format!(
                "{} constructor: 'new' is required",
                name
            ))),
            None => Err(JErrorType::TypeError(format!("{} is not a function", f))),
        }
    }

    pub fn construct(&self, f: &JsValue, args: &[JsValue]) -> Result<JsValue, JErrorType> {
        let function = match f {
            JsValue::Object(o) => match &*o.borrow() {
                ObjectType::Function(function) => Some((function.kind.clone(), function.name.to_string())),
                _ => None,
            },
            _ => None,
        };
        match function {
            Some((FunctionKind::Constructor(id), _)) => self.construct_instance(id, args),
            Some((FunctionKind::Native(native), _)) => native(self, &JsValue::Undefined, args),
            Some((FunctionKind::Adapter(_), name)) => Err(JErrorType::TypeError(format!(
                "{} is not a constructor",
                name
            ))),
            None => Err(JErrorType::TypeError(format!("{} is not a constructor", f))),
        }
    }

    /// `value instanceof constructor`, by walking `value`'s prototype chain.
    pub fn instance_of(&self, value: &JsValue, constructor: &JsObjectType) -> Result<bool, JErrorType> {
        let object = match value {
            JsValue::Object(o) => o,
            _ => return Ok(false),
        };
        let target = match self.get(
            constructor,
            &PropertyKey::from("prototype"),
            &JsValue::Object(constructor.clone()),
        )? {
            JsValue::Object(p) => p,
            _ => {
                return Err(JErrorType::TypeError(
                    "Function has non-object prototype in instanceof check".to_string(),
                ))
            }
        };
        let mut current = self.get_prototype_of(object);
        while let Some(p) = current {
            if Rc::ptr_eq(&p, &target) {
                return Ok(true);
            }
            current = self.get_prototype_of(&p);
        }
        Ok(false)
    }

    pub fn get_global(&self, name: &str) -> Result<JsValue, JErrorType> {
        let global = self.global.clone();
        self.get(&global, &PropertyKey::from(name), &JsValue::Object(global.clone()))
    }
}
impl Default for Realm {
    fn default() -> Self {
        Realm::new()
    }
}
impl Drop for Realm {
    /// Constructor and prototype objects point at each other; clearing them
    /// releases the cycles.
    fn drop(&mut self) {
        for record in self.constructors.borrow().iter() {
            record
                .function
                .borrow_mut()
                .as_js_object_mut()
                .get_object_base_mut()
                .clear();
            record
                .prototype
                .borrow_mut()
                .as_js_object_mut()
                .get_object_base_mut()
                .clear();
        }
        for intrinsic in [
            &self.object_prototype,
            &self.function_prototype,
            &self.array_prototype,
            &self.global,
        ]
        .iter()
        {
            intrinsic
                .borrow_mut()
                .as_js_object_mut()
                .get_object_base_mut()
                .clear();
        }
    }
}
