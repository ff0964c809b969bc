use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::runner::bridge::object_model::{InstanceObject, PrototypeObject};
use crate::runner::ds::function_object::FunctionObject;
use crate::runner::ds::object_property::{
    same_function, PropertyDescriptor, PropertyDescriptorSetter, PropertyKey,
};
use crate::runner::ds::operations::test_and_comparison::same_value;
use crate::runner::ds::value::JsValue;

pub type JsObjectType = Rc<RefCell<ObjectType>>;

pub enum ObjectType {
    Ordinary(OrdinaryObject),
    Array(ArrayObject),
    Function(FunctionObject),
    Prototype(PrototypeObject),
    Instance(InstanceObject),
}
impl ObjectType {
    pub fn is_callable(&self) -> bool {
        matches!(self, ObjectType::Function(_))
    }

    pub fn as_js_object(&self) -> &dyn JsObject {
        match self {
            ObjectType::Ordinary(o) => o,
            ObjectType::Array(o) => o,
            ObjectType::Function(o) => o,
            ObjectType::Prototype(o) => o,
            ObjectType::Instance(o) => o,
        }
    }

    pub fn as_js_object_mut(&mut self) -> &mut dyn JsObject {
        match self {
            ObjectType::Ordinary(o) => o,
            ObjectType::Array(o) => o,
            ObjectType::Function(o) => o,
            ObjectType::Prototype(o) => o,
            ObjectType::Instance(o) => o,
        }
    }

    pub fn into_shared(self) -> JsObjectType {
        Rc::new(RefCell::new(self))
    }
}

pub struct ObjectBase {
    pub(crate) properties: IndexMap<PropertyKey, PropertyDescriptor>,
    pub(crate) is_extensible: bool,
    pub(crate) prototype: Option<JsObjectType>,
}
impl ObjectBase {
    pub fn new() -> Self {
        ObjectBase {
            properties: IndexMap::new(),
            is_extensible: true,
            prototype: None,
        }
    }

    pub fn with_prototype(prototype: Option<JsObjectType>) -> Self {
        ObjectBase {
            properties: IndexMap::new(),
            is_extensible: true,
            prototype,
        }
    }

    /// Inserts or replaces a property without the usual validation. Only for
    /// objects that are still being set up.
    pub(crate) fn fast_set(&mut self, property: PropertyKey, descriptor: PropertyDescriptor) {
        self.properties.insert(property, descriptor);
    }

    pub(crate) fn clear(&mut self) {
        self.properties.clear();
        self.prototype = None;
    }
}
impl Default for ObjectBase {
    fn default() -> Self {
        ObjectBase::new()
    }
}

/// Own-property storage shared by every object kind. Anything that needs the
/// prototype chain, a realm, or lazy initialization lives on `Realm` instead.
pub trait JsObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase;

    fn get_object_base(&self) -> &ObjectBase;

    fn class_name(&self) -> &'static str {
        "Object"
    }

    fn is_extensible(&self) -> bool {
        self.get_object_base().is_extensible
    }

    fn prevent_extensions(&mut self) -> bool {
        self.get_object_base_mut().is_extensible = false;
        true
    }

    fn get_own_property(&self, property: &PropertyKey) -> Option<&PropertyDescriptor> {
        self.get_object_base().properties.get(property)
    }

    fn define_own_property(
        &mut self,
        property: PropertyKey,
        descriptor_setter: PropertyDescriptorSetter,
    ) -> bool {
        ordinary_define_own_property(self, property, descriptor_setter)
    }

    fn delete(&mut self, property: &PropertyKey) -> bool {
        match self.get_own_property(property) {
            None => true,
            Some(pd) => {
                if pd.is_configurable() {
                    self.get_object_base_mut().properties.shift_remove(property);
                    true
                } else {
                    false
                }
            }
        }
    }

    fn own_property_keys(&self) -> Vec<PropertyKey> {
        let mut int_keys = vec![];
        let mut str_keys = vec![];
        let mut sym_keys = vec![];
        for key in self.get_object_base().properties.keys() {
            match key {
                PropertyKey::Str(_) => str_keys.push(key.clone()),
                PropertyKey::Int(d) => int_keys.push(*d),
                PropertyKey::Sym(_) => sym_keys.push(key.clone()),
            }
        }
        int_keys.sort_unstable();

        let mut result: Vec<PropertyKey> = int_keys.into_iter().map(PropertyKey::Int).collect();
        result.append(&mut str_keys);
        result.append(&mut sym_keys);
        result
    }
}

pub struct OrdinaryObject {
    object_base: ObjectBase,
}
impl OrdinaryObject {
    pub fn new(prototype: Option<JsObjectType>) -> Self {
        OrdinaryObject {
            object_base: ObjectBase::with_prototype(prototype),
        }
    }
}
impl JsObject for OrdinaryObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }
}

/// Dense array: elements live under `Int` keys next to a `length` data
/// property.
pub struct ArrayObject {
    object_base: ObjectBase,
}
impl ArrayObject {
    pub fn new(prototype: Option<JsObjectType>, elements: Vec<JsValue>) -> Self {
        let mut object_base = ObjectBase::with_prototype(prototype);
        let length = elements.len();
        for (index, value) in elements.into_iter().enumerate() {
            object_base.fast_set(
                PropertyKey::Int(index as u32),
                PropertyDescriptor::Data {
                    value,
                    writable: true,
                    enumerable: true,
                    configurable: true,
                },
            );
        }
        object_base.fast_set(
            PropertyKey::Str("length".to_string()),
            PropertyDescriptor::Data {
                value: JsValue::integer(length as i64),
                writable: true,
                enumerable: false,
                configurable: false,
            },
        );
        ArrayObject { object_base }
    }
}
impl JsObject for ArrayObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }

    fn class_name(&self) -> &'static str {
        "Array"
    }
}

pub fn ordinary_define_own_property<J: JsObject + ?Sized>(
    o: &mut J,
    property: PropertyKey,
    descriptor_setter: PropertyDescriptorSetter,
) -> bool {
    let current = match o.get_own_property(&property) {
        None => {
            if !o.is_extensible() {
                return false;
            }
            o.get_object_base_mut().properties.insert(
                property,
                PropertyDescriptor::new_from_property_descriptor_setter(descriptor_setter),
            );
            return true;
        }
        Some(current) => current.clone(),
    };
    if descriptor_setter.is_empty() {
        return true;
    }
    if !current.is_configurable() {
        let descriptor = &descriptor_setter.descriptor;
        if descriptor_setter.honour_configurable && descriptor.is_configurable() {
            return false;
        }
        if descriptor_setter.honour_enumerable
            && descriptor.is_enumerable() != current.is_enumerable()
        {
            return false;
        }
        if !descriptor_setter.is_generic_descriptor()
            && current.is_data_descriptor() != descriptor.is_data_descriptor()
        {
            return false;
        }
        match (&current, descriptor) {
            (
                PropertyDescriptor::Data {
                    writable: false,
                    value: current_value,
                    ..
                },
                PropertyDescriptor::Data {
                    writable: desc_writable,
                    value: desc_value,
                    ..
                },
            ) => {
                if descriptor_setter.honour_writable && *desc_writable {
                    return false;
                }
                if descriptor_setter.honour_value && !same_value(current_value, desc_value) {
                    return false;
                }
            }
            (
                PropertyDescriptor::Accessor {
                    get: current_get,
                    set: current_set,
                    ..
                },
                PropertyDescriptor::Accessor {
                    get: desc_get,
                    set: desc_set,
                    ..
                },
            ) => {
                if descriptor_setter.honour_get && !same_function(current_get, desc_get) {
                    return false;
                }
                if descriptor_setter.honour_set && !same_function(current_set, desc_set) {
                    return false;
                }
            }
            _ => {}
        }
    }
    let merged = descriptor_setter.merge_into(current);
    o.get_object_base_mut().properties.insert(property, merged);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(value: JsValue, writable: bool, configurable: bool) -> PropertyDescriptorSetter {
        PropertyDescriptorSetter::new_from_property_descriptor(PropertyDescriptor::Data {
            value,
            writable,
            enumerable: true,
            configurable,
        })
    }

    #[test]
    fn test_non_configurable_property_rejects_redefinition() {
        let mut o = OrdinaryObject::new(None);
        let key = PropertyKey::from("x");
        assert!(o.define_own_property(key.clone(), data(JsValue::integer(1), false, false)));
        assert!(!o.define_own_property(key.clone(), data(JsValue::integer(2), false, false)));
        assert!(o.define_own_property(key.clone(), data(JsValue::integer(1), false, false)));
        assert!(!o.delete(&key));
    }

    #[test]
    fn test_non_extensible_object_rejects_new_properties() {
        let mut o = OrdinaryObject::new(None);
        o.prevent_extensions();
        assert!(!o.define_own_property(PropertyKey::from("x"), data(JsValue::Null, true, true)));
    }

    #[test]
    fn test_own_keys_put_integers_first_in_ascending_order() {
        let mut o = OrdinaryObject::new(None);
        for key in &["b", "2", "a", "0"] {
            o.define_own_property(PropertyKey::from(*key), data(JsValue::Null, true, true));
        }
        assert_eq!(
            o.own_property_keys(),
            vec![
                PropertyKey::Int(0),
                PropertyKey::Int(2),
                PropertyKey::from("b"),
                PropertyKey::from("a"),
            ]
        );
    }

    #[test]
    fn test_array_exposes_length() {
        let a = ArrayObject::new(None, vec![JsValue::integer(1), JsValue::integer(2)]);
        assert_eq!(
            a.get_own_property(&PropertyKey::from("length"))
                .and_then(|d| d.value().cloned()),
            Some(JsValue::integer(2))
        );
    }
}
