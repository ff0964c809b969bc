//! Object and Reflect built-ins.
//!
//! Only the prototype-related helpers and the few methods scripts need to
//! inspect exposed objects are provided.

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{JsObjectType, ObjectType};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::operations::type_conversion::{to_object, to_string};
use crate::runner::ds::realm::Realm;
use crate::runner::ds::symbol::SYMBOL_TO_STRING_TAG;
use crate::runner::ds::value::JsValue;

/// Installs `Object`, `Object.prototype`'s methods and `Reflect` on the
/// realm's global object.
pub fn install_object_globals(realm: &Realm) {
    let object = realm.create_native_function("Object", 1, object_constructor);
    let prototype = realm.object_prototype().clone();
    {
        let mut o = object.borrow_mut();
        let base = o.as_js_object_mut().get_object_base_mut();
        base.fast_set(
            PropertyKey::from("prototype"),
            PropertyDescriptor::Data {
                value: JsValue::Object(prototype.clone()),
                writable: false,
                enumerable: false,
                configurable: false,
            },
        );
    }
    prototype
        .borrow_mut()
        .as_js_object_mut()
        .get_object_base_mut()
        .fast_set(
            PropertyKey::from("constructor"),
            PropertyDescriptor::Data {
                value: JsValue::Object(object.clone()),
                writable: true,
                enumerable: false,
                configurable: true,
            },
        );

    realm.define_native_method(&object, "getPrototypeOf", 1, object_get_prototype_of);
    realm.define_native_method(&object, "setPrototypeOf", 2, object_set_prototype_of);
    realm.define_native_method(&object, "getOwnPropertyNames", 1, object_get_own_property_names);
    realm.define_native_method(&object, "keys", 1, object_keys);

    realm.define_native_method(&prototype, "toString", 0, object_to_string);
    realm.define_native_method(&prototype, "valueOf", 0, object_value_of);
    realm.define_native_method(&prototype, "hasOwnProperty", 1, object_has_own_property);

    let reflect = realm.create_object();
    realm.define_native_method(&reflect, "getPrototypeOf", 1, reflect_get_prototype_of);
    realm.define_native_method(&reflect, "setPrototypeOf", 2, reflect_set_prototype_of);

    let global = realm.global_object().clone();
    let mut g = global.borrow_mut();
    let base = g.as_js_object_mut().get_object_base_mut();
    for (name, value) in [("Object", object), ("Reflect", reflect)].iter() {
        base.fast_set(
            PropertyKey::from(*name),
            PropertyDescriptor::Data {
                value: JsValue::Object(value.clone()),
                writable: true,
                enumerable: false,
                configurable: true,
            },
        );
    }
}

fn arg(args: &[JsValue], index: usize) -> JsValue {
    args.get(index).cloned().unwrap_or(JsValue::Undefined)
}

fn prototype_value(p: Option<JsObjectType>) -> JsValue {
    match p {
        Some(p) => JsValue::Object(p),
        None => JsValue::Null,
    }
}

/// Object(value): a new object for `undefined` or `null`, otherwise the value
/// itself.
fn object_constructor(realm: &Realm, _this: &JsValue, args: &[JsValue]) -> Result<JsValue, JErrorType> {
    match arg(args, 0) {
        JsValue::Undefined | JsValue::Null => Ok(JsValue::Object(realm.create_object())),
        other => Ok(other),
    }
}

/// Object.getPrototypeOf
fn object_get_prototype_of(realm: &Realm, _this: &JsValue, args: &[JsValue]) -> Result<JsValue, JErrorType> {
    let o = to_object(&arg(args, 0))?;
    Ok(prototype_value(realm.get_prototype_of(&o)))
}

/// Object.setPrototypeOf: throws when the prototype is refused.
fn object_set_prototype_of(realm: &Realm, _this: &JsValue, args: &[JsValue]) -> Result<JsValue, JErrorType> {
    let target = arg(args, 0);
    let o = to_object(&target)?;
    if realm.set_prototype_of_value(&o, &arg(args, 1))? {
        Ok(target)
    } else {
        Err(JErrorType::TypeError(format!(
            "Cannot set prototype of {}",
            target
        )))
    }
}

fn own_string_keys(realm: &Realm, o: &JsObjectType, enumerable_only: bool) -> Vec<JsValue> {
    realm
        .own_property_keys(o)
        .into_iter()
        .filter(|key| !matches!(key, PropertyKey::Sym(_)))
        .filter(|key| {
            !enumerable_only
                || realm
                    .get_own_property(o, key)
                    .map(|d| d.is_enumerable())
                    .unwrap_or(false)
        })
        .map(|key| JsValue::String(key.to_string()))
        .collect()
}

/// Object.getOwnPropertyNames
fn object_get_own_property_names(
    realm: &Realm,
    _this: &JsValue,
    args: &[JsValue],
) -> Result<JsValue, JErrorType> {
    let o = to_object(&arg(args, 0))?;
    Ok(JsValue::Object(realm.create_array(own_string_keys(realm, &o, false))))
}

/// Object.keys
fn object_keys(realm: &Realm, _this: &JsValue, args: &[JsValue]) -> Result<JsValue, JErrorType> {
    let o = to_object(&arg(args, 0))?;
    Ok(JsValue::Object(realm.create_array(own_string_keys(realm, &o, true))))
}

/// Object.prototype.toString
fn object_to_string(realm: &Realm, this: &JsValue, _args: &[JsValue]) -> Result<JsValue, JErrorType> {
    let tag = match this {
        JsValue::Undefined => "Undefined".to_string(),
        JsValue::Null => "Null".to_string(),
        JsValue::Boolean(_) => "Boolean".to_string(),
        JsValue::Number(_) => "Number".to_string(),
        JsValue::String(_) => "String".to_string(),
        JsValue::Symbol(_) => "Symbol".to_string(),
        JsValue::Object(o) => {
            match realm.get(o, &PropertyKey::Sym(SYMBOL_TO_STRING_TAG.clone()), this)? {
                JsValue::String(tag) => tag,
                _ => match &*o.borrow() {
                    ObjectType::Array(_) => "Array".to_string(),
                    ObjectType::Function(_) => "Function".to_string(),
                    _ => "Object".to_string(),
                },
            }
        }
    };
    Ok(JsValue::String(format!("[object {}]", tag)))
}

/// Object.prototype.valueOf
fn object_value_of(_realm: &Realm, this: &JsValue, _args: &[JsValue]) -> Result<JsValue, JErrorType> {
    Ok(this.clone())
}

/// Object.prototype.hasOwnProperty
fn object_has_own_property(realm: &Realm, this: &JsValue, args: &[JsValue]) -> Result<JsValue, JErrorType> {
    let key = match arg(args, 0) {
        JsValue::Symbol(s) => PropertyKey::Sym(s),
        other => PropertyKey::from_str_key(&to_string(realm, &other)?),
    };
    let o = to_object(this)?;
    Ok(JsValue::Boolean(realm.has_own_property(&o, &key)))
}

/// Reflect.getPrototypeOf: the target must be an object.
fn reflect_get_prototype_of(realm: &Realm, _this: &JsValue, args: &[JsValue]) -> Result<JsValue, JErrorType> {
    match arg(args, 0) {
        JsValue::Object(o) => Ok(prototype_value(realm.get_prototype_of(&o))),
        other => Err(JErrorType::TypeError(format!(
            "Reflect.getPrototypeOf called on non-object {}",
            other
        ))),
    }
}

/// Reflect.setPrototypeOf: reports refusal as `false`.
fn reflect_set_prototype_of(realm: &Realm, _this: &JsValue, args: &[JsValue]) -> Result<JsValue, JErrorType> {
    match arg(args, 0) {
        JsValue::Object(o) => Ok(JsValue::Boolean(realm.set_prototype_of_value(&o, &arg(args, 1))?)),
        other => Err(JErrorType::TypeError(format!(
            "Reflect.setPrototypeOf called on non-object {}",
            other
        ))),
    }
}
