use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyDescriptorSetter, PropertyKey};
use crate::runner::ds::operations::type_conversion::to_integer;
use crate::runner::ds::realm::Realm;
use crate::runner::ds::value::JsValue;

/// GetV: property lookup on any value. Only objects have properties here, so
/// primitives read as `undefined`.
pub fn get_v(realm: &Realm, v: &JsValue, p: &PropertyKey) -> Result<JsValue, JErrorType> {
    match v {
        JsValue::Object(o) => realm.get(o, p, v),
        JsValue::Undefined | JsValue::Null => Err(JErrorType::TypeError(format!(
            "Cannot read property '{}' of {}",
            p, v
        ))),
        _ => Ok(JsValue::Undefined),
    }
}

/// GetMethod: `None` for an absent (undefined or null) method.
pub fn get_method(
    realm: &Realm,
    v: &JsValue,
    p: &PropertyKey,
) -> Result<Option<JsValue>, JErrorType> {
    let f = get_v(realm, v, p)?;
    match &f {
        JsValue::Undefined | JsValue::Null => Ok(None),
        JsValue::Object(o) if o.borrow().is_callable() => Ok(Some(f)),
        _ => Err(JErrorType::TypeError(format!("'{}' is not a function", p))),
    }
}

pub fn create_data_property(
    realm: &Realm,
    o: &JsObjectType,
    p: PropertyKey,
    value: JsValue,
) -> bool {
    realm.define_own_property(
        o,
        p,
        PropertyDescriptorSetter::new_from_property_descriptor(PropertyDescriptor::Data {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }),
    )
}

/// Reads an array-like into a vector using its `length` property.
pub fn create_list_from_array_like(
    realm: &Realm,
    v: &JsValue,
) -> Result<Vec<JsValue>, JErrorType> {
    let o = match v {
        JsValue::Object(o) => o,
        _ => {
            return Err(JErrorType::TypeError(format!(
                "{} is not an array-like object",
                v
            )))
        }
    };
    let length = to_integer(realm, &realm.get(o, &PropertyKey::from("length"), v)?)?;
    let length = if length.is_finite() && length > 0.0 {
        length as u32
    } else {
        0
    };
    let mut list = Vec::with_capacity(length as usize);
    for index in 0..length {
        list.push(realm.get(o, &PropertyKey::Int(index), v)?);
    }
    Ok(list)
}
