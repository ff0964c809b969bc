use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{JsObjectType, ObjectType};
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::get_method;
use crate::runner::ds::realm::Realm;
use crate::runner::ds::symbol::SYMBOL_TO_PRIMITIVE;
use crate::runner::ds::value::{JsNumberType, JsValue};

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_SYMBOL: &str = "symbol";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

/// The `typeof` string of a value.
pub fn get_type(a: &JsValue) -> &'static str {
    match a {
        JsValue::Undefined => TYPE_STR_UNDEFINED,
        JsValue::Null => TYPE_STR_OBJECT,
        JsValue::Boolean(_) => TYPE_STR_BOOLEAN,
        JsValue::String(_) => TYPE_STR_STRING,
        JsValue::Symbol(_) => TYPE_STR_SYMBOL,
        JsValue::Number(_) => TYPE_STR_NUMBER,
        JsValue::Object(o) => {
            if o.borrow().is_callable() {
                TYPE_STR_FUNCTION
            } else {
                TYPE_STR_OBJECT
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PreferredType {
    Default,
    String,
    Number,
}
impl PreferredType {
    pub fn hint(&self) -> &'static str {
        match self {
            PreferredType::Default => "default",
            PreferredType::String => TYPE_STR_STRING,
            PreferredType::Number => TYPE_STR_NUMBER,
        }
    }
}

pub fn to_primitive(
    realm: &Realm,
    v: &JsValue,
    preferred_type: PreferredType,
) -> Result<JsValue, JErrorType> {
    match v {
        JsValue::Object(_) => {
            let key = PropertyKey::Sym(SYMBOL_TO_PRIMITIVE.clone());
            if let Some(exotic) = get_method(realm, v, &key)? {
                let result = realm.call(
                    &exotic,
                    v,
                    &[JsValue::String(preferred_type.hint().to_string())],
                )?;
                if result.is_object() {
                    return Err(JErrorType::TypeError(
                        "Cannot convert object to primitive value".to_string(),
                    ));
                }
                return Ok(result);
            }
            let preferred_type = match preferred_type {
                PreferredType::Default => PreferredType::Number,
                p => p,
            };
            ordinary_to_primitive(realm, v, preferred_type)
        }
        _ => Ok(v.clone()),
    }
}

fn ordinary_to_primitive(
    realm: &Realm,
    o: &JsValue,
    hint: PreferredType,
) -> Result<JsValue, JErrorType> {
    let method_names = match hint {
        PreferredType::String => ["toString", "valueOf"],
        _ => ["valueOf", "toString"],
    };
    for name in method_names.iter() {
        if let Some(method) = get_method(realm, o, &PropertyKey::from(*name))? {
            let result = realm.call(&method, o, &[])?;
            if !result.is_object() {
                return Ok(result);
            }
        }
    }
    Err(JErrorType::TypeError(
        "Cannot convert object to primitive value".to_string(),
    ))
}

pub fn to_boolean(v: &JsValue) -> bool {
    match v {
        JsValue::Undefined | JsValue::Null => false,
        JsValue::Boolean(b) => *b,
        JsValue::String(s) => !s.is_empty(),
        JsValue::Symbol(_) => true,
        JsValue::Number(n) => match n {
            JsNumberType::Integer(i) => *i != 0,
            JsNumberType::Float(f) => *f != 0.0,
            JsNumberType::NaN => false,
            JsNumberType::PositiveInfinity | JsNumberType::NegativeInfinity => true,
        },
        JsValue::Object(_) => true,
    }
}

pub fn to_number(realm: &Realm, v: &JsValue) -> Result<f64, JErrorType> {
    match v {
        JsValue::Undefined => Ok(f64::NAN),
        JsValue::Null => Ok(0.0),
        JsValue::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        JsValue::String(s) => Ok(string_to_number(s)),
        JsValue::Symbol(s) => Err(JErrorType::TypeError(format!(
            "'{}' symbol cannot be converted to number",
            s
        ))),
        JsValue::Number(n) => Ok(n.as_f64()),
        JsValue::Object(_) => {
            let pv = to_primitive(realm, v, PreferredType::Number)?;
            to_number(realm, &pv)
        }
    }
}

/// ToIntegerOrInfinity: truncates toward zero, `NaN` becomes 0.
pub fn to_integer(realm: &Realm, v: &JsValue) -> Result<f64, JErrorType> {
    let n = to_number(realm, v)?;
    if n.is_nan() {
        Ok(0.0)
    } else {
        Ok(n.trunc())
    }
}

/// StringToNumber. Surrounding whitespace is ignored and an empty string is 0;
/// anything that is not a decimal, hex, binary or octal literal is `NaN`.
pub fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0b", 2), ("0B", 2), ("0o", 8), ("0O", 8)].iter() {
        if let Some(digits) = s.strip_prefix(*prefix) {
            return match u64::from_str_radix(digits, *radix) {
                Ok(n) => n as f64,
                Err(_) => f64::NAN,
            };
        }
    }
    let is_decimal_literal = s
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || c == '+' || c == '-');
    if !is_decimal_literal {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

pub fn number_to_string(n: &JsNumberType) -> String {
    n.to_string()
}

pub fn to_string(realm: &Realm, v: &JsValue) -> Result<String, JErrorType> {
    match v {
        JsValue::Undefined => Ok(TYPE_STR_UNDEFINED.to_string()),
        JsValue::Null => Ok(TYPE_STR_NULL.to_string()),
        JsValue::Boolean(b) => Ok(b.to_string()),
        JsValue::String(s) => Ok(s.to_string()),
        JsValue::Symbol(s) => Err(JErrorType::TypeError(format!(
            "Cannot convert '{}' to a string",
            s
        ))),
        JsValue::Number(n) => Ok(number_to_string(n)),
        JsValue::Object(_) => {
            let pv = to_primitive(realm, v, PreferredType::String)?;
            to_string(realm, &pv)
        }
    }
}

/// There are no primitive wrapper objects in this runtime, so only objects
/// convert.
pub fn to_object(v: &JsValue) -> Result<JsObjectType, JErrorType> {
    match v {
        JsValue::Object(o) => Ok(o.clone()),
        _ => Err(JErrorType::TypeError(format!(
            "'{}' cannot be converted to object",
            v
        ))),
    }
}

pub fn is_constructor(v: &JsValue) -> bool {
    match v {
        JsValue::Object(o) => match &*o.borrow() {
            ObjectType::Function(f) => f.constructor_id().is_some(),
            _ => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_number() {
        assert_eq!(string_to_number("  42 "), 42.0);
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number("0x1F"), 31.0);
        assert_eq!(string_to_number("-2.5e1"), -25.0);
        assert!(string_to_number("inf").is_nan());
        assert!(string_to_number("12px").is_nan());
        assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_primitive_conversions() {
        let realm = Realm::new();
        assert!(to_number(&realm, &JsValue::Undefined).unwrap().is_nan());
        assert_eq!(to_number(&realm, &JsValue::Boolean(true)).unwrap(), 1.0);
        assert_eq!(to_string(&realm, &JsValue::number(1.5)).unwrap(), "1.5");
        assert_eq!(to_string(&realm, &JsValue::integer(7)).unwrap(), "7");
        assert_eq!(to_string(&realm, &JsValue::Undefined).unwrap(), "undefined");
        assert!(!to_boolean(&JsValue::String(String::new())));
        assert!(to_boolean(&JsValue::number(0.5)));
    }

    #[test]
    fn test_typeof_null_is_object() {
        assert_eq!(get_type(&JsValue::Null), TYPE_STR_OBJECT);
        assert_eq!(get_type(&JsValue::integer(1)), TYPE_STR_NUMBER);
    }

    #[test]
    fn test_plain_object_converts_through_object_prototype_to_string() {
        let realm = Realm::new();
        let o = JsValue::Object(realm.create_object());
        assert_eq!(to_string(&realm, &o).unwrap(), "[object Object]");
    }
}
