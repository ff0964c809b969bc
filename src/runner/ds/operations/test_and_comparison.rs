use std::rc::Rc;

use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::value::{JsNumberType, JsValue};

fn is_same_value(a: &JsValue, b: &JsValue, strict_mode: bool) -> bool {
    match (a, b) {
        (JsValue::Undefined, JsValue::Undefined) => true,
        (JsValue::Null, JsValue::Null) => true,
        (JsValue::Boolean(a_value), JsValue::Boolean(b_value)) => a_value == b_value,
        (JsValue::String(a_value), JsValue::String(b_value)) => a_value == b_value,
        (JsValue::Symbol(a_value), JsValue::Symbol(b_value)) => a_value == b_value,
        (JsValue::Object(a_value), JsValue::Object(b_value)) => same_object(a_value, b_value),
        (JsValue::Number(na), JsValue::Number(nb)) => match (na, nb) {
            (JsNumberType::NaN, JsNumberType::NaN) => !strict_mode,
            (JsNumberType::NaN, _) | (_, JsNumberType::NaN) => false,
            _ => na.as_f64() == nb.as_f64(),
        },
        _ => false,
    }
}

pub fn same_object(a: &JsObjectType, b: &JsObjectType) -> bool {
    Rc::ptr_eq(a, b)
}

pub fn same_optional_object(a: &Option<JsObjectType>, b: &Option<JsObjectType>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => same_object(a, b),
        _ => false,
    }
}

/// SameValue: like `===` except `NaN` equals itself.
pub fn same_value(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, false)
}

pub fn strict_equality_comparison(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_is_same_value_but_not_strictly_equal() {
        let nan = JsValue::number(f64::NAN);
        assert!(same_value(&nan, &nan));
        assert!(!strict_equality_comparison(&nan, &nan));
    }

    #[test]
    fn test_integer_and_float_compare_numerically() {
        assert!(same_value(
            &JsValue::Number(JsNumberType::Integer(2)),
            &JsValue::Number(JsNumberType::Float(2.0))
        ));
    }
}
