use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::operations::test_and_comparison::same_value;
use crate::runner::ds::symbol::SymbolData;
use crate::runner::ds::value::JsValue;

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum PropertyKey {
    Str(String),
    Int(u32),
    Sym(SymbolData),
}
impl PropertyKey {
    /// Canonical key for a string: array-index-like strings become `Int`.
    pub fn from_str_key(s: &str) -> Self {
        match s.parse::<u32>() {
            Ok(i) if i.to_string() == s => PropertyKey::Int(i),
            _ => PropertyKey::Str(s.to_string()),
        }
    }
}
impl Display for PropertyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Str(s) => write!(f, "{}", s),
            PropertyKey::Int(i) => write!(f, "{}", i),
            PropertyKey::Sym(s) => write!(f, "[{}]", s.description()),
        }
    }
}
impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::from_str_key(s)
    }
}
impl From<SymbolData> for PropertyKey {
    fn from(s: SymbolData) -> Self {
        PropertyKey::Sym(s)
    }
}

/// A descriptor plus the set of fields the caller actually supplied. Fields
/// that are not honoured keep their current value on an existing property.
pub struct PropertyDescriptorSetter {
    pub honour_value: bool,
    pub honour_writable: bool,
    pub honour_set: bool,
    pub honour_get: bool,
    pub honour_enumerable: bool,
    pub honour_configurable: bool,
    pub descriptor: PropertyDescriptor,
}
impl PropertyDescriptorSetter {
    pub fn new_from_property_descriptor(desc: PropertyDescriptor) -> Self {
        match desc {
            PropertyDescriptor::Data { .. } => PropertyDescriptorSetter {
                honour_value: true,
                honour_writable: true,
                honour_configurable: true,
                honour_enumerable: true,
                descriptor: desc,
                honour_set: false,
                honour_get: false,
            },
            PropertyDescriptor::Accessor { .. } => PropertyDescriptorSetter {
                honour_set: true,
                honour_get: true,
                honour_configurable: true,
                honour_enumerable: true,
                descriptor: desc,
                honour_value: false,
                honour_writable: false,
            },
        }
    }

    /// Only replaces the value of an existing data property.
    pub fn value_only(value: JsValue) -> Self {
        PropertyDescriptorSetter {
            honour_value: true,
            honour_writable: false,
            honour_set: false,
            honour_get: false,
            honour_enumerable: false,
            honour_configurable: false,
            descriptor: PropertyDescriptor::Data {
                value,
                writable: false,
                enumerable: false,
                configurable: false,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.honour_configurable
            && !self.honour_enumerable
            && !self.honour_get
            && !self.honour_set
            && !self.honour_value
            && !self.honour_writable
    }

    pub fn is_generic_descriptor(&self) -> bool {
        !self.honour_get && !self.honour_set && !self.honour_value && !self.honour_writable
    }

    /// Overlays the honoured fields onto `current`. Switching between data and
    /// accessor kinds resets the fields of the new kind to their defaults.
    pub fn merge_into(self, current: PropertyDescriptor) -> PropertyDescriptor {
        let enumerable = if self.honour_enumerable {
            self.descriptor.is_enumerable()
        } else {
            current.is_enumerable()
        };
        let configurable = if self.honour_configurable {
            self.descriptor.is_configurable()
        } else {
            current.is_configurable()
        };
        if self.is_generic_descriptor() {
            return match current {
                PropertyDescriptor::Data {
                    value, writable, ..
                } => PropertyDescriptor::Data {
                    value,
                    writable,
                    enumerable,
                    configurable,
                },
                PropertyDescriptor::Accessor { get, set, .. } => PropertyDescriptor::Accessor {
                    get,
                    set,
                    enumerable,
                    configurable,
                },
            };
        }
        match (current, self.descriptor) {
            (
                PropertyDescriptor::Data {
                    value: current_value,
                    writable: current_writable,
                    ..
                },
                PropertyDescriptor::Data {
                    value, writable, ..
                },
            ) => PropertyDescriptor::Data {
                value: if self.honour_value { value } else { current_value },
                writable: if self.honour_writable {
                    writable
                } else {
                    current_writable
                },
                enumerable,
                configurable,
            },
            (
                PropertyDescriptor::Accessor {
                    get: current_get,
                    set: current_set,
                    ..
                },
                PropertyDescriptor::Accessor { get, set, .. },
            ) => PropertyDescriptor::Accessor {
                get: if self.honour_get { get } else { current_get },
                set: if self.honour_set { set } else { current_set },
                enumerable,
                configurable,
            },
            (_, PropertyDescriptor::Data {
                value, writable, ..
            }) => PropertyDescriptor::Data {
                value: if self.honour_value {
                    value
                } else {
                    JsValue::Undefined
                },
                writable: self.honour_writable && writable,
                enumerable,
                configurable,
            },
            (_, PropertyDescriptor::Accessor { get, set, .. }) => PropertyDescriptor::Accessor {
                get: if self.honour_get { get } else { None },
                set: if self.honour_set { set } else { None },
                enumerable,
                configurable,
            },
        }
    }
}

#[derive(Clone)]
pub enum PropertyDescriptor {
    Data {
        value: JsValue,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    /// An absent accessor reads as `undefined`; it is never an error.
    Accessor {
        get: Option<JsObjectType>,
        set: Option<JsObjectType>,
        enumerable: bool,
        configurable: bool,
    },
}
impl PropertyDescriptor {
    pub fn new_from_property_descriptor_setter(desc_setter: PropertyDescriptorSetter) -> Self {
        let enumerable = desc_setter.honour_enumerable && desc_setter.descriptor.is_enumerable();
        let configurable =
            desc_setter.honour_configurable && desc_setter.descriptor.is_configurable();
        match desc_setter.descriptor {
            PropertyDescriptor::Data {
                value, writable, ..
            } => PropertyDescriptor::Data {
                value: if desc_setter.honour_value {
                    value
                } else {
                    JsValue::Undefined
                },
                writable: desc_setter.honour_writable && writable,
                enumerable,
                configurable,
            },
            PropertyDescriptor::Accessor { get, set, .. } => PropertyDescriptor::Accessor {
                get: if desc_setter.honour_get { get } else { None },
                set: if desc_setter.honour_set { set } else { None },
                enumerable,
                configurable,
            },
        }
    }

    pub fn is_enumerable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { enumerable, .. } => *enumerable,
            PropertyDescriptor::Accessor { enumerable, .. } => *enumerable,
        }
    }

    pub fn is_configurable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { configurable, .. } => *configurable,
            PropertyDescriptor::Accessor { configurable, .. } => *configurable,
        }
    }

    pub fn is_writable(&self) -> bool {
        match self {
            PropertyDescriptor::Data { writable, .. } => *writable,
            PropertyDescriptor::Accessor { set, .. } => set.is_some(),
        }
    }

    pub fn is_data_descriptor(&self) -> bool {
        match self {
            PropertyDescriptor::Data { .. } => true,
            PropertyDescriptor::Accessor { .. } => false,
        }
    }

    pub fn is_accessor_descriptor(&self) -> bool {
        !self.is_data_descriptor()
    }

    pub fn value(&self) -> Option<&JsValue> {
        match self {
            PropertyDescriptor::Data { value, .. } => Some(value),
            PropertyDescriptor::Accessor { .. } => None,
        }
    }
}
impl PartialEq for PropertyDescriptor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                PropertyDescriptor::Data {
                    value,
                    writable,
                    enumerable,
                    configurable,
                },
                PropertyDescriptor::Data {
                    value: other_value,
                    writable: other_writable,
                    enumerable: other_enumerable,
                    configurable: other_configurable,
                },
            ) => {
                same_value(value, other_value)
                    && writable == other_writable
                    && enumerable == other_enumerable
                    && configurable == other_configurable
            }
            (
                PropertyDescriptor::Accessor {
                    get,
                    set,
                    enumerable,
                    configurable,
                },
                PropertyDescriptor::Accessor {
                    get: other_get,
                    set: other_set,
                    enumerable: other_enumerable,
                    configurable: other_configurable,
                },
            ) => {
                same_function(get, other_get)
                    && same_function(set, other_set)
                    && enumerable == other_enumerable
                    && configurable == other_configurable
            }
            _ => false,
        }
    }
}
impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyDescriptor::Data {
                value,
                writable,
                enumerable,
                configurable,
            } => f
                .debug_struct("Data")
                .field("value", value)
                .field("writable", writable)
                .field("enumerable", enumerable)
                .field("configurable", configurable)
                .finish(),
            PropertyDescriptor::Accessor {
                get,
                set,
                enumerable,
                configurable,
            } => f
                .debug_struct("Accessor")
                .field("get", &get.is_some())
                .field("set", &set.is_some())
                .field("enumerable", enumerable)
                .field("configurable", configurable)
                .finish(),
        }
    }
}

pub fn same_function(a: &Option<JsObjectType>, b: &Option<JsObjectType>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(value: JsValue, writable: bool, enumerable: bool, configurable: bool) -> PropertyDescriptor {
        PropertyDescriptor::Data {
            value,
            writable,
            enumerable,
            configurable,
        }
    }

    #[test]
    fn test_value_only_setter_keeps_current_attributes() {
        let current = data(JsValue::integer(1), true, true, false);
        let merged = PropertyDescriptorSetter::value_only(JsValue::integer(2)).merge_into(current);
        assert_eq!(merged, data(JsValue::integer(2), true, true, false));
    }

    #[test]
    fn test_array_index_strings_become_int_keys() {
        assert_eq!(PropertyKey::from("7"), PropertyKey::Int(7));
        assert_eq!(PropertyKey::from("07"), PropertyKey::Str("07".to_string()));
        assert_eq!(PropertyKey::from("name"), PropertyKey::Str("name".to_string()));
    }
}
