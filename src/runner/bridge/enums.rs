//! Host enums exposed as frozen lookup objects.
//!
//! An exposed enum object maps every variant name to its value and every
//! value back to its name, e.g. `DayOfWeek.Monday === 1` and
//! `DayOfWeek[1] === "Monday"`. The name and value tables are built once per
//! enum type and shared process-wide.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::trace;

use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::realm::Realm;
use crate::runner::ds::value::JsValue;

pub trait ExposedEnum: 'static {
    const NAME: &'static str;

    /// Variant names with their values, in declaration order.
    fn variants() -> &'static [(&'static str, i32)];
}

#[derive(Debug, PartialEq)]
pub struct EnumInfo {
    pub name: &'static str,
    entries: Vec<(&'static str, i32)>,
}
impl EnumInfo {
    pub fn entries(&self) -> &[(&'static str, i32)] {
        &self.entries
    }

    pub fn value_of(&self, name: &str) -> Option<i32> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    /// First variant declared with `value`.
    pub fn name_of(&self, value: i32) -> Option<&'static str> {
        self.entries.iter().find(|(_, v)| *v == value).map(|(n, _)| *n)
    }
}

lazy_static! {
    static ref ENUM_CACHE: Mutex<HashMap<TypeId, Arc<EnumInfo>>> = Mutex::new(HashMap::new());
}

pub fn enum_info<E: ExposedEnum>() -> Arc<EnumInfo> {
    let mut cache = match ENUM_CACHE.lock() {
        Ok(cache) => cache,
        Err(poisoned) => poisoned.into_inner(),
    };
    cache
        .entry(TypeId::of::<E>())
        .or_insert_with(|| {
            trace!(name = E::NAME, "caching enum metadata");
            Arc::new(EnumInfo {
                name: E::NAME,
                entries: E::variants().to_vec(),
            })
        })
        .clone()
}

fn frozen(value: JsValue) -> PropertyDescriptor {
    PropertyDescriptor::Data {
        value,
        writable: false,
        enumerable: true,
        configurable: false,
    }
}

/// Builds the lookup object for `E`. It is not extensible and none of its
/// properties can be changed.
pub fn create_enum<E: ExposedEnum>(realm: &Realm) -> JsObjectType {
    let info = enum_info::<E>();
    let object = realm.create_object();
    {
        let mut o = object.borrow_mut();
        let js_object = o.as_js_object_mut();
        {
            let base = js_object.get_object_base_mut();
            for (name, value) in info.entries.iter() {
                base.fast_set(PropertyKey::from(*name), frozen(JsValue::integer(*value as i64)));
            }
            for (name, value) in info.entries.iter().rev() {
                base.fast_set(
                    PropertyKey::from_str_key(&value.to_string()),
                    frozen(JsValue::from(*name)),
                );
            }
        }
        js_object.prevent_extensions();
    }
    object
}

/// Defines the lookup object for `E` on `target` under the enum's name.
pub fn add_enum<E: ExposedEnum>(realm: &Realm, target: &JsObjectType) -> JsObjectType {
    let object = create_enum::<E>(realm);
    target
        .borrow_mut()
        .as_js_object_mut()
        .get_object_base_mut()
        .fast_set(
            PropertyKey::from(E::NAME),
            PropertyDescriptor::Data {
                value: JsValue::Object(object.clone()),
                writable: false,
                enumerable: false,
                configurable: true,
            },
        );
    object
}
