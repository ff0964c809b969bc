use std::rc::Rc;

use crate::runner::bridge::invoker::Adapter;
use crate::runner::bridge::object_model::ConstructorId;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{JsObject, JsObjectType, ObjectBase};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::realm::Realm;
use crate::runner::ds::value::JsValue;

/// Signature of a function implemented directly in Rust against the realm.
pub type NativeFn = fn(&Realm, &JsValue, &[JsValue]) -> Result<JsValue, JErrorType>;

#[derive(Clone)]
pub enum FunctionKind {
    Native(NativeFn),
    /// A compiled host member; see `bridge::invoker`.
    Adapter(Rc<Adapter>),
    /// The constructor of an exposed host type. Only `construct` may be used
    /// on it; a plain call always fails.
    Constructor(ConstructorId),
}

pub struct FunctionObject {
    pub name: String,
    pub kind: FunctionKind,
    object_base: ObjectBase,
}
impl FunctionObject {
    /// Builds the function with its `name` and `length` own properties, both
    /// configurable only.
    pub fn new(
        name: String,
        length: u32,
        kind: FunctionKind,
        prototype: Option<JsObjectType>,
    ) -> Self {
        let mut object_base = ObjectBase::with_prototype(prototype);
        object_base.fast_set(
            PropertyKey::Str("length".to_string()),
            configurable_only(JsValue::integer(length as i64)),
        );
        object_base.fast_set(
            PropertyKey::Str("name".to_string()),
            configurable_only(JsValue::String(name.to_string())),
        );
        FunctionObject {
            name,
            kind,
            object_base,
        }
    }

    pub fn constructor_id(&self) -> Option<ConstructorId> {
        match &self.kind {
            FunctionKind::Constructor(id) => Some(*id),
            _ => None,
        }
    }
}
impl JsObject for FunctionObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }

    fn class_name(&self) -> &'static str {
        "Function"
    }
}

fn configurable_only(value: JsValue) -> PropertyDescriptor {
    PropertyDescriptor::Data {
        value,
        writable: false,
        enumerable: false,
        configurable: true,
    }
}
