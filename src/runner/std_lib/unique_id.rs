//! `Uuid`: a 128-bit unique identifier compared by value.

use std::cell::RefCell;

use ::uuid::Uuid as RawUuid;

use crate::runner::bridge::class::{ExposedClass, HostClass, HostObject};
use crate::runner::bridge::invoker::{CallContext, Instance};
use crate::runner::bridge::member::MemberTable;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::ObjectType;
use crate::runner::ds::operations::object::create_list_from_array_like;
use crate::runner::ds::operations::type_conversion::{get_type, to_number};
use crate::runner::ds::value::JsValue;

/// Accepts hyphenated or simple text, optionally wrapped in braces or
/// parentheses.
pub fn parse_uuid(text: &str) -> Option<RawUuid> {
    let trimmed = text.trim();
    let inner = if (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('(') && trimmed.ends_with(')'))
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };
    RawUuid::parse_str(inner).ok()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uuid {
    value: RawUuid,
}
impl HostObject for Uuid {}

impl Uuid {
    pub fn new(value: RawUuid) -> Self {
        Uuid { value }
    }

    pub fn random() -> Self {
        Uuid::new(RawUuid::new_v4())
    }

    pub fn value(&self) -> &RawUuid {
        &self.value
    }

    fn braced(&self) -> String {
        format!("{{{}}}", self.value.to_hyphenated())
    }

    fn get_bytes(&self, _ctx: &CallContext<'_>) -> Vec<u8> {
        self.value.as_bytes().to_vec()
    }

    fn is_empty(&self, _ctx: &CallContext<'_>) -> bool {
        self.value.is_nil()
    }

    fn to_json(&self, _ctx: &CallContext<'_>) -> String {
        self.braced()
    }

    fn to_js_string(&self, _ctx: &CallContext<'_>, no_hyphens: Option<bool>) -> String {
        if no_hyphens.unwrap_or(false) {
            self.value.to_simple().to_string()
        } else {
            self.braced()
        }
    }

    fn js_equals(&self, _ctx: &CallContext<'_>, other: JsValue) -> bool {
        match &other {
            JsValue::String(text) => parse_uuid(text) == Some(self.value),
            _ => match Instance::<Uuid>::from_js(&other) {
                Some(that) => that.value == self.value,
                None => false,
            },
        }
    }

    fn from_bytes(ctx: &CallContext<'_>, source: &JsValue) -> Result<Self, JErrorType> {
        let realm = ctx.realm();
        let list = create_list_from_array_like(realm, source)?;
        if list.len() != 16 {
            return Err(JErrorType::TypeError(format!(
                "Expected 16 bytes for a Uuid, received {}",
                list.len()
            )));
        }
        let mut bytes = [0u8; 16];
        for (slot, value) in bytes.iter_mut().zip(list.iter()) {
            let n = to_number(realm, value)?;
            *slot = if n.is_finite() { (n.trunc() as i64 & 0xFF) as u8 } else { 0 };
        }
        Ok(Uuid::new(RawUuid::from_bytes(bytes)))
    }
}

impl HostClass for Uuid {
    fn declare(members: &mut MemberTable<Self>) {
        members.method("GetBytes", Uuid::get_bytes);
        members.method("IsEmpty", Uuid::is_empty);
        members.method("ToJSON", Uuid::to_json);
        members
            .method("ToJsString", Uuid::to_js_string)
            .name("toString")
            .length(0);
        members.method("JsEquals", Uuid::js_equals).name("equals");
    }
}

impl ExposedClass for Uuid {
    const NAME: &'static str = "Uuid";
    type Statics = UuidStatics;

    fn construct(ctx: &CallContext<'_>, args: &[JsValue]) -> Result<Self, JErrorType> {
        match args.first() {
            None | Some(JsValue::Undefined) => Ok(Uuid::random()),
            Some(JsValue::String(text)) => parse_uuid(text).map(Uuid::new).ok_or_else(|| {
                JErrorType::TypeError(format!("Invalid Uuid string '{}'", text))
            }),
            Some(source @ JsValue::Object(o)) => {
                let is_array = matches!(&*o.borrow(), ObjectType::Array(_));
                if is_array {
                    Uuid::from_bytes(ctx, source)
                } else {
                    Err(JErrorType::TypeError(
                        "Expected string or byte array, received object".to_string(),
                    ))
                }
            }
            Some(other) => Err(JErrorType::TypeError(format!(
                "Expected string or byte array, received {}",
                get_type(other)
            ))),
        }
    }
}

/// Constructor-level members of `Uuid`.
#[derive(Default)]
pub struct UuidStatics {
    empty: RefCell<Option<JsValue>>,
}
impl HostObject for UuidStatics {}

impl UuidStatics {
    fn empty(&self, ctx: &CallContext<'_>) -> Result<JsValue, JErrorType> {
        if let Some(empty) = self.empty.borrow().as_ref() {
            return Ok(empty.clone());
        }
        let empty = ctx.realm().instantiate(Uuid::new(RawUuid::nil()))?;
        *self.empty.borrow_mut() = Some(empty.clone());
        Ok(empty)
    }

    /// Invalid text gives `Uuid.Empty` instead of an error.
    fn parse(&self, ctx: &CallContext<'_>, text: String) -> Result<JsValue, JErrorType> {
        match parse_uuid(&text) {
            Some(value) => ctx.realm().instantiate(Uuid::new(value)),
            None => self.empty(ctx),
        }
    }
}

impl HostClass for UuidStatics {
    fn declare(members: &mut MemberTable<Self>) {
        members
            .property("Empty")
            .getter(UuidStatics::empty)
            .name("Empty");
        members.method("Parse", UuidStatics::parse);
    }
}
