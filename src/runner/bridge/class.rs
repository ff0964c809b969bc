//! Traits a host type implements to be exposed to scripts.
//!
//! A host type declares its members once, in [`HostClass::declare`], instead
//! of being discovered through reflection. [`ExposedClass`] adds what is needed
//! to give the type its own constructor: a script-visible name, the host
//! object that carries constructor-level (static) members, and construction
//! from script arguments.

use std::any::{Any, TypeId};

use crate::runner::bridge::invoker::CallContext;
use crate::runner::bridge::member::MemberTable;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::value::JsValue;

pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}
impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A Rust value that can sit behind a script object.
///
/// `upcast` lets a derived payload stand in for a payload type it embeds. The
/// default only answers for the concrete type itself.
pub trait HostObject: AsAny {
    fn upcast(&self, target: TypeId) -> Option<&dyn Any> {
        let any = self.as_any();
        if Any::type_id(any) == target {
            Some(any)
        } else {
            None
        }
    }
}

pub trait HostClass: HostObject + Sized + 'static {
    /// Lists the members exposed on this type. Only members declared here are
    /// exposed; inherited ones are reached through the prototype chain.
    fn declare(members: &mut MemberTable<Self>);

    /// Host types this type may be registered under as a sub type.
    fn base_types() -> Vec<TypeId> {
        Vec::new()
    }
}

pub trait ExposedClass: HostClass {
    const NAME: &'static str;

    /// Host object bound to the constructor; its members become static
    /// members.
    type Statics: HostClass + Default;

    fn construct(ctx: &CallContext<'_>, args: &[JsValue]) -> Result<Self, JErrorType>;
}

/// Statics for a type that exposes nothing on its constructor.
#[derive(Default, Debug)]
pub struct NoStatics;
impl HostObject for NoStatics {}
impl HostClass for NoStatics {
    fn declare(_members: &mut MemberTable<Self>) {}
}
