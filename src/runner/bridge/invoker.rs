//! Compiles host members into callable adapters.
//!
//! Every host function is a plain Rust function taking the receiver, a
//! [`CallContext`] and up to six typed parameters. The [`HostMethod`] impls
//! generated below turn such a function into an erased call once, at
//! declaration time; [`InvokerFactory`] then validates the signature and picks
//! the adapter shape. Argument adaptation at call time follows these rules:
//!
//! - a missing argument is `undefined`;
//! - a parameter declared as string, number or boolean converts whatever it is
//!   given with the runtime's standard conversion;
//! - any other kind mismatch fails with `Argument N is not a/an Kind`;
//! - an `Option<_>` parameter is defaulted: it skips conversion when absent;
//! - a trailing `Rest<_>` parameter collects the remaining arguments.

use std::any::{type_name, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::rc::Rc;

use tracing::trace;

use crate::runner::bridge::class::{ExposedClass, HostClass, HostObject};
use crate::runner::bridge::error::ConfigError;
use crate::runner::bridge::member::{MemberBinding, MemberDescriptor};
use crate::runner::bridge::object_model::host_payload;
use crate::runner::bridge::type_registry::{TypeDescriptor, TypeRegistry};
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::{JsObjectType, ObjectType};
use crate::runner::ds::operations::type_conversion::{to_boolean, to_number, to_string};
use crate::runner::ds::realm::Realm;
use crate::runner::ds::value::JsValue;

/// What a host function sees of the call besides its typed arguments.
pub struct CallContext<'a> {
    realm: &'a Realm,
    this: &'a JsValue,
}
impl<'a> CallContext<'a> {
    pub fn new(realm: &'a Realm, this: &'a JsValue) -> Self {
        CallContext { realm, this }
    }

    pub fn realm(&self) -> &'a Realm {
        self.realm
    }

    pub fn this(&self) -> &'a JsValue {
        self.this
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// Accepts any value as is.
    Any,
    String,
    Number,
    Boolean,
    Object,
    Host { type_id: TypeId, name: &'static str },
}
impl ParamKind {
    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::Any => "Value",
            ParamKind::String => "String",
            ParamKind::Number => "Number",
            ParamKind::Boolean => "Boolean",
            ParamKind::Object => "Object",
            ParamKind::Host { name, .. } => *name,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamSpec {
    pub kind: ParamKind,
    pub optional: bool,
    pub rest: bool,
}
impl ParamSpec {
    pub fn required(kind: ParamKind) -> Self {
        ParamSpec {
            kind,
            optional: false,
            rest: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<ParamSpec>,
    pub returns_value: bool,
}

/// "a String", "an Object", "an Uuid".
pub fn with_article(kind: &str) -> String {
    match kind.chars().next() {
        Some(c) if "aeiouAEIOU".contains(c) => format!("an {}", kind),
        _ => format!("a {}", kind),
    }
}

fn argument_error(position: usize, kind: &str) -> JErrorType {
    JErrorType::TypeError(format!(
        "Argument {} is not {}",
        position,
        with_article(kind)
    ))
}

/// A parameter type of a host function. `position` is 1-based and only used
/// for error messages.
pub trait FromArg: Sized + 'static {
    fn param_spec() -> ParamSpec;

    fn from_value(ctx: &CallContext<'_>, value: &JsValue, position: usize)
        -> Result<Self, JErrorType>;

    fn from_args(ctx: &CallContext<'_>, args: &[JsValue], index: usize) -> Result<Self, JErrorType> {
        match args.get(index) {
            Some(value) => Self::from_value(ctx, value, index + 1),
            None => Self::from_value(ctx, &JsValue::Undefined, index + 1),
        }
    }
}

impl FromArg for JsValue {
    fn param_spec() -> ParamSpec {
        ParamSpec::required(ParamKind::Any)
    }

    fn from_value(_ctx: &CallContext<'_>, value: &JsValue, _position: usize) -> Result<Self, JErrorType> {
        Ok(value.clone())
    }
}

impl FromArg for String {
    fn param_spec() -> ParamSpec {
        ParamSpec::required(ParamKind::String)
    }

    fn from_value(ctx: &CallContext<'_>, value: &JsValue, _position: usize) -> Result<Self, JErrorType> {
        match value {
            JsValue::String(s) => Ok(s.to_string()),
            other => to_string(ctx.realm(), other),
        }
    }
}

impl FromArg for f64 {
    fn param_spec() -> ParamSpec {
        ParamSpec::required(ParamKind::Number)
    }

    fn from_value(ctx: &CallContext<'_>, value: &JsValue, _position: usize) -> Result<Self, JErrorType> {
        match value {
            JsValue::Number(n) => Ok(n.as_f64()),
            other => to_number(ctx.realm(), other),
        }
    }
}

impl FromArg for bool {
    fn param_spec() -> ParamSpec {
        ParamSpec::required(ParamKind::Boolean)
    }

    fn from_value(_ctx: &CallContext<'_>, value: &JsValue, _position: usize) -> Result<Self, JErrorType> {
        Ok(to_boolean(value))
    }
}

impl FromArg for JsObjectType {
    fn param_spec() -> ParamSpec {
        ParamSpec::required(ParamKind::Object)
    }

    fn from_value(_ctx: &CallContext<'_>, value: &JsValue, position: usize) -> Result<Self, JErrorType> {
        match value {
            JsValue::Object(o) => Ok(o.clone()),
            _ => Err(argument_error(position, ParamKind::Object.name())),
        }
    }
}

/// A defaulted parameter: `None` when the argument is missing or `undefined`.
/// Defaulted parameters do not count towards the reported `length`.
impl<A: FromArg> FromArg for Option<A> {
    fn param_spec() -> ParamSpec {
        ParamSpec {
            optional: true,
            ..A::param_spec()
        }
    }

    fn from_value(ctx: &CallContext<'_>, value: &JsValue, position: usize) -> Result<Self, JErrorType> {
        match value {
            JsValue::Undefined => Ok(None),
            v => A::from_value(ctx, v, position).map(Some),
        }
    }
}

/// Variadic tail: every argument from this parameter's position to the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Rest<A>(pub Vec<A>);
impl<A> Rest<A> {
    pub fn into_inner(self) -> Vec<A> {
        self.0
    }
}
impl<A> Deref for Rest<A> {
    type Target = Vec<A>;

    fn deref(&self) -> &Vec<A> {
        &self.0
    }
}
impl<A: FromArg> FromArg for Rest<A> {
    fn param_spec() -> ParamSpec {
        ParamSpec {
            rest: true,
            ..A::param_spec()
        }
    }

    fn from_value(ctx: &CallContext<'_>, value: &JsValue, position: usize) -> Result<Self, JErrorType> {
        Ok(Rest(vec![A::from_value(ctx, value, position)?]))
    }

    fn from_args(ctx: &CallContext<'_>, args: &[JsValue], index: usize) -> Result<Self, JErrorType> {
        let mut values = Vec::with_capacity(args.len().saturating_sub(index));
        for (offset, value) in args.iter().enumerate().skip(index) {
            values.push(A::from_value(ctx, value, offset + 1)?);
        }
        Ok(Rest(values))
    }
}

/// An argument that must be an instance of the exposed type `C` (or of a type
/// registered as its sub type).
pub struct Instance<C> {
    object: JsObjectType,
    payload: Rc<dyn HostObject>,
    _host: PhantomData<fn() -> C>,
}
impl<C: ExposedClass> Instance<C> {
    pub fn from_js(value: &JsValue) -> Option<Self> {
        let object = value.as_object()?.clone();
        let payload = host_payload(value)?;
        payload
            .upcast(TypeId::of::<C>())
            .and_then(|any| any.downcast_ref::<C>())?;
        Some(Instance {
            object,
            payload,
            _host: PhantomData,
        })
    }

    pub fn object(&self) -> &JsObjectType {
        &self.object
    }

    pub fn to_js(&self) -> JsValue {
        JsValue::Object(self.object.clone())
    }
}
impl<C: ExposedClass> Deref for Instance<C> {
    type Target = C;

    fn deref(&self) -> &C {
        match self
            .payload
            .upcast(TypeId::of::<C>())
            .and_then(|any| any.downcast_ref::<C>())
        {
            Some(host) => host,
            None => unreachable!("payload type is checked when the instance argument is read"),
        }
    }
}
impl<C: ExposedClass> FromArg for Instance<C> {
    fn param_spec() -> ParamSpec {
        ParamSpec::required(ParamKind::Host {
            type_id: TypeId::of::<C>(),
            name: C::NAME,
        })
    }

    fn from_value(_ctx: &CallContext<'_>, value: &JsValue, position: usize) -> Result<Self, JErrorType> {
        Instance::from_js(value).ok_or_else(|| argument_error(position, C::NAME))
    }
}

/// A return type of a host function.
pub trait IntoJsResult {
    /// `false` only for `()`; such adapters always produce `undefined`.
    fn returns_value() -> bool {
        true
    }

    fn into_js_result(self, ctx: &CallContext<'_>) -> Result<JsValue, JErrorType>;
}

impl IntoJsResult for () {
    fn returns_value() -> bool {
        false
    }

    fn into_js_result(self, _ctx: &CallContext<'_>) -> Result<JsValue, JErrorType> {
        Ok(JsValue::Undefined)
    }
}

impl IntoJsResult for JsValue {
    fn into_js_result(self, _ctx: &CallContext<'_>) -> Result<JsValue, JErrorType> {
        Ok(self)
    }
}

impl IntoJsResult for bool {
    fn into_js_result(self, _ctx: &CallContext<'_>) -> Result<JsValue, JErrorType> {
        Ok(JsValue::Boolean(self))
    }
}

impl IntoJsResult for f64 {
    fn into_js_result(self, _ctx: &CallContext<'_>) -> Result<JsValue, JErrorType> {
        Ok(JsValue::number(self))
    }
}

impl IntoJsResult for i32 {
    fn into_js_result(self, _ctx: &CallContext<'_>) -> Result<JsValue, JErrorType> {
        Ok(JsValue::integer(self as i64))
    }
}

impl IntoJsResult for u8 {
    fn into_js_result(self, _ctx: &CallContext<'_>) -> Result<JsValue, JErrorType> {
        Ok(JsValue::integer(self as i64))
    }
}

impl IntoJsResult for String {
    fn into_js_result(self, _ctx: &CallContext<'_>) -> Result<JsValue, JErrorType> {
        Ok(JsValue::String(self))
    }
}

impl IntoJsResult for JsObjectType {
    fn into_js_result(self, _ctx: &CallContext<'_>) -> Result<JsValue, JErrorType> {
        Ok(JsValue::Object(self))
    }
}

impl<R: IntoJsResult> IntoJsResult for Option<R> {
    fn into_js_result(self, ctx: &CallContext<'_>) -> Result<JsValue, JErrorType> {
        match self {
            Some(r) => r.into_js_result(ctx),
            None => Ok(JsValue::Undefined),
        }
    }
}

impl<R: IntoJsResult> IntoJsResult for Result<R, JErrorType> {
    fn returns_value() -> bool {
        R::returns_value()
    }

    fn into_js_result(self, ctx: &CallContext<'_>) -> Result<JsValue, JErrorType> {
        self?.into_js_result(ctx)
    }
}

/// Returned as an array.
impl<R: IntoJsResult> IntoJsResult for Vec<R> {
    fn into_js_result(self, ctx: &CallContext<'_>) -> Result<JsValue, JErrorType> {
        let mut elements = Vec::with_capacity(self.len());
        for r in self {
            elements.push(r.into_js_result(ctx)?);
        }
        Ok(JsValue::Object(ctx.realm().create_array(elements)))
    }
}

impl<C: ExposedClass> IntoJsResult for Instance<C> {
    fn into_js_result(self, _ctx: &CallContext<'_>) -> Result<JsValue, JErrorType> {
        Ok(JsValue::Object(self.object))
    }
}

/// A fresh host value, returned as a new instance of its exposed type.
pub struct Exposed<C>(pub C);
impl<C: ExposedClass> IntoJsResult for Exposed<C> {
    fn into_js_result(self, ctx: &CallContext<'_>) -> Result<JsValue, JErrorType> {
        ctx.realm().instantiate(self.0)
    }
}

pub type ErasedCall =
    Rc<dyn Fn(&dyn HostObject, &CallContext<'_>, &[JsValue]) -> Result<JsValue, JErrorType>>;

fn erase<F>(f: F) -> ErasedCall
where
    F: Fn(&dyn HostObject, &CallContext<'_>, &[JsValue]) -> Result<JsValue, JErrorType> + 'static,
{
    Rc::new(f)
}

fn host_ref<T: HostClass>(target: &dyn HostObject) -> Result<&T, JErrorType> {
    target
        .upcast(TypeId::of::<T>())
        .and_then(|any| any.downcast_ref::<T>())
        .ok_or_else(|| {
            JErrorType::TypeError(format!("host object is not a {}", type_name::<T>()))
        })
}

/// A host function with receiver `T` and parameter tuple `Args`.
pub trait HostMethod<T, Args>: 'static {
    fn signature() -> Signature;

    fn into_erased(self) -> ErasedCall;
}

macro_rules! impl_host_method {
    ($($param:ident => $value:ident),*) => {
        impl<T, F, R, $($param,)*> HostMethod<T, ($($param,)*)> for F
        where
            T: HostClass,
            F: Fn(&T, &CallContext<'_> $(, $param)*) -> R + 'static,
            R: IntoJsResult + 'static,
            $($param: FromArg,)*
        {
            fn signature() -> Signature {
                Signature {
                    params: vec![$($param::param_spec()),*],
                    returns_value: R::returns_value(),
                }
            }

            #[allow(unused_variables, unused_mut, unused_assignments)]
            fn into_erased(self) -> ErasedCall {
                let f = self;
                erase(move |target, ctx, args| {
                    let host = host_ref::<T>(target)?;
                    let mut index = 0;
                    $(
                        let $value = $param::from_args(ctx, args, index)?;
                        index += 1;
                    )*
                    f(host, ctx $(, $value)*).into_js_result(ctx)
                })
            }
        }
    };
}

impl_host_method!();
impl_host_method!(A1 => a1);
impl_host_method!(A1 => a1, A2 => a2);
impl_host_method!(A1 => a1, A2 => a2, A3 => a3);
impl_host_method!(A1 => a1, A2 => a2, A3 => a3, A4 => a4);
impl_host_method!(A1 => a1, A2 => a2, A3 => a3, A4 => a4, A5 => a5);
impl_host_method!(A1 => a1, A2 => a2, A3 => a3, A4 => a4, A5 => a5, A6 => a6);

/// A declared host function: its signature plus the erased call.
pub struct HostFn {
    signature: Signature,
    call: ErasedCall,
}
impl HostFn {
    pub fn new<T, Args, M: HostMethod<T, Args>>(method: M) -> Self {
        HostFn {
            signature: M::signature(),
            call: method.into_erased(),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}
impl fmt::Debug for HostFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostFn")
            .field("signature", &self.signature)
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdapterShape {
    NoParameters { returns_value: bool },
    /// A single variadic parameter.
    Varargs,
    General { fixed: usize },
}

#[derive(Clone)]
pub enum Receiver {
    /// Always calls into this host object; used for constructor-level members.
    Static(Rc<dyn HostObject>),
    /// Resolves the host object from `this` on every call.
    Instance,
}

pub struct Adapter {
    member: String,
    function_name: String,
    length: u32,
    shape: AdapterShape,
    receiver: Receiver,
    declaring_type: TypeId,
    call: ErasedCall,
}
impl Adapter {
    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn shape(&self) -> AdapterShape {
        self.shape
    }

    pub fn is_static(&self) -> bool {
        matches!(self.receiver, Receiver::Static(_))
    }

    pub fn invoke(
        &self,
        realm: &Realm,
        this: &JsValue,
        args: &[JsValue],
    ) -> Result<JsValue, JErrorType> {
        trace!(member = %self.member, argc = args.len(), "invoking host adapter");
        let target = match &self.receiver {
            Receiver::Static(target) => target.clone(),
            Receiver::Instance => self.resolve_receiver(this)?,
        };
        let ctx = CallContext::new(realm, this);
        match self.shape {
            AdapterShape::NoParameters { returns_value } => {
                let result = (self.call)(&*target, &ctx, &[])?;
                if returns_value {
                    Ok(result)
                } else {
                    Ok(JsValue::Undefined)
                }
            }
            AdapterShape::Varargs | AdapterShape::General { .. } => (self.call)(&*target, &ctx, args),
        }
    }

    fn resolve_receiver(&self, this: &JsValue) -> Result<Rc<dyn HostObject>, JErrorType> {
        let payload = match this {
            JsValue::Object(o) => match &*o.borrow() {
                ObjectType::Instance(instance) => Some(instance.payload().clone()),
                _ => None,
            },
            _ => None,
        };
        match payload {
            Some(payload) if payload.upcast(self.declaring_type).is_some() => Ok(payload),
            _ => Err(JErrorType::TypeError(format!(
                "{} called on incompatible type",
                self.member
            ))),
        }
    }
}
impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("function_name", &self.function_name)
            .field("length", &self.length)
            .field("shape", &self.shape)
            .field("static", &self.is_static())
            .finish()
    }
}

pub enum CompiledKind {
    Accessor {
        get: Option<Rc<Adapter>>,
        set: Option<Rc<Adapter>>,
    },
    Method(Rc<Adapter>),
}

pub struct CompiledMember {
    pub descriptor: MemberDescriptor,
    pub kind: CompiledKind,
}

pub struct InvokerFactory<'r> {
    registry: &'r TypeRegistry,
}
impl<'r> InvokerFactory<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        InvokerFactory { registry }
    }

    pub fn compile_all(
        &self,
        descriptor: &TypeDescriptor,
        receiver: &Receiver,
    ) -> Result<Vec<CompiledMember>, ConfigError> {
        descriptor
            .members()
            .iter()
            .zip(descriptor.bindings().iter())
            .map(|(member, binding)| self.compile_member(member, binding, receiver))
            .collect()
    }

    pub fn compile_member(
        &self,
        member: &MemberDescriptor,
        binding: &MemberBinding,
        receiver: &Receiver,
    ) -> Result<CompiledMember, ConfigError> {
        let kind = match binding {
            MemberBinding::Property { getter, setter } => CompiledKind::Accessor {
                get: match getter {
                    Some(getter) => Some(self.compile(
                        member,
                        format!("get {}", member.function_name()),
                        getter,
                        None,
                        receiver,
                    )?),
                    None => None,
                },
                set: match setter {
                    Some(setter) => Some(self.compile(
                        member,
                        format!("set {}", member.function_name()),
                        setter,
                        None,
                        receiver,
                    )?),
                    None => None,
                },
            },
            MemberBinding::Method(method) => CompiledKind::Method(self.compile(
                member,
                member.function_name(),
                method,
                member.length_override(),
                receiver,
            )?),
        };
        Ok(CompiledMember {
            descriptor: member.clone(),
            kind,
        })
    }

    pub fn compile(
        &self,
        member: &MemberDescriptor,
        function_name: String,
        host_fn: &HostFn,
        length_override: Option<u32>,
        receiver: &Receiver,
    ) -> Result<Rc<Adapter>, ConfigError> {
        let signature = host_fn.signature();
        self.validate(member, signature)?;
        let shape = adapter_shape(signature);
        let length = length_override.unwrap_or_else(|| declared_length(signature));
        trace!(member = %member.name, ?shape, length, "compiled adapter");
        Ok(Rc::new(Adapter {
            member: member.name.to_string(),
            function_name,
            length,
            shape,
            receiver: receiver.clone(),
            declaring_type: member.declaring_type,
            call: host_fn.call.clone(),
        }))
    }

    fn validate(&self, member: &MemberDescriptor, signature: &Signature) -> Result<(), ConfigError> {
        let last = signature.params.len().saturating_sub(1);
        for (index, param) in signature.params.iter().enumerate() {
            if param.rest && index != last {
                return Err(ConfigError::MisplacedRest(member.name.to_string()));
            }
            if let ParamKind::Host { type_id, name } = param.kind {
                if !self.registry.contains(type_id) {
                    return Err(ConfigError::Unrepresentable {
                        member: member.name.to_string(),
                        kind: name.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

pub fn adapter_shape(signature: &Signature) -> AdapterShape {
    match signature.params.as_slice() {
        [] => AdapterShape::NoParameters {
            returns_value: signature.returns_value,
        },
        [only] if only.rest => AdapterShape::Varargs,
        params => AdapterShape::General {
            fixed: params.iter().filter(|p| !p.rest).count(),
        },
    }
}

/// Parameters that are neither defaulted nor variadic.
pub fn declared_length(signature: &Signature) -> u32 {
    signature
        .params
        .iter()
        .filter(|p| !p.optional && !p.rest)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::bridge::member::MemberTable;

    struct Counter;
    impl HostObject for Counter {}
    impl HostClass for Counter {
        fn declare(_members: &mut MemberTable<Self>) {}
    }
    impl Counter {
        fn sum(&self, _ctx: &CallContext<'_>, first: f64, rest: Rest<f64>) -> f64 {
            first + rest.iter().sum::<f64>()
        }

        fn label(&self, _ctx: &CallContext<'_>, text: String, upper: Option<bool>) -> String {
            if upper.unwrap_or(false) {
                text.to_uppercase()
            } else {
                text
            }
        }

        fn touch(&self, _ctx: &CallContext<'_>) {}

        fn keys(&self, _ctx: &CallContext<'_>, target: JsObjectType) -> bool {
            target.borrow().is_callable()
        }
    }

    fn call(host_fn: &HostFn, args: &[JsValue]) -> Result<JsValue, JErrorType> {
        let realm = Realm::new();
        let this = JsValue::Undefined;
        let ctx = CallContext::new(&realm, &this);
        (host_fn.call)(&Counter, &ctx, args)
    }

    #[test]
    fn test_article_follows_first_letter() {
        assert_eq!(with_article("Number"), "a Number");
        assert_eq!(with_article("Object"), "an Object");
        assert_eq!(with_article("Uuid"), "an Uuid");
    }

    #[test]
    fn test_signature_reports_shape_and_length() {
        let sum = HostFn::new(Counter::sum);
        assert_eq!(adapter_shape(sum.signature()), AdapterShape::General { fixed: 1 });
        assert_eq!(declared_length(sum.signature()), 1);

        let label = HostFn::new(Counter::label);
        assert_eq!(declared_length(label.signature()), 1);

        let touch = HostFn::new(Counter::touch);
        assert_eq!(
            adapter_shape(touch.signature()),
            AdapterShape::NoParameters {
                returns_value: false
            }
        );
    }

    #[test]
    fn test_variadic_tail_accepts_any_count() {
        let sum = HostFn::new(Counter::sum);
        assert_eq!(call(&sum, &[JsValue::integer(1)]).unwrap(), JsValue::integer(1));
        assert_eq!(
            call(
                &sum,
                &[JsValue::integer(1), JsValue::integer(2), JsValue::from("3")]
            )
            .unwrap(),
            JsValue::integer(6)
        );
    }

    #[test]
    fn test_narrowing_coercion_and_defaults() {
        let label = HostFn::new(Counter::label);
        assert_eq!(
            call(&label, &[JsValue::integer(5)]).unwrap(),
            JsValue::from("5")
        );
        assert_eq!(
            call(&label, &[JsValue::from("ab"), JsValue::integer(1)]).unwrap(),
            JsValue::from("AB")
        );
        assert_eq!(call(&label, &[]).unwrap(), JsValue::from("undefined"));
    }

    #[test]
    fn test_object_parameter_rejects_primitives() {
        let keys = HostFn::new(Counter::keys);
        assert_eq!(
            call(&keys, &[JsValue::integer(1)]),
            Err(JErrorType::TypeError("Argument 1 is not an Object".to_string()))
        );
    }
}
