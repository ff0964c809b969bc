//! Constructor, prototype and instance objects for exposed host types.
//!
//! Each exposed type gets one constructor function and one prototype object
//! per realm. Adapters are compiled when the type is defined, so every
//! configuration error surfaces then; they are attached as properties only
//! when one of the type's objects is first touched.

use std::any::{type_name, TypeId};
use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::runner::bridge::class::{ExposedClass, HostObject};
use crate::runner::bridge::error::ConfigError;
use crate::runner::bridge::invoker::{
    Adapter, CallContext, CompiledKind, CompiledMember, InvokerFactory, Receiver,
};
use crate::runner::bridge::member::PropertyFlag;
use crate::runner::bridge::type_registry::TypeDescriptor;
use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::{FunctionKind, FunctionObject};
use crate::runner::ds::object::{JsObject, JsObjectType, ObjectBase, ObjectType};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::realm::Realm;
use crate::runner::ds::symbol::SYMBOL_TO_STRING_TAG;
use crate::runner::ds::value::JsValue;

/// Index of a constructor within its realm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConstructorId(pub(crate) usize);
impl ConstructorId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitState {
    Uninitialized,
    Initializing,
    Initialized,
}

pub type ConstructFn = fn(&CallContext<'_>, &[JsValue]) -> Result<Rc<dyn HostObject>, JErrorType>;

pub struct ConstructorRecord {
    pub(crate) id: ConstructorId,
    pub(crate) name: &'static str,
    pub(crate) host_type: TypeId,
    pub(crate) instance_type: Rc<TypeDescriptor>,
    pub(crate) static_type: Rc<TypeDescriptor>,
    pub(crate) instance_members: Vec<CompiledMember>,
    pub(crate) static_members: Vec<CompiledMember>,
    pub(crate) statics: Rc<dyn HostObject>,
    pub(crate) construct: ConstructFn,
    pub(crate) function: JsObjectType,
    pub(crate) prototype: JsObjectType,
    pub(crate) state: Cell<InitState>,
}
impl ConstructorRecord {
    pub fn id(&self) -> ConstructorId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn host_type(&self) -> TypeId {
        self.host_type
    }

    pub fn instance_type(&self) -> &Rc<TypeDescriptor> {
        &self.instance_type
    }

    pub fn static_type(&self) -> &Rc<TypeDescriptor> {
        &self.static_type
    }

    pub fn statics(&self) -> &Rc<dyn HostObject> {
        &self.statics
    }

    pub fn function(&self) -> &JsObjectType {
        &self.function
    }

    pub fn prototype(&self) -> &JsObjectType {
        &self.prototype
    }

    pub fn state(&self) -> InitState {
        self.state.get()
    }
}

pub struct PrototypeObject {
    pub(crate) constructor: ConstructorId,
    class_name: &'static str,
    object_base: ObjectBase,
}
impl PrototypeObject {
    pub fn new(constructor: ConstructorId, class_name: &'static str, parent: Option<JsObjectType>) -> Self {
        PrototypeObject {
            constructor,
            class_name,
            object_base: ObjectBase::with_prototype(parent),
        }
    }

    pub fn constructor(&self) -> ConstructorId {
        self.constructor
    }
}
impl JsObject for PrototypeObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }

    fn class_name(&self) -> &'static str {
        self.class_name
    }
}

/// A script object carrying a host payload. Until its prototype is set
/// explicitly, the prototype is read from the owning constructor.
pub struct InstanceObject {
    pub(crate) constructor: ConstructorId,
    pub(crate) prototype_overridden: bool,
    class_name: &'static str,
    payload: Rc<dyn HostObject>,
    object_base: ObjectBase,
}
impl InstanceObject {
    pub fn new(constructor: ConstructorId, class_name: &'static str, payload: Rc<dyn HostObject>) -> Self {
        InstanceObject {
            constructor,
            prototype_overridden: false,
            class_name,
            payload,
            object_base: ObjectBase::new(),
        }
    }

    pub fn constructor(&self) -> ConstructorId {
        self.constructor
    }

    pub fn payload(&self) -> &Rc<dyn HostObject> {
        &self.payload
    }

    pub fn is_prototype_overridden(&self) -> bool {
        self.prototype_overridden
    }
}
impl JsObject for InstanceObject {
    fn get_object_base_mut(&mut self) -> &mut ObjectBase {
        &mut self.object_base
    }

    fn get_object_base(&self) -> &ObjectBase {
        &self.object_base
    }

    fn class_name(&self) -> &'static str {
        self.class_name
    }
}

fn construct_host<T: ExposedClass>(
    ctx: &CallContext<'_>,
    args: &[JsValue],
) -> Result<Rc<dyn HostObject>, JErrorType> {
    let host: Rc<dyn HostObject> = Rc::new(T::construct(ctx, args)?);
    Ok(host)
}

/// The host payload behind `value`, if it is an instance object.
pub fn host_payload(value: &JsValue) -> Option<Rc<dyn HostObject>> {
    match value {
        JsValue::Object(o) => match &*o.borrow() {
            ObjectType::Instance(instance) => Some(instance.payload.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Runs `f` against the payload of `value` viewed as a `T`.
pub fn with_host<T: 'static, R>(value: &JsValue, f: impl FnOnce(&T) -> R) -> Option<R> {
    let payload = host_payload(value)?;
    let host = payload
        .upcast(TypeId::of::<T>())
        .and_then(|any| any.downcast_ref::<T>())?;
    Some(f(host))
}

/// The constructor whose lazy initialization an access to `object` depends
/// on.
pub fn owning_constructor(object: &ObjectType) -> Option<ConstructorId> {
    match object {
        ObjectType::Function(f) => f.constructor_id(),
        ObjectType::Prototype(p) => Some(p.constructor),
        ObjectType::Instance(i) => Some(i.constructor),
        _ => None,
    }
}

fn flagged_data(value: JsValue, flags: PropertyFlag) -> PropertyDescriptor {
    PropertyDescriptor::Data {
        value,
        writable: flags.contains(PropertyFlag::WRITABLE),
        enumerable: flags.contains(PropertyFlag::ENUMERABLE),
        configurable: flags.contains(PropertyFlag::CONFIGURABLE),
    }
}

impl Realm {
    /// Defines the constructor for `T` on top of the realm's base objects.
    pub fn define_class<T: ExposedClass>(&self) -> Result<ConstructorId, ConfigError> {
        self.define_exposed::<T>(None)
    }

    /// Defines the constructor for `T` with `S`'s constructor as its parent.
    /// `S` must already be defined in this realm.
    pub fn define_subclass<T: ExposedClass, S: ExposedClass>(
        &self,
    ) -> Result<ConstructorId, ConfigError> {
        let parent = self
            .constructor_of::<S>()
            .ok_or_else(|| ConfigError::ParentNotDefined {
                host_type: type_name::<T>().to_string(),
                parent: S::NAME.to_string(),
            })?;
        self.define_exposed::<T>(Some(parent))
    }

    fn define_exposed<T: ExposedClass>(
        &self,
        parent: Option<ConstructorId>,
    ) -> Result<ConstructorId, ConfigError> {
        let host_type = TypeId::of::<T>();
        if self.by_host_type.borrow().contains_key(&host_type) {
            return Err(ConfigError::DuplicateConstructor(T::NAME.to_string()));
        }
        let parent = match parent {
            Some(id) => Some(
                self.constructor_record(id)
                    .ok_or(ConfigError::UnknownConstructor(id.0))?,
            ),
            None => None,
        };

        let (instance_type, static_type) = {
            let mut registry = self.registry.borrow_mut();
            let super_type = parent.as_ref().map(|p| p.instance_type.handle());
            let instance_type = registry.get_or_create::<T>(T::NAME, super_type)?;
            let static_type =
                registry.get_or_create::<T::Statics>(type_name::<T::Statics>(), None)?;
            (instance_type, static_type)
        };

        let statics: Rc<dyn HostObject> = Rc::new(T::Statics::default());
        let (instance_members, static_members) = {
            let registry = self.registry.borrow();
            let factory = InvokerFactory::new(&registry);
            (
                factory.compile_all(&instance_type, &Receiver::Instance)?,
                factory.compile_all(&static_type, &Receiver::Static(statics.clone()))?,
            )
        };

        let id = ConstructorId(self.constructors.borrow().len());
        let (prototype_parent, function_parent) = match &parent {
            Some(p) => (p.prototype.clone(), p.function.clone()),
            None => (self.object_prototype.clone(), self.function_prototype.clone()),
        };
        let prototype = ObjectType::Prototype(PrototypeObject::new(
            id,
            T::NAME,
            Some(prototype_parent),
        ))
        .into_shared();
        let function = ObjectType::Function(FunctionObject::new(
            T::NAME.to_string(),
            0,
            FunctionKind::Constructor(id),
            Some(function_parent),
        ))
        .into_shared();

        function.borrow_mut().as_js_object_mut().get_object_base_mut().fast_set(
            PropertyKey::from("prototype"),
            PropertyDescriptor::Data {
                value: JsValue::Object(prototype.clone()),
                writable: false,
                enumerable: false,
                configurable: false,
            },
        );
        {
            let mut proto = prototype.borrow_mut();
            let base = proto.as_js_object_mut().get_object_base_mut();
            base.fast_set(
                PropertyKey::from("constructor"),
                flagged_data(JsValue::Object(function.clone()), PropertyFlag::CONFIGURABLE),
            );
            base.fast_set(
                PropertyKey::Sym(SYMBOL_TO_STRING_TAG.clone()),
                flagged_data(JsValue::from(T::NAME), PropertyFlag::CONFIGURABLE),
            );
        }

        let record = Rc::new(ConstructorRecord {
            id,
            name: T::NAME,
            host_type,
            instance_type,
            static_type,
            instance_members,
            static_members,
            statics,
            construct: construct_host::<T>,
            function,
            prototype,
            state: Cell::new(InitState::Uninitialized),
        });
        self.constructors.borrow_mut().push(record);
        self.by_host_type.borrow_mut().insert(host_type, id);
        debug!(
            name = T::NAME,
            constructor = id.0,
            parent = ?parent.as_ref().map(|p| p.name),
            "defined constructor"
        );
        Ok(id)
    }

    pub fn constructor_record(&self, id: ConstructorId) -> Option<Rc<ConstructorRecord>> {
        self.constructors.borrow().get(id.0).cloned()
    }

    pub fn constructor_of<T: 'static>(&self) -> Option<ConstructorId> {
        self.by_host_type.borrow().get(&TypeId::of::<T>()).cloned()
    }

    pub fn constructor_function(&self, id: ConstructorId) -> Option<JsObjectType> {
        self.constructor_record(id).map(|r| r.function.clone())
    }

    pub fn prototype_object(&self, id: ConstructorId) -> Option<JsObjectType> {
        self.constructor_record(id).map(|r| r.prototype.clone())
    }

    pub fn init_state(&self, id: ConstructorId) -> Option<InitState> {
        self.constructor_record(id).map(|r| r.state.get())
    }

    /// Attaches the constructor's members on first use, then does the same
    /// for the parent constructor. Any later call is a no-op.
    pub fn ensure_initialized(&self, id: ConstructorId) {
        let record = match self.constructor_record(id) {
            Some(record) => record,
            None => return,
        };
        if record.state.get() != InitState::Uninitialized {
            return;
        }
        record.state.set(InitState::Initializing);
        for member in record.instance_members.iter() {
            self.attach_member(&record.prototype, member);
        }
        for member in record.static_members.iter() {
            self.attach_member(&record.function, member);
        }
        record.state.set(InitState::Initialized);
        debug!(
            name = record.name,
            instance_members = record.instance_members.len(),
            static_members = record.static_members.len(),
            "initialized constructor"
        );

        let parent = record
            .function
            .borrow()
            .as_js_object()
            .get_object_base()
            .prototype
            .clone();
        let parent_id = parent.and_then(|p| match &*p.borrow() {
            ObjectType::Function(f) => f.constructor_id(),
            _ => None,
        });
        if let Some(parent_id) = parent_id {
            self.ensure_initialized(parent_id);
        }
    }

    fn attach_member(&self, target: &JsObjectType, member: &CompiledMember) {
        let flags = member.descriptor.flags;
        let descriptor = match &member.kind {
            CompiledKind::Accessor { get, set } => PropertyDescriptor::Accessor {
                get: get.as_ref().map(|a| self.adapter_function(a)),
                set: set.as_ref().map(|a| self.adapter_function(a)),
                enumerable: flags.contains(PropertyFlag::ENUMERABLE),
                configurable: flags.contains(PropertyFlag::CONFIGURABLE),
            },
            CompiledKind::Method(adapter) => {
                flagged_data(JsValue::Object(self.adapter_function(adapter)), flags)
            }
        };
        trace!(member = %member.descriptor.key(), "attaching member");
        target
            .borrow_mut()
            .as_js_object_mut()
            .get_object_base_mut()
            .fast_set(member.descriptor.key(), descriptor);
    }

    fn adapter_function(&self, adapter: &Rc<Adapter>) -> JsObjectType {
        ObjectType::Function(FunctionObject::new(
            adapter.function_name().to_string(),
            adapter.length(),
            FunctionKind::Adapter(adapter.clone()),
            Some(self.function_prototype.clone()),
        ))
        .into_shared()
    }

    /// Runs the type's construction logic and wraps the result.
    pub fn construct_instance(
        &self,
        id: ConstructorId,
        args: &[JsValue],
    ) -> Result<JsValue, JErrorType> {
        let record = self.constructor_record(id).ok_or_else(|| {
            JErrorType::TypeError(format!("unknown constructor {}", id.0))
        })?;
        self.ensure_initialized(id);
        let this = JsValue::Undefined;
        let ctx = CallContext::new(self, &this);
        let payload = (record.construct)(&ctx, args)?;
        Ok(self.wrap_payload(&record, payload))
    }

    fn wrap_payload(&self, record: &ConstructorRecord, payload: Rc<dyn HostObject>) -> JsValue {
        JsValue::Object(
            ObjectType::Instance(InstanceObject::new(record.id, record.name, payload)).into_shared(),
        )
    }

    /// Wraps an existing host value as an instance of its exposed type.
    pub fn instantiate<T: ExposedClass>(&self, host: T) -> Result<JsValue, JErrorType> {
        let id = self.constructor_of::<T>().ok_or_else(|| {
            JErrorType::TypeError(format!("{} is not defined in this realm", T::NAME))
        })?;
        let record = self.constructor_record(id).ok_or_else(|| {
            JErrorType::TypeError(format!("{} is not defined in this realm", T::NAME))
        })?;
        self.ensure_initialized(id);
        Ok(self.wrap_payload(&record, Rc::new(host)))
    }

    /// Makes the constructor reachable from the global object.
    pub fn install_global(&self, id: ConstructorId, name: &str) -> Result<(), ConfigError> {
        let function = self
            .constructor_function(id)
            .ok_or(ConfigError::UnknownConstructor(id.0))?;
        self.global
            .borrow_mut()
            .as_js_object_mut()
            .get_object_base_mut()
            .fast_set(
                PropertyKey::from(name),
                PropertyDescriptor::Data {
                    value: JsValue::Object(function),
                    writable: true,
                    enumerable: false,
                    configurable: true,
                },
            );
        debug!(name, constructor = id.0, "installed global");
        Ok(())
    }
}
