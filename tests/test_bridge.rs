//! Integration tests for exposing host types to the object model.
//!
//! Covers member installation on prototypes and constructors, lazy
//! initialisation, argument adapters, inheritance and setup errors.

extern crate just_bridge;

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::rc::Rc;

use just_bridge::runner::bridge::class::{ExposedClass, HostClass, HostObject, NoStatics};
use just_bridge::runner::bridge::error::ConfigError;
use just_bridge::runner::bridge::invoker::{CallContext, Exposed, Instance, Rest};
use just_bridge::runner::bridge::member::{MemberTable, PropertyFlag};
use just_bridge::runner::bridge::object_model::{ConstructorId, InitState};
use just_bridge::runner::bridge::type_registry::TypeRegistry;
use just_bridge::runner::ds::error::JErrorType;
use just_bridge::runner::ds::object::JsObjectType;
use just_bridge::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use just_bridge::runner::ds::realm::Realm;
use just_bridge::runner::ds::symbol::SYMBOL_TO_STRING_TAG;
use just_bridge::runner::ds::value::JsValue;

// ============================================================================
// Host types
// ============================================================================

struct Holder {
    value: RefCell<JsValue>,
    secret: RefCell<String>,
}
impl HostObject for Holder {}

impl Holder {
    fn value(&self, _ctx: &CallContext<'_>) -> JsValue {
        self.value.borrow().clone()
    }

    fn set_value(&self, _ctx: &CallContext<'_>, value: JsValue) {
        *self.value.borrow_mut() = value;
    }

    fn set_secret(&self, _ctx: &CallContext<'_>, secret: String) {
        *self.secret.borrow_mut() = secret;
    }

    fn add(&self, _ctx: &CallContext<'_>, amount: f64) -> f64 {
        let current = match &*self.value.borrow() {
            JsValue::Number(n) => n.as_f64(),
            _ => f64::NAN,
        };
        current + amount
    }

    fn describe(&self, _ctx: &CallContext<'_>, prefix: Option<String>) -> String {
        format!("{}{}", prefix.unwrap_or_default(), self.secret.borrow())
    }

    fn matches(&self, _ctx: &CallContext<'_>, other: Instance<Holder>) -> bool {
        *self.value.borrow() == *other.value.borrow()
    }
}

impl HostClass for Holder {
    fn declare(members: &mut MemberTable<Self>) {
        members
            .property("Value")
            .getter(Holder::value)
            .setter(Holder::set_value);
        members.property("Secret").setter(Holder::set_secret);
        members.method("Add", Holder::add);
        members.method("Describe", Holder::describe);
        members.method("Matches", Holder::matches);
    }
}

impl ExposedClass for Holder {
    const NAME: &'static str = "Box";
    type Statics = HolderStatics;

    fn construct(_ctx: &CallContext<'_>, args: &[JsValue]) -> Result<Self, JErrorType> {
        Ok(Holder {
            value: RefCell::new(args.first().cloned().unwrap_or(JsValue::Undefined)),
            secret: RefCell::new(String::new()),
        })
    }
}

#[derive(Default)]
struct HolderStatics;
impl HostObject for HolderStatics {}

impl HolderStatics {
    fn capacity(&self, _ctx: &CallContext<'_>) -> f64 {
        16.0
    }

    fn of(&self, _ctx: &CallContext<'_>, value: JsValue) -> Exposed<Holder> {
        Exposed(Holder {
            value: RefCell::new(value),
            secret: RefCell::new(String::new()),
        })
    }
}

impl HostClass for HolderStatics {
    fn declare(members: &mut MemberTable<Self>) {
        members
            .property("Capacity")
            .getter(HolderStatics::capacity)
            .name("CAPACITY");
        members.method("Of", HolderStatics::of);
    }
}

struct Summer;
impl HostObject for Summer {}

impl Summer {
    fn sum(&self, _ctx: &CallContext<'_>, values: Rest<f64>) -> f64 {
        values.iter().fold(0.0, |total, v| total + v)
    }

    fn join(&self, _ctx: &CallContext<'_>, separator: String, parts: Rest<String>) -> String {
        parts.join(&separator)
    }

    fn is_callable(&self, _ctx: &CallContext<'_>, target: JsObjectType) -> bool {
        target.borrow().is_callable()
    }
}

impl HostClass for Summer {
    fn declare(members: &mut MemberTable<Self>) {
        members.method("Sum", Summer::sum);
        members.method("Join", Summer::join);
        members.method("IsCallable", Summer::is_callable);
    }
}

impl ExposedClass for Summer {
    const NAME: &'static str = "Summer";
    type Statics = NoStatics;

    fn construct(_ctx: &CallContext<'_>, _args: &[JsValue]) -> Result<Self, JErrorType> {
        Ok(Summer)
    }
}

struct Shape {
    side: f64,
}
impl HostObject for Shape {}

impl Shape {
    fn area(&self, _ctx: &CallContext<'_>) -> f64 {
        self.side * self.side
    }
}

impl HostClass for Shape {
    fn declare(members: &mut MemberTable<Self>) {
        members.property("Area").getter(Shape::area);
    }
}

impl ExposedClass for Shape {
    const NAME: &'static str = "Shape";
    type Statics = NoStatics;

    fn construct(_ctx: &CallContext<'_>, args: &[JsValue]) -> Result<Self, JErrorType> {
        let side = match args.first() {
            Some(JsValue::Number(n)) => n.as_f64(),
            _ => 1.0,
        };
        Ok(Shape { side })
    }
}

struct Square {
    shape: Shape,
}

impl HostObject for Square {
    fn upcast(&self, target: TypeId) -> Option<&dyn Any> {
        if target == TypeId::of::<Square>() {
            Some(self as &dyn Any)
        } else {
            self.shape.upcast(target)
        }
    }
}

impl Square {
    fn side(&self, _ctx: &CallContext<'_>) -> f64 {
        self.shape.side
    }
}

impl HostClass for Square {
    fn declare(members: &mut MemberTable<Self>) {
        members.property("Side").getter(Square::side);
    }

    fn base_types() -> Vec<TypeId> {
        vec![TypeId::of::<Shape>()]
    }
}

impl ExposedClass for Square {
    const NAME: &'static str = "Square";
    type Statics = NoStatics;

    fn construct(ctx: &CallContext<'_>, args: &[JsValue]) -> Result<Self, JErrorType> {
        Ok(Square {
            shape: Shape::construct(ctx, args)?,
        })
    }
}

/// Shares no ancestry with `Shape`.
struct Loner;
impl HostObject for Loner {}
impl HostClass for Loner {
    fn declare(_members: &mut MemberTable<Self>) {}
}
impl ExposedClass for Loner {
    const NAME: &'static str = "Loner";
    type Statics = NoStatics;

    fn construct(_ctx: &CallContext<'_>, _args: &[JsValue]) -> Result<Self, JErrorType> {
        Ok(Loner)
    }
}

/// Only usable as a parameter type once it is defined.
struct Ghost;
impl HostObject for Ghost {}
impl HostClass for Ghost {
    fn declare(_members: &mut MemberTable<Self>) {}
}
impl ExposedClass for Ghost {
    const NAME: &'static str = "Ghost";
    type Statics = NoStatics;

    fn construct(_ctx: &CallContext<'_>, _args: &[JsValue]) -> Result<Self, JErrorType> {
        Ok(Ghost)
    }
}

struct Haunted;
impl HostObject for Haunted {}
impl Haunted {
    fn scare(&self, _ctx: &CallContext<'_>, _ghost: Instance<Ghost>) -> bool {
        true
    }
}
impl HostClass for Haunted {
    fn declare(members: &mut MemberTable<Self>) {
        members.method("Scare", Haunted::scare);
    }
}
impl ExposedClass for Haunted {
    const NAME: &'static str = "Haunted";
    type Statics = NoStatics;

    fn construct(_ctx: &CallContext<'_>, _args: &[JsValue]) -> Result<Self, JErrorType> {
        Ok(Haunted)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn get(realm: &Realm, target: &JsValue, name: &str) -> JsValue {
    let object = target.as_object().expect("target is an object");
    realm
        .get(object, &PropertyKey::from(name), target)
        .expect("property read")
}

fn set(realm: &Realm, target: &JsValue, name: &str, value: JsValue) -> bool {
    let object = target.as_object().expect("target is an object");
    realm
        .set(object, PropertyKey::from(name), value, target)
        .expect("property write")
}

fn invoke(realm: &Realm, target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, JErrorType> {
    let method = get(realm, target, name);
    realm.call(&method, target, args)
}

fn proto_value(realm: &Realm, id: ConstructorId) -> JsValue {
    JsValue::Object(realm.prototype_object(id).expect("defined constructor"))
}

fn ctor_value(realm: &Realm, id: ConstructorId) -> JsValue {
    JsValue::Object(realm.constructor_function(id).expect("defined constructor"))
}

fn str_keys(realm: &Realm, object: &JsObjectType) -> Vec<String> {
    realm
        .own_property_keys(object)
        .into_iter()
        .filter_map(|key| match key {
            PropertyKey::Str(s) => Some(s),
            _ => None,
        })
        .collect()
}

fn same_object(a: Option<JsObjectType>, b: Option<JsObjectType>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(&a, &b),
        (None, None) => true,
        _ => false,
    }
}

fn number(value: &JsValue) -> f64 {
    match value {
        JsValue::Number(n) => n.as_f64(),
        other => panic!("expected a number, got {}", other),
    }
}

// ============================================================================
// Instance members
// ============================================================================

mod member_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_property_reads_undefined_until_written() {
        let realm = Realm::new();
        let id = realm.define_class::<Holder>().unwrap();
        let boxed = realm.construct_instance(id, &[]).unwrap();

        assert_eq!(get(&realm, &boxed, "value"), JsValue::Undefined);
        assert!(set(&realm, &boxed, "value", JsValue::integer(5)));
        assert_eq!(get(&realm, &boxed, "value"), JsValue::integer(5));
    }

    #[test]
    fn test_method_length_counts_required_parameters() {
        let realm = Realm::new();
        let id = realm.define_class::<Holder>().unwrap();
        let proto = proto_value(&realm, id);

        let add = get(&realm, &proto, "add");
        assert_eq!(get(&realm, &add, "length"), JsValue::integer(1));
        assert_eq!(get(&realm, &add, "name"), JsValue::from("add"));

        let describe = get(&realm, &proto, "describe");
        assert_eq!(get(&realm, &describe, "length"), JsValue::integer(0));
    }

    #[test]
    fn test_missing_number_argument_is_nan() {
        let realm = Realm::new();
        let id = realm.define_class::<Holder>().unwrap();
        let boxed = realm.construct_instance(id, &[JsValue::integer(2)]).unwrap();

        assert!(number(&invoke(&realm, &boxed, "add", &[]).unwrap()).is_nan());
        assert_eq!(
            invoke(&realm, &boxed, "add", &[JsValue::integer(3)]).unwrap(),
            JsValue::integer(5)
        );
    }

    #[test]
    fn test_write_only_property_reads_undefined() {
        let realm = Realm::new();
        let id = realm.define_class::<Holder>().unwrap();
        let boxed = realm.construct_instance(id, &[]).unwrap();

        assert!(set(&realm, &boxed, "secret", JsValue::from("hidden")));
        assert_eq!(get(&realm, &boxed, "secret"), JsValue::Undefined);
        assert_eq!(
            invoke(&realm, &boxed, "describe", &[JsValue::from("it is ")]).unwrap(),
            JsValue::from("it is hidden")
        );
        assert_eq!(
            invoke(&realm, &boxed, "describe", &[]).unwrap(),
            JsValue::from("hidden")
        );
    }

    #[test]
    fn test_members_follow_declaration_order() {
        let realm = Realm::new();
        let id = realm.define_class::<Holder>().unwrap();
        realm.ensure_initialized(id);
        let proto = realm.prototype_object(id).unwrap();

        assert_eq!(
            str_keys(&realm, &proto),
            vec!["constructor", "value", "secret", "add", "describe", "matches"]
        );
    }

    #[test]
    fn test_member_flags_differ_for_accessors_and_methods() {
        let realm = Realm::new();
        let id = realm.define_class::<Holder>().unwrap();
        realm.ensure_initialized(id);
        let proto = realm.prototype_object(id).unwrap();

        let value = realm
            .get_own_property(&proto, &PropertyKey::from("value"))
            .unwrap();
        assert!(value.is_accessor_descriptor());
        assert!(value.is_enumerable());
        assert!(value.is_configurable());

        let add = realm
            .get_own_property(&proto, &PropertyKey::from("add"))
            .unwrap();
        assert!(add.is_data_descriptor());
        assert!(add.is_writable());
        assert!(!add.is_enumerable());
        assert!(add.is_configurable());

        assert_eq!(
            PropertyFlag::accessor_default(),
            PropertyFlag::ENUMERABLE | PropertyFlag::CONFIGURABLE
        );
    }

    #[test]
    fn test_host_instance_argument() {
        let realm = Realm::new();
        let id = realm.define_class::<Holder>().unwrap();
        let a = realm.construct_instance(id, &[JsValue::integer(1)]).unwrap();
        let b = realm.construct_instance(id, &[JsValue::integer(1)]).unwrap();
        let c = realm.construct_instance(id, &[JsValue::integer(2)]).unwrap();

        assert_eq!(invoke(&realm, &a, "matches", &[b]).unwrap(), JsValue::from(true));
        assert_eq!(invoke(&realm, &a, "matches", &[c]).unwrap(), JsValue::from(false));
        assert_eq!(
            invoke(&realm, &a, "matches", &[JsValue::integer(1)]),
            Err(JErrorType::TypeError("Argument 1 is not a Box".to_string()))
        );
    }

    #[test]
    fn test_incompatible_receiver_is_type_error() {
        let realm = Realm::new();
        let holder = realm.define_class::<Holder>().unwrap();
        let shape = realm.define_class::<Shape>().unwrap();
        let boxed = realm.construct_instance(holder, &[]).unwrap();
        let square = realm.construct_instance(shape, &[]).unwrap();

        let add = get(&realm, &boxed, "add");
        assert_eq!(
            realm.call(&add, &square, &[JsValue::integer(1)]),
            Err(JErrorType::TypeError("add called on incompatible type".to_string()))
        );
        assert!(realm.call(&add, &JsValue::Undefined, &[]).unwrap_err().is_type_error());
    }

    #[test]
    fn test_prototype_structure() {
        let realm = Realm::new();
        let id = realm.define_class::<Holder>().unwrap();
        let function = realm.constructor_function(id).unwrap();
        let proto = realm.prototype_object(id).unwrap();

        match realm.get_own_property(&function, &PropertyKey::from("prototype")) {
            Some(PropertyDescriptor::Data {
                value,
                writable,
                enumerable,
                configurable,
            }) => {
                assert_eq!(value, JsValue::Object(proto.clone()));
                assert!(!writable && !enumerable && !configurable);
            }
            _ => panic!("prototype should be a data property"),
        }

        let tag = realm
            .get_own_property(&proto, &PropertyKey::Sym(SYMBOL_TO_STRING_TAG.clone()))
            .unwrap();
        assert_eq!(tag.value(), Some(&JsValue::from("Box")));
        assert_eq!(
            get(&realm, &JsValue::Object(proto), "constructor"),
            JsValue::Object(function)
        );
    }
}

// ============================================================================
// Adapter shapes
// ============================================================================

mod adapter_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_variadic_method() {
        let realm = Realm::new();
        let id = realm.define_class::<Summer>().unwrap();
        let summer = realm.construct_instance(id, &[]).unwrap();

        assert_eq!(invoke(&realm, &summer, "sum", &[]).unwrap(), JsValue::integer(0));
        assert_eq!(
            invoke(
                &realm,
                &summer,
                "sum",
                &[JsValue::integer(1), JsValue::integer(2), JsValue::integer(3)]
            )
            .unwrap(),
            JsValue::integer(6)
        );
        let sum = get(&realm, &summer, "sum");
        assert_eq!(get(&realm, &sum, "length"), JsValue::integer(0));
    }

    #[test]
    fn test_fixed_then_variadic_parameters() {
        let realm = Realm::new();
        let id = realm.define_class::<Summer>().unwrap();
        let summer = realm.construct_instance(id, &[]).unwrap();

        assert_eq!(
            invoke(
                &realm,
                &summer,
                "join",
                &[JsValue::from("-"), JsValue::from("a"), JsValue::integer(1)]
            )
            .unwrap(),
            JsValue::from("a-1")
        );
        let join = get(&realm, &summer, "join");
        assert_eq!(get(&realm, &join, "length"), JsValue::integer(1));
    }

    #[test]
    fn test_object_parameter_rejects_primitives() {
        let realm = Realm::new();
        let id = realm.define_class::<Summer>().unwrap();
        let summer = realm.construct_instance(id, &[]).unwrap();
        let callable = get(&realm, &summer, "sum");

        assert_eq!(
            invoke(&realm, &summer, "isCallable", &[callable]).unwrap(),
            JsValue::from(true)
        );
        assert_eq!(
            invoke(&realm, &summer, "isCallable", &[JsValue::integer(1)]),
            Err(JErrorType::TypeError("Argument 1 is not an Object".to_string()))
        );
    }
}

// ============================================================================
// Constructors and lazy initialisation
// ============================================================================

mod constructor_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_constructor_requires_new() {
        let realm = Realm::new();
        let id = realm.define_class::<Holder>().unwrap();
        let function = ctor_value(&realm, id);

        assert_eq!(
            realm.call(&function, &JsValue::Undefined, &[]),
            Err(JErrorType::TypeError("Box constructor: 'new' is required".to_string()))
        );
        let boxed = realm.construct(&function, &[JsValue::integer(7)]).unwrap();
        assert_eq!(get(&realm, &boxed, "value"), JsValue::integer(7));
        assert!(realm.instance_of(&boxed, &realm.constructor_function(id).unwrap()).unwrap());
    }

    #[test]
    fn test_members_attach_on_first_use() {
        let realm = Realm::new();
        let id = realm.define_class::<Holder>().unwrap();
        assert_eq!(realm.init_state(id), Some(InitState::Uninitialized));

        let proto = proto_value(&realm, id);
        let add = get(&realm, &proto, "add");
        assert!(add.is_object());
        assert_eq!(realm.init_state(id), Some(InitState::Initialized));
    }

    #[test]
    fn test_initialisation_is_idempotent() {
        let realm = Realm::new();
        let id = realm.define_class::<Holder>().unwrap();
        realm.ensure_initialized(id);
        let proto = realm.prototype_object(id).unwrap();
        let keys = realm.own_property_keys(&proto);
        let add = get(&realm, &JsValue::Object(proto.clone()), "add");

        realm.ensure_initialized(id);
        assert_eq!(realm.own_property_keys(&proto), keys);
        assert_eq!(get(&realm, &JsValue::Object(proto), "add"), add);
    }

    #[test]
    fn test_static_members_live_on_constructor() {
        let realm = Realm::new();
        let id = realm.define_class::<Holder>().unwrap();
        let function = ctor_value(&realm, id);

        assert_eq!(get(&realm, &function, "CAPACITY"), JsValue::integer(16));
        let made = invoke(&realm, &function, "of", &[JsValue::from("x")]).unwrap();
        assert_eq!(get(&realm, &made, "value"), JsValue::from("x"));
        assert!(same_object(
            realm.get_prototype_of(made.as_object().unwrap()),
            realm.prototype_object(id)
        ));
    }

    #[test]
    fn test_duplicate_constructor_is_rejected() {
        let realm = Realm::new();
        realm.define_class::<Holder>().unwrap();
        assert_eq!(
            realm.define_class::<Holder>(),
            Err(ConfigError::DuplicateConstructor("Box".to_string()))
        );
    }

    #[test]
    fn test_unregistered_parameter_type_is_unrepresentable() {
        let realm = Realm::new();
        assert_eq!(
            realm.define_class::<Haunted>(),
            Err(ConfigError::Unrepresentable {
                member: "scare".to_string(),
                kind: "Ghost".to_string(),
            })
        );

        let realm = Realm::new();
        realm.define_class::<Ghost>().unwrap();
        assert!(realm.define_class::<Haunted>().is_ok());
    }
}

// ============================================================================
// Prototype of instances
// ============================================================================

mod prototype_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_instance_prototype_defaults_to_class_prototype() {
        let realm = Realm::new();
        let id = realm.define_class::<Holder>().unwrap();
        let boxed = realm.construct_instance(id, &[]).unwrap();

        assert!(same_object(
            realm.get_prototype_of(boxed.as_object().unwrap()),
            realm.prototype_object(id)
        ));
    }

    #[test]
    fn test_set_prototype_overrides_class_prototype() {
        let realm = Realm::new();
        let id = realm.define_class::<Holder>().unwrap();
        let boxed = realm.construct_instance(id, &[JsValue::integer(1)]).unwrap();
        let object = boxed.as_object().unwrap();
        let replacement = realm.create_object();

        assert!(realm.set_prototype_of(object, Some(replacement.clone())));
        assert!(same_object(realm.get_prototype_of(object), Some(replacement)));
        assert_eq!(get(&realm, &boxed, "add"), JsValue::Undefined);

        assert!(realm.set_prototype_of(object, None));
        assert!(realm.get_prototype_of(object).is_none());
    }

    #[test]
    fn test_prototype_cycle_is_refused() {
        let realm = Realm::new();
        let id = realm.define_class::<Holder>().unwrap();
        let boxed = realm.construct_instance(id, &[]).unwrap();
        let object = boxed.as_object().unwrap();
        let middle = realm.create_object();

        assert!(realm.set_prototype_of(&middle, Some(object.clone())));
        assert!(!realm.set_prototype_of(object, Some(middle)));
        assert!(same_object(realm.get_prototype_of(object), realm.prototype_object(id)));
    }
}

// ============================================================================
// Inheritance and the type registry
// ============================================================================

mod inheritance_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_subclass_chains_prototypes_and_constructors() {
        let realm = Realm::new();
        let shape = realm.define_class::<Shape>().unwrap();
        let square = realm.define_subclass::<Square, Shape>().unwrap();

        assert!(same_object(
            realm.get_prototype_of(&realm.prototype_object(square).unwrap()),
            realm.prototype_object(shape)
        ));
        assert!(same_object(
            realm.get_prototype_of(&realm.constructor_function(square).unwrap()),
            realm.constructor_function(shape)
        ));

        let registry = realm.registry().borrow();
        let parent = registry.lookup_type::<Shape>().unwrap();
        let child = registry.lookup_type::<Square>().unwrap();
        assert_eq!(child.super_type(), Some(parent.handle()));
        assert_eq!(parent.sub_types(), vec![child.handle()]);
    }

    #[test]
    fn test_inherited_member_reaches_embedded_payload() {
        let realm = Realm::new();
        let shape = realm.define_class::<Shape>().unwrap();
        let square = realm.define_subclass::<Square, Shape>().unwrap();
        let value = realm.construct_instance(square, &[JsValue::integer(3)]).unwrap();

        assert_eq!(get(&realm, &value, "side"), JsValue::integer(3));
        assert_eq!(get(&realm, &value, "area"), JsValue::integer(9));
        assert_eq!(realm.init_state(shape), Some(InitState::Initialized));
        assert!(realm
            .instance_of(&value, &realm.constructor_function(shape).unwrap())
            .unwrap());
    }

    #[test]
    fn test_parent_must_be_defined_first() {
        let realm = Realm::new();
        assert!(matches!(
            realm.define_subclass::<Square, Shape>(),
            Err(ConfigError::ParentNotDefined { .. })
        ));
    }

    #[test]
    fn test_unrelated_type_is_not_assignable() {
        let realm = Realm::new();
        realm.define_class::<Shape>().unwrap();
        assert!(matches!(
            realm.define_subclass::<Loner, Shape>(),
            Err(ConfigError::NotAssignable { .. })
        ));
    }

    #[test]
    fn test_super_type_must_match_first_registration() {
        let registry = TypeRegistry::shared();
        let first = Realm::with_registry(registry.clone());
        first.define_class::<Square>().unwrap();

        let second = Realm::with_registry(registry);
        second.define_class::<Shape>().unwrap();
        assert!(matches!(
            second.define_subclass::<Square, Shape>(),
            Err(ConfigError::SuperMismatch { .. })
        ));
    }

    #[test]
    fn test_shared_registry_discovers_each_type_once() {
        let registry = TypeRegistry::shared();
        let first = Realm::with_registry(registry.clone());
        let a = first.define_class::<Holder>().unwrap();
        let runs = registry.borrow().discovery_runs();

        let second = Realm::with_registry(registry.clone());
        let b = second.define_class::<Holder>().unwrap();
        assert_eq!(registry.borrow().discovery_runs(), runs);

        let first_type = first.constructor_record(a).unwrap().instance_type().clone();
        let second_type = second.constructor_record(b).unwrap().instance_type().clone();
        assert!(Rc::ptr_eq(&first_type, &second_type));
        assert!(!same_object(
            first.constructor_function(a),
            second.constructor_function(b)
        ));
    }
}
