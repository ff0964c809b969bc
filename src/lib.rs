//! # just-bridge - exposing Rust types to a JavaScript object model
//!
//! A host type declares the members it exposes once, in a member table. The
//! bridge turns that table into a constructor function, a prototype object
//! and instances carrying the host value, wired into a realm's object graph:
//! - member discovery with exposed-name rules and property flags
//! - a type registry caching one descriptor per host type
//! - typed argument adapters, monomorphised per arity
//! - lazily initialised constructor/prototype/instance objects
//!
//! ## Quick Start
//!
//! ```
//! use just_bridge::runner::engine::ScriptEngine;
//! use just_bridge::runner::ds::value::JsValue;
//!
//! let engine = ScriptEngine::new().unwrap();
//! let date = engine
//!     .construct("WmDate", &[JsValue::integer(2024), JsValue::integer(2), JsValue::integer(29)])
//!     .unwrap();
//! let next = engine.call_method(&date, "addYears", &[JsValue::integer(1)]).unwrap();
//! assert_eq!(
//!     engine.call_method(&next, "toString", &[]).unwrap(),
//!     JsValue::from("2025-02-28")
//! );
//! ```
//!
//! ## Exposing a type
//!
//! ```
//! use just_bridge::runner::bridge::class::{ExposedClass, HostClass, HostObject, NoStatics};
//! use just_bridge::runner::bridge::invoker::CallContext;
//! use just_bridge::runner::bridge::member::MemberTable;
//! use just_bridge::runner::ds::error::JErrorType;
//! use just_bridge::runner::ds::realm::Realm;
//! use just_bridge::runner::ds::value::JsValue;
//!
//! struct Greeter;
//! impl HostObject for Greeter {}
//! impl Greeter {
//!     fn greet(&self, _ctx: &CallContext<'_>, name: String) -> String {
//!         format!("Hello, {}", name)
//!     }
//! }
//! impl HostClass for Greeter {
//!     fn declare(members: &mut MemberTable<Self>) {
//!         members.method("Greet", Greeter::greet);
//!     }
//! }
//! impl ExposedClass for Greeter {
//!     const NAME: &'static str = "Greeter";
//!     type Statics = NoStatics;
//!
//!     fn construct(_ctx: &CallContext<'_>, _args: &[JsValue]) -> Result<Self, JErrorType> {
//!         Ok(Greeter)
//!     }
//! }
//!
//! let realm = Realm::new();
//! let id = realm.define_class::<Greeter>().unwrap();
//! let greeter = realm.construct_instance(id, &[]).unwrap();
//! assert!(greeter.is_object());
//! ```
//!
//! ## Architecture
//!
//! - **[`runner::bridge`]** - member discovery, type registry, adapters and
//!   the constructor/prototype/instance model
//! - **[`runner::ds`]** - values, objects, property descriptors and the realm
//! - **[`runner::std_lib`]** - `Object`/`Reflect` and the `WmDate`, `WmTime`
//!   and `Uuid` classes
//! - **[`runner::plugin`]** - class registry and TOML realm configuration
//! - **[`runner::engine`]** - a realm with the core classes installed

#[macro_use]
extern crate lazy_static;

pub mod runner;
