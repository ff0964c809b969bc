//! Exposes Rust host types to scripts as constructor/prototype/instance
//! objects.
//!
//! A host type lists its members once ([`member`]). The [`type_registry`]
//! caches that list per host type, [`invoker`] compiles each member into an
//! adapter, and [`object_model`] wires the adapters into a realm's object
//! graph.

pub mod class;
pub mod enums;
pub mod error;
pub mod invoker;
pub mod member;
pub mod object_model;
pub mod type_registry;
