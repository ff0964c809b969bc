//! Core class registration.

use crate::runner::bridge::class::ExposedClass;
use crate::runner::bridge::error::ConfigError;
use crate::runner::bridge::object_model::ConstructorId;
use crate::runner::ds::realm::Realm;
use crate::runner::plugin::registry::BuiltInRegistry;

use super::date::WmDate;
use super::time::WmTime;
use super::unique_id::Uuid;

fn install<T: ExposedClass>(realm: &Realm) -> Result<ConstructorId, ConfigError> {
    realm.define_class::<T>()
}

/// Registers every class that ships with the crate.
pub fn register_core_classes(registry: &mut BuiltInRegistry) {
    registry.register_class(WmDate::NAME, install::<WmDate>);
    registry.register_class(WmTime::NAME, install::<WmTime>);
    registry.register_class(Uuid::NAME, install::<Uuid>);
}
