//! Built-in objects and the exposed classes that ship with the crate.
//!
//! `object` installs the `Object` and `Reflect` globals every realm starts
//! with. `date`, `time` and `unique_id` are host types exposed through the
//! bridge.

pub mod calendar;
pub mod core;
pub mod date;
pub mod format;
pub mod object;
pub mod time;
pub mod unique_id;

pub use self::core::register_core_classes;
