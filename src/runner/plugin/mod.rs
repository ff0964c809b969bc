//! Installing exposed classes into a realm.
//!
//! [`BuiltInRegistry`](registry::BuiltInRegistry) maps class names to the
//! functions that define them; [`RealmConfig`](config::RealmConfig) selects
//! which ones are installed, under which global names, and the formatting
//! patterns the date and time classes use.

pub mod config;
pub mod registry;
