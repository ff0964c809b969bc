pub mod bridge;
pub mod ds;
pub mod engine;
pub mod plugin;
pub mod std_lib;
