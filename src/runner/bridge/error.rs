use thiserror::Error;

/// Setup-time errors. They are raised while types are registered and adapters
/// are compiled, before any instance of the type exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{host_type} is not assignable to {super_type}")]
    NotAssignable {
        host_type: String,
        super_type: String,
    },
    #[error("{host_type} was registered with super type {registered:?}, not {requested:?}")]
    SuperMismatch {
        host_type: String,
        registered: Option<String>,
        requested: Option<String>,
    },
    #[error("{0} already has a constructor in this realm")]
    DuplicateConstructor(String),
    #[error("member '{member}' uses {kind}, which is not registered with the type registry")]
    Unrepresentable { member: String, kind: String },
    #[error("property '{0}' is flagged writable but has no setter")]
    IncompatibleFlags(String),
    #[error("property '{0}' has neither a getter nor a setter")]
    EmptyAccessor(String),
    #[error("member '{0}' declares a variadic parameter that is not the last one")]
    MisplacedRest(String),
    #[error("member '{member}' refers to unknown well-known symbol '{symbol}'")]
    UnknownSymbol { member: String, symbol: String },
    #[error("unknown constructor handle {0}")]
    UnknownConstructor(usize),
    #[error("unknown type handle {0}")]
    UnknownType(usize),
    #[error("{host_type} extends {parent}, which has no constructor in this realm")]
    ParentNotDefined { host_type: String, parent: String },
}
