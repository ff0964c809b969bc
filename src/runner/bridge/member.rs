//! Declarative member tables and member discovery.
//!
//! A host type lists its exposed members in [`HostClass::declare`]. Discovery
//! runs that declaration once and turns it into ordered [`MemberDescriptor`]s:
//! properties first, then methods, each group in declaration order.

use std::any::{type_name, TypeId};
use std::marker::PhantomData;
use std::rc::Rc;

use bitflags::bitflags;
use tracing::trace;

use crate::runner::bridge::class::HostClass;
use crate::runner::bridge::error::ConfigError;
use crate::runner::bridge::invoker::{FromArg, HostFn, HostMethod};
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::symbol::{well_known_symbol, SymbolData};

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct PropertyFlag: u8 {
        const WRITABLE = 1 << 0;
        const ENUMERABLE = 1 << 1;
        const CONFIGURABLE = 1 << 2;
    }
}
impl PropertyFlag {
    /// Accessors: writability follows from the setter.
    pub fn accessor_default() -> Self {
        PropertyFlag::ENUMERABLE | PropertyFlag::CONFIGURABLE
    }

    pub fn method_default() -> Self {
        PropertyFlag::WRITABLE | PropertyFlag::CONFIGURABLE
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Property { readable: bool, writable: bool },
    Method { length: Option<u32> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemberDescriptor {
    pub declaring_type: TypeId,
    pub declaring_type_name: &'static str,
    pub host_name: String,
    pub name: String,
    pub symbol: Option<SymbolData>,
    pub flags: PropertyFlag,
    pub kind: MemberKind,
}
impl MemberDescriptor {
    /// The property key the member is installed under.
    pub fn key(&self) -> PropertyKey {
        match &self.symbol {
            Some(symbol) => PropertyKey::Sym(symbol.clone()),
            None => PropertyKey::Str(self.name.to_string()),
        }
    }

    /// The `name` of the function object built for the member.
    pub fn function_name(&self) -> String {
        match &self.symbol {
            Some(symbol) => format!("[{}]", symbol.description()),
            None => self.name.to_string(),
        }
    }

    pub fn is_property(&self) -> bool {
        matches!(self.kind, MemberKind::Property { .. })
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method { .. })
    }

    pub fn length_override(&self) -> Option<u32> {
        match self.kind {
            MemberKind::Method { length } => length,
            MemberKind::Property { .. } => None,
        }
    }
}

/// The host side of a member, kept next to its descriptor.
#[derive(Clone, Debug)]
pub enum MemberBinding {
    Property {
        getter: Option<Rc<HostFn>>,
        setter: Option<Rc<HostFn>>,
    },
    Method(Rc<HostFn>),
}

#[derive(Debug)]
pub struct DiscoveredMembers {
    pub descriptors: Vec<MemberDescriptor>,
    pub bindings: Vec<MemberBinding>,
}
impl DiscoveredMembers {
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

enum SymbolSource {
    Known(SymbolData),
    Named(String),
}

enum PendingKind {
    Property {
        getter: Option<HostFn>,
        setter: Option<HostFn>,
    },
    Method(HostFn),
}

struct PendingMember {
    host_name: String,
    name: Option<String>,
    symbol: Option<SymbolSource>,
    flags: Option<PropertyFlag>,
    length: Option<u32>,
    kind: PendingKind,
}
impl PendingMember {
    fn new(host_name: &str, kind: PendingKind) -> Self {
        PendingMember {
            host_name: host_name.to_string(),
            name: None,
            symbol: None,
            flags: None,
            length: None,
            kind,
        }
    }
}

pub struct MemberTable<T> {
    properties: Vec<PendingMember>,
    methods: Vec<PendingMember>,
    _host: PhantomData<fn() -> T>,
}
impl<T: HostClass> MemberTable<T> {
    pub(crate) fn new() -> Self {
        MemberTable {
            properties: Vec::new(),
            methods: Vec::new(),
            _host: PhantomData,
        }
    }

    /// Starts an accessor property. It needs at least a getter or a setter.
    pub fn property(&mut self, host_name: &str) -> PropertyBuilder<'_, T> {
        let index = self.properties.len();
        self.properties.push(PendingMember::new(
            host_name,
            PendingKind::Property {
                getter: None,
                setter: None,
            },
        ));
        PropertyBuilder {
            member: &mut self.properties[index],
            _host: PhantomData,
        }
    }

    pub fn method<Args, M: HostMethod<T, Args>>(
        &mut self,
        host_name: &str,
        method: M,
    ) -> MethodBuilder<'_, T> {
        let index = self.methods.len();
        self.methods.push(PendingMember::new(
            host_name,
            PendingKind::Method(HostFn::new(method)),
        ));
        MethodBuilder {
            member: &mut self.methods[index],
            _host: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.properties.len() + self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn finish(self) -> Result<DiscoveredMembers, ConfigError> {
        let mut descriptors = Vec::with_capacity(self.len());
        let mut bindings = Vec::with_capacity(self.len());
        for pending in self.properties.into_iter().chain(self.methods.into_iter()) {
            let name = match pending.name {
                Some(name) => name,
                None => to_js_name(&pending.host_name),
            };
            let symbol = match pending.symbol {
                None => None,
                Some(SymbolSource::Known(symbol)) => Some(symbol),
                Some(SymbolSource::Named(symbol)) => match well_known_symbol(&symbol) {
                    Some(known) => Some(known),
                    None => {
                        return Err(ConfigError::UnknownSymbol {
                            member: name,
                            symbol,
                        })
                    }
                },
            };
            let (kind, flags, binding) = match pending.kind {
                PendingKind::Property { getter, setter } => {
                    if getter.is_none() && setter.is_none() {
                        return Err(ConfigError::EmptyAccessor(name));
                    }
                    let flags = pending.flags.unwrap_or_else(PropertyFlag::accessor_default);
                    if flags.contains(PropertyFlag::WRITABLE) && setter.is_none() {
                        return Err(ConfigError::IncompatibleFlags(name));
                    }
                    (
                        MemberKind::Property {
                            readable: getter.is_some(),
                            writable: setter.is_some(),
                        },
                        flags,
                        MemberBinding::Property {
                            getter: getter.map(Rc::new),
                            setter: setter.map(Rc::new),
                        },
                    )
                }
                PendingKind::Method(method) => (
                    MemberKind::Method {
                        length: pending.length,
                    },
                    pending.flags.unwrap_or_else(PropertyFlag::method_default),
                    MemberBinding::Method(Rc::new(method)),
                ),
            };
            descriptors.push(MemberDescriptor {
                declaring_type: TypeId::of::<T>(),
                declaring_type_name: type_name::<T>(),
                host_name: pending.host_name,
                name,
                symbol,
                flags,
                kind,
            });
            bindings.push(binding);
        }
        Ok(DiscoveredMembers {
            descriptors,
            bindings,
        })
    }
}

pub struct PropertyBuilder<'t, T> {
    member: &'t mut PendingMember,
    _host: PhantomData<fn() -> T>,
}
impl<'t, T: HostClass> PropertyBuilder<'t, T> {
    pub fn getter<M: HostMethod<T, ()>>(self, getter: M) -> Self {
        if let PendingKind::Property { getter: slot, .. } = &mut self.member.kind {
            *slot = Some(HostFn::new(getter));
        }
        self
    }

    pub fn setter<A: FromArg, M: HostMethod<T, (A,)>>(self, setter: M) -> Self {
        if let PendingKind::Property { setter: slot, .. } = &mut self.member.kind {
            *slot = Some(HostFn::new(setter));
        }
        self
    }

    pub fn name(self, name: &str) -> Self {
        self.member.name = Some(name.to_string());
        self
    }

    pub fn symbol(self, symbol: &SymbolData) -> Self {
        self.member.symbol = Some(SymbolSource::Known(symbol.clone()));
        self
    }

    pub fn flags(self, flags: PropertyFlag) -> Self {
        self.member.flags = Some(flags);
        self
    }
}

pub struct MethodBuilder<'t, T> {
    member: &'t mut PendingMember,
    _host: PhantomData<fn() -> T>,
}
impl<'t, T: HostClass> MethodBuilder<'t, T> {
    pub fn name(self, name: &str) -> Self {
        self.member.name = Some(name.to_string());
        self
    }

    pub fn symbol(self, symbol: &SymbolData) -> Self {
        self.member.symbol = Some(SymbolSource::Known(symbol.clone()));
        self
    }

    /// Well-known symbol by short name, e.g. `"toPrimitive"`. Resolved, and
    /// rejected if unknown, during discovery.
    pub fn symbol_named(self, name: &str) -> Self {
        self.member.symbol = Some(SymbolSource::Named(name.to_string()));
        self
    }

    pub fn flags(self, flags: PropertyFlag) -> Self {
        self.member.flags = Some(flags);
        self
    }

    pub fn length(self, length: u32) -> Self {
        self.member.length = Some(length);
        self
    }
}

/// Lowercases only the first character: `ToJSON` becomes `toJSON`.
pub fn to_js_name(host_name: &str) -> String {
    let mut chars = host_name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Runs `T`'s member declaration. An empty declaration is not an error.
pub fn discover<T: HostClass>() -> Result<DiscoveredMembers, ConfigError> {
    let mut table = MemberTable::<T>::new();
    T::declare(&mut table);
    let discovered = table.finish()?;
    trace!(
        host_type = type_name::<T>(),
        members = discovered.descriptors.len(),
        "discovered members"
    );
    Ok(discovered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::bridge::class::HostObject;
    use crate::runner::bridge::invoker::CallContext;
    use crate::runner::ds::symbol::SYMBOL_TO_PRIMITIVE;
    use crate::runner::ds::value::JsValue;
    use pretty_assertions::assert_eq;

    struct Gauge;
    impl HostObject for Gauge {}
    impl Gauge {
        fn level(&self, _ctx: &CallContext<'_>) -> f64 {
            1.0
        }

        fn set_level(&self, _ctx: &CallContext<'_>, _level: f64) {}

        fn unit(&self, _ctx: &CallContext<'_>) -> String {
            "bar".to_string()
        }

        fn reset(&self, _ctx: &CallContext<'_>) {}

        fn convert(&self, _ctx: &CallContext<'_>, _hint: JsValue) -> f64 {
            1.0
        }
    }
    impl HostClass for Gauge {
        fn declare(members: &mut MemberTable<Self>) {
            members.method("Reset", Gauge::reset);
            members
                .property("Level")
                .getter(Gauge::level)
                .setter(Gauge::set_level);
            members
                .method("Convert", Gauge::convert)
                .symbol(&SYMBOL_TO_PRIMITIVE);
            members.property("SIUnit").getter(Gauge::unit).name("unit");
        }
    }

    struct Nothing;
    impl HostObject for Nothing {}
    impl HostClass for Nothing {
        fn declare(_members: &mut MemberTable<Self>) {}
    }

    struct BadFlags;
    impl HostObject for BadFlags {}
    impl BadFlags {
        fn size(&self, _ctx: &CallContext<'_>) -> f64 {
            0.0
        }
    }
    impl HostClass for BadFlags {
        fn declare(members: &mut MemberTable<Self>) {
            members
                .property("Size")
                .getter(BadFlags::size)
                .flags(PropertyFlag::WRITABLE | PropertyFlag::CONFIGURABLE);
        }
    }

    struct BadSymbol;
    impl HostObject for BadSymbol {}
    impl BadSymbol {
        fn noop(&self, _ctx: &CallContext<'_>) {}
    }
    impl HostClass for BadSymbol {
        fn declare(members: &mut MemberTable<Self>) {
            members.method("Noop", BadSymbol::noop).symbol_named("toJSON");
        }
    }

    #[test]
    fn test_exposed_name_lowercases_first_character_only() {
        assert_eq!(to_js_name("ToJSON"), "toJSON");
        assert_eq!(to_js_name("Year"), "year");
        assert_eq!(to_js_name("already"), "already");
        assert_eq!(to_js_name(""), "");
    }

    #[test]
    fn test_properties_come_before_methods_in_declaration_order() {
        let discovered = discover::<Gauge>().unwrap();
        let names: Vec<String> = discovered
            .descriptors
            .iter()
            .map(|d| d.function_name())
            .collect();
        assert_eq!(
            names,
            vec!["level", "unit", "reset", "[Symbol.toPrimitive]"]
        );
        assert_eq!(discovered.bindings.len(), 4);
    }

    #[test]
    fn test_default_flags_follow_member_kind() {
        let discovered = discover::<Gauge>().unwrap();
        let level = &discovered.descriptors[0];
        assert_eq!(level.flags, PropertyFlag::ENUMERABLE | PropertyFlag::CONFIGURABLE);
        assert_eq!(
            level.kind,
            MemberKind::Property {
                readable: true,
                writable: true
            }
        );
        let reset = &discovered.descriptors[2];
        assert_eq!(reset.flags, PropertyFlag::WRITABLE | PropertyFlag::CONFIGURABLE);
        assert_eq!(reset.key(), PropertyKey::from("reset"));
        assert_eq!(
            discovered.descriptors[3].key(),
            PropertyKey::Sym(SYMBOL_TO_PRIMITIVE.clone())
        );
    }

    #[test]
    fn test_type_without_members_discovers_nothing() {
        assert!(discover::<Nothing>().unwrap().is_empty());
    }

    #[test]
    fn test_writable_flag_without_setter_is_rejected() {
        assert_eq!(
            discover::<BadFlags>().unwrap_err(),
            ConfigError::IncompatibleFlags("size".to_string())
        );
    }

    #[test]
    fn test_unknown_symbol_name_is_rejected() {
        assert_eq!(
            discover::<BadSymbol>().unwrap_err(),
            ConfigError::UnknownSymbol {
                member: "noop".to_string(),
                symbol: "toJSON".to_string()
            }
        );
    }
}
