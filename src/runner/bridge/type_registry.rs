use std::any::{type_name, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::runner::bridge::class::HostClass;
use crate::runner::bridge::error::ConfigError;
use crate::runner::bridge::member::{discover, MemberBinding, MemberDescriptor};

/// Stable index of a [`TypeDescriptor`] inside its [`TypeRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeHandle(pub(crate) usize);
impl TypeHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Everything discovered about one host type. Created once per host type and
/// never changed afterwards, apart from its list of sub types.
pub struct TypeDescriptor {
    handle: TypeHandle,
    host_type: TypeId,
    host_name: &'static str,
    name: String,
    members: Vec<MemberDescriptor>,
    bindings: Vec<MemberBinding>,
    base_types: Vec<TypeId>,
    super_type: Option<TypeHandle>,
    sub_types: RefCell<Vec<TypeHandle>>,
}
impl TypeDescriptor {
    pub fn handle(&self) -> TypeHandle {
        self.handle
    }

    pub fn host_type(&self) -> TypeId {
        self.host_type
    }

    pub fn host_name(&self) -> &'static str {
        self.host_name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    pub fn bindings(&self) -> &[MemberBinding] {
        &self.bindings
    }

    pub fn super_type(&self) -> Option<TypeHandle> {
        self.super_type
    }

    pub fn sub_types(&self) -> Vec<TypeHandle> {
        self.sub_types.borrow().clone()
    }

    pub fn find_member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name == name)
    }
}
impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("handle", &self.handle)
            .field("host_name", &self.host_name)
            .field("name", &self.name)
            .field("members", &self.members.len())
            .field("super_type", &self.super_type)
            .finish()
    }
}

pub type SharedTypeRegistry = Rc<RefCell<TypeRegistry>>;

/// Memoizes one [`TypeDescriptor`] per host type. Descriptors are held in an
/// arena and refer to each other by [`TypeHandle`].
#[derive(Default)]
pub struct TypeRegistry {
    descriptors: Vec<Rc<TypeDescriptor>>,
    by_host_type: HashMap<TypeId, TypeHandle>,
    discovery_runs: usize,
}
impl TypeRegistry {
    pub fn new() -> Self {
        TypeRegistry::default()
    }

    pub fn shared() -> SharedTypeRegistry {
        Rc::new(RefCell::new(TypeRegistry::new()))
    }

    /// Returns the descriptor for `T`, discovering its members on the first
    /// call. Later calls must pass the same super type.
    pub fn get_or_create<T: HostClass>(
        &mut self,
        name: &str,
        super_type: Option<TypeHandle>,
    ) -> Result<Rc<TypeDescriptor>, ConfigError> {
        let host_type = TypeId::of::<T>();
        if let Some(handle) = self.by_host_type.get(&host_type) {
            let existing = self.descriptors[handle.0].clone();
            if existing.super_type != super_type {
                return Err(ConfigError::SuperMismatch {
                    host_type: type_name::<T>().to_string(),
                    registered: self.host_name_of(existing.super_type),
                    requested: self.host_name_of(super_type),
                });
            }
            return Ok(existing);
        }

        let base_types = T::base_types();
        if let Some(super_handle) = super_type {
            let parent = self.get(super_handle)?;
            if !self.is_assignable(&base_types, parent.host_type) {
                return Err(ConfigError::NotAssignable {
                    host_type: type_name::<T>().to_string(),
                    super_type: parent.host_name.to_string(),
                });
            }
        }

        let discovered = discover::<T>()?;
        self.discovery_runs += 1;
        let handle = TypeHandle(self.descriptors.len());
        let descriptor = Rc::new(TypeDescriptor {
            handle,
            host_type,
            host_name: type_name::<T>(),
            name: name.to_string(),
            members: discovered.descriptors,
            bindings: discovered.bindings,
            base_types,
            super_type,
            sub_types: RefCell::new(Vec::new()),
        });
        if let Some(super_handle) = super_type {
            self.descriptors[super_handle.0]
                .sub_types
                .borrow_mut()
                .push(handle);
        }
        self.descriptors.push(descriptor.clone());
        self.by_host_type.insert(host_type, handle);
        debug!(
            host_type = descriptor.host_name,
            name,
            members = descriptor.members.len(),
            "registered host type"
        );
        Ok(descriptor)
    }

    pub fn get(&self, handle: TypeHandle) -> Result<Rc<TypeDescriptor>, ConfigError> {
        self.descriptors
            .get(handle.0)
            .cloned()
            .ok_or(ConfigError::UnknownType(handle.0))
    }

    pub fn lookup(&self, host_type: TypeId) -> Option<Rc<TypeDescriptor>> {
        self.by_host_type
            .get(&host_type)
            .map(|handle| self.descriptors[handle.0].clone())
    }

    pub fn lookup_type<T: 'static>(&self) -> Option<Rc<TypeDescriptor>> {
        self.lookup(TypeId::of::<T>())
    }

    pub fn contains(&self, host_type: TypeId) -> bool {
        self.by_host_type.contains_key(&host_type)
    }

    pub fn sub_types(&self, handle: TypeHandle) -> Vec<TypeHandle> {
        self.descriptors
            .get(handle.0)
            .map(|d| d.sub_types())
            .unwrap_or_default()
    }

    /// How many times member discovery has run. Each host type is discovered
    /// once.
    pub fn discovery_runs(&self) -> usize {
        self.discovery_runs
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    fn host_name_of(&self, handle: Option<TypeHandle>) -> Option<String> {
        handle
            .and_then(|h| self.descriptors.get(h.0))
            .map(|d| d.host_name.to_string())
    }

    /// Walks declared base types, following registered types' own bases.
    fn is_assignable(&self, base_types: &[TypeId], target: TypeId) -> bool {
        let mut pending: Vec<TypeId> = base_types.to_vec();
        let mut seen: Vec<TypeId> = Vec::new();
        while let Some(base) = pending.pop() {
            if base == target {
                return true;
            }
            if seen.contains(&base) {
                continue;
            }
            seen.push(base);
            if let Some(handle) = self.by_host_type.get(&base) {
                pending.extend(self.descriptors[handle.0].base_types.iter().cloned());
            }
        }
        false
    }
}
