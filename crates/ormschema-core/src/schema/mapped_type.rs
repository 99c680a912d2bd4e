//! Opaque handle to the entity type a table was built from.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a mapped Rust type.
///
/// Compared by [`TypeId`]; the type name is kept for debugging only.
#[derive(Clone, Copy)]
pub struct MappedType {
    id: TypeId,
    name: &'static str,
}

impl MappedType {
    /// Handle for `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying type id.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for MappedType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MappedType {}

impl Hash for MappedType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for MappedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MappedType({})", self.name)
    }
}
