//! Lazy-caching proxy for a VM-owned type
//!
//! Minimal by design: the method surface only needs the declaring type's
//! identity and name. Identity is the handle; the name is fetched over
//! the boundary on first use and cached.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::VmResult;
use crate::ri::method::TypeRef;
use crate::vm::handle::TypeHandle;
use crate::vm::queries::VmQueries;

/// A VM-owned type, seen through its handle.
pub struct VmType {
    handle: TypeHandle,
    queries: Arc<dyn VmQueries>,
    name: OnceCell<String>,
}

impl VmType {
    /// Create a proxy for the type named by `handle`. No boundary call.
    pub fn new(queries: Arc<dyn VmQueries>, handle: TypeHandle) -> Self {
        VmType {
            handle,
            queries,
            name: OnceCell::new(),
        }
    }

    /// The handle this proxy stands for.
    pub fn handle(&self) -> TypeHandle {
        self.handle
    }

    /// Fully qualified name, fetched once then cached.
    pub fn name(&self) -> VmResult<&str> {
        self.name
            .get_or_try_init(|| self.queries.type_name(self.handle))
            .map(String::as_str)
    }
}

impl TypeRef for VmType {
    fn name(&self) -> VmResult<&str> {
        VmType::name(self)
    }
}

// Identity is the handle, never structural content.
impl PartialEq for VmType {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for VmType {}

impl Hash for VmType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
    }
}

impl fmt::Debug for VmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VmType")
            .field("handle", &self.handle)
            .field("name", &self.name.get())
            .finish()
    }
}
