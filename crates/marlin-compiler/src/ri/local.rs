//! Fully-local method and type representations
//!
//! Everything here is resolved on the compiler side at construction time:
//! accessors never cross the VM boundary and never fail. Used for methods
//! the compiler materializes itself (synthetic stubs, methods decoded
//! straight from a class file) while still flowing through the same
//! [`MethodRef`] surface as VM-backed proxies.

use std::fmt;
use std::sync::Arc;

use crate::error::VmResult;
use crate::ri::method::{MethodRef, TypeRef};
use crate::ri::signature::Signature;

/// A compiler-owned type with all data resident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalType {
    name: String,
}

impl LocalType {
    /// Create a local type with the given fully qualified name.
    pub fn new(name: impl Into<String>) -> Self {
        LocalType { name: name.into() }
    }
}

impl TypeRef for LocalType {
    fn name(&self) -> VmResult<&str> {
        Ok(&self.name)
    }
}

/// A compiler-owned method with all data resident.
pub struct LocalMethod {
    name: String,
    access_flags: u32,
    code: Box<[u8]>,
    max_locals: u32,
    max_stack_size: u32,
    signature: Arc<Signature>,
    holder: Arc<LocalType>,
}

impl LocalMethod {
    /// Create a fully-resolved method.
    pub fn new(
        name: impl Into<String>,
        access_flags: u32,
        code: impl Into<Box<[u8]>>,
        max_locals: u32,
        max_stack_size: u32,
        signature: Arc<Signature>,
        holder: Arc<LocalType>,
    ) -> Self {
        LocalMethod {
            name: name.into(),
            access_flags,
            code: code.into(),
            max_locals,
            max_stack_size,
            signature,
            holder,
        }
    }
}

impl fmt::Debug for LocalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalMethod")
            .field("name", &self.name)
            .field("access_flags", &self.access_flags)
            .field("code_len", &self.code.len())
            .finish()
    }
}

impl MethodRef for LocalMethod {
    fn name(&self) -> &str {
        &self.name
    }

    fn access_flags(&self) -> VmResult<u32> {
        Ok(self.access_flags)
    }

    fn code(&self) -> VmResult<&[u8]> {
        Ok(&self.code)
    }

    fn max_locals(&self) -> VmResult<u32> {
        Ok(self.max_locals)
    }

    fn max_stack_size(&self) -> VmResult<u32> {
        Ok(self.max_stack_size)
    }

    fn signature(&self) -> VmResult<Arc<Signature>> {
        Ok(self.signature.clone())
    }

    fn holder(&self) -> VmResult<Arc<dyn TypeRef>> {
        Ok(self.holder.clone())
    }

    // Local methods are fully resolved by construction.
    fn is_resolved(&self) -> bool {
        true
    }
}
