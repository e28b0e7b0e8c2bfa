//! Opaque handle newtypes
//!
//! Handles are minted by the VM and carry no structure the compiler may
//! inspect; they exist only to key queries and define proxy identity.
//! A handle stays valid as long as the VM-side entity it names is alive —
//! the proxies never manage that lifetime.

use std::fmt;

/// Handle naming a VM-owned method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodHandle(u64);

impl MethodHandle {
    /// Wrap a raw handle value received from the VM.
    pub const fn new(raw: u64) -> Self {
        MethodHandle(raw)
    }

    /// The raw handle value, for passing back across the boundary.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MethodHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "method#{:x}", self.0)
    }
}

/// Handle naming a VM-owned type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeHandle(u64);

impl TypeHandle {
    /// Wrap a raw handle value received from the VM.
    pub const fn new(raw: u64) -> Self {
        TypeHandle(raw)
    }

    /// The raw handle value, for passing back across the boundary.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{:x}", self.0)
    }
}
