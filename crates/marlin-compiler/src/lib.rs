//! Marlin Compiler Runtime Interface
//!
//! This crate provides the compiler-side view of entities owned by the
//! Marlin VM:
//! - **Runtime interface**: The polymorphic method/type capability traits
//!   that the rest of the compiler programs against (`ri` module)
//! - **VM proxies**: Lazy-caching proxies for VM-owned methods, types, and
//!   signatures, keyed by opaque handles (`vm` module)
//!
//! The VM itself lives on the other side of the [`vm::VmQueries`] boundary;
//! nothing in this crate assumes a particular transport behind it.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use marlin_compiler::ri::MethodRef;
//! use marlin_compiler::vm::{MethodHandle, ProxyRegistry};
//!
//! let registry = ProxyRegistry::new(Arc::new(vm_queries));
//! let method = registry.method(MethodHandle::new(42), "fibonacci");
//!
//! // First call crosses the boundary; later calls hit the cache.
//! let flags = method.access_flags()?;
//! let code = method.code()?;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// ============================================================================
// Core Modules
// ============================================================================

/// Error types shared across the runtime interface
pub mod error;

/// Runtime interface traits: the polymorphic method/type capability set
pub mod ri;

/// VM-backed proxies: lazy-caching views of VM-owned entities
pub mod vm;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use error::{VmError, VmResult};
pub use ri::{MethodRef, TypeRef};
pub use vm::{MethodHandle, ProxyRegistry, Signature, TypeHandle, VmMethod, VmQueries, VmType};
