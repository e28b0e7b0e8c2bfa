//! VM-backed proxies for entities owned by the virtual machine
//!
//! The VM mints opaque handles for the methods and types it owns; the
//! compiler sees those entities only through lazy-caching proxies built
//! here. Each proxy field is fetched over the [`VmQueries`] boundary at
//! most once per instance and cached for the proxy's lifetime.
//!
//! Construction flows through [`ProxyRegistry`] so repeated discovery of
//! one handle always yields the same proxy instance.

/// Shared resolution context: query handle + type/signature interning
pub mod context;

/// Opaque handle newtypes minted by the VM
pub mod handle;

/// The lazy-caching method proxy
pub mod method;

/// The handle→proxy directory
pub mod registry;

/// The query boundary trait the VM implements
pub mod queries;

/// The lazy-caching type proxy
pub mod types;

pub use context::VmContext;
pub use handle::{MethodHandle, TypeHandle};
pub use method::VmMethod;
pub use queries::VmQueries;
pub use registry::ProxyRegistry;
pub use types::VmType;

pub use crate::ri::Signature;
