//! The handle→proxy directory
//!
//! One [`ProxyRegistry`] exists per VM connection, owned by whoever set
//! the connection up and passed down to the pipeline — there is no
//! ambient global table. It guarantees that repeated discovery of one
//! method handle yields the same proxy instance, which is what makes
//! handle equality and per-proxy caching line up.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ri::signature::Signature;
use crate::vm::context::VmContext;
use crate::vm::handle::{MethodHandle, TypeHandle};
use crate::vm::method::VmMethod;
use crate::vm::queries::VmQueries;
use crate::vm::types::VmType;

/// Directory of proxies minted for one VM connection.
pub struct ProxyRegistry {
    ctx: Arc<VmContext>,
    methods: RwLock<FxHashMap<MethodHandle, Arc<VmMethod>>>,
}

impl ProxyRegistry {
    /// Create a registry over the given query boundary.
    pub fn new(queries: Arc<dyn VmQueries>) -> Self {
        ProxyRegistry {
            ctx: Arc::new(VmContext::new(queries)),
            methods: RwLock::new(FxHashMap::default()),
        }
    }

    /// The shared resolution context behind this registry's proxies.
    pub fn context(&self) -> &Arc<VmContext> {
        &self.ctx
    }

    /// Get or create the proxy for a method handle.
    ///
    /// The name is only used when the proxy does not exist yet; a second
    /// discovery of the same handle returns the existing instance
    /// regardless of the name passed.
    pub fn method(&self, handle: MethodHandle, name: &str) -> Arc<VmMethod> {
        if let Some(existing) = self.methods.read().get(&handle) {
            return existing.clone();
        }
        self.methods
            .write()
            .entry(handle)
            .or_insert_with(|| Arc::new(VmMethod::new(self.ctx.clone(), handle, name)))
            .clone()
    }

    /// Get or create the proxy for a type handle.
    pub fn type_by_handle(&self, handle: TypeHandle) -> Arc<VmType> {
        self.ctx.resolve_type(handle)
    }

    /// Get or create the interned signature for a raw descriptor.
    pub fn signature(&self, descriptor: &str) -> Arc<Signature> {
        self.ctx.resolve_signature(descriptor)
    }

    /// Number of distinct method handles seen so far.
    pub fn method_count(&self) -> usize {
        self.methods.read().len()
    }
}

impl std::fmt::Debug for ProxyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyRegistry")
            .field("methods", &self.method_count())
            .field("ctx", &self.ctx)
            .finish()
    }
}
