//! Shared resolution context for VM-backed proxies
//!
//! Holds the query handle plus the interning tables for nested entities:
//! one [`VmType`] per type handle, one [`Signature`] per descriptor.
//! Method proxies resolve their declaring type and signature through here
//! so that repeated resolution yields the same `Arc` instance.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ri::signature::Signature;
use crate::vm::handle::TypeHandle;
use crate::vm::queries::VmQueries;
use crate::vm::types::VmType;

/// Shared state behind every proxy minted for one VM connection.
pub struct VmContext {
    queries: Arc<dyn VmQueries>,
    types: RwLock<FxHashMap<TypeHandle, Arc<VmType>>>,
    signatures: RwLock<FxHashMap<String, Arc<Signature>>>,
}

impl VmContext {
    /// Create a context over the given query boundary.
    pub fn new(queries: Arc<dyn VmQueries>) -> Self {
        VmContext {
            queries,
            types: RwLock::new(FxHashMap::default()),
            signatures: RwLock::new(FxHashMap::default()),
        }
    }

    /// The query boundary this context resolves through.
    pub fn queries(&self) -> &Arc<dyn VmQueries> {
        &self.queries
    }

    /// Get or create the proxy for a type handle.
    ///
    /// No boundary call happens here; the proxy fetches its own fields
    /// lazily. Repeated calls with one handle return the same `Arc`.
    pub fn resolve_type(&self, handle: TypeHandle) -> Arc<VmType> {
        if let Some(existing) = self.types.read().get(&handle) {
            return existing.clone();
        }
        self.types
            .write()
            .entry(handle)
            .or_insert_with(|| Arc::new(VmType::new(self.queries.clone(), handle)))
            .clone()
    }

    /// Get or create the interned signature for a raw descriptor.
    ///
    /// Parsing stays lazy inside [`Signature`]; interning only keys on
    /// the descriptor text.
    pub fn resolve_signature(&self, descriptor: &str) -> Arc<Signature> {
        if let Some(existing) = self.signatures.read().get(descriptor) {
            return existing.clone();
        }
        self.signatures
            .write()
            .entry(descriptor.to_string())
            .or_insert_with(|| Arc::new(Signature::new(descriptor)))
            .clone()
    }

    /// Number of distinct type handles resolved so far.
    pub fn type_count(&self) -> usize {
        self.types.read().len()
    }

    /// Number of distinct signatures interned so far.
    pub fn signature_count(&self) -> usize {
        self.signatures.read().len()
    }
}

impl std::fmt::Debug for VmContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VmContext")
            .field("types", &self.type_count())
            .field("signatures", &self.signature_count())
            .finish()
    }
}
