//! Method and type capability traits
//!
//! [`MethodRef`] is the fixed query surface every method representation
//! exposes to the compiler, whether the data lives in the VM or in a
//! compiler-side structure. Accessors that may cross the VM boundary
//! return [`VmResult`]; the extension points are default methods that
//! return well-defined placeholders and never fail.

use std::fmt;
use std::sync::Arc;

use crate::error::VmResult;
use crate::ri::signature::Signature;

/// One entry of a method's exception handler table.
///
/// Covers bytecode indices `start_bci..end_bci`; control transfers to
/// `handler_bci` when a matching exception is raised in that range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionHandler {
    /// First covered bytecode index (inclusive)
    pub start_bci: u32,
    /// First bytecode index past the covered range (exclusive)
    pub end_bci: u32,
    /// Bytecode index of the handler entry point
    pub handler_bci: u32,
    /// Constant-pool index of the caught type; `None` means catch-all
    pub catch_type_index: Option<u32>,
}

/// Profiling data collected for a method by the VM.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodProfile {
    /// Times the method has been invoked
    pub invocation_count: u64,
    /// Times compiled code for the method was deoptimized
    pub deopt_count: u64,
}

/// Which local variable slots hold live values at a bytecode index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalLiveness {
    /// One flag per local slot
    pub live: Box<[bool]>,
}

impl LocalLiveness {
    /// Whether the local slot at `index` is live. Out-of-range slots are dead.
    pub fn is_live(&self, index: usize) -> bool {
        self.live.get(index).copied().unwrap_or(false)
    }
}

/// A type as seen by the compiler.
///
/// Minimal contract: only what the method surface needs for its declaring
/// type. Identity of VM-backed implementations is handle equality, so two
/// `Arc<dyn TypeRef>` resolved from the same handle share one allocation.
pub trait TypeRef: fmt::Debug + Send + Sync {
    /// Fully qualified name of the type.
    ///
    /// May cross the VM boundary on first call for VM-backed types.
    fn name(&self) -> VmResult<&str>;
}

/// A method as seen by the compiler.
///
/// Required accessors are deterministic once fetched: for VM-backed
/// implementations each issues at most one boundary query per proxy
/// instance, and repeated calls return the cached value.
///
/// The extension points below are not wired to VM queries yet; they
/// return documented placeholders so callers can rely on the full
/// surface unconditionally. Wiring them up means adding the matching
/// selectors to `crate::vm::VmQueries` and overriding the defaults.
pub trait MethodRef: fmt::Debug + Send + Sync {
    /// Method name (always resident; never a boundary call).
    fn name(&self) -> &str;

    /// Access-flag bitmask (see [`crate::ri::flags`]).
    fn access_flags(&self) -> VmResult<u32>;

    /// Raw bytecode. An empty slice is a legitimate answer for methods
    /// with no bytecode (abstract, native).
    fn code(&self) -> VmResult<&[u8]>;

    /// Number of local variable slots, receiver and arguments included.
    fn max_locals(&self) -> VmResult<u32>;

    /// Maximum operand stack depth.
    fn max_stack_size(&self) -> VmResult<u32>;

    /// The method's signature.
    fn signature(&self) -> VmResult<Arc<Signature>>;

    /// The type declaring this method.
    fn holder(&self) -> VmResult<Arc<dyn TypeRef>>;

    // ========================================================================
    // Extension points (placeholder defaults, no boundary calls)
    // ========================================================================

    /// Exception handler table. Placeholder: no handlers.
    fn exception_handlers(&self) -> &[ExceptionHandler] {
        &[]
    }

    /// Whether every monitorenter has a matching monitorexit on all paths.
    /// Placeholder: `false`.
    fn has_balanced_monitors(&self) -> bool {
        false
    }

    /// Whether this is a class initializer. Placeholder: `false`.
    fn is_class_initializer(&self) -> bool {
        false
    }

    /// Whether this is an instance constructor. Placeholder: `false`.
    fn is_constructor(&self) -> bool {
        false
    }

    /// Whether no other method can override this one. Placeholder: `false`.
    fn is_leaf_method(&self) -> bool {
        false
    }

    /// Whether any loaded subtype overrides this method. Placeholder: `false`.
    fn is_overridden(&self) -> bool {
        false
    }

    /// Whether the method is fully resolved and linked. Placeholder: `false`.
    fn is_resolved(&self) -> bool {
        false
    }

    /// Whether a call site may bind to this method statically.
    /// Placeholder: `false` (conservative for devirtualization).
    fn can_be_statically_bound(&self) -> bool {
        false
    }

    /// Mangled native symbol for native methods. Placeholder: `None`.
    fn jni_symbol(&self) -> Option<&str> {
        None
    }

    /// Local-variable liveness at a bytecode index. Placeholder: `None`.
    fn liveness_at(&self, bci: u32) -> Option<LocalLiveness> {
        let _ = bci;
        None
    }

    /// Profiling data collected by the VM. Placeholder: `None`.
    fn profile(&self) -> Option<Arc<MethodProfile>> {
        None
    }
}
