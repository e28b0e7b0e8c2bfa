//! The query boundary the VM implements
//!
//! One selector per proxy field. The contract every implementation must
//! honor: calls are synchronous, side-effect-free as far as the compiler
//! can observe, and idempotent — the same handle and selector return the
//! same answer for as long as the handle is valid. Nothing here assumes a
//! transport; an in-process VM and a cross-process shim both fit.
//!
//! Proxies call each selector at most once per instance on the success
//! path. A failed call propagates to the accessor that triggered it and
//! may be retried by a later call.

use crate::error::VmResult;
use crate::vm::handle::{MethodHandle, TypeHandle};

/// Field queries answered by the VM.
pub trait VmQueries: Send + Sync {
    /// Access-flag bitmask of a method (see [`crate::ri::flags`]).
    fn method_access_flags(&self, method: MethodHandle) -> VmResult<u32>;

    /// Raw bytecode of a method. Empty is a legitimate answer for
    /// methods that have none.
    fn method_code(&self, method: MethodHandle) -> VmResult<Vec<u8>>;

    /// Number of local variable slots of a method.
    fn method_max_locals(&self, method: MethodHandle) -> VmResult<u32>;

    /// Maximum operand stack depth of a method.
    fn method_max_stack_size(&self, method: MethodHandle) -> VmResult<u32>;

    /// Raw signature descriptor of a method, e.g. `(I)V`.
    fn method_signature(&self, method: MethodHandle) -> VmResult<String>;

    /// Handle of the type declaring a method.
    fn method_holder(&self, method: MethodHandle) -> VmResult<TypeHandle>;

    /// Fully qualified name of a type.
    fn type_name(&self, ty: TypeHandle) -> VmResult<String>;
}
