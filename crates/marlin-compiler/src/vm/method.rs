//! Lazy-caching proxy for a VM-owned method
//!
//! The VM owns the authoritative method data; the compiler holds only a
//! handle and the method's name. Every other field crosses the
//! [`VmQueries`] boundary on first access and is cached for the proxy's
//! lifetime in a per-field `OnceCell`:
//!
//! - first access is serialized per field, so concurrent callers can
//!   never observe two different cached values;
//! - a successful fetch is permanent — the VM-side data is immutable for
//!   the fields modeled here, so nothing is ever invalidated;
//! - a failed fetch leaves the cell unset and a later call retries.
//!
//! No lock is held across the boundary call other than the cell's own
//! initialization guard for that one field.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::VmResult;
use crate::ri::method::{MethodRef, TypeRef};
use crate::ri::signature::Signature;
use crate::vm::context::VmContext;
use crate::vm::handle::MethodHandle;
use crate::vm::types::VmType;

/// A VM-owned method, seen through its handle.
///
/// Obtained from [`crate::vm::ProxyRegistry`], which guarantees one
/// instance per handle. Identity and equality are the handle, never the
/// cached content.
pub struct VmMethod {
    handle: MethodHandle,
    name: String,
    ctx: Arc<VmContext>,

    // Cached values, each fetched at most once
    access_flags: OnceCell<u32>,
    code: OnceCell<Box<[u8]>>,
    max_locals: OnceCell<u32>,
    max_stack_size: OnceCell<u32>,
    signature: OnceCell<Arc<Signature>>,
    holder: OnceCell<Arc<VmType>>,
}

impl VmMethod {
    /// Create a proxy for the method named by `handle`.
    ///
    /// The name is supplied by whoever discovered the handle (it is
    /// already resident on the compiler side); nothing is fetched here.
    pub fn new(ctx: Arc<VmContext>, handle: MethodHandle, name: impl Into<String>) -> Self {
        VmMethod {
            handle,
            name: name.into(),
            ctx,
            access_flags: OnceCell::new(),
            code: OnceCell::new(),
            max_locals: OnceCell::new(),
            max_stack_size: OnceCell::new(),
            signature: OnceCell::new(),
            holder: OnceCell::new(),
        }
    }

    /// The handle this proxy stands for.
    pub fn handle(&self) -> MethodHandle {
        self.handle
    }

    /// Method name, resident since construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Access-flag bitmask, fetched once then cached.
    pub fn access_flags(&self) -> VmResult<u32> {
        self.access_flags
            .get_or_try_init(|| self.ctx.queries().method_access_flags(self.handle))
            .copied()
    }

    /// Raw bytecode, fetched once then cached.
    ///
    /// An empty answer is cached like any other: a second call returns
    /// the empty slice without touching the VM again.
    pub fn code(&self) -> VmResult<&[u8]> {
        self.code
            .get_or_try_init(|| {
                self.ctx
                    .queries()
                    .method_code(self.handle)
                    .map(Vec::into_boxed_slice)
            })
            .map(|b| &b[..])
    }

    /// Number of local variable slots, fetched once then cached.
    pub fn max_locals(&self) -> VmResult<u32> {
        self.max_locals
            .get_or_try_init(|| self.ctx.queries().method_max_locals(self.handle))
            .copied()
    }

    /// Maximum operand stack depth, fetched once then cached.
    pub fn max_stack_size(&self) -> VmResult<u32> {
        self.max_stack_size
            .get_or_try_init(|| self.ctx.queries().method_max_stack_size(self.handle))
            .copied()
    }

    /// The method's signature.
    ///
    /// First call fetches the raw descriptor and resolves it through the
    /// context's interning table; the resulting `Arc` identity is cached.
    pub fn signature(&self) -> VmResult<Arc<Signature>> {
        self.signature
            .get_or_try_init(|| {
                let descriptor = self.ctx.queries().method_signature(self.handle)?;
                Ok(self.ctx.resolve_signature(&descriptor))
            })
            .cloned()
    }

    /// The declaring type.
    ///
    /// First call fetches the declaring type's handle and resolves it
    /// through the context, so two methods of one type share its proxy.
    pub fn holder(&self) -> VmResult<Arc<VmType>> {
        self.holder
            .get_or_try_init(|| {
                let handle = self.ctx.queries().method_holder(self.handle)?;
                Ok(self.ctx.resolve_type(handle))
            })
            .cloned()
    }
}

impl MethodRef for VmMethod {
    fn name(&self) -> &str {
        VmMethod::name(self)
    }

    fn access_flags(&self) -> VmResult<u32> {
        VmMethod::access_flags(self)
    }

    fn code(&self) -> VmResult<&[u8]> {
        VmMethod::code(self)
    }

    fn max_locals(&self) -> VmResult<u32> {
        VmMethod::max_locals(self)
    }

    fn max_stack_size(&self) -> VmResult<u32> {
        VmMethod::max_stack_size(self)
    }

    fn signature(&self) -> VmResult<Arc<Signature>> {
        VmMethod::signature(self)
    }

    fn holder(&self) -> VmResult<Arc<dyn TypeRef>> {
        VmMethod::holder(self).map(|t| t as Arc<dyn TypeRef>)
    }
}

// Identity is the handle, never the cached content.
impl PartialEq for VmMethod {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for VmMethod {}

impl Hash for VmMethod {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
    }
}

impl fmt::Debug for VmMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VmMethod")
            .field("handle", &self.handle)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for VmMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VmMethod<{}>", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VmError;
    use crate::vm::handle::TypeHandle;
    use crate::vm::queries::VmQueries;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Test double: answers fixed values and counts every selector call.
    struct CountingVm {
        access_flags: u32,
        code: Vec<u8>,
        max_locals: u32,
        max_stack_size: u32,
        descriptor: &'static str,
        holder: TypeHandle,
        fail_next: AtomicBool,
        calls: [AtomicUsize; 7],
    }

    const Q_FLAGS: usize = 0;
    const Q_CODE: usize = 1;
    const Q_LOCALS: usize = 2;
    const Q_STACK: usize = 3;
    const Q_SIG: usize = 4;
    const Q_HOLDER: usize = 5;
    const Q_TYPE_NAME: usize = 6;

    impl CountingVm {
        fn new() -> Self {
            CountingVm {
                access_flags: 0x21,
                code: vec![0x2a, 0xb7, 0x00, 0x01, 0xb1],
                max_locals: 3,
                max_stack_size: 2,
                descriptor: "(IJ)V",
                holder: TypeHandle::new(0x100),
                fail_next: AtomicBool::new(false),
                calls: Default::default(),
            }
        }

        fn count(&self, selector: usize) -> usize {
            self.calls[selector].load(Ordering::SeqCst)
        }

        fn total_calls(&self) -> usize {
            self.calls.iter().map(|c| c.load(Ordering::SeqCst)).sum()
        }

        fn check(&self, selector: usize) -> VmResult<()> {
            self.calls[selector].fetch_add(1, Ordering::SeqCst);
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(VmError::Unavailable("injected".to_string()));
            }
            Ok(())
        }
    }

    impl VmQueries for CountingVm {
        fn method_access_flags(&self, _: MethodHandle) -> VmResult<u32> {
            self.check(Q_FLAGS)?;
            Ok(self.access_flags)
        }
        fn method_code(&self, _: MethodHandle) -> VmResult<Vec<u8>> {
            self.check(Q_CODE)?;
            Ok(self.code.clone())
        }
        fn method_max_locals(&self, _: MethodHandle) -> VmResult<u32> {
            self.check(Q_LOCALS)?;
            Ok(self.max_locals)
        }
        fn method_max_stack_size(&self, _: MethodHandle) -> VmResult<u32> {
            self.check(Q_STACK)?;
            Ok(self.max_stack_size)
        }
        fn method_signature(&self, _: MethodHandle) -> VmResult<String> {
            self.check(Q_SIG)?;
            Ok(self.descriptor.to_string())
        }
        fn method_holder(&self, _: MethodHandle) -> VmResult<TypeHandle> {
            self.check(Q_HOLDER)?;
            Ok(self.holder)
        }
        fn type_name(&self, _: TypeHandle) -> VmResult<String> {
            self.check(Q_TYPE_NAME)?;
            Ok("pkg/Holder".to_string())
        }
    }

    fn setup() -> (Arc<CountingVm>, VmMethod) {
        let vm = Arc::new(CountingVm::new());
        let ctx = Arc::new(VmContext::new(vm.clone()));
        let method = VmMethod::new(ctx, MethodHandle::new(0x2a), "run");
        (vm, method)
    }

    #[test]
    fn test_name_never_queries() {
        let (vm, method) = setup();
        assert_eq!(method.name(), "run");
        assert_eq!(method.name(), "run");
        assert_eq!(vm.total_calls(), 0);
    }

    #[test]
    fn test_each_field_fetched_at_most_once() {
        let (vm, method) = setup();
        for _ in 0..3 {
            assert_eq!(method.access_flags().unwrap(), 0x21);
            assert_eq!(method.code().unwrap(), &[0x2a, 0xb7, 0x00, 0x01, 0xb1]);
            assert_eq!(method.max_locals().unwrap(), 3);
            assert_eq!(method.max_stack_size().unwrap(), 2);
        }
        assert_eq!(vm.count(Q_FLAGS), 1);
        assert_eq!(vm.count(Q_CODE), 1);
        assert_eq!(vm.count(Q_LOCALS), 1);
        assert_eq!(vm.count(Q_STACK), 1);
    }

    #[test]
    fn test_empty_code_is_cached() {
        let vm = Arc::new(CountingVm {
            code: Vec::new(),
            ..CountingVm::new()
        });
        let ctx = Arc::new(VmContext::new(vm.clone()));
        let method = VmMethod::new(ctx, MethodHandle::new(1), "native_thing");
        assert_eq!(method.code().unwrap(), &[] as &[u8]);
        assert_eq!(method.code().unwrap(), &[] as &[u8]);
        assert_eq!(vm.count(Q_CODE), 1);
    }

    #[test]
    fn test_zero_values_are_cached() {
        let vm = Arc::new(CountingVm {
            access_flags: 0,
            max_locals: 0,
            max_stack_size: 0,
            ..CountingVm::new()
        });
        let ctx = Arc::new(VmContext::new(vm.clone()));
        let method = VmMethod::new(ctx, MethodHandle::new(2), "empty");
        assert_eq!(method.access_flags().unwrap(), 0);
        assert_eq!(method.max_locals().unwrap(), 0);
        assert_eq!(method.max_stack_size().unwrap(), 0);
        assert_eq!(method.access_flags().unwrap(), 0);
        assert_eq!(method.max_locals().unwrap(), 0);
        assert_eq!(method.max_stack_size().unwrap(), 0);
        assert_eq!(vm.count(Q_FLAGS), 1);
        assert_eq!(vm.count(Q_LOCALS), 1);
        assert_eq!(vm.count(Q_STACK), 1);
    }

    #[test]
    fn test_signature_resolved_once_with_stable_identity() {
        let (vm, method) = setup();
        let first = method.signature().unwrap();
        let second = method.signature().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.descriptor(), "(IJ)V");
        assert_eq!(first.argument_count().unwrap(), 2);
        assert_eq!(vm.count(Q_SIG), 1);
    }

    #[test]
    fn test_holder_resolved_once_with_stable_identity() {
        let (vm, method) = setup();
        let first = method.holder().unwrap();
        let second = method.holder().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.handle(), TypeHandle::new(0x100));
        assert_eq!(vm.count(Q_HOLDER), 1);
        // The type's own name is still unfetched
        assert_eq!(vm.count(Q_TYPE_NAME), 0);
        assert_eq!(first.name().unwrap(), "pkg/Holder");
        assert_eq!(vm.count(Q_TYPE_NAME), 1);
    }

    #[test]
    fn test_failed_fetch_leaves_field_unset() {
        let (vm, method) = setup();
        vm.fail_next.store(true, Ordering::SeqCst);
        assert!(matches!(
            method.access_flags(),
            Err(VmError::Unavailable(_))
        ));
        // Retry succeeds and caches
        assert_eq!(method.access_flags().unwrap(), 0x21);
        assert_eq!(method.access_flags().unwrap(), 0x21);
        assert_eq!(vm.count(Q_FLAGS), 2);
    }

    #[test]
    fn test_failed_holder_fetch_does_not_intern() {
        let (vm, method) = setup();
        vm.fail_next.store(true, Ordering::SeqCst);
        assert!(method.holder().is_err());
        assert_eq!(method.ctx.type_count(), 0);
        assert!(method.holder().is_ok());
        assert_eq!(method.ctx.type_count(), 1);
    }

    #[test]
    fn test_concurrent_first_access_is_consistent() {
        let (vm, method) = setup();
        let method = Arc::new(method);
        let mut handles = Vec::new();
        for _ in 0..2 {
            let m = method.clone();
            handles.push(std::thread::spawn(move || m.access_flags().unwrap()));
        }
        for h in handles {
            assert_eq!(h.join().unwrap(), 0x21);
        }
        // The cell serializes first access, so exactly one query landed
        assert_eq!(vm.count(Q_FLAGS), 1);
        assert_eq!(method.access_flags().unwrap(), 0x21);
    }

    #[test]
    fn test_extension_points_never_query() {
        let (vm, method) = setup();
        assert!(method.exception_handlers().is_empty());
        assert!(!method.has_balanced_monitors());
        assert!(!method.is_class_initializer());
        assert!(!method.is_constructor());
        assert!(!method.is_leaf_method());
        assert!(!method.is_overridden());
        assert!(!method.is_resolved());
        assert!(!method.can_be_statically_bound());
        assert!(method.jni_symbol().is_none());
        assert!(method.liveness_at(0).is_none());
        assert!(method.profile().is_none());
        assert_eq!(vm.total_calls(), 0);
    }

    #[test]
    fn test_identity_is_by_handle() {
        let vm = Arc::new(CountingVm::new());
        let ctx = Arc::new(VmContext::new(vm));
        let a = VmMethod::new(ctx.clone(), MethodHandle::new(7), "a");
        let b = VmMethod::new(ctx.clone(), MethodHandle::new(7), "b");
        let c = VmMethod::new(ctx, MethodHandle::new(8), "a");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let (_, method) = setup();
        assert_eq!(method.to_string(), "VmMethod<run>");
    }
}
