//! Error types for the compiler runtime interface
//!
//! Accessors on VM-backed proxies surface two failure sources: the VM
//! boundary itself (invalid handle, VM gone, transport broke) and local
//! decoding of data the VM handed back (malformed method descriptors).
//! A failed fetch never poisons a proxy's cache — the field stays unset
//! and a later call retries.

/// Result type for runtime-interface calls
pub type VmResult<T> = Result<T, VmError>;

/// Errors surfaced by VM-backed proxy accessors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VmError {
    /// The handle does not name a live entity in the VM
    #[error("invalid VM handle: {0:#x}")]
    InvalidHandle(u64),

    /// The VM could not answer (shutting down, entity unloaded)
    #[error("VM unavailable: {0}")]
    Unavailable(String),

    /// The transport behind the query interface failed
    #[error("VM transport error: {0}")]
    Transport(String),

    /// A method descriptor fetched from the VM failed to parse
    #[error("malformed method descriptor: {0}")]
    MalformedDescriptor(String),
}
