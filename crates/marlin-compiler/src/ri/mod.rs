//! Runtime interface: the polymorphic method/type capability set
//!
//! The compiler pipeline programs against [`MethodRef`] and [`TypeRef`]
//! without knowing whether a method is backed by the live VM (fetched
//! lazily over the query boundary, see `crate::vm`) or resolved entirely
//! on the compiler side (see [`local`]).

/// Access-flag bitmask constants and predicates
pub mod flags;

/// Fully-local method/type representations (no VM round trip)
pub mod local;

/// The `MethodRef` / `TypeRef` capability traits
pub mod method;

/// Method signatures parsed from textual descriptors
pub mod signature;

pub use method::{ExceptionHandler, LocalLiveness, MethodProfile, MethodRef, TypeRef};
pub use signature::{Kind, Signature};
