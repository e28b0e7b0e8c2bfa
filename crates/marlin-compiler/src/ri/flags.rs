//! Access-flag bitmask constants and predicates
//!
//! The vocabulary for the `access_flags()` bitmask on [`crate::ri::MethodRef`].
//! Flag values match the class-file encoding the VM reports, so the
//! bitmask crosses the boundary untranslated.

/// Declared public
pub const ACC_PUBLIC: u32 = 0x0001;
/// Declared private
pub const ACC_PRIVATE: u32 = 0x0002;
/// Declared protected
pub const ACC_PROTECTED: u32 = 0x0004;
/// Declared static
pub const ACC_STATIC: u32 = 0x0008;
/// Declared final
pub const ACC_FINAL: u32 = 0x0010;
/// Declared synchronized; invocation wraps a monitor
pub const ACC_SYNCHRONIZED: u32 = 0x0020;
/// Implemented in native code; has no bytecode
pub const ACC_NATIVE: u32 = 0x0100;
/// Declared abstract; has no bytecode
pub const ACC_ABSTRACT: u32 = 0x0400;

/// Whether the flags mark a static method
pub fn is_static(flags: u32) -> bool {
    flags & ACC_STATIC != 0
}

/// Whether the flags mark a final method
pub fn is_final(flags: u32) -> bool {
    flags & ACC_FINAL != 0
}

/// Whether the flags mark a synchronized method
pub fn is_synchronized(flags: u32) -> bool {
    flags & ACC_SYNCHRONIZED != 0
}

/// Whether the flags mark a native method
pub fn is_native(flags: u32) -> bool {
    flags & ACC_NATIVE != 0
}

/// Whether the flags mark an abstract method
pub fn is_abstract(flags: u32) -> bool {
    flags & ACC_ABSTRACT != 0
}

/// Whether the method can have bytecode at all (neither native nor abstract)
pub fn has_code(flags: u32) -> bool {
    flags & (ACC_NATIVE | ACC_ABSTRACT) == 0
}
