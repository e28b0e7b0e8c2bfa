//! Method signatures parsed from textual descriptors
//!
//! A [`Signature`] wraps the raw descriptor string the VM reports, e.g.
//! `(I[Ljava/lang/String;)V`, and parses it on first use. Parsing follows
//! the same lazy-once discipline as the VM proxies: one parse per
//! instance, a failed parse leaves the cell unset, and the raw descriptor
//! stays available either way.

use std::fmt;

use once_cell::sync::OnceCell;

use crate::error::{VmError, VmResult};

/// Value kind of an argument or return position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `Z`
    Boolean,
    /// `B`
    Byte,
    /// `C`
    Char,
    /// `S`
    Short,
    /// `I`
    Int,
    /// `J`
    Long,
    /// `F`
    Float,
    /// `D`
    Double,
    /// `L…;` or any array
    Object,
    /// `V` (return position only)
    Void,
}

impl Kind {
    /// Stack/local slots the kind occupies. Wide kinds take two.
    pub fn slots(self) -> u32 {
        match self {
            Kind::Long | Kind::Double => 2,
            Kind::Void => 0,
            _ => 1,
        }
    }
}

#[derive(Debug)]
struct Parsed {
    arguments: Vec<Kind>,
    return_kind: Kind,
}

/// A method signature, parsed lazily from its descriptor.
pub struct Signature {
    descriptor: String,
    parsed: OnceCell<Parsed>,
}

impl Signature {
    /// Wrap a raw descriptor. No validation happens here; the first
    /// accessor that needs structure triggers the parse.
    pub fn new(descriptor: impl Into<String>) -> Self {
        Signature {
            descriptor: descriptor.into(),
            parsed: OnceCell::new(),
        }
    }

    /// The raw descriptor string.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    fn parsed(&self) -> VmResult<&Parsed> {
        self.parsed.get_or_try_init(|| parse(&self.descriptor))
    }

    /// Number of declared arguments (receiver excluded).
    pub fn argument_count(&self) -> VmResult<usize> {
        Ok(self.parsed()?.arguments.len())
    }

    /// Kinds of the declared arguments, in order.
    pub fn argument_kinds(&self) -> VmResult<&[Kind]> {
        Ok(&self.parsed()?.arguments)
    }

    /// Kind of the return position.
    pub fn return_kind(&self) -> VmResult<Kind> {
        Ok(self.parsed()?.return_kind)
    }

    /// Total argument slots, counting wide kinds twice.
    ///
    /// `with_receiver` adds one slot for the `this` reference of an
    /// instance method.
    pub fn argument_slots(&self, with_receiver: bool) -> VmResult<u32> {
        let base: u32 = self.parsed()?.arguments.iter().map(|k| k.slots()).sum();
        Ok(base + u32::from(with_receiver))
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor
    }
}

impl Eq for Signature {}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptor)
    }
}

fn malformed(descriptor: &str) -> VmError {
    VmError::MalformedDescriptor(descriptor.to_string())
}

fn parse(descriptor: &str) -> Result<Parsed, VmError> {
    let bytes = descriptor.as_bytes();
    if bytes.first() != Some(&b'(') {
        return Err(malformed(descriptor));
    }
    let mut pos = 1;
    let mut arguments = Vec::new();
    loop {
        match bytes.get(pos) {
            None => return Err(malformed(descriptor)),
            Some(b')') => {
                pos += 1;
                break;
            }
            Some(_) => arguments.push(parse_field(descriptor, bytes, &mut pos)?),
        }
    }
    let return_kind = if bytes.get(pos) == Some(&b'V') {
        pos += 1;
        Kind::Void
    } else {
        parse_field(descriptor, bytes, &mut pos)?
    };
    if pos != bytes.len() {
        return Err(malformed(descriptor));
    }
    Ok(Parsed {
        arguments,
        return_kind,
    })
}

fn parse_field(descriptor: &str, bytes: &[u8], pos: &mut usize) -> Result<Kind, VmError> {
    match bytes.get(*pos) {
        Some(b'Z') => {
            *pos += 1;
            Ok(Kind::Boolean)
        }
        Some(b'B') => {
            *pos += 1;
            Ok(Kind::Byte)
        }
        Some(b'C') => {
            *pos += 1;
            Ok(Kind::Char)
        }
        Some(b'S') => {
            *pos += 1;
            Ok(Kind::Short)
        }
        Some(b'I') => {
            *pos += 1;
            Ok(Kind::Int)
        }
        Some(b'J') => {
            *pos += 1;
            Ok(Kind::Long)
        }
        Some(b'F') => {
            *pos += 1;
            Ok(Kind::Float)
        }
        Some(b'D') => {
            *pos += 1;
            Ok(Kind::Double)
        }
        Some(b'L') => {
            // Class reference: consume up to and including ';'
            let end = bytes[*pos..]
                .iter()
                .position(|&b| b == b';')
                .ok_or_else(|| malformed(descriptor))?;
            if end == 1 {
                // "L;" names no class
                return Err(malformed(descriptor));
            }
            *pos += end + 1;
            Ok(Kind::Object)
        }
        Some(b'[') => {
            // Array: skip the component type, the whole thing is a reference
            *pos += 1;
            parse_field(descriptor, bytes, pos)?;
            Ok(Kind::Object)
        }
        _ => Err(malformed(descriptor)),
    }
}
