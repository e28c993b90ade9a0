use thiserror::Error;

use crate::handle::{ObjectId, ObjectKind};
use crate::wire::StructureType;

/// First malformation observed by a [`crate::Decoder`] or [`crate::Replacer`].
///
/// Faults are sticky: once one is recorded the stream is untrusted and every later read yields
/// zeroed values without consuming input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeFault {
    #[error("stream truncated at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("invalid presence marker {found:#x} at offset {offset}")]
    InvalidMarker { offset: usize, found: u32 },

    #[error("invalid boolean {found:#x} at offset {offset}")]
    InvalidBool { offset: usize, found: u32 },

    #[error("required pointer marked absent at offset {offset}")]
    NullPointer { offset: usize },

    #[error("array size {size} exceeds bound {max}")]
    ArraySizeExceeded { size: u64, max: u64 },

    #[error("expected {expected}, found {found}")]
    UnexpectedStructureType {
        expected: StructureType,
        found: StructureType,
    },

    #[error("{found} is not a recognized extension of {base}")]
    UnknownExtension {
        base: &'static str,
        found: StructureType,
    },

    #[error("unknown discriminant {found} for union {union}")]
    UnknownUnionTag { union: &'static str, found: u32 },

    #[error("extension chain of {base} exceeds {max} links")]
    ChainTooLong { base: &'static str, max: usize },

    #[error("temp arena exhausted allocating {size} bytes ({remaining} remaining)")]
    ArenaExhausted { size: usize, remaining: usize },

    #[error("unknown {kind} object {id}")]
    UnknownObject { kind: ObjectKind, id: ObjectId },

    #[error("decoder saved-state stack overflow")]
    SavedStateOverflow,

    #[error("decoder state popped without a matching push")]
    SavedStateUnderflow,
}

/// Failure of an [`crate::Encoder`] writing into a bounded reply stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeFault {
    #[error("reply stream overflow: {needed} bytes needed, capacity {capacity}")]
    ReplyOverflow { needed: usize, capacity: usize },

    #[error("seek to {pos} outside stream of {len} bytes")]
    SeekOutOfRange { pos: usize, len: usize },
}
