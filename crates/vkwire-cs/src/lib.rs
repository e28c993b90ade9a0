//! Command-stream codec for a remoted graphics API.
//!
//! A client serializes API calls into a little-endian byte stream; the renderer decodes them
//! with a [`Decoder`] that treats every byte as hostile. This crate holds the schema-agnostic
//! machinery: scalar primitives, presence markers, arrays, extension chains, handle resolution
//! and the per-command scratch budget. Schema structures implement [`WireCodec`] (and
//! [`Extensible`] when they carry a chain).

mod arena;
mod chain;
mod codec;
mod decoder;
mod encoder;
mod error;
mod handle;
mod options;
mod wire;

pub use crate::arena::{TempArena, DEFAULT_TEMP_ARENA_CAPACITY};
pub use crate::chain::{Chain, Extension, Link, NoExtensions};
pub use crate::codec::{Extensible, WireCodec};
pub use crate::decoder::{Decoder, MAX_SAVED_STATES};
pub use crate::encoder::Encoder;
pub use crate::error::{DecodeFault, EncodeFault};
pub use crate::handle::{
    kind, EmptyObjectTable, Handle, HandleKind, HandleState, LocalRef, ObjectId, ObjectKind,
    ObjectRegistry, ObjectTable, Replacer,
};
pub use crate::options::{CsOptions, DEFAULT_MAX_CHAIN_LINKS, DEFAULT_REPLY_CAPACITY};
pub use crate::wire::{
    StructureType, WireScalar, ARRAY_COUNT_SIZE, MARKER_ABSENT, MARKER_PRESENT, MARKER_SIZE,
};
