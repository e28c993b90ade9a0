//! Bounds-checked reader over an untrusted command stream.
//!
//! The decoder never panics on malformed input. The first malformation is recorded as a
//! [`DecodeFault`]; from then on the decoder is fatal and every read returns a zeroed value
//! without consuming input. Callers decode a whole command and check [`Decoder::is_fatal`]
//! once at the end.

use tracing::debug;

use crate::arena::TempArena;
use crate::chain::{Chain, Extension};
use crate::codec::{Extensible, WireCodec};
use crate::error::DecodeFault;
use crate::handle::{Handle, HandleKind, ObjectId, ObjectTable};
use crate::options::CsOptions;
use crate::wire::{StructureType, WireScalar, MARKER_ABSENT, MARKER_PRESENT, MARKER_SIZE};

/// Depth of the saved-state stack used by [`Decoder::push_state`].
pub const MAX_SAVED_STATES: usize = 4;

#[derive(Debug, Clone, Copy)]
struct SavedState<'a> {
    buf: &'a [u8],
    pos: usize,
}

pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
    arena: &'a mut TempArena,
    objects: &'a dyn ObjectTable,
    max_chain_links: usize,
    fault: Option<DecodeFault>,
    saved: Vec<SavedState<'a>>,
}

impl<'a> Decoder<'a> {
    pub fn new(buf: &'a [u8], arena: &'a mut TempArena, objects: &'a dyn ObjectTable) -> Self {
        Self::with_options(buf, arena, objects, &CsOptions::default())
    }

    pub fn with_options(
        buf: &'a [u8],
        arena: &'a mut TempArena,
        objects: &'a dyn ObjectTable,
        options: &CsOptions,
    ) -> Self {
        Self {
            buf,
            pos: 0,
            arena,
            objects,
            max_chain_links: options.max_chain_links,
            fault: None,
            saved: Vec::new(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.fault.is_some()
    }

    pub fn fault(&self) -> Option<DecodeFault> {
        self.fault
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn arena(&self) -> &TempArena {
        &*self.arena
    }

    pub fn objects(&self) -> &'a dyn ObjectTable {
        self.objects
    }

    /// Record `fault` unless one is already recorded.
    pub fn set_fatal(&mut self, fault: DecodeFault) {
        if self.fault.is_none() {
            debug!(%fault, pos = self.pos, "command stream is fatal");
            self.fault = Some(fault);
        }
    }

    /// Start reading `buf` from the beginning. A recorded fault is kept.
    pub fn reset(&mut self, buf: &'a [u8]) {
        self.buf = buf;
        self.pos = 0;
        self.saved.clear();
    }

    /// Save the current position and switch to `buf` until [`pop_state`](Self::pop_state).
    pub fn push_state(&mut self, buf: &'a [u8]) {
        if self.saved.len() >= MAX_SAVED_STATES {
            self.set_fatal(DecodeFault::SavedStateOverflow);
            return;
        }
        self.saved.push(SavedState {
            buf: self.buf,
            pos: self.pos,
        });
        self.buf = buf;
        self.pos = 0;
    }

    /// Restore the state saved by the matching [`push_state`](Self::push_state).
    pub fn pop_state(&mut self) {
        match self.saved.pop() {
            Some(state) => {
                self.buf = state.buf;
                self.pos = state.pos;
            }
            None => self.set_fatal(DecodeFault::SavedStateUnderflow),
        }
    }

    fn peek_bytes(&self, len: usize) -> Option<&'a [u8]> {
        if self.fault.is_some() {
            return None;
        }
        let buf = self.buf;
        buf.get(self.pos..self.pos.checked_add(len)?)
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        if self.fault.is_some() {
            return None;
        }
        match self.peek_bytes(len) {
            Some(bytes) => {
                self.pos += len;
                Some(bytes)
            }
            None => {
                self.set_fatal(DecodeFault::Truncated {
                    offset: self.pos,
                    needed: len,
                    remaining: self.remaining(),
                });
                None
            }
        }
    }

    pub fn decode_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        self.take(len)
    }

    pub fn skip_bytes(&mut self, len: usize) {
        self.take(len);
    }

    pub fn decode_scalar<T: WireScalar>(&mut self) -> T {
        self.take(T::SIZE).map(T::read_le).unwrap_or_default()
    }

    /// Consume a scalar of type `T` without looking at it.
    pub fn skip<T: WireScalar>(&mut self) {
        self.take(T::SIZE);
    }

    pub fn decode_bool(&mut self) -> bool {
        let offset = self.pos;
        match self.decode_scalar::<u32>() {
            0 => false,
            1 => true,
            found => {
                self.set_fatal(DecodeFault::InvalidBool { offset, found });
                false
            }
        }
    }

    /// Presence marker of a pointer to a single value.
    pub fn decode_simple_pointer(&mut self) -> bool {
        let offset = self.pos;
        match self.decode_scalar::<u32>() {
            MARKER_ABSENT => false,
            MARKER_PRESENT => true,
            found => {
                self.set_fatal(DecodeFault::InvalidMarker { offset, found });
                false
            }
        }
    }

    /// Presence marker of a pointer the command requires; absence is fatal.
    pub fn decode_required_pointer(&mut self) -> bool {
        let offset = self.pos;
        let present = self.decode_simple_pointer();
        if !present && !self.is_fatal() {
            self.set_fatal(DecodeFault::NullPointer { offset });
        }
        present
    }

    /// Whether the next array marker says present. Never consumes input or records a fault.
    pub fn peek_array_size(&self) -> bool {
        self.peek_bytes(MARKER_SIZE)
            .map(u32::read_le)
            .is_some_and(|marker| marker == MARKER_PRESENT)
    }

    /// Size of a required array with at most `max` elements.
    ///
    /// An absent marker, a count above `max` or a truncated stream is fatal and yields `0`.
    pub fn decode_array_size(&mut self, max: usize) -> usize {
        let offset = self.pos;
        if !self.decode_simple_pointer() {
            if !self.is_fatal() {
                self.set_fatal(DecodeFault::NullPointer { offset });
            }
            return 0;
        }
        let size = self.decode_scalar::<u64>();
        if self.is_fatal() {
            return 0;
        }
        if size > max as u64 {
            self.set_fatal(DecodeFault::ArraySizeExceeded {
                size,
                max: max as u64,
            });
            return 0;
        }
        size as usize
    }

    /// Size of an array that carries no count field. An absent marker yields `0`.
    ///
    /// The count is still held to the bytes left in the stream, one per element at least.
    pub fn decode_array_size_unchecked(&mut self) -> usize {
        if !self.decode_simple_pointer() {
            return 0;
        }
        let size = self.decode_scalar::<u64>();
        if self.is_fatal() {
            return 0;
        }
        if size > self.remaining() as u64 {
            self.set_fatal(DecodeFault::Truncated {
                offset: self.pos,
                needed: usize::try_from(size).unwrap_or(usize::MAX),
                remaining: self.remaining(),
            });
            return 0;
        }
        size as usize
    }

    /// Charge storage for `count` values of `T` against the temp arena.
    pub fn alloc_temp_array<T>(&mut self, count: usize) -> Option<Vec<T>> {
        if self.is_fatal() {
            return None;
        }
        let items = self.arena.alloc_array(count);
        if items.is_none() {
            self.set_fatal(DecodeFault::ArenaExhausted {
                size: core::mem::size_of::<T>().saturating_mul(count),
                remaining: self.arena.remaining(),
            });
        }
        items
    }

    /// Charge storage for one `T` against the temp arena.
    pub fn alloc_temp<T>(&mut self) -> bool {
        if self.is_fatal() {
            return false;
        }
        if self.arena.alloc_record::<T>() {
            return true;
        }
        self.set_fatal(DecodeFault::ArenaExhausted {
            size: core::mem::size_of::<T>(),
            remaining: self.arena.remaining(),
        });
        false
    }

    /// Variable-length array of at most `max` elements.
    ///
    /// Returns `None` for an absent array, which is distinct from a present empty one. Elements
    /// after a fault are not decoded.
    pub fn decode_array_var<T>(
        &mut self,
        max: usize,
        mut decode: impl FnMut(&mut Self) -> T,
    ) -> Option<Vec<T>> {
        if !self.peek_array_size() {
            self.decode_simple_pointer();
            return None;
        }
        let count = self.decode_array_size(max);
        if self.is_fatal() {
            return None;
        }
        // Every element occupies at least one byte.
        if count > self.remaining() {
            self.set_fatal(DecodeFault::Truncated {
                offset: self.pos,
                needed: count,
                remaining: self.remaining(),
            });
            return None;
        }
        let mut items = self.alloc_temp_array(count)?;
        for _ in 0..count {
            items.push(decode(self));
            if self.is_fatal() {
                break;
            }
        }
        Some(items)
    }

    pub fn decode_scalar_array<T: WireScalar>(&mut self, max: usize) -> Option<Vec<T>> {
        self.decode_array_var(max, |dec| dec.decode_scalar())
    }

    /// Consume an array of scalars without materializing it.
    pub fn skip_scalar_array<T: WireScalar>(&mut self, max: usize) {
        if !self.peek_array_size() {
            self.decode_simple_pointer();
            return;
        }
        let count = self.decode_array_size(max);
        match count.checked_mul(T::SIZE) {
            Some(len) => self.skip_bytes(len),
            None => self.set_fatal(DecodeFault::ArraySizeExceeded {
                size: count as u64,
                max: max as u64,
            }),
        }
    }

    /// Byte array of at most `max` bytes.
    pub fn decode_blob(&mut self, max: usize) -> Option<Vec<u8>> {
        if !self.peek_array_size() {
            self.decode_simple_pointer();
            return None;
        }
        let len = self.decode_array_size(max);
        if self.is_fatal() {
            return None;
        }
        if len > self.remaining() {
            self.set_fatal(DecodeFault::Truncated {
                offset: self.pos,
                needed: len,
                remaining: self.remaining(),
            });
            return None;
        }
        let mut bytes = self.alloc_temp_array(len)?;
        bytes.extend_from_slice(self.take(len)?);
        Some(bytes)
    }

    /// Fixed-length array: `N` elements, no marker or count.
    pub fn decode_array_fixed<T, const N: usize>(
        &mut self,
        mut decode: impl FnMut(&mut Self) -> T,
    ) -> [T; N] {
        core::array::from_fn(|_| decode(self))
    }

    pub fn decode_scalar_array_fixed<T: WireScalar, const N: usize>(&mut self) -> [T; N] {
        self.decode_array_fixed(|dec| dec.decode_scalar())
    }

    pub fn decode_structure_type(&mut self) -> StructureType {
        self.decode_scalar()
    }

    /// Resolve a handle against the object table. Null is allowed; an unknown id is fatal.
    pub fn decode_handle_lookup<K: HandleKind>(&mut self) -> Handle<K> {
        let id = ObjectId(self.decode_scalar());
        if id.is_null() || self.is_fatal() {
            return Handle::null();
        }
        match self.objects.lookup(K::KIND, id) {
            Some(local) => Handle::local(id, local),
            None => {
                self.set_fatal(DecodeFault::UnknownObject { kind: K::KIND, id });
                Handle::null()
            }
        }
    }

    /// Keep a handle in wire form for a later [`crate::Replacer`] pass.
    pub fn decode_handle<K: HandleKind>(&mut self) -> Handle<K> {
        Handle::wire(ObjectId(self.decode_scalar()))
    }

    pub fn decode_struct_temp<T: WireCodec>(&mut self) -> T {
        let mut value = T::default();
        value.decode_self_temp(self);
        value
    }

    pub fn decode_struct_partial<T: WireCodec>(&mut self) -> T {
        let mut value = T::default();
        value.decode_self_partial(self);
        value
    }

    fn check_structure_type<T: Extensible>(&mut self) {
        let found = self.decode_structure_type();
        if !self.is_fatal() && found != T::STRUCTURE_TYPE {
            self.set_fatal(DecodeFault::UnexpectedStructureType {
                expected: T::STRUCTURE_TYPE,
                found,
            });
        }
    }

    pub fn decode_extensible_temp<T: Extensible>(&mut self) -> T {
        self.check_structure_type::<T>();
        let mut value = T::default();
        value.decode_self_temp(self);
        *value.chain_mut() = self.decode_chain(T::NAME, <T::Ext as Extension>::decode_record_temp);
        value
    }

    pub fn decode_extensible_partial<T: Extensible>(&mut self) -> T {
        self.check_structure_type::<T>();
        let mut value = T::default();
        value.decode_self_partial(self);
        *value.chain_mut() = self.decode_chain(T::NAME, <T::Ext as Extension>::decode_record_partial);
        value
    }

    pub fn decode_pnext_temp<E: Extension>(&mut self) -> Chain<E> {
        self.decode_chain(E::BASE, E::decode_record_temp)
    }

    pub fn decode_pnext_partial<E: Extension>(&mut self) -> Chain<E> {
        self.decode_chain(E::BASE, E::decode_record_partial)
    }

    fn decode_chain<E: Extension>(
        &mut self,
        base: &'static str,
        mut decode: impl FnMut(StructureType, &mut Self) -> Option<E>,
    ) -> Chain<E> {
        let mut chain = Chain::new();
        while self.decode_simple_pointer() {
            let stype = self.decode_structure_type();
            if self.is_fatal() {
                break;
            }
            if !E::recognizes(stype) {
                self.set_fatal(DecodeFault::UnknownExtension { base, found: stype });
                break;
            }
            if chain.len() >= self.max_chain_links {
                self.set_fatal(DecodeFault::ChainTooLong {
                    base,
                    max: self.max_chain_links,
                });
                break;
            }
            if !self.alloc_temp::<E>() {
                break;
            }
            match decode(stype, self) {
                Some(record) => chain.push(record),
                None => {
                    self.set_fatal(DecodeFault::UnknownExtension { base, found: stype });
                    break;
                }
            }
        }
        chain
    }

    /// Pointer to a single optional value.
    pub fn decode_optional<T>(&mut self, decode: impl FnOnce(&mut Self) -> T) -> Option<T> {
        if !self.decode_simple_pointer() || !self.alloc_temp::<T>() {
            return None;
        }
        Some(decode(self))
    }

    /// Pointer to a single value the command requires; absence is fatal and yields the default.
    pub fn decode_required<T: Default>(&mut self, decode: impl FnOnce(&mut Self) -> T) -> T {
        if !self.decode_required_pointer() || !self.alloc_temp::<T>() {
            return T::default();
        }
        decode(self)
    }

    pub fn decode_optional_struct_temp<T: WireCodec>(&mut self) -> Option<T> {
        self.decode_optional(|dec| dec.decode_struct_temp())
    }

    pub fn decode_optional_struct_partial<T: WireCodec>(&mut self) -> Option<T> {
        self.decode_optional(|dec| dec.decode_struct_partial())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::NoExtensions;
    use crate::handle::{kind, EmptyObjectTable, LocalRef, ObjectKind, ObjectRegistry};
    use crate::Encoder;

    fn with_decoder<R>(bytes: &[u8], f: impl FnOnce(&mut Decoder<'_>) -> R) -> R {
        let mut arena = TempArena::new(4096);
        let mut dec = Decoder::new(bytes, &mut arena, &EmptyObjectTable);
        f(&mut dec)
    }

    #[test]
    fn truncation_is_sticky_and_yields_zero() {
        with_decoder(&[1, 0, 0, 0, 9, 9], |dec| {
            assert_eq!(dec.decode_scalar::<u32>(), 1);
            assert_eq!(dec.decode_scalar::<u32>(), 0);
            assert_eq!(
                dec.fault(),
                Some(DecodeFault::Truncated {
                    offset: 4,
                    needed: 4,
                    remaining: 2,
                })
            );

            // The two remaining bytes would satisfy a u16, but the decoder is fatal.
            assert_eq!(dec.decode_scalar::<u16>(), 0);
            assert_eq!(dec.position(), 4);
        });
    }

    #[test]
    fn fresh_decoder_is_unaffected_by_a_fatal_one() {
        let bytes = 7u32.to_le_bytes();
        with_decoder(&bytes[..2], |dec| {
            dec.decode_scalar::<u32>();
            assert!(dec.is_fatal());
        });
        with_decoder(&bytes, |dec| {
            assert_eq!(dec.decode_scalar::<u32>(), 7);
            assert!(!dec.is_fatal());
        });
    }

    #[test]
    fn bools_and_markers_must_be_zero_or_one() {
        with_decoder(&2u32.to_le_bytes(), |dec| {
            assert!(!dec.decode_bool());
            assert_eq!(
                dec.fault(),
                Some(DecodeFault::InvalidBool {
                    offset: 0,
                    found: 2,
                })
            );
        });
        with_decoder(&0xff00_0000u32.to_le_bytes(), |dec| {
            assert!(!dec.decode_simple_pointer());
            assert!(matches!(
                dec.fault(),
                Some(DecodeFault::InvalidMarker { found: 0xff00_0000, .. })
            ));
        });
    }

    #[test]
    fn peek_array_size_does_not_consume() {
        let mut enc = Encoder::new();
        enc.encode_array_size(Some(2));
        let bytes = enc.finish().unwrap();

        with_decoder(&bytes, |dec| {
            assert!(dec.peek_array_size());
            assert!(dec.peek_array_size());
            assert_eq!(dec.position(), 0);
            assert_eq!(dec.decode_array_size(2), 2);
        });
        with_decoder(&[], |dec| {
            assert!(!dec.peek_array_size());
            assert!(!dec.is_fatal());
        });
    }

    #[test]
    fn array_size_above_bound_is_fatal() {
        let mut enc = Encoder::new();
        enc.encode_array_size(Some(5));
        let bytes = enc.finish().unwrap();

        with_decoder(&bytes, |dec| {
            assert_eq!(dec.decode_array_size(4), 0);
            assert_eq!(
                dec.fault(),
                Some(DecodeFault::ArraySizeExceeded { size: 5, max: 4 })
            );
        });
    }

    #[test]
    fn absent_and_empty_arrays_decode_differently() {
        let mut enc = Encoder::new();
        enc.encode_scalar_array::<u32>(None);
        enc.encode_scalar_array::<u32>(Some(&[][..]));
        let bytes = enc.finish().unwrap();

        with_decoder(&bytes, |dec| {
            assert_eq!(dec.decode_scalar_array::<u32>(8), None);
            assert_eq!(dec.decode_scalar_array::<u32>(8), Some(vec![]));
            assert_eq!(dec.remaining(), 0);
            assert!(!dec.is_fatal());
        });
    }

    #[test]
    fn huge_counts_fail_before_allocating() {
        let mut enc = Encoder::new();
        enc.encode_array_size(Some(1 << 40));
        let bytes = enc.finish().unwrap();

        with_decoder(&bytes, |dec| {
            assert_eq!(dec.decode_scalar_array::<u64>(usize::MAX), None);
            assert!(matches!(dec.fault(), Some(DecodeFault::Truncated { .. })));
        });
    }

    #[test]
    fn arena_exhaustion_is_fatal() {
        let mut enc = Encoder::new();
        enc.encode_scalar_array(Some(&[1u64, 2, 3][..]));
        let bytes = enc.finish().unwrap();

        let mut arena = TempArena::new(16);
        let mut dec = Decoder::new(&bytes, &mut arena, &EmptyObjectTable);
        assert_eq!(dec.decode_scalar_array::<u64>(3), None);
        assert_eq!(
            dec.fault(),
            Some(DecodeFault::ArenaExhausted {
                size: 24,
                remaining: 16,
            })
        );
    }

    #[test]
    fn handle_lookup_miss_is_fatal_and_null_is_allowed() {
        let mut registry = ObjectRegistry::new();
        registry.insert(ObjectKind::Buffer, ObjectId(5), LocalRef(50));

        let mut enc = Encoder::new();
        enc.encode_scalar(0u64);
        enc.encode_scalar(5u64);
        enc.encode_scalar(6u64);
        let bytes = enc.finish().unwrap();

        let mut arena = TempArena::new(64);
        let mut dec = Decoder::new(&bytes, &mut arena, &registry);
        assert!(dec.decode_handle_lookup::<kind::Buffer>().is_null());
        assert_eq!(
            dec.decode_handle_lookup::<kind::Buffer>().local_ref(),
            Some(LocalRef(50))
        );
        assert!(dec.decode_handle_lookup::<kind::Buffer>().is_null());
        assert_eq!(
            dec.fault(),
            Some(DecodeFault::UnknownObject {
                kind: ObjectKind::Buffer,
                id: ObjectId(6),
            })
        );
    }

    #[test]
    fn saved_states_nest_and_overflow() {
        let outer = [1u8, 2, 3];
        let inner = [9u8];
        let mut arena = TempArena::new(64);
        let mut dec = Decoder::new(&outer, &mut arena, &EmptyObjectTable);

        assert_eq!(dec.decode_scalar::<u8>(), 1);
        dec.push_state(&inner);
        assert_eq!(dec.decode_scalar::<u8>(), 9);
        dec.pop_state();
        assert_eq!(dec.decode_scalar::<u8>(), 2);

        for _ in 0..MAX_SAVED_STATES {
            dec.push_state(&inner);
        }
        assert!(!dec.is_fatal());
        dec.push_state(&inner);
        assert_eq!(dec.fault(), Some(DecodeFault::SavedStateOverflow));
    }

    #[test]
    fn reset_keeps_the_fault() {
        let short = [1u8];
        let full = 3u32.to_le_bytes();
        let mut arena = TempArena::new(64);
        let mut dec = Decoder::new(&short, &mut arena, &EmptyObjectTable);

        dec.decode_scalar::<u32>();
        dec.reset(&full);
        assert_eq!(dec.position(), 0);
        assert_eq!(dec.decode_scalar::<u32>(), 0);
        assert!(dec.is_fatal());
    }

    #[test]
    fn unmatched_pop_state_is_fatal() {
        let bytes = [1u8, 2];
        with_decoder(&bytes, |dec| {
            assert_eq!(dec.decode_scalar::<u8>(), 1);
            dec.pop_state();
            assert_eq!(dec.fault(), Some(DecodeFault::SavedStateUnderflow));
            assert_eq!(dec.decode_scalar::<u8>(), 0);
            assert_eq!(dec.position(), 1);
        });
    }

    #[test]
    fn unchecked_array_size_is_held_to_the_stream() {
        let mut enc = Encoder::new();
        enc.encode_array_size(None);
        enc.encode_array_size(Some(2));
        enc.encode_scalar_array_fixed(&[7u8, 8]);
        let bytes = enc.finish().unwrap();

        with_decoder(&bytes, |dec| {
            assert_eq!(dec.decode_array_size_unchecked(), 0);
            assert_eq!(dec.position(), 4);
            assert_eq!(dec.decode_array_size_unchecked(), 2);
            assert_eq!(dec.remaining(), 2);
            assert!(!dec.is_fatal());
        });

        let mut enc = Encoder::new();
        enc.encode_array_size(Some(3));
        enc.encode_scalar_array_fixed(&[7u8, 8]);
        let bytes = enc.finish().unwrap();

        with_decoder(&bytes, |dec| {
            assert_eq!(dec.decode_array_size_unchecked(), 0);
            assert_eq!(
                dec.fault(),
                Some(DecodeFault::Truncated {
                    offset: 12,
                    needed: 3,
                    remaining: 2,
                })
            );
        });
    }

    #[test]
    fn skipped_scalar_arrays_consume_their_elements() {
        let mut enc = Encoder::new();
        enc.encode_scalar_array::<u32>(None);
        enc.encode_scalar_array(Some(&[1u32, 2, 3][..]));
        enc.encode_scalar(0xeeu8);
        let bytes = enc.finish().unwrap();

        with_decoder(&bytes, |dec| {
            dec.skip_scalar_array::<u32>(3);
            assert_eq!(dec.position(), 4);
            dec.skip_scalar_array::<u32>(3);
            assert_eq!(dec.decode_scalar::<u8>(), 0xee);
            assert_eq!(dec.remaining(), 0);
            assert_eq!(dec.arena().allocations(), 0);
            assert!(!dec.is_fatal());
        });

        with_decoder(&bytes[4..], |dec| {
            dec.skip_scalar_array::<u32>(2);
            assert_eq!(
                dec.fault(),
                Some(DecodeFault::ArraySizeExceeded { size: 3, max: 2 })
            );
        });
    }

    #[test]
    fn standalone_chain_without_extensions() {
        let mut enc = Encoder::new();
        enc.encode_pnext(&Chain::<NoExtensions>::new());
        enc.encode_pnext(&Chain::<NoExtensions>::new());
        let bytes = enc.finish().unwrap();
        with_decoder(&bytes, |dec| {
            assert!(dec.decode_pnext_temp::<NoExtensions>().is_empty());
            assert!(dec.decode_pnext_partial::<NoExtensions>().is_empty());
            assert_eq!(dec.remaining(), 0);
            assert!(!dec.is_fatal());
        });

        let mut enc = Encoder::new();
        enc.encode_simple_pointer(true);
        enc.encode_scalar(StructureType(42));
        let bytes = enc.finish().unwrap();
        with_decoder(&bytes, |dec| {
            assert!(dec.decode_pnext_partial::<NoExtensions>().is_empty());
            assert_eq!(
                dec.fault(),
                Some(DecodeFault::UnknownExtension {
                    base: "structure without extensions",
                    found: StructureType(42),
                })
            );
        });
    }

    #[derive(Debug, Default, PartialEq)]
    struct Pair {
        a: u32,
        b: u32,
    }

    impl WireCodec for Pair {
        fn encode_self(&self, enc: &mut Encoder) {
            enc.encode_scalar(self.a);
            enc.encode_scalar(self.b);
        }

        fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
            self.a = dec.decode_scalar();
            self.b = dec.decode_scalar();
        }

        fn decode_self_partial(&mut self, dec: &mut Decoder<'_>) {
            dec.skip::<u32>();
            self.b = dec.decode_scalar();
        }
    }

    #[test]
    fn optional_structs_follow_their_marker() {
        let mut enc = Encoder::new();
        enc.encode_optional(Some(&Pair { a: 3, b: 4 }), |enc, pair| enc.encode_struct(pair));
        enc.encode_optional::<Pair>(None, |enc, pair| enc.encode_struct(pair));
        enc.encode_optional(Some(&Pair { a: 5, b: 6 }), |enc, pair| enc.encode_struct(pair));
        let bytes = enc.finish().unwrap();

        with_decoder(&bytes, |dec| {
            assert_eq!(dec.decode_optional_struct_temp(), Some(Pair { a: 3, b: 4 }));
            assert_eq!(dec.decode_optional_struct_temp::<Pair>(), None);
            assert_eq!(dec.decode_optional_struct_partial(), Some(Pair { a: 0, b: 6 }));
            assert_eq!(dec.remaining(), 0);
            assert_eq!(dec.arena().allocations(), 2);
        });
    }
}
