//! Byte stream writer for commands and replies.

use tracing::{debug, trace};

use crate::chain::{Chain, Extension, Link};
use crate::codec::{Extensible, WireCodec};
use crate::error::EncodeFault;
use crate::handle::{Handle, HandleKind};
use crate::wire::{WireScalar, MARKER_ABSENT, MARKER_PRESENT};

/// Appends encoded values to a growable buffer.
///
/// An unbounded encoder never fails. A reply encoder created with
/// [`with_reply_capacity`](Self::with_reply_capacity) records an [`EncodeFault`] the first time
/// a write would exceed its capacity and ignores every write after that.
#[derive(Debug, Default, Clone)]
pub struct Encoder {
    buf: Vec<u8>,
    pos: usize,
    capacity: Option<usize>,
    fault: Option<EncodeFault>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn is_fatal(&self) -> bool {
        self.fault.is_some()
    }

    pub fn fault(&self) -> Option<EncodeFault> {
        self.fault
    }

    pub fn finish(self) -> Result<Vec<u8>, EncodeFault> {
        match self.fault {
            Some(fault) => Err(fault),
            None => Ok(self.buf),
        }
    }

    /// Move the write position within the bytes written so far. Later writes overwrite.
    pub fn seek(&mut self, pos: usize) {
        if self.fault.is_some() {
            return;
        }
        if pos > self.buf.len() {
            self.set_fault(EncodeFault::SeekOutOfRange {
                pos,
                len: self.buf.len(),
            });
            return;
        }
        self.pos = pos;
    }

    /// Move the write position back to the end of the stream.
    pub fn seek_end(&mut self) {
        self.seek(self.buf.len());
    }

    fn set_fault(&mut self, fault: EncodeFault) {
        if self.fault.is_none() {
            debug!(%fault, "encoder fault");
            self.fault = Some(fault);
        }
    }

    fn write(&mut self, len: usize, fill: impl FnOnce(&mut [u8])) {
        if self.fault.is_some() {
            return;
        }
        let end = match self.pos.checked_add(len) {
            Some(end) => end,
            None => {
                self.set_fault(EncodeFault::ReplyOverflow {
                    needed: usize::MAX,
                    capacity: self.capacity.unwrap_or(usize::MAX),
                });
                return;
            }
        };
        if let Some(capacity) = self.capacity {
            if end > capacity {
                self.set_fault(EncodeFault::ReplyOverflow {
                    needed: end,
                    capacity,
                });
                return;
            }
        }
        if end > self.buf.len() {
            self.buf.resize(end, 0);
        }
        fill(&mut self.buf[self.pos..end]);
        self.pos = end;
    }

    pub fn encode_bytes(&mut self, bytes: &[u8]) {
        self.write(bytes.len(), |out| out.copy_from_slice(bytes));
    }

    pub fn encode_scalar<T: WireScalar>(&mut self, value: T) {
        self.write(T::SIZE, |out| value.write_le(out));
    }

    pub fn encode_bool(&mut self, value: bool) {
        self.encode_scalar(u32::from(value));
    }

    /// Presence marker of a pointer to a single value.
    pub fn encode_simple_pointer(&mut self, present: bool) {
        self.encode_scalar(if present { MARKER_PRESENT } else { MARKER_ABSENT });
    }

    /// Presence marker of an array, followed by its element count when present.
    pub fn encode_array_size(&mut self, size: Option<usize>) {
        match size {
            Some(size) => {
                self.encode_scalar(MARKER_PRESENT);
                self.encode_scalar(size as u64);
            }
            None => self.encode_scalar(MARKER_ABSENT),
        }
    }

    /// Variable-length array: marker, count, elements. `None` encodes as absent.
    pub fn encode_array_var<T>(
        &mut self,
        items: Option<&[T]>,
        mut encode: impl FnMut(&mut Self, &T),
    ) {
        self.encode_array_size(items.map(<[T]>::len));
        for item in items.into_iter().flatten() {
            encode(self, item);
        }
    }

    pub fn encode_scalar_array<T: WireScalar>(&mut self, items: Option<&[T]>) {
        self.encode_array_var(items, |enc, &item| enc.encode_scalar(item));
    }

    /// Variable-length byte array copied verbatim.
    pub fn encode_blob(&mut self, bytes: Option<&[u8]>) {
        self.encode_array_size(bytes.map(<[u8]>::len));
        if let Some(bytes) = bytes {
            self.encode_bytes(bytes);
        }
    }

    /// Fixed-length array: elements only, no marker or count.
    pub fn encode_array_fixed<T, const N: usize>(
        &mut self,
        items: &[T; N],
        mut encode: impl FnMut(&mut Self, &T),
    ) {
        for item in items {
            encode(self, item);
        }
    }

    pub fn encode_scalar_array_fixed<T: WireScalar, const N: usize>(&mut self, items: &[T; N]) {
        self.encode_array_fixed(items, |enc, &item| enc.encode_scalar(item));
    }

    pub fn encode_handle<K: HandleKind>(&mut self, handle: &Handle<K>) {
        self.encode_scalar(handle.id().0);
    }

    pub fn encode_struct<T: WireCodec>(&mut self, value: &T) {
        value.encode_self(self);
    }

    /// Structure-type tag, own fields, then the extension chain.
    pub fn encode_extensible<T: Extensible>(&mut self, value: &T) {
        self.encode_scalar(T::STRUCTURE_TYPE);
        value.encode_self(self);
        self.encode_pnext(value.chain());
    }

    /// Encode `chain` up to its first foreign link, then the terminator.
    pub fn encode_pnext<E: Extension>(&mut self, chain: &Chain<E>) {
        for link in chain.links() {
            match link {
                Link::Known(record) => {
                    self.encode_simple_pointer(true);
                    self.encode_scalar(record.structure_type());
                    record.encode_record(self);
                }
                Link::Foreign(stype) => {
                    trace!(base = E::BASE, %stype, "truncating chain at foreign link");
                    break;
                }
            }
        }
        self.encode_simple_pointer(false);
    }

    /// Pointer to a single value: marker, then the value when present.
    pub fn encode_optional<T>(&mut self, value: Option<&T>, encode: impl FnOnce(&mut Self, &T)) {
        self.encode_simple_pointer(value.is_some());
        if let Some(value) = value {
            encode(self, value);
        }
    }
}
