//! Object handles and their translation from wire ids to renderer-local references.
//!
//! A handle travels as a `u64` object id where `0` means null. Decoding either resolves the id
//! immediately against an [`ObjectTable`] or keeps it in [`HandleState::Wire`] until a
//! [`Replacer`] pass resolves it later.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use tracing::debug;

use crate::chain::{Chain, Extension, Link};
use crate::codec::{Extensible, WireCodec};
use crate::error::DecodeFault;

/// Identifier assigned to an object by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl ObjectId {
    pub const NULL: ObjectId = ObjectId(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Opaque reference to the renderer's own object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalRef(pub u64);

/// Category of a tracked object. A lookup only succeeds when the categories match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Device,
    CommandBuffer,
    Buffer,
    BufferView,
    Image,
    ImageView,
    Sampler,
    SamplerYcbcrConversion,
    DescriptorSet,
    DescriptorPool,
    DescriptorSetLayout,
    ShaderModule,
    DeviceMemory,
}

impl ObjectKind {
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Device => "device",
            ObjectKind::CommandBuffer => "command buffer",
            ObjectKind::Buffer => "buffer",
            ObjectKind::BufferView => "buffer view",
            ObjectKind::Image => "image",
            ObjectKind::ImageView => "image view",
            ObjectKind::Sampler => "sampler",
            ObjectKind::SamplerYcbcrConversion => "sampler Y'CbCr conversion",
            ObjectKind::DescriptorSet => "descriptor set",
            ObjectKind::DescriptorPool => "descriptor pool",
            ObjectKind::DescriptorSetLayout => "descriptor set layout",
            ObjectKind::ShaderModule => "shader module",
            ObjectKind::DeviceMemory => "device memory",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type-level tag naming the category of a [`Handle`].
pub trait HandleKind: fmt::Debug + Clone + Copy + Default + PartialEq + Eq + Hash + 'static {
    const KIND: ObjectKind;
}

/// Marker types for every [`ObjectKind`].
pub mod kind {
    use super::{HandleKind, ObjectKind};

    macro_rules! handle_kinds {
        ($($name:ident),* $(,)?) => {
            $(
                #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
                pub struct $name;

                impl HandleKind for $name {
                    const KIND: ObjectKind = ObjectKind::$name;
                }
            )*
        };
    }

    handle_kinds!(
        Device,
        CommandBuffer,
        Buffer,
        BufferView,
        Image,
        ImageView,
        Sampler,
        SamplerYcbcrConversion,
        DescriptorSet,
        DescriptorPool,
        DescriptorSetLayout,
        ShaderModule,
        DeviceMemory,
    );
}

/// Resolution state of a handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HandleState {
    #[default]
    Null,
    /// Raw id taken off the wire; not yet trusted.
    Wire(ObjectId),
    /// Id that was found in the object table.
    Local { id: ObjectId, local: LocalRef },
}

/// Handle to an object of category `K`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Handle<K: HandleKind> {
    state: HandleState,
    kind: PhantomData<K>,
}

impl<K: HandleKind> Handle<K> {
    pub fn null() -> Self {
        Self::default()
    }

    /// An unresolved handle. A zero id yields the null handle.
    pub fn wire(id: ObjectId) -> Self {
        if id.is_null() {
            return Self::null();
        }
        Self {
            state: HandleState::Wire(id),
            kind: PhantomData,
        }
    }

    pub fn local(id: ObjectId, local: LocalRef) -> Self {
        Self {
            state: HandleState::Local { id, local },
            kind: PhantomData,
        }
    }

    pub fn state(&self) -> HandleState {
        self.state
    }

    pub fn kind(&self) -> ObjectKind {
        K::KIND
    }

    /// The id carried on the wire, [`ObjectId::NULL`] for a null handle.
    pub fn id(&self) -> ObjectId {
        match self.state {
            HandleState::Null => ObjectId::NULL,
            HandleState::Wire(id) | HandleState::Local { id, .. } => id,
        }
    }

    pub fn local_ref(&self) -> Option<LocalRef> {
        match self.state {
            HandleState::Local { local, .. } => Some(local),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.state, HandleState::Null)
    }

    /// True for null handles and handles found in the object table.
    pub fn is_resolved(&self) -> bool {
        !matches!(self.state, HandleState::Wire(_))
    }
}

impl<K: HandleKind> From<ObjectId> for Handle<K> {
    fn from(id: ObjectId) -> Self {
        Self::wire(id)
    }
}

/// Lookup of wire ids in the renderer's object tracking.
pub trait ObjectTable {
    /// Returns `None` when `id` is unknown or belongs to a different category.
    fn lookup(&self, kind: ObjectKind, id: ObjectId) -> Option<LocalRef>;
}

/// Table that knows no objects. Every non-null handle fails to resolve.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyObjectTable;

impl ObjectTable for EmptyObjectTable {
    fn lookup(&self, _kind: ObjectKind, _id: ObjectId) -> Option<LocalRef> {
        None
    }
}

/// Hash map backed [`ObjectTable`]. Ids are unique across categories.
#[derive(Debug, Default, Clone)]
pub struct ObjectRegistry {
    objects: HashMap<ObjectId, (ObjectKind, LocalRef)>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a new object. Returns `false` for the null id or an id already in use.
    pub fn insert(&mut self, kind: ObjectKind, id: ObjectId, local: LocalRef) -> bool {
        if id.is_null() || self.objects.contains_key(&id) {
            debug!(%kind, %id, "rejecting object id");
            return false;
        }
        self.objects.insert(id, (kind, local));
        true
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<(ObjectKind, LocalRef)> {
        self.objects.remove(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectTable for ObjectRegistry {
    fn lookup(&self, kind: ObjectKind, id: ObjectId) -> Option<LocalRef> {
        match self.objects.get(&id) {
            Some(&(found, local)) if found == kind => Some(local),
            _ => None,
        }
    }
}

/// Walks decoded values and resolves every [`HandleState::Wire`] handle in place.
///
/// The first failed lookup is recorded and later calls become no-ops, mirroring the decoder's
/// sticky fault.
pub struct Replacer<'a> {
    objects: &'a dyn ObjectTable,
    fault: Option<DecodeFault>,
    replaced: usize,
}

impl<'a> Replacer<'a> {
    pub fn new(objects: &'a dyn ObjectTable) -> Self {
        Self {
            objects,
            fault: None,
            replaced: 0,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.fault.is_some()
    }

    pub fn fault(&self) -> Option<DecodeFault> {
        self.fault
    }

    /// Number of handles resolved so far.
    pub fn replaced(&self) -> usize {
        self.replaced
    }

    pub fn finish(self) -> Result<usize, DecodeFault> {
        match self.fault {
            Some(fault) => Err(fault),
            None => Ok(self.replaced),
        }
    }

    pub fn replace<K: HandleKind>(&mut self, handle: &mut Handle<K>) {
        if self.fault.is_some() {
            return;
        }
        let HandleState::Wire(id) = handle.state() else {
            return;
        };
        match self.objects.lookup(K::KIND, id) {
            Some(local) => {
                *handle = Handle::local(id, local);
                self.replaced += 1;
            }
            None => {
                let fault = DecodeFault::UnknownObject { kind: K::KIND, id };
                debug!(%fault, "handle replacement failed");
                self.fault = Some(fault);
            }
        }
    }

    pub fn replace_struct<T: WireCodec>(&mut self, value: &mut T) {
        value.replace_self(self);
    }

    /// Replace the structure's own handles, then those of every recognized chain record.
    pub fn replace_extensible<T: Extensible>(&mut self, value: &mut T) {
        value.replace_self(self);
        self.replace_pnext(value.chain_mut());
    }

    /// Foreign links carry no decoded fields and are skipped.
    pub fn replace_pnext<E: Extension>(&mut self, chain: &mut Chain<E>) {
        for link in chain.links_mut() {
            if let Link::Known(record) = link {
                record.replace_record(self);
            }
        }
    }

    pub fn replace_array<T>(
        &mut self,
        items: Option<&mut [T]>,
        mut replace: impl FnMut(&mut Self, &mut T),
    ) {
        for item in items.into_iter().flatten() {
            replace(self, item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_lookup_requires_matching_kind() {
        let mut registry = ObjectRegistry::new();
        assert!(registry.insert(ObjectKind::Image, ObjectId(7), LocalRef(70)));
        assert!(!registry.insert(ObjectKind::Buffer, ObjectId(7), LocalRef(71)));
        assert!(!registry.insert(ObjectKind::Buffer, ObjectId::NULL, LocalRef(1)));

        assert_eq!(
            registry.lookup(ObjectKind::Image, ObjectId(7)),
            Some(LocalRef(70))
        );
        assert_eq!(registry.lookup(ObjectKind::ImageView, ObjectId(7)), None);
        assert_eq!(registry.lookup(ObjectKind::Image, ObjectId(8)), None);

        assert_eq!(
            registry.remove(ObjectId(7)),
            Some((ObjectKind::Image, LocalRef(70)))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn wire_zero_is_null() {
        let handle: Handle<kind::Sampler> = Handle::wire(ObjectId::NULL);
        assert!(handle.is_null());
        assert!(handle.is_resolved());
        assert_eq!(handle.kind(), ObjectKind::Sampler);
    }

    #[test]
    fn replacer_resolves_and_records_first_miss() {
        let mut registry = ObjectRegistry::new();
        registry.insert(ObjectKind::Sampler, ObjectId(3), LocalRef(30));

        let mut known: Handle<kind::Sampler> = Handle::wire(ObjectId(3));
        let mut missing: Handle<kind::Sampler> = Handle::wire(ObjectId(4));
        let mut later: Handle<kind::Sampler> = Handle::wire(ObjectId(3));

        let mut replacer = Replacer::new(&registry);
        replacer.replace(&mut known);
        replacer.replace(&mut missing);
        replacer.replace(&mut later);

        assert_eq!(known.local_ref(), Some(LocalRef(30)));
        assert_eq!(missing.state(), HandleState::Wire(ObjectId(4)));
        // Sticky: nothing after the miss is touched.
        assert_eq!(later.state(), HandleState::Wire(ObjectId(3)));
        assert_eq!(
            replacer.finish(),
            Err(DecodeFault::UnknownObject {
                kind: ObjectKind::Sampler,
                id: ObjectId(4),
            })
        );
    }
}
