//! Memory requirement queries.

use vkwire_cs::{
    extension_chain, impl_extensible, Chain, Decoder, Encoder, NoExtensions, Replacer, WireCodec,
};

use crate::basic::scalar_struct;
use crate::handles::ImageHandle;
use crate::types::{stype, DeviceSize};

scalar_struct! {
    pub struct MemoryRequirements {
        pub size: DeviceSize,
        pub alignment: DeviceSize,
        pub memory_type_bits: u32,
    }
}

/// Chained onto [`MemoryRequirements2`] to ask whether a dedicated allocation is preferred.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryDedicatedRequirements {
    pub next: Chain<NoExtensions>,
    pub prefers_dedicated_allocation: bool,
    pub requires_dedicated_allocation: bool,
}

impl WireCodec for MemoryDedicatedRequirements {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_bool(self.prefers_dedicated_allocation);
        enc.encode_bool(self.requires_dedicated_allocation);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.prefers_dedicated_allocation = dec.decode_bool();
        self.requires_dedicated_allocation = dec.decode_bool();
    }

    fn decode_self_partial(&mut self, dec: &mut Decoder<'_>) {
        dec.decode_bool();
        dec.decode_bool();
    }
}

impl_extensible!(
    MemoryDedicatedRequirements,
    stype::MEMORY_DEDICATED_REQUIREMENTS,
    NoExtensions,
    next
);

extension_chain! {
    pub enum MemoryRequirements2Ext for "MemoryRequirements2" {
        Dedicated(MemoryDedicatedRequirements),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRequirements2 {
    pub next: Chain<MemoryRequirements2Ext>,
    pub memory_requirements: MemoryRequirements,
}

impl MemoryRequirements2 {
    pub fn dedicated(&self) -> Option<&MemoryDedicatedRequirements> {
        self.next.records().find_map(|record| match record {
            MemoryRequirements2Ext::Dedicated(dedicated) => Some(dedicated),
        })
    }

    pub fn dedicated_mut(&mut self) -> Option<&mut MemoryDedicatedRequirements> {
        self.next.records_mut().find_map(|record| match record {
            MemoryRequirements2Ext::Dedicated(dedicated) => Some(dedicated),
        })
    }
}

impl WireCodec for MemoryRequirements2 {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_struct(&self.memory_requirements);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.memory_requirements = dec.decode_struct_temp();
    }

    fn decode_self_partial(&mut self, dec: &mut Decoder<'_>) {
        self.memory_requirements = dec.decode_struct_partial();
    }
}

impl_extensible!(
    MemoryRequirements2,
    stype::MEMORY_REQUIREMENTS_2,
    MemoryRequirements2Ext,
    next
);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageMemoryRequirementsInfo2 {
    pub next: Chain<NoExtensions>,
    pub image: ImageHandle,
}

impl WireCodec for ImageMemoryRequirementsInfo2 {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_handle(&self.image);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.image = dec.decode_handle_lookup();
    }

    fn replace_self(&mut self, replacer: &mut Replacer<'_>) {
        replacer.replace(&mut self.image);
    }
}

impl_extensible!(
    ImageMemoryRequirementsInfo2,
    stype::IMAGE_MEMORY_REQUIREMENTS_INFO_2,
    NoExtensions,
    next
);
