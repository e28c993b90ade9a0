//! Semaphore and barrier structures.

use vkwire_cs::{impl_extensible, Chain, Decoder, Encoder, NoExtensions, WireCodec};

use crate::types::{stype, AccessFlags2, PipelineStageFlags2, SemaphoreType};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SemaphoreTypeCreateInfo {
    pub next: Chain<NoExtensions>,
    pub semaphore_type: SemaphoreType,
    pub initial_value: u64,
}

impl WireCodec for SemaphoreTypeCreateInfo {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.semaphore_type);
        enc.encode_scalar(self.initial_value);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.semaphore_type = dec.decode_scalar();
        self.initial_value = dec.decode_scalar();
    }
}

impl_extensible!(
    SemaphoreTypeCreateInfo,
    stype::SEMAPHORE_TYPE_CREATE_INFO,
    NoExtensions,
    next
);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryBarrier2 {
    pub next: Chain<NoExtensions>,
    pub src_stage_mask: PipelineStageFlags2,
    pub src_access_mask: AccessFlags2,
    pub dst_stage_mask: PipelineStageFlags2,
    pub dst_access_mask: AccessFlags2,
}

impl WireCodec for MemoryBarrier2 {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.src_stage_mask);
        enc.encode_scalar(self.src_access_mask);
        enc.encode_scalar(self.dst_stage_mask);
        enc.encode_scalar(self.dst_access_mask);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.src_stage_mask = dec.decode_scalar();
        self.src_access_mask = dec.decode_scalar();
        self.dst_stage_mask = dec.decode_scalar();
        self.dst_access_mask = dec.decode_scalar();
    }
}

impl_extensible!(MemoryBarrier2, stype::MEMORY_BARRIER_2, NoExtensions, next);
