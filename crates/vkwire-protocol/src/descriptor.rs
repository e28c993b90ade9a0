//! Descriptor set updates and mutable descriptor type lists.

use vkwire_cs::{
    extension_chain, impl_extensible, Chain, Decoder, Encoder, NoExtensions, Replacer, WireCodec,
};

use crate::handles::{
    BufferHandle, BufferViewHandle, DescriptorSetHandle, ImageViewHandle, SamplerHandle,
};
use crate::types::{stype, DescriptorType, DeviceSize, ImageLayout};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DescriptorImageInfo {
    pub sampler: SamplerHandle,
    pub image_view: ImageViewHandle,
    pub image_layout: ImageLayout,
}

impl WireCodec for DescriptorImageInfo {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_handle(&self.sampler);
        enc.encode_handle(&self.image_view);
        enc.encode_scalar(self.image_layout);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.sampler = dec.decode_handle_lookup();
        self.image_view = dec.decode_handle_lookup();
        self.image_layout = dec.decode_scalar();
    }

    fn replace_self(&mut self, replacer: &mut Replacer<'_>) {
        replacer.replace(&mut self.sampler);
        replacer.replace(&mut self.image_view);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DescriptorBufferInfo {
    pub buffer: BufferHandle,
    pub offset: DeviceSize,
    pub range: DeviceSize,
}

impl WireCodec for DescriptorBufferInfo {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_handle(&self.buffer);
        enc.encode_scalar(self.offset);
        enc.encode_scalar(self.range);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.buffer = dec.decode_handle_lookup();
        self.offset = dec.decode_scalar();
        self.range = dec.decode_scalar();
    }

    fn replace_self(&mut self, replacer: &mut Replacer<'_>) {
        replacer.replace(&mut self.buffer);
    }
}

/// Inline uniform data written in place of descriptor infos.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteDescriptorSetInlineUniformBlock {
    pub next: Chain<NoExtensions>,
    pub data_size: u32,
    pub data: Option<Vec<u8>>,
}

impl WireCodec for WriteDescriptorSetInlineUniformBlock {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.data_size);
        enc.encode_blob(self.data.as_deref());
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.data_size = dec.decode_scalar();
        self.data = dec.decode_blob(self.data_size as usize);
    }
}

impl_extensible!(
    WriteDescriptorSetInlineUniformBlock,
    stype::WRITE_DESCRIPTOR_SET_INLINE_UNIFORM_BLOCK,
    NoExtensions,
    next
);

extension_chain! {
    pub enum WriteDescriptorSetExt for "WriteDescriptorSet" {
        InlineUniformBlock(WriteDescriptorSetInlineUniformBlock),
    }
}

/// One descriptor update. Exactly one of the three info arrays is used, selected by
/// `descriptor_type`; the others travel as absent arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteDescriptorSet {
    pub next: Chain<WriteDescriptorSetExt>,
    /// Resolved by the replace pass, not at decode time.
    pub dst_set: DescriptorSetHandle,
    pub dst_binding: u32,
    pub dst_array_element: u32,
    pub descriptor_count: u32,
    pub descriptor_type: DescriptorType,
    pub image_info: Option<Vec<DescriptorImageInfo>>,
    pub buffer_info: Option<Vec<DescriptorBufferInfo>>,
    pub texel_buffer_view: Option<Vec<BufferViewHandle>>,
}

impl WireCodec for WriteDescriptorSet {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_handle(&self.dst_set);
        enc.encode_scalar(self.dst_binding);
        enc.encode_scalar(self.dst_array_element);
        enc.encode_scalar(self.descriptor_count);
        enc.encode_scalar(self.descriptor_type);
        enc.encode_array_var(self.image_info.as_deref(), |enc, info| enc.encode_struct(info));
        enc.encode_array_var(self.buffer_info.as_deref(), |enc, info| enc.encode_struct(info));
        enc.encode_array_var(self.texel_buffer_view.as_deref(), |enc, view| {
            enc.encode_handle(view)
        });
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.dst_set = dec.decode_handle();
        self.dst_binding = dec.decode_scalar();
        self.dst_array_element = dec.decode_scalar();
        self.descriptor_count = dec.decode_scalar();
        self.descriptor_type = dec.decode_scalar();

        let count = self.descriptor_count as usize;
        self.image_info = dec.decode_array_var(count, |dec| dec.decode_struct_temp());
        self.buffer_info = dec.decode_array_var(count, |dec| dec.decode_struct_temp());
        self.texel_buffer_view = dec.decode_array_var(count, |dec| dec.decode_handle_lookup());
    }

    fn replace_self(&mut self, replacer: &mut Replacer<'_>) {
        replacer.replace(&mut self.dst_set);
        replacer.replace_array(self.image_info.as_deref_mut(), |r, info| r.replace_struct(info));
        replacer.replace_array(self.buffer_info.as_deref_mut(), |r, info| r.replace_struct(info));
        replacer.replace_array(self.texel_buffer_view.as_deref_mut(), |r, view| r.replace(view));
    }
}

impl_extensible!(
    WriteDescriptorSet,
    stype::WRITE_DESCRIPTOR_SET,
    WriteDescriptorSetExt,
    next
);

impl WriteDescriptorSet {
    pub fn inline_uniform_block(&self) -> Option<&WriteDescriptorSetInlineUniformBlock> {
        self.next.records().find_map(|record| match record {
            WriteDescriptorSetExt::InlineUniformBlock(block) => Some(block),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutableDescriptorTypeListEXT {
    pub descriptor_type_count: u32,
    pub descriptor_types: Option<Vec<DescriptorType>>,
}

impl WireCodec for MutableDescriptorTypeListEXT {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.descriptor_type_count);
        enc.encode_scalar_array(self.descriptor_types.as_deref());
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.descriptor_type_count = dec.decode_scalar();
        self.descriptor_types = dec.decode_scalar_array(self.descriptor_type_count as usize);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutableDescriptorTypeCreateInfoEXT {
    pub next: Chain<NoExtensions>,
    pub mutable_descriptor_type_list_count: u32,
    pub mutable_descriptor_type_lists: Option<Vec<MutableDescriptorTypeListEXT>>,
}

impl WireCodec for MutableDescriptorTypeCreateInfoEXT {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.mutable_descriptor_type_list_count);
        enc.encode_array_var(self.mutable_descriptor_type_lists.as_deref(), |enc, list| {
            enc.encode_struct(list)
        });
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.mutable_descriptor_type_list_count = dec.decode_scalar();
        self.mutable_descriptor_type_lists = dec.decode_array_var(
            self.mutable_descriptor_type_list_count as usize,
            |dec| dec.decode_struct_temp(),
        );
    }
}

impl_extensible!(
    MutableDescriptorTypeCreateInfoEXT,
    stype::MUTABLE_DESCRIPTOR_TYPE_CREATE_INFO_EXT,
    NoExtensions,
    next
);
