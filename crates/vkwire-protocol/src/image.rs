//! Image and image view creation.

use vkwire_cs::{
    extension_chain, impl_extensible, Chain, Decoder, Encoder, NoExtensions, Replacer, WireCodec,
};

use crate::basic::{ComponentMapping, Extent3D, ImageSubresourceRange};
use crate::handles::{ImageHandle, SamplerYcbcrConversionHandle};
use crate::types::{
    stype, Format, ImageLayout, ImageTiling, ImageType, ImageUsageFlags, ImageViewType,
    SampleCountFlags, SharingMode,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageFormatListCreateInfo {
    pub next: Chain<NoExtensions>,
    pub view_format_count: u32,
    pub view_formats: Option<Vec<Format>>,
}

impl WireCodec for ImageFormatListCreateInfo {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.view_format_count);
        enc.encode_scalar_array(self.view_formats.as_deref());
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.view_format_count = dec.decode_scalar();
        self.view_formats = dec.decode_scalar_array(self.view_format_count as usize);
    }
}

impl_extensible!(
    ImageFormatListCreateInfo,
    stype::IMAGE_FORMAT_LIST_CREATE_INFO,
    NoExtensions,
    next
);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageStencilUsageCreateInfo {
    pub next: Chain<NoExtensions>,
    pub stencil_usage: ImageUsageFlags,
}

impl WireCodec for ImageStencilUsageCreateInfo {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.stencil_usage);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.stencil_usage = dec.decode_scalar();
    }
}

impl_extensible!(
    ImageStencilUsageCreateInfo,
    stype::IMAGE_STENCIL_USAGE_CREATE_INFO,
    NoExtensions,
    next
);

extension_chain! {
    pub enum ImageCreateInfoExt for "ImageCreateInfo" {
        FormatList(ImageFormatListCreateInfo),
        StencilUsage(ImageStencilUsageCreateInfo),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageCreateInfo {
    pub next: Chain<ImageCreateInfoExt>,
    pub flags: u32,
    pub image_type: ImageType,
    pub format: Format,
    pub extent: Extent3D,
    pub mip_levels: u32,
    pub array_layers: u32,
    pub samples: SampleCountFlags,
    pub tiling: ImageTiling,
    pub usage: ImageUsageFlags,
    pub sharing_mode: SharingMode,
    pub queue_family_index_count: u32,
    pub queue_family_indices: Option<Vec<u32>>,
    pub initial_layout: ImageLayout,
}

impl WireCodec for ImageCreateInfo {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.flags);
        enc.encode_scalar(self.image_type);
        enc.encode_scalar(self.format);
        enc.encode_struct(&self.extent);
        enc.encode_scalar(self.mip_levels);
        enc.encode_scalar(self.array_layers);
        enc.encode_scalar(self.samples);
        enc.encode_scalar(self.tiling);
        enc.encode_scalar(self.usage);
        enc.encode_scalar(self.sharing_mode);
        enc.encode_scalar(self.queue_family_index_count);
        enc.encode_scalar_array(self.queue_family_indices.as_deref());
        enc.encode_scalar(self.initial_layout);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.flags = dec.decode_scalar();
        self.image_type = dec.decode_scalar();
        self.format = dec.decode_scalar();
        self.extent = dec.decode_struct_temp();
        self.mip_levels = dec.decode_scalar();
        self.array_layers = dec.decode_scalar();
        self.samples = dec.decode_scalar();
        self.tiling = dec.decode_scalar();
        self.usage = dec.decode_scalar();
        self.sharing_mode = dec.decode_scalar();
        self.queue_family_index_count = dec.decode_scalar();
        self.queue_family_indices =
            dec.decode_scalar_array(self.queue_family_index_count as usize);
        self.initial_layout = dec.decode_scalar();
    }
}

impl_extensible!(
    ImageCreateInfo,
    stype::IMAGE_CREATE_INFO,
    ImageCreateInfoExt,
    next
);

/// Attaches a Y'CbCr conversion to an image view or sampler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplerYcbcrConversionInfo {
    pub next: Chain<NoExtensions>,
    /// Resolved by the replace pass, not at decode time.
    pub conversion: SamplerYcbcrConversionHandle,
}

impl WireCodec for SamplerYcbcrConversionInfo {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_handle(&self.conversion);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.conversion = dec.decode_handle();
    }

    fn replace_self(&mut self, replacer: &mut Replacer<'_>) {
        replacer.replace(&mut self.conversion);
    }
}

impl_extensible!(
    SamplerYcbcrConversionInfo,
    stype::SAMPLER_YCBCR_CONVERSION_INFO,
    NoExtensions,
    next
);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageViewUsageCreateInfo {
    pub next: Chain<NoExtensions>,
    pub usage: ImageUsageFlags,
}

impl WireCodec for ImageViewUsageCreateInfo {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.usage);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.usage = dec.decode_scalar();
    }
}

impl_extensible!(
    ImageViewUsageCreateInfo,
    stype::IMAGE_VIEW_USAGE_CREATE_INFO,
    NoExtensions,
    next
);

extension_chain! {
    pub enum ImageViewCreateInfoExt for "ImageViewCreateInfo" {
        YcbcrConversion(SamplerYcbcrConversionInfo),
        Usage(ImageViewUsageCreateInfo),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageViewCreateInfo {
    pub next: Chain<ImageViewCreateInfoExt>,
    pub flags: u32,
    pub image: ImageHandle,
    pub view_type: ImageViewType,
    pub format: Format,
    pub components: ComponentMapping,
    pub subresource_range: ImageSubresourceRange,
}

impl ImageViewCreateInfo {
    pub fn ycbcr_conversion(&self) -> Option<&SamplerYcbcrConversionInfo> {
        self.next.records().find_map(|record| match record {
            ImageViewCreateInfoExt::YcbcrConversion(info) => Some(info),
            _ => None,
        })
    }
}

impl WireCodec for ImageViewCreateInfo {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.flags);
        enc.encode_handle(&self.image);
        enc.encode_scalar(self.view_type);
        enc.encode_scalar(self.format);
        enc.encode_struct(&self.components);
        enc.encode_struct(&self.subresource_range);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.flags = dec.decode_scalar();
        self.image = dec.decode_handle_lookup();
        self.view_type = dec.decode_scalar();
        self.format = dec.decode_scalar();
        self.components = dec.decode_struct_temp();
        self.subresource_range = dec.decode_struct_temp();
    }

    fn replace_self(&mut self, replacer: &mut Replacer<'_>) {
        replacer.replace(&mut self.image);
    }
}

impl_extensible!(
    ImageViewCreateInfo,
    stype::IMAGE_VIEW_CREATE_INFO,
    ImageViewCreateInfoExt,
    next
);
