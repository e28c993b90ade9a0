//! Handle types of the sampled schema.

use vkwire_cs::{kind, Handle};

pub type DeviceHandle = Handle<kind::Device>;
pub type CommandBufferHandle = Handle<kind::CommandBuffer>;
pub type BufferHandle = Handle<kind::Buffer>;
pub type BufferViewHandle = Handle<kind::BufferView>;
pub type ImageHandle = Handle<kind::Image>;
pub type ImageViewHandle = Handle<kind::ImageView>;
pub type SamplerHandle = Handle<kind::Sampler>;
pub type SamplerYcbcrConversionHandle = Handle<kind::SamplerYcbcrConversion>;
pub type DescriptorSetHandle = Handle<kind::DescriptorSet>;
pub type ShaderModuleHandle = Handle<kind::ShaderModule>;
