//! Structures and commands of the remoted graphics API, encoded with `vkwire-cs`.
//!
//! The schema here is a sample: enough structures to cover every wire shape the codec knows
//! (scalars, fixed and variable arrays, blobs, handles, unions, extension chains two deep,
//! output structures decoded partially) and a handful of commands that use them.

mod basic;
mod commands;
mod descriptor;
mod handles;
mod image;
mod memory;
mod properties;
mod shader;
mod sync;
pub mod types;

pub use crate::basic::{
    ClearColorValue, ComponentMapping, Extent2D, Extent3D, ImageSubresource,
    ImageSubresourceRange, Offset2D, Offset3D, Rect2D, Viewport,
};
pub use crate::commands::{
    encode_command, CmdSetViewportArgs, Command, CommandArgs, CommandHeader, CommandType,
    CreateImageArgs, CreateImageViewArgs, CreateShaderModuleArgs,
    GetImageMemoryRequirements2Args, UpdateDescriptorSetsArgs,
};
pub use crate::descriptor::{
    DescriptorBufferInfo, DescriptorImageInfo, MutableDescriptorTypeCreateInfoEXT,
    MutableDescriptorTypeListEXT, WriteDescriptorSet, WriteDescriptorSetExt,
    WriteDescriptorSetInlineUniformBlock,
};
pub use crate::handles::{
    BufferHandle, BufferViewHandle, CommandBufferHandle, DescriptorSetHandle, DeviceHandle,
    ImageHandle, ImageViewHandle, SamplerHandle, SamplerYcbcrConversionHandle,
    ShaderModuleHandle,
};
pub use crate::image::{
    ImageCreateInfo, ImageCreateInfoExt, ImageFormatListCreateInfo, ImageStencilUsageCreateInfo,
    ImageViewCreateInfo, ImageViewCreateInfoExt, ImageViewUsageCreateInfo,
    SamplerYcbcrConversionInfo,
};
pub use crate::memory::{
    ImageMemoryRequirementsInfo2, MemoryDedicatedRequirements, MemoryRequirements,
    MemoryRequirements2, MemoryRequirements2Ext,
};
pub use crate::properties::{ExtensionProperties, LayerProperties, SparseImageFormatProperties};
pub use crate::shader::ShaderModuleCreateInfo;
pub use crate::sync::{MemoryBarrier2, SemaphoreTypeCreateInfo};
pub use crate::types::{
    describe_structure_type, stype, AccessFlags2, CommandFlags, ComponentSwizzle,
    DescriptorType, DeviceSize, Format, ImageAspectFlags, ImageLayout, ImageTiling, ImageType,
    ImageUsageFlags, ImageViewType, PipelineStageFlags2, ResultCode, SampleCountFlags,
    SemaphoreType, SharingMode, SparseImageFormatFlags, MAX_DESCRIPTION_SIZE,
    MAX_EXTENSION_NAME_SIZE,
};
