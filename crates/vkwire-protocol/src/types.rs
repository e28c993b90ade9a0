//! Enumerations, flag words and structure-type tags used by the sampled schema.
//!
//! Enumerations are open newtypes: values outside the named constants are carried through
//! unchanged. Flag words are `bitflags` types decoded with `from_bits_retain`, so unknown bits
//! survive a round trip.

use bitflags::bitflags;
use vkwire_cs::{wire_enum, StructureType, WireScalar};

/// Structure-type tags.
pub mod stype {
    use vkwire_cs::StructureType;

    pub const IMAGE_CREATE_INFO: StructureType = StructureType(14);
    pub const IMAGE_VIEW_CREATE_INFO: StructureType = StructureType(15);
    pub const SHADER_MODULE_CREATE_INFO: StructureType = StructureType(16);
    pub const WRITE_DESCRIPTOR_SET: StructureType = StructureType(35);
    pub const IMAGE_VIEW_USAGE_CREATE_INFO: StructureType = StructureType(1000117002);
    pub const MEMORY_DEDICATED_REQUIREMENTS: StructureType = StructureType(1000127000);
    pub const WRITE_DESCRIPTOR_SET_INLINE_UNIFORM_BLOCK: StructureType = StructureType(1000138002);
    pub const IMAGE_MEMORY_REQUIREMENTS_INFO_2: StructureType = StructureType(1000146001);
    pub const MEMORY_REQUIREMENTS_2: StructureType = StructureType(1000146003);
    pub const IMAGE_FORMAT_LIST_CREATE_INFO: StructureType = StructureType(1000147000);
    pub const SAMPLER_YCBCR_CONVERSION_INFO: StructureType = StructureType(1000156001);
    pub const SEMAPHORE_TYPE_CREATE_INFO: StructureType = StructureType(1000207002);
    pub const IMAGE_STENCIL_USAGE_CREATE_INFO: StructureType = StructureType(1000246000);
    pub const MEMORY_BARRIER_2: StructureType = StructureType(1000314000);
    pub const MUTABLE_DESCRIPTOR_TYPE_CREATE_INFO_EXT: StructureType = StructureType(1000351002);

    pub fn name(stype: StructureType) -> Option<&'static str> {
        match stype {
            IMAGE_CREATE_INFO => Some("IMAGE_CREATE_INFO"),
            IMAGE_VIEW_CREATE_INFO => Some("IMAGE_VIEW_CREATE_INFO"),
            SHADER_MODULE_CREATE_INFO => Some("SHADER_MODULE_CREATE_INFO"),
            WRITE_DESCRIPTOR_SET => Some("WRITE_DESCRIPTOR_SET"),
            IMAGE_VIEW_USAGE_CREATE_INFO => Some("IMAGE_VIEW_USAGE_CREATE_INFO"),
            MEMORY_DEDICATED_REQUIREMENTS => Some("MEMORY_DEDICATED_REQUIREMENTS"),
            WRITE_DESCRIPTOR_SET_INLINE_UNIFORM_BLOCK => {
                Some("WRITE_DESCRIPTOR_SET_INLINE_UNIFORM_BLOCK")
            }
            IMAGE_MEMORY_REQUIREMENTS_INFO_2 => Some("IMAGE_MEMORY_REQUIREMENTS_INFO_2"),
            MEMORY_REQUIREMENTS_2 => Some("MEMORY_REQUIREMENTS_2"),
            IMAGE_FORMAT_LIST_CREATE_INFO => Some("IMAGE_FORMAT_LIST_CREATE_INFO"),
            SAMPLER_YCBCR_CONVERSION_INFO => Some("SAMPLER_YCBCR_CONVERSION_INFO"),
            SEMAPHORE_TYPE_CREATE_INFO => Some("SEMAPHORE_TYPE_CREATE_INFO"),
            IMAGE_STENCIL_USAGE_CREATE_INFO => Some("IMAGE_STENCIL_USAGE_CREATE_INFO"),
            MEMORY_BARRIER_2 => Some("MEMORY_BARRIER_2"),
            MUTABLE_DESCRIPTOR_TYPE_CREATE_INFO_EXT => {
                Some("MUTABLE_DESCRIPTOR_TYPE_CREATE_INFO_EXT")
            }
            _ => None,
        }
    }
}

/// Size of the fixed character arrays in [`crate::ExtensionProperties`].
pub const MAX_EXTENSION_NAME_SIZE: usize = 256;
/// Size of the description array in [`crate::LayerProperties`].
pub const MAX_DESCRIPTION_SIZE: usize = 256;

/// 64-bit byte size or offset.
pub type DeviceSize = u64;

wire_enum! {
    /// Status returned by commands that produce a reply.
    pub struct ResultCode(i32) {
        SUCCESS = 0,
        NOT_READY = 1,
        INCOMPLETE = 5,
        ERROR_OUT_OF_HOST_MEMORY = -1,
        ERROR_OUT_OF_DEVICE_MEMORY = -2,
        ERROR_INITIALIZATION_FAILED = -3,
        ERROR_FORMAT_NOT_SUPPORTED = -11,
    }
}

wire_enum! {
    pub struct Format(u32) {
        UNDEFINED = 0,
        R8G8B8A8_UNORM = 37,
        R8G8B8A8_SRGB = 43,
        B8G8R8A8_UNORM = 44,
        R32_SFLOAT = 100,
        R32G32B32A32_SFLOAT = 109,
        D32_SFLOAT = 126,
        D24_UNORM_S8_UINT = 129,
        G8_B8R8_2PLANE_420_UNORM = 1000156003,
    }
}

wire_enum! {
    pub struct ImageType(u32) {
        TYPE_1D = 0,
        TYPE_2D = 1,
        TYPE_3D = 2,
    }
}

wire_enum! {
    pub struct ImageViewType(u32) {
        TYPE_1D = 0,
        TYPE_2D = 1,
        TYPE_3D = 2,
        CUBE = 3,
        TYPE_1D_ARRAY = 4,
        TYPE_2D_ARRAY = 5,
        CUBE_ARRAY = 6,
    }
}

wire_enum! {
    pub struct ImageTiling(u32) {
        OPTIMAL = 0,
        LINEAR = 1,
    }
}

wire_enum! {
    pub struct ImageLayout(u32) {
        UNDEFINED = 0,
        GENERAL = 1,
        COLOR_ATTACHMENT_OPTIMAL = 2,
        DEPTH_STENCIL_ATTACHMENT_OPTIMAL = 3,
        SHADER_READ_ONLY_OPTIMAL = 5,
        TRANSFER_SRC_OPTIMAL = 6,
        TRANSFER_DST_OPTIMAL = 7,
        PREINITIALIZED = 8,
    }
}

wire_enum! {
    pub struct SharingMode(u32) {
        EXCLUSIVE = 0,
        CONCURRENT = 1,
    }
}

wire_enum! {
    pub struct ComponentSwizzle(u32) {
        IDENTITY = 0,
        ZERO = 1,
        ONE = 2,
        R = 3,
        G = 4,
        B = 5,
        A = 6,
    }
}

wire_enum! {
    pub struct DescriptorType(u32) {
        SAMPLER = 0,
        COMBINED_IMAGE_SAMPLER = 1,
        SAMPLED_IMAGE = 2,
        STORAGE_IMAGE = 3,
        UNIFORM_TEXEL_BUFFER = 4,
        STORAGE_TEXEL_BUFFER = 5,
        UNIFORM_BUFFER = 6,
        STORAGE_BUFFER = 7,
        UNIFORM_BUFFER_DYNAMIC = 8,
        STORAGE_BUFFER_DYNAMIC = 9,
        INPUT_ATTACHMENT = 10,
        INLINE_UNIFORM_BLOCK = 1000138000,
        MUTABLE_EXT = 1000351000,
    }
}

wire_enum! {
    pub struct SemaphoreType(u32) {
        BINARY = 0,
        TIMELINE = 1,
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct ImageUsageFlags: u32 {
        const TRANSFER_SRC = 0x1;
        const TRANSFER_DST = 0x2;
        const SAMPLED = 0x4;
        const STORAGE = 0x8;
        const COLOR_ATTACHMENT = 0x10;
        const DEPTH_STENCIL_ATTACHMENT = 0x20;
        const TRANSIENT_ATTACHMENT = 0x40;
        const INPUT_ATTACHMENT = 0x80;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct ImageAspectFlags: u32 {
        const COLOR = 0x1;
        const DEPTH = 0x2;
        const STENCIL = 0x4;
        const METADATA = 0x8;
        const PLANE_0 = 0x10;
        const PLANE_1 = 0x20;
        const PLANE_2 = 0x40;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct SampleCountFlags: u32 {
        const TYPE_1 = 0x1;
        const TYPE_2 = 0x2;
        const TYPE_4 = 0x4;
        const TYPE_8 = 0x8;
        const TYPE_16 = 0x10;
        const TYPE_32 = 0x20;
        const TYPE_64 = 0x40;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct SparseImageFormatFlags: u32 {
        const SINGLE_MIPTAIL = 0x1;
        const ALIGNED_MIP_SIZE = 0x2;
        const NONSTANDARD_BLOCK_SIZE = 0x4;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct PipelineStageFlags2: u64 {
        const TOP_OF_PIPE = 0x1;
        const VERTEX_SHADER = 0x8;
        const FRAGMENT_SHADER = 0x80;
        const COLOR_ATTACHMENT_OUTPUT = 0x400;
        const COMPUTE_SHADER = 0x800;
        const ALL_TRANSFER = 0x1000;
        const BOTTOM_OF_PIPE = 0x2000;
        const ALL_COMMANDS = 0x10000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct AccessFlags2: u64 {
        const UNIFORM_READ = 0x8;
        const SHADER_READ = 0x20;
        const SHADER_WRITE = 0x40;
        const COLOR_ATTACHMENT_WRITE = 0x100;
        const TRANSFER_READ = 0x800;
        const TRANSFER_WRITE = 0x1000;
        const MEMORY_READ = 0x8000;
        const MEMORY_WRITE = 0x10000;
    }
}

bitflags! {
    /// Flags in a command header.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct CommandFlags: u32 {
        /// The client waits for a reply to this command.
        const GENERATE_REPLY = 0x1;
    }
}

macro_rules! impl_wire_flags {
    ($($ty:ty => $bits:ty),* $(,)?) => {
        $(
            impl WireScalar for $ty {
                const SIZE: usize = <$bits as WireScalar>::SIZE;

                fn write_le(self, out: &mut [u8]) {
                    self.bits().write_le(out);
                }

                fn read_le(bytes: &[u8]) -> Self {
                    <$ty>::from_bits_retain(<$bits>::read_le(bytes))
                }
            }
        )*
    };
}

impl_wire_flags!(
    ImageUsageFlags => u32,
    ImageAspectFlags => u32,
    SampleCountFlags => u32,
    SparseImageFormatFlags => u32,
    PipelineStageFlags2 => u64,
    AccessFlags2 => u64,
    CommandFlags => u32,
);

/// Human-readable name of a structure type, falling back to its number.
pub fn describe_structure_type(stype: StructureType) -> String {
    match stype::name(stype) {
        Some(name) => name.to_string(),
        None => stype.to_string(),
    }
}
