//! Command headers, argument blocks and replies.
//!
//! A command is a [`CommandHeader`] followed by its argument block. Input handles are resolved
//! at decode time except where a structure defers them to the replace pass. Handles of objects
//! being created are ids chosen by the client; they stay in wire form and are never replaced.
//!
//! A reply starts with the command type. Commands returning a status follow it with an `i32`
//! [`ResultCode`]; outputs come last.

use vkwire_cs::{wire_enum, Decoder, Encoder, Replacer, WireCodec};

use crate::basic::Viewport;
use crate::descriptor::WriteDescriptorSet;
use crate::handles::{CommandBufferHandle, DeviceHandle, ImageHandle, ImageViewHandle, ShaderModuleHandle};
use crate::image::{ImageCreateInfo, ImageViewCreateInfo};
use crate::memory::{ImageMemoryRequirementsInfo2, MemoryRequirements2};
use crate::shader::ShaderModuleCreateInfo;
use crate::types::{CommandFlags, ResultCode};

wire_enum! {
    pub struct CommandType(u32) {
        CREATE_IMAGE = 1,
        CREATE_IMAGE_VIEW = 2,
        CREATE_SHADER_MODULE = 3,
        UPDATE_DESCRIPTOR_SETS = 4,
        GET_IMAGE_MEMORY_REQUIREMENTS_2 = 5,
        CMD_SET_VIEWPORT = 6,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandHeader {
    pub command_type: CommandType,
    pub flags: CommandFlags,
}

impl CommandHeader {
    pub fn generates_reply(&self) -> bool {
        self.flags.contains(CommandFlags::GENERATE_REPLY)
    }
}

impl WireCodec for CommandHeader {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.command_type);
        enc.encode_scalar(self.flags);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.command_type = dec.decode_scalar();
        self.flags = dec.decode_scalar();
    }
}

/// Argument block of one command type.
pub trait CommandArgs: WireCodec {
    const COMMAND_TYPE: CommandType;

    /// Encode the reply: command type, status when the command returns one, then outputs.
    fn encode_reply(&self, enc: &mut Encoder, result: ResultCode);
}

/// `vkCreate*` commands: device, required create info, and the id of the new object.
macro_rules! create_command {
    (
        $(#[$meta:meta])*
        $name:ident, $command:ident, $info:ty, $object:ident: $handle:ty
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            pub device: DeviceHandle,
            pub create_info: $info,
            pub $object: $handle,
        }

        impl WireCodec for $name {
            fn encode_self(&self, enc: &mut Encoder) {
                enc.encode_handle(&self.device);
                enc.encode_simple_pointer(true);
                enc.encode_extensible(&self.create_info);
                enc.encode_simple_pointer(true);
                enc.encode_handle(&self.$object);
            }

            fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
                self.device = dec.decode_handle_lookup();
                self.create_info = dec.decode_required(|dec| dec.decode_extensible_temp());
                self.$object = dec.decode_required(|dec| dec.decode_handle());
            }

            fn replace_self(&mut self, replacer: &mut Replacer<'_>) {
                replacer.replace(&mut self.device);
                replacer.replace_extensible(&mut self.create_info);
            }
        }

        impl CommandArgs for $name {
            const COMMAND_TYPE: CommandType = CommandType::$command;

            fn encode_reply(&self, enc: &mut Encoder, result: ResultCode) {
                enc.encode_scalar(Self::COMMAND_TYPE);
                enc.encode_scalar(result);
                enc.encode_simple_pointer(true);
                enc.encode_handle(&self.$object);
            }
        }
    };
}

create_command!(CreateImageArgs, CREATE_IMAGE, ImageCreateInfo, image: ImageHandle);
create_command!(
    CreateImageViewArgs,
    CREATE_IMAGE_VIEW,
    ImageViewCreateInfo,
    view: ImageViewHandle
);
create_command!(
    CreateShaderModuleArgs,
    CREATE_SHADER_MODULE,
    ShaderModuleCreateInfo,
    shader_module: ShaderModuleHandle
);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateDescriptorSetsArgs {
    pub device: DeviceHandle,
    pub descriptor_write_count: u32,
    pub descriptor_writes: Option<Vec<WriteDescriptorSet>>,
}

impl WireCodec for UpdateDescriptorSetsArgs {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_handle(&self.device);
        enc.encode_scalar(self.descriptor_write_count);
        enc.encode_array_var(self.descriptor_writes.as_deref(), |enc, write| {
            enc.encode_extensible(write)
        });
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.device = dec.decode_handle_lookup();
        self.descriptor_write_count = dec.decode_scalar();
        self.descriptor_writes = dec.decode_array_var(self.descriptor_write_count as usize, |dec| {
            dec.decode_extensible_temp()
        });
    }

    fn replace_self(&mut self, replacer: &mut Replacer<'_>) {
        replacer.replace(&mut self.device);
        replacer.replace_array(self.descriptor_writes.as_deref_mut(), |r, write| {
            r.replace_extensible(write)
        });
    }
}

impl CommandArgs for UpdateDescriptorSetsArgs {
    const COMMAND_TYPE: CommandType = CommandType::UPDATE_DESCRIPTOR_SETS;

    fn encode_reply(&self, enc: &mut Encoder, _result: ResultCode) {
        enc.encode_scalar(Self::COMMAND_TYPE);
    }
}

/// The requirements block is an output: it is decoded partially so only the chain shape the
/// client asked for survives, and the handler fills it in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetImageMemoryRequirements2Args {
    pub device: DeviceHandle,
    pub info: ImageMemoryRequirementsInfo2,
    pub memory_requirements: MemoryRequirements2,
}

impl WireCodec for GetImageMemoryRequirements2Args {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_handle(&self.device);
        enc.encode_simple_pointer(true);
        enc.encode_extensible(&self.info);
        enc.encode_simple_pointer(true);
        enc.encode_extensible(&self.memory_requirements);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.device = dec.decode_handle_lookup();
        self.info = dec.decode_required(|dec| dec.decode_extensible_temp());
        self.memory_requirements = dec.decode_required(|dec| dec.decode_extensible_partial());
    }

    fn replace_self(&mut self, replacer: &mut Replacer<'_>) {
        replacer.replace(&mut self.device);
        replacer.replace_extensible(&mut self.info);
    }
}

impl CommandArgs for GetImageMemoryRequirements2Args {
    const COMMAND_TYPE: CommandType = CommandType::GET_IMAGE_MEMORY_REQUIREMENTS_2;

    fn encode_reply(&self, enc: &mut Encoder, _result: ResultCode) {
        enc.encode_scalar(Self::COMMAND_TYPE);
        enc.encode_simple_pointer(true);
        enc.encode_extensible(&self.memory_requirements);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CmdSetViewportArgs {
    pub command_buffer: CommandBufferHandle,
    pub first_viewport: u32,
    pub viewport_count: u32,
    pub viewports: Option<Vec<Viewport>>,
}

impl WireCodec for CmdSetViewportArgs {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_handle(&self.command_buffer);
        enc.encode_scalar(self.first_viewport);
        enc.encode_scalar(self.viewport_count);
        enc.encode_array_var(self.viewports.as_deref(), |enc, viewport| {
            enc.encode_struct(viewport)
        });
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.command_buffer = dec.decode_handle_lookup();
        self.first_viewport = dec.decode_scalar();
        self.viewport_count = dec.decode_scalar();
        self.viewports =
            dec.decode_array_var(self.viewport_count as usize, |dec| dec.decode_struct_temp());
    }

    fn replace_self(&mut self, replacer: &mut Replacer<'_>) {
        replacer.replace(&mut self.command_buffer);
    }
}

impl CommandArgs for CmdSetViewportArgs {
    const COMMAND_TYPE: CommandType = CommandType::CMD_SET_VIEWPORT;

    fn encode_reply(&self, enc: &mut Encoder, _result: ResultCode) {
        enc.encode_scalar(Self::COMMAND_TYPE);
    }
}

/// A decoded command of any supported type.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateImage(CreateImageArgs),
    CreateImageView(CreateImageViewArgs),
    CreateShaderModule(CreateShaderModuleArgs),
    UpdateDescriptorSets(UpdateDescriptorSetsArgs),
    GetImageMemoryRequirements2(GetImageMemoryRequirements2Args),
    CmdSetViewport(CmdSetViewportArgs),
}

impl Command {
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::CreateImage(_) => CreateImageArgs::COMMAND_TYPE,
            Command::CreateImageView(_) => CreateImageViewArgs::COMMAND_TYPE,
            Command::CreateShaderModule(_) => CreateShaderModuleArgs::COMMAND_TYPE,
            Command::UpdateDescriptorSets(_) => UpdateDescriptorSetsArgs::COMMAND_TYPE,
            Command::GetImageMemoryRequirements2(_) => {
                GetImageMemoryRequirements2Args::COMMAND_TYPE
            }
            Command::CmdSetViewport(_) => CmdSetViewportArgs::COMMAND_TYPE,
        }
    }

    /// Decode the argument block following a header. Returns `None` for an unsupported type.
    pub fn decode_temp(command_type: CommandType, dec: &mut Decoder<'_>) -> Option<Command> {
        let command = match command_type {
            CommandType::CREATE_IMAGE => Command::CreateImage(dec.decode_struct_temp()),
            CommandType::CREATE_IMAGE_VIEW => Command::CreateImageView(dec.decode_struct_temp()),
            CommandType::CREATE_SHADER_MODULE => {
                Command::CreateShaderModule(dec.decode_struct_temp())
            }
            CommandType::UPDATE_DESCRIPTOR_SETS => {
                Command::UpdateDescriptorSets(dec.decode_struct_temp())
            }
            CommandType::GET_IMAGE_MEMORY_REQUIREMENTS_2 => {
                Command::GetImageMemoryRequirements2(dec.decode_struct_temp())
            }
            CommandType::CMD_SET_VIEWPORT => Command::CmdSetViewport(dec.decode_struct_temp()),
            _ => return None,
        };
        Some(command)
    }

    /// Encode header and arguments.
    pub fn encode(&self, enc: &mut Encoder, flags: CommandFlags) {
        enc.encode_struct(&CommandHeader {
            command_type: self.command_type(),
            flags,
        });
        match self {
            Command::CreateImage(args) => enc.encode_struct(args),
            Command::CreateImageView(args) => enc.encode_struct(args),
            Command::CreateShaderModule(args) => enc.encode_struct(args),
            Command::UpdateDescriptorSets(args) => enc.encode_struct(args),
            Command::GetImageMemoryRequirements2(args) => enc.encode_struct(args),
            Command::CmdSetViewport(args) => enc.encode_struct(args),
        }
    }

    pub fn replace(&mut self, replacer: &mut Replacer<'_>) {
        match self {
            Command::CreateImage(args) => replacer.replace_struct(args),
            Command::CreateImageView(args) => replacer.replace_struct(args),
            Command::CreateShaderModule(args) => replacer.replace_struct(args),
            Command::UpdateDescriptorSets(args) => replacer.replace_struct(args),
            Command::GetImageMemoryRequirements2(args) => replacer.replace_struct(args),
            Command::CmdSetViewport(args) => replacer.replace_struct(args),
        }
    }

    pub fn encode_reply(&self, enc: &mut Encoder, result: ResultCode) {
        match self {
            Command::CreateImage(args) => args.encode_reply(enc, result),
            Command::CreateImageView(args) => args.encode_reply(enc, result),
            Command::CreateShaderModule(args) => args.encode_reply(enc, result),
            Command::UpdateDescriptorSets(args) => args.encode_reply(enc, result),
            Command::GetImageMemoryRequirements2(args) => args.encode_reply(enc, result),
            Command::CmdSetViewport(args) => args.encode_reply(enc, result),
        }
    }
}

/// Encode a command the way a client would. Test fixtures and tools use this to build streams.
pub fn encode_command<A: CommandArgs>(enc: &mut Encoder, args: &A, flags: CommandFlags) {
    enc.encode_struct(&CommandHeader {
        command_type: A::COMMAND_TYPE,
        flags,
    });
    enc.encode_struct(args);
}
