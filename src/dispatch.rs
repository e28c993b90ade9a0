//! Sequential command execution.
//!
//! Each command runs in its own scope: decode header and arguments, check the decoder, resolve
//! deferred handles, execute, then append the reply when the header asks for one. The temp
//! arena is reset when the scope ends, whatever the outcome. The first rejected command stops
//! the stream; nothing after it is decoded.

use tracing::{debug, warn};
use vkwire_cs::{CsOptions, Decoder, Encoder, ObjectTable, Replacer, TempArena};
use vkwire_protocol::{
    CmdSetViewportArgs, Command, CommandHeader, CreateImageArgs, CreateImageViewArgs,
    CreateShaderModuleArgs, GetImageMemoryRequirements2Args, ResultCode,
    UpdateDescriptorSetsArgs,
};

use crate::error::{DispatchError, Result};

/// Renderer backend that executes decoded commands.
///
/// Input handles arrive resolved. Handles of objects being created carry the client's id;
/// the handler is expected to register them in the table returned by [`objects`].
///
/// [`objects`]: CommandHandler::objects
pub trait CommandHandler {
    fn objects(&self) -> &dyn ObjectTable;

    fn create_image(&mut self, args: &CreateImageArgs) -> ResultCode;

    fn create_image_view(&mut self, args: &CreateImageViewArgs) -> ResultCode;

    fn create_shader_module(&mut self, args: &CreateShaderModuleArgs) -> ResultCode;

    fn update_descriptor_sets(&mut self, args: &UpdateDescriptorSetsArgs);

    /// Fill in `args.memory_requirements`; its chain already has the shape the client asked
    /// for.
    fn get_image_memory_requirements_2(&mut self, args: &mut GetImageMemoryRequirements2Args);

    fn cmd_set_viewport(&mut self, args: &CmdSetViewportArgs);
}

#[derive(Debug)]
pub struct Dispatcher {
    arena: TempArena,
    options: CsOptions,
    executed: u64,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(CsOptions::default())
    }
}

impl Dispatcher {
    pub fn new(options: CsOptions) -> Self {
        Self {
            arena: options.temp_arena(),
            options,
            executed: 0,
        }
    }

    pub fn options(&self) -> &CsOptions {
        &self.options
    }

    pub fn arena(&self) -> &TempArena {
        &self.arena
    }

    /// Number of commands executed over the dispatcher's lifetime.
    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// Execute every command in `stream` and return the concatenated replies.
    pub fn execute(&mut self, stream: &[u8], handler: &mut dyn CommandHandler) -> Result<Vec<u8>> {
        let mut reply = Encoder::with_reply_capacity(self.options.reply_capacity);
        let mut offset = 0;

        while offset < stream.len() {
            let outcome = self.execute_one(&stream[offset..], handler, &mut reply);
            self.arena.reset();
            match outcome {
                Ok(consumed) => offset += consumed,
                Err(err) => {
                    warn!(offset, error = %err, "rejecting command");
                    return Err(err);
                }
            }
        }

        Ok(reply.finish()?)
    }

    fn execute_one(
        &mut self,
        stream: &[u8],
        handler: &mut dyn CommandHandler,
        reply: &mut Encoder,
    ) -> Result<usize> {
        let (header, mut command, consumed) = {
            let mut dec =
                Decoder::with_options(stream, &mut self.arena, handler.objects(), &self.options);
            let header: CommandHeader = dec.decode_struct_temp();
            if let Some(fault) = dec.fault() {
                return Err(DispatchError::Rejected {
                    command: header.command_type,
                    fault,
                });
            }
            let Some(command) = Command::decode_temp(header.command_type, &mut dec) else {
                return Err(DispatchError::UnknownCommand(header.command_type));
            };
            if let Some(fault) = dec.fault() {
                return Err(DispatchError::Rejected {
                    command: header.command_type,
                    fault,
                });
            }
            (header, command, dec.position())
        };

        let mut replacer = Replacer::new(handler.objects());
        command.replace(&mut replacer);
        let replaced = replacer
            .finish()
            .map_err(|fault| DispatchError::Rejected {
                command: header.command_type,
                fault,
            })?;

        let result = match &mut command {
            Command::CreateImage(args) => handler.create_image(args),
            Command::CreateImageView(args) => handler.create_image_view(args),
            Command::CreateShaderModule(args) => handler.create_shader_module(args),
            Command::UpdateDescriptorSets(args) => {
                handler.update_descriptor_sets(args);
                ResultCode::SUCCESS
            }
            Command::GetImageMemoryRequirements2(args) => {
                handler.get_image_memory_requirements_2(args);
                ResultCode::SUCCESS
            }
            Command::CmdSetViewport(args) => {
                handler.cmd_set_viewport(args);
                ResultCode::SUCCESS
            }
        };
        self.executed += 1;
        debug!(
            command = %header.command_type,
            consumed,
            replaced,
            arena_used = self.arena.used(),
            %result,
            "executed command"
        );

        if header.generates_reply() {
            command.encode_reply(reply, result);
            if let Some(fault) = reply.fault() {
                return Err(fault.into());
            }
        }
        Ok(consumed)
    }
}
