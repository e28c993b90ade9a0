use thiserror::Error;
use vkwire_cs::{DecodeFault, EncodeFault};
use vkwire_protocol::CommandType;

pub type Result<T> = std::result::Result<T, DispatchError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("unknown command type {0}")]
    UnknownCommand(CommandType),

    /// The command failed to decode or to resolve its handles and was not executed.
    #[error("rejected {command}: {fault}")]
    Rejected {
        command: CommandType,
        fault: DecodeFault,
    },

    #[error("reply encoding failed: {0}")]
    Reply(#[from] EncodeFault),
}
