//! Renderer-side execution of a remoted graphics command stream.
//!
//! [`Dispatcher`] walks a stream of commands, decodes each one with `vkwire-cs` against the
//! schema in `vkwire-protocol`, resolves its handles and hands it to a [`CommandHandler`].

pub mod dispatch;
pub mod error;

pub use vkwire_cs as cs;
pub use vkwire_protocol as protocol;

pub use crate::dispatch::{CommandHandler, Dispatcher};
pub use crate::error::{DispatchError, Result};
