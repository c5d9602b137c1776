use thiserror::Error;

use crate::handler::HandlerInfo;
use crate::message::MessageType;

pub type Result<T> = std::result::Result<T, MediatorError>;

/// Errors reported by the handler registry and the mediator facade.
///
/// Publishing an event nobody listens to is not an error; it is logged and
/// `publish` returns `Ok(0)`. A handler that panics is not translated either:
/// the panic unwinds to whoever called `publish`/`send`.
#[derive(Debug, Error)]
pub enum MediatorError {
    #[error("no handler registered for command type {message_type}")]
    NoHandlerForCommand { message_type: MessageType },

    #[error(
        "cannot attach command handler for {message_type}: handler already registered \
         (current: {existing}, rejected: {offered})"
    )]
    DuplicateCommandHandler {
        message_type: MessageType,
        existing: HandlerInfo,
        offered: HandlerInfo,
    },

    #[error(
        "cannot detach command handler for {message_type}: registered handler is {registered}, \
         got {offered}"
    )]
    HandlerMismatch {
        message_type: MessageType,
        registered: HandlerInfo,
        offered: HandlerInfo,
    },

    #[error("message type {message_type} is already registered for a different Rust type")]
    MessageTypeConflict { message_type: MessageType },

    #[error("invalid mediator config: {0}")]
    Config(#[from] serde_json::Error),
}

impl MediatorError {
    /// The message type the error concerns, when there is one.
    pub fn message_type(&self) -> Option<MessageType> {
        match self {
            MediatorError::NoHandlerForCommand { message_type }
            | MediatorError::DuplicateCommandHandler { message_type, .. }
            | MediatorError::HandlerMismatch { message_type, .. }
            | MediatorError::MessageTypeConflict { message_type } => Some(*message_type),
            MediatorError::Config(_) => None,
        }
    }
}
