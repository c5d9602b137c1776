//! In-process mediator: typed fan-out events and single-handler commands.
//!
//! - **Events** go to every handler attached for their type.
//! - **Commands** go to the one handler registered for their type and may
//!   return a result.
//!
//! Producers and consumers only share a [`Mediator`]; neither holds a
//! reference to the other.

// Lets the derive macros' `::typed_mediator::` paths resolve inside this crate.
extern crate self as typed_mediator;

mod config;
mod error;
mod handler;
mod mediator;
mod message;
mod registry;

pub use config::MediatorConfig;
pub use error::{MediatorError, Result};
pub use handler::{CommandHandler, EventHandler, HandlerId, HandlerInfo, HandlerShape};
pub use mediator::Mediator;
pub use message::{Command, Event, Message, MessageType, Sender};
pub use registry::{HandlerRegistry, RegistrySnapshot};

#[cfg(feature = "derive")]
pub use typed_mediator_macros::{Command, Event};
