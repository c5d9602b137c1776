//! Mediator - the facade application code talks to.
//!
//! `Mediator` adds convenience overloads (default-constructed messages,
//! optional sender) on top of [`HandlerRegistry`]. It holds no state of its
//! own: clones share one registry, so the composition root builds one
//! `Mediator` per session and hands clones to producers and consumers.
//!
//! ## Example
//!
//! ```
//! use typed_mediator::{Command, CommandHandler, Event, EventHandler, Mediator, Sender};
//!
//! #[derive(Default, Event)]
//! struct GoalScored;
//!
//! #[derive(Command)]
//! #[command(output = u32)]
//! struct CurrentScore;
//!
//! let mediator = Mediator::new();
//!
//! let cheer = EventHandler::<GoalScored>::unit(|| println!("goal!"));
//! mediator.attach_to_event(&cheer).unwrap();
//!
//! let score = CommandHandler::<CurrentScore>::unit(|| 3);
//! mediator.attach_command_handler(&score).unwrap();
//!
//! mediator.publish_default::<GoalScored>().unwrap();
//! assert_eq!(mediator.send(CurrentScore).unwrap(), 3);
//!
//! mediator.detach_command_handler(&score).unwrap();
//! assert_eq!(mediator.send_or_default(CurrentScore), 0);
//! ```

use std::sync::Arc;

use crate::config::MediatorConfig;
use crate::error::Result;
use crate::handler::{CommandHandler, EventHandler};
use crate::message::{Command, Event, Sender};
use crate::registry::HandlerRegistry;

/// Handle to one handler registry.
#[derive(Clone, Default)]
pub struct Mediator {
    registry: Arc<HandlerRegistry>,
}

impl Mediator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &MediatorConfig) -> Self {
        Self::from_registry(Arc::new(HandlerRegistry::with_config(config)))
    }

    /// Wrap a registry the caller already shares.
    pub fn from_registry(registry: Arc<HandlerRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<HandlerRegistry> {
        &self.registry
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Publish `event` to every attached handler. Returns how many ran.
    pub fn publish<E: Event>(&self, event: E) -> Result<usize> {
        self.registry.publish_event(event, None)
    }

    /// Publish `event` stamped with `sender`.
    pub fn publish_from<E: Event>(&self, event: E, sender: Sender) -> Result<usize> {
        self.registry.publish_event(event, Some(sender))
    }

    /// Publish a default-constructed `E`, for marker events.
    pub fn publish_default<E: Event + Default>(&self) -> Result<usize> {
        self.registry.publish_event(E::default(), None)
    }

    pub fn publish_default_from<E: Event + Default>(&self, sender: Sender) -> Result<usize> {
        self.registry.publish_event(E::default(), Some(sender))
    }

    pub fn attach_to_event<E: Event>(&self, handler: &EventHandler<E>) -> Result<bool> {
        self.registry.attach_event(handler)
    }

    pub fn detach_from_event<E: Event>(&self, handler: &EventHandler<E>) -> Result<bool> {
        self.registry.detach_event(handler)
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Send `command` to its handler and return the result.
    pub fn send<C: Command>(&self, command: C) -> Result<C::Output> {
        self.registry.send_command(command, None)
    }

    pub fn send_from<C: Command>(&self, command: C, sender: Sender) -> Result<C::Output> {
        self.registry.send_command(command, Some(sender))
    }

    /// Send a default-constructed `C`.
    pub fn send_default<C: Command + Default>(&self) -> Result<C::Output> {
        self.registry.send_command(C::default(), None)
    }

    pub fn send_default_from<C: Command + Default>(&self, sender: Sender) -> Result<C::Output> {
        self.registry.send_command(C::default(), Some(sender))
    }

    /// Send `command`, falling back to `Output::default()` when it cannot be
    /// dispatched. The failure is still logged by the registry.
    pub fn send_or_default<C>(&self, command: C) -> C::Output
    where
        C: Command,
        C::Output: Default,
    {
        self.registry
            .send_command(command, None)
            .unwrap_or_default()
    }

    pub fn attach_command_handler<C: Command>(&self, handler: &CommandHandler<C>) -> Result<()> {
        self.registry.attach_command(handler)
    }

    pub fn detach_command_handler<C: Command>(&self, handler: &CommandHandler<C>) -> Result<bool> {
        self.registry.detach_command(handler)
    }
}
