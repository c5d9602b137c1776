//! Handler Registry - type-keyed handler storage and dispatch.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  HandlerRegistry                          │
//! │  RwLock ─┬─ EventMap:   MessageType -> [EventHandler]     │
//! │          └─ CommandMap: MessageType -> CommandHandler     │
//! └──────────────────────────────────────────────────────────┘
//!        publish/send: copy handlers under read lock,
//!        release, then invoke in registration order
//! ```
//!
//! ## Contract
//!
//! - Events fan out to every attached handler, once each, in the order they
//!   were attached. No handlers is a normal state and only gets logged.
//! - Commands reach exactly one handler. Sending with none is
//!   [`MediatorError::NoHandlerForCommand`]; a second attach is
//!   [`MediatorError::DuplicateCommandHandler`].
//! - Handlers run on the caller's thread with the lock released, so they may
//!   publish, send, attach or detach themselves. Changes made during a
//!   publish apply from the next publish.
//! - A handler panic is not caught. It unwinds to the caller and skips the
//!   handlers after it; the registry itself stays consistent and usable.

mod commands;
mod events;
mod snapshot;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::MediatorConfig;
use crate::error::{MediatorError, Result};
use crate::handler::{CommandHandler, EventHandler};
use crate::message::{Command, Event, MessageType, Sender};

use commands::CommandMap;
use events::EventMap;

pub use snapshot::RegistrySnapshot;

#[derive(Default)]
struct Handlers {
    events: EventMap,
    commands: CommandMap,
}

/// Owns the event and command maps and implements attach/detach/publish/send.
pub struct HandlerRegistry {
    name: String,
    warn_on_unhandled_events: bool,
    handlers: RwLock<Handlers>,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerRegistry {
    /// Create an empty registry with default settings.
    pub fn new() -> Self {
        Self::with_config(&MediatorConfig::default())
    }

    pub fn with_config(config: &MediatorConfig) -> Self {
        Self {
            name: config.name.clone(),
            warn_on_unhandled_events: config.warn_on_unhandled_events,
            handlers: RwLock::new(Handlers::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // Handlers never run while the lock is held, so a poisoned guard still
    // wraps consistent maps.
    fn read(&self) -> RwLockReadGuard<'_, Handlers> {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Handlers> {
        self.handlers.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Add `handler` to the handlers of `E`. Attaching the same handler again
    /// is a no-op; returns whether it was newly added.
    pub fn attach_event<E: Event>(&self, handler: &EventHandler<E>) -> Result<bool> {
        let added = self.write().events.attach(handler)?;
        tracing::trace!(
            mediator = %self.name,
            message_type = %E::MESSAGE_TYPE,
            handler = %handler.info(),
            added,
            "attached event handler"
        );
        Ok(added)
    }

    /// Remove `handler` from the handlers of `E`. Returns whether it was attached.
    pub fn detach_event<E: Event>(&self, handler: &EventHandler<E>) -> Result<bool> {
        let removed = self.write().events.detach(handler)?;
        tracing::trace!(
            mediator = %self.name,
            message_type = %E::MESSAGE_TYPE,
            handler = %handler.info(),
            removed,
            "detached event handler"
        );
        Ok(removed)
    }

    /// Deliver `event` to every handler of `E`, returning how many ran.
    ///
    /// A `sender` is stamped on the event first, for types that keep one.
    pub fn publish_event<E: Event>(&self, mut event: E, sender: Option<Sender>) -> Result<usize> {
        if let Some(sender) = sender {
            event.set_sender(sender);
        }

        let handlers = self.read().events.handlers::<E>()?;

        if handlers.is_empty() {
            if self.warn_on_unhandled_events {
                tracing::warn!(
                    mediator = %self.name,
                    message_type = %E::MESSAGE_TYPE,
                    "no handlers for event"
                );
            } else {
                tracing::debug!(
                    mediator = %self.name,
                    message_type = %E::MESSAGE_TYPE,
                    "no handlers for event"
                );
            }
            return Ok(0);
        }

        tracing::trace!(
            mediator = %self.name,
            message_type = %E::MESSAGE_TYPE,
            handlers = handlers.len(),
            "publishing event"
        );

        for handler in &handlers {
            handler.invoke(&event);
        }
        Ok(handlers.len())
    }

    /// Number of handlers attached for `message_type`.
    pub fn event_handler_count(&self, message_type: MessageType) -> usize {
        self.read().events.count(message_type)
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Register `handler` as the single handler of `C`.
    ///
    /// Fails with [`MediatorError::DuplicateCommandHandler`] if `C` already has
    /// one; the existing registration is kept.
    pub fn attach_command<C: Command>(&self, handler: &CommandHandler<C>) -> Result<()> {
        if let Err(err) = self.write().commands.attach(handler) {
            tracing::error!(mediator = %self.name, error = %err, "command handler rejected");
            return Err(err);
        }

        tracing::debug!(
            mediator = %self.name,
            message_type = %C::MESSAGE_TYPE,
            handler = %handler.info(),
            "attached command handler"
        );
        Ok(())
    }

    /// Unregister `handler` from `C`.
    ///
    /// Returns `Ok(false)` when nothing is registered, and
    /// [`MediatorError::HandlerMismatch`] when a different handler is.
    pub fn detach_command<C: Command>(&self, handler: &CommandHandler<C>) -> Result<bool> {
        match self.write().commands.detach(handler) {
            Ok(removed) => {
                tracing::debug!(
                    mediator = %self.name,
                    message_type = %C::MESSAGE_TYPE,
                    handler = %handler.info(),
                    removed,
                    "detached command handler"
                );
                Ok(removed)
            }
            Err(err) => {
                tracing::error!(mediator = %self.name, error = %err, "command handler not detached");
                Err(err)
            }
        }
    }

    /// Dispatch `command` to its handler and return the handler's result.
    pub fn send_command<C: Command>(&self, mut command: C, sender: Option<Sender>) -> Result<C::Output> {
        if let Some(sender) = sender {
            command.set_sender(sender);
        }

        let handler = self.read().commands.get::<C>()?;

        let Some(handler) = handler else {
            let err = MediatorError::NoHandlerForCommand {
                message_type: C::MESSAGE_TYPE,
            };
            tracing::error!(mediator = %self.name, error = %err, "command not dispatched");
            return Err(err);
        };

        tracing::trace!(
            mediator = %self.name,
            message_type = %C::MESSAGE_TYPE,
            handler = %handler.info(),
            "sending command"
        );
        Ok(handler.invoke(command))
    }

    pub fn has_command_handler(&self, message_type: MessageType) -> bool {
        self.read().commands.contains(message_type)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn is_empty(&self) -> bool {
        let handlers = self.read();
        handlers.events.is_empty() && handlers.commands.is_empty()
    }

    /// Drop every registration, events and commands alike.
    pub fn clear(&self) {
        let mut handlers = self.write();
        handlers.events.clear();
        handlers.commands.clear();
        tracing::debug!(mediator = %self.name, "registry cleared");
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        let handlers = self.read();
        RegistrySnapshot {
            events: handlers.events.infos(),
            commands: handlers.commands.infos(),
        }
    }
}
