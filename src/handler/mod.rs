//! Handler references - the callables the registry stores and invokes.
//!
//! A handler gets its identity ([`HandlerId`]) when it is built. Clones share
//! that identity, so the clone you keep is the one you present again to
//! detach. Building a second handler from the same closure yields a different
//! identity.
//!
//! ```
//! use typed_mediator::{Event, EventHandler, Mediator};
//!
//! #[derive(Default, Event)]
//! struct Ping;
//!
//! let mediator = Mediator::new();
//! let on_ping = EventHandler::<Ping>::unit(|| println!("ping")).named("logger");
//!
//! assert!(mediator.attach_to_event(&on_ping).unwrap());
//! assert!(!mediator.attach_to_event(&on_ping.clone()).unwrap());
//! assert_eq!(mediator.publish(Ping).unwrap(), 1);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::message::{Command, Event};

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a handler reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct HandlerId(u64);

impl HandlerId {
    fn next() -> Self {
        HandlerId(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a handler receives the message or ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerShape {
    NoArgs,
    WithMessage,
}

impl fmt::Display for HandlerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerShape::NoArgs => f.write_str("no-args"),
            HandlerShape::WithMessage => f.write_str("with-message"),
        }
    }
}

/// Diagnostic description of a handler, used in errors and snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerInfo {
    pub id: HandlerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub shape: HandlerShape,
}

impl fmt::Display for HandlerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} {:?} [{}]", self.id, label, self.shape),
            None => write!(f, "{} [{}]", self.id, self.shape),
        }
    }
}

enum EventCallback<E> {
    NoArgs(Arc<dyn Fn() + Send + Sync>),
    WithMessage(Arc<dyn Fn(&E) + Send + Sync>),
}

impl<E> Clone for EventCallback<E> {
    fn clone(&self) -> Self {
        match self {
            EventCallback::NoArgs(f) => EventCallback::NoArgs(Arc::clone(f)),
            EventCallback::WithMessage(f) => EventCallback::WithMessage(Arc::clone(f)),
        }
    }
}

/// A handler for events of type `E`.
pub struct EventHandler<E> {
    id: HandlerId,
    label: Option<Cow<'static, str>>,
    callback: EventCallback<E>,
}

impl<E: Event> EventHandler<E> {
    /// Handler that receives the published event.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        Self::build(EventCallback::WithMessage(Arc::new(handler)))
    }

    /// Handler that only cares that the event happened.
    pub fn unit<F>(handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::build(EventCallback::NoArgs(Arc::new(handler)))
    }

    fn build(callback: EventCallback<E>) -> Self {
        Self {
            id: HandlerId::next(),
            label: None,
            callback,
        }
    }

    pub(crate) fn invoke(&self, event: &E) {
        match &self.callback {
            EventCallback::NoArgs(f) => f(),
            EventCallback::WithMessage(f) => f(event),
        }
    }
}

impl<E> EventHandler<E> {
    /// Attach a label shown in logs and error reports. Keeps the identity.
    pub fn named(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn id(&self) -> HandlerId {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn shape(&self) -> HandlerShape {
        match self.callback {
            EventCallback::NoArgs(_) => HandlerShape::NoArgs,
            EventCallback::WithMessage(_) => HandlerShape::WithMessage,
        }
    }

    pub fn info(&self) -> HandlerInfo {
        HandlerInfo {
            id: self.id,
            label: self.label.as_ref().map(|l| l.to_string()),
            shape: self.shape(),
        }
    }
}

impl<E> Clone for EventHandler<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            label: self.label.clone(),
            callback: self.callback.clone(),
        }
    }
}

impl<E> PartialEq for EventHandler<E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<E> Eq for EventHandler<E> {}

impl<E> fmt::Debug for EventHandler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("shape", &self.shape())
            .finish()
    }
}

enum CommandCallback<C: Command> {
    NoArgs(Arc<dyn Fn() -> C::Output + Send + Sync>),
    WithMessage(Arc<dyn Fn(C) -> C::Output + Send + Sync>),
}

impl<C: Command> Clone for CommandCallback<C> {
    fn clone(&self) -> Self {
        match self {
            CommandCallback::NoArgs(f) => CommandCallback::NoArgs(Arc::clone(f)),
            CommandCallback::WithMessage(f) => CommandCallback::WithMessage(Arc::clone(f)),
        }
    }
}

/// The single handler for commands of type `C`.
///
/// With `C::Output = ()` this covers the two "no result" handler shapes,
/// otherwise the two "returns a result" shapes.
pub struct CommandHandler<C: Command> {
    id: HandlerId,
    label: Option<Cow<'static, str>>,
    callback: CommandCallback<C>,
}

impl<C: Command> CommandHandler<C> {
    /// Handler that consumes the command.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(C) -> C::Output + Send + Sync + 'static,
    {
        Self::build(CommandCallback::WithMessage(Arc::new(handler)))
    }

    /// Handler that ignores the command payload.
    pub fn unit<F>(handler: F) -> Self
    where
        F: Fn() -> C::Output + Send + Sync + 'static,
    {
        Self::build(CommandCallback::NoArgs(Arc::new(handler)))
    }

    fn build(callback: CommandCallback<C>) -> Self {
        Self {
            id: HandlerId::next(),
            label: None,
            callback,
        }
    }

    /// Attach a label shown in logs and error reports. Keeps the identity.
    pub fn named(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn id(&self) -> HandlerId {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn shape(&self) -> HandlerShape {
        match self.callback {
            CommandCallback::NoArgs(_) => HandlerShape::NoArgs,
            CommandCallback::WithMessage(_) => HandlerShape::WithMessage,
        }
    }

    pub fn info(&self) -> HandlerInfo {
        HandlerInfo {
            id: self.id,
            label: self.label.as_ref().map(|l| l.to_string()),
            shape: self.shape(),
        }
    }

    pub(crate) fn invoke(&self, command: C) -> C::Output {
        match &self.callback {
            CommandCallback::NoArgs(f) => f(),
            CommandCallback::WithMessage(f) => f(command),
        }
    }
}

impl<C: Command> Clone for CommandHandler<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            label: self.label.clone(),
            callback: self.callback.clone(),
        }
    }
}

impl<C: Command> PartialEq for CommandHandler<C> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<C: Command> Eq for CommandHandler<C> {}

impl<C: Command> fmt::Debug for CommandHandler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandHandler")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("shape", &self.shape())
            .finish()
    }
}
