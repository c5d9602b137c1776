//! Message family contract - what a value needs to travel through the mediator.
//!
//! Every message type carries a compile-time tag ([`MessageType`]) that keys
//! the handler registry. Events are broadcast to any number of handlers;
//! commands go to exactly one handler and may produce a result.
//!
//! The derive macros (default `derive` feature) generate these impls:
//!
//! ```
//! use typed_mediator::{Command, Event, Message, Sender};
//!
//! #[derive(Default, Event)]
//! struct PlayerJoined {
//!     name: String,
//!     #[message(sender)]
//!     sender: Option<Sender>,
//! }
//!
//! #[derive(Command)]
//! #[command(output = u32)]
//! #[message(name = "score.fetch")]
//! struct FetchScore;
//!
//! assert_eq!(FetchScore::MESSAGE_TYPE.as_str(), "score.fetch");
//! assert!(PlayerJoined::MESSAGE_TYPE.as_str().ends_with("::PlayerJoined"));
//! ```

mod sender;

use std::fmt;

use serde::{Serialize, Serializer};

pub use sender::Sender;

/// Stable tag identifying one logical message type.
///
/// Two tags are equal iff they name the same message type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageType(&'static str);

impl MessageType {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Debug for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageType({:?})", self.0)
    }
}

impl Serialize for MessageType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

/// A value that can be published or sent through the mediator.
pub trait Message: Send + 'static {
    /// Registry key for this type.
    const MESSAGE_TYPE: MessageType;

    /// The sender stamped on this message, if the type keeps one.
    fn sender(&self) -> Option<&Sender> {
        None
    }

    /// Record who produced this message. Types without a sender slot ignore it.
    fn set_sender(&mut self, _sender: Sender) {}
}

/// A broadcast message: zero or more handlers, no result.
pub trait Event: Message {}

/// A point-to-point message handled by exactly one handler.
pub trait Command: Message {
    /// What the handler returns. `()` for commands without a result.
    type Output: Send + 'static;
}
