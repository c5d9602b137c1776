//! Point-in-time view of what is registered, for diagnostics.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::handler::HandlerInfo;
use crate::message::MessageType;

/// Registered handlers per message type, sorted by tag.
///
/// Event handler lists are in delivery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    pub events: BTreeMap<MessageType, Vec<HandlerInfo>>,
    pub commands: BTreeMap<MessageType, HandlerInfo>,
}

impl RegistrySnapshot {
    /// Total number of registered handlers, events and commands together.
    pub fn handler_count(&self) -> usize {
        self.events.values().map(Vec::len).sum::<usize>() + self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.commands.is_empty()
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
