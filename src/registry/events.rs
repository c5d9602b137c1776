//! Event side of the registry: message type -> ordered handler list.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};

use crate::error::{MediatorError, Result};
use crate::handler::{EventHandler, HandlerInfo};
use crate::message::{Event, MessageType};

/// Type-erased handler list for one event type.
trait EventSlot: Send + Sync {
    fn len(&self) -> usize;
    fn infos(&self) -> Vec<HandlerInfo>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct EventHandlers<E>(Vec<EventHandler<E>>);

impl<E: Event> EventSlot for EventHandlers<E> {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn infos(&self) -> Vec<HandlerInfo> {
        self.0.iter().map(EventHandler::info).collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Default)]
pub(crate) struct EventMap {
    slots: HashMap<MessageType, Box<dyn EventSlot>>,
}

impl EventMap {
    /// Append `handler` unless it is already in the list. Returns whether it was added.
    pub(crate) fn attach<E: Event>(&mut self, handler: &EventHandler<E>) -> Result<bool> {
        let slot = self
            .slots
            .entry(E::MESSAGE_TYPE)
            .or_insert_with(|| Box::new(EventHandlers::<E>(Vec::new())) as Box<dyn EventSlot>);

        let handlers = slot
            .as_any_mut()
            .downcast_mut::<EventHandlers<E>>()
            .ok_or(MediatorError::MessageTypeConflict {
                message_type: E::MESSAGE_TYPE,
            })?;

        if handlers.0.contains(handler) {
            return Ok(false);
        }
        handlers.0.push(handler.clone());
        Ok(true)
    }

    /// Remove `handler` if present. Empty lists are dropped from the map.
    pub(crate) fn detach<E: Event>(&mut self, handler: &EventHandler<E>) -> Result<bool> {
        let Some(slot) = self.slots.get_mut(&E::MESSAGE_TYPE) else {
            return Ok(false);
        };

        let handlers = slot
            .as_any_mut()
            .downcast_mut::<EventHandlers<E>>()
            .ok_or(MediatorError::MessageTypeConflict {
                message_type: E::MESSAGE_TYPE,
            })?;

        let before = handlers.0.len();
        handlers.0.retain(|h| h != handler);
        let removed = handlers.0.len() != before;

        if handlers.0.is_empty() {
            self.slots.remove(&E::MESSAGE_TYPE);
        }
        Ok(removed)
    }

    /// Copy of the current handler list, in registration order.
    pub(crate) fn handlers<E: Event>(&self) -> Result<Vec<EventHandler<E>>> {
        let Some(slot) = self.slots.get(&E::MESSAGE_TYPE) else {
            return Ok(Vec::new());
        };

        slot.as_any()
            .downcast_ref::<EventHandlers<E>>()
            .map(|handlers| handlers.0.clone())
            .ok_or(MediatorError::MessageTypeConflict {
                message_type: E::MESSAGE_TYPE,
            })
    }

    pub(crate) fn count(&self, message_type: MessageType) -> usize {
        self.slots.get(&message_type).map_or(0, |slot| slot.len())
    }

    pub(crate) fn infos(&self) -> BTreeMap<MessageType, Vec<HandlerInfo>> {
        self.slots
            .iter()
            .map(|(message_type, slot)| (*message_type, slot.infos()))
            .collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
