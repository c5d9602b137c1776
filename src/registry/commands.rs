//! Command side of the registry: message type -> at most one handler.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};

use crate::error::{MediatorError, Result};
use crate::handler::{CommandHandler, HandlerInfo};
use crate::message::{Command, MessageType};

trait CommandSlot: Send + Sync {
    fn info(&self) -> HandlerInfo;
    fn as_any(&self) -> &dyn Any;
}

impl<C: Command> CommandSlot for CommandHandler<C> {
    fn info(&self) -> HandlerInfo {
        CommandHandler::info(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Default)]
pub(crate) struct CommandMap {
    slots: HashMap<MessageType, Box<dyn CommandSlot>>,
}

impl CommandMap {
    /// Install `handler` if the slot is empty. An occupied slot is never replaced.
    pub(crate) fn attach<C: Command>(&mut self, handler: &CommandHandler<C>) -> Result<()> {
        if let Some(existing) = self.slots.get(&C::MESSAGE_TYPE) {
            if existing.as_any().downcast_ref::<CommandHandler<C>>().is_none() {
                return Err(MediatorError::MessageTypeConflict {
                    message_type: C::MESSAGE_TYPE,
                });
            }
            return Err(MediatorError::DuplicateCommandHandler {
                message_type: C::MESSAGE_TYPE,
                existing: existing.info(),
                offered: handler.info(),
            });
        }

        self.slots.insert(C::MESSAGE_TYPE, Box::new(handler.clone()));
        Ok(())
    }

    /// Remove the registration if it is `handler`. Returns whether anything was removed.
    pub(crate) fn detach<C: Command>(&mut self, handler: &CommandHandler<C>) -> Result<bool> {
        let Some(existing) = self.slots.get(&C::MESSAGE_TYPE) else {
            return Ok(false);
        };

        let registered = existing
            .as_any()
            .downcast_ref::<CommandHandler<C>>()
            .ok_or(MediatorError::MessageTypeConflict {
                message_type: C::MESSAGE_TYPE,
            })?;

        if registered != handler {
            return Err(MediatorError::HandlerMismatch {
                message_type: C::MESSAGE_TYPE,
                registered: registered.info(),
                offered: handler.info(),
            });
        }

        self.slots.remove(&C::MESSAGE_TYPE);
        Ok(true)
    }

    pub(crate) fn get<C: Command>(&self) -> Result<Option<CommandHandler<C>>> {
        let Some(slot) = self.slots.get(&C::MESSAGE_TYPE) else {
            return Ok(None);
        };

        slot.as_any()
            .downcast_ref::<CommandHandler<C>>()
            .cloned()
            .map(Some)
            .ok_or(MediatorError::MessageTypeConflict {
                message_type: C::MESSAGE_TYPE,
            })
    }

    pub(crate) fn contains(&self, message_type: MessageType) -> bool {
        self.slots.contains_key(&message_type)
    }

    pub(crate) fn infos(&self) -> BTreeMap<MessageType, HandlerInfo> {
        self.slots
            .iter()
            .map(|(message_type, slot)| (*message_type, slot.info()))
            .collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
