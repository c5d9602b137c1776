//! Sender propagation onto delivered messages.

use std::sync::{Arc, Mutex};

use typed_mediator::{CommandHandler, EventHandler, Mediator, Message, Sender};

use crate::support::{Fetch, GoalScored, RoundEnded};

struct Referee {
    name: &'static str,
}

#[test]
fn every_payload_handler_observes_the_sender() {
    let mediator = Mediator::new();
    let referee = Sender::from_arc(Arc::new(Referee { name: "collina" }));
    let seen: Arc<Mutex<Vec<Option<Sender>>>> = Arc::default();

    let handlers: Vec<_> = (0..3)
        .map(|_| {
            let seen = Arc::clone(&seen);
            EventHandler::new(move |goal: &GoalScored| {
                seen.lock().unwrap().push(goal.sender().cloned());
            })
        })
        .collect();
    for handler in &handlers {
        mediator.attach_to_event(handler).unwrap();
    }

    mediator
        .publish_from(GoalScored::default(), referee.clone())
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    for sender in seen.iter() {
        let sender = sender.as_ref().expect("sender stamped");
        assert_eq!(sender, &referee);
        assert_eq!(sender.downcast_ref::<Referee>().map(|r| r.name), Some("collina"));
    }
}

#[test]
fn publish_without_sender_leaves_slot_empty() {
    let mediator = Mediator::new();
    let seen = Arc::new(Mutex::new(None));

    let slot = Arc::clone(&seen);
    mediator
        .attach_to_event(&EventHandler::new(move |goal: &GoalScored| {
            *slot.lock().unwrap() = Some(goal.sender().is_some());
        }))
        .unwrap();

    mediator.publish_default::<GoalScored>().unwrap();
    assert_eq!(*seen.lock().unwrap(), Some(false));

    mediator
        .publish_default_from::<GoalScored>(Sender::new("stadium"))
        .unwrap();
    assert_eq!(*seen.lock().unwrap(), Some(true));
}

#[test]
fn sender_on_type_without_slot_is_ignored() {
    let mediator = Mediator::new();
    let rounds = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&rounds);
    mediator
        .attach_to_event(&EventHandler::new(move |end: &RoundEnded| {
            assert!(end.sender().is_none());
            log.lock().unwrap().push(end.round);
        }))
        .unwrap();

    mediator
        .publish_from(RoundEnded { round: 4 }, Sender::new(()))
        .unwrap();
    assert_eq!(*rounds.lock().unwrap(), vec![4]);
}

#[test]
fn commands_carry_the_sender_to_their_handler() {
    let mediator = Mediator::new();
    let caller = Sender::new("hud");

    let expected = caller.clone();
    mediator
        .attach_command_handler(&CommandHandler::new(move |fetch: Fetch| {
            if fetch.sender.as_ref() == Some(&expected) {
                1
            } else {
                0
            }
        }))
        .unwrap();

    assert_eq!(mediator.send_from(Fetch::default(), caller).unwrap(), 1);
    assert_eq!(mediator.send_default_from::<Fetch>(Sender::new("other")).unwrap(), 0);
    assert_eq!(mediator.send_default::<Fetch>().unwrap(), 0);
}
