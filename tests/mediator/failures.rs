//! Handler failures propagate to the caller and do not corrupt the registry.

use std::panic::{catch_unwind, AssertUnwindSafe};

use typed_mediator::{CommandHandler, EventHandler, Mediator};

use crate::support::{Fetch, Ping, Recorder};

#[test]
fn panicking_event_handler_aborts_the_rest_of_the_publish() {
    let mediator = Mediator::new();
    let log = Recorder::new();

    let before = {
        let log = log.clone();
        EventHandler::<Ping>::unit(move || log.record("before"))
    };
    let failing = EventHandler::<Ping>::unit(|| panic!("handler failed"));
    let after = {
        let log = log.clone();
        EventHandler::<Ping>::unit(move || log.record("after"))
    };

    mediator.attach_to_event(&before).unwrap();
    mediator.attach_to_event(&failing).unwrap();
    mediator.attach_to_event(&after).unwrap();

    let outcome = catch_unwind(AssertUnwindSafe(|| mediator.publish(Ping)));
    assert!(outcome.is_err());
    assert_eq!(log.entries(), vec!["before"]);

    // Registry is intact: removing the failing handler restores full delivery.
    mediator.detach_from_event(&failing).unwrap();
    assert_eq!(mediator.publish(Ping).unwrap(), 2);
    assert_eq!(log.entries(), vec!["before", "before", "after"]);
}

#[test]
fn panicking_command_handler_keeps_its_registration() {
    let mediator = Mediator::new();
    let handler = CommandHandler::new(|fetch: Fetch| {
        if fetch.key < 0 {
            panic!("negative key");
        }
        fetch.key
    });
    mediator.attach_command_handler(&handler).unwrap();

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        mediator.send(Fetch {
            key: -1,
            ..Default::default()
        })
    }));
    assert!(outcome.is_err());

    assert_eq!(
        mediator
            .send(Fetch {
                key: 8,
                ..Default::default()
            })
            .unwrap(),
        8
    );
}
