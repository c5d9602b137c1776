//! Command dispatch: single handler, results, missing handlers.

use typed_mediator::{CommandHandler, Mediator, MediatorError, Message};

use crate::support::{init_tracing, Delete, Fetch, ListPlayers, Recorder};

#[test]
fn fetch_scenario_second_handler_is_rejected() {
    init_tracing();
    let mediator = Mediator::new();

    let h = CommandHandler::new(|fetch: Fetch| fetch.key * 10).named("H");
    let h2 = CommandHandler::<Fetch>::unit(|| -1).named("H2");

    mediator.attach_command_handler(&h).unwrap();
    assert_eq!(mediator.send(Fetch { key: 4, ..Default::default() }).unwrap(), 40);

    let err = mediator.attach_command_handler(&h2).unwrap_err();
    match &err {
        MediatorError::DuplicateCommandHandler {
            message_type,
            existing,
            offered,
        } => {
            assert_eq!(*message_type, Fetch::MESSAGE_TYPE);
            assert_eq!(existing, &h.info());
            assert_eq!(offered, &h2.info());
        }
        other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.contains("\"H\""), "{message}");
    assert!(message.contains("\"H2\""), "{message}");

    assert_eq!(mediator.send(Fetch { key: 5, ..Default::default() }).unwrap(), 50);
}

#[test]
fn attaching_the_registered_handler_again_is_still_rejected() {
    let mediator = Mediator::new();
    let handler = CommandHandler::<Fetch>::unit(|| 1);

    mediator.attach_command_handler(&handler).unwrap();
    assert!(matches!(
        mediator.attach_command_handler(&handler),
        Err(MediatorError::DuplicateCommandHandler { .. })
    ));
    assert_eq!(mediator.send_default::<Fetch>().unwrap(), 1);
}

#[test]
fn delete_without_handler_reports_and_defaults() {
    init_tracing();
    let mediator = Mediator::new();

    let err = mediator.send(Delete { id: 7 }).unwrap_err();
    assert!(matches!(
        err,
        MediatorError::NoHandlerForCommand { message_type } if message_type == Delete::MESSAGE_TYPE
    ));

    assert_eq!(mediator.send_or_default(Fetch::default()), 0);
    assert!(mediator.send_or_default(ListPlayers).is_empty());
    mediator.send_or_default(Delete { id: 7 });
}

#[test]
fn mismatched_detach_leaves_registration_intact() {
    let mediator = Mediator::new();
    let log = Recorder::new();

    let original = {
        let log = log.clone();
        CommandHandler::new(move |delete: Delete| log.record(format!("deleted {}", delete.id)))
    };
    let impostor = CommandHandler::<Delete>::unit(|| {});

    mediator.attach_command_handler(&original).unwrap();

    let err = mediator.detach_command_handler(&impostor).unwrap_err();
    assert!(matches!(err, MediatorError::HandlerMismatch { .. }));
    assert!(mediator.registry().has_command_handler(Delete::MESSAGE_TYPE));

    mediator.send(Delete { id: 3 }).unwrap();
    assert_eq!(log.entries(), vec!["deleted 3"]);
}

#[test]
fn detach_returns_slot_to_unregistered() {
    let mediator = Mediator::new();
    let first = CommandHandler::<Fetch>::unit(|| 1);
    let second = CommandHandler::<Fetch>::unit(|| 2);

    assert!(!mediator.detach_command_handler(&first).unwrap());

    mediator.attach_command_handler(&first).unwrap();
    assert!(mediator.detach_command_handler(&first).unwrap());
    assert!(matches!(
        mediator.send_default::<Fetch>(),
        Err(MediatorError::NoHandlerForCommand { .. })
    ));

    mediator.attach_command_handler(&second).unwrap();
    assert_eq!(mediator.send_default::<Fetch>().unwrap(), 2);
}

#[test]
fn all_four_handler_shapes_dispatch() {
    let mediator = Mediator::new();
    let log = Recorder::new();

    // no result, no args
    let unit_void = {
        let log = log.clone();
        CommandHandler::<Delete>::unit(move || log.record("unit"))
    };
    mediator.attach_command_handler(&unit_void).unwrap();
    mediator.send(Delete { id: 1 }).unwrap();
    mediator.detach_command_handler(&unit_void).unwrap();

    // no result, with message
    let msg_void = {
        let log = log.clone();
        CommandHandler::new(move |d: Delete| log.record(format!("id {}", d.id)))
    };
    mediator.attach_command_handler(&msg_void).unwrap();
    mediator.send(Delete { id: 2 }).unwrap();

    // result, no args
    let unit_result = CommandHandler::<ListPlayers>::unit(|| vec!["ada".to_string()]);
    mediator.attach_command_handler(&unit_result).unwrap();
    assert_eq!(mediator.send(ListPlayers).unwrap(), vec!["ada"]);

    // result, with message
    let msg_result = CommandHandler::new(|f: Fetch| f.key + 1);
    mediator.attach_command_handler(&msg_result).unwrap();
    assert_eq!(mediator.send(Fetch { key: 41, ..Default::default() }).unwrap(), 42);

    assert_eq!(log.entries(), vec!["unit", "id 2"]);
}
