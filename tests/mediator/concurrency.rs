//! Attach/detach racing publish/send from several threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use typed_mediator::{CommandHandler, EventHandler, Mediator, Message};

use crate::support::{Fetch, Ping};

#[test]
fn attach_and_detach_race_with_publish() {
    let mediator = Mediator::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let anchor = {
        let hits = Arc::clone(&hits);
        EventHandler::<Ping>::unit(move || {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    };
    mediator.attach_to_event(&anchor).unwrap();

    thread::scope(|scope| {
        for _ in 0..4 {
            let mediator = mediator.clone();
            scope.spawn(move || {
                for _ in 0..200 {
                    let churn = EventHandler::<Ping>::unit(|| {});
                    mediator.attach_to_event(&churn).unwrap();
                    mediator.detach_from_event(&churn).unwrap();
                }
            });
        }
        for _ in 0..4 {
            let mediator = mediator.clone();
            scope.spawn(move || {
                for _ in 0..200 {
                    assert!(mediator.publish(Ping).unwrap() >= 1);
                }
            });
        }
    });

    assert_eq!(hits.load(Ordering::SeqCst), 800);
    assert_eq!(mediator.registry().event_handler_count(Ping::MESSAGE_TYPE), 1);
}

#[test]
fn only_one_thread_wins_the_command_slot() {
    let mediator = Mediator::new();

    let winners: usize = thread::scope(|scope| {
        let attempts: Vec<_> = (0..8)
            .map(|n| {
                let mediator = mediator.clone();
                scope.spawn(move || {
                    let handler = CommandHandler::<Fetch>::unit(move || n);
                    mediator.attach_command_handler(&handler).is_ok() as usize
                })
            })
            .collect();
        attempts.into_iter().map(|h| h.join().unwrap()).sum()
    });

    assert_eq!(winners, 1);
    let result = mediator.send_default::<Fetch>().unwrap();
    assert!((0..8).contains(&result));
}
