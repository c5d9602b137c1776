//! Mediator integration tests.

mod commands;
mod senders;
mod failures;
mod concurrency;
