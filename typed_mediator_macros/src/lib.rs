mod message;

use proc_macro::TokenStream;

use message::Family;

// ============================================================================
// #[derive(Event)]
// ============================================================================

/// Derive macro for the `Event` message family.
///
/// # Usage
///
/// ```ignore
/// #[derive(Default, Event)]
/// #[message(name = "player.joined")]
/// struct PlayerJoined {
///     pub name: String,
///     #[message(sender)]
///     pub sender: Option<Sender>,
/// }
/// ```
///
/// - `#[message(name = "...")]` sets the registry tag. If omitted, the tag is
///   the type's full path (`module_path!()` + `::` + type name).
/// - `#[message(sender)]` marks an `Option<Sender>` field that the mediator
///   fills in when the event is published with a sender. Without it, the
///   sender is dropped.
#[proc_macro_derive(Event, attributes(message))]
pub fn derive_event(input: TokenStream) -> TokenStream {
    message::derive_message(input, Family::Event)
}

// ============================================================================
// #[derive(Command)]
// ============================================================================

/// Derive macro for the `Command` message family.
///
/// # Usage
///
/// ```ignore
/// #[derive(Command)]
/// #[command(output = Option<u64>)]
/// struct FindPlayer {
///     pub name: String,
/// }
/// ```
///
/// - `#[command(output = Type)]` is what the handler returns. Defaults to `()`.
/// - `#[message(...)]` works as for `#[derive(Event)]`.
#[proc_macro_derive(Command, attributes(message, command))]
pub fn derive_command(input: TokenStream) -> TokenStream {
    message::derive_message(input, Family::Command)
}
