//! Opaque origin identity carried by messages.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Identity of whoever produced a message.
///
/// The registry never looks inside a `Sender`; it only stores it on the
/// message before dispatch. Two senders are equal when they were cloned from
/// the same original, regardless of what they wrap.
///
/// ```
/// use typed_mediator::Sender;
///
/// let player = Sender::new("player-1");
/// let same = player.clone();
/// let other = Sender::new("player-1");
///
/// assert_eq!(player, same);
/// assert_ne!(player, other);
/// assert_eq!(player.downcast_ref::<&str>(), Some(&"player-1"));
/// ```
#[derive(Clone)]
pub struct Sender {
    origin: Arc<dyn Any + Send + Sync>,
}

impl Sender {
    /// Wrap any value as a sender identity.
    pub fn new<T: Any + Send + Sync>(origin: T) -> Self {
        Self {
            origin: Arc::new(origin),
        }
    }

    /// Use an existing shared object as the sender, keeping its identity.
    pub fn from_arc<T: Any + Send + Sync>(origin: Arc<T>) -> Self {
        Self { origin }
    }

    /// Whether both senders refer to the same origin.
    pub fn same_as(&self, other: &Sender) -> bool {
        self.addr() == other.addr()
    }

    /// Borrow the wrapped origin if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.origin.downcast_ref::<T>()
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.origin) as *const ()
    }
}

impl PartialEq for Sender {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for Sender {}

impl fmt::Debug for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sender({:p})", self.addr())
    }
}
