use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_KEY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an [`EventKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(u64);

impl KeyId {
    fn next() -> Self {
        Self(NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value, useful for log correlation.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A unique event name whose emissions carry a payload of type `P`.
///
/// Every call to [`EventKey::new`] yields a distinct key, even when two keys
/// share a label. Equality and hashing only look at the [`KeyId`]; the label is
/// kept for diagnostics.
///
/// Keys are usually declared once as statics with [`event_key!`](crate::event_key).
///
/// # Examples
/// ```rust
/// use beacon_emitter::EventKey;
///
/// struct Moved { x: i32 }
///
/// let a = EventKey::<Moved>::new("moved");
/// let b = EventKey::<Moved>::new("moved");
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// ```
pub struct EventKey<P> {
    id: KeyId,
    label: &'static str,
    _payload: PhantomData<fn(&P)>,
}

impl<P> EventKey<P> {
    /// Creates a fresh key. The label does not need to be unique.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self { id: KeyId::next(), label, _payload: PhantomData }
    }

    #[must_use]
    pub const fn id(&self) -> KeyId {
        self.id
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }
}

// Manual impls: deriving would put bounds on `P`.
impl<P> Clone for EventKey<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for EventKey<P> {}

impl<P> PartialEq for EventKey<P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<P> Eq for EventKey<P> {}

impl<P> Hash for EventKey<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<P> fmt::Debug for EventKey<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventKey")
            .field("label", &self.label)
            .field("id", &self.id.0)
            .field("payload", &std::any::type_name::<P>())
            .finish()
    }
}

impl<P> fmt::Display for EventKey<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.label, self.id)
    }
}

/// Declares one or more lazily created, process-wide [`EventKey`] statics.
///
/// ```rust
/// use beacon_emitter::{Emitter, event_key};
///
/// pub struct Moved { pub x: i32, pub y: i32 }
///
/// event_key! {
///     /// Fired whenever the player changes position.
///     pub PLAYER_MOVE: Moved = "playerMove";
///     GAME_START: () = "gameStart";
/// }
///
/// let emitter = Emitter::new();
/// emitter.listen(&PLAYER_MOVE, |m| assert_eq!((m.x, m.y), (1, 2)));
/// assert_eq!(emitter.emit(&PLAYER_MOVE, &Moved { x: 1, y: 2 }), 1);
/// assert_eq!(emitter.emit(&GAME_START, &()), 0);
/// ```
#[macro_export]
macro_rules! event_key {
    ($($(#[$meta:meta])* $vis:vis $name:ident : $payload:ty = $label:expr;)+) => {
        $(
            $(#[$meta])*
            $vis static $name: ::std::sync::LazyLock<$crate::EventKey<$payload>> =
                ::std::sync::LazyLock::new(|| $crate::EventKey::new($label));
        )+
    };
}
