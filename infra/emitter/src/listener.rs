use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Listener`]. Clones of a listener share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

type Callback<P> = dyn Fn(&P) + Send + Sync;

/// A cloneable handle to a callback receiving payloads of type `P`.
///
/// The handle *is* the listener's identity: registering two clones of the same
/// handle on one key stores it once, and any clone can be used to unregister it.
/// Two handles built from identical closures are still different listeners.
pub struct Listener<P> {
    id: ListenerId,
    callback: Arc<Callback<P>>,
}

impl<P> Listener<P> {
    /// Wraps a closure into a new listener with a fresh identity.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        Self::with_id(ListenerId::next(), callback)
    }

    pub(crate) fn with_id<F>(id: ListenerId, callback: F) -> Self
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        Self { id, callback: Arc::new(callback) }
    }

    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// Invokes the callback directly, outside of any emitter.
    pub fn call(&self, payload: &P) {
        (self.callback)(payload);
    }
}

impl<P> Clone for Listener<P> {
    fn clone(&self) -> Self {
        Self { id: self.id, callback: Arc::clone(&self.callback) }
    }
}

impl<P> PartialEq for Listener<P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<P> Eq for Listener<P> {}

impl<P> fmt::Debug for Listener<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id.0)
            .field("payload", &std::any::type_name::<P>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn clones_share_identity() {
        let listener = Listener::<u32>::new(|_| {});
        let clone = listener.clone();

        assert_eq!(listener, clone);
        assert_eq!(listener.id(), clone.id());
    }

    #[test]
    fn identical_closures_are_distinct_listeners() {
        let a = Listener::<u32>::new(|_| {});
        let b = Listener::<u32>::new(|_| {});

        assert_ne!(a, b);
    }

    #[test]
    fn call_forwards_the_payload() {
        let total = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&total);
        let listener = Listener::<usize>::new(move |n| {
            sink.fetch_add(*n, Ordering::SeqCst);
        });

        listener.call(&3);
        listener.call(&4);

        assert_eq!(total.load(Ordering::SeqCst), 7);
    }
}
