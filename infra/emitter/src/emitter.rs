use crate::config::EmitterConfig;
use crate::error::EmitterError;
use crate::key::{EventKey, KeyId};
use crate::listener::{Listener, ListenerId};
use fxhash::FxHashMap;
use parking_lot::{Mutex, RwLock};
use std::any::{Any, type_name};
use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Weak};
use tracing::{debug, trace, warn};

/// Listeners of one key in registration order. Shared with in-flight
/// emissions, so mutation goes through [`Arc::make_mut`].
type ListenerSet<P> = Arc<Vec<Listener<P>>>;

#[derive(Debug)]
struct Slot {
    label: &'static str,
    /// A `ListenerSet<P>` for the payload type of the key.
    listeners: Box<dyn Any + Send + Sync>,
    len: usize,
    warned: bool,
}

impl Slot {
    fn new<P: 'static>(label: &'static str) -> Self {
        Self {
            label,
            listeners: Box::new(ListenerSet::<P>::default()),
            len: 0,
            warned: false,
        }
    }

    fn set<P: 'static>(&self) -> Option<&ListenerSet<P>> {
        self.listeners.downcast_ref()
    }

    fn set_mut<P: 'static>(&mut self) -> Option<&mut ListenerSet<P>> {
        self.listeners.downcast_mut()
    }
}

#[derive(Debug, Default)]
struct Registry {
    config: EmitterConfig,
    slots: RwLock<FxHashMap<KeyId, Slot>>,
}

impl Registry {
    fn insert<P: 'static>(&self, key: &EventKey<P>, listener: Listener<P>) -> bool {
        let listener_id = listener.id();

        let (len, first_overflow) = {
            let mut slots = self.slots.write();
            let slot = slots.entry(key.id()).or_insert_with(|| Slot::new::<P>(key.label()));
            let Some(set) = slot.set_mut::<P>() else {
                drop(slots);
                warn!(
                    emitter = %self.config.name,
                    event = key.label(),
                    payload = type_name::<P>(),
                    "Listener rejected: stored set has a different payload type"
                );
                return false;
            };

            if set.iter().any(|l| l.id() == listener_id) {
                drop(slots);
                trace!(
                    emitter = %self.config.name,
                    event = key.label(),
                    listener = listener_id.get(),
                    "Listener already registered"
                );
                return false;
            }

            Arc::make_mut(set).push(listener);
            let len = set.len();
            slot.len = len;

            let first_overflow = self.config.over_budget(len) && !slot.warned;
            slot.warned |= first_overflow;
            (len, first_overflow)
        };

        if first_overflow {
            warn!(
                emitter = %self.config.name,
                event = key.label(),
                listeners = len,
                max_listeners = self.config.max_listeners,
                "Possible listener leak: key exceeds its listener budget"
            );
        }
        debug!(
            emitter = %self.config.name,
            event = key.label(),
            listener = listener_id.get(),
            listeners = len,
            "Listener registered"
        );
        true
    }

    fn remove<P: 'static>(&self, key: KeyId, listener_id: ListenerId) -> bool {
        let (removed, label, remaining) = {
            let mut slots = self.slots.write();
            let Some(slot) = slots.get_mut(&key) else {
                return false;
            };
            let label = slot.label;
            let Some(set) = slot.set_mut::<P>() else {
                return false;
            };
            let Some(index) = set.iter().position(|l| l.id() == listener_id) else {
                return false;
            };

            let removed = Arc::make_mut(set).remove(index);
            let remaining = set.len();
            slot.len = remaining;
            if remaining == 0 {
                slots.remove(&key);
            }
            (removed, label, remaining)
        };

        // Dropped outside the lock: a callback's captures may call back into the emitter.
        drop(removed);

        debug!(
            emitter = %self.config.name,
            event = label,
            listener = listener_id.get(),
            listeners = remaining,
            "Listener unregistered"
        );
        true
    }

    /// The listeners of `key` at this instant, or `None` when it has none.
    fn snapshot<P: 'static>(
        &self,
        key: &EventKey<P>,
    ) -> Result<Option<ListenerSet<P>>, EmitterError> {
        let slots = self.slots.read();
        let Some(slot) = slots.get(&key.id()) else {
            return Ok(None);
        };
        slot.set::<P>().map(|set| Some(Arc::clone(set))).ok_or_else(|| {
            EmitterError::TypeMismatch {
                message: type_name::<P>().into(),
                context: Some(format!("listener set of event {key}").into()),
            }
        })
    }

    fn listener_count<P: 'static>(&self, key: &EventKey<P>) -> usize {
        self.slots.read().get(&key.id()).and_then(Slot::set::<P>).map_or(0, |set| set.len())
    }
}

/// A scope of typed listeners and the synchronous dispatcher that feeds them.
///
/// Each `Emitter::new()` is an independent registry; clones share it. Listeners
/// run inline on the thread calling [`Emitter::emit`], in registration order,
/// and no lock is held while they run, so a listener may freely register,
/// unregister, clear or emit on the same emitter.
///
/// # Examples
/// ```rust
/// use beacon_emitter::{Emitter, EventKey, Listener};
/// use std::sync::{Arc, Mutex};
///
/// let scored = EventKey::<u32>::new("scored");
/// let emitter = Emitter::new();
///
/// let total = Arc::new(Mutex::new(0));
/// let sink = Arc::clone(&total);
/// let listener = Listener::new(move |points: &u32| *sink.lock().unwrap() += points);
///
/// emitter.on(&scored, &listener);
/// emitter.emit(&scored, &5);
/// emitter.off(&scored, &listener);
/// emitter.emit(&scored, &7);
///
/// assert_eq!(*total.lock().unwrap(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    registry: Arc<Registry>,
}

impl Emitter {
    /// Creates an empty emitter with the default [`EmitterConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EmitterConfig) -> Self {
        Self { registry: Arc::new(Registry { config, slots: RwLock::default() }) }
    }

    #[must_use]
    pub fn config(&self) -> &EmitterConfig {
        &self.registry.config
    }

    /// Registers `listener` for `key`.
    ///
    /// Returns `false` when this listener (or a clone of it) was already
    /// registered for `key`; it is never stored twice.
    pub fn on<P: 'static>(&self, key: &EventKey<P>, listener: &Listener<P>) -> bool {
        self.registry.insert(key, listener.clone())
    }

    /// Wraps `callback` into a [`Listener`], registers it, and returns the handle
    /// needed to unregister it later.
    pub fn listen<P, F>(&self, key: &EventKey<P>, callback: F) -> Listener<P>
    where
        P: 'static,
        F: Fn(&P) + Send + Sync + 'static,
    {
        let listener = Listener::new(callback);
        self.registry.insert(key, listener.clone());
        listener
    }

    /// Registers `callback` for the next emission of `key` only.
    ///
    /// The callback runs at most once. The wrapper unregisters itself just
    /// before calling it, so a panicking callback leaves nothing registered.
    /// The returned handle is the wrapper, so passing it to [`Emitter::off`]
    /// cancels the callback before it fires.
    pub fn once<P, F>(&self, key: &EventKey<P>, callback: F) -> Listener<P>
    where
        P: 'static,
        F: FnOnce(&P) + Send + 'static,
    {
        let id = ListenerId::next();
        let key_id = key.id();
        let registry = Arc::downgrade(&self.registry);
        let pending = Mutex::new(Some(callback));

        let wrapper = Listener::with_id(id, move |payload: &P| {
            let Some(callback) = pending.lock().take() else {
                return;
            };
            if let Some(registry) = Weak::upgrade(&registry) {
                registry.remove::<P>(key_id, id);
            }
            callback(payload);
        });

        self.registry.insert(key, wrapper.clone());
        wrapper
    }

    /// Unregisters `listener` from `key`.
    ///
    /// Unknown keys and listeners are ignored. Returns whether anything was removed.
    pub fn off<P: 'static>(&self, key: &EventKey<P>, listener: &Listener<P>) -> bool {
        self.registry.remove::<P>(key.id(), listener.id())
    }

    /// Calls every listener registered for `key` with `payload`.
    ///
    /// The set is snapshotted when dispatch begins: every listener in it runs
    /// exactly once, even if it is unregistered by an earlier listener of the
    /// same emission, and listeners added meanwhile wait for the next one.
    ///
    /// A panicking listener unwinds straight through this call and the
    /// listeners after it are skipped. Use [`Emitter::try_emit`] to turn the
    /// panic into an error instead.
    ///
    /// Returns the number of listeners invoked.
    pub fn emit<P: 'static>(&self, key: &EventKey<P>, payload: &P) -> usize {
        let listeners = match self.registry.snapshot(key) {
            Ok(Some(listeners)) => listeners,
            Ok(None) => {
                trace!(
                    emitter = %self.registry.config.name,
                    event = key.label(),
                    "Event dropped: no listeners"
                );
                return 0;
            },
            Err(err) => {
                warn!(emitter = %self.registry.config.name, event = key.label(), %err, "Event dropped");
                return 0;
            },
        };

        for listener in listeners.iter() {
            listener.call(payload);
        }

        trace!(
            emitter = %self.registry.config.name,
            event = key.label(),
            count = listeners.len(),
            "Event dispatched"
        );
        listeners.len()
    }

    /// Like [`Emitter::emit`], but a panicking listener is caught.
    ///
    /// The emission stops at the first panic; listeners after it do not run.
    ///
    /// # Errors
    /// Returns [`EmitterError::ListenerPanicked`] with the panic message, or
    /// [`EmitterError::TypeMismatch`] if the registry invariant is broken.
    pub fn try_emit<P: 'static>(
        &self,
        key: &EventKey<P>,
        payload: &P,
    ) -> Result<usize, EmitterError> {
        let Some(listeners) = self.registry.snapshot(key)? else {
            return Ok(0);
        };

        for (index, listener) in listeners.iter().enumerate() {
            if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(|| listener.call(payload))) {
                let message = panic_message(panic.as_ref());
                warn!(
                    emitter = %self.registry.config.name,
                    event = key.label(),
                    listener = listener.id().get(),
                    skipped = listeners.len() - index - 1,
                    %message,
                    "Listener panicked; emission aborted"
                );
                return Err(EmitterError::ListenerPanicked {
                    message,
                    context: Some(format!("event {key}").into()),
                });
            }
        }

        Ok(listeners.len())
    }

    /// Removes every listener of `key` and returns how many there were.
    pub fn clear<P: 'static>(&self, key: &EventKey<P>) -> usize {
        let slot = self.registry.slots.write().remove(&key.id());
        let removed = slot.as_ref().map_or(0, |slot| slot.len);
        drop(slot);

        debug!(emitter = %self.registry.config.name, event = key.label(), removed, "Event cleared");
        removed
    }

    /// Removes every listener of every key, restoring the empty state.
    ///
    /// Returns the number of listeners removed.
    pub fn clear_all(&self) -> usize {
        let slots = std::mem::take(&mut *self.registry.slots.write());
        let keys = slots.len();
        let removed: usize = slots.values().map(|slot| slot.len).sum();
        drop(slots);

        debug!(emitter = %self.registry.config.name, keys, removed, "Emitter cleared");
        removed
    }

    #[must_use]
    pub fn listener_count<P: 'static>(&self, key: &EventKey<P>) -> usize {
        self.registry.listener_count(key)
    }

    #[must_use]
    pub fn has_listeners<P: 'static>(&self, key: &EventKey<P>) -> bool {
        self.listener_count(key) > 0
    }

    /// Number of keys that currently have at least one listener.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.slots.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> Cow<'static, str> {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        Cow::Borrowed(message)
    } else if let Some(message) = panic.downcast_ref::<String>() {
        Cow::Owned(message.clone())
    } else {
        Cow::Borrowed("non-string panic payload")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptied_keys_are_dropped() {
        let emitter = Emitter::new();
        let key = EventKey::<u8>::new("k");
        let listener = Listener::new(|_: &u8| {});

        emitter.on(&key, &listener);
        assert_eq!(emitter.len(), 1);

        emitter.off(&key, &listener);
        assert!(emitter.is_empty());
    }

    #[test]
    fn cached_length_tracks_the_set() {
        let emitter = Emitter::new();
        let key = EventKey::<u8>::new("k");
        let a = emitter.listen(&key, |_| {});
        let _b = emitter.listen(&key, |_| {});
        emitter.off(&key, &a);

        let slots = emitter.registry.slots.read();
        let slot = slots.get(&key.id()).expect("slot present");
        assert_eq!(slot.len, 1);
        assert_eq!(slot.set::<u8>().map(|s| s.len()), Some(1));
    }

    #[test]
    fn mismatched_slot_is_reported_not_dispatched() {
        let emitter = Emitter::new();
        let key = EventKey::<u8>::new("k");
        emitter.registry.slots.write().insert(key.id(), Slot::new::<String>("k"));

        assert!(!emitter.on(&key, &Listener::new(|_: &u8| {})));
        assert_eq!(emitter.emit(&key, &1), 0);
        assert!(matches!(emitter.try_emit(&key, &1), Err(EmitterError::TypeMismatch { .. })));
    }

    #[test]
    fn panic_message_handles_payload_kinds() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42_u8), "non-string panic payload");
    }
}
