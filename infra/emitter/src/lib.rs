//! # Emitter
//!
//! A small, typed, synchronous event emitter for a single process.
//!
//! ## Overview
//!
//! Listeners are registered against an [`EventKey<P>`], a unique token whose
//! type parameter fixes the payload every emission of that key carries.
//! [`Emitter::emit`] calls the key's current listeners inline, on the calling
//! thread, before it returns. Nothing is queued, persisted or sent elsewhere.
//!
//! ## Features
//!
//! * **Collision-free keys**: identity comes from a process-wide counter, never
//!   from the label.
//! * **Typed payloads**: a listener for `EventKey<P>` always receives a `&P`.
//! * **Set semantics**: a [`Listener`] handle is stored at most once per key.
//! * **Once-listeners**: [`Emitter::once`] fires for the first emission only.
//! * **Re-entrant**: listeners may register, unregister, clear or emit while
//!   being dispatched.
//! * **Shareable**: `Emitter` is `Clone + Send + Sync` (`FxHashMap` +
//!   `parking_lot::RwLock`).
//!
//! # Example
//!
//! ```rust
//! use beacon_emitter::{Emitter, event_key};
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct PlayerMove { x: i32, y: i32 }
//!
//! event_key! {
//!     PLAYER_MOVE: PlayerMove = "playerMove";
//! }
//!
//! let emitter = Emitter::new();
//! let moves = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&moves);
//! emitter.listen(&PLAYER_MOVE, move |m| sink.lock().unwrap().push(m.clone()));
//! emitter.emit(&PLAYER_MOVE, &PlayerMove { x: 10, y: 20 });
//!
//! assert_eq!(*moves.lock().unwrap(), vec![PlayerMove { x: 10, y: 20 }]);
//! ```

mod config;
mod emitter;
mod error;
mod key;
mod listener;

pub use config::{DEFAULT_MAX_LISTENERS, EmitterConfig};
pub use emitter::Emitter;
pub use error::{EmitterError, EmitterErrorExt};
pub use key::{EventKey, KeyId};
pub use listener::{Listener, ListenerId};
