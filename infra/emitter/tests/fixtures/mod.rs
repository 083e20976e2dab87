use beacon_emitter::Listener;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOver {
    pub reason: String,
}

/// Records every payload handed to the listeners it creates.
#[derive(Debug)]
pub struct Recorder<T> {
    calls: Arc<Mutex<Vec<T>>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self { calls: Arc::clone(&self.calls) }
    }
}

impl<T: Clone + Send + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self { calls: Arc::new(Mutex::new(Vec::new())) }
    }

    /// A fresh listener (new identity) that records into this recorder.
    pub fn listener(&self) -> Listener<T> {
        let calls = Arc::clone(&self.calls);
        Listener::new(move |payload: &T| calls.lock().push(payload.clone()))
    }

    pub fn record(&self, payload: &T) {
        self.calls.lock().push(payload.clone());
    }

    pub fn calls(&self) -> Vec<T> {
        self.calls.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last(&self) -> Option<T> {
        self.calls.lock().last().cloned()
    }
}
