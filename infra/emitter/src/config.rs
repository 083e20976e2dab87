use serde::Deserialize;
use std::borrow::Cow;

/// Listener count per key above which a leak warning is logged.
pub const DEFAULT_MAX_LISTENERS: usize = 10;
const DEFAULT_NAME: &str = "emitter";

/// Settings for a single [`Emitter`](crate::Emitter) scope.
///
/// Deserializable so embedding applications can keep it in their own config
/// files; every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Name attached to every log record of this emitter.
    pub name: Cow<'static, str>,
    /// Warn once per key when it holds more listeners than this. `0` disables the check.
    pub max_listeners: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self { name: Cow::Borrowed(DEFAULT_NAME), max_listeners: DEFAULT_MAX_LISTENERS }
    }
}

impl EmitterConfig {
    #[must_use]
    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub const fn max_listeners(mut self, max: usize) -> Self {
        self.max_listeners = max;
        self
    }

    /// Whether `count` listeners on one key exceed the configured budget.
    pub(crate) const fn over_budget(&self, count: usize) -> bool {
        self.max_listeners != 0 && count > self.max_listeners
    }
}
