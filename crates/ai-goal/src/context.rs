//! Activation contexts ("sparks") and the collaborator that requests them.

use std::fmt;

use serde::Deserialize;

/// Key of a group of goals that may compete with each other.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct ContextKey(String);

impl ContextKey {
    /// The context goals run in when nothing special was requested.
    pub const DEFAULT: &'static str = "freeplay";

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }
}

impl Default for ContextKey {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContextKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// External mode manager deciding which context is active.
pub trait ContextSource {
    fn requested_context(&self) -> ContextKey;

    /// One-shot: `true` if the game asked the active context's run to end
    /// since the last call.
    fn take_end_request(&mut self) -> bool {
        false
    }

    /// A goal of context `to` became current.
    fn on_context_switched(&mut self, _to: &ContextKey) {}
}

/// [`ContextSource`] driven by explicit calls.
#[derive(Clone, Debug, Default)]
pub struct ManualContextSource {
    requested:     ContextKey,
    end_requested: bool,
    switches:      usize,
}

impl ManualContextSource {
    pub fn new(requested: ContextKey) -> Self {
        Self { requested, end_requested: false, switches: 0 }
    }

    pub fn request(&mut self, key: ContextKey) {
        self.requested = key;
    }

    pub fn request_end(&mut self) {
        self.end_requested = true;
    }

    /// How many times a goal switch was reported.
    pub fn switches(&self) -> usize {
        self.switches
    }
}

impl ContextSource for ManualContextSource {
    fn requested_context(&self) -> ContextKey {
        self.requested.clone()
    }

    fn take_end_request(&mut self) -> bool {
        std::mem::take(&mut self.end_requested)
    }

    fn on_context_switched(&mut self, _to: &ContextKey) {
        self.switches += 1;
    }
}
