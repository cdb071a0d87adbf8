//! Change notification on top of a [`ParameterSource`].

use crate::params::{ParameterSnapshot, ParameterSource};

type Listener = Box<dyn FnMut(&ParameterSnapshot)>;

/// Evaluates a source at each sequence position and notifies subscribers
/// with the full snapshot whenever it differs from the last one delivered.
pub struct ParameterFeed<S: ParameterSource> {
    source: S,
    last: Option<ParameterSnapshot>,
    listeners: Vec<Listener>,
}

impl<S: ParameterSource> ParameterFeed<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            last: None,
            listeners: Vec::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Last snapshot delivered to subscribers, if any.
    pub fn current(&self) -> Option<&ParameterSnapshot> {
        self.last.as_ref()
    }

    /// Register a subscriber. It receives the next change, not the current value.
    pub fn on_values_change(&mut self, listener: impl FnMut(&ParameterSnapshot) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Evaluate at `position`; returns `true` when subscribers were notified.
    pub fn advance(&mut self, position: f32) -> bool {
        let snapshot = self.source.snapshot_at(position);
        if self.last.as_ref() == Some(&snapshot) {
            return false;
        }
        for listener in &mut self.listeners {
            listener(&snapshot);
        }
        self.last = Some(snapshot);
        true
    }
}

impl<S: ParameterSource> std::fmt::Debug for ParameterFeed<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterFeed")
            .field("last", &self.last)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
