//! LogStore: persistent key → line entries and a queue of expiring messages.

use std::collections::{HashMap, VecDeque};

use crate::data::inspect::{BindingKey, ObjectHandle};
use crate::data::series::SeriesKey;

/// Persistent log entries are keyed the same way series are.
pub type LogKey = SeriesKey;

#[derive(Debug, Clone, PartialEq)]
pub struct TransientLog {
    pub text: String,
    /// Absolute host time (seconds) after which the entry is gone.
    pub expires_at: f64,
}

/// On-screen text: reflected member prints, manual persistent lines and
/// transient messages.
///
/// Transient messages all share one lifetime, so expiry order equals insertion
/// order and expiring is a matter of popping from the front.
pub struct LogStore {
    lifetime: f64,
    transient: VecDeque<TransientLog>,
    persistent: HashMap<LogKey, String>,
    persistent_order: Vec<LogKey>,
    reflected: Vec<(BindingKey, String)>,
}

impl LogStore {
    pub fn new(lifetime_secs: f64) -> Self {
        Self {
            lifetime: lifetime_secs,
            transient: VecDeque::new(),
            persistent: HashMap::new(),
            persistent_order: Vec::new(),
            reflected: Vec::new(),
        }
    }

    pub fn lifetime(&self) -> f64 {
        self.lifetime
    }

    /// Queue a message that disappears `lifetime` seconds after `now`.
    pub fn log(&mut self, text: impl Into<String>, now: f64) {
        self.transient.push_back(TransientLog {
            text: text.into(),
            expires_at: now + self.lifetime,
        });
    }

    /// Drop the expired prefix of the transient queue.
    pub fn expire(&mut self, now: f64) {
        while self
            .transient
            .front()
            .is_some_and(|log| log.expires_at <= now)
        {
            self.transient.pop_front();
        }
    }

    /// Drop the `count` oldest transient messages.
    pub fn discard_oldest_transients(&mut self, count: usize) {
        let count = count.min(self.transient.len());
        self.transient.drain(..count);
    }

    pub fn transient_len(&self) -> usize {
        self.transient.len()
    }

    pub fn transient_newest_first(&self) -> impl Iterator<Item = &TransientLog> {
        self.transient.iter().rev()
    }

    /// Create or overwrite the line stored under `key`.
    pub fn log_persistent(&mut self, key: impl Into<LogKey>, text: impl Into<String>) {
        let key = key.into();
        if !self.persistent.contains_key(&key) {
            self.persistent_order.push(key.clone());
        }
        self.persistent.insert(key, text.into());
    }

    pub fn remove_persistent(&mut self, key: &LogKey) {
        if self.persistent.remove(key).is_some() {
            self.persistent_order.retain(|k| k != key);
        }
    }

    pub fn clear_persistent(&mut self) {
        self.persistent.clear();
        self.persistent_order.clear();
    }

    pub fn persistent(&self, key: &LogKey) -> Option<&str> {
        self.persistent.get(key).map(String::as_str)
    }

    /// Update the printed line of a reflected member.
    pub fn set_reflected(&mut self, binding: BindingKey, text: String) {
        match self.reflected.iter_mut().find(|(b, _)| *b == binding) {
            Some((_, line)) => *line = text,
            None => self.reflected.push((binding, text)),
        }
    }

    pub fn remove_reflected_for(&mut self, object: ObjectHandle) {
        self.reflected.retain(|(b, _)| b.object != object);
    }

    pub fn clear_reflected(&mut self) {
        self.reflected.clear();
    }

    /// Drop transient, persistent and reflected lines alike.
    pub fn clear(&mut self) {
        self.transient.clear();
        self.clear_persistent();
        self.clear_reflected();
    }

    /// Reflected lines first, then manual lines in first-insertion order.
    pub fn persistent_lines(&self) -> impl Iterator<Item = &str> {
        self.reflected
            .iter()
            .map(|(_, line)| line.as_str())
            .chain(
                self.persistent_order
                    .iter()
                    .filter_map(|k| self.persistent.get(k).map(String::as_str)),
            )
    }

    pub fn is_empty(&self) -> bool {
        self.transient.is_empty() && self.persistent.is_empty() && self.reflected.is_empty()
    }
}
