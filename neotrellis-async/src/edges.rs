//! Pressed-set tracking and per-poll edge classification.

use core::fmt::{self, Debug};

use seesaw_async::keypad::Edge;

use crate::event::KEY_COUNT;

/// The keys of one tile observed held down in one poll, as a bitset.
///
/// Polls build a fresh value and replace the old one whole; the set is never
/// patched in place across a poll boundary.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct PressedKeys(u16);

impl PressedKeys {
    /// No keys down.
    pub const fn empty() -> Self {
        PressedKeys(0)
    }

    /// True when `key` is down.
    pub const fn contains(self, key: u8) -> bool {
        key < KEY_COUNT && self.0 & (1 << key) != 0
    }

    /// Marks `key` down.
    pub fn insert(&mut self, key: u8) {
        debug_assert!(key < KEY_COUNT);
        self.0 |= 1 << key;
    }

    /// Marks `key` up.
    pub fn remove(&mut self, key: u8) {
        debug_assert!(key < KEY_COUNT);
        self.0 &= !(1 << key);
    }

    /// True when no key is down.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The keys in this set, ascending.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..KEY_COUNT).filter(move |&key| self.contains(key))
    }
}

impl Debug for PressedKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Classifies every key of a tile by comparing two consecutive pressed sets.
///
/// Per key: newly down is `Rising`, newly up is `Falling`, still down is
/// `Low`, still up is `High`. A press and release inside one poll interval
/// never reached either set and reads as `High`; no attempt is made to infer
/// the missed transitions.
pub fn classify(previous: PressedKeys, current: PressedKeys) -> [Edge; KEY_COUNT as usize] {
    core::array::from_fn(|key| {
        let key = key as u8;
        match (previous.contains(key), current.contains(key)) {
            (false, true) => Edge::Rising,
            (true, false) => Edge::Falling,
            (true, true) => Edge::Low,
            (false, false) => Edge::High,
        }
    })
}
