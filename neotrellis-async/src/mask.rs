//! Armed-edge bookkeeping.
//!
//! Each key carries a 4-bit mask, one bit per [`Edge`] ordinal. A key whose
//! mask is all zero never produces an event, whatever happens physically.
//! The key-scan engine's arming register stores the same four bits shifted
//! up by one with an enable flag in bit 0; [`EdgeMask::arming_byte`] renders
//! that form.

use core::fmt::{self, Debug};

use seesaw_async::keypad::Edge;

use crate::event::KEY_COUNT;

/// The set of armed edges for one key.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct EdgeMask(u8);

impl EdgeMask {
    /// No edges armed. Keys start here.
    pub const fn none() -> Self {
        EdgeMask(0)
    }

    /// All four edges armed.
    pub const fn all() -> Self {
        EdgeMask(0b1111)
    }

    /// This mask with `edge` armed.
    pub const fn with(self, edge: Edge) -> Self {
        EdgeMask(self.0 | 1 << edge as u8)
    }

    /// This mask with `edge` disarmed.
    pub const fn without(self, edge: Edge) -> Self {
        EdgeMask(self.0 & !(1 << edge as u8))
    }

    /// True when `edge` is armed.
    pub const fn armed(self, edge: Edge) -> bool {
        self.0 & (1 << edge as u8) != 0
    }

    /// The flat 4-bit form, one bit per edge ordinal.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The engine's arming-register form: edge bits shifted up one, enable
    /// flag in bit 0.
    pub const fn arming_byte(self, enable: bool) -> u8 {
        (self.0 << 1) | enable as u8
    }
}

impl Debug for EdgeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeMask")
            .field("high", &self.armed(Edge::High))
            .field("low", &self.armed(Edge::Low))
            .field("falling", &self.armed(Edge::Falling))
            .field("rising", &self.armed(Edge::Rising))
            .finish()
    }
}

/// Armed-edge registry for a tile's 16 keys.
#[derive(Debug)]
pub struct EventMasks([EdgeMask; KEY_COUNT as usize]);

impl EventMasks {
    /// A registry with nothing armed.
    pub const fn new() -> Self {
        EventMasks([EdgeMask::none(); KEY_COUNT as usize])
    }

    /// Arms or disarms exactly the `(key, edge)` bit, leaving the key's
    /// other three untouched.
    pub fn set(&mut self, key: u8, edge: Edge, enable: bool) {
        debug_assert!(key < KEY_COUNT);
        let mask = &mut self.0[key as usize];
        *mask = if enable { mask.with(edge) } else { mask.without(edge) };
    }

    /// True when `(key, edge)` is armed.
    pub fn armed(&self, key: u8, edge: Edge) -> bool {
        debug_assert!(key < KEY_COUNT);
        self.0[key as usize].armed(edge)
    }

    /// The full mask for one key.
    pub fn mask(&self, key: u8) -> EdgeMask {
        debug_assert!(key < KEY_COUNT);
        self.0[key as usize]
    }
}

impl Default for EventMasks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arming_one_edge_leaves_the_others_alone() {
        let mut masks = EventMasks::new();
        masks.set(7, Edge::Rising, true);
        masks.set(7, Edge::Falling, true);
        masks.set(7, Edge::Rising, false);

        assert!(!masks.armed(7, Edge::Rising));
        assert!(masks.armed(7, Edge::Falling));
        assert!(!masks.armed(7, Edge::High));
        assert!(!masks.armed(7, Edge::Low));
    }

    #[test]
    fn keys_are_independent() {
        let mut masks = EventMasks::new();
        masks.set(0, Edge::Rising, true);
        assert!(!masks.armed(1, Edge::Rising));
    }

    #[test]
    fn arming_byte_accumulates_edges() {
        let mask = EdgeMask::none().with(Edge::Rising);
        assert_eq!(mask.arming_byte(true), 0b0001_0001);

        let mask = mask.with(Edge::Falling);
        assert_eq!(mask.arming_byte(true), 0b0001_1001);
        assert_eq!(mask.arming_byte(false), 0b0001_1000);
    }

    #[test]
    fn flat_bits_track_the_ordinals() {
        let mask = EdgeMask::none().with(Edge::High).with(Edge::Low);
        assert_eq!(mask.bits(), 0b0011);
        assert_eq!(EdgeMask::all().bits(), 0b1111);
    }
}
