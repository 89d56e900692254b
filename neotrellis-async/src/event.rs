//! Key numbering and the raw event byte format.
//!
//! Callers address keys row-major, 0..16 across a 4x4 tile. The key-scan
//! engine numbers the same keys in an 8-wide two-row-pair layout, so every
//! logical row starts a new 8-key bank on the wire. [`to_physical`] and
//! [`to_logical`] convert between the two; they are mutual inverses over the
//! tile's 16 keys.

use seesaw_async::keypad::Edge;

/// Keys on one tile.
pub const KEY_COUNT: u8 = 16;

/// Remaps a row-major key index into the engine's wiring order.
pub const fn to_physical(logical: u8) -> u8 {
    debug_assert!(logical < KEY_COUNT);
    (logical / 4) * 8 + (logical % 4)
}

/// Remaps an engine key number back to row-major order.
///
/// Total over `u8` on purpose: FIFO padding bytes decode to numbers at or
/// above [`KEY_COUNT`] and are dropped by the caller.
pub const fn to_logical(physical: u8) -> u8 {
    (physical / 8) * 4 + (physical % 8)
}

/// A single key observation, in row-major numbering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Row-major key index.
    pub key: u8,
    /// The observed edge.
    pub edge: Edge,
}

impl From<u8> for KeyEvent {
    /// Decodes a raw FIFO byte: engine key number in bits 2..7, edge in the
    /// low two bits.
    fn from(raw: u8) -> Self {
        KeyEvent {
            key: to_logical((raw >> 2) & 0x3F),
            edge: Edge::from_bits(raw & 0x3),
        }
    }
}

impl From<KeyEvent> for u8 {
    /// Encodes back to the raw FIFO byte form, key remapped to wiring order.
    fn from(event: KeyEvent) -> Self {
        (to_physical(event.key) << 2) | event.edge as u8
    }
}
