//! Wire types for the seesaw key-scan engine.
//!
//! The engine reports each observation as one byte: the key number in the
//! upper six bits and an [`Edge`] in the lower two. Arming writes use the
//! [`EventArming`] byte layout.

/// A key-state observation reported by the key-scan engine.
///
/// `High`/`Low` describe a steady level, `Falling`/`Rising` a transition.
/// In the engine's numbering `Rising` reports a key going down and
/// `Falling` a key coming back up.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Steady released.
    High = 0,
    /// Steady pressed.
    Low = 1,
    /// Just released.
    Falling = 2,
    /// Just pressed.
    Rising = 3,
}

impl Edge {
    /// Recovers the edge from the low two bits of a FIFO event byte.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0 => Edge::High,
            1 => Edge::Low,
            2 => Edge::Falling,
            _ => Edge::Rising,
        }
    }

    /// True for the two transition edges.
    pub const fn is_transition(self) -> bool {
        matches!(self, Edge::Falling | Edge::Rising)
    }
}

/// A byte that does not name one of the four edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidEdge(pub u8);

impl TryFrom<u8> for Edge {
    type Error = InvalidEdge;

    fn try_from(value: u8) -> Result<Self, InvalidEdge> {
        if value > Edge::Rising as u8 {
            return Err(InvalidEdge(value));
        }
        Ok(Edge::from_bits(value))
    }
}

/// One arming update for a `(key, edge)` pair in the EVENT register layout:
/// bit 0 carries the enable flag, bits 1 through 4 select the edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EventArming {
    pub edge: Edge,
    pub enable: bool,
}

impl From<EventArming> for u8 {
    fn from(val: EventArming) -> Self {
        (1 << (val.edge as u8 + 1)) | val.enable as u8
    }
}

impl TryFrom<u8> for EventArming {
    type Error = InvalidEdge;

    /// Decodes an arming byte. Exactly one edge bit must be set.
    fn try_from(value: u8) -> Result<Self, InvalidEdge> {
        let edge_bits = value >> 1;
        if edge_bits.count_ones() != 1 || edge_bits > 0b1000 {
            return Err(InvalidEdge(value));
        }
        Ok(EventArming {
            edge: Edge::from_bits(edge_bits.trailing_zeros() as u8),
            enable: value & 0x01 != 0,
        })
    }
}
