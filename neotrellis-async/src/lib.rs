//! An asynchronous, `no_std` driver for Adafruit NeoTrellis button/LED boards.
//!
//! A NeoTrellis tile is a 4x4 silicone keypad with an RGB pixel under every
//! key, run by a seesaw co-processor that scans the matrix and queues key
//! transitions in an event FIFO. This crate drives one tile
//! ([`NeoTrellis`]) or several composed edge-to-edge into one coordinate
//! space ([`MultiTrellis`]), over any `embedded-hal-async` I2C bus.
//!
//! Keys are addressed row-major, 0..16 per tile; the co-processor's own
//! wiring order never leaks out of the crate. Each key transition is
//! reported as an [`Edge`] and only armed edges produce events, so an
//! application arms what it cares about with
//! [`activate`](NeoTrellis::activate), hangs callbacks on keys, and calls
//! [`sync`](NeoTrellis::sync) from its control loop.
//!
//! The same event pipeline runs on two interchangeable backends: the
//! co-processor FIFO ([`fifo::SeesawKeypad`]) and a plain GPIO matrix
//! scanner ([`scan::MatrixKeypad`]) for the board variant wired without a
//! co-processor. Both hand the tile identical raw records, so behavior and
//! dispatch order do not depend on which one is underneath.

#![cfg_attr(not(test), no_std)]

pub mod edges;
pub mod err;
pub mod event;
pub mod fifo;
pub mod mask;
pub mod pixel;
pub mod queue;
pub mod scan;

mod grid;
mod trellis;

pub use grid::*;
pub use trellis::*;

pub use seesaw_async::keypad::{Edge, InvalidEdge};

pub use crate::err::Error;
pub use crate::event::KeyEvent;
pub use crate::pixel::Rgb;

/// Factory default bus address of a NeoTrellis board.
pub const DEFAULT_ADDR: u8 = 0x2E;
