//! An asynchronous, `no_std` driver for the Adafruit seesaw I/O co-processor.
//!
//! The seesaw exposes its peripherals as function modules behind an I2C
//! register scheme: every access names a module base and a function register
//! within it. This crate covers the modules the NeoTrellis family of boards
//! uses — STATUS (identification and reset), KEYPAD (the key-scan engine with
//! its event FIFO) and NEOPIXEL (the pixel string driver).
//!
//! The chip needs a stop and a short turnaround between addressing a register
//! and reading it back; [`Seesaw::read`] owns that timing.
//!
//! # Usage
//!
//! The driver is generic over any I2C peripheral implementing the
//! `embedded-hal-async::i2c::I2c` trait.
//!
//! ```no_run
//! # async fn demo<I2C, E>(i2c: I2C) -> Result<(), seesaw_async::SeesawError<E>>
//! # where
//! #     I2C: embedded_hal_async::i2c::I2c<Error = E>,
//! # {
//! use seesaw_async::keypad::Edge;
//! use seesaw_async::Seesaw;
//!
//! let mut seesaw = Seesaw::new(i2c, 0x2E);
//! seesaw.init().await?;
//!
//! // Ask the key-scan engine to report presses of its key 9.
//! seesaw.set_keypad_event(9, Edge::Rising, true).await?;
//!
//! let count = seesaw.keypad_event_count().await?;
//! let mut events = [0u8; 8];
//! if count > 0 {
//!     seesaw.read_keypad(&mut events[..count as usize]).await?;
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod keypad;
pub mod neopixel;
pub mod reg;
mod seesaw;

pub use seesaw::*;
