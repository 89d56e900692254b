#![no_std]
#![doc = "Asynchronous shared I2C bus for embedded-hal drivers."]

// Note: This custom implementation exists to sidestep dependency version
// conflicts in the async embedded ecosystem. The seesaw boards driven by this
// workspace hang several 7-bit addresses off one bus, and a single board is
// addressed by more than one driver half, so bus handles must be cheap to
// hand out.
//
// For the official Embassy implementation, see:
// - https://github.com/embassy-rs/embassy/tree/main/embassy-embedded-hal/src/shared_bus

extern crate alloc;

pub mod i2c;
