//! The raw key-scan backend interface and its co-processor implementation.

use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::{I2c, SevenBitAddress};
use seesaw_async::keypad::Edge;
use seesaw_async::{Seesaw, SeesawError};

/// Settle time between asking for the FIFO count and trusting it.
const COUNT_SETTLE: Duration = Duration::from_micros(500);

/// A source of raw key events.
///
/// Two implementations exist: [`SeesawKeypad`], reading the co-processor's
/// event FIFO, and [`crate::scan::MatrixKeypad`], synthesizing byte-identical
/// records from a GPIO scan. Tiles depend only on this interface, so
/// application behavior is the same over either.
#[allow(async_fn_in_trait)]
pub trait EventFifo {
    type Error;

    /// Prepares the backend for polling.
    async fn init(&mut self) -> Result<(), Self::Error>;

    /// Arms or disarms one `(key, edge)` pair; `key` in wiring order.
    async fn arm(&mut self, physical: u8, edge: Edge, enable: bool) -> Result<(), Self::Error>;

    /// Routes the backend's interrupt line, where one exists.
    async fn set_interrupt(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Number of raw event bytes a following [`read`](EventFifo::read)
    /// should drain.
    async fn available(&mut self) -> Result<usize, Self::Error>;

    /// Fills `buf` with raw event bytes; callers size it from the preceding
    /// `available` answer.
    async fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;
}

/// The key-scan engine of a seesaw co-processor.
pub struct SeesawKeypad<TI2C> {
    seesaw: Seesaw<TI2C>,
}

impl<TI2C, TI2CERR> SeesawKeypad<TI2C>
where
    TI2C: I2c<SevenBitAddress, Error = TI2CERR>,
{
    /// Creates the backend for the co-processor at `address`.
    pub fn new(i2c: TI2C, address: SevenBitAddress) -> Self {
        Self {
            seesaw: Seesaw::new(i2c, address),
        }
    }

    /// The underlying protocol driver, for ad-hoc register access.
    pub fn seesaw(&mut self) -> &mut Seesaw<TI2C> {
        &mut self.seesaw
    }
}

impl<TI2C, TI2CERR> EventFifo for SeesawKeypad<TI2C>
where
    TI2C: I2c<SevenBitAddress, Error = TI2CERR>,
{
    type Error = SeesawError<TI2CERR>;

    /// Resets the chip and checks it answers as a seesaw.
    async fn init(&mut self) -> Result<(), Self::Error> {
        self.seesaw.init().await
    }

    async fn arm(&mut self, physical: u8, edge: Edge, enable: bool) -> Result<(), Self::Error> {
        self.seesaw.set_keypad_event(physical, edge, enable).await
    }

    async fn set_interrupt(&mut self, enable: bool) -> Result<(), Self::Error> {
        self.seesaw.keypad_interrupt(enable).await
    }

    async fn available(&mut self) -> Result<usize, Self::Error> {
        let count = self.seesaw.keypad_event_count().await?;
        Timer::after(COUNT_SETTLE).await;
        if count == 0 {
            return Ok(0);
        }
        // The engine's count lags the FIFO tail; reading two extra slots
        // catches up, and the padding decodes out of range downstream.
        Ok(count as usize + 2)
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.seesaw.read_keypad(buf).await
    }
}
