//! The pixel sink interface and the NeoPixel implementation behind the
//! co-processor.

use embedded_hal_async::i2c::{I2c, SevenBitAddress};
use seesaw_async::neopixel::Speed;
use seesaw_async::{Seesaw, SeesawError};

use crate::event::to_logical;

/// The pad the pixel string hangs off on NeoTrellis boards.
const PIXEL_PIN: u8 = 3;

/// Pixels on one tile.
const PIXEL_COUNT: u16 = 16;

/// An RGB triple, passed through to the pixels untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// Where a tile's colors go.
///
/// Writes address keys in wiring order and stage only; nothing reaches the
/// LEDs until [`flush`](PixelSink::flush). Callers pick the flush cadence.
#[allow(async_fn_in_trait)]
pub trait PixelSink {
    type Error;

    /// Configures the sink. Called once, after the key-scan backend's own
    /// init.
    async fn init(&mut self) -> Result<(), Self::Error>;

    /// Stages one pixel.
    async fn write(&mut self, physical: u8, color: Rgb) -> Result<(), Self::Error>;

    /// Pushes staged colors out.
    async fn flush(&mut self) -> Result<(), Self::Error>;
}

/// The NeoPixel string a tile's co-processor drives.
pub struct TrellisPixels<TI2C> {
    seesaw: Seesaw<TI2C>,
}

impl<TI2C, TI2CERR> TrellisPixels<TI2C>
where
    TI2C: I2c<SevenBitAddress, Error = TI2CERR>,
{
    /// Creates the sink for the co-processor at `address`. Keypad and
    /// pixels live on the same chip, so this is the same address the
    /// key-scan backend uses.
    pub fn new(i2c: TI2C, address: SevenBitAddress) -> Self {
        Self {
            seesaw: Seesaw::new(i2c, address),
        }
    }
}

impl<TI2C, TI2CERR> PixelSink for TrellisPixels<TI2C>
where
    TI2C: I2c<SevenBitAddress, Error = TI2CERR>,
{
    type Error = SeesawError<TI2CERR>;

    /// Routes the string's pin, timing and buffer size. No chip reset here;
    /// that belongs to the keypad half's init, and resetting again would
    /// drop its arming state.
    async fn init(&mut self) -> Result<(), Self::Error> {
        self.seesaw.neopixel_set_pin(PIXEL_PIN).await?;
        self.seesaw.neopixel_set_speed(Speed::Khz800).await?;
        self.seesaw.neopixel_buffer_length(PIXEL_COUNT * 3).await
    }

    async fn write(&mut self, physical: u8, color: Rgb) -> Result<(), Self::Error> {
        // The string is wired in scan order, so the buffer position comes
        // back through the row-major index. Channels go out GRB.
        let offset = 3 * to_logical(physical) as u16;
        self.seesaw
            .neopixel_write(offset, &[color.g, color.r, color.b])
            .await
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.seesaw.neopixel_show().await
    }
}
