//! Composition of tiles into one addressable surface.

use seesaw_async::keypad::Edge;

use crate::err::Error;
use crate::event::KEY_COUNT;
use crate::fifo::EventFifo;
use crate::pixel::{PixelSink, Rgb};
use crate::trellis::NeoTrellis;

/// An R-by-C arrangement of tiles addressed as one `(x, y)` surface,
/// `x` growing rightward across tile columns and `y` downward across tile
/// rows.
///
/// Grid callbacks receive absolute `(x, y, edge)`; the per-tile callback
/// slots underneath stay unused. Tiles are polled in row-major order, so
/// events from an earlier tile dispatch even when a later tile's poll
/// fails.
pub struct MultiTrellis<TFIFO, TSINK, const R: usize, const C: usize, TCB = fn(u8, u8, Edge)> {
    tiles: [[NeoTrellis<TFIFO, TSINK>; C]; R],
    callbacks: [[[Option<TCB>; KEY_COUNT as usize]; C]; R],
}

impl<TFIFO, TSINK, const R: usize, const C: usize, TCB> MultiTrellis<TFIFO, TSINK, R, C, TCB>
where
    TFIFO: EventFifo,
    TSINK: PixelSink,
    TCB: FnMut(u8, u8, Edge),
{
    /// Creates a grid over its tiles, row-major: `tiles[0][0]` holds keys
    /// `(0..4, 0..4)`.
    pub fn new(tiles: [[NeoTrellis<TFIFO, TSINK>; C]; R]) -> Self {
        Self {
            tiles,
            callbacks: core::array::from_fn(|_| {
                core::array::from_fn(|_| core::array::from_fn(|_| None))
            }),
        }
    }

    /// Keys across.
    pub const fn width(&self) -> u8 {
        (C * 4) as u8
    }

    /// Keys down.
    pub const fn height(&self) -> u8 {
        (R * 4) as u8
    }

    /// Initializes every tile in row-major order.
    pub async fn init(&mut self, interrupt: bool) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        for row in self.tiles.iter_mut() {
            for tile in row.iter_mut() {
                tile.init(interrupt).await?;
            }
        }
        Ok(())
    }

    /// Arms or disarms `edge` for the key at `(x, y)`.
    pub async fn activate(
        &mut self,
        x: u8,
        y: u8,
        edge: Edge,
        enable: bool,
    ) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        let (tile_row, tile_col, key) = Self::locate(x, y)?;
        self.tiles[tile_row][tile_col].activate(key, edge, enable).await
    }

    /// Stages the color of the key at `(x, y)`.
    pub async fn set_color(
        &mut self,
        x: u8,
        y: u8,
        color: Rgb,
    ) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        let (tile_row, tile_col, key) = Self::locate(x, y)?;
        self.tiles[tile_row][tile_col].set_color(key, color).await
    }

    /// Stages every key on every tile to `color`.
    pub async fn fill(&mut self, color: Rgb) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        for row in self.tiles.iter_mut() {
            for tile in row.iter_mut() {
                tile.fill(color).await?;
            }
        }
        Ok(())
    }

    /// Flushes every tile's pixels.
    pub async fn show(&mut self) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        for row in self.tiles.iter_mut() {
            for tile in row.iter_mut() {
                tile.show().await?;
            }
        }
        Ok(())
    }

    /// Sets the callback for `(x, y)`, replacing any previous one.
    pub fn set_callback(
        &mut self,
        x: u8,
        y: u8,
        callback: TCB,
    ) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        let (tile_row, tile_col, key) = Self::locate(x, y)?;
        self.callbacks[tile_row][tile_col][key as usize] = Some(callback);
        Ok(())
    }

    /// Clears the callback slot for `(x, y)`.
    pub fn clear_callback(&mut self, x: u8, y: u8) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        let (tile_row, tile_col, key) = Self::locate(x, y)?;
        self.callbacks[tile_row][tile_col][key as usize] = None;
        Ok(())
    }

    /// Polls every tile in row-major order and fires grid callbacks with
    /// absolute coordinates, in each tile's delivery order.
    pub async fn sync(&mut self) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        for tile_row in 0..R {
            for tile_col in 0..C {
                let events = self.tiles[tile_row][tile_col].poll_events().await?;
                for event in events {
                    let x = (tile_col as u8) * 4 + event.key % 4;
                    let y = (tile_row as u8) * 4 + event.key / 4;
                    if let Some(callback) =
                        self.callbacks[tile_row][tile_col][event.key as usize].as_mut()
                    {
                        callback(x, y, event.edge);
                    }
                }
            }
        }
        Ok(())
    }

    fn locate(x: u8, y: u8) -> Result<(usize, usize, u8), Error<TFIFO::Error, TSINK::Error>> {
        if (x as usize) < C * 4 && (y as usize) < R * 4 {
            Ok((y as usize / 4, x as usize / 4, (y % 4) * 4 + (x % 4)))
        } else {
            Err(Error::InvalidCoordinate { x, y })
        }
    }
}
