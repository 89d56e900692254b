//! The core implementation of a single NeoTrellis tile.

use heapless::Vec;
use seesaw_async::keypad::Edge;

use crate::edges::PressedKeys;
use crate::err::Error;
use crate::event::{to_physical, KeyEvent, KEY_COUNT};
use crate::fifo::EventFifo;
use crate::mask::EventMasks;
use crate::pixel::{PixelSink, Rgb};

/// Upper bound on raw bytes drained per poll; the engine's FIFO plus its
/// over-read padding stays well under this.
const POLL_BYTES: usize = 32;

/// One 4x4 key/pixel tile.
///
/// A tile owns a key-scan backend, a pixel sink, the armed-edge registry,
/// the pressed-key view and one callback slot per key. Keys are addressed
/// row-major, 0..16; the wiring remap stays internal.
///
/// Polling is cooperative: call [`sync`](NeoTrellis::sync) from a loop with
/// a sensible cadence (the engine refreshes its FIFO about every 17 ms;
/// polling faster than that just reads it empty).
pub struct NeoTrellis<TFIFO, TSINK, TCB = fn(KeyEvent)> {
    fifo: TFIFO,
    pixels: TSINK,
    masks: EventMasks,
    pressed: PressedKeys,
    callbacks: [Option<TCB>; KEY_COUNT as usize],
}

impl<TFIFO, TSINK, TCB> NeoTrellis<TFIFO, TSINK, TCB>
where
    TFIFO: EventFifo,
    TSINK: PixelSink,
    TCB: FnMut(KeyEvent),
{
    /// Creates a tile over its two collaborators. Nothing is armed and no
    /// callbacks are set.
    pub fn new(fifo: TFIFO, pixels: TSINK) -> Self {
        Self {
            fifo,
            pixels,
            masks: EventMasks::new(),
            pressed: PressedKeys::empty(),
            callbacks: core::array::from_fn(|_| None),
        }
    }

    /// Initializes the backend, routes its interrupt line and configures
    /// the pixel sink.
    pub async fn init(&mut self, interrupt: bool) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        self.fifo.init().await.map_err(Error::Backend)?;
        self.fifo
            .set_interrupt(interrupt)
            .await
            .map_err(Error::Backend)?;
        self.pixels.init().await.map_err(Error::Pixels)
    }

    /// Arms or disarms `edge` for `key`. The key's other three edge bits
    /// are untouched.
    pub async fn activate(
        &mut self,
        key: u8,
        edge: Edge,
        enable: bool,
    ) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        Self::check_key(key)?;
        self.fifo
            .arm(to_physical(key), edge, enable)
            .await
            .map_err(Error::Backend)?;
        self.masks.set(key, edge, enable);
        Ok(())
    }

    /// True when `(key, edge)` is armed.
    pub fn armed(&self, key: u8, edge: Edge) -> Result<bool, Error<TFIFO::Error, TSINK::Error>> {
        Self::check_key(key)?;
        Ok(self.masks.armed(key, edge))
    }

    /// Stages one key's color. Nothing shows until [`show`](NeoTrellis::show).
    pub async fn set_color(
        &mut self,
        key: u8,
        color: Rgb,
    ) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        Self::check_key(key)?;
        self.pixels
            .write(to_physical(key), color)
            .await
            .map_err(Error::Pixels)
    }

    /// Stages every key to `color`.
    pub async fn fill(&mut self, color: Rgb) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        for key in 0..KEY_COUNT {
            self.set_color(key, color).await?;
        }
        Ok(())
    }

    /// Pushes staged colors out to the pixels.
    pub async fn show(&mut self) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        self.pixels.flush().await.map_err(Error::Pixels)
    }

    /// Sets `key`'s callback, replacing any previous one.
    pub fn set_callback(
        &mut self,
        key: u8,
        callback: TCB,
    ) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        Self::check_key(key)?;
        self.callbacks[key as usize] = Some(callback);
        Ok(())
    }

    /// Clears `key`'s callback slot.
    pub fn clear_callback(&mut self, key: u8) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        Self::check_key(key)?;
        self.callbacks[key as usize] = None;
        Ok(())
    }

    /// The keys currently held down, as of the last successful poll.
    pub fn pressed(&self) -> PressedKeys {
        self.pressed
    }

    /// Drains the backend and returns this poll's armed events in delivery
    /// order.
    ///
    /// Raw records are decoded through the wiring remap; numbers past the
    /// tile (FIFO padding) and edges nothing armed are dropped. The
    /// pressed-key view is replaced in one step at the end; a backend error
    /// leaves it, and everything else, exactly as it was.
    pub async fn poll_events(
        &mut self,
    ) -> Result<Vec<KeyEvent, POLL_BYTES>, Error<TFIFO::Error, TSINK::Error>> {
        let available = self.fifo.available().await.map_err(Error::Backend)?;
        if available == 0 {
            return Ok(Vec::new());
        }

        let mut raw = [0u8; POLL_BYTES];
        let n = available.min(POLL_BYTES);
        self.fifo.read(&mut raw[..n]).await.map_err(Error::Backend)?;

        let mut events = Vec::new();
        let mut pressed = self.pressed;
        for &byte in &raw[..n] {
            let event = KeyEvent::from(byte);
            if event.key >= KEY_COUNT || !self.masks.armed(event.key, event.edge) {
                continue;
            }
            match event.edge {
                Edge::Rising => pressed.insert(event.key),
                Edge::Falling => pressed.remove(event.key),
                Edge::High | Edge::Low => {}
            }
            let _ = events.push(event);
        }
        self.pressed = pressed;
        Ok(events)
    }

    /// Polls, then fires each event's callback exactly once, in delivery
    /// order. Events on keys without a callback are dropped silently.
    /// Returns once every due callback has run; on a backend error no
    /// callback runs at all.
    pub async fn sync(&mut self) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        let events = self.poll_events().await?;
        for event in events {
            if let Some(callback) = self.callbacks[event.key as usize].as_mut() {
                callback(event);
            }
        }
        Ok(())
    }

    fn check_key(key: u8) -> Result<(), Error<TFIFO::Error, TSINK::Error>> {
        if key < KEY_COUNT {
            Ok(())
        } else {
            Err(Error::InvalidIndex { key })
        }
    }
}
