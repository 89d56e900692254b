//! GPIO matrix-scan backend: a software stand-in for the co-processor.
//!
//! One variant of the hardware drives the 4x4 key matrix straight off GPIO
//! with no co-processor in between. This backend scans it each poll, runs
//! the same classify/arm/build pipeline the FIFO path feeds through, and
//! hands the tile byte-identical raw records.

use embassy_time::{Duration, Timer};
use embedded_hal::digital::{InputPin, OutputPin};
use heapless::Vec;
use seesaw_async::keypad::Edge;

use crate::edges::{classify, PressedKeys};
use crate::err::PinError;
use crate::event::{to_logical, KEY_COUNT};
use crate::fifo::EventFifo;
use crate::mask::EventMasks;
use crate::queue::build_events;

/// Strobe settle before sampling the rows of one column.
const COLUMN_SETTLE: Duration = Duration::from_micros(5);

/// A 4x4 key matrix scanned over GPIO: column pins strobed low one at a
/// time, row pins read active-low against pull-ups.
///
/// Each [`available`](EventFifo::available) call performs one scan and
/// replaces the pending batch; the count it returns is exact, with no
/// padding records.
pub struct MatrixKeypad<TCOL, TROW> {
    cols: [TCOL; 4],
    rows: [TROW; 4],
    masks: EventMasks,
    previous: PressedKeys,
    pending: Vec<u8, { KEY_COUNT as usize }>,
}

impl<TCOL, TROW, TPINERR> MatrixKeypad<TCOL, TROW>
where
    TCOL: OutputPin<Error = TPINERR>,
    TROW: InputPin<Error = TPINERR>,
{
    /// Creates the backend over its column and row pins, row-major: key 0
    /// sits at `(rows[0], cols[0])`.
    pub fn new(cols: [TCOL; 4], rows: [TROW; 4]) -> Self {
        Self {
            cols,
            rows,
            masks: EventMasks::new(),
            previous: PressedKeys::empty(),
            pending: Vec::new(),
        }
    }

    async fn scan(&mut self) -> Result<PressedKeys, PinError<TPINERR>> {
        let mut current = PressedKeys::empty();
        for col in 0..4u8 {
            self.cols[col as usize].set_low().map_err(PinError::Output)?;
            Timer::after(COLUMN_SETTLE).await;
            for row in 0..4u8 {
                if self.rows[row as usize].is_low().map_err(PinError::Input)? {
                    current.insert(row * 4 + col);
                }
            }
            self.cols[col as usize].set_high().map_err(PinError::Output)?;
        }
        Ok(current)
    }
}

impl<TCOL, TROW, TPINERR> EventFifo for MatrixKeypad<TCOL, TROW>
where
    TCOL: OutputPin<Error = TPINERR>,
    TROW: InputPin<Error = TPINERR>,
{
    type Error = PinError<TPINERR>;

    /// Parks all columns high.
    async fn init(&mut self) -> Result<(), Self::Error> {
        for col in self.cols.iter_mut() {
            col.set_high().map_err(PinError::Output)?;
        }
        Ok(())
    }

    async fn arm(&mut self, physical: u8, edge: Edge, enable: bool) -> Result<(), Self::Error> {
        self.masks.set(to_logical(physical), edge, enable);
        Ok(())
    }

    async fn set_interrupt(&mut self, enable: bool) -> Result<(), Self::Error> {
        if enable {
            log::warn!("matrix scanner has no interrupt line");
        }
        Ok(())
    }

    async fn available(&mut self) -> Result<usize, Self::Error> {
        let current = self.scan().await?;
        let edges = classify(self.previous, current);
        self.previous = current;

        self.pending.clear();
        for event in build_events(&edges, &self.masks) {
            let _ = self.pending.push(u8::from(event));
        }
        Ok(self.pending.len())
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.clear();
        Ok(())
    }
}
