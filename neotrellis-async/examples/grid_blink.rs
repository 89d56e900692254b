//! A 2x2 grid (8x8 keys) with callbacks, simulated on the host.
//!
//! Every key is armed for both transitions; the grid callback queues the
//! absolute coordinates, and the loop lights blue on press, dark on
//! release, mirroring the classic multi-board blink demo:
//!
//! ```sh
//! RUST_LOG=info cargo run --example grid_blink
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embassy_time::{Duration, Timer};
use futures::executor::block_on;
use neotrellis_async::fifo::EventFifo;
use neotrellis_async::pixel::PixelSink;
use neotrellis_async::{Edge, MultiTrellis, NeoTrellis, Rgb};

/// A canned event source standing in for one tile's key-scan engine: each
/// poll pops the next batch of raw FIFO bytes.
#[derive(Clone, Default)]
struct DemoPad {
    batches: Rc<RefCell<VecDeque<Vec<u8>>>>,
    pending: Rc<RefCell<Vec<u8>>>,
}

impl DemoPad {
    fn queue(&self, physical: u8, edge: Edge) {
        self.batches
            .borrow_mut()
            .push_back(vec![(physical << 2) | edge as u8]);
    }
}

impl EventFifo for DemoPad {
    type Error = core::convert::Infallible;

    async fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn arm(&mut self, _physical: u8, _edge: Edge, _enable: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn set_interrupt(&mut self, _enable: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn available(&mut self) -> Result<usize, Self::Error> {
        let next = self.batches.borrow_mut().pop_front().unwrap_or_default();
        let len = next.len();
        *self.pending.borrow_mut() = next;
        Ok(len)
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        buf.copy_from_slice(&self.pending.borrow());
        Ok(())
    }
}

struct LoggingPixels {
    tile: &'static str,
}

impl PixelSink for LoggingPixels {
    type Error = core::convert::Infallible;

    async fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn write(&mut self, physical: u8, color: Rgb) -> Result<(), Self::Error> {
        log::info!(
            "{} pixel {physical:2} <- #{:02x}{:02x}{:02x}",
            self.tile,
            color.r,
            color.g,
            color.b
        );
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

async fn run() {
    let pads: [[DemoPad; 2]; 2] =
        core::array::from_fn(|_| core::array::from_fn(|_| DemoPad::default()));
    let names = [["tile(0,0)", "tile(0,1)"], ["tile(1,0)", "tile(1,1)"]];
    let tiles: [[_; 2]; 2] = core::array::from_fn(|r| {
        core::array::from_fn(|c| {
            NeoTrellis::new(pads[r][c].clone(), LoggingPixels { tile: names[r][c] })
        })
    });

    let mut grid = MultiTrellis::new(tiles);
    grid.init(false).await.unwrap();

    // light everything dark blue once, then arm and hook every key
    grid.fill(Rgb::new(0, 0, 8)).await.unwrap();
    grid.show().await.unwrap();

    let hits: Rc<RefCell<VecDeque<(u8, u8, Edge)>>> = Rc::default();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            grid.activate(x, y, Edge::Rising, true).await.unwrap();
            grid.activate(x, y, Edge::Falling, true).await.unwrap();
            let hits = hits.clone();
            grid.set_callback(x, y, move |x, y, edge| {
                log::info!("({x}, {y}) {edge:?}");
                hits.borrow_mut().push_back((x, y, edge));
            })
            .unwrap();
        }
    }

    // a little choreography: presses wander across three tiles
    pads[0][0].queue(9, Edge::Rising); // (1, 1)
    pads[0][0].queue(9, Edge::Falling);
    pads[0][1].queue(0, Edge::Rising); // (4, 0)
    pads[0][1].queue(0, Edge::Falling);
    pads[1][1].queue(27, Edge::Rising); // (7, 7)
    pads[1][1].queue(27, Edge::Falling);

    for _ in 0..4 {
        grid.sync().await.unwrap();

        let round: Vec<(u8, u8, Edge)> = hits.borrow_mut().drain(..).collect();
        for (x, y, edge) in round {
            let color = match edge {
                Edge::Rising => Rgb::new(0, 0, 64),
                _ => Rgb::new(0, 0, 8),
            };
            grid.set_color(x, y, color).await.unwrap();
        }
        grid.show().await.unwrap();

        Timer::after(Duration::from_millis(20)).await;
    }
}

fn main() {
    env_logger::init();
    block_on(run());
}
