//! One tile on the GPIO matrix backend, simulated on the host.
//!
//! A scripted "finger" presses a few keys while the poll loop lights them
//! blue on press and clears them on release. Pixel traffic goes to the log:
//!
//! ```sh
//! RUST_LOG=info cargo run --example simple_tile
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use embassy_time::{Duration, Timer};
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use futures::executor::block_on;
use neotrellis_async::pixel::PixelSink;
use neotrellis_async::scan::MatrixKeypad;
use neotrellis_async::{Edge, NeoTrellis, Rgb};

/// Electrical state of the simulated matrix: rows read low when a held
/// key's column is driven low.
#[derive(Default)]
struct World {
    col_low: [bool; 4],
    held: [[bool; 4]; 4],
}

struct ColPin {
    col: usize,
    world: Rc<RefCell<World>>,
}

impl ErrorType for ColPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for ColPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.world.borrow_mut().col_low[self.col] = true;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.world.borrow_mut().col_low[self.col] = false;
        Ok(())
    }
}

struct RowPin {
    row: usize,
    world: Rc<RefCell<World>>,
}

impl ErrorType for RowPin {
    type Error = core::convert::Infallible;
}

impl InputPin for RowPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_low()?)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        let world = self.world.borrow();
        Ok((0..4).any(|col| world.col_low[col] && world.held[self.row][col]))
    }
}

/// A pixel sink that just narrates.
struct LoggingPixels;

impl PixelSink for LoggingPixels {
    type Error = core::convert::Infallible;

    async fn init(&mut self) -> Result<(), Self::Error> {
        log::debug!("pixels ready");
        Ok(())
    }

    async fn write(&mut self, physical: u8, color: Rgb) -> Result<(), Self::Error> {
        log::info!(
            "pixel {physical:2} <- #{:02x}{:02x}{:02x}",
            color.r,
            color.g,
            color.b
        );
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        log::debug!("show");
        Ok(())
    }
}

fn touch(world: &Rc<RefCell<World>>, key: u8, down: bool) {
    world.borrow_mut().held[(key / 4) as usize][(key % 4) as usize] = down;
    log::info!("key {key} {}", if down { "goes down" } else { "comes up" });
}

async fn run() {
    let world = Rc::new(RefCell::new(World::default()));
    let cols = core::array::from_fn(|col| ColPin { col, world: world.clone() });
    let rows = core::array::from_fn(|row| RowPin { row, world: world.clone() });

    let mut tile: NeoTrellis<_, _> = NeoTrellis::new(MatrixKeypad::new(cols, rows), LoggingPixels);
    tile.init(false).await.unwrap();

    for key in 0..16 {
        tile.activate(key, Edge::Rising, true).await.unwrap();
        tile.activate(key, Edge::Falling, true).await.unwrap();
    }

    for tick in 0u32..12 {
        match tick {
            2 => touch(&world, 5, true),
            4 => touch(&world, 5, false),
            5 => {
                touch(&world, 0, true);
                touch(&world, 9, true);
            }
            8 => {
                touch(&world, 0, false);
                touch(&world, 9, false);
            }
            _ => {}
        }

        for event in tile.poll_events().await.unwrap() {
            let color = match event.edge {
                Edge::Rising => Rgb::new(0, 0, 40),
                _ => Rgb::new(0, 0, 0),
            };
            tile.set_color(event.key, color).await.unwrap();
        }
        tile.show().await.unwrap();

        // the real key-scan engine refreshes about every 17 ms
        Timer::after(Duration::from_millis(20)).await;
    }

    log::info!("done, pressed set {:?}", tile.pressed());
}

fn main() {
    env_logger::init();
    block_on(run());
}
