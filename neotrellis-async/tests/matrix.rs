//! Matrix-scan backend tests over simulated GPIO pins.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use futures::executor::block_on;
use neotrellis_async::event::to_physical;
use neotrellis_async::fifo::EventFifo;
use neotrellis_async::pixel::PixelSink;
use neotrellis_async::scan::MatrixKeypad;
use neotrellis_async::{Edge, KeyEvent, NeoTrellis};

/// The electrical state of a simulated 4x4 matrix with pull-ups on the
/// rows: a row reads low when any held key sits on a column that is
/// currently driven low.
#[derive(Default)]
struct MatrixWorld {
    col_low: [bool; 4],
    held: [[bool; 4]; 4], // held[row][col]
}

struct ColPin {
    col: usize,
    world: Rc<RefCell<MatrixWorld>>,
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
    world: Rc<RefCell<MatrixWorld>>,
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

fn matrix() -> (Rc<RefCell<MatrixWorld>>, MatrixKeypad<ColPin, RowPin>) {
    let world = Rc::new(RefCell::new(MatrixWorld::default()));
    let cols = core::array::from_fn(|col| ColPin { col, world: world.clone() });
    let rows = core::array::from_fn(|row| RowPin { row, world: world.clone() });
    (world.clone(), MatrixKeypad::new(cols, rows))
}

fn press(world: &Rc<RefCell<MatrixWorld>>, key: u8) {
    world.borrow_mut().held[(key / 4) as usize][(key % 4) as usize] = true;
}

fn release(world: &Rc<RefCell<MatrixWorld>>, key: u8) {
    world.borrow_mut().held[(key / 4) as usize][(key % 4) as usize] = false;
}

struct NullSink;

impl PixelSink for NullSink {
    type Error = core::convert::Infallible;

    async fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn write(&mut self, _physical: u8, _color: neotrellis_async::Rgb) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[test]
fn count_is_exact_and_bytes_match_the_wire_format() {
    let (world, mut scanner) = matrix();
    block_on(scanner.init()).unwrap();

    block_on(scanner.arm(to_physical(0), Edge::Rising, true)).unwrap();
    block_on(scanner.arm(to_physical(5), Edge::Rising, true)).unwrap();

    press(&world, 0);
    press(&world, 5);
    press(&world, 7); // unarmed, stays invisible

    let available = block_on(scanner.available()).unwrap();
    assert_eq!(available, 2);

    let mut buf = [0u8; 2];
    block_on(scanner.read(&mut buf)).unwrap();
    assert_eq!(buf[0], (to_physical(0) << 2) | Edge::Rising as u8);
    assert_eq!(buf[1], (to_physical(5) << 2) | Edge::Rising as u8);
}

#[test]
fn full_edge_walk_through_a_tile() {
    let (world, scanner) = matrix();
    let mut tile: NeoTrellis<_, _> = NeoTrellis::new(scanner, NullSink);
    block_on(tile.init(false)).unwrap();

    for edge in [Edge::High, Edge::Low, Edge::Falling, Edge::Rising] {
        block_on(tile.activate(5, edge, true)).unwrap();
    }

    // settle the scanner's idea of "previous": everything idle reads High
    let events = block_on(tile.poll_events()).unwrap();
    assert_eq!(&events[..], [KeyEvent { key: 5, edge: Edge::High }]);

    press(&world, 5);
    let events = block_on(tile.poll_events()).unwrap();
    assert_eq!(&events[..], [KeyEvent { key: 5, edge: Edge::Rising }]);
    assert!(tile.pressed().contains(5));

    let events = block_on(tile.poll_events()).unwrap();
    assert_eq!(&events[..], [KeyEvent { key: 5, edge: Edge::Low }]);

    release(&world, 5);
    let events = block_on(tile.poll_events()).unwrap();
    assert_eq!(&events[..], [KeyEvent { key: 5, edge: Edge::Falling }]);
    assert!(tile.pressed().is_empty());

    let events = block_on(tile.poll_events()).unwrap();
    assert_eq!(&events[..], [KeyEvent { key: 5, edge: Edge::High }]);
}

#[test]
fn three_pressed_two_armed_dispatch_ascending() {
    let (world, scanner) = matrix();
    let mut tile = NeoTrellis::new(scanner, NullSink);
    block_on(tile.init(false)).unwrap();

    let log: Rc<RefCell<Vec<u8>>> = Rc::default();
    let hook = |log: Rc<RefCell<Vec<u8>>>| move |event: KeyEvent| log.borrow_mut().push(event.key);

    for key in [2u8, 9] {
        block_on(tile.activate(key, Edge::Rising, true)).unwrap();
        tile.set_callback(key, hook(log.clone())).unwrap();
    }
    tile.set_callback(6, hook(log.clone())).unwrap(); // callback but never armed

    press(&world, 9);
    press(&world, 2);
    press(&world, 6);
    block_on(tile.sync()).unwrap();

    assert_eq!(*log.borrow(), [2, 9]);
}

#[test]
fn interrupt_request_is_accepted_with_a_warning() {
    let (_world, scanner) = matrix();
    let mut tile: NeoTrellis<_, _> = NeoTrellis::new(scanner, NullSink);
    // the matrix has no interrupt line; asking for one must not fail
    block_on(tile.init(true)).unwrap();
}
