//! Grid routing and dispatch tests over scripted tile backends.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures::executor::block_on;
use neotrellis_async::fifo::EventFifo;
use neotrellis_async::pixel::PixelSink;
use neotrellis_async::{Edge, Error, MultiTrellis, NeoTrellis, Rgb};

#[derive(Debug, PartialEq)]
struct FifoErr;

enum PollStep {
    Events(Vec<u8>),
    FailAvailable,
}

#[derive(Default)]
struct FifoState {
    arm_log: Vec<(u8, Edge, bool)>,
    polls: VecDeque<PollStep>,
}

#[derive(Clone, Default)]
struct MockFifo(Rc<RefCell<FifoState>>);

impl EventFifo for MockFifo {
    type Error = FifoErr;

    async fn init(&mut self) -> Result<(), FifoErr> {
        Ok(())
    }

    async fn arm(&mut self, physical: u8, edge: Edge, enable: bool) -> Result<(), FifoErr> {
        self.0.borrow_mut().arm_log.push((physical, edge, enable));
        Ok(())
    }

    async fn set_interrupt(&mut self, _enable: bool) -> Result<(), FifoErr> {
        Ok(())
    }

    async fn available(&mut self) -> Result<usize, FifoErr> {
        let mut state = self.0.borrow_mut();
        match state.polls.front() {
            Some(PollStep::Events(bytes)) => Ok(bytes.len()),
            Some(PollStep::FailAvailable) => {
                state.polls.pop_front();
                Err(FifoErr)
            }
            None => Ok(0),
        }
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<(), FifoErr> {
        match self.0.borrow_mut().polls.pop_front() {
            Some(PollStep::Events(bytes)) => {
                buf.copy_from_slice(&bytes);
                Ok(())
            }
            _ => panic!("read without a scripted poll"),
        }
    }
}

#[derive(Default)]
struct SinkState {
    writes: Vec<(u8, Rgb)>,
    flushes: usize,
}

#[derive(Clone, Default)]
struct RecordingSink(Rc<RefCell<SinkState>>);

impl PixelSink for RecordingSink {
    type Error = core::convert::Infallible;

    async fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn write(&mut self, physical: u8, color: Rgb) -> Result<(), Self::Error> {
        self.0.borrow_mut().writes.push((physical, color));
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().flushes += 1;
        Ok(())
    }
}

fn parts<const R: usize, const C: usize>() -> (
    [[MockFifo; C]; R],
    [[RecordingSink; C]; R],
    [[NeoTrellis<MockFifo, RecordingSink>; C]; R],
) {
    let fifos: [[MockFifo; C]; R] =
        core::array::from_fn(|_| core::array::from_fn(|_| MockFifo::default()));
    let sinks: [[RecordingSink; C]; R] =
        core::array::from_fn(|_| core::array::from_fn(|_| RecordingSink::default()));
    let tiles = core::array::from_fn(|r| {
        core::array::from_fn(|c| NeoTrellis::new(fifos[r][c].clone(), sinks[r][c].clone()))
    });
    (fifos, sinks, tiles)
}

fn raw(physical: u8, edge: Edge) -> u8 {
    (physical << 2) | edge as u8
}

#[test]
fn coordinates_route_to_exactly_one_tile() {
    let (fifos, sinks, tiles) = parts::<3, 2>();
    let mut grid: MultiTrellis<_, _, 3, 2> = MultiTrellis::new(tiles);

    block_on(grid.activate(5, 9, Edge::Rising, true)).unwrap();

    for (r, row) in fifos.iter().enumerate() {
        for (c, fifo) in row.iter().enumerate() {
            let expected: &[(u8, Edge, bool)] = if (r, c) == (2, 1) {
                // local key 5 sits at wiring position 9
                &[(9, Edge::Rising, true)]
            } else {
                &[]
            };
            assert_eq!(fifo.0.borrow().arm_log, expected);
        }
    }

    block_on(grid.set_color(5, 9, Rgb::new(1, 2, 3))).unwrap();
    assert_eq!(sinks[2][1].0.borrow().writes, [(9, Rgb::new(1, 2, 3))]);
    assert!(sinks[0][0].0.borrow().writes.is_empty());
}

#[test]
fn out_of_range_coordinates_are_rejected() {
    let (_fifos, _sinks, tiles) = parts::<2, 2>();
    let mut grid: MultiTrellis<_, _, 2, 2> = MultiTrellis::new(tiles);

    let err = block_on(grid.activate(8, 0, Edge::Rising, true)).unwrap_err();
    assert!(matches!(err, Error::InvalidCoordinate { x: 8, y: 0 }));

    let err = block_on(grid.set_color(0, 8, Rgb::new(0, 0, 0))).unwrap_err();
    assert!(matches!(err, Error::InvalidCoordinate { x: 0, y: 8 }));

    assert!(grid.clear_callback(3, 12).is_err());
    assert_eq!(grid.width(), 8);
    assert_eq!(grid.height(), 8);
}

#[test]
fn sync_walks_tiles_row_major_with_absolute_coordinates() {
    let (fifos, _sinks, tiles) = parts::<2, 2>();
    let mut grid = MultiTrellis::new(tiles);

    let log: Rc<RefCell<Vec<(u8, u8, Edge)>>> = Rc::default();
    let hook = |log: Rc<RefCell<Vec<(u8, u8, Edge)>>>| {
        move |x: u8, y: u8, edge: Edge| log.borrow_mut().push((x, y, edge))
    };

    // tile (0,0) key 5 -> (1,1); tile (0,1) key 0 -> (4,0);
    // tile (1,0) key 15 -> (3,7)
    block_on(grid.activate(1, 1, Edge::Rising, true)).unwrap();
    block_on(grid.activate(4, 0, Edge::Rising, true)).unwrap();
    block_on(grid.activate(3, 7, Edge::Falling, true)).unwrap();
    grid.set_callback(1, 1, hook(log.clone())).unwrap();
    grid.set_callback(4, 0, hook(log.clone())).unwrap();
    grid.set_callback(3, 7, hook(log.clone())).unwrap();

    // queue events out of visit order to prove dispatch follows the walk
    fifos[1][0].0.borrow_mut().polls.push_back(PollStep::Events(vec![raw(27, Edge::Falling)]));
    fifos[0][1].0.borrow_mut().polls.push_back(PollStep::Events(vec![raw(0, Edge::Rising)]));
    fifos[0][0].0.borrow_mut().polls.push_back(PollStep::Events(vec![raw(9, Edge::Rising)]));

    block_on(grid.sync()).unwrap();

    assert_eq!(
        *log.borrow(),
        [
            (1, 1, Edge::Rising),
            (4, 0, Edge::Rising),
            (3, 7, Edge::Falling),
        ]
    );
}

#[test]
fn a_failing_tile_stops_the_walk_after_earlier_dispatch() {
    let (fifos, _sinks, tiles) = parts::<1, 2>();
    let mut grid = MultiTrellis::new(tiles);

    let log: Rc<RefCell<Vec<(u8, u8, Edge)>>> = Rc::default();
    let hook = |log: Rc<RefCell<Vec<(u8, u8, Edge)>>>| {
        move |x: u8, y: u8, edge: Edge| log.borrow_mut().push((x, y, edge))
    };

    block_on(grid.activate(0, 0, Edge::Rising, true)).unwrap();
    grid.set_callback(0, 0, hook(log.clone())).unwrap();

    fifos[0][0].0.borrow_mut().polls.push_back(PollStep::Events(vec![raw(0, Edge::Rising)]));
    fifos[0][1].0.borrow_mut().polls.push_back(PollStep::FailAvailable);

    let err = block_on(grid.sync()).unwrap_err();
    assert!(matches!(err, Error::Backend(FifoErr)));
    assert_eq!(*log.borrow(), [(0, 0, Edge::Rising)]);
}

#[test]
fn fill_and_show_fan_out_to_every_tile() {
    let (_fifos, sinks, tiles) = parts::<2, 2>();
    let mut grid: MultiTrellis<_, _, 2, 2> = MultiTrellis::new(tiles);

    block_on(grid.fill(Rgb::new(0, 0, 40))).unwrap();
    block_on(grid.show()).unwrap();

    for row in sinks.iter() {
        for sink in row.iter() {
            assert_eq!(sink.0.borrow().writes.len(), 16);
            assert_eq!(sink.0.borrow().flushes, 1);
        }
    }
}
