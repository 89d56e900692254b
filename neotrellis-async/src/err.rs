//! Error types for the NeoTrellis driver.

use core::fmt::{self, Debug};

/// An error related to GPIO pin operations in the matrix scanner.
pub enum PinError<TPINERR> {
    /// An error occurred driving a column pin.
    Output(TPINERR),
    /// An error occurred reading a row pin.
    Input(TPINERR),
}

impl<TPINERR: Debug> Debug for PinError<TPINERR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output(err) => write!(f, "Output({err:?})"),
            Self::Input(err) => write!(f, "Input({err:?})"),
        }
    }
}

/// The main error type for tiles and grids.
///
/// `TBACKERR` is the key-scan backend's error, `TSINKERR` the pixel sink's.
pub enum Error<TBACKERR, TSINKERR> {
    /// A key index outside the tile's 16 keys.
    InvalidIndex {
        key: u8,
    },
    /// A coordinate outside the grid's configured extent.
    InvalidCoordinate {
        x: u8,
        y: u8,
    },
    /// The key-scan backend failed; the poll was aborted before any state
    /// change or callback dispatch.
    Backend(TBACKERR),
    /// The pixel sink failed.
    Pixels(TSINKERR),
}

impl<TBACKERR: Debug, TSINKERR: Debug> Debug for Error<TBACKERR, TSINKERR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex { key } => write!(f, "InvalidIndex({key})"),
            Self::InvalidCoordinate { x, y } => write!(f, "InvalidCoordinate({x}, {y})"),
            Self::Backend(err) => write!(f, "Backend({err:?})"),
            Self::Pixels(err) => write!(f, "Pixels({err:?})"),
        }
    }
}
