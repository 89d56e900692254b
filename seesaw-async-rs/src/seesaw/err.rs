//! Error types for the seesaw driver.

use core::fmt::{self, Debug};

/// An error raised while talking to a seesaw co-processor.
pub enum SeesawError<TBUSERR> {
    /// An error occurred writing a register prefix or payload.
    Write(TBUSERR),
    /// An error occurred reading a register back.
    Read(TBUSERR),
    /// The chip answered the id probe with something other than a seesaw
    /// hardware id.
    UnexpectedId(u8),
}

impl<TBUSERR: Debug> Debug for SeesawError<TBUSERR> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write(err) => write!(f, "Write({err:?})"),
            Self::Read(err) => write!(f, "Read({err:?})"),
            Self::UnexpectedId(id) => write!(f, "UnexpectedId({id:#04x})"),
        }
    }
}
