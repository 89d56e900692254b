//! The seesaw register map, limited to the modules the NeoTrellis boards use.
//!
//! Every register access is addressed by a module base byte followed by a
//! function byte within that module.

/// Hardware id reported by the SAMD09 seesaw found on NeoTrellis boards.
pub const SAMD09_HW_ID: u8 = 0x55;

/// Base address of a seesaw function module.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Module {
    /// Chip identification, version and reset.
    Status = 0x00,
    /// NeoPixel string driver.
    Neopixel = 0x0E,
    /// Key-scan engine with its event FIFO.
    Keypad = 0x10,
}

/// Function registers of the STATUS module.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusReg {
    /// Hardware id byte.
    HardwareId = 0x01,
    /// Firmware version and date code, 4 bytes.
    Version = 0x02,
    /// Software reset trigger; write 0xFF.
    SwReset = 0x7F,
}

/// Function registers of the KEYPAD module.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeypadReg {
    /// Per-key event arming; takes a key number and an arming byte.
    Event = 0x01,
    /// Interrupt enable set.
    IntenSet = 0x02,
    /// Interrupt enable clear.
    IntenClr = 0x03,
    /// Number of events waiting in the FIFO.
    Count = 0x04,
    /// The event FIFO itself.
    Fifo = 0x10,
}

/// Function registers of the NEOPIXEL module.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NeopixelReg {
    /// Pad the pixel string data line is wired to.
    Pin = 0x01,
    /// Bitstream timing select.
    Speed = 0x02,
    /// Size of the on-chip pixel buffer in bytes, u16 big-endian.
    BufLength = 0x03,
    /// Window into the pixel buffer; takes a u16 big-endian byte offset
    /// followed by the data.
    Buf = 0x04,
    /// Latch the buffer out to the string.
    Show = 0x05,
}
