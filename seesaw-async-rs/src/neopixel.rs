//! Wire types for the seesaw NeoPixel module.

/// Bitstream timing of the attached pixel string.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Speed {
    /// 400 kHz parts.
    Khz400 = 0x00,
    /// 800 kHz parts; every NeoTrellis board ships these.
    Khz800 = 0x01,
}
