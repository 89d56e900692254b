//! The core implementation of the seesaw driver.

pub(crate) mod err;

use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::{I2c, Operation, SevenBitAddress};

use crate::keypad::{Edge, EventArming};
use crate::neopixel::Speed;
use crate::reg::{KeypadReg, Module, NeopixelReg, StatusReg, SAMD09_HW_ID};

pub use err::SeesawError;

/// Turnaround the co-processor needs between being addressed and answering
/// the read-back.
const READ_DELAY: Duration = Duration::from_micros(500);

/// Settle time after a software reset before the chip accepts traffic again.
const RESET_DELAY: Duration = Duration::from_millis(500);

/// One seesaw co-processor at a fixed 7-bit bus address.
pub struct Seesaw<TI2C> {
    i2c: TI2C,
    address: SevenBitAddress,
}

impl<TI2C, TI2CERR> Seesaw<TI2C>
where
    TI2C: I2c<SevenBitAddress, Error = TI2CERR>,
{
    /// Creates a driver for the chip at `address`.
    pub fn new(i2c: TI2C, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    /// The bus address this driver talks to.
    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    /// Consumes the driver and hands the bus back.
    pub fn release(self) -> TI2C {
        self.i2c
    }

    /// Writes a register: the module/function prefix and the payload go out
    /// as a single transaction.
    pub async fn write(
        &mut self,
        module: Module,
        function: u8,
        data: &[u8],
    ) -> Result<(), SeesawError<TI2CERR>> {
        log::trace!(
            "seesaw write {module:?}/{function:#04x}, {} byte(s)",
            data.len()
        );
        let prefix = [module as u8, function];
        let mut ops = [Operation::Write(&prefix), Operation::Write(data)];
        self.i2c
            .transaction(self.address, &mut ops)
            .await
            .map_err(SeesawError::Write)
    }

    /// Reads a register: a 2-byte prefix write, then a separate read.
    ///
    /// The chip needs a stop after the prefix and a short turnaround to
    /// stage the answer, so this is two transactions with a delay between
    /// them, not one write-read.
    pub async fn read(
        &mut self,
        module: Module,
        function: u8,
        buf: &mut [u8],
    ) -> Result<(), SeesawError<TI2CERR>> {
        log::trace!(
            "seesaw read {module:?}/{function:#04x}, {} byte(s)",
            buf.len()
        );
        self.i2c
            .write(self.address, &[module as u8, function])
            .await
            .map_err(SeesawError::Write)?;
        Timer::after(READ_DELAY).await;
        self.i2c
            .read(self.address, buf)
            .await
            .map_err(SeesawError::Read)
    }

    async fn read8(&mut self, module: Module, function: u8) -> Result<u8, SeesawError<TI2CERR>> {
        let mut buf = [0u8; 1];
        self.read(module, function, &mut buf).await?;
        Ok(buf[0])
    }

    /// Resets the chip, waits for it to come back and verifies it answers
    /// the id probe as a seesaw.
    pub async fn init(&mut self) -> Result<(), SeesawError<TI2CERR>> {
        log::trace!("seesaw init, address {:#04x}", self.address);
        self.sw_reset().await?;
        let id = self.hardware_id().await?;
        if id != SAMD09_HW_ID {
            return Err(SeesawError::UnexpectedId(id));
        }
        Ok(())
    }

    /// Triggers a software reset and waits out the restart.
    pub async fn sw_reset(&mut self) -> Result<(), SeesawError<TI2CERR>> {
        log::trace!("sw_reset");
        self.write(Module::Status, StatusReg::SwReset as u8, &[0xFF])
            .await?;
        Timer::after(RESET_DELAY).await;
        Ok(())
    }

    /// Reads the hardware id byte.
    pub async fn hardware_id(&mut self) -> Result<u8, SeesawError<TI2CERR>> {
        self.read8(Module::Status, StatusReg::HardwareId as u8).await
    }

    /// Reads the firmware version and date code.
    pub async fn version(&mut self) -> Result<u32, SeesawError<TI2CERR>> {
        let mut buf = [0u8; 4];
        self.read(Module::Status, StatusReg::Version as u8, &mut buf)
            .await?;
        Ok(u32::from_be_bytes(buf))
    }

    /// Arms or disarms one `(key, edge)` pair in the key-scan engine.
    ///
    /// `key` uses the engine's own numbering; callers translate from their
    /// key layout first.
    pub async fn set_keypad_event(
        &mut self,
        key: u8,
        edge: Edge,
        enable: bool,
    ) -> Result<(), SeesawError<TI2CERR>> {
        log::trace!("set_keypad_event key {key} {edge:?} enable {enable}");
        let arming: u8 = EventArming { edge, enable }.into();
        self.write(Module::Keypad, KeypadReg::Event as u8, &[key, arming])
            .await
    }

    /// Enables or disables the keypad interrupt line.
    pub async fn keypad_interrupt(&mut self, enable: bool) -> Result<(), SeesawError<TI2CERR>> {
        log::trace!("keypad_interrupt {enable}");
        let function = if enable {
            KeypadReg::IntenSet
        } else {
            KeypadReg::IntenClr
        };
        self.write(Module::Keypad, function as u8, &[0x01]).await
    }

    /// Number of events waiting in the key-scan FIFO.
    pub async fn keypad_event_count(&mut self) -> Result<u8, SeesawError<TI2CERR>> {
        let count = self.read8(Module::Keypad, KeypadReg::Count as u8).await?;
        log::trace!("keypad_event_count {count}");
        Ok(count)
    }

    /// Drains `buf.len()` raw event bytes from the key-scan FIFO.
    pub async fn read_keypad(&mut self, buf: &mut [u8]) -> Result<(), SeesawError<TI2CERR>> {
        self.read(Module::Keypad, KeypadReg::Fifo as u8, buf).await
    }

    /// Selects the pad the pixel string data line is wired to.
    pub async fn neopixel_set_pin(&mut self, pin: u8) -> Result<(), SeesawError<TI2CERR>> {
        self.write(Module::Neopixel, NeopixelReg::Pin as u8, &[pin])
            .await
    }

    /// Selects the pixel bitstream timing.
    pub async fn neopixel_set_speed(&mut self, speed: Speed) -> Result<(), SeesawError<TI2CERR>> {
        self.write(Module::Neopixel, NeopixelReg::Speed as u8, &[speed as u8])
            .await
    }

    /// Sizes the on-chip pixel buffer in bytes.
    pub async fn neopixel_buffer_length(&mut self, len: u16) -> Result<(), SeesawError<TI2CERR>> {
        self.write(
            Module::Neopixel,
            NeopixelReg::BufLength as u8,
            &len.to_be_bytes(),
        )
        .await
    }

    /// Writes `data` into the on-chip pixel buffer at a byte offset.
    pub async fn neopixel_write(
        &mut self,
        offset: u16,
        data: &[u8],
    ) -> Result<(), SeesawError<TI2CERR>> {
        log::trace!("neopixel_write offset {offset}, {} byte(s)", data.len());
        let prefix = [Module::Neopixel as u8, NeopixelReg::Buf as u8];
        let offset = offset.to_be_bytes();
        let mut ops = [
            Operation::Write(&prefix),
            Operation::Write(&offset),
            Operation::Write(data),
        ];
        self.i2c
            .transaction(self.address, &mut ops)
            .await
            .map_err(SeesawError::Write)
    }

    /// Latches the pixel buffer out to the string.
    pub async fn neopixel_show(&mut self) -> Result<(), SeesawError<TI2CERR>> {
        log::trace!("neopixel_show");
        self.write(Module::Neopixel, NeopixelReg::Show as u8, &[])
            .await
    }
}
