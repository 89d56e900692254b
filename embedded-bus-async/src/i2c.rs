use alloc::rc::Rc;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, mutex::Mutex};
use embedded_hal::i2c::{Operation, SevenBitAddress};
use embedded_hal_async::i2c::{self, I2c};

/// `Mutex`-based shared bus [`I2c`] implementation.
///
/// This allows for sharing an I2C bus, obtaining multiple [`MutexI2cDevice`]
/// instances, each talking to its own address.
///
/// An I2C transaction holds the bus exclusively from start to stop, so the
/// guard is a plain `Mutex`; transactions issued through different handles
/// never interleave.
pub struct MutexI2cDevice<I2cType, ErrorType: embedded_hal_async::i2c::Error>
where
    I2cType: I2c<SevenBitAddress, Error = ErrorType>,
{
    bus: Rc<Mutex<CriticalSectionRawMutex, I2cType>>,
}

impl<I2cType, ErrorType: embedded_hal_async::i2c::Error> MutexI2cDevice<I2cType, ErrorType>
where
    I2cType: I2c<SevenBitAddress, Error = ErrorType>,
{
    /// Create a new [`MutexI2cDevice`].
    ///
    /// Clone the `Rc` once per driver that needs a handle to the bus.
    pub fn new(bus: Rc<Mutex<CriticalSectionRawMutex, I2cType>>) -> Self {
        Self { bus }
    }
}

impl<I2cType, ErrorType: embedded_hal_async::i2c::Error> i2c::ErrorType
    for MutexI2cDevice<I2cType, ErrorType>
where
    I2cType: I2c<SevenBitAddress, Error = ErrorType>,
{
    type Error = ErrorType;
}

impl<I2cType, ErrorType: embedded_hal_async::i2c::Error> i2c::I2c
    for MutexI2cDevice<I2cType, ErrorType>
where
    I2cType: I2c<SevenBitAddress, Error = ErrorType>,
{
    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut bus = self.bus.lock().await;
        bus.transaction(address, operations).await
    }
}
