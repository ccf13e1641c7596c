//! Serial bus capability and its `embedded_hal` SPI adapter.

use display_interface::DisplayError;
use embedded_hal::spi::SpiDevice;

/// SPI clock requested from the bus at construction, 40 MHz
pub const SPI_CLOCK_HZ: u32 = 40_000_000;

/// Byte transport to the controller.
///
/// Failures are reported, never retried: a failed transfer aborts the operation in
/// progress.
pub trait Bus {
    /// Set the serial clock rate
    fn set_clock_rate(&mut self, hz: u32) -> Result<(), DisplayError>;

    /// Switch to SPI mode 3 (CPOL=1, CPHA=1)
    fn select_mode3(&mut self) -> Result<(), DisplayError>;

    /// Write all bytes in one transfer
    fn transmit(&mut self, data: &[u8]) -> Result<(), DisplayError>;
}

impl<B: Bus + ?Sized> Bus for &mut B {
    fn set_clock_rate(&mut self, hz: u32) -> Result<(), DisplayError> {
        B::set_clock_rate(self, hz)
    }

    fn select_mode3(&mut self) -> Result<(), DisplayError> {
        B::select_mode3(self)
    }

    fn transmit(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        B::transmit(self, data)
    }
}

/// [`Bus`] over an `embedded_hal` SPI device.
///
/// Clock rate and mode belong to the HAL device configuration (for example
/// `SpiConfig::new().baudrate(..).data_mode(MODE_3)` on esp-idf), so this adapter only
/// records what the driver asked for and logs it.
pub struct SpiDeviceBus<SPI> {
    spi: SPI,
    clock_rate: Option<u32>,
    mode3: bool,
}

impl<SPI> SpiDeviceBus<SPI> {
    /// Wrap a configured SPI device
    pub fn new(spi: SPI) -> Self {
        SpiDeviceBus {
            spi,
            clock_rate: None,
            mode3: false,
        }
    }

    /// Clock rate requested by the driver, if any
    pub fn clock_rate(&self) -> Option<u32> {
        self.clock_rate
    }

    /// Whether the driver asked for SPI mode 3
    pub fn mode3_requested(&self) -> bool {
        self.mode3
    }

    /// Give the SPI device back
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> Bus for SpiDeviceBus<SPI> {
    fn set_clock_rate(&mut self, hz: u32) -> Result<(), DisplayError> {
        log::info!("Display bus clock requested: {} Hz", hz);
        self.clock_rate = Some(hz);
        Ok(())
    }

    fn select_mode3(&mut self) -> Result<(), DisplayError> {
        log::info!("Display bus mode 3 requested (CPOL=1, CPHA=1)");
        self.mode3 = true;
        Ok(())
    }

    fn transmit(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.spi
            .write(data)
            .map_err(|_| DisplayError::BusWriteError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::spi::{ErrorKind, ErrorType, Operation};

    #[derive(Default)]
    struct RecordingSpi {
        writes: Vec<Vec<u8>>,
        fail: bool,
    }

    impl ErrorType for RecordingSpi {
        type Error = ErrorKind;
    }

    impl SpiDevice for RecordingSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), ErrorKind> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for operation in operations {
                if let Operation::Write(data) = operation {
                    self.writes.push(data.to_vec());
                }
            }
            Ok(())
        }
    }

    #[test]
    fn adapter_records_configuration_and_writes() {
        let mut bus = SpiDeviceBus::new(RecordingSpi::default());
        assert_eq!(bus.clock_rate(), None);
        assert!(!bus.mode3_requested());

        bus.set_clock_rate(SPI_CLOCK_HZ).unwrap();
        bus.select_mode3().unwrap();
        bus.transmit(&[0x2C]).unwrap();
        bus.transmit(&[0xF8, 0x00, 0x00, 0x1F]).unwrap();

        assert_eq!(bus.clock_rate(), Some(40_000_000));
        assert!(bus.mode3_requested());
        assert_eq!(
            bus.release().writes,
            vec![vec![0x2C], vec![0xF8, 0x00, 0x00, 0x1F]]
        );
    }

    #[test]
    fn failed_write_maps_to_bus_write_error() {
        let mut bus = SpiDeviceBus::new(RecordingSpi {
            fail: true,
            ..Default::default()
        });
        assert!(matches!(
            bus.transmit(&[0x00]),
            Err(DisplayError::BusWriteError)
        ));
    }
}
