//! Digital output capability used for the DC, RST and backlight lines.

use embedded_hal::digital::OutputPin;

/// A GPIO line the driver can configure and drive.
///
/// Every `embedded_hal` output pin already is one; implement this directly only for
/// pins that need an explicit switch to output mode.
pub trait ControlPin {
    /// Error reported by the underlying pin
    type Error: core::fmt::Debug;

    /// Put the pin into output mode
    fn configure_as_output(&mut self) -> Result<(), Self::Error>;

    /// Drive the line high
    fn drive_high(&mut self) -> Result<(), Self::Error>;

    /// Drive the line low
    fn drive_low(&mut self) -> Result<(), Self::Error>;
}

impl<P: OutputPin> ControlPin for P {
    type Error = P::Error;

    // A HAL output pin is typed as an output at construction.
    fn configure_as_output(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn drive_high(&mut self) -> Result<(), Self::Error> {
        self.set_high()
    }

    fn drive_low(&mut self) -> Result<(), Self::Error> {
        self.set_low()
    }
}
