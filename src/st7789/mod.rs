//! ST7789 LCD Driver
//!
//! Used with the common 320x240, 240x240 and 135x240 IPS modules wired over SPI with
//! separate data/command, reset and backlight lines.
//!
//! ### Usage
//! The driver owns the hardware and hands out canvases. To display something you:
//!
//! 1. create the device with [`driver::St7789::new`], which resets and initializes the
//!    controller
//! 1. carve a [`crate::canvas::Canvas`] with [`driver::St7789::canvas`] and draw onto
//!    it, preferably with [`embedded_graphics`](https://github.com/jamwaffles/embedded-graphics)
//! 1. then send the buffer with [`crate::canvas::Canvas::flush`]
//!
//! Rotation, power save, sleep and color mode are available on the device at any time.
//!

pub mod bus;
mod cmd;
pub mod driver;
mod flag;
pub mod geometry;
pub mod interface;
pub mod pins;

#[cfg(test)]
pub(crate) mod mock;

use std::time::Duration;

use embedded_hal::delay::DelayNs;

pub use bus::{Bus, SpiDeviceBus, SPI_CLOCK_HZ};
pub use cmd::Cmd;
pub use driver::St7789;
pub use flag::Flag;
pub use geometry::{Orientation, ScreenType};
pub use interface::DisplayInterface;
pub use pins::ControlPin;

/// [`DelayNs`] backed by `std::thread::sleep`, for hosted targets
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns.into()));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms.into()));
    }
}
