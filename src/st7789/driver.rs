//! ST7789 Device
//!
//! [`St7789`] owns the bus, the three control lines and the current geometry behind a
//! single lock. Every public operation that sends more than one byte runs inside
//! [`St7789::exclusive`], so command sequences from different callers (a playback
//! thread flushing frames, a foreground clear, another canvas) never interleave on the
//! wire.
//!
//! ## Lifecycle
//!
//! 1. [`St7789::new`] configures the pins, switches the backlight on, sets the bus to
//!    40 MHz mode 3, then runs the hardware reset and the init sequence.
//! 2. Carve canvases with [`St7789::canvas`] or [`St7789::full_screen_canvas`]. They
//!    borrow the device and can be created and dropped freely.
//! 3. [`St7789::release`] gives the hardware back.

use std::sync::{Mutex, MutexGuard, PoisonError};

use embedded_hal::delay::DelayNs;

use crate::canvas::{Canvas, Panel};
use crate::error::Result;
use crate::st7789::bus::Bus;
use crate::st7789::geometry::{Orientation, ScreenType};
use crate::st7789::interface::DisplayInterface;
use crate::st7789::pins::ControlPin;

/// ST7789 LCD driver
///
/// ## Type Parameters
///
/// - `BUS` - serial bus to the controller
/// - `DC` - Data/Command output pin
/// - `RST` - Reset output pin
/// - `BL` - Backlight output pin
/// - `DELAY` - Delay provider for reset and init timing
pub struct St7789<BUS, DC, RST, BL, DELAY> {
    interface: Mutex<DisplayInterface<BUS, DC, RST, BL, DELAY>>,
}

impl<BUS, DC, RST, BL, DELAY> St7789<BUS, DC, RST, BL, DELAY> {
    /// Wrap an interface without touching the hardware
    pub fn from_interface(interface: DisplayInterface<BUS, DC, RST, BL, DELAY>) -> Self {
        St7789 {
            interface: Mutex::new(interface),
        }
    }

    // A panic inside an exclusive section leaves the interface usable; the
    // controller is resynchronised by the next full command sequence.
    fn lock(&self) -> MutexGuard<'_, DisplayInterface<BUS, DC, RST, BL, DELAY>> {
        self.interface
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Geometry the device was built for
    pub fn screen(&self) -> ScreenType {
        self.lock().screen()
    }

    /// Current width, height and RAM offsets
    pub fn orientation(&self) -> Orientation {
        self.lock().orientation()
    }

    /// Current `(width, height)` in pixels
    pub fn size(&self) -> (u16, u16) {
        let orientation = self.orientation();
        (orientation.width, orientation.height)
    }

    /// Give the hardware back
    pub fn release(self) -> DisplayInterface<BUS, DC, RST, BL, DELAY> {
        self.interface
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<BUS, DC, RST, BL, DELAY> St7789<BUS, DC, RST, BL, DELAY>
where
    BUS: Bus,
    DC: ControlPin,
    RST: ControlPin,
    BL: ControlPin,
    DELAY: DelayNs,
{
    /// Create and initialize the display driver
    pub fn new(
        bus: BUS,
        dc: DC,
        rst: RST,
        backlight: BL,
        delay: DELAY,
        screen: ScreenType,
    ) -> Result<Self> {
        log::info!("Creating ST7789 driver for {} panel", screen);
        let mut interface = DisplayInterface::new(bus, dc, rst, backlight, delay, screen);
        interface.setup()?;
        interface.reset()?;
        interface.init()?;
        Ok(Self::from_interface(interface))
    }

    /// Like [`St7789::new`], with the screen given by id (0: 320x240, 1: 240x240,
    /// 2: 135x240). Unknown ids fail before any pin or bus activity.
    pub fn with_screen_id(
        bus: BUS,
        dc: DC,
        rst: RST,
        backlight: BL,
        delay: DELAY,
        screen_id: u8,
    ) -> Result<Self> {
        let screen = ScreenType::try_from(screen_id).inspect_err(|e| log::error!("{}", e))?;
        Self::new(bus, dc, rst, backlight, delay, screen)
    }

    /// Run a command sequence with exclusive access to the interface.
    ///
    /// The section is not re-entrant: `work` gets the interface, not the device, and
    /// must not try to reach the device through another path.
    pub fn exclusive<R>(
        &self,
        work: impl FnOnce(&mut DisplayInterface<BUS, DC, RST, BL, DELAY>) -> Result<R>,
    ) -> Result<R> {
        let mut interface = self.lock();
        work(&mut interface)
    }

    /// Hardware reset through the RST line
    pub fn hard_reset(&self) -> Result<()> {
        self.exclusive(|di| di.reset())
    }

    /// Run the power-on register sequence again
    pub fn init(&self) -> Result<()> {
        self.exclusive(|di| di.init())
    }

    /// Software reset
    pub fn soft_reset(&self) -> Result<()> {
        self.exclusive(|di| di.soft_reset())
    }

    /// Enter or leave sleep mode
    pub fn sleep_mode(&self, enable: bool) -> Result<()> {
        self.exclusive(|di| di.sleep_mode(enable))
    }

    /// Switch display inversion on or off
    pub fn inversion_mode(&self, enable: bool) -> Result<()> {
        self.exclusive(|di| di.inversion_mode(enable))
    }

    /// Set the interface pixel format, see [`crate::st7789::Flag`]
    pub fn color_mode(&self, mode: u8) -> Result<()> {
        self.exclusive(|di| di.color_mode(mode))
    }

    /// Rotate by `rotation % 4` quarter turns
    pub fn set_rotation(&self, rotation: u8) -> Result<()> {
        self.exclusive(|di| {
            di.set_rotation(rotation)?;
            let orientation = di.orientation();
            log::info!(
                "Display rotation {}, now {}x{}",
                rotation % 4,
                orientation.width,
                orientation.height
            );
            Ok(())
        })
    }

    /// Power save mode bits: 1 idle, 2 normal, 4 display off; 0 switches power save off
    pub fn power_save(&self, mode: u8) -> Result<()> {
        log::info!("Power save mode {:#04b}", mode);
        self.exclusive(|di| di.power_save(mode))
    }

    /// Switch the backlight on or off
    pub fn set_backlight(&self, on: bool) -> Result<()> {
        self.exclusive(|di| di.set_backlight(on))
    }

    /// Arm the pixel address window. Inclusive coordinates.
    pub fn set_window(&self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<()> {
        self.exclusive(|di| di.set_address_window(x0, y0, x1, y1))
    }

    /// Send an RGB565 buffer to the inclusive region `(x0, y0)..=(x1, y1)`
    pub fn flush_bit_buffer(&self, x0: u16, y0: u16, x1: u16, y1: u16, buffer: &[u8]) -> Result<()> {
        self.exclusive(|di| di.write_region(x0, y0, x1, y1, buffer))
    }

    /// Canvas over the inclusive region `(x0, y0)..=(x1, y1)`
    pub fn canvas(&self, x0: u16, y0: u16, x1: u16, y1: u16) -> Canvas<'_, Self> {
        Canvas::new(self, x0, y0, x1, y1)
    }

    /// Canvas covering the whole panel in the current orientation
    pub fn full_screen_canvas(&self) -> Canvas<'_, Self> {
        let (width, height) = self.size();
        Canvas::new(self, 0, 0, width - 1, height - 1)
    }
}

impl<BUS, DC, RST, BL, DELAY> Panel for St7789<BUS, DC, RST, BL, DELAY>
where
    BUS: Bus,
    DC: ControlPin,
    RST: ControlPin,
    BL: ControlPin,
    DELAY: DelayNs,
{
    fn flush_region(&self, x0: u16, y0: u16, x1: u16, y1: u16, pixels: &[u8]) -> Result<()> {
        self.flush_bit_buffer(x0, y0, x1, y1, pixels)
    }
}
