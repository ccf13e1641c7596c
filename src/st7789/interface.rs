//! Command/data protocol of the ST7789 over the serial bus.
//!
//! Nothing here is synchronised. [`crate::st7789::St7789`] owns one
//! `DisplayInterface` behind its lock and hands it out only inside
//! [`crate::st7789::St7789::exclusive`].
use crate::error::{Error, Result};
use crate::st7789::bus::{Bus, SPI_CLOCK_HZ};
use crate::st7789::geometry::{Orientation, ScreenType};
use crate::st7789::pins::ControlPin;
use crate::st7789::{cmd::Cmd, flag::Flag};
use display_interface::DisplayError;
use embedded_hal::delay::DelayNs;

/// Settle time for each edge of the hardware reset
pub const RESET_DELAY_MS: u32 = 100;
/// Wait after sleep-out before the controller accepts register writes
pub const SLEEP_OUT_DELAY_MS: u32 = 150;
/// Wait after display-on
pub const DISPLAY_ON_DELAY_MS: u32 = 100;

/// Bus, control lines and current geometry of one panel
pub struct DisplayInterface<BUS, DC, RST, BL, DELAY> {
    /// Serial bus
    bus: BUS,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
    /// Backlight, high is on
    backlight: BL,
    delay: DELAY,
    screen: ScreenType,
    orientation: Orientation,
}

impl<BUS, DC, RST, BL, DELAY> DisplayInterface<BUS, DC, RST, BL, DELAY> {
    /// Bundle the hardware without touching it. Geometry starts at rotation 0, which
    /// is what [`Self::init`] programs.
    pub fn new(bus: BUS, dc: DC, rst: RST, backlight: BL, delay: DELAY, screen: ScreenType) -> Self {
        DisplayInterface {
            bus,
            dc,
            rst,
            backlight,
            delay,
            screen,
            orientation: screen.orientation(0),
        }
    }

    /// Geometry the interface was built for
    pub fn screen(&self) -> ScreenType {
        self.screen
    }

    /// Current width, height and RAM offsets
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

impl<BUS, DC, RST, BL, DELAY> DisplayInterface<BUS, DC, RST, BL, DELAY>
where
    BUS: Bus,
    DC: ControlPin,
    RST: ControlPin,
    BL: ControlPin,
    DELAY: DelayNs,
{
    /// Configure the control lines, switch the backlight on and set up the bus
    pub(crate) fn setup(&mut self) -> Result<()> {
        self.dc
            .configure_as_output()
            .map_err(|_| DisplayError::DCError)?;
        self.rst
            .configure_as_output()
            .map_err(|_| DisplayError::RSError)?;
        self.backlight
            .configure_as_output()
            .map_err(|_| Error::Backlight)?;
        self.set_backlight(true)?;

        self.bus.set_clock_rate(SPI_CLOCK_HZ)?;
        self.bus.select_mode3()?;
        Ok(())
    }

    /// Basic function for sending commands
    pub fn cmd(&mut self, command: u8) -> Result<()> {
        // low for commands
        self.dc.drive_low().map_err(|_| DisplayError::DCError)?;

        match self.bus.transmit(&[command]) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!("Bus write error for command 0x{:02X}: {:?}", command, e);
                Err(e.into())
            }
        }
    }

    /// Basic function for sending an array of u8-values of data over the bus
    pub fn data(&mut self, data: &[u8]) -> Result<()> {
        // high for data
        self.dc.drive_high().map_err(|_| DisplayError::DCError)?;

        match self.bus.transmit(data) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!("Bus write error for {} data bytes: {:?}", data.len(), e);
                Err(e.into())
            }
        }
    }

    /// Basic function for sending a command and the data belonging to it.
    pub fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<()> {
        self.cmd(command)?;
        if data.is_empty() {
            return Ok(());
        }
        self.data(data)
    }

    /// Hardware reset: RST high, low, high with a settle delay after each edge
    pub fn reset(&mut self) -> Result<()> {
        self.rst.drive_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        self.rst.drive_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        self.rst.drive_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }

    /// Software reset
    pub fn soft_reset(&mut self) -> Result<()> {
        self.cmd(Cmd::SWRESET)
    }

    /// Power-on register sequence. Must follow [`Self::reset`].
    pub fn init(&mut self) -> Result<()> {
        log::info!("Initializing ST7789 {} panel", self.screen);

        self.sleep_mode(false)?;
        self.delay.delay_ms(SLEEP_OUT_DELAY_MS);

        self.set_rotation(0)?;

        for (command, data) in Flag::INIT_REGISTERS {
            self.cmd_with_data(command, data)?;
        }
        self.delay.delay_ms(DISPLAY_ON_DELAY_MS);

        log::info!(
            "Display on, {}x{}",
            self.orientation.width,
            self.orientation.height
        );
        Ok(())
    }

    /// Arm the controller for `(x1-x0+1)*(y1-y0+1)` pixels, row-major.
    ///
    /// Coordinates are inclusive and in the current orientation; the RAM offset of the
    /// current rotation is added here.
    pub fn set_address_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<()> {
        let x0 = x0 + self.orientation.x_start;
        let x1 = x1 + self.orientation.x_start;
        self.cmd(Cmd::CASET)?;
        self.data(&[
            (x0 >> 8) as u8,
            x0 as u8, // XSTART
            (x1 >> 8) as u8,
            x1 as u8, // XEND
        ])?;

        let y0 = y0 + self.orientation.y_start;
        let y1 = y1 + self.orientation.y_start;
        self.cmd(Cmd::RASET)?;
        self.data(&[
            (y0 >> 8) as u8,
            y0 as u8, // YSTART
            (y1 >> 8) as u8,
            y1 as u8, // YEND
        ])?;

        self.cmd(Cmd::RAMWR)
    }

    /// Set the window and stream RGB565 pixel data into it in one transfer
    pub fn write_region(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, pixels: &[u8]) -> Result<()> {
        self.set_address_window(x0, y0, x1, y1)?;
        self.data(pixels)
    }

    /// Select rotation `rotation % 4`
    ///
    /// 0 portrait, 1 landscape, 2 inverted portrait, 3 inverted landscape.
    pub fn set_rotation(&mut self, rotation: u8) -> Result<()> {
        let step = rotation % 4;
        self.orientation = self.screen.orientation(step);
        log::debug!("Rotation {}: {:?}", step, self.orientation);
        self.cmd_with_data(Cmd::MADCTL, &[Flag::ROTATIONS[step as usize]])
    }

    /// Power save mode bits: 1 idle, 2 normal, 4 display off; 0 switches power save off
    pub fn power_save(&mut self, mode: u8) -> Result<()> {
        if mode == Flag::POWER_SAVE_OFF {
            self.cmd_with_data(
                Cmd::POWSAVE,
                &[Flag::POWSAVE_BASE | Flag::POWSAVE_NORMAL_OFF | Flag::POWSAVE_IDLE_OFF],
            )?;
            return self.cmd_with_data(Cmd::DLPOFFSAVE, &[Flag::DLPOFFSAVE_DISABLE]);
        }

        let mut value = Flag::POWSAVE_BASE;
        if mode & Flag::POWER_SAVE_IDLE == 0 {
            value |= Flag::POWSAVE_IDLE_OFF;
        }
        if mode & Flag::POWER_SAVE_NORMAL == 0 {
            value |= Flag::POWSAVE_NORMAL_OFF;
        }
        self.cmd_with_data(Cmd::POWSAVE, &[value])?;

        if mode & Flag::POWER_SAVE_DISPLAY_OFF != 0 {
            self.cmd_with_data(Cmd::DLPOFFSAVE, &[Flag::DLPOFFSAVE_ENABLE])?;
        }
        Ok(())
    }

    /// Enter or leave sleep mode
    pub fn sleep_mode(&mut self, enable: bool) -> Result<()> {
        if enable {
            self.cmd(Cmd::SLPIN)
        } else {
            self.cmd(Cmd::SLPOUT)
        }
    }

    /// Switch display inversion on or off
    pub fn inversion_mode(&mut self, enable: bool) -> Result<()> {
        if enable {
            self.cmd(Cmd::INVON)
        } else {
            self.cmd(Cmd::INVOFF)
        }
    }

    /// Interface pixel format, an OR of one `Flag::COLOR_MODE_*` RGB value and one
    /// control value
    pub fn color_mode(&mut self, mode: u8) -> Result<()> {
        self.cmd_with_data(Cmd::COLMOD, &[mode & Flag::COLOR_MODE_MASK])
    }

    /// Drive the backlight line
    pub fn set_backlight(&mut self, on: bool) -> Result<()> {
        let result = if on {
            self.backlight.drive_high()
        } else {
            self.backlight.drive_low()
        };
        result.map_err(|_| Error::Backlight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::st7789::mock::{MockBus, MockDelay, MockPin, Transfer};

    fn interface(
        screen: ScreenType,
    ) -> (
        DisplayInterface<MockBus, MockPin, MockPin, MockPin, MockDelay>,
        MockBus,
    ) {
        let bus = MockBus::new();
        let log = bus.clone();
        let dc = bus.pin("dc");
        let rst = bus.pin("rst");
        let bl = bus.pin("bl");
        (
            DisplayInterface::new(bus, dc, rst, bl, log.delay(), screen),
            log,
        )
    }

    #[test]
    fn geometry_starts_at_rotation_zero_row() {
        for screen in [
            ScreenType::Screen320x240,
            ScreenType::Screen240x240,
            ScreenType::Screen135x240,
        ] {
            let (di, log) = interface(screen);
            assert_eq!(di.orientation(), screen.rotation_table()[0], "{}", screen);
            assert!(log.transfers().is_empty());
        }
    }

    #[test]
    fn init_reproduces_register_table() {
        let (mut di, log) = interface(ScreenType::Screen240x240);
        di.init().unwrap();

        let expected: Vec<Transfer> = vec![
            Transfer::Cmd(Cmd::SLPOUT),
            Transfer::Cmd(Cmd::MADCTL),
            Transfer::Data(vec![0x00]),
            Transfer::Cmd(Cmd::COLMOD),
            Transfer::Data(vec![0x55]),
            Transfer::Cmd(Cmd::PORCTRL),
            Transfer::Data(vec![0x0C, 0x0C]),
            Transfer::Cmd(Cmd::GCTRL),
            Transfer::Data(vec![0x35]),
            Transfer::Cmd(Cmd::VCOMS),
            Transfer::Data(vec![0x1A]),
            Transfer::Cmd(Cmd::LCMCTRL),
            Transfer::Data(vec![0x2C]),
            Transfer::Cmd(Cmd::VDVVRHEN),
            Transfer::Data(vec![0x01]),
            Transfer::Cmd(Cmd::VRHS),
            Transfer::Data(vec![0x0B]),
            Transfer::Cmd(Cmd::VDVSET),
            Transfer::Data(vec![0x20]),
            Transfer::Cmd(Cmd::FRCTR2),
            Transfer::Data(vec![0x0F]),
            Transfer::Cmd(Cmd::PWCTRL1),
            Transfer::Data(vec![0xA4, 0xA1]),
            Transfer::Cmd(Cmd::INVON),
            Transfer::Cmd(Cmd::PVGAMCTRL),
            Transfer::Data(vec![
                0x00, 0x19, 0x1E, 0x0A, 0x09, 0x15, 0x3D, 0x44, 0x51, 0x12, 0x03, 0x00, 0x3F, 0x3F,
            ]),
            Transfer::Cmd(Cmd::NVGAMCTRL),
            Transfer::Data(vec![
                0x00, 0x18, 0x1E, 0x0A, 0x09, 0x25, 0x3F, 0x43, 0x52, 0x33, 0x03, 0x00, 0x3F, 0x3F,
            ]),
            Transfer::Cmd(Cmd::DISPON),
        ];
        assert_eq!(log.transfers(), expected);
        assert_eq!(log.delays_ms(), vec![SLEEP_OUT_DELAY_MS, DISPLAY_ON_DELAY_MS]);
    }

    #[test]
    fn reset_toggles_line_with_settle_delays() {
        let (mut di, log) = interface(ScreenType::Screen320x240);
        di.reset().unwrap();
        assert_eq!(
            log.pin_events("rst"),
            vec![true, false, true],
            "reset line should go high, low, high"
        );
        assert_eq!(log.delays_ms(), vec![RESET_DELAY_MS; 3]);
        assert!(log.transfers().is_empty());
    }

    #[test]
    fn address_window_adds_rotation_offsets() {
        let (mut di, log) = interface(ScreenType::Screen135x240);
        di.set_rotation(0).unwrap();
        log.clear();

        di.set_address_window(0, 0, 134, 239).unwrap();
        assert_eq!(
            log.transfers(),
            vec![
                Transfer::Cmd(Cmd::CASET),
                Transfer::Data(vec![0x00, 52, 0x00, 134 + 52]),
                Transfer::Cmd(Cmd::RASET),
                Transfer::Data(vec![0x00, 40, 0x01, (279u16 & 0xFF) as u8]),
                Transfer::Cmd(Cmd::RAMWR),
            ]
        );
    }

    #[test]
    fn rotation_selects_row_and_madctl_byte() {
        let (mut di, log) = interface(ScreenType::Screen320x240);
        di.set_rotation(5).unwrap();
        assert_eq!(di.orientation(), ScreenType::Screen320x240.orientation(1));
        assert_eq!(
            log.transfers(),
            vec![Transfer::Cmd(Cmd::MADCTL), Transfer::Data(vec![0x60])]
        );

        log.clear();
        di.set_rotation(3).unwrap();
        assert_eq!(log.transfers()[1], Transfer::Data(vec![0xA0]));
    }

    #[test]
    fn power_save_encodings() {
        let cases: [(u8, Vec<Transfer>); 5] = [
            (
                0,
                vec![
                    Transfer::Cmd(Cmd::POWSAVE),
                    Transfer::Data(vec![0xEF]),
                    Transfer::Cmd(Cmd::DLPOFFSAVE),
                    Transfer::Data(vec![0xFF]),
                ],
            ),
            (
                1,
                vec![Transfer::Cmd(Cmd::POWSAVE), Transfer::Data(vec![0xEE])],
            ),
            (
                2,
                vec![Transfer::Cmd(Cmd::POWSAVE), Transfer::Data(vec![0xED])],
            ),
            (
                4,
                vec![
                    Transfer::Cmd(Cmd::POWSAVE),
                    Transfer::Data(vec![0xEF]),
                    Transfer::Cmd(Cmd::DLPOFFSAVE),
                    Transfer::Data(vec![0xFE]),
                ],
            ),
            (
                7,
                vec![
                    Transfer::Cmd(Cmd::POWSAVE),
                    Transfer::Data(vec![0xEC]),
                    Transfer::Cmd(Cmd::DLPOFFSAVE),
                    Transfer::Data(vec![0xFE]),
                ],
            ),
        ];

        for (mode, expected) in cases {
            let (mut di, log) = interface(ScreenType::Screen240x240);
            di.power_save(mode).unwrap();
            assert_eq!(log.transfers(), expected, "power save mode {}", mode);
        }
    }

    #[test]
    fn color_mode_is_masked() {
        let (mut di, log) = interface(ScreenType::Screen240x240);
        di.color_mode(Flag::COLOR_MODE_262K | Flag::COLOR_MODE_18BIT | 0x88)
            .unwrap();
        assert_eq!(
            log.transfers(),
            vec![Transfer::Cmd(Cmd::COLMOD), Transfer::Data(vec![0x66])]
        );
    }

    #[test]
    fn bus_failure_propagates() {
        let (mut di, log) = interface(ScreenType::Screen240x240);
        log.fail_transfers(true);
        let result = di.cmd(Cmd::NOP);
        assert!(matches!(
            result,
            Err(Error::Interface(DisplayError::BusWriteError))
        ));
    }

    #[test]
    fn dc_line_follows_command_and_data() {
        let (mut di, log) = interface(ScreenType::Screen240x240);
        di.cmd_with_data(Cmd::GCTRL, &[0x35]).unwrap();
        assert_eq!(log.pin_events("dc"), vec![false, true]);
    }
}
