//! Parameter bytes and register tables.

use crate::st7789::cmd::Cmd;

/// Parameter bytes and fixed register tables for the ST7789 controller.
///
/// Everything here is part of the binary contract with the panel and must not be
/// re-derived: the init register values match the panel's electrical timing.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Interface pixel format (0x3A): RGB interface bits 6:4, control interface bits 2:0
    pub const COLOR_MODE_65K: u8 = 0x50;
    pub const COLOR_MODE_262K: u8 = 0x60;
    pub const COLOR_MODE_12BIT: u8 = 0x03;
    pub const COLOR_MODE_16BIT: u8 = 0x05;
    pub const COLOR_MODE_18BIT: u8 = 0x06;
    pub const COLOR_MODE_16M: u8 = 0x07;
    pub const COLOR_MODE_MASK: u8 = 0x77;

    /// MADCTL value per rotation step, indexed by `rotation % 4`
    pub const ROTATIONS: [u8; 4] = [0x00, 0x60, 0xC0, 0xA0];

    // Power save (0xBC) and display-off power save (0xBD)
    pub const POWSAVE_BASE: u8 = 0xEC;
    pub const POWSAVE_IDLE_OFF: u8 = 0x01; // set when idle mode is not requested
    pub const POWSAVE_NORMAL_OFF: u8 = 0x02; // set when normal mode is not requested
    pub const DLPOFFSAVE_DISABLE: u8 = 0xFF;
    pub const DLPOFFSAVE_ENABLE: u8 = 0xFE;

    // Power save mode bits accepted by `power_save`
    pub const POWER_SAVE_OFF: u8 = 0;
    pub const POWER_SAVE_IDLE: u8 = 1;
    pub const POWER_SAVE_NORMAL: u8 = 2;
    pub const POWER_SAVE_DISPLAY_OFF: u8 = 4;

    /// Register writes of the init sequence that follow sleep-out and rotation 0.
    ///
    /// Entries with no data are bare commands.
    pub const INIT_REGISTERS: [(u8, &'static [u8]); 14] = [
        (
            Cmd::COLMOD,
            &[(Self::COLOR_MODE_65K | Self::COLOR_MODE_16BIT) & Self::COLOR_MODE_MASK],
        ),
        (Cmd::PORCTRL, &[0x0C, 0x0C]),
        (Cmd::GCTRL, &[0x35]),
        (Cmd::VCOMS, &[0x1A]),
        (Cmd::LCMCTRL, &[0x2C]),
        (Cmd::VDVVRHEN, &[0x01]),
        (Cmd::VRHS, &[0x0B]),
        (Cmd::VDVSET, &[0x20]),
        (Cmd::FRCTR2, &[0x0F]),
        (Cmd::PWCTRL1, &[0xA4, 0xA1]),
        (Cmd::INVON, &[]),
        (
            Cmd::PVGAMCTRL,
            &[
                0x00, 0x19, 0x1E, 0x0A, 0x09, 0x15, 0x3D, 0x44, 0x51, 0x12, 0x03, 0x00, 0x3F,
                0x3F,
            ],
        ),
        (
            Cmd::NVGAMCTRL,
            &[
                0x00, 0x18, 0x1E, 0x0A, 0x09, 0x25, 0x3F, 0x43, 0x52, 0x33, 0x03, 0x00, 0x3F,
                0x3F,
            ],
        ),
        (Cmd::DISPON, &[]),
    ];
}
