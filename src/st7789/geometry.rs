//! Supported panel geometries and their rotation tables.
//!
//! The controller RAM is 240x320. Smaller glass sits somewhere inside it, so each
//! rotation step carries its own window offset.

use crate::error::{Error, Result};

/// Effective size and RAM offset of the panel for one rotation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    /// Visible width in pixels
    pub width: u16,
    /// Visible height in pixels
    pub height: u16,
    /// Column offset added to every CASET coordinate
    pub x_start: u16,
    /// Row offset added to every RASET coordinate
    pub y_start: u16,
}

impl Orientation {
    const fn new(width: u16, height: u16, x_start: u16, y_start: u16) -> Self {
        Self {
            width,
            height,
            x_start,
            y_start,
        }
    }
}

const ROTATIONS_320X240: [Orientation; 4] = [
    Orientation::new(240, 320, 0, 0),
    Orientation::new(320, 240, 0, 0),
    Orientation::new(240, 320, 0, 0),
    Orientation::new(320, 240, 0, 0),
];

const ROTATIONS_240X240: [Orientation; 4] = [
    Orientation::new(240, 240, 0, 0),
    Orientation::new(240, 240, 0, 0),
    Orientation::new(240, 240, 0, 80),
    Orientation::new(240, 240, 80, 0),
];

const ROTATIONS_135X240: [Orientation; 4] = [
    Orientation::new(135, 240, 52, 40),
    Orientation::new(240, 135, 40, 53),
    Orientation::new(135, 240, 53, 40),
    Orientation::new(240, 135, 40, 52),
];

/// Panel geometries this driver supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenType {
    /// 320 wide, 240 high
    Screen320x240,
    /// 240 wide, 240 high
    Screen240x240,
    /// 135 wide, 240 high
    Screen135x240,
}

impl ScreenType {
    /// Look up a geometry by its panel dimensions
    pub fn from_dimensions(width: u16, height: u16) -> Result<Self> {
        match (width, height) {
            (320, 240) => Ok(ScreenType::Screen320x240),
            (240, 240) => Ok(ScreenType::Screen240x240),
            (135, 240) => Ok(ScreenType::Screen135x240),
            _ => Err(Error::UnsupportedDimensions { width, height }),
        }
    }

    /// Size before any rotation has been applied
    pub const fn native_size(self) -> (u16, u16) {
        match self {
            ScreenType::Screen320x240 => (320, 240),
            ScreenType::Screen240x240 => (240, 240),
            ScreenType::Screen135x240 => (135, 240),
        }
    }

    /// The four rotation rows, indexed by rotation step
    pub const fn rotation_table(self) -> &'static [Orientation; 4] {
        match self {
            ScreenType::Screen320x240 => &ROTATIONS_320X240,
            ScreenType::Screen240x240 => &ROTATIONS_240X240,
            ScreenType::Screen135x240 => &ROTATIONS_135X240,
        }
    }

    /// Row for `rotation % 4`
    pub const fn orientation(self, rotation: u8) -> Orientation {
        self.rotation_table()[(rotation % 4) as usize]
    }
}

impl TryFrom<u8> for ScreenType {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self> {
        match id {
            0 => Ok(ScreenType::Screen320x240),
            1 => Ok(ScreenType::Screen240x240),
            2 => Ok(ScreenType::Screen135x240),
            other => Err(Error::UnsupportedScreen(other)),
        }
    }
}

impl std::fmt::Display for ScreenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (width, height) = self.native_size();
        write!(f, "{}x{}", width, height)
    }
}
