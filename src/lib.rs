//! ST7789 LCD driver, RGB565 canvas and paced animation playback
//!
//! Drives the 320x240, 240x240 and 135x240 ST7789 modules over SPI with separate
//! data/command, reset and backlight lines.
//!
//! ### Usage
//!
//! ```ignore
//! use st7789_canvas::st7789::{ScreenType, SpiDeviceBus, St7789, StdDelay};
//! use st7789_canvas::playback::{play, CancelToken, FrameSequence};
//!
//! let display = St7789::new(SpiDeviceBus::new(spi), dc, rst, backlight, StdDelay, ScreenType::Screen240x240)?;
//! let mut canvas = display.full_screen_canvas();
//!
//! let sequence = FrameSequence::from_image_frames(gif.into_frames().collect_frames()?, 0);
//! play(&mut canvas, &sequence, &CancelToken::with_deadline(Duration::from_secs(30)))?;
//! ```
//!
//! Bus and pins come from any `embedded_hal` 1.0 implementation. The crate logs through
//! [`log`] and never installs a logger.
#![warn(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod canvas;
pub mod color;
pub mod error;
pub mod playback;
pub mod st7789;

pub use canvas::{Canvas, Panel};
pub use error::{DisplayError, Error, Result};
pub use playback::{play, CancelToken, Frame, FrameSequence, PlaybackOutcome, PlaybackReport};
pub use st7789::{ScreenType, St7789};
