//! Error type shared by the driver, the canvas and playback.

pub use display_interface::DisplayError;

/// Everything that can go wrong while talking to the panel
#[derive(Debug)]
pub enum Error {
    /// Bus transfer or control line failure, as reported by the interface
    Interface(DisplayError),
    /// The backlight line could not be driven
    Backlight,
    /// Screen id outside the supported geometries
    UnsupportedScreen(u8),
    /// Panel dimensions outside the supported geometries
    UnsupportedDimensions {
        /// Requested width
        width: u16,
        /// Requested height
        height: u16,
    },
    /// The playback drawing task panicked before it could report
    DrawTaskPanicked,
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, Error>;

impl From<DisplayError> for Error {
    fn from(error: DisplayError) -> Self {
        Error::Interface(error)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "display interface error: {:?}", e),
            Error::Backlight => write!(f, "failed to drive the backlight pin"),
            Error::UnsupportedScreen(id) => write!(
                f,
                "unsupported display id {}. 320x240, 240x240 and 135x240 are supported",
                id
            ),
            Error::UnsupportedDimensions { width, height } => write!(
                f,
                "unsupported display {}x{}. 320x240, 240x240 and 135x240 are supported",
                width, height
            ),
            Error::DrawTaskPanicked => write!(f, "playback drawing task panicked"),
        }
    }
}

impl std::error::Error for Error {}
