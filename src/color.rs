//! RGB565 colors and conversion to and from 8-bit RGBA.
//!
//! RGB565 keeps the top 5 bits of red and blue and the top 6 bits of green. Converting
//! back does not restore the dropped low bits, so `rgb -> rgb565 -> rgb` truncates but
//! `rgb565 -> rgb -> rgb565` is exact.

use image::Rgba;

/// Black, 0x0000
pub const BLACK: u16 = 0x0000;
/// Blue, 0x001F
pub const BLUE: u16 = 0x001F;
/// Green, 0x07E0
pub const GREEN: u16 = 0x07E0;
/// Red, 0xF800
pub const RED: u16 = 0xF800;
/// Cyan, 0x07FF
pub const CYAN: u16 = 0x07FF;
/// Magenta, 0xF81F
pub const MAGENTA: u16 = 0xF81F;
/// Yellow, 0xFFE0
pub const YELLOW: u16 = 0xFFE0;
/// White, 0xFFFF
pub const WHITE: u16 = 0xFFFF;

/// Expand an RGB565 value to 8-bit channels. The low bits of each channel are zero.
pub const fn rgb565_to_rgb(color: u16) -> (u8, u8, u8) {
    (
        ((color >> 8) & 0xF8) as u8,
        ((color >> 3) & 0xFC) as u8,
        ((color & 0x1F) << 3) as u8,
    )
}

/// Expand an RGB565 value to an opaque RGBA color
pub fn rgb565_to_rgba(color: u16) -> Rgba<u8> {
    let (r, g, b) = rgb565_to_rgb(color);
    Rgba([r, g, b, 0xFF])
}

/// Pack 8-bit channels into RGB565, dropping the low bits
pub const fn rgb_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Pack an RGBA color into RGB565.
///
/// An opaque color is packed as is. Otherwise every channel is composited over
/// `background` as `(c * a + bg * (255 - a)) / 255` first.
pub fn rgba_to_rgb565(color: Rgba<u8>, background: u16) -> u16 {
    let [r, g, b, a] = color.0;
    if a == 0xFF {
        return rgb_to_rgb565(r, g, b);
    }

    let (bg_r, bg_g, bg_b) = rgb565_to_rgb(background);
    rgb_to_rgb565(blend(r, bg_r, a), blend(g, bg_g, a), blend(b, bg_b, a))
}

fn blend(channel: u8, background: u8, alpha: u8) -> u8 {
    let alpha = u32::from(alpha);
    ((u32::from(channel) * alpha + u32::from(background) * (255 - alpha)) / 255) as u8
}
