//! Framebuffer for a rectangular region of the panel.
//!
//! A [`Canvas`] owns `width * height * 2` bytes of big-endian RGB565, row-major, and
//! borrows the [`Panel`] it flushes into. Any number of canvases can be carved from one
//! device; they share it only through [`Panel::flush_region`].
//!
//! Pixel coordinates are relative to the canvas. Reading or writing outside
//! `0..width` x `0..height` through the pixel methods is a caller bug and panics on the
//! slice index. Drawing through [`DrawTarget`] clips instead.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use image::{GenericImageView, Rgba};

use crate::color::{rgb565_to_rgba, rgba_to_rgb565};
use crate::error::Result;

/// Something a canvas can be flushed into
pub trait Panel {
    /// Address the inclusive region `(x0, y0)..=(x1, y1)` and write `pixels` into it,
    /// without any other command sequence interleaving.
    fn flush_region(&self, x0: u16, y0: u16, x1: u16, y1: u16, pixels: &[u8]) -> Result<()>;
}

/// RGB565 framebuffer over one region of a [`Panel`]
pub struct Canvas<'d, P: Panel + ?Sized> {
    device: &'d P,
    x0: u16,
    y0: u16,
    x1: u16,
    y1: u16,
    width: u16,
    height: u16,
    buffer: Vec<u8>,
}

impl<'d, P: Panel + ?Sized> Canvas<'d, P> {
    /// Black canvas over the inclusive region `(x0, y0)..=(x1, y1)`
    pub fn new(device: &'d P, x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        assert!(
            x0 <= x1 && y0 <= y1,
            "empty canvas region ({}, {})..=({}, {})",
            x0,
            y0,
            x1,
            y1
        );
        let width = x1 - x0 + 1;
        let height = y1 - y0 + 1;
        Canvas {
            device,
            x0,
            y0,
            x1,
            y1,
            width,
            height,
            buffer: vec![0; usize::from(width) * usize::from(height) * 2],
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Inclusive panel region `(x0, y0, x1, y1)` this canvas covers
    pub fn region(&self) -> (u16, u16, u16, u16) {
        (self.x0, self.y0, self.x1, self.y1)
    }

    /// Raw big-endian RGB565 bytes, row-major
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    #[inline]
    fn offset(&self, x: u16, y: u16) -> usize {
        (usize::from(y) * usize::from(self.width) + usize::from(x)) * 2
    }

    /// Store a raw RGB565 value
    #[inline]
    pub fn set_rgb565(&mut self, x: u16, y: u16, color: u16) {
        let offset = self.offset(x, y);
        self.buffer[offset..offset + 2].copy_from_slice(&color.to_be_bytes());
    }

    /// Read back a raw RGB565 value
    #[inline]
    pub fn get_rgb565(&self, x: u16, y: u16) -> u16 {
        let offset = self.offset(x, y);
        u16::from_be_bytes([self.buffer[offset], self.buffer[offset + 1]])
    }

    /// Store an RGBA color. Translucent colors are blended over the current pixel.
    pub fn set_color(&mut self, x: u16, y: u16, color: Rgba<u8>) {
        let background = if color[3] == 0xFF {
            0
        } else {
            self.get_rgb565(x, y)
        };
        self.set_rgb565(x, y, rgba_to_rgb565(color, background));
    }

    /// Current pixel as an opaque RGBA color
    pub fn get_color(&self, x: u16, y: u16) -> Rgba<u8> {
        rgb565_to_rgba(self.get_rgb565(x, y))
    }

    /// Composite `image` onto the canvas with its top-left corner at the canvas origin.
    /// Parts of the image outside the canvas are skipped.
    pub fn draw_image<I>(&mut self, image: &I)
    where
        I: GenericImageView<Pixel = Rgba<u8>>,
    {
        let width = image.width().min(u32::from(self.width));
        let height = image.height().min(u32::from(self.height));
        for y in 0..height {
            for x in 0..width {
                self.set_color(x as u16, y as u16, image.get_pixel(x, y));
            }
        }
    }

    /// Set every pixel to black. For other colors use `DrawTarget::clear`.
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Copy of the current buffer
    pub fn snapshot(&self) -> Vec<u8> {
        self.buffer.clone()
    }

    /// Send a snapshot of the buffer to the panel region
    pub fn flush(&self) -> Result<()> {
        let snapshot = self.snapshot();
        log::debug!(
            "Flushing {}x{} canvas at ({}, {})",
            self.width,
            self.height,
            self.x0,
            self.y0
        );
        self.device
            .flush_region(self.x0, self.y0, self.x1, self.y1, &snapshot)
    }

    /// Send `pixels` to this canvas' panel region, leaving the canvas buffer untouched.
    /// `pixels` must hold exactly `width * height * 2` bytes.
    pub fn flush_directly(&self, pixels: &[u8]) -> Result<()> {
        assert_eq!(
            pixels.len(),
            self.buffer.len(),
            "buffer does not match the {}x{} canvas",
            self.width,
            self.height
        );
        self.device
            .flush_region(self.x0, self.y0, self.x1, self.y1, pixels)
    }
}

impl<P: Panel + ?Sized> OriginDimensions for Canvas<'_, P> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width), u32::from(self.height))
    }
}

impl<P: Panel + ?Sized> DrawTarget for Canvas<'_, P> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = (i32::from(self.width), i32::from(self.height));
        for Pixel(point, color) in pixels {
            if (0..width).contains(&point.x) && (0..height).contains(&point.y) {
                self.set_rgb565(point.x as u16, point.y as u16, color.into_storage());
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> core::result::Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.size == Size::zero() {
            return Ok(());
        }

        let pixel = color.into_storage().to_be_bytes();
        let x = area.top_left.x as u16;
        let row_len = area.size.width as usize * 2;
        for y in area.rows() {
            let start = self.offset(x, y as u16);
            for chunk in self.buffer[start..start + row_len].chunks_exact_mut(2) {
                chunk.copy_from_slice(&pixel);
            }
        }
        Ok(())
    }
}
