//! Software RGBA surface
//!
//! Used both for the screen and for sprite images. Pixels are plain `Pod`
//! structs so the whole buffer can be viewed as bytes for snapshots.

use std::io::{self, Write};

use bytemuck::{Pod, Zeroable};
use glam::IVec2;

use crate::sim::Rect;

/// 8-bit RGBA pixel; alpha 0 is the transparent colorkey
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const TRANSPARENT: Pixel = Pixel::rgba(0, 0, 0, 0);
    pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);
    pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: i32,
    height: i32,
    pixels: Vec<Pixel>,
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Framebuffer {
    /// Fully transparent surface
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, Pixel::TRANSPARENT)
    }

    pub fn filled(width: i32, height: i32, pixel: Pixel) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            pixels: vec![pixel; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Pixel> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, x: i32, y: i32, pixel: Pixel) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = pixel;
        }
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Fill `rect`, clipped to the surface
    pub fn fill_rect(&mut self, rect: &Rect, pixel: Pixel) {
        let Some(clip) = rect.intersection(&self.rect()) else {
            return;
        };
        for y in clip.top()..clip.bottom() {
            let start = (y * self.width + clip.left()) as usize;
            self.pixels[start..start + clip.w as usize].fill(pixel);
        }
    }

    /// Draw `src` with its top-left at `at`, skipping transparent pixels
    pub fn blit(&mut self, src: &Framebuffer, at: IVec2) {
        let dest = Rect::new(at.x, at.y, src.width, src.height);
        let Some(clip) = dest.intersection(&self.rect()) else {
            return;
        };
        for y in clip.top()..clip.bottom() {
            for x in clip.left()..clip.right() {
                if let Some(pixel) = src.get(x - at.x, y - at.y)
                    && !pixel.is_transparent()
                {
                    self.set(x, y, pixel);
                }
            }
        }
    }

    /// Copy the pixels of `src` under `rect` into the same place here
    pub fn copy_region(&mut self, src: &Framebuffer, rect: &Rect) {
        let Some(clip) = rect
            .intersection(&self.rect())
            .and_then(|r| r.intersection(&src.rect()))
        else {
            return;
        };
        for y in clip.top()..clip.bottom() {
            let dst = (y * self.width + clip.left()) as usize;
            let from = (y * src.width + clip.left()) as usize;
            let len = clip.w as usize;
            self.pixels[dst..dst + len].copy_from_slice(&src.pixels[from..from + len]);
        }
    }

    /// Mirrored copy
    pub fn flipped(&self, horizontal: bool, vertical: bool) -> Self {
        let mut out = Self::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let sx = if horizontal { self.width - 1 - x } else { x };
                let sy = if vertical { self.height - 1 - y } else { y };
                if let Some(pixel) = self.get(sx, sy) {
                    out.set(x, y, pixel);
                }
            }
        }
        out
    }

    /// Cover a `width` x `height` surface with repeats of `tile`
    pub fn tiled(tile: &Framebuffer, width: i32, height: i32) -> Self {
        let mut out = Self::new(width, height);
        if tile.width == 0 || tile.height == 0 {
            return out;
        }
        for y in (0..height).step_by(tile.height as usize) {
            for x in (0..width).step_by(tile.width as usize) {
                out.blit(tile, IVec2::new(x, y));
            }
        }
        out
    }

    /// Pixel data as raw RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Write the surface as a PAM (netpbm RGB_ALPHA) image
    pub fn write_pam<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(
            out,
            "P7\nWIDTH {}\nHEIGHT {}\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n",
            self.width, self.height
        )?;
        out.write_all(self.as_bytes())?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Pixel = Pixel::rgb(255, 0, 0);
    const BLUE: Pixel = Pixel::rgb(0, 0, 255);

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut fb = Framebuffer::filled(4, 4, Pixel::BLACK);
        fb.fill_rect(&Rect::new(2, 2, 10, 10), RED);
        assert_eq!(fb.get(1, 1), Some(Pixel::BLACK));
        assert_eq!(fb.get(3, 3), Some(RED));
        assert_eq!(fb.get(4, 4), None);
    }

    #[test]
    fn test_blit_skips_transparent_pixels() {
        let mut sprite = Framebuffer::new(2, 1);
        sprite.set(1, 0, RED);
        let mut fb = Framebuffer::filled(3, 1, BLUE);
        fb.blit(&sprite, IVec2::new(1, 0));
        assert_eq!(fb.pixels(), &[BLUE, BLUE, RED]);

        // Partly off-screen
        fb.blit(&sprite, IVec2::new(-1, 0));
        assert_eq!(fb.pixels(), &[RED, BLUE, RED]);
    }

    #[test]
    fn test_copy_region_restores_background() {
        let background = Framebuffer::filled(4, 4, BLUE);
        let mut fb = background.clone();
        fb.fill_rect(&Rect::new(0, 0, 4, 4), RED);
        fb.copy_region(&background, &Rect::new(1, 1, 2, 2));
        assert_eq!(fb.get(0, 0), Some(RED));
        assert_eq!(fb.get(1, 1), Some(BLUE));
        assert_eq!(fb.get(2, 2), Some(BLUE));
        assert_eq!(fb.get(3, 3), Some(RED));
    }

    #[test]
    fn test_flipped_both_axes() {
        let mut img = Framebuffer::new(2, 2);
        img.set(0, 0, RED);
        let flipped = img.flipped(true, true);
        assert_eq!(flipped.get(1, 1), Some(RED));
        assert_eq!(flipped.get(0, 0), Some(Pixel::TRANSPARENT));
    }

    #[test]
    fn test_tiled_covers_surface() {
        let tile = Framebuffer::filled(3, 3, BLUE);
        let out = Framebuffer::tiled(&tile, 7, 5);
        assert!(out.pixels().iter().all(|p| *p == BLUE));
    }

    #[test]
    fn test_pam_header_and_payload() {
        let fb = Framebuffer::filled(2, 1, RED);
        let mut bytes = Vec::new();
        fb.write_pam(&mut bytes).unwrap();
        let header = b"P7\nWIDTH 2\nHEIGHT 1\nDEPTH 4\nMAXVAL 255\nTUPLTYPE RGB_ALPHA\nENDHDR\n";
        assert!(bytes.starts_with(header));
        assert_eq!(&bytes[header.len()..], &[255, 0, 0, 255, 255, 0, 0, 255]);
    }
}
