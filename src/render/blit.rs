// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Pixel transfer primitives used by the sprite engine.
//!
//! A raster is a width×height run of palette indices, row major.
//! `Raster` and `RasterMut` borrow one for the duration of a single call,
//! which is also how a sprite's saved background is handed to `blit`.
//!
//! Both primitives clip against every raster they touch, so sprites may be
//! placed partially (or entirely) outside their host surface.

use crate::error::{Result, SpriteError};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Flags understood by `blit`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct BlitFlags: u8 {
        const MIRROR_X    = 0b0000_0001;
        const MIRROR_Y    = 0b0000_0010;
        /// Skip source pixels equal to the transparent colour.
        const TRANSPARENT = 0b0000_0100;
    }
}

bitflags! {
    /// Flags as given by the caller of a sprite show.
    ///
    /// Sprites are colour keyed unless asked otherwise, so the caller-facing
    /// bit sharing `BlitFlags::TRANSPARENT`'s position means the opposite:
    /// draw every pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct DrawFlags: u8 {
        const MIRROR_X = 0b0000_0001;
        const MIRROR_Y = 0b0000_0010;
        const OPAQUE   = 0b0000_0100;
    }
}

impl DrawFlags {
    /// Mirror bits pass through unchanged; `OPAQUE` is inverted into
    /// `TRANSPARENT`, so a sprite without `OPAQUE` is blitted colour keyed.
    pub fn to_blit_flags(self) -> BlitFlags {
        let mut flags = BlitFlags::empty();
        flags.set(BlitFlags::MIRROR_X, self.contains(DrawFlags::MIRROR_X));
        flags.set(BlitFlags::MIRROR_Y, self.contains(DrawFlags::MIRROR_Y));
        flags.set(BlitFlags::TRANSPARENT, !self.contains(DrawFlags::OPAQUE));
        flags
    }
}

/// What `scroll` writes into the area uncovered by the shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollFill {
    /// Keep whatever was there before.
    Untouched,
    /// Pixels shifted out on one side come back in on the other.
    Wrap,
    Colour(u8),
}

#[derive(Debug, Clone, Copy)]
pub struct Raster<'a> {
    pub width: i32,
    pub height: i32,
    pub pixels: &'a [u8],
}

#[derive(Debug)]
pub struct RasterMut<'a> {
    pub width: i32,
    pub height: i32,
    pub pixels: &'a mut [u8],
}

impl<'a> Raster<'a> {
    pub fn new(width: i32, height: i32, pixels: &'a [u8]) -> Self {
        debug_assert_eq!(pixels.len(), (width.max(0) * height.max(0)) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    pub fn get(&self, x: i32, y: i32) -> u8 {
        self.pixels[(y * self.width + x) as usize]
    }
}

impl<'a> RasterMut<'a> {
    pub fn new(width: i32, height: i32, pixels: &'a mut [u8]) -> Self {
        debug_assert_eq!(pixels.len(), (width.max(0) * height.max(0)) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    pub fn set(&mut self, x: i32, y: i32, c: u8) {
        let w = self.width;
        self.pixels[(y * w + x) as usize] = c;
    }
}

/// Copy a w×h block from `src` at (src_x, src_y) to `dst` at (dst_x, dst_y).
///
/// Mirroring is applied to the source block as a whole. With
/// `TRANSPARENT`, source pixels equal to `transparent` leave the destination
/// untouched.
#[allow(clippy::too_many_arguments)]
pub fn blit(
    src_x: i32,
    src_y: i32,
    dst_x: i32,
    dst_y: i32,
    w: i32,
    h: i32,
    src: &Raster,
    dst: &mut RasterMut,
    flags: BlitFlags,
    transparent: u8,
) -> Result<()> {
    if w < 0 || h < 0 {
        return Err(SpriteError::IllegalQuantity(format!(
            "blit size {}x{}",
            w, h
        )));
    }
    let keyed = flags.contains(BlitFlags::TRANSPARENT);
    // rows and columns of the block that land inside dst, widened so that
    // placements near the i32 limits cannot overflow
    let (x0, y0) = (i64::from(dst_x), i64::from(dst_y));
    let rows = (-y0).max(0)..(i64::from(dst.height) - y0).min(i64::from(h));
    let cols = (-x0).max(0)..(i64::from(dst.width) - x0).min(i64::from(w));
    for row in rows {
        let sy = if flags.contains(BlitFlags::MIRROR_Y) {
            i64::from(src_y) + i64::from(h) - 1 - row
        } else {
            i64::from(src_y) + row
        };
        for col in cols.clone() {
            let sx = if flags.contains(BlitFlags::MIRROR_X) {
                i64::from(src_x) + i64::from(w) - 1 - col
            } else {
                i64::from(src_x) + col
            };
            if !src.contains(sx, sy) {
                continue;
            }
            let c = src.get(sx as i32, sy as i32);
            if keyed && c == transparent {
                continue;
            }
            dst.set((x0 + col) as i32, (y0 + row) as i32, c);
        }
    }
    Ok(())
}

/// Shift the whole raster by (dx, dy).
pub fn scroll(surface: &mut RasterMut, dx: i32, dy: i32, fill: ScrollFill) -> Result<()> {
    if dx == 0 && dy == 0 {
        return Ok(());
    }
    let (w, h) = (surface.width, surface.height);
    if w <= 0 || h <= 0 {
        return Ok(());
    }
    let old: Vec<u8> = surface.pixels.to_vec();
    let src = Raster::new(w, h, &old);
    for y in 0..h {
        for x in 0..w {
            let sx = i64::from(x) - i64::from(dx);
            let sy = i64::from(y) - i64::from(dy);
            let c = if src.contains(sx, sy) {
                src.get(sx as i32, sy as i32)
            } else {
                match fill {
                    ScrollFill::Untouched => continue,
                    ScrollFill::Wrap => src.get(
                        sx.rem_euclid(i64::from(w)) as i32,
                        sy.rem_euclid(i64::from(h)) as i32,
                    ),
                    ScrollFill::Colour(c) => c,
                }
            };
            surface.set(x, y, c);
        }
    }
    Ok(())
}
