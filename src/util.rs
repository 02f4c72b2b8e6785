// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Utilities for points and rects,
//! a fixed-capacity value stack: stack.rs
//! and the 256-bit set used for sprite collisions: bitset.rs

use serde::{Deserialize, Serialize};

pub mod bitset;
pub mod stack;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointI32 {
    pub x: i32,
    pub y: i32,
}

impl PointI32 {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Signed rect, sprites may hang off any side of their host surface.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(self) -> i32 {
        self.x
    }

    pub fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn top(self) -> i32 {
        self.y
    }

    pub fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn center(self) -> PointI32 {
        PointI32 {
            x: self.x.saturating_add(self.width / 2),
            y: self.y.saturating_add(self.height / 2),
        }
    }

    /// Boundary-inclusive overlap: rects whose edges touch count as overlapping.
    pub fn touches(self, other: Rect) -> bool {
        !(self.right() < other.left()
            || other.right() < self.left()
            || self.bottom() < other.top()
            || other.bottom() < self.top())
    }
}
