// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! The surface table: a fixed number of slots, each either free or holding
//! a window, an off-screen buffer, or a sprite.
//!
//! A surface's id is its slot index and never changes while it is allocated.
//! Active sprites (type `Sprite`) are additionally threaded on a forward
//! chain kept in ascending id order, so collision passes and queries
//! enumerate them deterministically without scanning free slots.

use crate::{
    error::{Result, SpriteError},
    render::blit::{DrawFlags, Raster, RasterMut},
    render::sprite::collision::EdgeFlags,
    util::{
        bitset::{Bitset256, BITSET_BITS},
        PointI32, Rect,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SurfaceType {
    #[default]
    None,
    Window,
    Buffer,
    Sprite,
    InactiveSprite,
}

impl SurfaceType {
    pub fn is_sprite(self) -> bool {
        matches!(self, SurfaceType::Sprite | SurfaceType::InactiveSprite)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Surface {
    pub id: usize,
    pub kind: SurfaceType,
    /// Top-left corner on the host, `None` while off screen.
    pub pos: Option<PointI32>,
    /// Staged position, committed by `move` (or `scroll` for screen-fixed layers).
    pub next_x: Option<i32>,
    pub next_y: Option<i32>,
    pub width: i32,
    pub height: i32,
    pub pixels: Vec<u8>,
    /// Pixels covered by the sprite, present only while the sprite is shown.
    pub background: Option<Vec<u8>>,
    pub layer: Option<u8>,
    /// Surface the sprite was last shown on.
    pub host: Option<usize>,
    pub flags: DrawFlags,
    pub transparent: u8,
    pub edge_collisions: EdgeFlags,
    pub sprite_collisions: Bitset256,
    pub next_active: Option<usize>,
}

impl Surface {
    fn empty(id: usize) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.kind == SurfaceType::Sprite
    }

    /// Bounding box on the host, if on screen.
    pub fn bounds(&self) -> Option<Rect> {
        self.pos
            .map(|p| Rect::new(p.x, p.y, self.width, self.height))
    }

    pub fn raster(&self) -> Raster<'_> {
        Raster::new(self.width, self.height, &self.pixels)
    }

    pub fn raster_mut(&mut self) -> RasterMut<'_> {
        RasterMut::new(self.width, self.height, &mut self.pixels)
    }

    /// Borrowed view of the saved background, same size as the sprite.
    pub fn background_raster(&self) -> Option<Raster<'_>> {
        self.background
            .as_deref()
            .map(|b| Raster::new(self.width, self.height, b))
    }

    pub fn background_raster_mut(&mut self) -> Option<RasterMut<'_>> {
        let (w, h) = (self.width, self.height);
        self.background
            .as_deref_mut()
            .map(|b| RasterMut::new(w, h, b))
    }

    pub fn clear_collisions(&mut self) {
        self.edge_collisions = EdgeFlags::empty();
        self.sprite_collisions.clear_all();
    }
}

pub struct SurfaceTable {
    surfaces: Vec<Surface>,
    first_active: Option<usize>,
}

impl SurfaceTable {
    /// At most 256 slots, one per collision bit.
    pub fn new(count: usize) -> Self {
        Self {
            surfaces: (0..count.min(BITSET_BITS)).map(Surface::empty).collect(),
            first_active: None,
        }
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn get(&self, id: usize) -> Result<&Surface> {
        self.surfaces.get(id).ok_or(SpriteError::InvalidSprite(id))
    }

    pub fn get_mut(&mut self, id: usize) -> Result<&mut Surface> {
        self.surfaces
            .get_mut(id)
            .ok_or(SpriteError::InvalidSprite(id))
    }

    /// Two distinct surfaces borrowed mutably at once.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Result<(&mut Surface, &mut Surface)> {
        if a == b {
            return Err(SpriteError::InternalFault(format!(
                "surface {} borrowed twice",
                a
            )));
        }
        let n = self.surfaces.len();
        if a >= n {
            return Err(SpriteError::InvalidSprite(a));
        }
        if b >= n {
            return Err(SpriteError::InvalidSprite(b));
        }
        if a < b {
            let (lo, hi) = self.surfaces.split_at_mut(b);
            Ok((&mut lo[a], &mut hi[0]))
        } else {
            let (lo, hi) = self.surfaces.split_at_mut(a);
            Ok((&mut hi[0], &mut lo[b]))
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Surface> {
        self.surfaces.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Surface> {
        self.surfaces.iter_mut()
    }

    fn create(&mut self, kind: SurfaceType, width: i32, height: i32) -> Result<usize> {
        if width <= 0 || height <= 0 {
            return Err(SpriteError::IllegalQuantity(format!(
                "surface size {}x{}",
                width, height
            )));
        }
        let id = self
            .surfaces
            .iter()
            .position(|s| s.kind == SurfaceType::None)
            .ok_or(SpriteError::OutOfMemory)?;
        let len = width.checked_mul(height).ok_or_else(|| {
            SpriteError::IllegalQuantity(format!("surface size {}x{}", width, height))
        })? as usize;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| SpriteError::OutOfMemory)?;
        pixels.resize(len, 0);

        let s = &mut self.surfaces[id];
        *s = Surface::empty(id);
        s.kind = kind;
        s.width = width;
        s.height = height;
        s.pixels = pixels;
        Ok(id)
    }

    pub fn create_window(&mut self, width: i32, height: i32) -> Result<usize> {
        self.create(SurfaceType::Window, width, height)
    }

    pub fn create_buffer(&mut self, width: i32, height: i32) -> Result<usize> {
        self.create(SurfaceType::Buffer, width, height)
    }

    /// New sprites start inactive and off screen.
    pub fn create_sprite(&mut self, width: i32, height: i32) -> Result<usize> {
        self.create(SurfaceType::InactiveSprite, width, height)
    }

    /// Return a slot to the free pool. The caller is responsible for the
    /// sprite having been taken off its host first.
    pub fn free(&mut self, id: usize) -> Result<()> {
        self.get(id)?;
        self.unlink_active(id);
        self.surfaces[id] = Surface::empty(id);
        Ok(())
    }

    pub fn first_active(&self) -> Option<usize> {
        self.first_active
    }

    /// Insert `id` in the active chain keeping ascending order. Already linked is a no-op.
    pub fn link_active(&mut self, id: usize) {
        let mut prev: Option<usize> = None;
        let mut cur = self.first_active;
        while let Some(c) = cur {
            if c >= id {
                break;
            }
            prev = Some(c);
            cur = self.surfaces[c].next_active;
        }
        if cur == Some(id) {
            return;
        }
        self.surfaces[id].next_active = cur;
        match prev {
            None => self.first_active = Some(id),
            Some(p) => self.surfaces[p].next_active = Some(id),
        }
    }

    pub fn unlink_active(&mut self, id: usize) {
        if self.first_active == Some(id) {
            self.first_active = self.surfaces[id].next_active.take();
            return;
        }
        let mut cur = self.first_active;
        while let Some(c) = cur {
            let next = self.surfaces[c].next_active;
            if next == Some(id) {
                self.surfaces[c].next_active = self.surfaces[id].next_active.take();
                return;
            }
            cur = next;
        }
    }

    pub fn active_ids(&self) -> Vec<usize> {
        let mut ids = vec![];
        let mut cur = self.first_active;
        while let Some(c) = cur {
            ids.push(c);
            cur = self.surfaces[c].next_active;
        }
        ids
    }
}
