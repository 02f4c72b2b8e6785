// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Sprite-vs-sprite and sprite-vs-edge collisions.
//!
//! Each sprite keeps one bit per other sprite it overlaps plus a mask of
//! the write-surface edges it crosses. Bits are always set or cleared on
//! both sprites of a pair at once, so the relation stays symmetric.
//!
//! Two sprites collide when their boxes `[x, x+width] × [y, y+height]`
//! touch or overlap, unless both sit on different non-zero layers.
//! Layer 0 collides with everything.
//!
//! Queries enumerate in ascending sprite id, with an edge collision (if
//! any) reported last. Towards the interpreter, results are encoded as
//! plain integers: a sprite id, `EDGE_COLLISION | mask`, or `NO_COLLISION`.

use crate::{
    error::{Result, SpriteError},
    render::sprite::SpriteEngine,
    render::surface::{Surface, SurfaceTable, SurfaceType},
};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
    pub struct EdgeFlags: u8 {
        const LEFT   = 0b0001;
        const TOP    = 0b0010;
        const RIGHT  = 0b0100;
        const BOTTOM = 0b1000;
    }
}

/// Marks an edge collision; the low bits carry the `EdgeFlags`.
pub const EDGE_COLLISION: i32 = 0x100;
pub const NO_COLLISION: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Sprite(usize),
    Edge(EdgeFlags),
}

impl Collision {
    pub fn encode(self) -> i32 {
        match self {
            Collision::Sprite(id) => id as i32,
            Collision::Edge(mask) => EDGE_COLLISION | i32::from(mask.bits()),
        }
    }

    pub fn decode(v: i32) -> Option<Collision> {
        if v < 0 {
            None
        } else if v & EDGE_COLLISION != 0 {
            Some(Collision::Edge(EdgeFlags::from_bits_truncate(
                (v & 0xff) as u8,
            )))
        } else {
            Some(Collision::Sprite(v as usize))
        }
    }
}

fn sprites_collide(a: &Surface, b: &Surface) -> bool {
    if a.id == b.id {
        return false;
    }
    if let (Some(la), Some(lb)) = (a.layer, b.layer) {
        if la != 0 && lb != 0 && la != lb {
            return false;
        }
    }
    match (a.bounds(), b.bounds()) {
        (Some(ra), Some(rb)) => ra.touches(rb),
        _ => false,
    }
}

fn edge_mask(s: &Surface, width: i32, height: i32) -> EdgeFlags {
    let mut mask = EdgeFlags::empty();
    if let Some(r) = s.bounds() {
        mask.set(EdgeFlags::LEFT, r.left() < 0);
        mask.set(EdgeFlags::TOP, r.top() < 0);
        mask.set(EdgeFlags::RIGHT, r.right() > width);
        mask.set(EdgeFlags::BOTTOM, r.bottom() > height);
    }
    mask
}

impl SpriteEngine {
    fn edge_bounds(&self, table: &SurfaceTable) -> Result<(i32, i32)> {
        match table.get(self.write_surface()) {
            Ok(s) if s.kind != SurfaceType::None => Ok((s.width, s.height)),
            _ => Err(SpriteError::InvalidWriteSurface),
        }
    }

    /// Recompute one sprite's collisions against every active sprite.
    pub fn update_collisions(&self, table: &mut SurfaceTable, id: usize) -> Result<()> {
        let (w, h) = self.edge_bounds(table)?;
        {
            let s = table.get_mut(id)?;
            if !s.kind.is_sprite() {
                return Err(SpriteError::NotASprite);
            }
            s.clear_collisions();
            if !s.is_active() {
                return Ok(());
            }
        }

        let mut cur = table.first_active();
        while let Some(o) = cur {
            if o != id {
                let (s, other) = table.pair_mut(id, o)?;
                if other.is_active() {
                    let hit = sprites_collide(s, other);
                    s.sprite_collisions.assign(o, hit);
                    other.sprite_collisions.assign(id, hit);
                }
            }
            cur = table.get(o)?.next_active;
        }

        let s = table.get_mut(id)?;
        s.edge_collisions = edge_mask(s, w, h);
        Ok(())
    }

    /// Recompute every active sprite; each unordered pair is tested once.
    pub fn update_all_collisions(&self, table: &mut SurfaceTable) -> Result<()> {
        let (w, h) = self.edge_bounds(table)?;
        for s in table.iter_mut() {
            s.clear_collisions();
            if s.is_active() {
                s.edge_collisions = edge_mask(s, w, h);
            }
        }

        let mut outer = table.first_active();
        while let Some(a) = outer {
            let mut inner = table.get(a)?.next_active;
            while let Some(b) = inner {
                let (sa, sb) = table.pair_mut(a, b)?;
                if sa.is_active() && sb.is_active() {
                    let hit = sprites_collide(sa, sb);
                    sa.sprite_collisions.assign(b, hit);
                    sb.sprite_collisions.assign(a, hit);
                }
                inner = sb.next_active;
            }
            outer = table.get(a)?.next_active;
        }
        Ok(())
    }

    /// Everything `id` currently collides with: sprites by ascending id, then the edge.
    pub fn collisions(&self, table: &SurfaceTable, id: usize) -> Result<Vec<Collision>> {
        let s = table.get(id)?;
        if !s.kind.is_sprite() {
            return Err(SpriteError::NotASprite);
        }
        let mut out = vec![];
        let mut cur = table.first_active();
        while let Some(o) = cur {
            let other = table.get(o)?;
            if o != id && other.is_active() && s.sprite_collisions.test(o) {
                out.push(Collision::Sprite(o));
            }
            cur = other.next_active;
        }
        if !s.edge_collisions.is_empty() {
            out.push(Collision::Edge(s.edge_collisions));
        }
        Ok(out)
    }

    pub fn num_collisions(&self, table: &SurfaceTable, id: usize) -> Result<usize> {
        Ok(self.collisions(table, id)?.len())
    }

    /// The n-th (0-based) collision of `id`, legacy encoded.
    pub fn collision(&self, table: &SurfaceTable, id: usize, n: usize) -> Result<i32> {
        Ok(self
            .collisions(table, id)?
            .get(n)
            .map_or(NO_COLLISION, |c| c.encode()))
    }

    /// Active sprites with at least one sprite or edge collision, ascending.
    pub fn collided_sprites(&self, table: &SurfaceTable) -> Result<Vec<usize>> {
        let mut out = vec![];
        let mut cur = table.first_active();
        while let Some(o) = cur {
            let s = table.get(o)?;
            if s.is_active() && !self.collisions(table, o)?.is_empty() {
                out.push(o);
            }
            cur = s.next_active;
        }
        Ok(out)
    }

    pub fn num_collided_sprites(&self, table: &SurfaceTable) -> Result<usize> {
        Ok(self.collided_sprites(table)?.len())
    }

    /// The n-th (0-based) sprite with a collision, or `NO_COLLISION`.
    pub fn collided_sprite(&self, table: &SurfaceTable, n: usize) -> Result<i32> {
        Ok(self
            .collided_sprites(table)?
            .get(n)
            .map_or(NO_COLLISION, |&id| id as i32))
    }

    /// 64 bits of the collision set starting at `start` (a multiple of 64).
    pub fn collision_bitset(&self, table: &SurfaceTable, id: usize, start: usize) -> Result<u64> {
        let s = table.get(id)?;
        if !s.kind.is_sprite() {
            return Err(SpriteError::NotASprite);
        }
        s.sprite_collisions.window(start)
    }
}
