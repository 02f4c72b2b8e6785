// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Sprite lifecycle: show, hide and the compound operations built on them.
//!
//! A shown sprite owns a copy of the host pixels it covers (its background).
//! Hiding writes that copy back, so the host always looks as if the sprite
//! had never been drawn once every sprite is hidden. Overlapping sprites
//! must therefore be taken off in the reverse of the order they were drawn
//! and put back in the original order; every multi-sprite operation here
//! walks the layer stacks that way.
//!
//! All state lives in `SpriteEngine` and the `SurfaceTable` passed to each
//! call, so independent engines can coexist (tests build one per case).
//!
//! Every entry point fails fast. A compound operation that fails part way
//! (e.g. while temporarily hiding the sprites above a target) leaves the
//! sprites it already handled as they are; nothing is rolled back.

use crate::{
    error::{Result, SpriteError},
    render::blit::{blit, scroll as scroll_pixels, BlitFlags, DrawFlags, ScrollFill},
    render::surface::{Surface, SurfaceTable, SurfaceType},
    util::PointI32,
};
use log::{debug, info};

pub mod collision;
mod layer;
pub use layer::LayerStacks;

/// Highest usable layer; 255 is the legacy "no layer" byte.
pub const MAX_LAYER: u8 = 254;
pub const NO_LAYER: u8 = 255;

pub struct SpriteEngine {
    stacks: LayerStacks,
    all_hidden: bool,
    write_surface: usize,
    max_layer: u8,
}

impl SpriteEngine {
    pub fn new(stack_capacity: usize, max_layer: u8) -> Result<Self> {
        info!(
            "sprite engine init: stack_capacity={}, max_layer={}",
            stack_capacity, max_layer
        );
        Ok(Self {
            stacks: LayerStacks::new(stack_capacity)?,
            all_hidden: false,
            write_surface: 0,
            max_layer: max_layer.min(MAX_LAYER),
        })
    }

    pub fn stacks(&self) -> &LayerStacks {
        &self.stacks
    }

    pub fn all_hidden(&self) -> bool {
        self.all_hidden
    }

    pub fn max_layer(&self) -> u8 {
        self.max_layer
    }

    pub fn write_surface(&self) -> usize {
        self.write_surface
    }

    /// Surface scrolled by `scroll` and used for edge collisions.
    pub fn set_write_surface(&mut self, table: &SurfaceTable, id: usize) -> Result<()> {
        check_write_surface(table, id)?;
        self.write_surface = id;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn show(
        &mut self,
        table: &mut SurfaceTable,
        id: usize,
        dst: usize,
        x: i32,
        y: i32,
        layer: u8,
        flags: DrawFlags,
    ) -> Result<()> {
        self.check_show(table, id, dst, layer)?;
        self.check_room(table, id, layer)?;

        if table.get(id)?.is_active() {
            self.restore_background(table, id)?;
        }
        self.unstack(table, id)?;
        table.get_mut(id)?.layer = Some(layer);
        self.stacks.push(id, layer)?;
        self.place(table, id, dst, x, y, flags)?;
        debug!("show sprite {} at ({}, {}) layer {} on {}", id, x, y, layer, dst);
        Ok(())
    }

    pub fn hide(&mut self, table: &mut SurfaceTable, id: usize) -> Result<()> {
        if self.all_hidden {
            return Err(SpriteError::SpritesAreHidden);
        }
        check_active(table, id)?;

        self.restore_background(table, id)?;
        self.unstack(table, id)?;
        let s = table.get_mut(id)?;
        s.pos = None;
        s.next_x = None;
        s.next_y = None;
        s.clear_collisions();
        s.kind = SurfaceType::InactiveSprite;
        table.unlink_active(id);
        for other in table.iter_mut() {
            other.sprite_collisions.clear(id);
        }
        debug!("hide sprite {}", id);
        Ok(())
    }

    /// Take every shown sprite off screen until `restore_all`.
    pub fn hide_all(&mut self, table: &mut SurfaceTable) -> Result<()> {
        if self.all_hidden {
            return Err(SpriteError::SpritesAreHidden);
        }
        let ids = self.stacks.draw_order();
        self.hide_temporarily(table, &ids)?;
        self.all_hidden = true;
        debug!("hide all: {} sprites", ids.len());
        Ok(())
    }

    pub fn restore_all(&mut self, table: &mut SurfaceTable) -> Result<()> {
        if !self.all_hidden {
            return Err(SpriteError::SpritesNotHidden);
        }
        let ids = self.stacks.draw_order();
        self.restore_temporarily(table, &ids)?;
        self.all_hidden = false;
        debug!("restore all: {} sprites", ids.len());
        self.update_all_collisions(table)
    }

    /// Show `id` while keeping the sprites drawn after it intact.
    ///
    /// Everything drawn after the target's old and new slots is lifted
    /// first, then the target and the lifted sprites are put back in the
    /// new draw order. A sprite re-shown within its layer class keeps its
    /// place in the stack unless `ontop` is set, which moves it to the top
    /// of its stack. A sprite changing class, or not yet shown, always goes
    /// on top of its new stack.
    #[allow(clippy::too_many_arguments)]
    pub fn show_safe(
        &mut self,
        table: &mut SurfaceTable,
        id: usize,
        dst: usize,
        x: i32,
        y: i32,
        layer: u8,
        flags: DrawFlags,
        ontop: bool,
    ) -> Result<()> {
        self.check_show(table, id, dst, layer)?;
        self.check_room(table, id, layer)?;
        let s = table.get(id)?;
        let old_layer = if s.is_active() { s.layer } else { None };

        // a layer 0 slot on either side lifts the whole upper stack too
        let key_layer = match old_layer {
            Some(l) if l != 0 && layer != 0 => l,
            Some(_) => 0,
            None => layer,
        };
        let mut lifted = self.stacks.drawn_after(id, key_layer);
        if old_layer.is_some() && !lifted.contains(&id) {
            lifted.insert(0, id);
        }
        self.hide_temporarily(table, &lifted)?;
        let rest: Vec<usize> = lifted.into_iter().filter(|&o| o != id).collect();

        let same_class = old_layer.map(|l| (l == 0) == (layer == 0)) == Some(true);
        if same_class && !ontop {
            table.get_mut(id)?.layer = Some(layer);
            self.place(table, id, dst, x, y, flags)?;
            return self.restore_temporarily(table, &rest);
        }

        if old_layer.is_some() {
            self.unstack(table, id)?;
        }
        // lifted base sprites stay below a new layer 0 top; everything
        // else lifted sits below a new upper top
        let split = if layer == 0 {
            rest.iter()
                .take_while(|&&o| self.stacks.base().contains(o))
                .count()
        } else {
            rest.len()
        };
        self.restore_temporarily(table, &rest[..split])?;
        self.show(table, id, dst, x, y, layer, flags)?;
        self.restore_temporarily(table, &rest[split..])
    }

    pub fn hide_safe(&mut self, table: &mut SurfaceTable, id: usize) -> Result<()> {
        if self.all_hidden {
            return Err(SpriteError::SpritesAreHidden);
        }
        check_active(table, id)?;
        let layer = table.get(id)?.layer.ok_or_else(|| {
            SpriteError::InternalFault(format!("active sprite {} without layer", id))
        })?;
        let later = self.stacks.drawn_after(id, layer);

        self.hide_temporarily(table, &later)?;
        self.hide(table, id)?;
        self.restore_temporarily(table, &later)
    }

    /// Commit every staged position in one go.
    ///
    /// All sprites are lifted before any of them moves and redrawn after
    /// all of them have, so no frame mixes old and new positions.
    pub fn move_sprites(&mut self, table: &mut SurfaceTable) -> Result<()> {
        self.hide_all(table)?;
        for id in self.stacks.draw_order() {
            apply_pending(table.get_mut(id)?);
        }
        debug!("move sprites");
        self.restore_all(table)
    }

    /// Scroll the write surface by (dx, dy).
    ///
    /// Layer 0 sprites are part of the scrolling playfield: their centre
    /// moves with it, wrapping at the surface edges. Sprites on other
    /// layers stay where they are on screen, but pick up any staged
    /// position.
    pub fn scroll(
        &mut self,
        table: &mut SurfaceTable,
        dx: i32,
        dy: i32,
        fill: ScrollFill,
    ) -> Result<()> {
        if dx == 0 && dy == 0 {
            return Ok(());
        }
        if self.all_hidden {
            return Err(SpriteError::SpritesAreHidden);
        }
        let ws = self.write_surface;
        check_write_surface(table, ws)?;
        let (w, h) = {
            let s = table.get(ws)?;
            (s.width, s.height)
        };

        let ids = self.stacks.draw_order();
        self.hide_temporarily(table, &ids)?;

        for &id in self.stacks.base().as_slice() {
            let s = table.get_mut(id)?;
            if let Some(b) = s.bounds() {
                let c = b.center();
                let cx = (i64::from(c.x) + i64::from(dx)).rem_euclid(i64::from(w)) as i32;
                let cy = (i64::from(c.y) + i64::from(dy)).rem_euclid(i64::from(h)) as i32;
                s.pos = Some(PointI32::new(cx - s.width / 2, cy - s.height / 2));
            }
        }
        scroll_pixels(&mut table.get_mut(ws)?.raster_mut(), dx, dy, fill)?;
        for &id in self.stacks.upper().as_slice() {
            apply_pending(table.get_mut(id)?);
        }

        self.restore_temporarily(table, &ids)?;
        debug!("scroll surface {} by ({}, {})", ws, dx, dy);
        self.update_all_collisions(table)
    }

    /// Stage a position for the next `move_sprites`; `None` leaves that axis alone.
    pub fn set_next_position(
        &mut self,
        table: &mut SurfaceTable,
        id: usize,
        x: Option<i32>,
        y: Option<i32>,
    ) -> Result<()> {
        let s = check_sprite_mut(table, id)?;
        s.next_x = x;
        s.next_y = y;
        Ok(())
    }

    /// Colour treated as see-through the next time the sprite is drawn.
    pub fn set_transparent_colour(
        &mut self,
        table: &mut SurfaceTable,
        id: usize,
        colour: u8,
    ) -> Result<()> {
        check_sprite_mut(table, id)?.transparent = colour;
        Ok(())
    }

    /// Shown sprites, including ones lifted by an outstanding `hide_all`.
    pub fn count(&self) -> usize {
        self.stacks.len()
    }

    pub fn count_on_layer(&self, table: &SurfaceTable, layer: u8) -> Result<usize> {
        if layer == 0 {
            return Ok(self.stacks.base().len());
        }
        let mut n = 0;
        for &id in self.stacks.upper().as_slice() {
            if table.get(id)?.layer == Some(layer) {
                n += 1;
            }
        }
        Ok(n)
    }

    /// Take a sprite off screen if needed and release its slot.
    pub fn destroy(&mut self, table: &mut SurfaceTable, id: usize) -> Result<()> {
        if self.all_hidden {
            return Err(SpriteError::SpritesAreHidden);
        }
        let kind = table.get(id)?.kind;
        if !kind.is_sprite() {
            return Err(SpriteError::NotASprite);
        }
        if kind == SurfaceType::Sprite {
            self.hide(table, id)?;
        }
        table.free(id)?;
        info!("destroy sprite {}", id);
        Ok(())
    }

    pub fn destroy_all(&mut self, table: &mut SurfaceTable) -> Result<()> {
        if self.all_hidden {
            return Err(SpriteError::SpritesAreHidden);
        }
        for id in self.stacks.draw_order().into_iter().rev() {
            self.hide(table, id)?;
        }
        let ids: Vec<usize> = table
            .iter()
            .filter(|s| s.kind.is_sprite())
            .map(|s| s.id)
            .collect();
        for &id in &ids {
            table.free(id)?;
        }
        info!("destroy all: {} sprites", ids.len());
        Ok(())
    }

    fn check_show(&self, table: &SurfaceTable, id: usize, dst: usize, layer: u8) -> Result<()> {
        if self.all_hidden {
            return Err(SpriteError::SpritesAreHidden);
        }
        if !table.get(id)?.kind.is_sprite() {
            return Err(SpriteError::NotASprite);
        }
        if dst == id {
            return Err(SpriteError::InvalidWriteSurface);
        }
        check_write_surface(table, dst)?;
        if layer > self.max_layer {
            return Err(SpriteError::IllegalQuantity(format!("layer {}", layer)));
        }
        Ok(())
    }

    /// Fails before anything changes if the stack for `layer` has no room.
    fn check_room(&self, table: &SurfaceTable, id: usize, layer: u8) -> Result<()> {
        let same_class = table.get(id)?.layer.map(|l| l == 0) == Some(layer == 0);
        if !same_class && self.stacks.is_full(layer) {
            return Err(SpriteError::StackFull);
        }
        Ok(())
    }

    /// Take `id` out of the stack its layer says it is in.
    fn unstack(&mut self, table: &mut SurfaceTable, id: usize) -> Result<()> {
        let Some(layer) = table.get_mut(id)?.layer.take() else {
            return Ok(());
        };
        if self.stacks.locate(id)? != u8::from(layer != 0) {
            return Err(SpriteError::InternalFault(format!(
                "sprite {} on layer {} found in the wrong stack",
                id, layer
            )));
        }
        self.stacks.remove(id, layer)
    }

    /// Record the placement, save what is underneath, draw and activate.
    fn place(
        &mut self,
        table: &mut SurfaceTable,
        id: usize,
        dst: usize,
        x: i32,
        y: i32,
        flags: DrawFlags,
    ) -> Result<()> {
        {
            let s = table.get_mut(id)?;
            s.pos = Some(PointI32::new(x, y));
            s.host = Some(dst);
            s.flags = flags;
        }
        self.capture_background(table, id)?;
        self.draw(table, id)?;
        table.get_mut(id)?.kind = SurfaceType::Sprite;
        table.link_active(id);
        Ok(())
    }

    /// Lift `ids` (given in draw order) without touching the stacks or the
    /// active chain. Topmost goes first.
    fn hide_temporarily(&mut self, table: &mut SurfaceTable, ids: &[usize]) -> Result<()> {
        for &id in ids.iter().rev() {
            if table.get(id)?.kind == SurfaceType::Sprite {
                self.restore_background(table, id)?;
                table.get_mut(id)?.kind = SurfaceType::InactiveSprite;
            }
        }
        Ok(())
    }

    /// Put back sprites lifted by `hide_temporarily`, in draw order.
    fn restore_temporarily(&mut self, table: &mut SurfaceTable, ids: &[usize]) -> Result<()> {
        for &id in ids {
            let s = table.get(id)?;
            if s.kind == SurfaceType::InactiveSprite && s.layer.is_some() {
                self.capture_background(table, id)?;
                self.draw(table, id)?;
                table.get_mut(id)?.kind = SurfaceType::Sprite;
            }
        }
        Ok(())
    }

    /// Copy the host pixels under the sprite into a fresh background.
    fn capture_background(&self, table: &mut SurfaceTable, id: usize) -> Result<()> {
        let (host, pos) = placement(table.get(id)?)?;
        let (sprite, host) = table.pair_mut(id, host)?;
        let (w, h) = (sprite.width, sprite.height);
        sprite.background = Some(vec![0; (w * h) as usize]);
        if let Some(mut bg) = sprite.background_raster_mut() {
            blit(pos.x, pos.y, 0, 0, w, h, &host.raster(), &mut bg, BlitFlags::empty(), 0)?;
        }
        Ok(())
    }

    /// Write the background back and drop it.
    fn restore_background(&self, table: &mut SurfaceTable, id: usize) -> Result<()> {
        let (host, pos) = placement(table.get(id)?)?;
        let (sprite, host) = table.pair_mut(id, host)?;
        if let Some(bg) = sprite.background_raster() {
            let mut dst = host.raster_mut();
            blit(0, 0, pos.x, pos.y, bg.width, bg.height, &bg, &mut dst, BlitFlags::empty(), 0)?;
        }
        sprite.background = None;
        Ok(())
    }

    fn draw(&self, table: &mut SurfaceTable, id: usize) -> Result<()> {
        let (host, pos) = placement(table.get(id)?)?;
        let (sprite, host) = table.pair_mut(id, host)?;
        blit(
            0,
            0,
            pos.x,
            pos.y,
            sprite.width,
            sprite.height,
            &sprite.raster(),
            &mut host.raster_mut(),
            sprite.flags.to_blit_flags(),
            sprite.transparent,
        )
    }
}

fn placement(s: &Surface) -> Result<(usize, PointI32)> {
    match (s.host, s.pos) {
        (Some(host), Some(pos)) => Ok((host, pos)),
        _ => Err(SpriteError::InternalFault(format!(
            "sprite {} has no placement",
            s.id
        ))),
    }
}

fn apply_pending(s: &mut Surface) {
    if let Some(p) = s.pos.as_mut() {
        if let Some(x) = s.next_x.take() {
            p.x = x;
        }
        if let Some(y) = s.next_y.take() {
            p.y = y;
        }
    }
}

fn check_write_surface(table: &SurfaceTable, id: usize) -> Result<()> {
    match table.get(id) {
        Ok(s) if s.kind != SurfaceType::None => Ok(()),
        _ => Err(SpriteError::InvalidWriteSurface),
    }
}

fn check_active(table: &SurfaceTable, id: usize) -> Result<()> {
    match table.get(id)?.kind {
        SurfaceType::Sprite => Ok(()),
        SurfaceType::InactiveSprite => Err(SpriteError::SpriteInactive),
        _ => Err(SpriteError::NotASprite),
    }
}

fn check_sprite_mut(table: &mut SurfaceTable, id: usize) -> Result<&mut Surface> {
    let s = table.get_mut(id)?;
    if !s.kind.is_sprite() {
        return Err(SpriteError::NotASprite);
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (SurfaceTable, SpriteEngine, usize) {
        let mut t = SurfaceTable::new(16);
        let screen = t.create_window(32, 32).unwrap();
        let e = SpriteEngine::new(4, MAX_LAYER).unwrap();
        (t, e, screen)
    }

    fn sprite(t: &mut SurfaceTable, w: i32, h: i32, colour: u8) -> usize {
        let id = t.create_sprite(w, h).unwrap();
        t.get_mut(id).unwrap().pixels.fill(colour);
        id
    }

    fn px(t: &SurfaceTable, surface: usize, x: i32, y: i32) -> u8 {
        t.get(surface).unwrap().raster().get(x, y)
    }

    #[test]
    fn test_show_draws_and_hide_restores() {
        let (mut t, mut e, screen) = setup();
        t.get_mut(screen).unwrap().pixels.fill(3);
        let s = sprite(&mut t, 4, 4, 9);

        e.show(&mut t, s, screen, 2, 2, 1, DrawFlags::empty()).unwrap();
        assert_eq!(px(&t, screen, 2, 2), 9);
        assert_eq!(px(&t, screen, 6, 6), 3);
        assert_eq!(t.get(s).unwrap().background.as_ref().map(|b| b.len()), Some(16));

        e.hide(&mut t, s).unwrap();
        assert!(t.get(screen).unwrap().pixels.iter().all(|&c| c == 3));
        assert!(t.get(s).unwrap().background.is_none());
        assert_eq!(e.hide(&mut t, s), Err(SpriteError::SpriteInactive));
        assert_eq!(e.hide(&mut t, screen), Err(SpriteError::NotASprite));
    }

    #[test]
    fn test_transparent_colour_keyed_unless_opaque() {
        let (mut t, mut e, screen) = setup();
        t.get_mut(screen).unwrap().pixels.fill(5);
        let s = sprite(&mut t, 2, 1, 0);
        t.get_mut(s).unwrap().pixels[1] = 7;

        e.show(&mut t, s, screen, 0, 0, 0, DrawFlags::empty()).unwrap();
        assert_eq!((px(&t, screen, 0, 0), px(&t, screen, 1, 0)), (5, 7));

        e.show(&mut t, s, screen, 0, 0, 0, DrawFlags::OPAQUE).unwrap();
        assert_eq!((px(&t, screen, 0, 0), px(&t, screen, 1, 0)), (0, 7));

        e.set_transparent_colour(&mut t, s, 7).unwrap();
        e.show(&mut t, s, screen, 0, 0, 0, DrawFlags::empty()).unwrap();
        assert_eq!((px(&t, screen, 0, 0), px(&t, screen, 1, 0)), (0, 5));
    }

    #[test]
    fn test_reshow_moves_between_stacks() {
        let (mut t, mut e, screen) = setup();
        let s = sprite(&mut t, 2, 2, 1);
        e.show(&mut t, s, screen, 0, 0, 0, DrawFlags::empty()).unwrap();
        e.show(&mut t, s, screen, 8, 8, 2, DrawFlags::empty()).unwrap();
        assert!(e.stacks().base().is_empty());
        assert_eq!(e.stacks().upper().as_slice(), &[s]);
        assert_eq!(px(&t, screen, 0, 0), 0);
        assert_eq!(px(&t, screen, 8, 8), 1);
        assert_eq!(t.active_ids(), vec![s]);
    }

    #[test]
    fn test_show_rejects_bad_targets() {
        let (mut t, mut e, screen) = setup();
        let s = sprite(&mut t, 2, 2, 1);
        let f = DrawFlags::empty();
        assert_eq!(e.show(&mut t, screen, s, 0, 0, 0, f), Err(SpriteError::NotASprite));
        assert_eq!(e.show(&mut t, s, 15, 0, 0, 0, f), Err(SpriteError::InvalidWriteSurface));
        assert_eq!(e.show(&mut t, s, s, 0, 0, 0, f), Err(SpriteError::InvalidWriteSurface));
        assert_eq!(e.show(&mut t, 99, screen, 0, 0, 0, f), Err(SpriteError::InvalidSprite(99)));
        assert!(matches!(
            e.show(&mut t, s, screen, 0, 0, NO_LAYER, f),
            Err(SpriteError::IllegalQuantity(_))
        ));
        assert_eq!(t.get(s).unwrap().kind, SurfaceType::InactiveSprite);
    }

    #[test]
    fn test_stack_full_leaves_sprite_untouched() {
        let (mut t, mut e, screen) = setup();
        for _ in 0..4 {
            let s = sprite(&mut t, 1, 1, 1);
            e.show(&mut t, s, screen, 0, 0, 3, DrawFlags::empty()).unwrap();
        }
        let extra = sprite(&mut t, 1, 1, 1);
        assert_eq!(
            e.show(&mut t, extra, screen, 0, 0, 3, DrawFlags::empty()),
            Err(SpriteError::StackFull)
        );
        assert_eq!(t.get(extra).unwrap().kind, SurfaceType::InactiveSprite);
        assert!(t.get(extra).unwrap().pos.is_none());
        // the base stack is separate
        e.show(&mut t, extra, screen, 0, 0, 0, DrawFlags::empty()).unwrap();
        assert_eq!(e.count(), 5);
        assert_eq!(e.count_on_layer(&t, 3).unwrap(), 4);
        assert_eq!(e.count_on_layer(&t, 0).unwrap(), 1);
    }

    #[test]
    fn test_hide_safe_keeps_upper_sprite() {
        let (mut t, mut e, screen) = setup();
        let low = sprite(&mut t, 4, 4, 1);
        let high = sprite(&mut t, 4, 4, 2);
        e.show(&mut t, low, screen, 0, 0, 1, DrawFlags::empty()).unwrap();
        e.show(&mut t, high, screen, 2, 2, 1, DrawFlags::empty()).unwrap();

        e.hide_safe(&mut t, low).unwrap();
        assert_eq!(px(&t, screen, 0, 0), 0);
        assert_eq!(px(&t, screen, 2, 2), 2);
        assert_eq!(px(&t, screen, 5, 5), 2);

        e.hide(&mut t, high).unwrap();
        assert!(t.get(screen).unwrap().pixels.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_show_safe_ontop() {
        let (mut t, mut e, screen) = setup();
        let a = sprite(&mut t, 4, 4, 1);
        let b = sprite(&mut t, 4, 4, 2);
        e.show(&mut t, a, screen, 0, 0, 1, DrawFlags::empty()).unwrap();
        e.show(&mut t, b, screen, 2, 2, 1, DrawFlags::empty()).unwrap();

        // same class without ontop keeps its slot under b
        e.show_safe(&mut t, a, screen, 1, 1, 1, DrawFlags::empty(), false)
            .unwrap();
        assert_eq!(px(&t, screen, 3, 3), 2);
        assert_eq!(e.stacks().draw_order(), vec![a, b]);

        e.show_safe(&mut t, a, screen, 1, 1, 2, DrawFlags::empty(), true)
            .unwrap();
        assert_eq!(px(&t, screen, 3, 3), 1);
        assert_eq!(e.stacks().draw_order(), vec![b, a]);

        // dropping b to layer 0 puts it under every upper sprite
        e.show_safe(&mut t, b, screen, 2, 2, 0, DrawFlags::empty(), true)
            .unwrap();
        assert_eq!(px(&t, screen, 3, 3), 1);
        assert_eq!(px(&t, screen, 5, 5), 2);
        assert_eq!(e.stacks().draw_order(), vec![b, a]);

        e.hide_safe(&mut t, b).unwrap();
        e.hide_safe(&mut t, a).unwrap();
        assert!(t.get(screen).unwrap().pixels.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_show_rejects_stale_stack_entry() {
        let (mut t, mut e, screen) = setup();
        let s = sprite(&mut t, 2, 2, 1);
        e.show(&mut t, s, screen, 0, 0, 3, DrawFlags::empty()).unwrap();
        t.get_mut(s).unwrap().layer = Some(0);
        assert!(matches!(
            e.show(&mut t, s, screen, 1, 1, 3, DrawFlags::empty()),
            Err(SpriteError::InternalFault(_))
        ));
    }

    #[test]
    fn test_show_near_coordinate_limits() {
        let (mut t, mut e, screen) = setup();
        let a = sprite(&mut t, 4, 4, 9);
        let b = sprite(&mut t, 4, 4, 9);
        e.show(&mut t, a, screen, i32::MAX - 1, 0, 1, DrawFlags::empty())
            .unwrap();
        e.show(&mut t, b, screen, i32::MIN, i32::MIN, 0, DrawFlags::empty())
            .unwrap();
        assert!(t.get(screen).unwrap().pixels.iter().all(|&c| c == 0));

        e.update_all_collisions(&mut t).unwrap();
        assert_eq!(
            e.collisions(&t, a).unwrap(),
            vec![collision::Collision::Edge(collision::EdgeFlags::RIGHT)]
        );
        assert_eq!(
            e.collisions(&t, b).unwrap(),
            vec![collision::Collision::Edge(
                collision::EdgeFlags::LEFT | collision::EdgeFlags::TOP
            )]
        );
        e.move_sprites(&mut t).unwrap();
        e.hide(&mut t, a).unwrap();
        e.hide(&mut t, b).unwrap();
    }

    #[test]
    fn test_next_position_and_destroy() {
        let (mut t, mut e, screen) = setup();
        let s = sprite(&mut t, 2, 2, 4);
        e.set_next_position(&mut t, s, Some(10), None).unwrap();
        e.show(&mut t, s, screen, 1, 1, 0, DrawFlags::empty()).unwrap();
        e.move_sprites(&mut t).unwrap();
        assert_eq!(t.get(s).unwrap().pos, Some(PointI32::new(10, 1)));
        assert_eq!(t.get(s).unwrap().next_x, None);
        assert_eq!(px(&t, screen, 10, 1), 4);
        assert_eq!(px(&t, screen, 1, 1), 0);

        assert_eq!(
            e.set_next_position(&mut t, screen, Some(1), Some(1)),
            Err(SpriteError::NotASprite)
        );

        e.destroy(&mut t, s).unwrap();
        assert_eq!(t.get(s).unwrap().kind, SurfaceType::None);
        assert!(t.get(screen).unwrap().pixels.iter().all(|&c| c == 0));
        assert_eq!(e.count(), 0);
        assert_eq!(e.destroy(&mut t, s), Err(SpriteError::NotASprite));
    }

    #[test]
    fn test_destroy_all() {
        let (mut t, mut e, screen) = setup();
        t.get_mut(screen).unwrap().pixels.fill(8);
        let a = sprite(&mut t, 4, 4, 1);
        let b = sprite(&mut t, 4, 4, 2);
        let c = sprite(&mut t, 4, 4, 3);
        e.show(&mut t, a, screen, 0, 0, 0, DrawFlags::empty()).unwrap();
        e.show(&mut t, c, screen, 1, 1, 0, DrawFlags::empty()).unwrap();
        e.show(&mut t, b, screen, 2, 2, 1, DrawFlags::empty()).unwrap();

        e.destroy_all(&mut t).unwrap();
        assert!(t.get(screen).unwrap().pixels.iter().all(|&c| c == 8));
        assert!(t.iter().all(|s| !s.kind.is_sprite()));
        assert!(e.stacks().is_empty());
        assert!(t.active_ids().is_empty());
    }
}
