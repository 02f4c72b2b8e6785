// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! layer.rs keeps the z-order of shown sprites in two stacks.
//! Layer 0 sprites live in the base stack and are drawn first; sprites on
//! any other layer live in the upper stack and are drawn after them.
//! Within a stack, push order is draw order: a later push sits on top.

use crate::{
    error::{Result, SpriteError},
    util::stack::Stack,
};

pub struct LayerStacks {
    base: Stack<usize>,
    upper: Stack<usize>,
}

impl LayerStacks {
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            base: Stack::new(capacity)?,
            upper: Stack::new(capacity)?,
        })
    }

    fn stack_for(&mut self, layer: u8) -> &mut Stack<usize> {
        if layer == 0 {
            &mut self.base
        } else {
            &mut self.upper
        }
    }

    pub fn base(&self) -> &Stack<usize> {
        &self.base
    }

    pub fn upper(&self) -> &Stack<usize> {
        &self.upper
    }

    pub fn push(&mut self, id: usize, layer: u8) -> Result<()> {
        self.stack_for(layer).push(id)
    }

    pub fn is_full(&self, layer: u8) -> bool {
        if layer == 0 {
            self.base.is_full()
        } else {
            self.upper.is_full()
        }
    }

    pub fn remove(&mut self, id: usize, layer: u8) -> Result<()> {
        self.stack_for(layer).remove(id)
    }

    pub fn len(&self) -> usize {
        self.base.len() + self.upper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.upper.is_empty()
    }

    /// Every stacked id in draw order: base bottom to top, then upper bottom to top.
    pub fn draw_order(&self) -> Vec<usize> {
        self.base.iter().chain(self.upper.iter()).copied().collect()
    }

    /// Ids drawn after `id`, in draw order.
    ///
    /// A layer 0 target is followed by the rest of the base stack and the
    /// whole upper stack; any other target only by the rest of the upper
    /// stack. An id not yet stacked behaves as if it were about to be pushed
    /// on top of its stack.
    pub fn drawn_after(&self, id: usize, layer: u8) -> Vec<usize> {
        let after = |s: &Stack<usize>| -> Vec<usize> {
            match s.position(id) {
                Some(i) => s.as_slice()[i + 1..].to_vec(),
                None => vec![],
            }
        };
        if layer == 0 {
            let mut ids = after(&self.base);
            ids.extend(self.upper.iter().copied());
            ids
        } else {
            after(&self.upper)
        }
    }

    /// Which stack holds `id`: 0 for the base stack, 1 for the upper one.
    pub fn locate(&self, id: usize) -> Result<u8> {
        match (self.base.contains(id), self.upper.contains(id)) {
            (true, false) => Ok(0),
            (false, true) => Ok(1),
            (false, false) => Err(SpriteError::ElementNotFound),
            (true, true) => Err(SpriteError::InternalFault(format!(
                "sprite {} stacked twice",
                id
            ))),
        }
    }
}
