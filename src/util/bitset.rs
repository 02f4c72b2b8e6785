// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Fixed 256-bit set, one bit per surface id.

use crate::error::{Result, SpriteError};

pub const BITSET_BITS: usize = 256;
const WORD_BITS: usize = 64;
const WORDS: usize = BITSET_BITS / WORD_BITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Bitset256 {
    words: [u64; WORDS],
}

impl Bitset256 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, bit: usize) {
        debug_assert!(bit < BITSET_BITS);
        self.words[bit / WORD_BITS] |= 1u64 << (bit % WORD_BITS);
    }

    pub fn clear(&mut self, bit: usize) {
        debug_assert!(bit < BITSET_BITS);
        self.words[bit / WORD_BITS] &= !(1u64 << (bit % WORD_BITS));
    }

    pub fn assign(&mut self, bit: usize, value: bool) {
        if value {
            self.set(bit);
        } else {
            self.clear(bit);
        }
    }

    pub fn test(&self, bit: usize) -> bool {
        bit < BITSET_BITS && self.words[bit / WORD_BITS] & (1u64 << (bit % WORD_BITS)) != 0
    }

    pub fn clear_all(&mut self) {
        self.words = [0; WORDS];
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Set bits in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..BITSET_BITS).filter(move |&b| self.test(b))
    }

    /// The 64 bits starting at `start`, which must be a multiple of 64 below 256.
    pub fn window(&self, start: usize) -> Result<u64> {
        if start % WORD_BITS != 0 || start >= BITSET_BITS {
            return Err(SpriteError::InternalFault(format!(
                "bitset window at bit {}",
                start
            )));
        }
        Ok(self.words[start / WORD_BITS])
    }
}
