// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! A fixed-capacity LIFO of plain values.
//!
//! Storage is reserved once at construction and never grows. Lookups that
//! search by value (`remove`, `replace`, `position`) scan from the top down
//! and act on the match nearest the top.

use crate::error::{Result, SpriteError};

#[derive(Debug, Clone, PartialEq)]
pub struct Stack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T: Copy + PartialEq> Stack<T> {
    pub fn new(capacity: usize) -> Result<Self> {
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| SpriteError::OutOfMemory)?;
        Ok(Self { items, capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn push(&mut self, v: T) -> Result<()> {
        if self.is_full() {
            return Err(SpriteError::StackFull);
        }
        self.items.push(v);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<T> {
        self.items.pop().ok_or(SpriteError::StackEmpty)
    }

    pub fn peek(&self) -> Result<T> {
        self.items.last().copied().ok_or(SpriteError::StackEmpty)
    }

    /// 0-based from the base of the stack.
    pub fn get(&self, index: usize) -> Result<T> {
        self.items
            .get(index)
            .copied()
            .ok_or(SpriteError::IndexOutOfBounds(index))
    }

    /// Index (from the base) of the topmost element equal to `v`.
    pub fn position(&self, v: T) -> Option<usize> {
        self.items.iter().rposition(|&e| e == v)
    }

    pub fn contains(&self, v: T) -> bool {
        self.position(v).is_some()
    }

    /// Removes the topmost `v`, shifting the elements above it down by one.
    pub fn remove(&mut self, v: T) -> Result<()> {
        let idx = self.position(v).ok_or(SpriteError::ElementNotFound)?;
        self.items.remove(idx);
        Ok(())
    }

    /// Overwrites the topmost `find` with `to` in place.
    pub fn replace(&mut self, find: T, to: T) -> Result<()> {
        let idx = self.position(find).ok_or(SpriteError::ElementNotFound)?;
        self.items[idx] = to;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Base-to-top view, i.e. push order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}
