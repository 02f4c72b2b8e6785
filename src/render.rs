// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! # Render module
//!
//! ## Submodules
//! - `surface`: the surface table (windows, buffers, sprites) and the active-sprite chain
//! - `blit`: pixel transfer and scroll primitives
//! - `sprite`: sprite lifecycle, layer stacks and collision detection

pub mod blit;
pub mod sprite;
pub mod surface;

pub use blit::{BlitFlags, DrawFlags, ScrollFill};
pub use sprite::collision::{Collision, EdgeFlags, EDGE_COLLISION, NO_COLLISION};
pub use sprite::{LayerStacks, SpriteEngine, MAX_LAYER, NO_LAYER};
pub use surface::{Surface, SurfaceTable, SurfaceType};
