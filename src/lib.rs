// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! pixel_sprite is the sprite layer of a BASIC runtime for Linux and small
//! retro-style single-board computers.
//!
//! It keeps a fixed table of raster surfaces (windows, off-screen buffers and
//! sprites), draws sprites onto their host surface while preserving what was
//! underneath, keeps shown sprites in z-ordered layer stacks, and tracks
//! which sprites overlap each other or cross the edges of the screen.
//!
//! The interpreter owns one `SurfaceTable` and one `SpriteEngine` and passes
//! the table into every call:
//!
//! ```
//! use pixel_sprite::{init::{init_sprite_engine, EngineConfig}, render::DrawFlags};
//!
//! let (mut table, mut engine) = init_sprite_engine(&EngineConfig::default()).unwrap();
//! let screen = table.create_window(320, 200).unwrap();
//! let ship = table.create_sprite(16, 16).unwrap();
//! engine.show(&mut table, ship, screen, 10, 10, 1, DrawFlags::empty()).unwrap();
//! engine.update_collisions(&mut table, ship).unwrap();
//! assert_eq!(engine.num_collisions(&table, ship).unwrap(), 0);
//! ```
//!
//! Everything is single threaded and synchronous; each call runs to
//! completion on the caller's thread.

/// result kinds and legacy result codes
pub mod error;

/// engine configuration and bootstrap
pub mod init;

/// log
pub mod log;

/// surfaces, blit primitives, sprite lifecycle and collisions
pub mod render;

/// points, rects, the fixed-capacity stack and the 256-bit set
pub mod util;

pub use error::{result_code, Result, SpriteError};
