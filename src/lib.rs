//! # fontpatch
//!
//! Repaints the 16x16 glyph-bitmap table that a host binary carries as an
//! embedded zstd frame.
//!
//! The host binary is treated as opaque bytes. The table is found by its
//! compression magic plus its exact decompressed size, edited in memory,
//! recompressed at maximum ratio, and written back over the original
//! frame. The container can't grow: if the new frame doesn't fit in the
//! space up to the next frame (or the end of the file), nothing is written.
//!
//! ## Architecture
//!
//! ```text
//! host bytes
//!       ↓
//!   [bundle::locate]     — magic scan + exact-size validation
//!       ↓
//!   [glyph]              — rasterize each codepoint, pack to 32 bytes
//!       ↓
//!   [bundle::recompress] — zstd level 22, checked against the budget
//!       ↓
//!   [bundle::splice]     — overwrite the old frame in place
//! ```
//!
//! [`lang`], [`config`] and [`font`] supply the inputs: which codepoints to
//! repaint and which font to paint them with.

pub mod bundle;
pub mod config;
pub mod error;
pub mod font;
pub mod glyph;
pub mod lang;
pub mod patch;

pub use error::{PatchError, Result};
pub use patch::{patch_buffer, patch_table, PatchReport};
