//! Cardforge - item tooltip card renderer
//!
//! Takes a structured item description (produced by an external item-text
//! parser) and renders it into a raster image mimicking the game's tooltip
//! card.

pub mod item;
pub mod render;

// Re-export commonly used types
pub use item::{ItemRecord, Rarity};
pub use render::{render_item, RenderAssets, RenderError};
