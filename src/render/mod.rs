//! Tooltip card rendering engine
//!
//! Turns one parsed item record into a raster card image:
//! - measure every text block to size the canvas
//! - draw the sections top to bottom along a vertical cursor
//! - shrink the buffer to the true content height

pub mod assets;
pub mod canvas;
pub mod card;
pub mod colors;
pub mod error;
pub mod layout;

pub use assets::RenderAssets;
pub use canvas::Canvas;
pub use card::render_item;
pub use error::RenderError;
