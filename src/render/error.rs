//! Render error taxonomy
//!
//! Setup failures (missing assets, malformed records) abort a render before
//! any drawing happens; a failed render never produces a partial image.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// A font or image asset failed to load.
    #[error("Asset error: {0}")]
    Asset(String),

    /// The item record is missing a structurally required field.
    #[error("Malformed item: {0}")]
    MalformedItem(String),
}
