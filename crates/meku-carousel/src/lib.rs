//! Meku artifact carousel
//!
//! An ordered list of generated 3D artifacts plus the currently displayed
//! index. Every mutation keeps the index inside `[0, len-1]` while the
//! list is non-empty; the displayed URL is always derived from the list,
//! never cached elsewhere.

mod artifact;
mod carousel;

pub use artifact::ModelArtifact;
pub use carousel::Carousel;
