//! External renderer interface
//!
//! The 3D viewer lives outside this workspace. The core only tells it
//! which asset to show and when the viewport geometry has changed; it
//! never waits on the renderer.

use serde_json::Value;

pub trait ModelRenderer: Send + Sync {
    /// Show the asset at `model_url`. `atom_data` is opaque per-atom
    /// metadata handed through untouched.
    fn render(&self, model_url: &str, atom_data: &[Value]);

    /// The split layout settled after a collapse or expand; the viewer
    /// should re-measure its drawing surface.
    fn request_resize(&self);
}
