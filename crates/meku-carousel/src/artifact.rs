//! Generated artifact data structure

use serde::{Deserialize, Serialize};

/// A single generated 3D asset.
///
/// Field names follow the backend wire format (`modelUrl`, `thumbnail`,
/// `atom_data`). `atom_data` is opaque per-atom metadata handed through
/// to the external renderer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Display name (molecule name or generation title)
    #[serde(default)]
    pub name: String,
    /// URL of the GLB asset
    #[serde(rename = "modelUrl")]
    pub model_url: String,
    /// Thumbnail image URL for the carousel strip
    #[serde(rename = "thumbnail", default)]
    pub thumbnail_url: Option<String>,
    /// Opaque per-atom metadata for the renderer
    #[serde(default)]
    pub atom_data: Vec<serde_json::Value>,
}

impl ModelArtifact {
    pub fn new(name: impl Into<String>, model_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model_url: model_url.into(),
            thumbnail_url: None,
            atom_data: Vec::new(),
        }
    }

    pub fn with_thumbnail(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(thumbnail_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let json = r#"{
            "name": "Caffeine",
            "modelUrl": "/media/models/caffeine.glb",
            "thumbnail": "/media/thumbs/caffeine.png",
            "atom_data": [{"element": "C", "x": 0.0}]
        }"#;

        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.name, "Caffeine");
        assert_eq!(artifact.model_url, "/media/models/caffeine.glb");
        assert_eq!(
            artifact.thumbnail_url.as_deref(),
            Some("/media/thumbs/caffeine.png")
        );
        assert_eq!(artifact.atom_data.len(), 1);
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{"modelUrl": "/media/models/h2o.glb"}"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert!(artifact.name.is_empty());
        assert!(artifact.thumbnail_url.is_none());
        assert!(artifact.atom_data.is_empty());
    }
}
