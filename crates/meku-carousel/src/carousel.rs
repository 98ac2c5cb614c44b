//! Carousel index model
//!
//! Keeps the current index valid against the artifact list:
//! - wholesale replace selects the first (session load) or last
//!   (fresh generation batch) artifact
//! - appending selects the new artifact
//! - explicit selection clamps; next/prev stop at the edges

use serde::{Deserialize, Serialize};

use crate::artifact::ModelArtifact;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Carousel {
    models: Vec<ModelArtifact>,
    index: usize,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn models(&self) -> &[ModelArtifact] {
        &self.models
    }

    /// Current index. Meaningful only while the carousel is non-empty.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The currently displayed artifact, if any.
    pub fn current(&self) -> Option<&ModelArtifact> {
        self.models.get(self.index)
    }

    /// Pure derivation of the displayed URL from `models[index]`.
    pub fn current_url(&self) -> Option<&str> {
        self.current().map(|m| m.model_url.as_str())
    }

    /// Replace the whole list and select the first artifact.
    pub fn replace(&mut self, models: Vec<ModelArtifact>) {
        self.models = models;
        self.index = 0;
    }

    /// Replace the whole list and select the last artifact.
    pub fn replace_select_last(&mut self, models: Vec<ModelArtifact>) {
        self.models = models;
        self.index = self.models.len().saturating_sub(1);
    }

    /// Append one artifact and advance the index to it.
    pub fn push(&mut self, artifact: ModelArtifact) {
        tracing::debug!(name = %artifact.name, "Appended artifact");
        self.models.push(artifact);
        self.index = self.models.len() - 1;
    }

    /// Select an index, clamped into `[0, len-1]`. No-op while empty.
    pub fn select(&mut self, index: usize) {
        if self.models.is_empty() {
            return;
        }
        self.index = index.min(self.models.len() - 1);
    }

    /// Advance to the next artifact. No-op at the last position.
    pub fn next(&mut self) {
        if !self.models.is_empty() && self.index + 1 < self.models.len() {
            self.index += 1;
        }
    }

    /// Step back to the previous artifact. No-op at the first position.
    pub fn prev(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
    }

    pub fn clear(&mut self) {
        self.models.clear();
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> Vec<ModelArtifact> {
        vec![
            ModelArtifact::new("Water", "/m/0.glb"),
            ModelArtifact::new("Benzene", "/m/1.glb"),
            ModelArtifact::new("Caffeine", "/m/2.glb"),
        ]
    }

    #[test]
    fn test_replace_selects_first() {
        let mut carousel = Carousel::new();
        carousel.replace(three());
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.current_url(), Some("/m/0.glb"));
    }

    #[test]
    fn test_replace_select_last() {
        let mut carousel = Carousel::new();
        carousel.replace_select_last(three());
        assert_eq!(carousel.index(), 2);
        assert_eq!(carousel.current_url(), Some("/m/2.glb"));
    }

    #[test]
    fn test_push_advances_to_new() {
        let mut carousel = Carousel::new();
        carousel.replace(three());
        carousel.push(ModelArtifact::new("Glucose", "/m/3.glb"));
        assert_eq!(carousel.index(), 3);
        assert_eq!(carousel.current().unwrap().name, "Glucose");
    }

    #[test]
    fn test_next_stops_at_last() {
        let mut carousel = Carousel::new();
        carousel.replace(three());
        carousel.select(1);
        carousel.next();
        assert_eq!(carousel.index(), 2);
        carousel.next();
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn test_prev_stops_at_first() {
        let mut carousel = Carousel::new();
        carousel.replace(three());
        carousel.prev();
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_select_clamps() {
        let mut carousel = Carousel::new();
        carousel.replace(three());
        carousel.select(99);
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn test_select_on_empty_is_noop() {
        let mut carousel = Carousel::new();
        carousel.select(5);
        assert_eq!(carousel.index(), 0);
        assert!(carousel.current().is_none());
    }

    #[test]
    fn test_index_valid_across_mutations() {
        // The index stays inside [0, len-1] whenever non-empty
        let mut carousel = Carousel::new();
        carousel.replace(three());
        carousel.select(2);
        carousel.replace(vec![ModelArtifact::new("Water", "/m/0.glb")]);
        assert!(carousel.index() < carousel.len());

        carousel.push(ModelArtifact::new("Benzene", "/m/1.glb"));
        assert!(carousel.index() < carousel.len());

        carousel.replace_select_last(three());
        assert!(carousel.index() < carousel.len());

        carousel.clear();
        assert!(carousel.current().is_none());
    }
}
