// Artifact loading and the inference pipeline
pub mod ml;
