// Artifact formats and the filesystem artifact source
pub mod ml;
