// Raw feature layout shared by the inference pipeline and the preprocessor
pub mod feature_registry;
