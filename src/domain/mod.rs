// Domain-specific error types
pub mod errors;

// Raw feature layout and derived features
pub mod ml;

// Port interfaces
pub mod ports;

// Request/response contract
pub mod valuation;
