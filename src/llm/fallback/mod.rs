//! Health-tiered model selection
//!
//! This module picks a usable model from a ranked preference list, skipping
//! models that calling code has reported as failed and probing the rest
//! against the backend's installed-model listing.

mod coordinator;

#[cfg(test)]
mod tests;

pub use coordinator::ModelFallbackCoordinator;
