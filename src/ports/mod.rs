//! Ports layer: Trait definitions for external operations.
//!
//! The generative model is an opaque collaborator reached through
//! [`GenerativeModel`]; the application never depends on a concrete client.

mod generative;

pub use generative::{AnalysisError, GenerationRequest, GenerativeModel};
