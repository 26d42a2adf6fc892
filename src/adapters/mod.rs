//! Adapters layer: Concrete implementations of ports.
//!
//! - `gemini`: Generative Language API client
//! - `sanitize`: secret filtering for logs

pub mod gemini;
pub mod sanitize;

pub use gemini::GeminiClient;
