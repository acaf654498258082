//! Cross-cutting traits: cancellation and text normalization.

pub mod cancellation;
pub mod normalizer;

pub use cancellation::{Cancellable, CancellationToken};
pub use normalizer::{NoopNormalizer, TextNormalizer, WhitespaceNormalizer};
