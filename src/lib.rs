//! Perturbation-based explanations for black-box predictive models
//!
//! The model is an opaque `input -> f64` scoring function. Each feature of an
//! input (a word token for text, a rectangular patch for images) is masked in
//! a fresh copy, re-scored, and compared against the unmasked baseline. The
//! per-feature normalized importances drive a colored rendering: ANSI terminal
//! text for `TextExplainer`, a painted image array for `ImageExplainer`.
//!
//! The leave-one-out driver is generic over `FeatureSpace`; the two explainers
//! are its variant implementations, so the scoring/normalization skeleton
//! exists exactly once.
pub mod color;
pub mod core;
pub mod explainer;
pub mod scoring;
pub mod tokenizer;

pub use crate::core::types::{Explanation, ScoreModel};
pub use color::{Rgb, jet_map, red_blue};
pub use explainer::image::ImageExplainer;
pub use explainer::text::TextExplainer;
pub use explainer::{ExplainError, FeatureSpace, explain, feature_values};
pub use scoring::score;
pub use tokenizer::whitespace::WhitespaceTokenizer;
pub use tokenizer::wordpiece::WordPieceTokenizer;
pub use tokenizer::{EncodeOptions, TokenizerAdapter, TokenizerError};
