//! Tokenizer adapters for converting raw text to token sequences and back
//!
//! This module provides a unified interface for tokenization operations:
//! the whitespace adapter used by default, and a WordPiece adapter wrapping
//! Hugging Face `tokenizers` for subword models.
pub mod whitespace;
pub mod wordpiece;

use thiserror::Error;

/// Options recognized by `TokenizerAdapter::encode`
///
/// Adapters enumerate what they honor; requesting an option an adapter cannot
/// honor fails with `TokenizerError::UnsupportedOption`. The explainers always
/// encode with the defaults (no model-specific special tokens).
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    /// Ask the adapter to add model-specific special tokens (e.g. [CLS]/[SEP])
    pub add_special_tokens: bool,
}

#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("encode option not supported by this tokenizer: {0}")]
    UnsupportedOption(&'static str),

    #[error("token not in vocabulary: '{0}'")]
    UnknownToken(String),

    #[error("tokenizer backend error: {0}")]
    Backend(String),
}

/// Pluggable tokenization seam for `TextExplainer`
///
/// Contract: `decode(encode(tokenize(text)))` must be semantically equivalent
/// to `text`; byte-equal for lossless adapters like the whitespace default.
/// Token order is significant: position in the tokenized sequence is the
/// feature index.
pub trait TokenizerAdapter {
    /// Intermediate representation produced by `encode` (token strings for
    /// the identity adapter, vocabulary ids for subword adapters)
    type Encoded;

    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError>;

    fn encode(
        &self,
        tokens: &[String],
        options: &EncodeOptions,
    ) -> Result<Self::Encoded, TokenizerError>;

    fn decode(&self, encoded: &Self::Encoded) -> Result<String, TokenizerError>;
}
