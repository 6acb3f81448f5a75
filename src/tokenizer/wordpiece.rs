use std::path::Path;

use super::{EncodeOptions, TokenizerAdapter, TokenizerError};

/// WordPiece tokenizer adapter wrapping a Hugging Face `tokenizers` model
///
/// This struct adapts a subword tokenizer (loaded from a `tokenizer.json`)
/// to the `TokenizerAdapter` contract so `TextExplainer` can mask subword
/// features. Subword continuations carry the `##` prefix in their token
/// strings; the text renderer strips the marker for display.
///
/// The mask string configured on the explainer must be a vocabulary token
/// (e.g. `[MASK]` for BERT-family models) or encoding fails with
/// `TokenizerError::UnknownToken`.
pub struct WordPieceTokenizer {
    inner: tokenizers::Tokenizer,
}

impl WordPieceTokenizer {
    /// Load a tokenizer from a serialized `tokenizer.json` file
    ///
    /// Loading parses the full vocabulary; do it once at construction and
    /// reuse the adapter across explanations.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, TokenizerError> {
        let inner = tokenizers::Tokenizer::from_file(path)
            .map_err(|e| TokenizerError::Backend(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn new(inner: tokenizers::Tokenizer) -> Self {
        Self { inner }
    }
}

impl TokenizerAdapter for WordPieceTokenizer {
    type Encoded = Vec<u32>;

    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| TokenizerError::Backend(e.to_string()))?;
        Ok(encoding.get_tokens().to_vec())
    }

    fn encode(
        &self,
        tokens: &[String],
        options: &EncodeOptions,
    ) -> Result<Vec<u32>, TokenizerError> {
        if options.add_special_tokens {
            // Special-token placement is a property of the original text
            // encoding, not of an already-masked token sequence
            return Err(TokenizerError::UnsupportedOption("add_special_tokens"));
        }
        tokens
            .iter()
            .map(|token| {
                self.inner
                    .token_to_id(token)
                    .ok_or_else(|| TokenizerError::UnknownToken(token.clone()))
            })
            .collect()
    }

    fn decode(&self, encoded: &Vec<u32>) -> Result<String, TokenizerError> {
        self.inner
            .decode(encoded, true)
            .map_err(|e| TokenizerError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Requires a local tokenizer.json (e.g. bert-base-uncased); run with
    // `cargo test -- --ignored` after downloading one
    #[test]
    #[ignore]
    fn test_round_trip_with_local_vocab() {
        let tokenizer = WordPieceTokenizer::load_from_file("tokenizer.json")
            .expect("Failed to load tokenizer.json");

        let tokens = tokenizer
            .tokenize("unbelievable results")
            .expect("Failed to tokenize");
        assert!(!tokens.is_empty(), "Tokenized text should not be empty");

        let encoded = tokenizer
            .encode(&tokens, &EncodeOptions::default())
            .expect("Failed to encode tokens");
        let decoded = tokenizer.decode(&encoded).expect("Failed to decode");
        // Subword decoding normalizes case/whitespace; equivalence, not equality
        assert!(!decoded.is_empty(), "Decoded text should not be empty");
    }
}
