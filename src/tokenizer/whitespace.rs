use super::{EncodeOptions, TokenizerAdapter, TokenizerError};

/// Default tokenizer: split on single spaces, encode is the identity,
/// decode joins with single spaces
///
/// Lossless for inputs without leading/trailing/doubled spaces, so the
/// tokenize -> encode -> decode round trip reproduces the input exactly.
/// Note the split is on the space character, not general whitespace: runs of
/// spaces produce empty tokens, matching positional feature indices exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl TokenizerAdapter for WhitespaceTokenizer {
    type Encoded = Vec<String>;

    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        Ok(text.split(' ').map(str::to_string).collect())
    }

    fn encode(
        &self,
        tokens: &[String],
        options: &EncodeOptions,
    ) -> Result<Vec<String>, TokenizerError> {
        if options.add_special_tokens {
            // There is no vocabulary, so there are no special tokens to add
            return Err(TokenizerError::UnsupportedOption("add_special_tokens"));
        }
        Ok(tokens.to_vec())
    }

    fn decode(&self, encoded: &Vec<String>) -> Result<String, TokenizerError> {
        Ok(encoded.join(" "))
    }
}
