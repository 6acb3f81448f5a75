use log::debug;

use super::{ExplainError, FeatureSpace, explain, feature_values};
use crate::color::{Rgb, red_blue};
use crate::core::types::ScoreModel;
use crate::tokenizer::whitespace::WhitespaceTokenizer;
use crate::tokenizer::{EncodeOptions, TokenizerAdapter};

/// Foreground reset appended after every colored fragment
const RESET_FOREGROUND: &str = "\x1b[38;2;255;255;255m";

/// Leave-one-out explainer for text models
///
/// Each word token is a feature. A token is masked by replacing it with the
/// mask string (default a single space) and re-encoding the token sequence
/// through the tokenizer adapter, producing a fresh masked text the model
/// scores. One model call per token plus one for the baseline.
///
/// The tokenizer is injected at construction (default: whitespace adapter);
/// there is no process-wide tokenizer state.
pub struct TextExplainer<M, T = WhitespaceTokenizer> {
    model: M,
    mask: String,
    tokenizer: T,
}

impl<M> TextExplainer<M, WhitespaceTokenizer>
where
    M: ScoreModel<String>,
{
    /// Explainer with the default whitespace tokenizer and a single-space mask
    pub fn new(model: M) -> Self {
        Self {
            model,
            mask: " ".to_string(),
            tokenizer: WhitespaceTokenizer,
        }
    }
}

impl<M, T> TextExplainer<M, T>
where
    M: ScoreModel<String>,
    T: TokenizerAdapter,
{
    /// Explainer with an explicit mask string and tokenizer adapter
    ///
    /// For subword adapters the mask must be a vocabulary token (e.g.
    /// `[MASK]`), otherwise re-encoding the masked sequence fails.
    pub fn with_tokenizer(model: M, mask: impl Into<String>, tokenizer: T) -> Self {
        Self {
            model,
            mask: mask.into(),
            tokenizer,
        }
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Rebuild the text with the token at `index` replaced by the mask
    ///
    /// The input slice is never modified; the masked copy is re-encoded and
    /// decoded through the adapter (without special tokens) so the model sees
    /// a plain text string.
    pub fn replace_word(&self, tokens: &[String], index: usize) -> Result<String, ExplainError> {
        if index >= tokens.len() {
            return Err(ExplainError::FeatureOutOfBounds {
                index,
                count: tokens.len(),
            });
        }
        let mut masked: Vec<String> = tokens.to_vec();
        masked[index] = self.mask.clone();

        let encoded = self.tokenizer.encode(&masked, &EncodeOptions::default())?;
        Ok(self.tokenizer.decode(&encoded)?)
    }

    /// Raw masked scores, one per token, in token order
    pub fn get_feature_values(&self, text: &str) -> Result<Vec<f64>, ExplainError> {
        feature_values(self, &self.model, &text.to_string())
    }

    /// Normalized importance per token, in token order
    ///
    /// See `scoring::score` for the degenerate cases that come back as
    /// inf/NaN instead of erroring.
    pub fn explain_instance(&self, text: &str) -> Result<Vec<f64>, ExplainError> {
        explain(self, &self.model, &text.to_string())
    }

    /// Explain and print the text to stdout with `red_blue` coloring
    pub fn visualize_explanation(&self, text: &str) -> Result<(), ExplainError> {
        self.visualize_explanation_with(text, red_blue)
    }

    /// Explain and print the text to stdout, one 24-bit colored fragment per
    /// token
    ///
    /// Each fragment is a leading space plus the token with any `" ##"`
    /// subword continuation marker stripped, colored by `color_function`
    /// applied to the token's normalized score, with the foreground reset to
    /// white after every fragment. No trailing newline is appended.
    pub fn visualize_explanation_with<C>(
        &self,
        text: &str,
        color_function: C,
    ) -> Result<(), ExplainError>
    where
        C: Fn(f64) -> Rgb,
    {
        let tokens = self.tokenizer.tokenize(text)?;
        let explanation = self.explain_instance(text)?;
        debug!("Rendering {} colored tokens", tokens.len());

        print!("{}", render_colored(&tokens, &explanation, &color_function));
        Ok(())
    }
}

impl<M, T> FeatureSpace for TextExplainer<M, T>
where
    M: ScoreModel<String>,
    T: TokenizerAdapter,
{
    type Input = String;

    fn feature_count(&self, input: &String) -> Result<usize, ExplainError> {
        Ok(self.tokenizer.tokenize(input)?.len())
    }

    fn mask_feature(&self, input: &String, index: usize) -> Result<String, ExplainError> {
        let tokens = self.tokenizer.tokenize(input)?;
        self.replace_word(&tokens, index)
    }
}

/// Concatenated ANSI fragments: `ESC[38;2;R;G;Bm<text>` + foreground reset
///
/// Color components are truncated toward zero; out-of-range components are
/// emitted as-is, clipping is the terminal's problem.
fn render_colored<C>(tokens: &[String], explanation: &[f64], color_function: &C) -> String
where
    C: Fn(f64) -> Rgb,
{
    let mut colored_text = String::new();
    for (token, &value) in tokens.iter().zip(explanation) {
        let fragment = format!(" {}", token).replace(" ##", "");
        let [r, g, b] = color_function(value);
        colored_text.push_str(&format!(
            "\x1b[38;2;{};{};{}m{}{}",
            r as i64, g as i64, b as i64, fragment, RESET_FOREGROUND
        ));
    }
    colored_text
}
