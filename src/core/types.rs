use serde::{Deserialize, Serialize};

/// Scoring seam between the explainers and the model under explanation
///
/// The model is an external collaborator: a single-argument function mapping
/// one input instance to one real-valued score. It is called synchronously,
/// once per feature plus once for the baseline, and is assumed (not enforced)
/// to be deterministic so explanations are reproducible.
///
/// The blanket impl lets plain closures act as models:
///
/// ```
/// use featmask::TextExplainer;
/// let explainer = TextExplainer::new(|text: &String| text.len() as f64);
/// ```
pub trait ScoreModel<I> {
    fn score(&self, input: &I) -> f64;
}

impl<I, F> ScoreModel<I> for F
where
    F: Fn(&I) -> f64,
{
    fn score(&self, input: &I) -> f64 {
        self(input)
    }
}

/// A finished text explanation, one normalized score per token
///
/// Scores are signed: negative means masking the token decreased the model's
/// output (the token was supporting the score), positive means masking
/// increased it. Serializable for machine-readable output (`explain --json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub tokens: Vec<String>,
    pub scores: Vec<f64>,
}
