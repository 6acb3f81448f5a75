//! Leave-one-out explanation core
//!
//! The masking/scoring/normalization skeleton lives here once, generic over a
//! `FeatureSpace`; text and image explainers are the two variant
//! implementations of that capability set.
pub mod image;
pub mod text;

use log::debug;
use thiserror::Error;

use crate::core::types::ScoreModel;
use crate::scoring::score;

#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("feature index {index} out of bounds for {count} features")]
    FeatureOutOfBounds { index: usize, count: usize },

    #[error("patch at pixel offset ({row}, {col}) extends past image bounds {height}x{width}")]
    PatchOutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("mask fill has {fill} components but the image has {channels} channels")]
    MaskChannelMismatch { fill: usize, channels: usize },

    #[error("colored output needs a 3-channel image, got {channels} channels")]
    ColorChannels { channels: usize },

    #[error("input has no features to mask")]
    EmptyInput,

    #[error(transparent)]
    Tokenizer(#[from] crate::tokenizer::TokenizerError),
}

/// Capability set an input type must provide to be explained: enumerate its
/// features and produce a fresh copy with one feature masked
///
/// `mask_feature` must never mutate the input and must leave every other
/// feature untouched.
pub trait FeatureSpace {
    type Input: Clone;

    fn feature_count(&self, input: &Self::Input) -> Result<usize, ExplainError>;

    fn mask_feature(&self, input: &Self::Input, index: usize) -> Result<Self::Input, ExplainError>;
}

/// Score the input once per feature, with that feature masked
///
/// One synchronous model call per feature, in feature order; no caching or
/// batching. Returns exactly `feature_count` raw scores.
pub fn feature_values<S, M>(
    space: &S,
    model: &M,
    input: &S::Input,
) -> Result<Vec<f64>, ExplainError>
where
    S: FeatureSpace,
    M: ScoreModel<S::Input>,
{
    let count = space.feature_count(input)?;
    debug!("Scoring {} masked variants", count);

    let mut values = Vec::with_capacity(count);
    for index in 0..count {
        let masked = space.mask_feature(input, index)?;
        values.push(model.score(&masked));
    }
    Ok(values)
}

/// Full leave-one-out explanation: baseline, per-feature masked scores, then
/// one normalized importance per feature
///
/// Fails with `EmptyInput` when there is nothing to mask. When all masked
/// scores are identical, or identical to the baseline on one side, the
/// normalization divides by zero and the affected entries come back as
/// inf/NaN; that propagates to the caller as values, not as an error.
pub fn explain<S, M>(space: &S, model: &M, input: &S::Input) -> Result<Vec<f64>, ExplainError>
where
    S: FeatureSpace,
    M: ScoreModel<S::Input>,
{
    let baseline = model.score(input);
    let values = feature_values(space, model, input)?;
    if values.is_empty() {
        return Err(ExplainError::EmptyInput);
    }

    let mut min_value = values[0];
    let mut max_value = values[0];
    for &value in &values[1..] {
        if value < min_value {
            min_value = value;
        }
        if value > max_value {
            max_value = value;
        }
    }
    debug!(
        "Baseline {}, masked scores in [{}, {}]",
        baseline, min_value, max_value
    );

    Ok(values
        .iter()
        .map(|&value| score(value, baseline, min_value, max_value))
        .collect())
}
