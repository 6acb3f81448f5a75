use log::debug;
use ndarray::Array3;

use super::{ExplainError, FeatureSpace, explain, feature_values};
use crate::color::{Rgb, jet_map};
use crate::core::types::ScoreModel;

/// Leave-one-out explainer for image models
///
/// Images are `Array3<f32>` with axes rows x cols x channels (grayscale is
/// `channels = 1`). Each feature is a non-overlapping `patch`-sized block of
/// pixels, scanned row-major over the grid of whole blocks; a block is masked
/// by overwriting every pixel with the per-channel fill value in a fresh copy.
///
/// Trailing rows/columns that do not fill a whole block are not features:
/// they are never masked and never painted. Call sites that need full
/// coverage should pad the image to a multiple of the patch size.
pub struct ImageExplainer<M> {
    model: M,
    mask: Vec<f32>,
    patch: [usize; 2],
}

impl<M> ImageExplainer<M>
where
    M: ScoreModel<Array3<f32>>,
{
    /// Explainer with a white `[255, 255, 255]` fill and 2x2 patches
    pub fn new(model: M) -> Self {
        Self {
            model,
            mask: vec![255.0; 3],
            patch: [2, 2],
        }
    }

    /// Explainer with an explicit per-channel fill and `[height, width]`
    /// patch size
    ///
    /// Panics if either patch dimension is zero; the fill length is checked
    /// against the image's channel count at masking time.
    pub fn with_options(model: M, mask: Vec<f32>, patch: [usize; 2]) -> Self {
        assert!(
            patch[0] > 0 && patch[1] > 0,
            "Patch dimensions must be non-zero"
        );
        Self { model, mask, patch }
    }

    fn grid_shape(&self, image: &Array3<f32>) -> (usize, usize) {
        let (height, width, _) = image.dim();
        (height / self.patch[0], width / self.patch[1])
    }

    /// Fresh copy of `image` with the patch-sized block whose top-left pixel
    /// is at `(row, col)` overwritten with the mask fill
    ///
    /// The input array is never mutated. Errors if the fill does not match
    /// the channel count or the block extends past the image bounds.
    pub fn replace_feature(
        &self,
        image: &Array3<f32>,
        row: usize,
        col: usize,
    ) -> Result<Array3<f32>, ExplainError> {
        let (height, width, channels) = image.dim();
        if self.mask.len() != channels {
            return Err(ExplainError::MaskChannelMismatch {
                fill: self.mask.len(),
                channels,
            });
        }
        if row + self.patch[0] > height || col + self.patch[1] > width {
            return Err(ExplainError::PatchOutOfBounds {
                row,
                col,
                height,
                width,
            });
        }

        let mut masked = image.clone();
        for s in 0..self.patch[0] {
            for t in 0..self.patch[1] {
                for (channel, &fill) in self.mask.iter().enumerate() {
                    masked[[row + s, col + t, channel]] = fill;
                }
            }
        }
        Ok(masked)
    }

    /// Raw masked scores over the block grid, row-major
    ///
    /// Block (i, j) is masked at pixel offset (i*patch_height, j*patch_width)
    /// and lands at index `i * num_cols + j`.
    pub fn get_feature_values(&self, image: &Array3<f32>) -> Result<Vec<f64>, ExplainError> {
        feature_values(self, &self.model, image)
    }

    /// Normalized importance per block, row-major
    pub fn explain_instance(&self, image: &Array3<f32>) -> Result<Vec<f64>, ExplainError> {
        explain(self, &self.model, image)
    }

    /// Explain and paint with the default `jet_map` coloring
    pub fn visualize_explanation(&self, image: &Array3<f32>) -> Result<Array3<f32>, ExplainError> {
        self.visualize_explanation_with(image, jet_map)
    }

    /// Explain the image and return a fresh copy with every block painted in
    /// the color of its normalized score
    ///
    /// Pure with respect to the console, unlike the text explainer: the
    /// painted array is returned, nothing is printed. Color components are
    /// written as given, so scores far outside [-1, 1] can paint values
    /// outside [0, 255]. Requires a 3-channel image to hold RGB output.
    pub fn visualize_explanation_with<C>(
        &self,
        image: &Array3<f32>,
        color_function: C,
    ) -> Result<Array3<f32>, ExplainError>
    where
        C: Fn(f64) -> Rgb,
    {
        let (_, _, channels) = image.dim();
        if channels != 3 {
            return Err(ExplainError::ColorChannels { channels });
        }

        let explanation = self.explain_instance(image)?;
        let (rows, cols) = self.grid_shape(image);
        debug!("Painting {}x{} blocks", rows, cols);

        let mut painted = image.clone();
        for i in 0..rows {
            for j in 0..cols {
                let color = color_function(explanation[i * cols + j]);
                for s in 0..self.patch[0] {
                    for t in 0..self.patch[1] {
                        for channel in 0..3 {
                            painted[[i * self.patch[0] + s, j * self.patch[1] + t, channel]] =
                                color[channel] as f32;
                        }
                    }
                }
            }
        }
        Ok(painted)
    }
}

impl<M> FeatureSpace for ImageExplainer<M>
where
    M: ScoreModel<Array3<f32>>,
{
    type Input = Array3<f32>;

    fn feature_count(&self, input: &Array3<f32>) -> Result<usize, ExplainError> {
        let (rows, cols) = self.grid_shape(input);
        Ok(rows * cols)
    }

    fn mask_feature(&self, input: &Array3<f32>, index: usize) -> Result<Array3<f32>, ExplainError> {
        let (rows, cols) = self.grid_shape(input);
        if index >= rows * cols {
            return Err(ExplainError::FeatureOutOfBounds {
                index,
                count: rows * cols,
            });
        }
        let i = index / cols;
        let j = index % cols;
        self.replace_feature(input, i * self.patch[0], j * self.patch[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// 4x4 single-channel image with pixel values 0..16 in row-major order
    fn ramp_image() -> Array3<f32> {
        Array3::from_shape_fn((4, 4, 1), |(i, j, _)| (i * 4 + j) as f32)
    }

    fn sum_model(image: &Array3<f32>) -> f64 {
        image.iter().map(|&v| v as f64).sum()
    }

    #[test]
    fn feature_values_scan_blocks_row_major() {
        let explainer = ImageExplainer::with_options(sum_model, vec![0.0], [2, 2]);
        let values = explainer
            .get_feature_values(&ramp_image())
            .expect("Failed to get feature values");

        // Total is 120; zero-masking a block removes its sum. Block sums in
        // row-major order: 10, 18, 42, 50.
        assert_eq!(values, vec![110.0, 102.0, 78.0, 70.0]);
    }

    #[test]
    fn explain_instance_normalizes_block_scores() {
        let explainer = ImageExplainer::with_options(sum_model, vec![0.0], [2, 2]);
        let explanation = explainer
            .explain_instance(&ramp_image())
            .expect("Failed to explain");

        // baseline=120, values=[110,102,78,70], min=70; every value is below
        // baseline so each is (v - 120) / (120 - 70)
        assert_eq!(explanation, vec![-0.2, -0.36, -0.84, -1.0]);
    }

    #[test]
    fn replace_feature_copies_and_masks_one_block() {
        let explainer = ImageExplainer::with_options(sum_model, vec![0.0], [2, 2]);
        let image = ramp_image();
        let snapshot = image.clone();

        let masked = explainer
            .replace_feature(&image, 2, 0)
            .expect("Failed to replace feature");
        assert_eq!(image, snapshot, "Input image must not change");

        // The masked block is zeroed, everything else is untouched
        assert_eq!(masked[[2, 0, 0]], 0.0);
        assert_eq!(masked[[3, 1, 0]], 0.0);
        assert_eq!(masked[[2, 2, 0]], 10.0);
        assert_eq!(masked[[0, 0, 0]], 0.0); // was already 0 in the ramp
        assert_eq!(masked[[1, 1, 0]], 5.0);
    }

    #[test]
    fn replace_feature_rejects_block_past_bounds() {
        let explainer = ImageExplainer::with_options(sum_model, vec![0.0], [2, 2]);
        let result = explainer.replace_feature(&ramp_image(), 3, 0);
        assert!(
            matches!(result, Err(ExplainError::PatchOutOfBounds { .. })),
            "A block starting at row 3 of a 4-row image extends past the edge"
        );
    }

    #[test]
    fn replace_feature_rejects_fill_channel_mismatch() {
        // Default fill is 3 components, the ramp image has 1 channel
        let explainer = ImageExplainer::new(sum_model);
        let result = explainer.replace_feature(&ramp_image(), 0, 0);
        assert!(
            matches!(result, Err(ExplainError::MaskChannelMismatch { fill: 3, channels: 1 })),
            "Fill length must match the channel count"
        );
    }

    #[test]
    fn trailing_partial_blocks_are_not_features() {
        // 5x5 image, 2x2 patches: only the 4x4 region holds whole blocks
        let image = Array3::from_shape_fn((5, 5, 1), |(i, j, _)| (i * 5 + j) as f32);
        let explainer = ImageExplainer::with_options(sum_model, vec![0.0], [2, 2]);

        let values = explainer
            .get_feature_values(&image)
            .expect("Failed to get feature values");
        assert_eq!(values.len(), 4, "floor(5/2) x floor(5/2) blocks");
    }

    #[test]
    fn visualize_paints_blocks_and_preserves_input() {
        let image = Array3::from_shape_fn((4, 4, 3), |(i, j, c)| (i * 12 + j * 3 + c) as f32);
        let snapshot = image.clone();
        let explainer = ImageExplainer::with_options(sum_model, vec![0.0, 0.0, 0.0], [2, 2]);

        let painted = explainer
            .visualize_explanation(&image)
            .expect("Failed to visualize");
        assert_eq!(image, snapshot, "Input image must not change");
        assert_eq!(painted.dim(), image.dim());

        // Every block's sum is below baseline, so every normalized score is
        // non-positive and jet_map collapses them all to jet(0)
        let most_important = jet_map(-1.0);
        for s in 0..2 {
            for t in 0..2 {
                for channel in 0..3 {
                    assert_eq!(
                        painted[[2 + s, t, channel]],
                        most_important[channel] as f32,
                        "All pixels of a block share the block's color"
                    );
                }
            }
        }
    }

    #[test]
    fn visualize_leaves_partial_trailing_pixels_untouched() {
        let image = Array3::from_shape_fn((5, 4, 3), |(i, j, c)| (i * 12 + j * 3 + c) as f32);
        let explainer = ImageExplainer::with_options(sum_model, vec![0.0, 0.0, 0.0], [2, 2]);

        let painted = explainer
            .visualize_explanation(&image)
            .expect("Failed to visualize");
        for j in 0..4 {
            for channel in 0..3 {
                assert_eq!(
                    painted[[4, j, channel]],
                    image[[4, j, channel]],
                    "The trailing row holds no whole block and keeps its pixels"
                );
            }
        }
    }

    #[test]
    fn visualize_requires_three_channels() {
        let explainer = ImageExplainer::with_options(sum_model, vec![0.0], [2, 2]);
        let result = explainer.visualize_explanation(&ramp_image());
        assert!(
            matches!(result, Err(ExplainError::ColorChannels { channels: 1 })),
            "RGB painting needs a 3-channel image"
        );
    }

    #[test]
    fn image_smaller_than_patch_has_nothing_to_explain() {
        let image = Array3::from_elem((1, 1, 1), 0.5f32);
        let explainer = ImageExplainer::with_options(sum_model, vec![0.0], [2, 2]);
        let result = explainer.explain_instance(&image);
        assert!(
            matches!(result, Err(ExplainError::EmptyInput)),
            "No whole block fits, so there are no features"
        );
    }

    #[test]
    fn explanations_are_idempotent_on_random_images() {
        let mut rng = StdRng::seed_from_u64(7);
        let image = Array3::from_shape_fn((6, 4, 3), |_| rng.r#gen::<f32>());
        let explainer = ImageExplainer::new(sum_model);

        let first = explainer.explain_instance(&image).expect("Failed to explain");
        let second = explainer.explain_instance(&image).expect("Failed to explain again");
        assert_eq!(first.len(), 6);
        assert_eq!(first, second, "Deterministic model must give identical explanations");
    }
}
