/// Leave-one-out normalization rule
///
/// Combines one perturbed score with the baseline and the observed range of
/// all perturbed scores:
/// - masking increased the score (`perturbed > baseline`): scale by the
///   largest positive swing, `(a - b) / (d - b)`
/// - masking decreased or left the score unchanged: scale by the largest
///   negative swing, `(a - b) / (b - c)`
///
/// The sign says which way masking moved the model; the magnitude is relative
/// to the most impactful feature in the same direction. The result is not
/// bounded outside ±1 in general, and is inf/NaN when `max_value == baseline`
/// or `baseline == min_value` (all perturbed scores on one side collapse onto
/// the baseline). Degenerate inputs propagate as floating-point values, they
/// are not errors.
pub fn score(perturbed: f64, baseline: f64, min_value: f64, max_value: f64) -> f64 {
    if perturbed > baseline {
        (perturbed - baseline) / (max_value - baseline)
    } else {
        (perturbed - baseline) / (baseline - min_value)
    }
}
