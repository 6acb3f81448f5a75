//! Color functions for rendering normalized importance scores
//!
//! Both are stateless value-to-value mappings from a normalized score
//! (roughly [-1, 1]) to an RGB triple with components in [0, 255]. Components
//! stay floating point here; rendering truncates to integers.

/// RGB triple, components conceptually in [0, 255]
pub type Rgb = [f64; 3];

/// Diverging red/blue map: blue for positive scores, red for negative
///
/// Expects inputs roughly in [-1, 1]; values outside that range produce
/// components outside [0, 255], which downstream rendering must clip.
pub fn red_blue(value: f64) -> Rgb {
    if value > 0.0 {
        [0.0, 0.0, value * 255.0]
    } else {
        [-value * 255.0, 0.0, 0.0]
    }
}

/// Sequential jet-style map: positive scores sample the colormap, every
/// non-positive score collapses to the colormap's position-0 color
///
/// The missing negative branch is intentional for a sequential (non-diverging)
/// colormap; keep it unless substituting a genuinely diverging map.
pub fn jet_map(value: f64) -> Rgb {
    if value > 0.0 { jet(value) } else { jet(0.0) }
}

/// Piecewise-linear jet colormap sampled at `position`, clamped to [0, 1]
///
/// Runs dark blue -> cyan -> yellow -> red; jet(0) = [0, 0, 127.5].
fn jet(position: f64) -> Rgb {
    let x = position.clamp(0.0, 1.0);
    let r = (1.5 - (4.0 * x - 3.0).abs()).clamp(0.0, 1.0);
    let g = (1.5 - (4.0 * x - 2.0).abs()).clamp(0.0, 1.0);
    let b = (1.5 - (4.0 * x - 1.0).abs()).clamp(0.0, 1.0);
    [r * 255.0, g * 255.0, b * 255.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgb_close(got: Rgb, expected: Rgb) {
        for channel in 0..3 {
            assert!(
                (got[channel] - expected[channel]).abs() < 1e-9,
                "Channel {} mismatch: got {:?}, expected {:?}",
                channel,
                got,
                expected
            );
        }
    }

    #[test]
    fn red_blue_scales_each_branch() {
        assert_rgb_close(red_blue(0.5), [0.0, 0.0, 127.5]);
        assert_rgb_close(red_blue(-0.5), [127.5, 0.0, 0.0]);
        assert_rgb_close(red_blue(0.0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn red_blue_out_of_range_exceeds_255() {
        let [r, _, _] = red_blue(-2.0);
        assert_eq!(r, 510.0, "Out-of-range inputs are not clipped here");
    }

    #[test]
    fn jet_map_collapses_non_positive_inputs() {
        let zero_color = jet_map(0.0);
        assert_rgb_close(zero_color, [0.0, 0.0, 127.5]);
        assert_rgb_close(jet_map(-0.3), zero_color);
        assert_rgb_close(jet_map(-1.0), zero_color);
    }

    #[test]
    fn jet_map_midpoint_is_greenish() {
        let [r, g, b] = jet_map(0.5);
        assert!(g > r && g > b, "Jet midpoint should be green dominant: {:?}", [r, g, b]);
        assert_rgb_close([r, g, b], [127.5, 255.0, 127.5]);
    }

    #[test]
    fn jet_map_clamps_above_one() {
        assert_rgb_close(jet_map(1.0), jet_map(2.5));
    }
}
