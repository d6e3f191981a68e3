/// Average of the `num_top` largest mean squares, doubled to apply the
/// AES17 calibration (+3 dB). The doubling is a fixed constant, applied
/// unconditionally.
///
/// Reorders `mean_squares` in place: only the top partition is needed, so
/// a k-th order statistic selection replaces a full sort.
pub fn top_quintile_power(mean_squares: &mut [f32], num_top: usize) -> f32 {
    debug_assert!(num_top >= 1);
    debug_assert!(num_top <= mean_squares.len());
    if num_top < mean_squares.len() {
        mean_squares.select_nth_unstable_by(num_top - 1, |a, b| b.total_cmp(a));
    }
    let sum: f32 = mean_squares[..num_top].iter().sum();
    sum * 2.0 / num_top as f32
}

/// Second-largest block peak, or the only peak for a single-block stream.
/// The single largest value over-penalizes one isolated transient.
pub fn representative_peak(peaks: &mut [f32]) -> f32 {
    if peaks.len() > 1 {
        peaks.select_nth_unstable_by(1, |a, b| b.total_cmp(a));
    }
    peaks[(peaks.len() - 1).min(1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn worked_five_block_scenario() {
        // Five blocks: num_top_blocks = max(1, 5 / 5) = 1.
        let mut mean_squares = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let mut peaks = vec![0.1, 0.2, 0.9, 0.05, 0.3];
        let average = top_quintile_power(&mut mean_squares, 1);
        assert_relative_eq!(average, 10.0, epsilon = 1e-6);
        let peak = representative_peak(&mut peaks);
        assert_relative_eq!(peak, 0.3, epsilon = 1e-6);
    }

    #[test]
    fn top_average_spans_the_quintile() {
        let mut mean_squares = vec![0.5, 3.0, 1.0, 2.0, 0.25, 0.125];
        // Top two are 3.0 and 2.0: (3 + 2) * 2 / 2 = 5.
        let average = top_quintile_power(&mut mean_squares, 2);
        assert_relative_eq!(average, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn selection_does_not_depend_on_input_order() {
        let mut ascending = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7];
        let mut shuffled = vec![0.4, 0.7, 0.1, 0.5, 0.3, 0.6, 0.2];
        assert_relative_eq!(
            top_quintile_power(&mut ascending, 3),
            top_quintile_power(&mut shuffled, 3),
            epsilon = 1e-6
        );
    }

    #[test]
    fn single_block_uses_its_only_peak() {
        let mut peaks = vec![0.42];
        assert_relative_eq!(representative_peak(&mut peaks), 0.42, epsilon = 1e-6);
    }

    #[test]
    fn single_block_quintile_doubles_the_mean_square() {
        let mut mean_squares = vec![0.25];
        assert_relative_eq!(top_quintile_power(&mut mean_squares, 1), 0.5, epsilon = 1e-6);
    }
}
