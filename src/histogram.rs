//! Height histogram re-binning
//!
//! Raw team histograms come in fine-grained, equal-width bins over a known
//! height range (66-90 inches). The display histogram uses coarser 3-inch
//! buckets centred on whole-inch heights:
//!
//! ```text
//! edge:   70.5   73.5   76.5   79.5   82.5   85.5   88.5   91.5
//!           |  72  |  75  |  78  |  81  |  84  |  87  |  90  |
//! ```
//!
//! Re-binning works on bin *indices*, not areas. Each target edge is mapped
//! to an original bin index by truncation, and the original bins between the
//! two indices are summed. When a target edge falls inside an original bin,
//! that bin goes entirely to the right-hand target bin (or is dropped at the
//! upper end of the range). The numbers downstream depend on this exact
//! behaviour, so it must not be replaced with proportional splitting.

/// Coarse display bin edges, in inches
pub const BIN_EDGES: [f64; 8] = [70.5, 73.5, 76.5, 79.5, 82.5, 85.5, 88.5, 91.5];

/// Default range covered by the raw histograms, in inches
pub const RAW_HEIGHT_MIN: f64 = 66.0;
pub const RAW_HEIGHT_MAX: f64 = 90.0;

/// A team's histogram after re-binning onto [`BIN_EDGES`]
pub type BinnedHistogram = Vec<f64>;

/// Sum fine-grained histogram bins into the bins described by `new_edges`.
///
/// Returns `new_edges.len() - 1` values (none for fewer than two edges).
/// Degenerate input never panics: an empty histogram, an empty or inverted
/// source range, or non-increasing edges all produce zeros.
pub fn rebin(hist_data: &[f64], original_min: f64, original_max: f64, new_edges: &[f64]) -> Vec<f64> {
    let target_bins = new_edges.len().saturating_sub(1);
    let mut results = vec![0.0; target_bins];

    let original_bins = hist_data.len();
    if original_bins == 0 || !(original_max > original_min) {
        return results;
    }

    let width = source_bin_width(original_min, original_max, original_bins);

    for (i, pair) in new_edges.windows(2).enumerate() {
        let (left, right) = (pair[0], pair[1]);

        // `as` truncates toward zero and saturates; NaN becomes 0
        let start = ((left - original_min) / width) as i64;
        let end = ((right - original_min) / width) as i64;

        let start = start.max(0) as usize;
        let end = end.clamp(0, original_bins as i64) as usize;

        if end > start {
            results[i] = hist_data[start..end].iter().sum();
        }
    }

    results
}

/// Width of one source bin, taken as the distance between the first two
/// evenly spaced edges `min + k * step`. This can differ from `step` itself
/// in the last bit, and a truncated edge index is sensitive to that.
fn source_bin_width(original_min: f64, original_max: f64, bins: usize) -> f64 {
    let step = (original_max - original_min) / bins as f64;
    (original_min + step) - original_min
}

/// Re-bin onto the fixed display edges
pub fn rebin_display(hist_data: &[f64], original_min: f64, original_max: f64) -> BinnedHistogram {
    rebin(hist_data, original_min, original_max, &BIN_EDGES)
}

/// Midpoints of consecutive edges
pub fn bin_centers(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
}

/// Format a whole-inch height as feet and inches, e.g. `75` → `6'3"`
pub fn feet_inches(inches: u32) -> String {
    format!("{}'{}\"", inches / 12, inches % 12)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // FIXED-EDGE REGRESSION FIXTURES
    // ==========================================================================
    //
    // Raw histograms span 66-90 inches. With 24 bins each original bin is
    // exactly one inch wide, so every half-inch target edge lands in the
    // middle of an original bin and gets truncated down:
    //
    //   70.5 -> index 4    73.5 -> index 7    ...    91.5 -> index 25 (clamped to 24)
    //
    // Six target bins pick up three original bins each; the last one only
    // gets two because the range runs out at 90 inches.
    // ==========================================================================

    #[test]
    fn test_all_ones_24_bins_pinned() {
        let raw = vec![1.0; 24];
        let binned = rebin(&raw, 66.0, 90.0, &BIN_EDGES);
        assert_eq!(binned, vec![3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 2.0]);
    }

    #[test]
    fn test_bins_below_first_edge_are_dropped() {
        // Heights 66-69 (indices 0..4) lie below 70.5 and never show up
        let mut raw = vec![0.0; 24];
        raw[0] = 5.0;
        raw[3] = 2.0;
        raw[4] = 1.0;
        let binned = rebin_display(&raw, RAW_HEIGHT_MIN, RAW_HEIGHT_MAX);
        assert_eq!(binned[0], 1.0);
        assert_eq!(binned.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn test_truncation_shifts_boundary_bin_right() {
        // Index 7 covers 73-74 inches and straddles the 73.5 edge.
        // Truncation assigns it wholly to the second target bin.
        let mut raw = vec![0.0; 24];
        raw[7] = 4.0;
        let binned = rebin_display(&raw, 66.0, 90.0);
        assert_eq!(binned[0], 0.0);
        assert_eq!(binned[1], 4.0);
    }

    #[test]
    fn test_coarse_source_bins() {
        // 8 bins of 3 inches: 66,69,72,75,78,81,84,87,90
        let raw = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let binned = rebin(&raw, 66.0, 90.0, &BIN_EDGES);
        // 70.5 -> 1, 73.5 -> 2, 76.5 -> 3, 79.5 -> 4, 82.5 -> 5, 85.5 -> 6, 88.5 -> 7, 91.5 -> 8
        assert_eq!(binned, vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    // ==========================================================================
    // DEGENERATE INPUT
    // ==========================================================================

    #[test]
    fn test_non_increasing_edges_give_zeros() {
        let raw = vec![1.0; 24];
        assert_eq!(rebin(&raw, 66.0, 90.0, &[80.0, 75.0, 70.0]), vec![0.0, 0.0]);
        assert_eq!(rebin(&raw, 66.0, 90.0, &[75.0, 75.0]), vec![0.0]);
    }

    #[test]
    fn test_empty_histogram_gives_zeros() {
        assert_eq!(rebin(&[], 66.0, 90.0, &BIN_EDGES), vec![0.0; 7]);
    }

    #[test]
    fn test_empty_or_inverted_range_gives_zeros() {
        let raw = vec![1.0; 24];
        assert_eq!(rebin(&raw, 90.0, 90.0, &BIN_EDGES), vec![0.0; 7]);
        assert_eq!(rebin(&raw, 90.0, 66.0, &BIN_EDGES), vec![0.0; 7]);
    }

    #[test]
    fn test_too_few_edges() {
        let raw = vec![1.0; 24];
        assert!(rebin(&raw, 66.0, 90.0, &[]).is_empty());
        assert!(rebin(&raw, 66.0, 90.0, &[72.0]).is_empty());
    }

    #[test]
    fn test_target_entirely_outside_range() {
        let raw = vec![1.0; 24];
        assert_eq!(rebin(&raw, 66.0, 90.0, &[40.0, 50.0, 60.0]), vec![0.0, 0.0]);
        assert_eq!(rebin(&raw, 66.0, 90.0, &[95.0, 100.0]), vec![0.0]);
    }

    #[test]
    fn test_target_narrower_than_source_bin() {
        let raw = vec![1.0; 24];
        assert_eq!(rebin(&raw, 66.0, 90.0, &[70.2, 70.8]), vec![0.0]);
    }

    // ==========================================================================
    // GENERAL PROPERTIES
    // ==========================================================================

    #[test]
    fn test_output_never_exceeds_input_mass() {
        let raw: Vec<f64> = (0..24).map(|i| (i % 5) as f64).collect();
        let total: f64 = raw.iter().sum();
        let cases: [&[f64]; 3] = [&BIN_EDGES, &[60.0, 70.0, 80.0, 95.0], &[66.0, 90.0]];
        for edges in cases {
            let binned: f64 = rebin(&raw, 66.0, 90.0, edges).iter().sum();
            assert!(binned <= total, "{} > {} for {:?}", binned, total, edges);
        }
    }

    #[test]
    fn test_aligned_full_cover_preserves_mass() {
        let raw: Vec<f64> = (0..24).map(|i| i as f64).collect();
        let binned = rebin(&raw, 66.0, 90.0, &[66.0, 72.0, 78.0, 84.0, 90.0]);
        assert_eq!(binned.iter().sum::<f64>(), raw.iter().sum::<f64>());
    }

    #[test]
    fn test_source_bin_width_from_first_two_edges() {
        assert_eq!(source_bin_width(66.0, 90.0, 24), 1.0);
        assert_eq!(source_bin_width(66.0, 90.0, 48), 0.5);

        // Offset ranges round through the first edge, not the raw step
        let (lo, hi, n) = (70.1, 90.0, 7);
        let step = (hi - lo) / n as f64;
        assert_eq!(source_bin_width(lo, hi, n), (lo + step) - lo);
    }

    #[test]
    fn test_repeatable() {
        let raw: Vec<f64> = (0..24).map(|i| ((i * 7) % 3) as f64).collect();
        assert_eq!(rebin_display(&raw, 66.0, 90.0), rebin_display(&raw, 66.0, 90.0));
    }

    // ==========================================================================
    // DISPLAY HELPERS
    // ==========================================================================

    #[test]
    fn test_bin_centers_are_whole_inches() {
        assert_eq!(bin_centers(&BIN_EDGES), vec![72.0, 75.0, 78.0, 81.0, 84.0, 87.0, 90.0]);
    }

    #[test]
    fn test_feet_inches() {
        assert_eq!(feet_inches(72), "6'0\"");
        assert_eq!(feet_inches(75), "6'3\"");
        assert_eq!(feet_inches(90), "7'6\"");
    }
}
