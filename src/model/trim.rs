//! Tail trimming for reuse-distance distributions.

use crate::table::DistBin;

/// A distribution after tail trimming, plus the share mass that was cut.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimmedDist {
    pub bins: Vec<DistBin>,
    pub dropped_share: f64,
}

/// Truncate a distribution once its cumulative share reaches `tail_share`.
///
/// Bins are accumulated in order; the cutoff is the first bin at which the
/// running share sum reaches the threshold, and everything up to and
/// including it is kept. `dropped_share` is the exact sum of the shares
/// after the cutoff. A `tail_share` outside (0, 1) disables trimming.
pub fn trim_tail(bins: &[DistBin], tail_share: f64) -> TrimmedDist {
    if bins.is_empty() || !(0.0 < tail_share && tail_share < 1.0) {
        return TrimmedDist {
            bins: bins.to_vec(),
            dropped_share: 0.0,
        };
    }

    let mut cutoff = bins.len() - 1;
    let mut cumulative = 0.0;
    for (idx, bin) in bins.iter().enumerate() {
        cumulative += bin.share;
        if cumulative >= tail_share {
            cutoff = idx;
            break;
        }
    }

    TrimmedDist {
        bins: bins[..=cutoff].to_vec(),
        dropped_share: bins[cutoff + 1..].iter().map(|b| b.share).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bins(shares: &[f64]) -> Vec<DistBin> {
        shares
            .iter()
            .enumerate()
            .map(|(i, &share)| DistBin {
                distance: i as u64,
                count: 1.0,
                share,
            })
            .collect()
    }

    #[test]
    fn cutoff_at_first_bin_reaching_threshold() {
        let input = vec![
            DistBin {
                distance: 0,
                count: 10.0,
                share: 0.6,
            },
            DistBin {
                distance: 1,
                count: 5.0,
                share: 0.3,
            },
            DistBin {
                distance: 2,
                count: 1.0,
                share: 0.1,
            },
        ];
        let trimmed = trim_tail(&input, 0.9);
        assert_eq!(trimmed.bins, input[..2].to_vec());
        assert!((trimmed.dropped_share - 0.1).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_threshold_is_a_no_op() {
        let input = bins(&[0.5, 0.5]);
        for tail_share in [0.0, 1.0, -0.5, 1.5] {
            let trimmed = trim_tail(&input, tail_share);
            assert_eq!(trimmed.bins, input);
            assert_eq!(trimmed.dropped_share, 0.0);
        }
    }

    #[test]
    fn threshold_never_reached_keeps_everything() {
        let input = bins(&[0.2, 0.2, 0.2]);
        let trimmed = trim_tail(&input, 0.9);
        assert_eq!(trimmed.bins, input);
        assert_eq!(trimmed.dropped_share, 0.0);
    }

    #[test]
    fn dropped_share_is_the_exact_tail_sum() {
        let input = bins(&[0.4, 0.3, 0.2, 0.05, 0.05]);
        let trimmed = trim_tail(&input, 0.65);
        assert_eq!(trimmed.bins.len(), 2);
        let tail: f64 = input[2..].iter().map(|b| b.share).sum();
        assert_eq!(trimmed.dropped_share, tail);
    }

    #[test]
    fn empty_input_short_circuits() {
        let trimmed = trim_tail(&[], 0.9);
        assert!(trimmed.bins.is_empty());
        assert_eq!(trimmed.dropped_share, 0.0);
    }
}
