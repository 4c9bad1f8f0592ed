use multivote::merge_bins;
use proptest::prelude::*;


fn sorted_bins() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-1e3f64..1e3, 1f64..100.0), 0..64)
        .prop_map(|mut bins| {
            bins.sort_by(|a, b| a.0.total_cmp(&b.0));
            bins
        })
}


proptest! {
    #[test]
    fn merge_bins_respects_limit(bins in sorted_bins(), limit in 1usize..40) {
        let merged = merge_bins(&bins[..], limit);
        prop_assert!(merged.len() <= limit);
    }

    #[test]
    fn merge_bins_preserves_mass(bins in sorted_bins(), limit in 1usize..40) {
        let before = bins.iter().map(|(_, c)| c).sum::<f64>();
        let after = merge_bins(&bins[..], limit)
            .iter()
            .map(|(_, c)| c)
            .sum::<f64>();
        prop_assert!((before - after).abs() <= 1e-9 * before.max(1.0));
    }

    #[test]
    fn merge_bins_idempotent_within_limit(bins in sorted_bins()) {
        let limit = bins.len().max(1);
        prop_assert_eq!(merge_bins(&bins[..], limit), bins.clone());
    }

    #[test]
    fn merge_bins_keeps_order(bins in sorted_bins(), limit in 1usize..40) {
        let merged = merge_bins(&bins[..], limit);
        prop_assert!(merged.windows(2).all(|w| w[0].0 <= w[1].0));
    }
}
