use multivote::prelude::*;
use multivote::ws_confidence;


/// End-to-end tests on the iris predictions of three trees.
#[cfg(test)]
pub mod iris {
    use super::*;

    fn vote() -> Vote {
        Vote::new(vec![
            PredictionRecord::new("setosa").with_confidence(0.9),
            PredictionRecord::new("setosa").with_confidence(0.8),
            PredictionRecord::new("versicolor").with_confidence(0.95),
        ])
    }

    #[test]
    fn plurality() {
        let combined = vote()
            .combine(CombinationMethod::Plurality, &CombineOptions::default(), false)
            .unwrap();
        assert_eq!(combined, Combination::Prediction("setosa".into()));
    }

    #[test]
    fn confidence_weighted() {
        // 0.9 + 0.8 > 0.95
        let combined = vote()
            .combine(
                CombinationMethod::ConfidenceWeighted,
                &CombineOptions::default(),
                false,
            )
            .unwrap();
        assert_eq!(combined.prediction(), &Prediction::from("setosa"));
    }

    #[test]
    fn confidence_weighted_full() {
        let combined = vote()
            .combine(
                CombinationMethod::ConfidenceWeighted,
                &CombineOptions::default(),
                true,
            )
            .unwrap();
        let full = combined.full().unwrap();
        assert_eq!(full.confidence, Some(0.85294));
        assert!(full.probability.is_none());
    }

    #[test]
    fn threshold_wins_outright() {
        let options = CombineOptions::default()
            .threshold(1)
            .category("versicolor");
        let combined = vote()
            .combine(CombinationMethod::Threshold, &options, false)
            .unwrap();
        assert_eq!(combined.prediction(), &Prediction::from("versicolor"));
    }

    #[test]
    fn threshold_falls_back_to_plurality() {
        let options = CombineOptions::default()
            .threshold(2)
            .category("versicolor");
        let combined = vote()
            .combine(CombinationMethod::Threshold, &options, true)
            .unwrap();
        let full = combined.full().unwrap();
        assert_eq!(full.prediction, Prediction::from("setosa"));
        // mean confidence of the remaining `setosa` votes
        assert_eq!(full.confidence, Some(0.85));
    }

    #[test]
    fn threshold_out_of_range() {
        let options = CombineOptions::default()
            .threshold(5)
            .category("versicolor");
        let err = vote().combine(CombinationMethod::Threshold, &options, false);
        assert!(matches!(err, Err(VoteError::ThresholdOutOfRange { .. })));
    }

    #[test]
    fn probability_weighted_requires_distribution() {
        let err = vote().combine(
            CombinationMethod::ProbabilityWeighted,
            &CombineOptions::default(),
            false,
        );
        assert!(matches!(
            err,
            Err(VoteError::MissingField { field: Field::Distribution, order: 0 })
        ));
    }

    #[test]
    fn empty_vote_fails() {
        let err = Vote::default().combine(
            CombinationMethod::Plurality,
            &CombineOptions::default(),
            false,
        );
        assert!(matches!(err, Err(VoteError::EmptyVote)));
    }

    #[test]
    fn missing_confidence_fails_before_combining() {
        let mut vote = vote();
        vote.append(PredictionRecord::new("setosa"));
        let err = vote.combine(
            CombinationMethod::ConfidenceWeighted,
            &CombineOptions::default(),
            false,
        );
        assert!(matches!(
            err,
            Err(VoteError::MissingField { field: Field::Confidence, order: 3 })
        ));
    }
}


/// Probability weighted combination of node distributions.
#[cfg(test)]
pub mod probability_weighted {
    use super::*;

    fn vote() -> Vote {
        Vote::new(vec![
            PredictionRecord::new("a")
                .with_confidence(0.6)
                .with_distribution(Distribution::from_iter([("a", 6.0), ("b", 4.0)]))
                .with_count(10.0),
            PredictionRecord::new("b")
                .with_confidence(0.9)
                .with_distribution(Distribution::from_iter([("b", 9.0), ("a", 1.0)]))
                .with_count(10.0),
            PredictionRecord::new("a")
                .with_confidence(0.7)
                .with_distribution(Distribution::from_iter([("a", 7.0), ("b", 3.0)]))
                .with_count(10.0),
        ])
    }

    #[test]
    fn sums_node_probabilities() {
        // a: 0.6 + 0.1 + 0.7 = 1.4, b: 0.4 + 0.9 + 0.3 = 1.6
        let combined = vote()
            .combine(
                CombinationMethod::ProbabilityWeighted,
                &CombineOptions::default(),
                false,
            )
            .unwrap();
        assert_eq!(combined.prediction(), &Prediction::from("b"));
    }

    #[test]
    fn full_output_uses_wilson_score() {
        let combined = vote()
            .combine(
                CombinationMethod::ProbabilityWeighted,
                &CombineOptions::default(),
                true,
            )
            .unwrap();
        let full = combined.full().unwrap();

        let dist = Distribution::from_iter([("a", 1.4), ("b", 1.6)]);
        let expected = ws_confidence(&"b".into(), &dist, 1.96, Some(30.0)).unwrap();
        assert_eq!(full.confidence, Some(expected));
        // the last `b` expansion comes from the third tree
        assert_eq!(full.probability, Some(0.3));
        assert_eq!(full.count, Some(30.0));
    }

    #[test]
    fn source_vote_is_untouched() {
        let vote = vote();
        let before = vote.records().to_vec();
        vote.combine(
            CombinationMethod::ProbabilityWeighted,
            &CombineOptions::default(),
            true,
        ).unwrap();
        assert_eq!(vote.records(), &before[..]);
    }
}
