use multivote::prelude::*;
use serde_json::json;


/// Tests for building a vote from raw predictions.
#[cfg(test)]
pub mod ingestion {
    use super::*;

    #[test]
    fn extend_json_skips_malformed_records() {
        let mut vote = Vote::default();
        let values = vec![
            json!({"prediction": "Iris-virginica", "confidence": 0.3}),
            json!({"confidence": 0.8}),
            json!("Iris-setosa"),
            json!({"prediction": "Iris-versicolor", "confidence": 0.8}),
        ];
        assert_eq!(vote.extend_json(&values), 2);

        let orders = vote.records()
            .iter()
            .map(|r| r.order)
            .collect::<Vec<_>>();
        assert_eq!(orders, vec![Some(0), Some(1)]);
    }

    #[test]
    fn extend_continues_orders() {
        let mut vote = Vote::new(vec![
            PredictionRecord::new("a").with_order(10),
        ]);
        vote.extend([PredictionRecord::new("b"), PredictionRecord::new("c").with_order(0)]);
        let orders = vote.records()
            .iter()
            .map(|r| r.order())
            .collect::<Vec<_>>();
        assert_eq!(orders, vec![10, 11, 12]);
    }

    #[test]
    fn rows_with_default_headers() {
        let mut vote = Vote::default();
        let rows = vec![
            vec![json!("a"), json!(0.4), json!(null), json!([["a", 2], ["b", 2]]), json!(4)],
            vec![json!("b"), json!(0.7), json!(null), json!([["b", 3]]), json!(3)],
        ];
        assert_eq!(vote.extend_rows(&rows, &PREDICTION_HEADERS), 2);

        let combined = vote
            .combine(
                CombinationMethod::ProbabilityWeighted,
                &CombineOptions::default(),
                false,
            )
            .unwrap();
        // a: 0.5, b: 0.5 + 1.0
        assert_eq!(combined.prediction(), &Prediction::from("b"));
    }

    #[test]
    fn method_from_code_and_name() {
        assert_eq!(CombinationMethod::from_code(1), CombinationMethod::ConfidenceWeighted);
        assert_eq!(CombinationMethod::from_code(-1), CombinationMethod::Boosting);
        assert_eq!(CombinationMethod::from_code(7), CombinationMethod::Plurality);
        assert_eq!(
            "probability weighted".parse::<CombinationMethod>().unwrap(),
            CombinationMethod::ProbabilityWeighted,
        );
    }

    #[test]
    fn options_from_json() {
        let options = CombineOptions::from_json(
            r#"{"threshold": 2, "category": "a", "categories": ["a", "b"]}"#
        ).unwrap();
        assert_eq!(options.threshold, Some(2));
        assert_eq!(options.categories.len(), 2);
        assert_eq!(options.top_range, 10.0);
    }
}
