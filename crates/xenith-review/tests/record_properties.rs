use proptest::prelude::*;
use xenith_review::{RawReviewRecord, RecordError, Sentiment};

fn raw(sentiment: &str, rating: f64) -> RawReviewRecord {
    RawReviewRecord {
        product_id: Some("B0BSHKS26L".to_string()),
        sentiment: Some(sentiment.to_string()),
        rating: Some(rating),
        brand: Some("Lutron".to_string()),
        ..RawReviewRecord::default()
    }
}

proptest! {
    #[test]
    fn prop_rating_accepted_only_in_range(rating in prop_oneof![
        -10.0f64..10.0,
        Just(f64::NAN),
        Just(f64::INFINITY),
    ]) {
        let result = raw("positive", rating).validate("Installation");
        if (1.0..=5.0).contains(&rating) {
            let record = result.unwrap();
            prop_assert!((record.rating() - rating).abs() < f64::EPSILON);
        } else {
            prop_assert!(matches!(result, Err(RecordError::RatingOutOfRange(_))));
        }
    }

    #[test]
    fn prop_sentiment_case_insensitive(
        sentiment in prop_oneof![
            Just(Sentiment::Positive),
            Just(Sentiment::Negative),
            Just(Sentiment::Neutral),
        ],
        upper in any::<bool>(),
    ) {
        let text = if upper {
            sentiment.as_str().to_uppercase()
        } else {
            sentiment.as_str().to_string()
        };
        let record = raw(&format!(" {text} "), 3.0).validate("Installation").unwrap();
        prop_assert_eq!(record.sentiment(), sentiment);
        prop_assert_eq!(record.category(), "Installation");
    }

    #[test]
    fn prop_unknown_sentiment_rejected(word in "[a-z]{1,12}") {
        prop_assume!(!["positive", "negative", "neutral"].contains(&word.as_str()));
        let result = raw(&word, 3.0).validate("Installation");
        prop_assert!(matches!(result, Err(RecordError::UnknownSentiment(_))), "unexpected sentiment result");
    }
}
