use pretty_assertions::assert_eq;
use proptest::prelude::*;
use xenith_analytics::{
    aggregate_category, build_competitor_matrix, generate_trend, top_categories_by_negative,
    Aggregator, TrendConfig, TrendGenerator,
};
use xenith_review::{ProductType, ReviewDataset, ReviewRecord, ReviewStore, Sentiment};
use xenith_test_utils::{default_product_ids, reviews, store_from_counts, PRODUCT_IDS};

fn sentiment() -> impl Strategy<Value = Sentiment> {
    prop_oneof![
        Just(Sentiment::Positive),
        Just(Sentiment::Negative),
        Just(Sentiment::Neutral),
    ]
}

/// Stores of up to eight labels with small per-sentiment counts
fn counts() -> impl Strategy<Value = Vec<(usize, usize, usize)>> {
    prop::collection::vec((0usize..12, 0usize..12, 0usize..12), 0..8)
}

fn store_of(counts: &[(usize, usize, usize)]) -> ReviewStore {
    counts
        .iter()
        .enumerate()
        .map(|(i, &(pos, neg, neu))| {
            let label = format!("Label {i}");
            let list = reviews(&label, pos, neg, neu);
            (label, list)
        })
        .collect()
}

#[test]
fn test_worked_ranking_example() {
    let store = store_from_counts(&[("Installation", 3, 5, 0), ("App", 8, 2, 0)]);
    let top = top_categories_by_negative(&store, 1);

    assert_eq!(top.len(), 1);
    assert_eq!(top[0].category, "Installation");
    assert_eq!(top[0].negative_count, 5);
    assert_eq!(top[0].satisfaction_rate, 38);
}

#[test]
fn test_worked_matrix_example() {
    let lookup = default_product_ids();
    let store = ReviewStore::new().with(
        "Build Quality",
        vec![ReviewRecord::new("B085D8M2MR", "Build Quality", Sentiment::Positive)],
    );
    let cells = build_competitor_matrix(&["Leviton D215S"], &lookup, &store);

    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].product, "Leviton D215S");
    assert_eq!(cells[0].mentions, 0);
    assert_eq!(cells[0].total_reviews, 0);
    assert!(cells[0].satisfaction_rate.abs() < f64::EPSILON);
}

#[test]
fn test_loaded_ties_rank_in_file_order() {
    let dataset = ReviewDataset::from_json(
        r#"{"corpora": {"dimmer": {"categories": {
            "Zeta": [{"productId": "B085D8M2MR", "sentiment": "negative", "rating": 1, "brand": "Lutron"}],
            "Alpha": [{"productId": "B085D8M2MR", "sentiment": "negative", "rating": 1, "brand": "Lutron"}]
        }}}}"#,
    )
    .unwrap();
    let store = &dataset.corpus(ProductType::Dimmer).unwrap().categories;

    let top = top_categories_by_negative(store, 1);
    assert_eq!(top[0].category, "Zeta");

    let lookup = default_product_ids();
    let cells = build_competitor_matrix(&["Lutron Diva"], &lookup, store);
    let order: Vec<_> = cells.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(order, vec!["Zeta", "Alpha"]);
}

#[test]
fn test_empty_aggregate_is_zero() {
    let feedback = aggregate_category("Installation", &[]);
    assert_eq!(feedback.total_mentions, 0);
    assert_eq!(feedback.satisfaction_rate, 0);
    assert_eq!(feedback.negative_rate, 0);
}

proptest! {
    #[test]
    fn prop_counts_sum_to_length(sentiments in prop::collection::vec(sentiment(), 0..64)) {
        let list: Vec<ReviewRecord> = sentiments
            .iter()
            .map(|&s| ReviewRecord::new("B085D8M2MR", "c", s))
            .collect();
        let f = aggregate_category("c", &list);

        prop_assert_eq!(f.positive_count + f.negative_count + f.neutral_count, list.len());
        prop_assert_eq!(f.total_mentions, list.len());
        prop_assert!(f.satisfaction_rate <= 100);
    }

    #[test]
    fn prop_ranking_sorted_and_bounded(counts in counts(), n in 0usize..10) {
        let store = store_of(&counts);
        let top = top_categories_by_negative(&store, n);

        prop_assert_eq!(top.len(), n.min(store.len()));
        for pair in top.windows(2) {
            prop_assert!(pair[0].negative_count >= pair[1].negative_count);
        }
    }

    #[test]
    fn prop_ranking_is_stable(counts in counts()) {
        let store = store_of(&counts);
        let top = top_categories_by_negative(&store, store.len());
        let position = |label: &str| store.labels().position(|l| l == label);

        for pair in top.windows(2) {
            if pair[0].negative_count == pair[1].negative_count {
                prop_assert!(position(&pair[0].category) < position(&pair[1].category));
            }
        }
    }

    #[test]
    fn prop_matrix_cell_count(counts in counts(), unmapped in 0usize..3) {
        let store = store_of(&counts);
        let lookup = default_product_ids();
        let mut targets: Vec<String> = PRODUCT_IDS.iter().map(|(name, _)| name.to_string()).collect();
        targets.extend((0..unmapped).map(|i| format!("Unlisted {i}")));

        let cells = build_competitor_matrix(&targets, &lookup, &store);
        prop_assert_eq!(cells.len(), PRODUCT_IDS.len() * store.len());
    }

    #[test]
    fn prop_trend_rows_are_dense(counts in counts(), months in 0usize..24, seed in any::<u64>()) {
        let store = store_of(&counts);
        let categories = Aggregator::new().categories(&store);
        let config = TrendConfig::default().with_seed(seed);
        let points = TrendGenerator::new(config).generate(&categories, months);

        prop_assert_eq!(points.len(), months);
        for point in &points {
            for feedback in &categories {
                prop_assert!(point.values.contains_key(&feedback.category));
            }
        }
    }
}

#[test]
fn test_trend_twelve_months() {
    let store = store_from_counts(&[("Installation", 3, 5, 2), ("App", 8, 1, 1)]);
    let categories = Aggregator::new().categories(&store);
    let points = generate_trend(&categories, 12);

    assert_eq!(points.len(), 12);
    assert_eq!(points[11].month, "May 2025");
    assert_eq!(points[11].value("Installation"), 5);
}
