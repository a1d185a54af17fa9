use std::io::Write;

use pretty_assertions::assert_eq;
use xenith_review::{DatasetError, ProductType, RecordError, ReviewDataset, Sentiment};

const YAML_DATASET: &str = r#"
taxonomy:
  Installation: Physical
  App: software
corpora:
  dimmer:
    categories:
      Installation:
        - { productId: B0BVKZLT3B, sentiment: negative, rating: 1, brand: Leviton, verified: true }
        - { productId: B0BVKZLT3B, sentiment: positive, rating: 5, brand: Leviton, timestamp: "2025-02-01T10:00:00Z" }
        - { productId: B0BVKZLT3B, sentiment: positive, rating: 11, brand: Leviton }
      App:
        - { productId: B085D8M2MR, sentiment: NEUTRAL, rating: 3, brand: Lutron }
    useCases:
      Scheduling: ~
"#;

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_yaml_dataset_from_path() {
    let file = write_temp(".yaml", YAML_DATASET);
    let dataset = ReviewDataset::from_path(file.path()).unwrap();

    let corpus = dataset.corpus(ProductType::Dimmer).unwrap();
    assert_eq!(
        corpus.categories.labels().collect::<Vec<_>>(),
        vec!["Installation", "App"]
    );
    assert_eq!(corpus.categories.get("Installation").len(), 2);
    assert_eq!(corpus.categories.get("App")[0].sentiment(), Sentiment::Neutral);
    assert!(corpus.use_cases.contains("Scheduling"));
    assert!(corpus.use_cases.get("Scheduling").is_empty());

    let report = dataset.load_report();
    assert_eq!(report.accepted, 3);
    assert_eq!(report.rejected(), 1);
    assert_eq!(report.rejections[0].label, "Installation");
    assert_eq!(report.rejections[0].error, RecordError::RatingOutOfRange(11.0));
}

#[test]
fn test_load_json_dataset_from_path() {
    let file = write_temp(
        ".json",
        r#"{"corpora": {"light": {"categories": {"Connectivity": [
            {"productId": "B01EZV35QU", "sentiment": "negative", "rating": 2, "brand": "TP-Link"}
        ]}}}}"#,
    );
    let dataset = ReviewDataset::from_path(file.path()).unwrap();
    let corpus = dataset.corpus(ProductType::Light).unwrap();
    assert_eq!(corpus.categories.total_reviews(), 1);
    assert!(dataset.corpus(ProductType::Dimmer).is_none());
}

#[test]
fn test_unsupported_extension() {
    let file = write_temp(".csv", "productId,sentiment\n");
    let err = ReviewDataset::from_path(file.path()).unwrap_err();
    assert!(matches!(err, DatasetError::UnsupportedFormat(ext) if ext == "csv"));
}

#[test]
fn test_missing_file() {
    let err = ReviewDataset::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, DatasetError::Io { .. }));
}

#[test]
fn test_invalid_json() {
    assert!(matches!(
        ReviewDataset::from_json("{ not json"),
        Err(DatasetError::InvalidJson(_))
    ));
}

const TIED_JSON: &str = r#"{"corpora": {"dimmer": {"categories": {
    "Zeta": [{"productId": "B085D8M2MR", "sentiment": "negative", "rating": 1, "brand": "Lutron"}],
    "Alpha": [{"productId": "B085D8M2MR", "sentiment": "negative", "rating": 2, "brand": "Lutron"}],
    "Mid": []
}}}}"#;

#[test]
fn test_json_keeps_file_order() {
    let file = write_temp(".json", TIED_JSON);
    let dataset = ReviewDataset::from_path(file.path()).unwrap();

    let corpus = dataset.corpus(ProductType::Dimmer).unwrap();
    assert_eq!(
        corpus.categories.labels().collect::<Vec<_>>(),
        vec!["Zeta", "Alpha", "Mid"]
    );
}

#[test]
fn test_builtin_keeps_file_order() {
    let dataset = ReviewDataset::builtin().unwrap();
    let corpus = dataset.corpus(ProductType::Dimmer).unwrap();
    assert_eq!(
        corpus.categories.labels().take(3).collect::<Vec<_>>(),
        vec!["Installation", "Dimming Performance", "App Experience"]
    );
    assert_eq!(corpus.use_cases.labels().last(), Some("3-Way Wiring"));
}
