use std::io::Write;
use std::process::{Command, Output};

fn xenith(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xenith"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

fn json(args: &[&str]) -> serde_json::Value {
    let output = xenith(args);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_rank_top_three() {
    let value = json(&["rank", "--top", "3", "--json"]);
    let ranked = value.as_array().unwrap();
    assert_eq!(ranked.len(), 3);
    let negatives: Vec<u64> = ranked
        .iter()
        .map(|c| c["negativeCount"].as_u64().unwrap())
        .collect();
    assert!(negatives.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_negative_top_is_empty() {
    let value = json(&["rank", "--top", "-2", "--json"]);
    assert_eq!(value.as_array().map(Vec::len), Some(0));
}

#[test]
fn test_matrix_skips_unknown_products() {
    let value = json(&["matrix", "--products", "Lutron Diva,Nobody Switch", "--json"]);
    let cells = value.as_array().unwrap();
    assert!(!cells.is_empty());
    assert!(cells.iter().all(|c| c["product"] == "Lutron Diva"));
}

#[test]
fn test_trend_months() {
    let value = json(&["trend", "--months", "6", "--json"]);
    let points = value.as_array().unwrap();
    assert_eq!(points.len(), 6);
    assert_eq!(points[5]["month"], "May 2025");
}

#[test]
fn test_trend_months_out_of_range() {
    let output = xenith(&["trend", "--months", "100000"]);
    assert!(!output.status.success());
}

#[test]
fn test_segments_text() {
    let output = xenith(&["segments"]);
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Budget ($0-$30)"));
    assert!(text.contains("High-End ($150+)"));
}

#[test]
fn test_report_for_lights() {
    let value = json(&["report", "--product-type", "light", "--json"]);
    assert_eq!(value["productType"], "light");
    assert!(value["insights"].as_array().is_some_and(|i| !i.is_empty()));
}

#[test]
fn test_config_and_dataset_files() {
    let dir = tempfile::tempdir().unwrap();

    let config_path = dir.path().join("xenith.toml");
    std::fs::File::create(&config_path)
        .unwrap()
        .write_all(b"[ranking]\ntopN = 1\n")
        .unwrap();

    let dataset_path = dir.path().join("reviews.json");
    std::fs::File::create(&dataset_path)
        .unwrap()
        .write_all(
            br#"{"corpora": {"dimmer": {"categories": {
                "Installation": [
                    {"productId": "B085D8M2MR", "sentiment": "negative", "rating": 1, "brand": "Lutron"},
                    {"productId": "B085D8M2MR", "sentiment": "positive", "rating": 5, "brand": "Lutron"}
                ],
                "Value": [{"productId": "B085D8M2MR", "sentiment": "positive", "rating": 4, "brand": "Lutron"}]
            }, "useCases": {}}}}"#,
        )
        .unwrap();

    let value = json(&[
        "rank",
        "--config",
        config_path.to_str().unwrap(),
        "--dataset",
        dataset_path.to_str().unwrap(),
        "--json",
    ]);
    let ranked = value.as_array().unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0]["category"], "Installation");
    assert_eq!(ranked[0]["satisfactionRate"], 50);
}

#[test]
fn test_missing_dataset_fails() {
    let output = xenith(&["rank", "--dataset", "/nonexistent/reviews.json"]);
    assert!(!output.status.success());
}
