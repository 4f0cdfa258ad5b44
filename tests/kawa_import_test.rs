use httpmock::prelude::*;
use prun_tools::core::kawa::{ExportOptions, CSV_FILENAME, JSON_FILENAME};
use prun_tools::domain::model::KawaPrice;
use prun_tools::{EtlEngine, KawaClient, KawaPipeline, LocalStorage};
use std::time::Duration;
use tempfile::TempDir;

fn pipeline_for(server: &MockServer, output_path: &str, planet: &str) -> KawaPipeline<LocalStorage> {
    let client = KawaClient::new(&server.url("/records"), Duration::from_secs(5)).unwrap();
    KawaPipeline::new(
        client,
        LocalStorage::new(output_path.to_string()),
        ExportOptions {
            planet: planet.to_string(),
            per_page: 2,
            output_path: output_path.to_string(),
        },
    )
}

#[tokio::test]
async fn test_end_to_end_export_keeps_one_planet() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET).path("/records").query_param("page", "1");
            then.status(200).json_body(serde_json::json!({
                "page": 1, "perPage": 2, "totalItems": 4, "totalPages": 2,
                "items": [
                    {"ticker": "H2O", "price": 30.5, "planet": "Proxion"},
                    {"ticker": "RAT", "price": 95.0, "planet": "Montem"}
                ]
            }));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path("/records").query_param("page", "2");
            then.status(200).json_body(serde_json::json!({
                "page": 2, "perPage": 2, "totalItems": 4, "totalPages": 2,
                "items": [
                    {"ticker": "DW", "price": 61.0, "planet": "Proxion"},
                    {"ticker": "OVE", "price": 40.0, "planet": "proxion"}
                ]
            }));
        })
        .await;

    let engine = EtlEngine::new_with_monitoring(pipeline_for(&server, &output_path, "Proxion"), false);
    let result = engine.run().await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
    assert!(result.ends_with(CSV_FILENAME));

    let csv = std::fs::read_to_string(temp_dir.path().join(CSV_FILENAME)).unwrap();
    assert_eq!(csv, "ticker,price\nH2O,30.5\nDW,61\n");

    let json = std::fs::read_to_string(temp_dir.path().join(JSON_FILENAME)).unwrap();
    let prices: Vec<KawaPrice> = serde_json::from_str(&json).unwrap();
    let tickers: Vec<&str> = prices.iter().map(|p| p.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["H2O", "DW"]);
}

#[tokio::test]
async fn test_unknown_planet_writes_header_only() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/records");
            then.status(200).json_body(serde_json::json!({
                "page": 1, "perPage": 2, "totalItems": 1, "totalPages": 1,
                "items": [{"ticker": "H2O", "price": 30.5, "planet": "Proxion"}]
            }));
        })
        .await;

    let engine = EtlEngine::new(pipeline_for(&server, &output_path, "Katoa"));
    engine.run().await.unwrap();

    let csv = std::fs::read_to_string(temp_dir.path().join(CSV_FILENAME)).unwrap();
    assert_eq!(csv, "ticker,price\n");
}

#[tokio::test]
async fn test_upstream_error_aborts_export() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/records");
            then.status(500);
        })
        .await;

    let engine = EtlEngine::new(pipeline_for(&server, &output_path, "Proxion"));
    let err = engine.run().await.unwrap_err();

    assert_eq!(err.upstream_status(), Some(500));
    assert!(!temp_dir.path().join(CSV_FILENAME).exists());
}
