//! Smoke test over a real socket: binds 127.0.0.1:0, serves the app built from an
//! [`ApiConfig`], and talks to it with reqwest.

use msglog_api::{build_app, open_repository, ApiConfig};
use reqwest::StatusCode;
use tokio::net::TcpListener;

fn test_config() -> ApiConfig {
    ApiConfig {
        secret_key: "smoke-secret".to_string(),
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        bind_addr: "127.0.0.1:0".to_string(),
        log_file: "logs/msglog-test.log".to_string(),
        log_level: "info".to_string(),
        max_simulate_count: 50,
        simulate_window_days: 1,
    }
}

#[tokio::test]
async fn test_serve_simulate_then_query() {
    let config = test_config();
    let repo = open_repository(&config).await.expect("Failed to open repository");
    let app = build_app(&config, repo);

    let listener = TcpListener::bind(&config.bind_addr).await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::new();
    let base = format!("http://{}", address);

    let unauthorized = client
        .get(format!("{}/messages/simulate?count=10", base))
        .send()
        .await
        .unwrap();
    assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

    let simulated: serde_json::Value = client
        .get(format!("{}/messages/simulate", base))
        .query(&[("count", "10")])
        .header("X-API-Key", "smoke-secret")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(simulated["created"], 10);

    let start = simulated["start_date"].as_str().unwrap();
    let end = simulated["end_date"].as_str().unwrap();
    let response = client
        .get(format!("{}/messages/", base))
        .query(&[("start_date", start), ("end_date", end)])
        .header("X-API-Key", "smoke-secret")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(listed.len(), 10);
}
