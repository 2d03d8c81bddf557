//! In-process tests of the HTTP contract

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server::{app, AppState};
use tower::ServiceExt;

fn test_state() -> AppState {
    AppState {
        series_field: "value".to_string(),
    }
}

async fn request(
    state: AppState,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn post_predict(uri: &str, body: Value) -> (StatusCode, Value) {
    request(test_state(), "POST", uri, Some(body)).await
}

fn sample_series(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 50.0 + 0.8 * i as f64 + (i as f64 * 0.4).sin() * 2.0)
        .collect()
}

#[tokio::test]
async fn predict_with_defaults() {
    let (status, body) = post_predict("/predict", json!({ "value": sample_series(20) })).await;

    assert_eq!(status, StatusCode::OK);
    // Default horizon is 7
    assert_eq!(body["forecast"].as_array().unwrap().len(), 7);
    // 20 observations > 7 steps, so backtest metrics are present
    assert!(body["rmse"].as_f64().unwrap() >= 0.0);
    assert!(body["mae"].as_f64().unwrap() >= 0.0);
    assert!(body["mape"].as_f64().unwrap() >= 0.0);
    assert!(body["aic"].is_number());
    assert!(body["bic"].is_number());
}

#[tokio::test]
async fn short_series_has_null_metrics() {
    let (status, body) = post_predict("/predict", json!({ "value": sample_series(6) })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["forecast"].as_array().unwrap().len(), 7);
    assert!(body["rmse"].is_null());
    assert!(body["mae"].is_null());
    assert!(body["mape"].is_null());
    // Information criteria are reported regardless
    assert!(body["aic"].is_number());
    assert!(body["bic"].is_number());
}

#[tokio::test]
async fn series_equal_to_steps_has_null_metrics() {
    let (status, body) =
        post_predict("/predict?steps=8", json!({ "value": sample_series(8) })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["forecast"].as_array().unwrap().len(), 8);
    assert!(body["rmse"].is_null());
    assert!(body["mae"].is_null());
    assert!(body["mape"].is_null());
}

#[tokio::test]
async fn custom_order_and_horizon() {
    let (status, body) = post_predict(
        "/predict?p=1&d=0&q=0&steps=3",
        json!({ "value": sample_series(15) }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["forecast"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn non_numeric_entries_are_dropped() {
    let mut column: Vec<Value> = sample_series(18).into_iter().map(Value::from).collect();
    column.insert(3, json!("not a number"));
    column.insert(9, json!(null));
    column.push(json!("61.5"));

    let (status, body) = post_predict("/predict", json!({ "value": column })).await;

    // 19 usable observations survive cleaning, so the fit succeeds and
    // metrics are present.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["forecast"].as_array().unwrap().len(), 7);
    assert!(body["rmse"].is_number());
}

#[tokio::test]
async fn missing_observation_field_is_unprocessable() {
    let (status, body) = post_predict("/predict", json!({ "other": [1, 2, 3] })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("value"));
}

#[tokio::test]
async fn all_non_numeric_series_is_unprocessable() {
    let (status, body) = post_predict("/predict", json!({ "value": ["a", "b", "c"] })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("no numeric values"));
}

#[tokio::test]
async fn order_too_large_for_series_is_server_error() {
    let (status, body) =
        post_predict("/predict?p=6", json!({ "value": [1.0, 2.0, 3.0, 4.0, 5.0] })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Insufficient data"));
}

#[tokio::test]
async fn malformed_json_body_is_rejected() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn non_integer_query_parameter_is_rejected() {
    let (status, _) = post_predict("/predict?p=two", json!({ "value": sample_series(10) })).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn observation_field_is_configurable() {
    let state = AppState {
        series_field: "consumption".to_string(),
    };
    let (status, body) = request(
        state,
        "POST",
        "/predict",
        Some(json!({ "consumption": sample_series(20) })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["forecast"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn health_endpoints() {
    let (status, body) = request(test_state(), "GET", "/health/live", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");

    let (status, body) = request(test_state(), "GET", "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");

    let (status, _) = request(test_state(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}
