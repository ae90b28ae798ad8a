use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use careerforge::candidates::{candidate_router, CandidateBrowser, DatasetCache};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/candidates.csv")
}

fn router_for(path: PathBuf) -> axum::Router {
    let browser = CandidateBrowser::new(Arc::new(DatasetCache::new()), path);
    candidate_router(Arc::new(browser))
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

fn search_request(payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/candidates/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn search_returns_clamped_page() {
    let response = router_for(fixture_path())
        .oneshot(search_request(json!({
            "role": "data entry",
            "gender": "Female",
            "page": 9
        })))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["role"], "data entry");
    assert_eq!(body["total_results"], 7);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["page_number"], 1);
    assert_eq!(body["page_size"], 10);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(7));
    assert_eq!(body["items"][0]["name"], "Meera Shah");
    assert!(body["items"][0].get("resume_url").is_none());
}

#[tokio::test]
async fn search_gender_accepts_command_line_spellings() {
    let response = router_for(fixture_path())
        .oneshot(search_request(json!({ "gender": "FEMALE" })))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["total_results"], 7);

    let rejected = router_for(fixture_path())
        .oneshot(search_request(json!({ "gender": "other" })))
        .await
        .expect("router responds");
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn options_lists_multi_select_values() {
    let response = router_for(fixture_path())
        .oneshot(
            Request::builder()
                .uri("/api/v1/candidates/options")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let areas: Vec<&str> = body["areas"]
        .as_array()
        .expect("areas array")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(areas.contains(&"Katargam"));
    assert!(areas.contains(&"Rander"));
    assert!(!areas.iter().any(|area| area.contains(',')));
    assert_eq!(body["genders"], json!(["All", "Male", "Female"]));
}

#[tokio::test]
async fn missing_dataset_is_service_unavailable() {
    let response = router_for(PathBuf::from("missing/candidates.csv"))
        .oneshot(search_request(json!({})))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("missing/candidates.csv")));
}
