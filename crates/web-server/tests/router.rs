use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use configuration::WebSettings;
use database::fixtures;
use tower::ServiceExt;
use web_server::{AppState, build_router};

async fn app() -> Router {
    let db_repo = fixtures::sample_repository().await.unwrap();
    build_router(AppState { db_repo }, &WebSettings::default())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn health_check() {
    let (status, body) = get(app().await, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn index_lists_seasons_newest_first() {
    let (status, body) = get(app().await, "/").await;
    assert_eq!(status, StatusCode::OK);

    let newest = body.find(r#"<option value="2022">"#).unwrap();
    let middle = body.find(r#"<option value="2021">"#).unwrap();
    let oldest = body.find(r#"<option value="2020">"#).unwrap();
    assert!(newest < middle && middle < oldest);
    assert!(body.contains(r#"hx-get="/api/season""#));
}

#[tokio::test]
async fn unset_year_gives_an_empty_body() {
    for uri in ["/api/season", "/api/season?year=0"] {
        let (status, body) = get(app().await, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body.is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn season_fragment_precedes_global_statistics() {
    let (status, body) = get(app().await, "/api/season?year=2021").await;
    assert_eq!(status, StatusCode::OK);

    let season = body.find("<h3>Formula 1 Standings 2021</h3>").unwrap();
    let global = body.find("<h2>Other Statistics (All years)</h2>").unwrap();
    assert!(season < global);
    assert!(body.contains("<p>Number of races: 2</p>"));
    assert!(body.contains("<h3>Drivers Standing 2021</h3>"));
    assert!(body.contains(r#"class="pure-table pure-table-bordered""#));
    assert!(body.contains("<svg"));
}

#[tokio::test]
async fn year_without_races_still_renders() {
    let (status, body) = get(app().await, "/api/season?year=1955").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<p>Number of races: 0</p>"));
    assert!(body.contains("Other Statistics (All years)"));
}

#[tokio::test]
async fn negative_year_is_a_bad_request() {
    let (status, body) = get(app().await, "/api/season?year=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("-1"));
}

#[tokio::test]
async fn season_json_carries_aligned_charts() {
    let (status, body) = get(app().await, "/api/season.json?year=2021").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    let points = json["season"]["sections"][1]["charts"][0].clone();
    assert_eq!(points["name"], "constructors_points");
    assert_eq!(points["x_labels"], serde_json::json!(["A", "B"]));
    assert_eq!(points["series"][0]["values"], serde_json::json!([400.0, 300.0]));

    assert_eq!(json["global"]["title"], "Other Statistics (All years)");
}

#[tokio::test]
async fn season_json_without_year_has_no_season() {
    let (status, body) = get(app().await, "/api/season.json").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["season"].is_null());
    assert!(json["global"]["sections"].is_array());
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (status, body) = get(app().await, "/no/such/page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "<h1>404</h1>");
}
