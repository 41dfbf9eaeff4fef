use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use lexicon_db::Lexicon;
use lexicon_types::LexiconEntry;
use tower::util::ServiceExt;

use legal_annotator::handlers::{AppState, router};
use legal_annotator::scanner::DictionaryScanner;

fn make_state() -> AppState {
    let lexicon = Lexicon::from_entries(vec![
        LexiconEntry::new("arbitraje").with_domain("Lab."),
        LexiconEntry::new("ley").with_domain("Gral."),
    ]);
    let scanner = DictionaryScanner::new(&lexicon, "Lab.").unwrap();
    AppState {
        lexicon: Arc::new(lexicon),
        scanner: Arc::new(scanner),
        max_text_bytes: 256,
    }
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body_bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

#[tokio::test]
async fn healthz_ok() {
    let app = router(make_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn annotate_returns_records() {
    let app = router(make_state());
    let response = app
        .oneshot(post_json(
            "/v1/annotate",
            serde_json::json!({
                "text": "El arbitraje laboral fue exitoso. Hubo arbitrajes previos."
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["domain"], "Lab.");
    assert_eq!(body["count"], 2);
    assert_eq!(body["annotations"][0]["id"], "T1");
    assert_eq!(body["annotations"][0]["category"], "concept");
    assert_eq!(body["annotations"][0]["start"], 3);
    assert_eq!(body["annotations"][0]["end"], 12);
    assert_eq!(body["annotations"][1]["text"], "arbitrajes");
}

#[tokio::test]
async fn annotate_with_other_domain() {
    let app = router(make_state());
    let response = app
        .oneshot(post_json(
            "/v1/annotate",
            serde_json::json!({ "text": "La ley y el arbitraje.", "domain": "Gral." }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["domain"], "Gral.");
    assert_eq!(body["count"], 1);
    assert_eq!(body["annotations"][0]["text"], "ley");
}

#[tokio::test]
async fn domain_tag_must_match_exactly() {
    let app = router(make_state());
    let response = app
        .oneshot(post_json(
            "/v1/annotate",
            serde_json::json!({ "text": "La ley y el arbitraje.", "domain": " Lab." }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["domain"], " Lab.");
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn annotate_ann_returns_standoff_text() {
    let app = router(make_state());
    let response = app
        .oneshot(post_json(
            "/v1/annotate/ann",
            serde_json::json!({ "text": "Arbitraje." }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    let body_bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    assert_eq!(&body_bytes[..], b"T1\tconcept 0 9\tArbitraje\n");
}

#[tokio::test]
async fn annotate_rejects_empty_text() {
    let app = router(make_state());
    let response = app
        .oneshot(post_json("/v1/annotate", serde_json::json!({ "text": "   " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap_or_default()
            .contains("required")
    );
}

#[tokio::test]
async fn annotate_rejects_oversized_text() {
    let app = router(make_state());
    let response = app
        .oneshot(post_json(
            "/v1/annotate",
            serde_json::json!({ "text": "arbitraje ".repeat(100) }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap_or_default()
            .contains("at most 256 bytes")
    );
}
