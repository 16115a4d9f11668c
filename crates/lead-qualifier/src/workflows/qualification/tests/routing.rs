use super::common::*;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn started_session(router: &axum::Router) -> String {
    let response = router
        .clone()
        .oneshot(post_empty("/api/v1/qualification/sessions"))
        .await
        .expect("router response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    body["sessionId"]
        .as_str()
        .expect("session id")
        .to_string()
}

#[tokio::test]
async fn start_returns_first_stage_view() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_empty("/api/v1/qualification/sessions"))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["currentStage"], 1);
    assert_eq!(body["view"]["progressPercent"], 0);
    assert_eq!(body["view"]["questions"][0]["id"], "businessType");
}

#[tokio::test]
async fn answer_endpoint_accepts_tagged_payloads() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);
    let id = started_session(&router).await;

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/qualification/sessions/{id}/answers"),
            json!({
                "question": "businessType",
                "answer": { "type": "choice", "value": "healthcare" }
            }),
        ))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["effect"], "applied");
    assert_eq!(body["state"]["formData"]["businessType"], "healthcare");
}

#[tokio::test]
async fn unknown_option_is_unprocessable() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);
    let id = started_session(&router).await;

    let response = router
        .oneshot(post_json(
            &format!("/api/v1/qualification/sessions/{id}/answers"),
            json!({
                "question": "teamSize",
                "answer": { "type": "choice", "value": "enormous" }
            }),
        ))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn blocked_continue_returns_issues() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);
    let id = started_session(&router).await;

    let response = router
        .oneshot(post_empty(&format!(
            "/api/v1/qualification/sessions/{id}/continue"
        )))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["transition"]["gate"]["status"], "blocked");
    assert_eq!(
        body["transition"]["gate"]["issues"]
            .as_array()
            .expect("issues")
            .len(),
        4
    );
    assert_eq!(body["state"]["currentStage"], 1);
}

#[tokio::test]
async fn reorder_endpoint_moves_priority() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);
    let id = started_session(&router).await;

    let response = router
        .oneshot(post_json(
            &format!("/api/v1/qualification/sessions/{id}/priorities/reorder"),
            json!({
                "dragged": "Lowest possible price",
                "target": "Long-term staff who know our business"
            }),
        ))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(
        body["state"]["formData"]["investmentMindset"][0],
        "Lowest possible price"
    );
}

#[tokio::test]
async fn result_before_completion_conflicts() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);
    let id = started_session(&router).await;

    let response = router
        .oneshot(get(&format!("/api/v1/qualification/sessions/{id}/result")))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn result_includes_badge_for_completed_session() {
    let (service, store, _) = build_service();
    let id = seed_results_session(&store, hot_healthcare_form());
    let router = router_with_service(service);

    let response = router
        .oneshot(get(&format!("/api/v1/qualification/sessions/{id}/result")))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["badge"], "Perfect Match");
    assert_eq!(body["showSuccessMetrics"], true);
    assert_eq!(body["result"]["category"], "hot");
    assert_eq!(body["result"]["score"], 115);
    assert_eq!(body["result"]["ctaAction"], "calendar");
}

#[tokio::test]
async fn cta_endpoint_dispatches_collaborator() {
    let (service, store, actions) = build_service();
    let id = seed_results_session(&store, hot_healthcare_form());
    let router = router_with_service(service);

    let response = router
        .oneshot(post_empty(&format!(
            "/api/v1/qualification/sessions/{id}/cta"
        )))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = read_json_body(response).await;
    assert_eq!(body["action"], "scheduling");
    assert_eq!(actions.calls().len(), 1);
}

#[tokio::test]
async fn missing_session_is_not_found() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(get("/api/v1/qualification/sessions/session_0_0"))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reset_endpoint_issues_new_session() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);
    let id = started_session(&router).await;

    let response = router
        .clone()
        .oneshot(post_empty(&format!(
            "/api/v1/qualification/sessions/{id}/reset"
        )))
        .await
        .expect("router response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_ne!(body["sessionId"], id.as_str());

    let stale = router
        .oneshot(get(&format!("/api/v1/qualification/sessions/{id}")))
        .await
        .expect("router response");
    assert_eq!(stale.status(), StatusCode::NOT_FOUND);
}
