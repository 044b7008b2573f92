use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use intake_runtime::{
    ChatMessage, CompletionConfig, CompletionResponse, EvaluatorConfig, LlmEvaluator, LlmProvider,
    ProviderError, TokenUsage, FALLBACK_SUMMARY,
};
use intake_server::{build_router, AppState, JsonFileStore};

/// Completion service stand-in with a fixed reply.
struct StubProvider {
    reply: Option<&'static str>,
}

#[async_trait]
impl LlmProvider for StubProvider {
    async fn complete(
        &self,
        _messages: Vec<ChatMessage>,
        config: &CompletionConfig,
    ) -> Result<CompletionResponse, ProviderError> {
        match self.reply {
            Some(content) => Ok(CompletionResponse {
                content: content.to_string(),
                usage: TokenUsage::default(),
                model: config.model.clone(),
                stop_reason: Some("stop".to_string()),
            }),
            None => Err(ProviderError::AuthError),
        }
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "stub"
    }
}

struct TestApp {
    router: Router,
    _dir: TempDir,
}

async fn test_app(reply: Option<&'static str>) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path()).await.unwrap();
    let evaluator = LlmEvaluator::new(Arc::new(StubProvider { reply }), EvaluatorConfig::default());

    TestApp {
        router: build_router(AppState::new(Arc::new(store), Arc::new(evaluator))),
        _dir: dir,
    }
}

fn clean_body() -> Value {
    json!({
        "company_name": "Acme Bank",
        "industry": "Finance",
        "contact_email": "secops@acme.example",
        "regions": ["EMEA"],
        "traffic_level": "low",
        "cloud_providers": ["AWS"],
        "critical_apps": ["Online banking portal"],
        "has_waf": true,
        "has_mfa_for_admins": true,
        "logging_strategy": "Centralized SIEM with 90 day retention",
        "compliance": ["ISO27001"]
    })
}

fn risky_body() -> Value {
    json!({
        "company_name": "Globex",
        "industry": "Retail",
        "contact_email": "it@globex.example",
        "regions": ["EMEA"],
        "traffic_level": "HIGH",
        "cloud_providers": [],
        "critical_apps": [],
        "has_waf": false,
        "has_mfa_for_admins": false,
        "logging_strategy": "local files only",
        "compliance": []
    })
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = test_app(None).await;
    let (status, body) = send(&app.router, get("/healthz")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn submit_then_fetch_round_trips() {
    let app = test_app(None).await;

    let (status, submitted) = send(&app.router, post_json("/submit", &clean_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["request"], clean_body());
    assert!(submitted["evaluation"].is_null());

    let id = submitted["id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
    let created_at = submitted["created_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());

    let (status, fetched) = send(&app.router, get(&format!("/requests/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, submitted);
}

#[tokio::test]
async fn listing_keeps_submission_order() {
    let app = test_app(None).await;

    let mut ids = Vec::new();
    for i in 0..5 {
        let mut body = clean_body();
        body["company_name"] = json!(format!("Company {}", i));
        let (_, submitted) = send(&app.router, post_json("/submit", &body)).await;
        ids.push(submitted["id"].as_str().unwrap().to_string());
    }

    let (status, listed) = send(&app.router, get("/requests")).await;
    assert_eq!(status, StatusCode::OK);

    let listed_ids: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(listed_ids, ids);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_are_all_stored() {
    let app = test_app(None).await;

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..20 {
        let router = app.router.clone();
        tasks.spawn(async move {
            let mut body = clean_body();
            body["company_name"] = json!(format!("Company {}", i));
            send(&router, post_json("/submit", &body)).await.0
        });
    }
    while let Some(status) = tasks.join_next().await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    let (_, listed) = send(&app.router, get("/requests")).await;
    assert_eq!(listed.as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = test_app(None).await;
    let (status, body) = send(&app.router, get("/requests/does-not-exist")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn invalid_fields_are_all_reported() {
    let app = test_app(None).await;
    let mut body = clean_body();
    body["company_name"] = json!("   ");
    body["contact_email"] = json!("not an email");

    let (status, response) = send(&app.router, post_json("/submit", &body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["error"], "validation_failed");

    let fields: Vec<&str> = response["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["company_name", "contact_email"]);

    // Nothing was stored
    let (_, listed) = send(&app.router, get("/requests")).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_field_is_validation_error() {
    let app = test_app(None).await;
    let mut body = clean_body();
    body.as_object_mut().unwrap().remove("has_waf");

    let (status, response) = send(&app.router, post_json("/evaluate/rules", &body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["fields"][0]["field"], "body");
    assert!(response["fields"][0]["message"].as_str().unwrap().contains("has_waf"));
}

#[tokio::test]
async fn malformed_json_is_validation_error() {
    let app = test_app(None).await;
    let request = Request::post("/submit")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"company_name\": "))
        .unwrap();

    let (status, response) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["error"], "validation_failed");
}

#[tokio::test]
async fn missing_content_type_is_unsupported() {
    let app = test_app(None).await;
    let request = Request::post("/submit")
        .body(Body::from(clean_body().to_string()))
        .unwrap();

    let (status, response) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(response["error"], "unsupported_media_type");
}

#[tokio::test]
async fn rules_endpoint_scores_worst_case() {
    let app = test_app(None).await;
    let (status, result) = send(&app.router, post_json("/evaluate/rules", &risky_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["decision"], "reject");
    assert_eq!(result["risk_score"], 110);
    assert_eq!(result["issues"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn rules_endpoint_approves_clean_request() {
    let app = test_app(None).await;
    let (_, result) = send(&app.router, post_json("/evaluate/rules", &clean_body())).await;

    assert_eq!(result["decision"], "approve");
    assert_eq!(result["risk_score"], 0);
    assert!(result["issues"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn evaluation_endpoints_do_not_persist() {
    let app = test_app(None).await;
    send(&app.router, post_json("/evaluate/rules", &clean_body())).await;
    send(&app.router, post_json("/evaluate/ai", &clean_body())).await;

    let (_, listed) = send(&app.router, get("/requests")).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn ai_endpoint_returns_model_result() {
    let app = test_app(Some(
        "```json\n{\"decision\": \"needs_review\", \"risk_score\": 41, \"issues\": [\"Review WAF rules\"], \"summary\": \"Moderate.\"}\n```",
    ))
    .await;

    let (status, result) = send(&app.router, post_json("/evaluate/ai", &risky_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["decision"], "needs_review");
    assert_eq!(result["risk_score"], 41);
    assert_eq!(result["summary"], "Moderate.");
}

#[tokio::test]
async fn ai_endpoint_falls_back_to_rules() {
    let app = test_app(None).await;

    let (_, rules) = send(&app.router, post_json("/evaluate/rules", &risky_body())).await;
    let (status, ai) = send(&app.router, post_json("/evaluate/ai", &risky_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ai["decision"], rules["decision"]);
    assert_eq!(ai["risk_score"], rules["risk_score"]);
    assert_eq!(ai["issues"], rules["issues"]);
    assert_eq!(ai["summary"], FALLBACK_SUMMARY);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = test_app(None).await;
    let request = Request::get("/healthz")
        .header(header::ORIGIN, "https://portal.example")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
