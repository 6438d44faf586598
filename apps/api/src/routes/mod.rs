pub mod debug;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

use crate::errors::handle_panic;
use crate::feedback::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(health::root_handler))
        .route("/submit-answers", post(handlers::handle_submit_answers))
        // Path the Streamlit frontend posts to
        .route("/api/submit-answers", post(handlers::handle_submit_answers))
        .route("/debug-routes", get(debug::debug_routes_handler))
        .fallback(debug::not_found_handler)
        .with_state(state);

    with_guards(router)
}

/// Panic guard and permissive CORS applied to every route.
fn with_guards(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::feedback::relay::tests::StubProvider;
    use crate::llm_client::tests::spawn_malformed_stub;
    use crate::llm_client::{ChatProvider, CohereClient};

    fn router_with(provider: impl ChatProvider + 'static) -> Router {
        build_router(AppState {
            provider: Arc::new(provider),
        })
    }

    fn ok_router() -> Router {
        router_with(StubProvider::replying("Good concise answer."))
    }

    async fn oneshot_get(app: Router, path: &str) -> Response {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .expect("failed to build request");
        app.oneshot(req).await.expect("oneshot failed")
    }

    async fn oneshot_post(app: Router, path: &str, body: impl Into<Body>) -> Response {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .expect("failed to build request");
        app.oneshot(req).await.expect("oneshot failed")
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .expect("failed to read body");
        serde_json::from_slice(&bytes).expect("body is not valid JSON")
    }

    fn sample_body() -> String {
        json!({
            "jd_text": "Backend engineer role",
            "qa_list": [{"question": "Tell me about yourself", "answer": "I build APIs"}]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_root_greeting() {
        let resp = oneshot_get(ok_router(), "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            json!({"message": "AI Interview Coach backend is running"})
        );
    }

    #[tokio::test]
    async fn test_submit_answers_success() {
        let resp = oneshot_post(ok_router(), "/submit-answers", sample_body()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["total_questions"], 1);
        assert_eq!(body["items"][0]["question_number"], 1);
        assert_eq!(body["items"][0]["question"], "Tell me about yourself");
        assert_eq!(body["items"][0]["answer"], "I build APIs");
        assert_eq!(
            body["items"][0]["scores"],
            json!({"relevance": 7, "depth": 7, "structure": 7, "keyword_match": 7})
        );
        assert_eq!(body["items"][0]["feedback"].as_array().unwrap().len(), 2);
        assert!(body["items"][0]["feedback"][1]
            .as_str()
            .unwrap()
            .contains("Good concise answer."));
    }

    #[tokio::test]
    async fn test_submit_answers_provider_failure_is_still_200() {
        let app = router_with(StubProvider::failing("upstream down"));
        let resp = oneshot_post(app, "/submit-answers", sample_body()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["status"], "fallback");
        assert_eq!(body["total_questions"], 1);
        assert_eq!(body["items"][0]["question_number"], 1);
        assert_eq!(body["items"][0]["scores"]["keyword_match"], 7);
        assert_eq!(body["message"], "Cohere error; using fallback scoring.");
    }

    #[tokio::test]
    async fn test_malformed_provider_payload_falls_back() {
        let base = spawn_malformed_stub().await;
        let app = router_with(CohereClient::new("test-key".into(), &base).unwrap());

        let resp = oneshot_post(app, "/submit-answers", sample_body()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["status"], "fallback");
        assert_eq!(body["total_questions"], 1);
        assert_eq!(body["items"][0]["question"], "Tell me about yourself");
    }

    #[tokio::test]
    async fn test_api_prefixed_path_is_served() {
        let resp = oneshot_post(ok_router(), "/api/submit-answers", sample_body()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_malformed_body_degrades_to_empty() {
        for body in ["", "{}", "not json at all", r#"{"qa_list": "nope"}"#] {
            let resp = oneshot_post(ok_router(), "/submit-answers", body.to_string()).await;
            assert_eq!(resp.status(), StatusCode::OK, "body: {body:?}");

            let json = body_json(resp).await;
            assert_eq!(json["total_questions"], 0);
            assert_eq!(json["items"], json!([]));
        }
    }

    #[tokio::test]
    async fn test_debug_routes_lists_every_route() {
        let resp = oneshot_get(ok_router(), "/debug-routes").await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        let routes = body.as_array().unwrap();
        assert_eq!(routes.len(), debug::ROUTES.len());
        assert!(routes.contains(&json!({"path": "/submit-answers", "methods": ["post"]})));
        assert!(routes.contains(&json!({"path": "/", "methods": ["get"]})));
    }

    #[tokio::test]
    async fn test_route_table_matches_router() {
        for route in debug::ROUTES {
            for method in route.methods {
                let req = Request::builder()
                    .method(method.to_uppercase().as_str())
                    .uri(route.path)
                    .body(Body::from("{}"))
                    .unwrap();
                let resp = ok_router().oneshot(req).await.unwrap();
                assert_eq!(resp.status(), StatusCode::OK, "{method} {}", route.path);
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_json() {
        let resp = oneshot_get(ok_router(), "/nope").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let req = Request::builder()
            .method("GET")
            .uri("/")
            .header(header::ORIGIN, "http://localhost:8501")
            .body(Body::empty())
            .unwrap();
        let resp = ok_router().oneshot(req).await.unwrap();
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_panicking_handler_returns_500() {
        async fn boom() -> &'static str {
            panic!("unexpected")
        }

        let app = with_guards(Router::new().route("/boom", get(boom)));

        let resp = oneshot_get(app, "/boom").await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(resp).await["error"]["code"], "INTERNAL_ERROR");
    }
}
