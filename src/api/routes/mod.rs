pub mod connections;
pub mod documents;
pub mod health;
pub mod statistics;

use axum::http::{header, Method};
use axum::middleware::from_fn;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::middleware::request_logger;
use crate::api::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = build_cors(&state.config.cors.allowed_origins);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
        .layer(from_fn(request_logger))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::HeaderName::from_static(documents::DROPPED_HEADER)]);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/connections",
            get(connections::list_connections).post(connections::create_connection),
        )
        .route("/connections/{id}", delete(connections::delete_connection))
        .route("/connections/{id}/test", post(connections::test_connection))
        .route("/documents", get(documents::list_documents))
        .route("/documents/{id}", patch(documents::update_document))
        .route("/statistics", get(statistics::get_statistics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::domain::{ports::ConnectionRegistry, NewConnection};
    use crate::infrastructure::document_store::testing::{Behavior, ScriptedConnector};
    use crate::infrastructure::{AppConfig, InMemoryConnectionRegistry, InMemoryConnector};

    struct TestApp {
        router: Router,
        connector: Arc<InMemoryConnector>,
    }

    impl TestApp {
        fn new() -> Self {
            let connector = Arc::new(InMemoryConnector::new());
            let state = AppState::new(
                AppConfig::default(),
                Arc::new(InMemoryConnectionRegistry::new()),
                connector.clone(),
            );
            Self {
                router: create_router(state),
                connector,
            }
        }

        async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let (status, _, body) = self.send_raw(method, uri, body).await;
            (status, body)
        }

        async fn send_raw(
            &self,
            method: Method,
            uri: &str,
            body: Option<Value>,
        ) -> (StatusCode, axum::http::HeaderMap, Value) {
            let mut request = Request::builder().method(method).uri(uri);
            let body = match body {
                Some(json) => {
                    request = request.header(header::CONTENT_TYPE, "application/json");
                    Body::from(json.to_string())
                }
                None => Body::empty(),
            };

            let response = self
                .router
                .clone()
                .oneshot(request.body(body).unwrap())
                .await
                .unwrap();

            let status = response.status();
            let headers = response.headers().clone();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, headers, value)
        }

        async fn register(&self, uri: &str) -> String {
            let (status, body) = self
                .send(
                    Method::POST,
                    "/api/connections",
                    Some(json!({ "name": "Tenant", "uri": uri, "database": "tenant", "collection": "docs" })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
            body["id"].as_str().unwrap().to_string()
        }
    }

    fn document(id: &str, num: &str, doc_type: &str, status: &str) -> Value {
        json!({
            "_id": id,
            "YoozDocNum": num,
            "Type": doc_type,
            "Status": status,
            "Payload": { "CardCode": "C-01", "NumAtCard": "PO-1", "DocumentLines": [] },
            "Last_updated": "2025-03-01T12:00:00.000Z",
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new();
        let (status, body) = app.send(Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body.get("connections").is_none());
    }

    #[tokio::test]
    async fn test_connection_lifecycle() {
        let app = TestApp::new();
        let (status, body) = app
            .send(
                Method::POST,
                "/api/connections",
                Some(json!({ "name": "A", "uri": "mongodb://db.invalid:27017", "database": "d" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "disconnected");
        assert_eq!(body["collection"], "YOOZ_TRANSFORMED_ITEMS_DOCUMENTS");
        let id = body["id"].as_str().unwrap().to_string();

        let (status, body) = app.send(Method::GET, "/api/connections", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = app
            .send(Method::POST, &format!("/api/connections/{id}/test"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);

        let (status, _) = app
            .send(Method::DELETE, &format!("/api/connections/{id}"), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = app
            .send(Method::DELETE, &format!("/api/connections/{id}"), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Connection not found");
    }

    #[tokio::test]
    async fn test_create_connection_validation() {
        let app = TestApp::new();
        let (status, body) = app
            .send(Method::POST, "/api/connections", Some(json!({ "name": "A" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_connection_test_unknown_id() {
        let app = TestApp::new();
        let (status, _) = app
            .send(Method::POST, "/api/connections/unknown/test", None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_documents() {
        let app = TestApp::new();
        let id = app.register("memory://tenant").await;
        app.connector.seed(
            "tenant",
            "docs",
            vec![
                document("1", "INV-1", "PurchaseInvoices", "LOADED"),
                document("2", "CN-1", "PurchaseCreditNotes", "FAILED"),
                json!({ "_id": "3", "Status": "LOADED" }),
            ],
        );

        let (status, headers, body) = app
            .send_raw(Method::GET, &format!("/api/documents?connectionId={id}"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(headers[documents::DROPPED_HEADER], "1");

        let (_, body) = app
            .send(
                Method::GET,
                &format!("/api/documents?connectionId={id}&type=PurchaseCreditNotes&status=FAILED"),
                None,
            )
            .await;
        let docs = body.as_array().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["_id"], "2");
        assert_eq!(docs[0]["Payload"]["CardCode"], "C-01");
    }

    #[tokio::test]
    async fn test_list_documents_errors() {
        let app = TestApp::new();
        let (status, body) = app.send(Method::GET, "/api/documents", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "connectionId is required");

        let (status, _) = app
            .send(Method::GET, "/api/documents?connectionId=missing", None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let id = app.register("mongodb://db.invalid:27017").await;
        let (status, body) = app
            .send(Method::GET, &format!("/api/documents?connectionId={id}"), None)
            .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to fetch documents");
    }

    #[tokio::test]
    async fn test_update_document_payload() {
        let app = TestApp::new();
        let id = app.register("memory://tenant").await;
        app.connector.seed(
            "tenant",
            "docs",
            vec![document("1", "INV-1", "PurchaseInvoices", "FAILED")],
        );

        let (status, body) = app
            .send(
                Method::PATCH,
                "/api/documents/1",
                Some(json!({ "connectionId": id, "payload": { "CardCode": "C-99" } })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let stored = app.connector.records("tenant", "docs");
        assert_eq!(stored[0]["Payload"], json!({ "CardCode": "C-99" }));
        assert_ne!(stored[0]["Last_updated"], "2025-03-01T12:00:00.000Z");

        let (status, body) = app
            .send(
                Method::PATCH,
                "/api/documents/404",
                Some(json!({ "connectionId": id, "payload": {} })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Document not found");

        let (status, _) = app
            .send(Method::PATCH, "/api/documents/1", Some(json!({ "payload": {} })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_statistics() {
        let app = TestApp::new();
        let id = app.register("memory://tenant").await;
        let mut records: Vec<Value> = (0..7)
            .map(|i| document(&i.to_string(), "INV", "PurchaseInvoices", "LOADED"))
            .collect();
        records.push(document("7", "CN", "PurchaseCreditNotes", "FAILED"));
        records.push(document("8", "CN", "PurchaseCreditNotes", "FAILED"));
        records.push(document("9", "INV", "PurchaseInvoices", "OPEN"));
        app.connector.seed("tenant", "docs", records);

        let (status, body) = app
            .send(Method::GET, &format!("/api/statistics?connectionId={id}"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 10);
        assert_eq!(body["successRate"], "70.0");
        assert_eq!(body["invoices"]["open"], 1);
        assert_eq!(body["creditNotes"]["failed"], 2);

        let (status, _) = app.send(Method::GET, "/api/statistics", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_type_lists_nothing() {
        let app = TestApp::new();
        let id = app.register("memory://tenant").await;
        app.connector.seed(
            "tenant",
            "docs",
            vec![document("1", "INV-1", "PurchaseInvoices", "LOADED")],
        );

        let (status, body) = app
            .send(
                Method::GET,
                &format!("/api/documents?connectionId={id}&type=PurchaseOrders&status=ARCHIVED"),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_statistics_store_failure() {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let conn = registry
            .create(NewConnection::new("A", "mongodb://flaky:27017", "tenant"))
            .await
            .unwrap();
        let state = AppState::new(
            AppConfig::default(),
            registry,
            Arc::new(ScriptedConnector::new(Behavior::FailGroupedCounts)),
        );

        let request = Request::builder()
            .uri(format!("/api/statistics?connectionId={}", conn.id))
            .body(Body::empty())
            .unwrap();
        let response = create_router(state).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Failed to fetch statistics");
    }
}
