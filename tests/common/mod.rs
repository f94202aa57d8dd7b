#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use feedesk::config::{AccessConfig, JwtConfig};
use feedesk::feedesk_auth::create_access_token;
use feedesk::feedesk_db::{MemoryAuditSink, MemoryRoleStore};
use feedesk::feedesk_models::UserId;
use feedesk::router::init_router;
use feedesk::state::AppState;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn generate_unique_email() -> String {
    let email: String = SafeEmail().fake();
    format!("{}-{}", uuid::Uuid::new_v4().simple(), email)
}

pub struct TestApp {
    pub router: axum::Router,
    pub roles: Arc<MemoryRoleStore>,
    pub audit: Arc<MemoryAuditSink>,
    pub jwt_config: JwtConfig,
}

impl TestApp {
    pub fn new(access_config: AccessConfig) -> Self {
        let roles = Arc::new(MemoryRoleStore::new());
        let audit = Arc::new(MemoryAuditSink::new());
        let jwt_config = test_jwt_config();
        let state = AppState::with_stores(
            jwt_config.clone(),
            access_config,
            roles.clone(),
            audit.clone(),
        );

        Self {
            router: init_router(state),
            roles,
            audit,
            jwt_config,
        }
    }

    pub fn token_for(&self, user_id: UserId, email: &str, embedded_role: Option<&str>) -> String {
        create_access_token(user_id.into_inner(), email, embedded_role, &self.jwt_config).unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        token: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body)
                .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&body).into()))
        };
        (status, body)
    }
}
