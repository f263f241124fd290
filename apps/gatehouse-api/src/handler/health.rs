//! # ヘルスチェックハンドラ
//!
//! `GET /healthz` で依存サービスの稼働状態を返す。
//!
//! レスポンス型は [`gatehouse_shared::HealthResponse`] を参照。

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use gatehouse_shared::HealthResponse;

use crate::usecase::HealthCheckUseCase;

/// ヘルスチェックの共有状態
pub struct HealthState {
    pub usecase: HealthCheckUseCase,
}

/// GET /healthz
///
/// 全依存サービスが正常なら 200、いずれかが異常なら 503 を返す。
pub async fn health_check(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let verdict = state.usecase.check().await;
    let http_status = if verdict.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(HealthResponse::from(&verdict)))
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::Request, routing::get};
    use gatehouse_infra::{DependencyProbe, mock::MockProbe};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    async fn call(probes: Vec<Arc<dyn DependencyProbe>>) -> (StatusCode, serde_json::Value) {
        let state = Arc::new(HealthState {
            usecase: HealthCheckUseCase::new(probes),
        });
        let app = Router::new()
            .route("/healthz", get(health_check))
            .with_state(state);

        let response = app
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_全依存サービスが正常なら200() {
        let (status, json) = call(vec![
            Arc::new(MockProbe::healthy("database")),
            Arc::new(MockProbe::healthy("cache")),
        ])
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_キャッシュが異常なら503() {
        let (status, json) = call(vec![
            Arc::new(MockProbe::healthy("database")),
            Arc::new(MockProbe::failing("cache")),
        ])
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json, serde_json::json!({ "ok": false, "cache": "down" }));
    }
}
