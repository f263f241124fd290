//! # メトリクスハンドラ
//!
//! `GET /metrics` で Prometheus テキスト形式のメトリクスを返す。

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use gatehouse_shared::{ErrorResponse, HttpMetrics, metrics::CONTENT_TYPE};

/// GET /metrics
///
/// エンコードに失敗した場合は 500 を返す。
pub async fn metrics(State(metrics): State<HttpMetrics>) -> Response {
    match metrics.render() {
        Ok(body) => ([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            tracing::error!(error.message = %e, "メトリクスのエンコードに失敗しました");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error()),
            )
                .into_response()
        }
    }
}
