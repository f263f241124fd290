//! # アプリケーション構築
//!
//! State を受け取ってルーターを組み立てる。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//!
//! ## レイヤー構成
//!
//! ```text
//! TraceLayer → attach_remote_addr → RequestOutcomeLayer(route) → handler
//! ```
//!
//! `RequestOutcomeLayer` はルートごとに適用し、登録時のルート名をラベルにする。

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::{ConnectInfo, Request},
    middleware::{Next, from_fn},
    response::Response,
    routing::{get, post},
};
use gatehouse_shared::{
    HttpMetrics,
    RemoteAddr,
    RequestOutcomeLayer,
    observability::make_request_span,
};
use tower_http::trace::TraceLayer;

use crate::handler::{AuthState, HealthState, health_check, login, metrics, signup};

/// ルーターを構築する
pub fn build_app(
    auth_state: Arc<AuthState>,
    health_state: Arc<HealthState>,
    http_metrics: HttpMetrics,
) -> Router {
    let outcome = |route: &'static str| RequestOutcomeLayer::new(route, http_metrics.clone());

    Router::new()
        .route("/signup", post(signup).layer(outcome("/signup")))
        .route("/login", post(login).layer(outcome("/login")))
        .with_state(auth_state)
        .merge(
            Router::new()
                .route("/healthz", get(health_check).layer(outcome("/healthz")))
                .with_state(health_state),
        )
        .merge(
            Router::new()
                .route("/metrics", get(metrics).layer(outcome("/metrics")))
                .with_state(http_metrics.clone()),
        )
        .layer(from_fn(attach_remote_addr))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
}

/// 接続情報から [`RemoteAddr`] を extensions に詰め替える
///
/// `into_make_service_with_connect_info` を使わずに起動した場合は何もしない。
async fn attach_remote_addr(mut req: Request, next: Next) -> Response {
    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>().copied() {
        req.extensions_mut().insert(RemoteAddr(addr));
    }
    next.run(req).await
}
