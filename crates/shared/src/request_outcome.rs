//! # リクエスト結果記録ミドルウェア
//!
//! ルートごとに適用し、リクエスト完了時に結果を 1 件だけ記録する tower Layer。
//!
//! 1 リクエストにつき次の 2 つを行う:
//!
//! - 構造化ログ `{route, method, status, remote_addr, duration_ms}` を 1 行出力
//! - [`HttpMetrics`] の `http_requests_total{route, code}` を 1 増やす
//!
//! ステータスはハンドラーが返したレスポンスから読み取る。
//! 内側の Service がエラーを返した場合は ERROR レベルで出力し、500 として集計する。
//!
//! ## レイヤー配置
//!
//! ```text
//! TraceLayer → [RemoteAddr 付与] → RequestOutcomeLayer(route) → handler
//! ```

use std::{
    future::Future,
    net::SocketAddr,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use http::{Request, Response};
use tower::{Layer, Service};

use crate::metrics::HttpMetrics;

/// 内側の Service がエラーを返した場合に集計するステータス
const SERVICE_ERROR_STATUS: u16 = 500;

/// 接続元アドレス
///
/// リクエストの extensions に格納されていればログに出力する。
/// HTTP フレームワークの接続情報からの詰め替えはサービス側で行う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteAddr(pub SocketAddr);

/// リクエスト結果を記録する Layer
#[derive(Clone, Debug)]
pub struct RequestOutcomeLayer {
    route:   &'static str,
    metrics: HttpMetrics,
}

impl RequestOutcomeLayer {
    /// ルート名と集計先を指定して作成する
    ///
    /// `route` はメトリクスのラベルとログにそのまま使われる。
    pub fn new(route: &'static str, metrics: HttpMetrics) -> Self {
        Self { route, metrics }
    }
}

impl<S> Layer<S> for RequestOutcomeLayer {
    type Service = RequestOutcomeService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestOutcomeService {
            inner,
            route: self.route,
            metrics: self.metrics.clone(),
        }
    }
}

/// [`RequestOutcomeLayer`] が生成する Service
#[derive(Clone, Debug)]
pub struct RequestOutcomeService<S> {
    inner:   S,
    route:   &'static str,
    metrics: HttpMetrics,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestOutcomeService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Display + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // clone-swap パターン: poll_ready で得た readiness を保持する inner を使う
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let route = self.route;
        let metrics = self.metrics.clone();
        let method = req.method().clone();
        let remote_addr = req
            .extensions()
            .get::<RemoteAddr>()
            .map(|addr| addr.0.to_string())
            .unwrap_or_default();

        let start = Instant::now();

        Box::pin(async move {
            let result = inner.call(req).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(response) => {
                    let status = response.status().as_u16();
                    tracing::info!(
                        route,
                        method = %method,
                        status,
                        remote_addr = %remote_addr,
                        duration_ms,
                        "http_request"
                    );
                    metrics.record(route, status);
                }
                Err(err) => {
                    tracing::error!(
                        route,
                        method = %method,
                        status = SERVICE_ERROR_STATUS,
                        remote_addr = %remote_addr,
                        duration_ms,
                        error.message = %err,
                        "http_request"
                    );
                    metrics.record(route, SERVICE_ERROR_STATUS);
                }
            }

            result
        })
    }
}
