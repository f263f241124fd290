//! # HTTP メトリクス
//!
//! ルート・ステータスコードごとのリクエスト数を Prometheus 形式で集計する。
//!
//! プロセス全体で共有するグローバルレジストリは使わず、
//! [`HttpMetrics`] が自前の [`Registry`] を持つ。起動時に一つ作成し、
//! リクエストラッパーと `/metrics` ハンドラーの両方に渡す。
//!
//! ## メトリクス仕様
//!
//! - **Name**: `http_requests_total`
//! - **Type**: Counter
//! - **Labels**: `route`（登録時のルート）、`code`（HTTP ステータスコード）

use prometheus::{Encoder as _, IntCounterVec, Opts, Registry, TextEncoder};

/// `/metrics` レスポンスの Content-Type
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

/// HTTP リクエストのメトリクス
///
/// Clone は内部のカウンタを共有する（値はコピーされない）。
#[derive(Clone)]
pub struct HttpMetrics {
    registry:       Registry,
    requests_total: IntCounterVec,
}

impl HttpMetrics {
    /// 新しいレジストリにカウンタを登録して作成する
    ///
    /// # Errors
    ///
    /// メトリクス定義が不正な場合
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "HTTP requests"),
            &["route", "code"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;

        Ok(Self {
            registry,
            requests_total,
        })
    }

    /// リクエスト 1 件を記録する
    pub fn record(&self, route: &str, status: u16) {
        let code = status.to_string();
        self.requests_total
            .with_label_values(&[route, code.as_str()])
            .inc();
    }

    /// 記録済みのリクエスト数を返す
    ///
    /// `render` の出力から読むため、未記録の組み合わせを問い合わせても
    /// 系列は作られず `/metrics` の出力は変わらない。未記録なら 0。
    pub fn requests_total(&self, route: &str, status: u16) -> u64 {
        let Ok(body) = self.render() else {
            return 0;
        };
        let prefix = format!(r#"http_requests_total{{code="{status}",route="{route}"}} "#);

        body.lines()
            .find_map(|line| line.strip_prefix(prefix.as_str()))
            .and_then(|value| value.trim().parse::<f64>().ok())
            .map_or(0, |value| value as u64)
    }

    /// Prometheus テキスト形式で出力する
    ///
    /// # Errors
    ///
    /// エンコードに失敗した場合
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl std::fmt::Debug for HttpMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMetrics").finish_non_exhaustive()
    }
}
