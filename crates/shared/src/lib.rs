//! # Gatehouse 共有ユーティリティ
//!
//! サービス全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - HTTP フレームワーク（axum）には依存しない
//! - トレーシング・メトリクス関連は `observability` feature で有効化する

pub mod error_response;
pub mod health;
#[cfg(feature = "observability")]
pub mod metrics;
pub mod observability;
#[cfg(feature = "observability")]
pub mod request_outcome;

pub use error_response::ErrorResponse;
pub use health::{DependencyStatus, HealthResponse, HealthVerdict};
#[cfg(feature = "observability")]
pub use metrics::HttpMetrics;
#[cfg(feature = "observability")]
pub use request_outcome::{RemoteAddr, RequestOutcomeLayer};
