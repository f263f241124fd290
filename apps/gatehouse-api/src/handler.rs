//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `auth`: サインアップ・ログイン
//! - `health`: 依存サービスを含むヘルスチェック
//! - `metrics`: Prometheus メトリクス

pub mod auth;
pub mod health;
pub mod metrics;

pub use auth::{AuthState, login, signup};
pub use health::{HealthState, health_check};
pub use metrics::metrics;
