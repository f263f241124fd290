//! # Gatehouse インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **キャッシュ接続**: Redis への接続管理
//! - **資格情報**: Argon2id によるパスワードのハッシュ化と検証
//! - **トークン**: HS256 JWT の発行と検証
//! - **リポジトリ実装**: ユーザーの永続化
//! - **プローブ**: ヘルスチェック用の依存サービス疎通確認
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//!   ↘
//!     shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`redis`] - Redis キャッシュ接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - パスワードのハッシュ化と検証
//! - [`token`] - アクセストークンの発行と検証
//! - [`probe`] - 依存サービスのプローブ
//! - [`repository`] - リポジトリ実装

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod probe;
pub mod redis;
pub mod repository;
pub mod token;

pub use error::{InfraError, InfraErrorKind};
pub use password::{Argon2PasswordCodec, PasswordCodec};
pub use probe::{DependencyProbe, PostgresProbe, RedisProbe};
pub use token::{JwtTokenIssuer, TokenError, TokenIssuer};
