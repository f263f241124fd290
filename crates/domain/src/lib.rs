//! # Gatehouse ドメイン層
//!
//! 認証境界の中核となる値オブジェクトとエンティティを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: メールアドレス、パスワード、トークンを Newtype で表現し、
//!   生成時に検証する
//! - **I/O を持たない**: データベースや署名鍵には依存しない
//! - **ドメインエラー**: 入力検証の失敗を [`DomainError`] で表現する
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//!   ↘      ↘
//!     shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメイン層エラー
//! - [`password`] - 平文パスワードとハッシュ
//! - [`token`] - アクセストークンとクレーム
//! - [`user`] - ユーザーエンティティ
//!
//! ## 使用例
//!
//! ```rust
//! use gatehouse_domain::user::Email;
//!
//! let email = Email::normalized("  Alice@Example.COM ").unwrap();
//! assert_eq!(email.as_str(), "alice@example.com");
//! ```

pub mod clock;
pub mod error;
pub mod password;
pub mod token;
pub mod user;

pub use error::DomainError;
