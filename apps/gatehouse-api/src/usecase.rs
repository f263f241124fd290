//! # ユースケース層
//!
//! Gatehouse のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラからはトレイト越しに呼び出す
//! - **依存性注入**: リポジトリ・コーデック・トークン発行器を外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約

pub mod auth;
pub mod health;

use async_trait::async_trait;
pub use auth::AuthUseCaseImpl;
use gatehouse_domain::token::AccessToken;
pub use health::HealthCheckUseCase;

use crate::error::AuthError;

/// 認証ユースケーストレイト
#[async_trait]
pub trait AuthUseCase: Send + Sync {
    /// ユーザーを登録してアクセストークンを発行する
    ///
    /// ## エラー
    ///
    /// - `InvalidInput`: メールアドレスが空、パスワードが 8 文字未満
    /// - `Conflict`: メールアドレスが登録済み
    /// - `Dependency` / `Internal`: 永続化・ハッシュ化・署名の失敗
    async fn signup(&self, email: &str, password: &str) -> Result<AccessToken, AuthError>;

    /// 資格情報を検証してアクセストークンを発行する
    ///
    /// ユーザーが存在しない場合とパスワード不一致の場合は、
    /// どちらも `Unauthorized` を返す。
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, AuthError>;
}

#[async_trait]
impl AuthUseCase for AuthUseCaseImpl {
    async fn signup(&self, email: &str, password: &str) -> Result<AccessToken, AuthError> {
        self.signup(email, password).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, AuthError> {
        self.login(email, password).await
    }
}
