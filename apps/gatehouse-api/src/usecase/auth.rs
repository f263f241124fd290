//! # 認証ユースケース
//!
//! サインアップとログインのビジネスロジックを実装する。
//!
//! ## タイミング攻撃対策
//!
//! ログインでユーザーが存在しない場合もダミーハッシュで検証を実行し、
//! 処理時間を均一化する。レスポンスもパスワード不一致の場合と同一にする。
//!
//! ## 期限
//!
//! リポジトリ呼び出しはすべて期限付きで実行し、超過した場合は
//! 依存サービスのエラーとして扱う。

use std::{future::Future, sync::Arc, time::Duration};

use gatehouse_domain::{
    password::{PasswordHash, PlainPassword},
    token::{ACCESS_TOKEN_TTL, AccessToken},
    user::{Email, User},
};
use gatehouse_infra::{InfraError, PasswordCodec, TokenIssuer, repository::UserRepository};

use crate::error::AuthError;

/// リポジトリ呼び出しの期限
pub const REPOSITORY_TIMEOUT: Duration = Duration::from_secs(3);

/// ダミーハッシュ（有効な Argon2id 形式）
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=65536,t=1,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// 認証ユースケースの実装
pub struct AuthUseCaseImpl {
    user_repository:    Arc<dyn UserRepository>,
    password_codec:     Arc<dyn PasswordCodec>,
    token_issuer:       Arc<dyn TokenIssuer>,
    repository_timeout: Duration,
}

impl AuthUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_codec: Arc<dyn PasswordCodec>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            user_repository,
            password_codec,
            token_issuer,
            repository_timeout: REPOSITORY_TIMEOUT,
        }
    }

    /// リポジトリ呼び出しの期限を変更する
    pub fn with_repository_timeout(mut self, timeout: Duration) -> Self {
        self.repository_timeout = timeout;
        self
    }

    /// ユーザーを登録し、アクセストークンを発行する
    #[tracing::instrument(skip_all)]
    pub async fn signup(&self, email: &str, password: &str) -> Result<AccessToken, AuthError> {
        let email = Email::normalized(email).map_err(|e| AuthError::InvalidInput(e.to_string()))?;
        let password =
            PlainPassword::for_signup(password).map_err(|e| AuthError::InvalidInput(e.to_string()))?;

        let hash = self
            .password_codec
            .hash(&password)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = self
            .with_deadline("users.create", self.user_repository.create(&email, &hash))
            .await?;

        tracing::info!(user_id = %user.id(), "ユーザーを登録しました");

        self.issue_token(&user)
    }

    /// 資格情報を検証し、アクセストークンを発行する
    #[tracing::instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<AccessToken, AuthError> {
        let email = Email::normalized(email).map_err(|e| AuthError::InvalidInput(e.to_string()))?;
        let password = PlainPassword::new(password);

        let user = self
            .with_deadline(
                "users.find_by_email",
                self.user_repository.find_by_email(&email),
            )
            .await?;

        let Some(user) = user else {
            self.dummy_verification(&password);
            return Err(AuthError::Unauthorized);
        };

        let result = self
            .password_codec
            .verify(&password, user.password_hash())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        if result.is_mismatch() {
            return Err(AuthError::Unauthorized);
        }

        self.issue_token(&user)
    }

    fn issue_token(&self, user: &User) -> Result<AccessToken, AuthError> {
        self.token_issuer
            .issue(&user.id().to_string(), ACCESS_TOKEN_TTL)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    async fn with_deadline<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, InfraError>>,
    ) -> Result<T, InfraError> {
        tokio::time::timeout(self.repository_timeout, call)
            .await
            .map_err(|_| InfraError::timeout(operation, self.repository_timeout))?
    }

    /// ダミーハッシュで検証を実行する（タイミング攻撃対策）
    ///
    /// 固定 sleep ではなく実際に Argon2id 検証を実行することで、
    /// CPU/メモリ状況による自然な変動も含めて同じ時間特性になる。
    fn dummy_verification(&self, password: &PlainPassword) {
        let dummy_hash = PasswordHash::new(DUMMY_HASH);
        // 結果は使わない
        let _ = self.password_codec.verify(password, &dummy_hash);
    }
}
