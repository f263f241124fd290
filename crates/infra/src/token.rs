//! # アクセストークン発行・検証
//!
//! HS256 署名の JWT でアクセストークンを発行・検証する。
//!
//! ## 検証ルール
//!
//! - 署名・形式が不正なトークンは拒否する
//! - 現在時刻が `exp` 以上のトークンは拒否する（猶予なし）
//!
//! 期限判定は注入された [`Clock`] で行い、ライブラリ側のシステム時刻による
//! 判定は使わない。これによりテストで固定時刻を使える。

use std::sync::Arc;

use chrono::Duration;
use gatehouse_domain::{
    clock::Clock,
    token::{AccessToken, TokenClaims},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

/// トークン処理のエラー
#[derive(Debug, Error)]
pub enum TokenError {
    /// 署名鍵が空
    #[error("署名鍵が設定されていません")]
    EmptySecret,

    /// 署名に失敗した
    #[error("トークンの署名に失敗しました: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// 署名・形式が不正
    #[error("不正なトークンです: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    /// 有効期限切れ
    #[error("トークンの有効期限が切れています")]
    Expired,
}

/// トークンの発行と検証を担当するトレイト
pub trait TokenIssuer: Send + Sync {
    /// 主体と有効期間からトークンを発行する
    fn issue(&self, subject: &str, ttl: Duration) -> Result<AccessToken, TokenError>;

    /// トークンを検証し、クレームを返す
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}

/// HS256 JWT による実装
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation:   Validation,
    secret_empty: bool,
    clock:        Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    pub fn new(secret: &str, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            secret_empty: secret.is_empty(),
            clock,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, subject: &str, ttl: Duration) -> Result<AccessToken, TokenError> {
        if self.secret_empty {
            return Err(TokenError::EmptySecret);
        }

        let claims = TokenClaims::new(subject, self.clock.now(), ttl);
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )
        .map_err(TokenError::Signing)?;

        Ok(AccessToken::new(token))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        if self.secret_empty {
            return Err(TokenError::EmptySecret);
        }

        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(TokenError::Invalid)?;

        if data.claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}
