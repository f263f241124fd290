//! # アクセストークン
//!
//! サーバー側に状態を持たない署名付きトークンの値オブジェクトを定義する。
//!
//! トークンは主体（subject）・発行時刻・有効期限を含み、共有鍵による署名だけで
//! 検証できる。失効リストは持たないため、無効化は期限切れによってのみ起こる。

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// サインアップ・ログインで発行するトークンの有効期間（24 時間）
pub const ACCESS_TOKEN_TTL: Duration = Duration::hours(24);

/// 署名済みアクセストークン
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// トークンに埋め込むクレーム
///
/// JWT の登録済みクレーム名（`sub`, `iat`, `exp`）でシリアライズする。
/// 時刻は UNIX 秒。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 主体（ユーザー ID）
    pub sub: String,
    /// 発行時刻
    pub iat: i64,
    /// 有効期限
    pub exp: i64,
}

impl TokenClaims {
    /// 発行時刻と有効期間からクレームを作成する
    ///
    /// `exp = iat + ttl`
    pub fn new(subject: impl Into<String>, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: subject.into(),
            iat,
            exp: iat + ttl.num_seconds(),
        }
    }

    /// 指定時刻の時点で期限切れかどうか
    ///
    /// 現在時刻が `exp` 以上であれば期限切れ。猶予（leeway）は設けない。
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}
