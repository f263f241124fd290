//! # API エラー定義
//!
//! 認証エンドポイントで発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | バリアント | HTTP ステータス | type |
//! |-----------|----------------|------|
//! | `BadRequest` | 400 | `bad-request` |
//! | `InvalidInput` | 400 | `invalid-input` |
//! | `Unauthorized` | 401 | `unauthorized` |
//! | `Conflict` | 409 | `conflict` |
//! | `Dependency` | 500 | `internal-error` |
//! | `Internal` | 500 | `internal-error` |
//!
//! レスポンスの `detail` はエラー種別ごとの固定文言とし、
//! 内部の詳細（ドライバのメッセージや SpanTrace）はログにのみ出力する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gatehouse_infra::InfraError;
use gatehouse_shared::ErrorResponse;
use thiserror::Error;

/// 認証エンドポイントで発生するエラー
#[derive(Debug, Error)]
pub enum AuthError {
    /// リクエストボディを解釈できない（JSON 不正・フィールド欠落）
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 入力値がルールに違反している
    #[error("入力値が不正です: {0}")]
    InvalidInput(String),

    /// 認証失敗
    ///
    /// ユーザーが存在しない場合とパスワード不一致の場合を区別しない。
    #[error("認証に失敗しました")]
    Unauthorized,

    /// メールアドレスが登録済み
    #[error("メールアドレスは既に登録されています")]
    Conflict,

    /// 永続化層の失敗（タイムアウトを含む）
    #[error("依存サービスのエラー: {0}")]
    Dependency(#[source] InfraError),

    /// ハッシュ化・署名などの内部処理の失敗
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<InfraError> for AuthError {
    fn from(err: InfraError) -> Self {
        if err.is_conflict() {
            Self::Conflict
        } else {
            Self::Dependency(err)
        }
    }
}

impl AuthError {
    /// レスポンスボディを組み立てる
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            Self::BadRequest(_) => {
                ErrorResponse::bad_request("リクエストボディを解釈できません")
            }
            Self::InvalidInput(_) => {
                ErrorResponse::invalid_input("メールアドレスまたはパスワードの形式が不正です")
            }
            Self::Unauthorized => {
                ErrorResponse::unauthorized("メールアドレスまたはパスワードが正しくありません")
            }
            Self::Conflict => ErrorResponse::conflict("メールアドレスは既に登録されています"),
            Self::Dependency(_) | Self::Internal(_) => ErrorResponse::internal_error(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            Self::BadRequest(reason) | Self::InvalidInput(reason) => {
                tracing::debug!(reason = %reason, "リクエストを拒否しました");
            }
            Self::Dependency(e) => {
                tracing::error!(
                    error.kind = "dependency",
                    error.message = %e,
                    span_trace = %e.span_trace(),
                    "依存サービスのエラー"
                );
            }
            Self::Internal(msg) => {
                tracing::error!(
                    error.kind = "internal",
                    error.message = %msg,
                    "内部エラー"
                );
            }
            Self::Unauthorized | Self::Conflict => {}
        }

        let body = self.to_error_response();
        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(body)).into_response()
    }
}
