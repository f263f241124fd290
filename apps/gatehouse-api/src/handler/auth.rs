//! # 認証ハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /signup` - ユーザー登録
//! - `POST /login` - ログイン
//!
//! どちらも成功時は `{"token": "..."}` を返す。
//!
//! ボディは Content-Type にかかわらず JSON として解釈する。

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use gatehouse_domain::token::AccessToken;
use serde::{Deserialize, Serialize};

use crate::{error::AuthError, usecase::AuthUseCase};

/// 認証ハンドラの共有状態
pub struct AuthState {
    pub usecase: Arc<dyn AuthUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// 資格情報リクエスト（サインアップ・ログイン共通）
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email:    String,
    pub password: String,
}

impl CredentialsRequest {
    /// JSON ボディを解釈する
    ///
    /// 不正な JSON やフィールド欠落は `BadRequest` になる。
    fn from_body(body: &[u8]) -> Result<Self, AuthError> {
        serde_json::from_slice(body).map_err(|e| AuthError::BadRequest(e.to_string()))
    }
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// トークンレスポンス
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: AccessToken,
}

// --- ハンドラ ---

/// POST /signup
///
/// ボディを解釈できない場合は 400（bad-request）を返す。
pub async fn signup(
    State(state): State<Arc<AuthState>>,
    body: Bytes,
) -> Result<impl IntoResponse, AuthError> {
    let req = CredentialsRequest::from_body(&body)?;
    let token = state.usecase.signup(&req.email, &req.password).await?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// POST /login
///
/// ユーザーが存在しない場合とパスワード不一致の場合は同じ 401 を返す。
pub async fn login(
    State(state): State<Arc<AuthState>>,
    body: Bytes,
) -> Result<impl IntoResponse, AuthError> {
    let req = CredentialsRequest::from_body(&body)?;
    let token = state.usecase.login(&req.email, &req.password).await?;

    Ok((StatusCode::OK, Json(TokenResponse { token })))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{Router, body::Body, http::Request, routing::post};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tower::ServiceExt;

    use super::*;

    /// 受け取った値を検証せずに固定結果を返すスタブ
    struct StubAuthUseCase {
        result: fn() -> Result<AccessToken, AuthError>,
    }

    #[async_trait]
    impl AuthUseCase for StubAuthUseCase {
        async fn signup(&self, _email: &str, _password: &str) -> Result<AccessToken, AuthError> {
            (self.result)()
        }

        async fn login(&self, _email: &str, _password: &str) -> Result<AccessToken, AuthError> {
            (self.result)()
        }
    }

    fn app(result: fn() -> Result<AccessToken, AuthError>) -> Router {
        let state = Arc::new(AuthState {
            usecase: Arc::new(StubAuthUseCase { result }),
        });
        Router::new()
            .route("/signup", post(signup))
            .route("/login", post(login))
            .with_state(state)
    }

    fn json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[rstest]
    #[case("/signup", StatusCode::CREATED)]
    #[case("/login", StatusCode::OK)]
    #[tokio::test]
    async fn test_成功時はトークンを返す(#[case] uri: &str, #[case] expected: StatusCode) {
        let app = app(|| Ok(AccessToken::new("issued.token.value")));

        let (status, json) = send(
            app,
            json_request(uri, r#"{"email":"a@example.com","password":"password123"}"#),
        )
        .await;

        assert_eq!(status, expected);
        assert_eq!(json, serde_json::json!({ "token": "issued.token.value" }));
    }

    #[rstest]
    #[case("/signup", "{not json")]
    #[case("/signup", r#"{"email":"a@example.com"}"#)]
    #[case("/login", r#"{"password":"password123"}"#)]
    #[case("/login", "")]
    #[tokio::test]
    async fn test_ボディを解釈できなければbad_request(#[case] uri: &str, #[case] body: &str) {
        let app = app(|| Ok(AccessToken::new("unused")));

        let (status, json) = send(app, json_request(uri, body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["type"],
            "https://gatehouse.example.com/errors/bad-request"
        );
    }

    #[rstest]
    #[case("/signup", StatusCode::CREATED)]
    #[case("/login", StatusCode::OK)]
    #[tokio::test]
    async fn test_content_typeがなくてもjsonとして解釈する(
        #[case] uri: &str,
        #[case] expected: StatusCode,
    ) {
        let app = app(|| Ok(AccessToken::new("issued.token.value")));
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::from(
                r#"{"email":"a@example.com","password":"password123"}"#,
            ))
            .unwrap();

        let (status, json) = send(app, request).await;

        assert_eq!(status, expected);
        assert_eq!(json["token"], "issued.token.value");
    }

    #[tokio::test]
    async fn test_ユースケースのエラーはそのままレスポンスになる() {
        let app = app(|| Err(AuthError::Conflict));

        let (status, json) = send(
            app,
            json_request(
                "/signup",
                r#"{"email":"a@example.com","password":"password123"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["status"], 409);
    }

    #[test]
    fn test_リクエストのdebug出力でパスワードがマスクされる() {
        let req = CredentialsRequest {
            email:    "a@example.com".to_string(),
            password: "hunter22".to_string(),
        };

        let debug = format!("{req:?}");

        assert!(!debug.contains("hunter22"));
    }
}
