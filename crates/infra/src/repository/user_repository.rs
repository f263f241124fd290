//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! メールアドレスは正規化済みの値で保存し、`users.email` の一意制約で
//! 重複を防ぐ。重複時は [`InfraError::conflict`] を返し、
//! それ以外の失敗（接続断など）とは区別する。
//!
//! `users.email` は `VARCHAR(255)` のため、それより長いアドレスの保存は
//! データベースエラー（一意制約違反ではない）として返る。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gatehouse_domain::{
    password::PasswordHash,
    user::{Email, User, UserId},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを作成する
    ///
    /// ID はリポジトリ側で採番する。
    ///
    /// # 戻り値
    ///
    /// - `Ok(user)`: 作成されたユーザー
    /// - `Err(_)`: 同じメールアドレスが登録済みの場合は Conflict、その他はデータベースエラー
    async fn create(&self, email: &Email, password_hash: &PasswordHash)
    -> Result<User, InfraError>;

    /// メールアドレスでユーザーを検索
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(user))`: ユーザーが見つかった場合
    /// - `Ok(None)`: ユーザーが見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError>;
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id:            Uuid,
    email:         String,
    password_hash: String,
    created_at:    DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(
            UserId::from_uuid(row.id),
            Email::from_stored(row.email),
            PasswordHash::new(row.password_hash),
            row.created_at,
        )
    }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn create(
        &self,
        email: &Email,
        password_hash: &PasswordHash,
    ) -> Result<User, InfraError> {
        let id = UserId::new();

        let result = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(email.as_str())
        .bind(password_hash.as_str())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(User::from(row)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(InfraError::conflict("User", email.as_str()))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }
}
