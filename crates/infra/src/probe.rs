//! # 依存サービスの疎通確認
//!
//! ヘルスチェックで使う依存サービスごとのプローブを定義する。
//! タイムアウトの適用は呼び出し側（ヘルスチェックのユースケース）が行う。

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use sqlx::PgPool;

use crate::{db, error::InfraError};

/// 依存サービスのプローブ
#[async_trait]
pub trait DependencyProbe: Send + Sync {
    /// レスポンスに使う依存サービス名（例: "database"）
    fn name(&self) -> &'static str;

    /// 疎通を確認する
    async fn check(&self) -> Result<(), InfraError>;
}

/// PostgreSQL への `SELECT 1`
pub struct PostgresProbe {
    pool: PgPool,
}

impl PostgresProbe {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DependencyProbe for PostgresProbe {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn check(&self) -> Result<(), InfraError> {
        db::ping(&self.pool).await?;
        Ok(())
    }
}

/// Redis への `PING`
pub struct RedisProbe {
    conn: ConnectionManager,
}

impl RedisProbe {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl DependencyProbe for RedisProbe {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn check(&self) -> Result<(), InfraError> {
        let mut conn = self.conn.clone();
        crate::redis::ping(&mut conn).await?;
        Ok(())
    }
}
