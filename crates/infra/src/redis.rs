//! # Redis 接続管理
//!
//! Redis キャッシュサーバーへの接続管理を行う。
//!
//! ## 設計方針
//!
//! - **ConnectionManager**: 自動再接続機能を持つ接続マネージャを使用
//! - **非同期対応**: tokio ランタイムとの統合
//!
//! 現時点で Redis はヘルスチェックの対象としてのみ使用する。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use gatehouse_infra::redis;
//!
//! async fn example() -> Result<(), ::redis::RedisError> {
//!     let mut conn = redis::create_connection_manager("redis://localhost").await?;
//!     redis::ping(&mut conn).await?;
//!     Ok(())
//! }
//! ```

pub use redis::aio::ConnectionManager;
use redis::Client;

/// Redis 接続マネージャを作成する
///
/// # 引数
///
/// * `redis_url` - Redis 接続 URL
///   - 形式: `redis://[[username:]password@]host[:port][/database]`
///   - TLS: `rediss://` スキームで TLS 接続
///
/// # エラー
///
/// - URL パースエラー: 不正な URL 形式
/// - 接続エラー: Redis サーバーに接続できない
pub async fn create_connection_manager(
    redis_url: &str,
) -> Result<ConnectionManager, redis::RedisError> {
    let client = Client::open(redis_url)?;
    ConnectionManager::new(client).await
}

/// `PING` を送り、応答を確認する
///
/// `ConnectionManager` は Clone が安価なため、呼び出し側で複製して渡す。
pub async fn ping(conn: &mut ConnectionManager) -> Result<(), redis::RedisError> {
    let _: String = redis::cmd("PING").query_async(conn).await?;
    Ok(())
}
