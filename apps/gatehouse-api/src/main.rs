//! # Gatehouse API サーバー
//!
//! アカウント作成・ログインを受け付け、アクセストークンを発行する。
//!
//! ## 起動シーケンス
//!
//! 1. `.env` 読み込み、トレーシング初期化、設定読み込み
//! 2. PostgreSQL 接続とマイグレーション適用（失敗したら起動しない）
//! 3. Redis 接続と `PING`（失敗したら起動しない）
//! 4. ルーター構築、待ち受け開始
//!
//! ## 停止
//!
//! SIGINT / SIGTERM を受けたら新規接続の受け付けを止め、処理中のリクエストを
//! `SHUTDOWN_GRACE_SECONDS` まで待ってから接続プールを閉じる。
//!
//! ## 起動方法
//!
//! ```bash
//! JWT_SECRET=dev-secret cargo run -p gatehouse-api
//! ```

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context as _;
use gatehouse_api::{
    app_builder::build_app,
    config::GatehouseConfig,
    handler::{AuthState, HealthState},
    usecase::{AuthUseCaseImpl, HealthCheckUseCase},
};
use gatehouse_domain::clock::SystemClock;
use gatehouse_infra::{
    Argon2PasswordCodec,
    DependencyProbe,
    JwtTokenIssuer,
    PostgresProbe,
    RedisProbe,
    db,
    redis,
    repository::PostgresUserRepository,
};
use gatehouse_shared::{
    HttpMetrics,
    observability::{TracingConfig, init_tracing},
};
use tokio::{net::TcpListener, sync::oneshot};

/// Redis への接続・疎通確認の期限
const REDIS_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("gatehouse-api"));
    let _tracing_guard = tracing::info_span!("app", service = "gatehouse-api").entered();

    let config = GatehouseConfig::from_env().context("設定の読み込みに失敗しました")?;
    tracing::info!(
        "Gatehouse API サーバーを起動します: {}",
        config.bind_address()
    );
    tracing::debug!(
        endpoint = %config.object_storage.endpoint,
        bucket = %config.object_storage.bucket,
        "オブジェクトストレージ設定"
    );

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    let redis_conn = connect_redis(&config.redis_url).await?;
    tracing::info!("Redis に接続しました");

    // 依存コンポーネントを初期化
    let http_metrics = HttpMetrics::new().context("メトリクスの登録に失敗しました")?;
    let password_codec =
        Argon2PasswordCodec::new().context("パスワードハッシュの初期化に失敗しました")?;
    let token_issuer = JwtTokenIssuer::new(&config.jwt_secret, Arc::new(SystemClock));

    let auth_usecase = AuthUseCaseImpl::new(
        Arc::new(PostgresUserRepository::new(pool.clone())),
        Arc::new(password_codec),
        Arc::new(token_issuer),
    );
    let auth_state = Arc::new(AuthState {
        usecase: Arc::new(auth_usecase),
    });

    let probes: Vec<Arc<dyn DependencyProbe>> = vec![
        Arc::new(PostgresProbe::new(pool.clone())),
        Arc::new(RedisProbe::new(redis_conn)),
    ];
    let health_state = Arc::new(HealthState {
        usecase: HealthCheckUseCase::new(probes),
    });

    let app = build_app(auth_state, health_state, http_metrics);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .context("アドレスのパースに失敗しました")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Gatehouse API サーバーが起動しました: {}", addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            shutdown_rx.await.ok();
        })
        .await
    });

    tokio::select! {
        () = shutdown_signal() => {
            tracing::info!("停止シグナルを受信しました");
            shutdown_tx.send(()).ok();

            match tokio::time::timeout(config.shutdown_grace, &mut server).await {
                Ok(joined) => joined??,
                Err(_) => {
                    tracing::warn!(
                        grace_secs = config.shutdown_grace.as_secs(),
                        "猶予時間内に処理中のリクエストが完了しませんでした"
                    );
                    server.abort();
                }
            }
        }
        joined = &mut server => joined??,
    }

    pool.close().await;
    tracing::info!("Gatehouse API サーバーを停止しました");

    Ok(())
}

/// Redis に接続し、`PING` が通ることを確認する
async fn connect_redis(url: &str) -> anyhow::Result<redis::ConnectionManager> {
    let mut conn = tokio::time::timeout(REDIS_CONNECT_TIMEOUT, redis::create_connection_manager(url))
        .await
        .context("Redis への接続がタイムアウトしました")?
        .context("Redis への接続に失敗しました")?;

    tokio::time::timeout(REDIS_CONNECT_TIMEOUT, redis::ping(&mut conn))
        .await
        .context("Redis の PING がタイムアウトしました")?
        .context("Redis の PING に失敗しました")?;

    Ok(conn)
}

/// SIGINT または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error.message = %e, "SIGINT ハンドラを登録できません");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error.message = %e, "SIGTERM ハンドラを登録できません");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
