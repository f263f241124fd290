//! # ヘルスチェックユースケース
//!
//! 依存サービスを登録順にプローブし、[`HealthVerdict`] を組み立てる。
//!
//! - 各プローブは期限付きで実行する
//! - 最初に異常を検出した時点で打ち切る
//! - 結果はキャッシュしない（リクエストごとに確認する）

use std::{sync::Arc, time::Duration};

use gatehouse_infra::DependencyProbe;
use gatehouse_shared::{DependencyStatus, HealthVerdict};

/// プローブ 1 件あたりの期限
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// ヘルスチェックユースケース
pub struct HealthCheckUseCase {
    probes:        Vec<Arc<dyn DependencyProbe>>,
    probe_timeout: Duration,
}

impl HealthCheckUseCase {
    /// プローブを確認順に渡して作成する
    pub fn new(probes: Vec<Arc<dyn DependencyProbe>>) -> Self {
        Self {
            probes,
            probe_timeout: PROBE_TIMEOUT,
        }
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// 依存サービスを確認する
    pub async fn check(&self) -> HealthVerdict {
        let mut verdict = HealthVerdict::new();

        for probe in &self.probes {
            let status = match tokio::time::timeout(self.probe_timeout, probe.check()).await {
                Ok(Ok(())) => DependencyStatus::Up,
                Ok(Err(e)) => {
                    tracing::warn!(
                        dependency = probe.name(),
                        error.message = %e,
                        "依存サービスが応答しません"
                    );
                    DependencyStatus::Down
                }
                Err(_) => {
                    tracing::warn!(
                        dependency = probe.name(),
                        timeout_ms = self.probe_timeout.as_millis() as u64,
                        "依存サービスのプローブがタイムアウトしました"
                    );
                    DependencyStatus::Down
                }
            };

            verdict.record(probe.name(), status);
            if status == DependencyStatus::Down {
                break;
            }
        }

        verdict
    }
}

#[cfg(test)]
mod tests {
    use gatehouse_infra::mock::MockProbe;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sut(probes: Vec<MockProbe>) -> HealthCheckUseCase {
        HealthCheckUseCase::new(
            probes
                .into_iter()
                .map(|p| Arc::new(p) as Arc<dyn DependencyProbe>)
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_全プローブが成功すれば正常() {
        let sut = sut(vec![
            MockProbe::healthy("database"),
            MockProbe::healthy("cache"),
        ]);

        let verdict = sut.check().await;

        assert!(verdict.is_healthy());
        assert_eq!(verdict.checks().len(), 2);
    }

    #[tokio::test]
    async fn test_キャッシュの失敗は異常として記録される() {
        let sut = sut(vec![
            MockProbe::healthy("database"),
            MockProbe::failing("cache"),
        ]);

        let verdict = sut.check().await;

        assert!(!verdict.is_healthy());
        assert_eq!(verdict.failed().collect::<Vec<_>>(), vec!["cache"]);
    }

    #[tokio::test]
    async fn test_最初の失敗で打ち切る() {
        let sut = sut(vec![
            MockProbe::failing("database"),
            MockProbe::healthy("cache"),
        ]);

        let verdict = sut.check().await;

        assert_eq!(
            verdict.checks(),
            &[("database".to_string(), DependencyStatus::Down)]
        );
    }

    #[tokio::test]
    async fn test_期限内に応答しないプローブは異常() {
        let sut = sut(vec![
            MockProbe::healthy("database"),
            MockProbe::hanging("cache", Duration::from_secs(10)),
        ])
        .with_probe_timeout(Duration::from_millis(50));

        let verdict = sut.check().await;

        assert_eq!(verdict.failed().collect::<Vec<_>>(), vec!["cache"]);
    }

    #[tokio::test]
    async fn test_プローブがなければ正常() {
        let verdict = sut(vec![]).check().await;
        assert!(verdict.is_healthy());
    }
}
