//! # ヘルスチェック共通型
//!
//! 依存サービスごとの判定結果（[`HealthVerdict`]）と、
//! `/healthz` が返すレスポンス（[`HealthResponse`]）を提供する。
//!
//! レスポンスの形:
//!
//! - 全依存サービスが正常: `{"ok": true}`
//! - いずれかが異常: `{"ok": false, "<依存サービス名>": "down"}`

use serde::{Serialize, Serializer, ser::SerializeMap};

/// 個別の依存サービスの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyStatus {
    Up,
    Down,
}

/// ヘルスチェックの判定結果
///
/// 確認した順に依存サービスの状態を保持する。毎回のチェックで作り直す。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthVerdict {
    checks: Vec<(String, DependencyStatus)>,
}

impl HealthVerdict {
    pub fn new() -> Self {
        Self::default()
    }

    /// 依存サービスの状態を記録する
    pub fn record(&mut self, dependency: impl Into<String>, status: DependencyStatus) {
        self.checks.push((dependency.into(), status));
    }

    /// 全体として正常か
    ///
    /// 記録された依存サービスがすべて `Up` であれば正常。
    pub fn is_healthy(&self) -> bool {
        self.checks
            .iter()
            .all(|(_, status)| *status == DependencyStatus::Up)
    }

    /// 異常だった依存サービス名
    pub fn failed(&self) -> impl Iterator<Item = &str> {
        self.checks
            .iter()
            .filter(|(_, status)| *status == DependencyStatus::Down)
            .map(|(name, _)| name.as_str())
    }

    pub fn checks(&self) -> &[(String, DependencyStatus)] {
        &self.checks
    }
}

/// `/healthz` のレスポンス
///
/// ## 使用例
///
/// ```
/// use gatehouse_shared::health::{DependencyStatus, HealthResponse, HealthVerdict};
///
/// let mut verdict = HealthVerdict::new();
/// verdict.record("database", DependencyStatus::Up);
/// let response = HealthResponse::from(&verdict);
/// assert!(response.ok);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    /// 全体の稼働状態
    pub ok:   bool,
    /// 異常だった依存サービス名
    pub down: Vec<String>,
}

impl From<&HealthVerdict> for HealthResponse {
    fn from(verdict: &HealthVerdict) -> Self {
        Self {
            ok:   verdict.is_healthy(),
            down: verdict.failed().map(str::to_owned).collect(),
        }
    }
}

impl Serialize for HealthResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.down.len()))?;
        map.serialize_entry("ok", &self.ok)?;
        for name in &self.down {
            map.serialize_entry(name, &DependencyStatus::Down)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_全依存サービスが正常ならokのみ() {
        let mut verdict = HealthVerdict::new();
        verdict.record("database", DependencyStatus::Up);
        verdict.record("cache", DependencyStatus::Up);

        let json = serde_json::to_value(HealthResponse::from(&verdict)).unwrap();

        assert_eq!(json, serde_json::json!({ "ok": true }));
    }

    #[test]
    fn test_異常な依存サービスはdownとして出力される() {
        let mut verdict = HealthVerdict::new();
        verdict.record("database", DependencyStatus::Up);
        verdict.record("cache", DependencyStatus::Down);

        let json = serde_json::to_value(HealthResponse::from(&verdict)).unwrap();

        assert_eq!(json, serde_json::json!({ "ok": false, "cache": "down" }));
    }

    #[test]
    fn test_記録がなければ正常() {
        assert!(HealthVerdict::new().is_healthy());
    }

    #[test]
    fn test_記録順が保持される() {
        let mut verdict = HealthVerdict::new();
        verdict.record("database", DependencyStatus::Up);
        verdict.record("cache", DependencyStatus::Down);

        let names: Vec<&str> = verdict.checks().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["database", "cache"]);
    }
}
