//! # Clock（時刻プロバイダ）
//!
//! アクセストークンの `iat` / `exp` はこの時刻から計算し、検証時の期限切れ判定も
//! 同じ時刻と比較する。署名ライブラリ自身の時刻チェックには頼らない。
//!
//! 本番は [`SystemClock`]、テストは [`FixedClock`] を注入して、
//! 発行から期限切れまでの経過を任意の時点で再現する。

use chrono::{DateTime, Duration, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 実際のシステム時刻を返す実装
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定時刻を返すテスト用実装
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// 指定時間だけ進めた時計を返す
    ///
    /// 発行時の時計から検証時の時計を作るのに使う。
    pub fn advanced_by(self, elapsed: Duration) -> Self {
        Self {
            now: self.now + elapsed,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
