//! # パスワードハッシュ
//!
//! Argon2id によるパスワードのハッシュ化と検証を提供する。
//!
//! ハッシュは PHC 文字列形式（`$argon2id$v=19$m=...,t=...,p=...$salt$hash`）で保存する。
//! ソルトはハッシュ化のたびに OS の乱数源から生成するため、同じパスワードでも
//! 毎回異なるハッシュになる。

use argon2::{
    Algorithm,
    Argon2,
    Params,
    PasswordHasher as _,
    PasswordVerifier as _,
    Version,
    password_hash::{PasswordHash as Argon2PasswordHash, SaltString, rand_core::OsRng},
};
use gatehouse_domain::password::{PasswordHash, PasswordVerifyResult, PlainPassword};

use crate::InfraError;

/// メモリコスト（KiB）= 64 MiB
const MEMORY_COST_KIB: u32 = 65536;
/// 反復回数
const ITERATIONS: u32 = 1;
/// 並列度
const PARALLELISM: u32 = 1;

/// パスワードのハッシュ化と検証を担当するトレイト
pub trait PasswordCodec: Send + Sync {
    /// パスワードをハッシュ化する
    ///
    /// # Errors
    ///
    /// - 乱数源やハッシュ計算が失敗した場合
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError>;

    /// パスワードを検証する
    ///
    /// 不一致はエラーではなく [`PasswordVerifyResult::Mismatch`] として返す。
    ///
    /// # Errors
    ///
    /// - 保存されたハッシュが PHC 文字列として不正な場合
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError>;
}

/// Argon2id による実装
///
/// OWASP 推奨パラメータ（RFC 9106）を使用:
/// - Memory: 64 MiB
/// - Iterations: 1
/// - Parallelism: 1
#[derive(Clone)]
pub struct Argon2PasswordCodec {
    argon2: Argon2<'static>,
}

impl Argon2PasswordCodec {
    pub fn new() -> Result<Self, InfraError> {
        let params = Params::new(MEMORY_COST_KIB, ITERATIONS, PARALLELISM, None)
            .map_err(|e| InfraError::unexpected(format!("Argon2 パラメータが不正です: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordCodec for Argon2PasswordCodec {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_str().as_bytes(), &salt)
            .map_err(|e| InfraError::unexpected(format!("ハッシュ化に失敗しました: {e}")))?;

        Ok(PasswordHash::new(hash.to_string()))
    }

    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        let parsed = Argon2PasswordHash::new(hash.as_str())
            .map_err(|e| InfraError::unexpected(format!("不正なハッシュ形式: {e}")))?;

        let matched = self
            .argon2
            .verify_password(password.as_str().as_bytes(), &parsed)
            .is_ok();

        Ok(PasswordVerifyResult::from(matched))
    }
}
