//! # パスワード
//!
//! パスワード関連の値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`PlainPassword`] | 平文パスワード | サインアップ・ログイン時の入力値 |
//! | [`PasswordHash`] | パスワードハッシュ | 永続化用のハッシュ値 |
//! | [`PasswordVerifyResult`] | 検証結果 | パスワード検証の成否 |

use crate::DomainError;

/// サインアップ時に要求するパスワードの最小文字数
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// 平文パスワード（入力値）
///
/// ユーザーが入力したパスワードをラップする。永続化もログ出力もしない。
///
/// # セキュリティ
///
/// Debug 出力ではパスワードの値をマスクする。
#[derive(Clone)]
pub struct PlainPassword(String);

impl std::fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
    }
}

impl PlainPassword {
    /// パスワードを作成する
    ///
    /// ログイン時の入力値など、長さを問わない場面で使用する。
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 新規登録用のパスワードを作成する
    ///
    /// 文字数（バイト数ではなく Unicode スカラー値の数）が
    /// [`MIN_PASSWORD_LENGTH`] 未満の場合は `DomainError::Validation` を返す。
    pub fn for_signup(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::Validation(format!(
                "パスワードは{MIN_PASSWORD_LENGTH}文字以上である必要があります"
            )));
        }
        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// パスワードハッシュ（永続化用）
///
/// Argon2id でハッシュ化された PHC 形式の文字列をラップする。
/// 値は比較にのみ使い、復号はしない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// ハッシュ文字列からインスタンスを作成する
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

/// パスワード検証結果
///
/// 不一致はエラーではなく通常の結果として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
    /// パスワードが一致した
    Match,
    /// パスワードが一致しなかった
    Mismatch,
}

impl PasswordVerifyResult {
    /// 一致したかどうかを返す
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }

    /// 一致しなかったかどうかを返す
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch)
    }
}

impl From<bool> for PasswordVerifyResult {
    fn from(matched: bool) -> Self {
        if matched { Self::Match } else { Self::Mismatch }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_平文パスワードのdebug出力はマスクされる() {
        let password = PlainPassword::new("secret-value");
        let debug = format!("{:?}", password);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-value"));
    }

    #[rstest]
    #[case("")]
    #[case("short")]
    #[case("1234567")]
    #[case("ぱすわーど")]
    fn test_8文字未満のパスワードは登録できない(#[case] input: &str) {
        let result = PlainPassword::for_signup(input);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[rstest]
    #[case("12345678")]
    #[case("password123")]
    #[case("ぱすわーどぱすわー")]
    fn test_8文字以上のパスワードは登録できる(#[case] input: &str) {
        let password = PlainPassword::for_signup(input).unwrap();
        assert_eq!(password.as_str(), input);
    }

    #[rstest]
    fn test_文字数はバイト数ではなく文字単位で数える() {
        // 4 文字 = 12 バイト
        assert!(PlainPassword::for_signup("あいうえ").is_err());
    }

    #[rstest]
    fn test_boolからの変換() {
        assert_eq!(
            PasswordVerifyResult::from(true),
            PasswordVerifyResult::Match
        );
        assert_eq!(
            PasswordVerifyResult::from(false),
            PasswordVerifyResult::Mismatch
        );
        assert!(PasswordVerifyResult::Mismatch.is_mismatch());
    }
}
