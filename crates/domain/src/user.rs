//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: UserId は UUID をラップし、型安全性を確保
//! - **正規化**: メールアドレスは前後の空白を除去し小文字化してから比較・保存する
//! - **不変性**: ユーザーはサインアップ時に一度だけ作成され、以後変更しない
//!
//! ## 使用例
//!
//! ```rust
//! use gatehouse_domain::{
//!     password::PasswordHash,
//!     user::{Email, User, UserId},
//! };
//!
//! let user = User::new(
//!     UserId::new(),
//!     Email::normalized("user@example.com").unwrap(),
//!     PasswordHash::new("$argon2id$v=19$..."),
//!     chrono::Utc::now(),
//! );
//! assert_eq!(user.email().as_str(), "user@example.com");
//! ```

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DomainError, password::PasswordHash};

/// ユーザー ID（一意識別子）
///
/// UUID v7 を使用し、生成順にソート可能。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct UserId(Uuid);

impl UserId {
    /// 新しいユーザー ID を生成する
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 既存の UUID からユーザー ID を作成する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部の UUID 参照を取得する
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// 正規化済みメールアドレス（値オブジェクト）
///
/// 前後の空白を除去し、小文字化した形で保持する。
/// 大文字小文字や空白だけが異なる入力は同一のアドレスとして扱われる。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct Email(String);

impl Email {
    /// 入力値を正規化してメールアドレスを作成する
    ///
    /// 正規化後に空文字列であれば `DomainError::Validation` を返す。
    /// 形式（`@` の有無など）は問わない。
    pub fn normalized(raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim().to_lowercase();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 保存済みの値から復元する
    ///
    /// 永続化層が正規化済みの値だけを保存している前提で、再検証は行わない。
    pub fn from_stored(value: String) -> Self {
        Self(value)
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

/// ユーザーエンティティ
///
/// # 不変条件
///
/// - `email` は全ユーザーで一意（リポジトリの一意制約で保証）
/// - 作成後は変更されない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:            UserId,
    email:         Email,
    password_hash: PasswordHash,
    created_at:    DateTime<Utc>,
}

impl User {
    /// 新しいユーザーを作成する
    pub fn new(
        id: UserId,
        email: Email,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("user@example.com", "user@example.com")]
    #[case("  User@Example.COM  ", "user@example.com")]
    #[case("\tALICE@example.org\n", "alice@example.org")]
    #[case(" Alice ", "alice")]
    fn test_メールアドレスは正規化される(#[case] input: &str, #[case] expected: &str) {
        let email = Email::normalized(input).unwrap();
        assert_eq!(email.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_空のメールアドレスはエラー(#[case] input: &str) {
        let result = Email::normalized(input);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[rstest]
    #[case("no-at-sign")]
    #[case("@example.com")]
    #[case("user@")]
    fn test_空でなければ形式を問わず受け付ける(#[case] input: &str) {
        let email = Email::normalized(input).unwrap();
        assert_eq!(email.as_str(), input);
    }

    #[rstest]
    fn test_大文字小文字と空白だけが異なるアドレスは等しい() {
        let a = Email::normalized("Bob@Example.com").unwrap();
        let b = Email::normalized("  bob@example.COM ").unwrap();
        assert_eq!(a, b);
    }

    #[rstest]
    fn test_ユーザーidは生成ごとに異なる() {
        assert_ne!(UserId::new(), UserId::new());
    }

    #[rstest]
    fn test_ユーザーの各フィールドを取得できる() {
        let id = UserId::new();
        let now = Utc::now();
        let user = User::new(
            id.clone(),
            Email::normalized("carol@example.com").unwrap(),
            PasswordHash::new("hash"),
            now,
        );

        assert_eq!(user.id(), &id);
        assert_eq!(user.email().as_str(), "carol@example.com");
        assert_eq!(user.password_hash().as_str(), "hash");
        assert_eq!(user.created_at(), now);
    }
}
