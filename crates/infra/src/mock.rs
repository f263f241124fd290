//! # テスト用モック
//!
//! ユースケーステストやルーターのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! gatehouse-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use chrono::Utc;
use gatehouse_domain::{
    password::PasswordHash,
    user::{Email, User, UserId},
};

use crate::{error::InfraError, probe::DependencyProbe, repository::UserRepository};

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(
        &self,
        email: &Email,
        password_hash: &PasswordHash,
    ) -> Result<User, InfraError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email() == email) {
            return Err(InfraError::conflict("User", email.as_str()));
        }

        let user = User::new(
            UserId::new(),
            email.clone(),
            password_hash.clone(),
            Utc::now(),
        );
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email() == email)
            .cloned())
    }
}

// ===== MockProbe =====

#[derive(Debug, Clone, Copy)]
enum ProbeBehavior {
    Healthy,
    Failing,
    Hanging(Duration),
}

/// 結果を固定できるプローブ
#[derive(Debug, Clone)]
pub struct MockProbe {
    name:     &'static str,
    behavior: ProbeBehavior,
}

impl MockProbe {
    /// 常に成功する
    pub fn healthy(name: &'static str) -> Self {
        Self {
            name,
            behavior: ProbeBehavior::Healthy,
        }
    }

    /// 常に失敗する
    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            behavior: ProbeBehavior::Failing,
        }
    }

    /// 指定時間応答しない
    pub fn hanging(name: &'static str, delay: Duration) -> Self {
        Self {
            name,
            behavior: ProbeBehavior::Hanging(delay),
        }
    }
}

#[async_trait]
impl DependencyProbe for MockProbe {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn check(&self) -> Result<(), InfraError> {
        match self.behavior {
            ProbeBehavior::Healthy => Ok(()),
            ProbeBehavior::Failing => Err(InfraError::unexpected(format!("{} is down", self.name))),
            ProbeBehavior::Hanging(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        }
    }
}
