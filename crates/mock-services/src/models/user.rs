//! 模拟用户模型
//!
//! 用于成员列表、搜索列表演示的用户数据结构，支持随机生成。

use std::fmt;

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};
use crate::utils::generate_random_id;

/// 用户 ID 前缀
pub const USER_ID_PREFIX: &str = "user_";

/// 模拟用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    pub avatar: String,
}

/// 创建用户的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    pub avatar: String,
}

/// 用户部分更新
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// 用户在线状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Away,
    Offline,
}

impl UserStatus {
    pub const ALL: [UserStatus; 3] = [Self::Active, Self::Away, Self::Offline];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Away => "away",
            Self::Offline => "offline",
        }
    }

    fn random() -> Self {
        Self::ALL[rand::thread_rng().gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 根据种子生成头像地址
pub fn generate_avatar_url(seed: impl fmt::Display) -> String {
    format!("https://i.pravatar.cc/100?u={seed}")
}

impl Entity for User {
    type Draft = UserDraft;

    const NAME: &'static str = "User";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_draft(id: EntityId, draft: UserDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            status: draft.status,
            avatar: draft.avatar,
        }
    }
}

impl Default for UserDraft {
    /// 以随机种子生成的默认用户
    fn default() -> Self {
        let seed = rand::thread_rng().gen_range(0..1000);
        Self {
            name: format!("User {seed}"),
            email: format!("user{seed}@example.com"),
            status: UserStatus::Active,
            avatar: generate_avatar_url(seed),
        }
    }
}

impl User {
    /// 生成随机用户
    ///
    /// 邮箱由姓名派生，域名在两个测试域之间随机选择
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();

        let id = generate_random_id(USER_ID_PREFIX);
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        let domain = if rng.gen_bool(0.5) {
            "example.com"
        } else {
            "testmail.com"
        };

        Self {
            email: format!(
                "{}.{}@{domain}",
                first.to_lowercase().replace(' ', ""),
                last.to_lowercase().replace(' ', "")
            ),
            name: format!("{first} {last}"),
            status: UserStatus::random(),
            avatar: generate_avatar_url(&id),
            id: EntityId::from(id),
        }
    }

    /// 生成按索引编号的确定性用户
    ///
    /// 状态按 active / away / offline 轮换
    pub fn indexed(index: usize) -> Self {
        Self {
            id: EntityId::from(format!("item-{index}")),
            name: format!("User {index}"),
            email: format!("user{index}@example.com"),
            status: UserStatus::ALL[index % UserStatus::ALL.len()],
            avatar: generate_avatar_url(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_random() {
        let user = User::random();

        assert!(user.id.to_string().starts_with(USER_ID_PREFIX));
        assert!(user.name.contains(' '));
        assert!(user.email.contains('@'));
        assert!(user.avatar.ends_with(&user.id.to_string()));
    }

    #[test]
    fn test_user_indexed_rotates_status() {
        assert_eq!(User::indexed(0).status, UserStatus::Active);
        assert_eq!(User::indexed(1).status, UserStatus::Away);
        assert_eq!(User::indexed(2).status, UserStatus::Offline);
        assert_eq!(User::indexed(3).status, UserStatus::Active);
        assert_eq!(User::indexed(7).id, EntityId::from("item-7"));
    }

    #[test]
    fn test_user_status_serialization() {
        let json = serde_json::to_string(&UserStatus::Away).unwrap();
        assert_eq!(json, "\"away\"");
        let status: UserStatus = serde_json::from_str("\"offline\"").unwrap();
        assert_eq!(status, UserStatus::Offline);
    }
}
