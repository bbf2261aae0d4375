//! 用户服务
//!
//! 成员列表与搜索列表演示使用的用户服务。

use std::ops::Deref;

use showcase_shared::Result;

use super::enhanced::{EnhancedMockService, ServiceOptions};
use super::traits::{DataService, ReadonlyDataService};
use crate::models::user::USER_ID_PREFIX;
use crate::models::{Entity, EntityId, User, UserPatch, UserStatus};
use crate::network::NetworkOptions;
use crate::query::{DataResult, EntityResult, QueryOptions, SortSpec};
use crate::store::prefixed_id_generator;
use crate::utils::generate_mock_data;

/// 未提供数据时生成的用户数量
pub const DEFAULT_MOCK_USER_COUNT: usize = 50;

/// 用户服务配置
pub struct UserServiceOptions {
    pub service: ServiceOptions<User>,
    pub mock_user_count: usize,
}

impl Default for UserServiceOptions {
    fn default() -> Self {
        Self {
            service: ServiceOptions::default(),
            mock_user_count: DEFAULT_MOCK_USER_COUNT,
        }
    }
}

/// 用户服务
#[derive(Debug)]
pub struct UserService {
    inner: EnhancedMockService<User>,
}

impl Deref for UserService {
    type Target = EnhancedMockService<User>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new(UserServiceOptions::default())
    }
}

impl UserService {
    /// 初始数据为空时按索引生成 `item-{i}` 用户
    pub fn new(options: UserServiceOptions) -> Self {
        let UserServiceOptions {
            service,
            mock_user_count,
        } = options;

        let initial_data = match service.initial_data {
            Some(data) if !data.is_empty() => data,
            _ => generate_mock_data(mock_user_count, User::indexed),
        };

        let inner = EnhancedMockService::new(ServiceOptions {
            initial_data: Some(initial_data),
            entity_name: Some(
                service
                    .entity_name
                    .unwrap_or_else(|| User::NAME.to_string()),
            ),
            id_generator: Some(
                service
                    .id_generator
                    .unwrap_or_else(|| prefixed_id_generator(USER_ID_PREFIX)),
            ),
            network: service.network,
            searchable_fields: Some(
                service
                    .searchable_fields
                    .unwrap_or_else(|| vec!["name".to_string(), "email".to_string()]),
            ),
        });

        Self { inner }
    }

    /// 按姓名或邮箱搜索，结果按姓名升序
    pub async fn search_users(
        &self,
        term: &str,
        options: &NetworkOptions,
    ) -> Result<DataResult<User>> {
        let query = QueryOptions::new()
            .search(term)
            .sort_by(SortSpec::asc("name"));
        self.inner.query(&query, options).await
    }

    pub async fn find_by_status(
        &self,
        status: UserStatus,
        options: &NetworkOptions,
    ) -> Result<DataResult<User>> {
        let query = QueryOptions::new()
            .filter("status", status.as_str())
            .sort_by(SortSpec::asc("name"));
        self.inner.query(&query, options).await
    }

    /// 邮箱完全匹配，忽略大小写
    pub async fn find_by_email(
        &self,
        email: &str,
        options: &NetworkOptions,
    ) -> Result<EntityResult<User>> {
        let email = email.to_lowercase();
        let found = self
            .inner
            .with_store(options, |store| {
                store
                    .filter(|u| u.email.to_lowercase() == email)
                    .into_iter()
                    .next()
            })
            .await?;
        Ok(found.map_or_else(EntityResult::missing, EntityResult::found))
    }

    pub async fn update_status(
        &self,
        id: &EntityId,
        status: UserStatus,
        options: &NetworkOptions,
    ) -> Result<EntityResult<User>> {
        let patch = UserPatch {
            status: Some(status),
            ..Default::default()
        };
        self.inner.update(id, &patch, options).await
    }

    pub async fn update_avatar(
        &self,
        id: &EntityId,
        avatar: &str,
        options: &NetworkOptions,
    ) -> Result<EntityResult<User>> {
        let patch = UserPatch {
            avatar: Some(avatar.to_string()),
            ..Default::default()
        };
        self.inner.update(id, &patch, options).await
    }

    /// 在线用户数
    pub async fn get_active_users_count(
        &self,
        options: &NetworkOptions,
    ) -> Result<EntityResult<usize>> {
        let count = self
            .inner
            .with_store(options, |store| {
                store.filter(|u| u.status == UserStatus::Active).len()
            })
            .await?;
        Ok(EntityResult::found(count))
    }
}
