//! 存储桶句柄与存储服务抽象。

use crate::constants::BUCKET_NAME;
use crate::error::DeployError;
use async_trait::async_trait;
use std::sync::Arc;

/// 对象存储服务的最小操作集合。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// 在 `bucket` 中创建或覆盖 `key` 对应的对象。
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), DeployError>;

    /// 将对象的访问控制设置为 public-read。
    async fn make_public(&self, bucket: &str, key: &str) -> Result<(), DeployError>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for Arc<T> {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), DeployError> {
        (**self).put_object(bucket, key, body, content_type).await
    }

    async fn make_public(&self, bucket: &str, key: &str) -> Result<(), DeployError> {
        (**self).make_public(bucket, key).await
    }
}

/// 指向单个存储桶的句柄。
///
/// 创建句柄不会访问网络，存储桶不存在时由第一次请求报告错误。
#[derive(Debug)]
pub struct Bucket<S> {
    store: S,
    name: String,
}

impl<S: ObjectStore> Bucket<S> {
    pub fn new(store: S, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), DeployError> {
        self.store
            .put_object(&self.name, key, body, content_type)
            .await
    }

    pub async fn make_public(&self, key: &str) -> Result<(), DeployError> {
        self.store.make_public(&self.name, key).await
    }
}

/// 获取部署目标存储桶的句柄。
///
/// # 参数
///
/// * `store` - 已连接的存储服务。
///
/// # 返回值
///
/// 绑定到 `static.qminderapp.com` 的存储桶句柄。
pub fn resolve_bucket<S: ObjectStore>(store: S) -> Bucket<S> {
    tracing::debug!("Using bucket {}", BUCKET_NAME);
    Bucket::new(store, BUCKET_NAME)
}
