//! 构建产物部署库
//!
//! 把 `dist/qminder-api.min.js` 上传到 `static.qminderapp.com` 存储桶，
//! 并将其设置为公开可读。流程严格按顺序执行：
//! - 从环境变量读取凭据
//! - 创建 S3 会话
//! - 获取存储桶句柄
//! - 上传文件并设置 public-read

pub mod config;
pub mod constants;
pub mod error;
pub mod s3;

pub use config::{ClientOptions, Credentials};
pub use error::DeployError;
pub use s3::{Bucket, ObjectStore, UploadRequest};

use std::future::Future;

/// 执行一次完整的部署。
///
/// 凭据缺失时直接返回错误，不会调用 `connect`。
///
/// # 参数
///
/// * `lookup` - 按名称读取环境变量的函数。
/// * `request` - 要上传的文件和目标键。
/// * `connect` - 根据凭据创建存储服务会话。
///
/// # Returns
///
/// 成功时返回 `Ok(())`，否则返回描述失败原因的 `DeployError`。
pub async fn deploy<L, C, Fut, S>(
    lookup: L,
    request: &UploadRequest,
    connect: C,
) -> Result<(), DeployError>
where
    L: Fn(&str) -> Option<String>,
    C: FnOnce(Credentials) -> Fut,
    Fut: Future<Output = S>,
    S: ObjectStore,
{
    let credentials = Credentials::from_lookup(lookup)?;
    let store = connect(credentials).await;
    let bucket = s3::resolve_bucket(store);
    s3::upload_file(&bucket, request).await
}
