//! 文件上传模块
//!
//! 把本地文件上传到存储桶，再把对象标记为公开可读。

use crate::constants::{DEFAULT_CONTENT_TYPE, DESTINATION_KEY, SOURCE_PATH};
use crate::error::DeployError;
use crate::s3::bucket::{Bucket, ObjectStore};
use std::path::{Path, PathBuf};

/// 一次上传请求：本地源文件和远端目标键。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub source: PathBuf,
    pub destination: String,
}

impl UploadRequest {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// 部署的构建产物：`dist/qminder-api.min.js` → `api/qminder-api.min.js`。
    pub fn artifact() -> Self {
        Self::new(SOURCE_PATH, DESTINATION_KEY)
    }
}

/// 根据文件扩展名推断 Content-Type。
///
/// # 示例
///
/// ```
/// use qminder_deploy::s3::content_type_for;
/// use std::path::Path;
///
/// assert_eq!(content_type_for(Path::new("index.html")), "text/html");
/// assert_eq!(content_type_for(Path::new("noext")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}

/// 上传文件并设置 public-read。
///
/// 源文件读取失败时不会发出任何请求。ACL 设置失败时不会回滚，
/// 对象内容可能已经写入但仍为私有。
///
/// # 参数
///
/// * `bucket` - 目标存储桶句柄。
/// * `request` - 源路径和目标键。
///
/// # Errors
///
/// 读取源文件、上传或设置 ACL 失败时返回对应的 `DeployError`。
pub async fn upload_file<S: ObjectStore>(
    bucket: &Bucket<S>,
    request: &UploadRequest,
) -> Result<(), DeployError> {
    tracing::info!("Uploading {}", request.source.display());

    let body = tokio::fs::read(&request.source)
        .await
        .map_err(|source| DeployError::SourceNotFound {
            path: request.source.clone(),
            source,
        })?;

    let content_type = content_type_for(&request.source);
    let size = body.len();
    bucket
        .put_object(&request.destination, body, content_type)
        .await?;
    tracing::info!(
        "Uploaded {} bytes to s3://{}/{}",
        size,
        bucket.name(),
        request.destination
    );

    if let Err(err) = bucket.make_public(&request.destination).await {
        tracing::warn!(
            "s3://{}/{} was uploaded but could not be made public",
            bucket.name(),
            request.destination
        );
        return Err(err);
    }
    tracing::info!("Marked s3://{}/{} as public-read", bucket.name(), request.destination);

    Ok(())
}
