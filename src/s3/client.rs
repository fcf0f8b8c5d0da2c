//! S3客户端模块
//!
//! 该模块负责使用凭据创建 S3 客户端，并把 SDK 错误归类为 `DeployError`。

use crate::config::{ClientOptions, Credentials};
use crate::constants::DEFAULT_REGION;
use crate::error::DeployError;
use crate::s3::bucket::ObjectStore;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;

/// 凭据提供者名称
const PROVIDER_NAME: &str = "qminder-deploy-environment";

/// 表示权限或认证失败的 S3 错误码
const PERMISSION_ERROR_CODES: &[&str] = &[
    "AccessDenied",
    "AccessControlListNotSupported",
    "AllAccessDisabled",
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
];

/// 基于 `aws-sdk-s3` 的存储服务实现。
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// 使用默认选项创建 S3 会话，区域为 `us-east-1`。
pub async fn connect(credentials: &Credentials) -> S3Store {
    connect_with(credentials, &ClientOptions::default()).await
}

/// 使用凭据和可选设置创建 S3 会话。
///
/// # 参数
///
/// * `credentials` - 访问密钥对。
/// * `options` - 端点和区域覆盖，未设置区域时使用 `us-east-1`。
///
/// # 返回值
///
/// 配置好的 `S3Store`。认证是否有效要到第一次请求时才能知道。
pub async fn connect_with(credentials: &Credentials, options: &ClientOptions) -> S3Store {
    let provider = aws_sdk_s3::config::Credentials::new(
        credentials.access_key_id(),
        credentials.secret_access_key(),
        None,
        None,
        PROVIDER_NAME,
    );

    // 区域只来自 options，不走 SDK 的默认提供链
    let region_provider = RegionProviderChain::first_try(options.region.clone().map(Region::new))
        .or_else(Region::from_static(DEFAULT_REGION));

    let shared_config = aws_config::defaults(BehaviorVersion::latest())
        .credentials_provider(provider)
        .region(region_provider)
        .load()
        .await;

    let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);
    if let Some(endpoint) = &options.endpoint_url {
        tracing::info!("Using custom endpoint {}", endpoint);
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }

    S3Store::new(Client::from_conf(builder.build()))
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), DeployError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|err| classify_sdk_error(bucket, err))?;
        Ok(())
    }

    async fn make_public(&self, bucket: &str, key: &str) -> Result<(), DeployError> {
        self.client
            .put_object_acl()
            .bucket(bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|err| classify_sdk_error(bucket, err))?;
        Ok(())
    }
}

/// 将 SDK 错误归类为部署错误。
///
/// # 参数
///
/// * `bucket` - 请求的存储桶名称，用于 `BucketNotFound`。
/// * `err` - SDK 返回的错误。
pub(crate) fn classify_sdk_error<E>(bucket: &str, err: SdkError<E, HttpResponse>) -> DeployError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let detail = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => DeployError::Connection(detail),
        SdkError::ServiceError(context) => {
            let status = context.raw().status().as_u16();
            let code = context.err().code();
            let message = context.err().message().unwrap_or_default();
            classify_service_error(bucket, status, code, message, detail)
        }
        _ => DeployError::Service(detail),
    }
}

fn classify_service_error(
    bucket: &str,
    status: u16,
    code: Option<&str>,
    message: &str,
    detail: String,
) -> DeployError {
    match code {
        Some("NoSuchBucket") => DeployError::BucketNotFound(bucket.to_string()),
        Some(code) if PERMISSION_ERROR_CODES.contains(&code) => {
            DeployError::PermissionDenied(format!("{code}: {message}"))
        }
        _ if status == 401 || status == 403 => DeployError::PermissionDenied(detail),
        _ => DeployError::Service(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_such_bucket() {
        let err = classify_service_error(
            "static.qminderapp.com",
            404,
            Some("NoSuchBucket"),
            "The specified bucket does not exist",
            String::new(),
        );
        assert!(matches!(err, DeployError::BucketNotFound(ref name) if name == "static.qminderapp.com"));
    }

    #[test]
    fn test_permission_codes() {
        for code in PERMISSION_ERROR_CODES {
            let err = classify_service_error("b", 400, Some(code), "denied", String::new());
            assert!(matches!(err, DeployError::PermissionDenied(_)), "{code}");
        }
    }

    #[test]
    fn test_forbidden_without_code() {
        let err = classify_service_error("b", 403, None, "", "403 Forbidden".into());
        assert!(matches!(err, DeployError::PermissionDenied(ref detail) if detail == "403 Forbidden"));
    }

    #[test]
    fn test_other_service_errors() {
        let err = classify_service_error("b", 500, Some("InternalError"), "oops", "500".into());
        assert!(matches!(err, DeployError::Service(_)));
    }

    fn region_of(store: &S3Store) -> Option<String> {
        store.client().config().region().map(|r| r.as_ref().to_string())
    }

    #[tokio::test]
    async fn test_connect_falls_back_to_us_east_1() {
        let store = connect(&Credentials::new("AKIDEXAMPLE", "secret")).await;
        assert_eq!(region_of(&store).as_deref(), Some("us-east-1"));
    }

    #[tokio::test]
    async fn test_connect_with_options_from_empty_environment() {
        let options = ClientOptions::from_lookup(|_| None);
        assert_eq!(options, ClientOptions::default());

        let store = connect_with(&Credentials::new("AKIDEXAMPLE", "secret"), &options).await;
        assert_eq!(region_of(&store).as_deref(), Some("us-east-1"));
    }

    #[tokio::test]
    async fn test_connect_with_default_region_variable() {
        let options = ClientOptions::from_lookup(|name| {
            (name == "AWS_DEFAULT_REGION").then(|| "ap-south-1".to_string())
        });
        let store = connect_with(&Credentials::new("AKIDEXAMPLE", "secret"), &options).await;
        assert_eq!(region_of(&store).as_deref(), Some("ap-south-1"));
    }

    #[tokio::test]
    async fn test_connect_with_region_override() {
        let credentials = Credentials::new("AKIDEXAMPLE", "secret");
        let options = ClientOptions {
            endpoint_url: None,
            region: Some("eu-north-1".into()),
        };
        let store = connect_with(&credentials, &options).await;
        assert_eq!(region_of(&store).as_deref(), Some("eu-north-1"));
    }
}
