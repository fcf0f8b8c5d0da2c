//! 部署脚本的配置模块。
//!
//! 该模块负责从环境变量加载凭据和客户端选项。

use crate::constants::{
    ACCESS_KEY_ID_VAR, DEFAULT_REGION_VAR, ENDPOINT_URL_VAR, REGION_VAR, SECRET_ACCESS_KEY_VAR,
};
use crate::error::DeployError;
use std::env;
use std::fmt;
use std::path::Path;

/// 把 `.env` 文件中的变量加载到进程环境。
///
/// 已存在的环境变量不会被覆盖。
///
/// # 参数
///
/// * `path` - `.env` 文件路径。
///
/// # 返回值
///
/// 文件存在且加载成功时返回 `true`，文件不存在或无法解析时返回 `false`。
pub fn load_dotenv(path: &Path) -> bool {
    dotenvy::from_path(path).is_ok()
}

/// 读取进程环境变量，未设置或非 UTF-8 时返回 `None`。
pub fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// 存储服务的访问凭据。
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
}

impl Credentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    /// 使用给定的查找函数读取凭据。
    ///
    /// 先检查访问密钥 ID，再检查秘密访问密钥。
    ///
    /// # 参数
    ///
    /// * `lookup` - 按变量名返回变量值的函数。
    ///
    /// # 返回值
    ///
    /// 两个变量都非空时返回凭据，否则返回第一个缺失的变量名。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DeployError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_key_id = required(&lookup, ACCESS_KEY_ID_VAR)?;
        let secret_access_key = required(&lookup, SECRET_ACCESS_KEY_VAR)?;
        Ok(Self::new(access_key_id, secret_access_key))
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, DeployError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(DeployError::MissingCredential(name)),
    }
}

/// S3 客户端的可选设置。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// S3 兼容服务的端点，设置后强制使用路径风格寻址
    pub endpoint_url: Option<String>,
    /// 区域覆盖，未设置时走默认提供链
    pub region: Option<String>,
}

impl ClientOptions {
    /// 从 `AWS_ENDPOINT_URL` 和 `AWS_REGION`（或 `AWS_DEFAULT_REGION`）读取选项，
    /// 空值视为未设置。
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());
        Self {
            endpoint_url: non_empty(ENDPOINT_URL_VAR),
            region: non_empty(REGION_VAR).or_else(|| non_empty(DEFAULT_REGION_VAR)),
        }
    }
}
