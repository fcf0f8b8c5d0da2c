//! 部署过程中的错误类型。
//!
//! 每种失败模式都是一个显式的变体，入口函数据此选择提示信息和退出码。

use crate::constants::{FAILURE_EXIT_CODE, MISSING_CREDENTIAL_EXIT_CODE};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    /// 必需的环境变量未设置或为空
    #[error("Set {0} environment variable")]
    MissingCredential(&'static str),

    /// 无法连接到存储服务（网络错误或超时）
    #[error("failed to reach storage service: {0}")]
    Connection(String),

    #[error("bucket {0} does not exist")]
    BucketNotFound(String),

    /// 本地源文件不存在或不可读
    #[error("cannot read {}: {source}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 凭据无效或权限不足
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("storage service error: {0}")]
    Service(String),
}

impl DeployError {
    /// 返回该错误对应的进程退出码。
    ///
    /// 缺少凭据时为 255，其余失败为 1。
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    pub(crate) fn exit_status(&self) -> u8 {
        match self {
            DeployError::MissingCredential(_) => MISSING_CREDENTIAL_EXIT_CODE,
            _ => FAILURE_EXIT_CODE,
        }
    }
}
