//! 部署脚本中编译期固定的常量。

/// 工作目录中的环境变量文件
pub const DOTENV_FILE: &str = ".env";

/// 目标存储桶名称
pub const BUCKET_NAME: &str = "static.qminderapp.com";

/// 本地构建产物路径
pub const SOURCE_PATH: &str = "dist/qminder-api.min.js";

/// 存储桶中的目标键
pub const DESTINATION_KEY: &str = "api/qminder-api.min.js";

/// 访问密钥 ID 的环境变量名
pub const ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";

/// 秘密访问密钥的环境变量名
pub const SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

/// 可选的区域覆盖
pub const REGION_VAR: &str = "AWS_REGION";

/// `AWS_REGION` 未设置时读取的区域变量
pub const DEFAULT_REGION_VAR: &str = "AWS_DEFAULT_REGION";

/// 可选的 S3 兼容端点
pub const ENDPOINT_URL_VAR: &str = "AWS_ENDPOINT_URL";

/// 未配置区域时使用的默认区域
pub const DEFAULT_REGION: &str = "us-east-1";

/// 未知扩展名时的 Content-Type
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// 缺少凭据时的退出码（等价于 -1）
pub const MISSING_CREDENTIAL_EXIT_CODE: u8 = 255;

/// 其他失败的退出码
pub const FAILURE_EXIT_CODE: u8 = 1;
