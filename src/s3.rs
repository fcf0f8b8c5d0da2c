//! S3模块
//!
//! 该模块负责与存储桶的交互，包括客户端创建、存储桶句柄和文件上传。

// 声明子模块
pub mod bucket;
pub mod client;
pub mod upload;

// 重新导出常用的类型和函数
pub use bucket::{Bucket, ObjectStore, resolve_bucket};
pub use client::{S3Store, connect, connect_with};
pub use upload::{UploadRequest, content_type_for, upload_file};
