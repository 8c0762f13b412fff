use crate::store::StoreError;
use thiserror::Error;

/// 服务器启动/运行错误
///
/// HTTP 处理器使用 [`shared::error::AppError`]，这里只覆盖进程级失败。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("无法绑定地址 {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP 服务异常退出: {0}")]
    Serve(#[source] std::io::Error),

    #[error("存储初始化失败: {0}")]
    Store(#[from] StoreError),

    #[error("内部服务器错误: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ServerError>;
