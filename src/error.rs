//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// 添加的顶点或边 ID 已存在
    #[error("ID 已存在: {0}")]
    DuplicateId(String),

    /// 边引用了图中不存在的顶点
    #[error("顶点不存在: {0}")]
    MissingVertex(String),

    /// 算法不支持的数值情形（如负权最短路）
    #[error("不支持的操作: {0}")]
    UnsupportedOperation(String),

    /// 输入图不满足算法前置条件（如 SCC 要求全部为有向边）
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 目标顶点没有回溯记录，且不是源点
    #[error("目标不可达: {0}")]
    NotReachable(String),

    #[error("ID 空间已耗尽: {0}")]
    IdSpaceExhausted(String),

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

#[cfg(feature = "cli")]
impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::ImportError(e.to_string())
    }
}
