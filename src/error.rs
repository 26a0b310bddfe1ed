//! taskdeck 统一错误类型定义
//!
//! 使用 `thiserror` 库提供统一的错误处理，支持错误链式传播。

use std::io;
use thiserror::Error;

/// taskdeck 错误类型
#[derive(Debug, Error)]
pub enum TaskError {
    /// I/O 错误（文件读写、目录操作等）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// SQLite 错误（打开数据库、执行语句等）
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// TOML 解析错误
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML 序列化错误
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// 存储错误（通用）
    #[error("Storage error: {0}")]
    Storage(String),

    /// 无效数据（过滤条件字段不在白名单等）
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// taskdeck Result 类型别名
pub type Result<T> = std::result::Result<T, TaskError>;

impl TaskError {
    /// 创建 Storage 错误
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// 创建 InvalidData 错误
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaskError::storage("cannot locate data dir");
        assert_eq!(err.to_string(), "Storage error: cannot locate data dir");

        let err = TaskError::invalid_data("unknown filter field");
        assert_eq!(err.to_string(), "Invalid data: unknown filter field");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let task_err: TaskError = io_err.into();
        assert!(matches!(task_err, TaskError::Io(_)));
    }

    #[test]
    fn test_sqlite_error_conversion() {
        let sql_err = rusqlite::Error::InvalidQuery;
        let task_err: TaskError = sql_err.into();
        assert!(matches!(task_err, TaskError::Sqlite(_)));
    }
}
