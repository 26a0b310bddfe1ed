pub mod config;
pub mod tasks;

use std::path::PathBuf;

use crate::error::{Result, TaskError};

/// 获取 ~/.taskdeck/ 目录路径
pub fn taskdeck_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".taskdeck"))
        .ok_or_else(|| TaskError::storage("cannot find home directory"))
}

/// 确保数据目录存在，返回其路径
pub fn ensure_data_dir() -> Result<PathBuf> {
    let path = taskdeck_dir()?;
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

/// 默认数据库文件路径: ~/.taskdeck/tasks.db
pub fn default_db_path() -> Result<PathBuf> {
    Ok(ensure_data_dir()?.join("tasks.db"))
}
