//! 应用配置持久化

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::{ensure_data_dir, taskdeck_dir};
use crate::error::Result;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// 主题配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Auto".to_string(),
        }
    }
}

/// 获取配置文件路径
fn config_path() -> Option<PathBuf> {
    taskdeck_dir().ok().map(|dir| dir.join("config.toml"))
}

/// 加载配置（不存在或解析失败则返回默认值）
pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    if !path.exists() {
        return Config::default();
    }
    fs::read_to_string(&path)
        .ok()
        .and_then(|s| toml::from_str(&s).ok())
        .unwrap_or_default()
}

/// 保存配置
pub fn save_config(config: &Config) -> Result<()> {
    let dir = ensure_data_dir()?;
    let content = toml::to_string_pretty(config)?;
    fs::write(dir.join("config.toml"), content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let config = Config {
            theme: ThemeConfig {
                name: "Dark".to_string(),
            },
        };

        let content = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.theme.name, "Dark");
    }

    #[test]
    fn test_config_defaults_on_missing_fields() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.theme.name, "Auto");
    }
}
