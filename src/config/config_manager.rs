// ==========================================
// RadiaTool 散热器规格计算系统 - 配置管理器
// ==========================================
// 职责: 分层加载配置
// 顺序: 默认值 → JSON 配置文件 → 环境变量（命令行参数由调用方最后覆盖）
// 配置文件: 显式路径, 否则 <系统配置目录>/radiatool/config.json（不存在则跳过）
// ==========================================

use crate::config::app_config::AppConfig;
use crate::domain::types::MountKind;
use crate::logging::LogFormat;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 环境变量名
pub mod env_keys {
    pub const DATA_DIR: &str = "RADIATOOL_DATA_DIR";
    pub const RADIATOR_DISCOUNT: &str = "RADIATOOL_RADIATOR_DISCOUNT";
    pub const BRACKET_DISCOUNT: &str = "RADIATOOL_BRACKET_DISCOUNT";
    pub const MOUNT: &str = "RADIATOOL_MOUNT";
    pub const LOCALE: &str = "RADIATOOL_LOCALE";
    pub const LOG_FORMAT: &str = "RADIATOOL_LOG_FORMAT";
}

pub const CONFIG_DIR_NAME: &str = "radiatool";
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("环境变量 {key} 取值无效: {value}")]
    InvalidEnvValue { key: String, value: String },

    #[error("无效的安装方式: {0}")]
    InvalidMountKind(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    explicit_path: Option<PathBuf>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定配置文件（文件必须存在）
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            explicit_path: Some(path.into()),
        }
    }

    /// 默认配置文件位置
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 加载配置（读取进程环境变量）
    pub fn load(&self) -> ConfigResult<AppConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// 加载配置, 环境变量来源可替换
    ///
    /// # 参数
    /// - env: 环境变量查询函数
    ///
    /// # 返回
    /// - Err(FileRead / Parse): 显式指定的配置文件不可读或格式错误
    /// - Err(InvalidEnvValue / InvalidMountKind): 环境变量取值无效
    pub fn load_with_env<F>(&self, env: F) -> ConfigResult<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match self.config_file() {
            Some(path) => {
                info!(path = %path.display(), "读取配置文件");
                Self::read_file(&path)?
            }
            None => AppConfig::default(),
        };

        Self::apply_env_overrides(&mut config, env)?;
        Ok(config)
    }

    /// 解析应读取的配置文件: 显式路径总是读取; 默认路径仅在存在时读取
    fn config_file(&self) -> Option<PathBuf> {
        match &self.explicit_path {
            Some(path) => Some(path.clone()),
            None => Self::default_config_path().filter(|p| p.is_file()),
        }
    }

    pub fn read_file(path: &Path) -> ConfigResult<AppConfig> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// 环境变量覆盖（空值忽略）
    pub fn apply_env_overrides<F>(config: &mut AppConfig, env: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = get(env_keys::DATA_DIR) {
            debug!(key = env_keys::DATA_DIR, value = %dir, "环境变量覆盖");
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(value) = get(env_keys::RADIATOR_DISCOUNT) {
            config.radiator_discount_pct = parse_pct(env_keys::RADIATOR_DISCOUNT, &value)?;
        }
        if let Some(value) = get(env_keys::BRACKET_DISCOUNT) {
            config.bracket_discount_pct = parse_pct(env_keys::BRACKET_DISCOUNT, &value)?;
        }
        if let Some(value) = get(env_keys::MOUNT) {
            config.mount_kind = value
                .parse::<MountKind>()
                .map_err(|_| ConfigError::InvalidMountKind(value.clone()))?;
        }
        if let Some(value) = get(env_keys::LOCALE) {
            config.locale = value.trim().to_string();
        }
        if let Some(value) = get(env_keys::LOG_FORMAT) {
            config.log_format =
                value
                    .parse::<LogFormat>()
                    .map_err(|_| ConfigError::InvalidEnvValue {
                        key: env_keys::LOG_FORMAT.to_string(),
                        value: value.clone(),
                    })?;
        }

        Ok(())
    }
}

fn parse_pct(key: &str, value: &str) -> ConfigResult<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidEnvValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}
