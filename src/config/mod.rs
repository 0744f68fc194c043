// ==========================================
// RadiaTool 散热器规格计算系统 - 配置层
// ==========================================
// 职责: 应用配置定义与分层加载
// 存储: JSON 配置文件 + 环境变量
// ==========================================

pub mod app_config;
pub mod config_manager;

// 重导出核心配置类型
pub use app_config::AppConfig;
pub use config_manager::{env_keys, ConfigError, ConfigManager, ConfigResult};
