// ==========================================
// RadiaTool 散热器规格计算系统 - 应用配置
// ==========================================
// 职责: 数据源位置、默认折扣、默认安装方式、语言、日志格式
// 红线: 所有字段均有默认值, 配置文件只需写出要覆盖的项
// ==========================================

use crate::domain::types::MountKind;
use crate::logging::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_MATRIX_FILE: &str = "Матрица.xlsx";
pub const DEFAULT_BRACKETS_FILE: &str = "Кронштейны.xlsx";
pub const DEFAULT_LOCALE: &str = "ru";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub matrix_file: String,
    pub brackets_file: String,
    pub radiator_discount_pct: f64,
    pub bracket_discount_pct: f64,
    pub mount_kind: MountKind,
    pub locale: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            matrix_file: DEFAULT_MATRIX_FILE.to_string(),
            brackets_file: DEFAULT_BRACKETS_FILE.to_string(),
            radiator_discount_pct: 0.0,
            bracket_discount_pct: 0.0,
            mount_kind: MountKind::Wall,
            locale: DEFAULT_LOCALE.to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// 散热器工作簿路径（matrix_file 为绝对路径时直接使用）
    pub fn matrix_path(&self) -> PathBuf {
        self.data_dir.join(&self.matrix_file)
    }

    /// 支架表路径
    pub fn brackets_path(&self) -> PathBuf {
        self.data_dir.join(&self.brackets_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"radiator_discount_pct": 12.5, "mount_kind": "floor"}"#)
                .unwrap();
        assert_eq!(config.radiator_discount_pct, 12.5);
        assert_eq!(config.mount_kind, MountKind::Floor);
        assert_eq!(config.matrix_file, DEFAULT_MATRIX_FILE);
        assert_eq!(config.locale, "ru");
        assert_eq!(config.matrix_path(), PathBuf::from("data").join("Матрица.xlsx"));
    }
}
