// ==========================================
// RadiaTool 散热器规格计算系统 - 目录领域模型
// ==========================================
// 职责: 目录分区键 / 散热器条目 / 支架条目
// 用途: 导入层写入, 引擎层只读
// ==========================================

use crate::domain::types::{ConnectionFamily, RadiatorType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// SheetKey - 目录分区键
// ==========================================
// 文本形式: "<连接方式标签> <型号>", 例如 "VK-правое 10"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SheetKey {
    pub connection: ConnectionFamily,
    pub radiator_type: RadiatorType,
}

impl SheetKey {
    pub fn new(connection: ConnectionFamily, radiator_type: RadiatorType) -> Self {
        Self {
            connection,
            radiator_type,
        }
    }

    /// 全部合法分区（按连接方式可选型号展开）
    pub fn all() -> Vec<SheetKey> {
        ConnectionFamily::ALL
            .into_iter()
            .flat_map(|c| {
                c.available_types()
                    .iter()
                    .map(move |t| SheetKey::new(c, *t))
            })
            .collect()
    }
}

impl fmt::Display for SheetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.connection.label(), self.radiator_type)
    }
}

impl FromStr for SheetKey {
    type Err = String;

    /// 最后一个空白分隔的片段是型号, 其余部分是连接方式标签
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (label, code) = trimmed
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| format!("无法识别的分区名: {}", s))?;

        let connection = ConnectionFamily::from_label(label)
            .ok_or_else(|| format!("未知连接方式: {}", label.trim()))?;
        let radiator_type = code.parse::<RadiatorType>()?;

        Ok(SheetKey::new(connection, radiator_type))
    }
}

// ==========================================
// CatalogEntry - 散热器目录条目
// ==========================================
// 红线: 载入后不可变, 仅由 CatalogIndex 持有
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub article: String, // Артикул（分区内唯一）
    pub name: String,    // Наименование

    // ===== 分区维度（来自 sheet 名称）=====
    pub connection: ConnectionFamily,
    pub radiator_type: RadiatorType,

    // ===== 尺寸（由名称解析）=====
    pub height_mm: u32,
    pub length_mm: u32,

    // ===== 数值字段（缺失/非数值按 0）=====
    pub price: f64,     // Цена, руб
    pub power_w: f64,   // Мощность, Вт
    pub weight_kg: f64, // Вес, кг
    pub volume_m3: f64, // Объем, м3
}

impl CatalogEntry {
    pub fn sheet_key(&self) -> SheetKey {
        SheetKey::new(self.connection, self.radiator_type)
    }
}

// ==========================================
// BracketEntry - 支架目录条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketEntry {
    pub article: String,
    pub name: String,
    pub price: f64,
}
