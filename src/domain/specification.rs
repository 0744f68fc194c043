// ==========================================
// RadiaTool 散热器规格计算系统 - 规格单模型
// ==========================================
// 职责: 规格单行 / 汇总 / 规格单
// 红线: 每次计算产生全新的规格单, 创建后不再修改
// ==========================================

use crate::domain::types::{ConnectionFamily, LineCategory, MountKind, RadiatorType};
use serde::{Deserialize, Serialize};

/// 散热器行专有属性（排序依据）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiatorAttributes {
    pub connection: ConnectionFamily,
    pub radiator_type: RadiatorType,
    pub height_mm: u32,
    pub length_mm: u32,
}

impl RadiatorAttributes {
    /// 排序键: (连接方式权重, 型号, 高度, 长度)
    pub fn sort_key(&self) -> (u8, RadiatorType, u32, u32) {
        (
            self.connection.rank(),
            self.radiator_type,
            self.height_mm,
            self.length_mm,
        )
    }
}

// ==========================================
// LineItem - 规格单行
// ==========================================
// 不变量:
// - discounted_price = round(unit_price × (1 − discount_pct/100), 2)
// - total = round(discounted_price × quantity, 2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub index: usize, // №（从 1 开始, 散热器与支架连续编号）
    pub article: String,
    pub name: String,
    pub unit_price: f64,
    pub discount_pct: f64,
    pub discounted_price: f64,
    pub quantity: u32,
    pub total: f64,
    pub category: LineCategory,
    pub power_w: f64, // 单件功率（支架为 0）
    pub radiator: Option<RadiatorAttributes>,
}

impl LineItem {
    pub fn is_radiator(&self) -> bool {
        self.category == LineCategory::Radiator
    }

    pub fn is_bracket(&self) -> bool {
        self.category == LineCategory::Bracket
    }
}

/// 规格单汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecTotals {
    pub total_sum: f64,
    pub radiator_quantity: u64,
    pub bracket_quantity: u64,
    pub total_power_w: f64,
    pub total_weight_kg: f64,
    pub total_volume_m3: f64,
}

/// 规格单（一次计算的完整结果）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    pub items: Vec<LineItem>,
    pub totals: SpecTotals,
    pub radiator_discount_pct: f64,
    pub bracket_discount_pct: f64,
    pub mount_kind: MountKind,
}

impl Specification {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn radiators(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|i| i.is_radiator())
    }

    pub fn brackets(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|i| i.is_bracket())
    }

    /// 按物料号查找行
    pub fn find(&self, article: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.article == article)
    }
}
