// ==========================================
// RadiaTool 散热器规格计算系统 - 领域类型定义
// ==========================================
// 职责: 连接方式 / 散热器型号 / 安装方式 / 行类别
// 红线: 标签文本与目录表 sheet 名称保持一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 标准高度（mm），网格的列
pub const STANDARD_HEIGHTS: [u32; 5] = [300, 400, 500, 600, 900];

/// 标准长度下限（mm）
pub const MIN_LENGTH_MM: u32 = 400;
/// 标准长度上限（mm）
pub const MAX_LENGTH_MM: u32 = 2000;
/// 长度步长（mm）
pub const LENGTH_STEP_MM: u32 = 100;

/// 标准长度序列 400..=2000，步长 100，网格的行
pub fn standard_lengths() -> impl Iterator<Item = u32> {
    (MIN_LENGTH_MM..=MAX_LENGTH_MM).step_by(LENGTH_STEP_MM as usize)
}

// ==========================================
// 连接方式 (Connection Family)
// ==========================================
// 排序: VK 系列在前, K 系列在后
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionFamily {
    VkRight, // VK-правое
    VkLeft,  // VK-левое
    KSide,   // K-боковое
}

impl ConnectionFamily {
    pub const ALL: [ConnectionFamily; 3] = [
        ConnectionFamily::VkRight,
        ConnectionFamily::VkLeft,
        ConnectionFamily::KSide,
    ];

    /// 目录表中的标签
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionFamily::VkRight => "VK-правое",
            ConnectionFamily::VkLeft => "VK-левое",
            ConnectionFamily::KSide => "K-боковое",
        }
    }

    /// 由标签解析（大小写不敏感，容忍首尾空白）
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        ConnectionFamily::ALL
            .into_iter()
            .find(|c| c.label().to_lowercase() == normalized)
    }

    /// 排序权重: VK=0, K=1
    pub fn rank(&self) -> u8 {
        match self {
            ConnectionFamily::VkRight | ConnectionFamily::VkLeft => 0,
            ConnectionFamily::KSide => 1,
        }
    }

    /// 短代码（VK / K）
    pub fn short_code(&self) -> &'static str {
        match self {
            ConnectionFamily::VkRight | ConnectionFamily::VkLeft => "VK",
            ConnectionFamily::KSide => "K",
        }
    }

    /// 该连接方式下可选的散热器型号
    ///
    /// VK-левое 只供应 10/11/30/33
    pub fn available_types(&self) -> &'static [RadiatorType] {
        match self {
            ConnectionFamily::VkLeft => &[
                RadiatorType::T10,
                RadiatorType::T11,
                RadiatorType::T30,
                RadiatorType::T33,
            ],
            ConnectionFamily::VkRight | ConnectionFamily::KSide => &RadiatorType::ALL,
        }
    }
}

impl fmt::Display for ConnectionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 散热器型号 (Radiator Type Code)
// ==========================================
// 声明顺序即型号代码升序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RadiatorType {
    T10,
    T11,
    T20,
    T21,
    T22,
    T30,
    T33,
}

impl RadiatorType {
    pub const ALL: [RadiatorType; 7] = [
        RadiatorType::T10,
        RadiatorType::T11,
        RadiatorType::T20,
        RadiatorType::T21,
        RadiatorType::T22,
        RadiatorType::T30,
        RadiatorType::T33,
    ];

    pub fn code(&self) -> u16 {
        match self {
            RadiatorType::T10 => 10,
            RadiatorType::T11 => 11,
            RadiatorType::T20 => 20,
            RadiatorType::T21 => 21,
            RadiatorType::T22 => 22,
            RadiatorType::T30 => 30,
            RadiatorType::T33 => 33,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        RadiatorType::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl fmt::Display for RadiatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for RadiatorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .ok()
            .and_then(RadiatorType::from_code)
            .ok_or_else(|| format!("未知散热器型号: {}", s))
    }
}

// ==========================================
// 安装方式 (Mount Kind)
// ==========================================
// None = 不配支架
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountKind {
    #[default]
    Wall, // Настенные кронштейны
    Floor, // Напольные кронштейны
    None,  // Без кронштейнов
}

impl MountKind {
    /// 界面标签（俄文）
    pub fn label(&self) -> &'static str {
        match self {
            MountKind::Wall => "Настенные кронштейны",
            MountKind::Floor => "Напольные кронштейны",
            MountKind::None => "Без кронштейнов",
        }
    }

    pub fn requires_brackets(&self) -> bool {
        !matches!(self, MountKind::None)
    }
}

impl fmt::Display for MountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountKind::Wall => write!(f, "wall"),
            MountKind::Floor => write!(f, "floor"),
            MountKind::None => write!(f, "none"),
        }
    }
}

impl FromStr for MountKind {
    type Err = String;

    /// 支持英文代码与俄文界面标签
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "wall" | "настенные кронштейны" | "настенные" => Ok(MountKind::Wall),
            "floor" | "напольные кронштейны" | "напольные" => Ok(MountKind::Floor),
            "none" | "без кронштейнов" | "" => Ok(MountKind::None),
            _ => Err(format!("未知安装方式: {}", s)),
        }
    }
}

// ==========================================
// 行类别 (Line Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineCategory {
    Radiator,
    Bracket,
}

impl fmt::Display for LineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineCategory::Radiator => write!(f, "RADIATOR"),
            LineCategory::Bracket => write!(f, "BRACKET"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_label_roundtrip() {
        for conn in ConnectionFamily::ALL {
            assert_eq!(ConnectionFamily::from_label(conn.label()), Some(conn));
        }
        assert_eq!(
            ConnectionFamily::from_label("  vk-ПРАВОЕ "),
            Some(ConnectionFamily::VkRight)
        );
        assert_eq!(ConnectionFamily::from_label("VK"), None);
    }

    #[test]
    fn test_connection_rank_vk_before_k() {
        assert_eq!(ConnectionFamily::VkRight.rank(), 0);
        assert_eq!(ConnectionFamily::VkLeft.rank(), 0);
        assert_eq!(ConnectionFamily::KSide.rank(), 1);
    }

    #[test]
    fn test_vk_left_offers_reduced_types() {
        let types: Vec<u16> = ConnectionFamily::VkLeft
            .available_types()
            .iter()
            .map(|t| t.code())
            .collect();
        assert_eq!(types, vec![10, 11, 30, 33]);
        assert_eq!(ConnectionFamily::KSide.available_types().len(), 7);
    }

    #[test]
    fn test_radiator_type_parse() {
        assert_eq!("22".parse::<RadiatorType>(), Ok(RadiatorType::T22));
        assert!("12".parse::<RadiatorType>().is_err());
        assert!(RadiatorType::T10 < RadiatorType::T33);
    }

    #[test]
    fn test_mount_kind_parse() {
        assert_eq!("wall".parse::<MountKind>(), Ok(MountKind::Wall));
        assert_eq!(
            "Напольные кронштейны".parse::<MountKind>(),
            Ok(MountKind::Floor)
        );
        assert_eq!("NONE".parse::<MountKind>(), Ok(MountKind::None));
        assert!("ceiling".parse::<MountKind>().is_err());
        assert!(!MountKind::None.requires_brackets());
    }

    #[test]
    fn test_standard_lengths() {
        let lengths: Vec<u32> = standard_lengths().collect();
        assert_eq!(lengths.len(), 17);
        assert_eq!(lengths.first(), Some(&400));
        assert_eq!(lengths.last(), Some(&2000));
    }
}
