// ==========================================
// RadiaTool 散热器规格计算系统 - 支架规则引擎
// ==========================================
// 职责: (型号, 长度, 高度, 安装方式, 数量) → [(支架物料号, 数量)]
// 规则: 表驱动, 所有区间闭区间
// 红线: 纯函数; 未知 (型号, 高度) 或区间外长度静默跳过, 不报错
// ==========================================

use crate::domain::types::{MountKind, RadiatorType};
use serde::Serialize;
use tracing::trace;

// ==========================================
// 规则表结构
// ==========================================

/// 长度区间 → 每件散热器所需支架数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBand {
    pub min_mm: u32,
    pub max_mm: u32,
    pub per_unit: u32,
}

impl LengthBand {
    pub const fn new(min_mm: u32, max_mm: u32, per_unit: u32) -> Self {
        Self {
            min_mm,
            max_mm,
            per_unit,
        }
    }

    pub fn contains(&self, length_mm: u32) -> bool {
        self.min_mm <= length_mm && length_mm <= self.max_mm
    }
}

/// 主支架物料号来源
#[derive(Debug, Clone, Copy)]
pub enum ArticleSource {
    /// 固定物料号（每个都按同一倍数输出）
    Fixed(&'static [&'static str]),
    /// 按高度查表
    ByHeight(&'static [(u32, &'static str)]),
}

/// 主支架数量倍数
#[derive(Debug, Clone, Copy)]
pub enum Multiplier {
    Constant(u32),
    ByLength(&'static [LengthBand]),
}

impl Multiplier {
    fn per_unit(&self, length_mm: u32) -> u32 {
        match self {
            Multiplier::Constant(n) => *n,
            Multiplier::ByLength(bands) => bands
                .iter()
                .find(|b| b.contains(length_mm))
                .map(|b| b.per_unit)
                .unwrap_or(0),
        }
    }
}

/// 附加支架（长散热器中部加固）
///
/// 仅在主支架物料号命中时生效
#[derive(Debug, Clone, Copy)]
pub struct ExtraBracket {
    pub article: &'static str,
    pub band: LengthBand,
}

/// 单条支架规则
#[derive(Debug, Clone, Copy)]
pub struct BracketRule {
    pub mount: MountKind,
    pub types: &'static [RadiatorType],
    pub articles: ArticleSource,
    pub multiplier: Multiplier,
    pub extra: Option<ExtraBracket>,
}

impl BracketRule {
    fn applies_to(&self, mount: MountKind, radiator_type: RadiatorType) -> bool {
        self.mount == mount && self.types.contains(&radiator_type)
    }
}

// ==========================================
// 支架物料号常量（西里尔字母 К, 与目录一致）
// ==========================================
pub const WALL_LEFT: &str = "К9.2L";
pub const WALL_RIGHT: &str = "К9.2R";
pub const WALL_CENTER: &str = "К9.3-40";
pub const FLOOR_CENTER: &str = "КНС430";

const WALL_PANEL_BY_HEIGHT: &[(u32, &str)] = &[
    (300, "К15.4300"),
    (400, "К15.4400"),
    (500, "К15.4500"),
    (600, "К15.4600"),
    (900, "К15.4900"),
];

const FLOOR_SINGLE_BY_HEIGHT: &[(u32, &str)] = &[
    (300, "КНС450"),
    (400, "КНС450"),
    (500, "КНС470"),
    (600, "КНС470"),
    (900, "КНС4100"),
];

const FLOOR_TYPE21_BY_HEIGHT: &[(u32, &str)] = &[
    (300, "КНС650"),
    (400, "КНС650"),
    (500, "КНС670"),
    (600, "КНС670"),
    (900, "КНС6100"),
];

const FLOOR_MULTI_BY_HEIGHT: &[(u32, &str)] = &[
    (300, "КНС550"),
    (400, "КНС550"),
    (500, "КНС570"),
    (600, "КНС570"),
    (900, "КНС5100"),
];

const LONG_RADIATOR: LengthBand = LengthBand::new(1700, 2000, 1);

const WALL_PANEL_BANDS: &[LengthBand] = &[
    LengthBand::new(400, 1600, 2),
    LengthBand::new(1700, 2000, 3),
];

const FLOOR_BANDS: &[LengthBand] = &[
    LengthBand::new(400, 1000, 2),
    LengthBand::new(1100, 1600, 3),
    LengthBand::new(1700, 2000, 4),
];

/// 完整规则表
pub const FULL_RULES: &[BracketRule] = &[
    // 墙装: 10/11 左右支架各 2, 长型加中部支架
    BracketRule {
        mount: MountKind::Wall,
        types: &[RadiatorType::T10, RadiatorType::T11],
        articles: ArticleSource::Fixed(&[WALL_LEFT, WALL_RIGHT]),
        multiplier: Multiplier::Constant(2),
        extra: Some(ExtraBracket {
            article: WALL_CENTER,
            band: LONG_RADIATOR,
        }),
    },
    // 墙装: 多板型按高度选型
    BracketRule {
        mount: MountKind::Wall,
        types: &[
            RadiatorType::T20,
            RadiatorType::T21,
            RadiatorType::T22,
            RadiatorType::T30,
            RadiatorType::T33,
        ],
        articles: ArticleSource::ByHeight(WALL_PANEL_BY_HEIGHT),
        multiplier: Multiplier::ByLength(WALL_PANEL_BANDS),
        extra: None,
    },
    // 落地: 10/11
    BracketRule {
        mount: MountKind::Floor,
        types: &[RadiatorType::T10, RadiatorType::T11],
        articles: ArticleSource::ByHeight(FLOOR_SINGLE_BY_HEIGHT),
        multiplier: Multiplier::Constant(2),
        extra: Some(ExtraBracket {
            article: FLOOR_CENTER,
            band: LONG_RADIATOR,
        }),
    },
    // 落地: 21 独立表
    BracketRule {
        mount: MountKind::Floor,
        types: &[RadiatorType::T21],
        articles: ArticleSource::ByHeight(FLOOR_TYPE21_BY_HEIGHT),
        multiplier: Multiplier::ByLength(FLOOR_BANDS),
        extra: None,
    },
    // 落地: 20/22/30/33
    BracketRule {
        mount: MountKind::Floor,
        types: &[
            RadiatorType::T20,
            RadiatorType::T22,
            RadiatorType::T30,
            RadiatorType::T33,
        ],
        articles: ArticleSource::ByHeight(FLOOR_MULTI_BY_HEIGHT),
        multiplier: Multiplier::ByLength(FLOOR_BANDS),
        extra: None,
    },
];

// ==========================================
// 规则输出
// ==========================================

/// 支架需求（单个散热器行派生）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketRequirement {
    pub article: &'static str,
    pub quantity: u32,
}

impl BracketRequirement {
    fn new(article: &'static str, quantity: u32) -> Self {
        Self { article, quantity }
    }
}

// ==========================================
// BracketRuleEngine - 支架规则引擎
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct BracketRuleEngine {
    rules: &'static [BracketRule],
}

impl Default for BracketRuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BracketRuleEngine {
    /// 使用完整规则表
    pub fn new() -> Self {
        Self { rules: FULL_RULES }
    }

    /// 使用自定义规则表
    pub fn with_rules(rules: &'static [BracketRule]) -> Self {
        Self { rules }
    }

    /// 派生支架需求
    ///
    /// # 参数
    /// - radiator_type: 散热器型号
    /// - length_mm / height_mm: 散热器尺寸
    /// - mount: 安装方式
    /// - quantity: 散热器数量
    ///
    /// # 返回
    /// 有序的 (支架物料号, 数量) 列表; 无匹配规则时为空
    pub fn derive_brackets(
        &self,
        radiator_type: RadiatorType,
        length_mm: u32,
        height_mm: u32,
        mount: MountKind,
        quantity: u32,
    ) -> Vec<BracketRequirement> {
        if !mount.requires_brackets() || quantity == 0 {
            return Vec::new();
        }

        let Some(rule) = self
            .rules
            .iter()
            .find(|r| r.applies_to(mount, radiator_type))
        else {
            trace!(%radiator_type, %mount, "无匹配支架规则");
            return Vec::new();
        };

        let main_articles: Vec<&'static str> = match rule.articles {
            ArticleSource::Fixed(articles) => articles.to_vec(),
            ArticleSource::ByHeight(table) => table
                .iter()
                .find(|(h, _)| *h == height_mm)
                .map(|(_, article)| vec![*article])
                .unwrap_or_default(),
        };

        if main_articles.is_empty() {
            trace!(%radiator_type, height_mm, "高度无对应支架, 跳过");
            return Vec::new();
        }

        let mut result = Vec::with_capacity(main_articles.len() + 1);

        let per_unit = rule.multiplier.per_unit(length_mm);
        if per_unit > 0 {
            for article in main_articles {
                result.push(BracketRequirement::new(
                    article,
                    per_unit.saturating_mul(quantity),
                ));
            }
        }

        if let Some(extra) = rule.extra {
            if extra.band.contains(length_mm) {
                result.push(BracketRequirement::new(
                    extra.article,
                    extra.band.per_unit.saturating_mul(quantity),
                ));
            }
        }

        result
    }
}
