// ==========================================
// RadiaTool 散热器规格计算系统 - 引擎层
// ==========================================
// 职责: 数量解析、定价、支架规则、规格单汇总
// 红线: 引擎不读写文件, 不持有选型状态
// ==========================================

pub mod aggregator;
pub mod bracket_rule;
pub mod pricing;
pub mod quantity;

// 重导出核心引擎
pub use aggregator::{DerivationOptions, SpecificationAggregator};
pub use bracket_rule::{BracketRequirement, BracketRule, BracketRuleEngine, FULL_RULES};
pub use pricing::{discounted_price, extended_total, round2};
pub use quantity::{parse_quantity, QuantityParser, QuantityToken};
