// ==========================================
// RadiaTool 散热器规格计算系统 - 核心库
// ==========================================
// 功能: 散热器选型网格 → 带价格的规格单（含支架派生）→ 导出
// 流程: 数量解析 → 目录查询 → 支架规则 → 规格单汇总 → 导出
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "ru");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 目录层 - 只读目录索引
pub mod catalog;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 规格单文档
pub mod export;

// 配置层 - 应用配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ConnectionFamily, LineCategory, MountKind, RadiatorType};

// 领域实体
pub use domain::{
    BracketEntry, CatalogEntry, LineItem, Selection, SheetKey, SpecTotals, Specification,
};

// 引擎
pub use engine::{
    parse_quantity, BracketRuleEngine, DerivationOptions, QuantityParser, SpecificationAggregator,
};

// 目录
pub use catalog::{CatalogIndex, CatalogLoader};

// API
pub use api::{SelectionSession, SpecificationApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "RadiaTool";
