// ==========================================
// RadiaTool 散热器规格计算系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读写逻辑, 不含引擎逻辑
// ==========================================

pub mod catalog;
pub mod selection;
pub mod specification;
pub mod types;

// 重导出核心类型
pub use catalog::{BracketEntry, CatalogEntry, SheetKey};
pub use selection::{Selection, SelectionKey};
pub use specification::{LineItem, RadiatorAttributes, SpecTotals, Specification};
pub use types::{
    standard_lengths, ConnectionFamily, LineCategory, MountKind, RadiatorType, STANDARD_HEIGHTS,
};
