// ==========================================
// RadiaTool 散热器规格计算系统 - 目录层
// ==========================================
// 职责: 目录载入（一次）+ 只读索引
// 红线: 索引构建后不可变; 显式初始化, 不使用全局单例
// ==========================================

pub mod error;
pub mod index;
pub mod loader;

// 重导出核心类型
pub use error::{CatalogError, CatalogResult};
pub use index::{CatalogIndex, CatalogIndexBuilder, RadiatorGrid};
pub use loader::{CatalogLoader, LoadReport, LoadedCatalog, BRACKET_SHEET_NAME};
