// ==========================================
// RadiaTool 散热器规格计算系统 - 导入层
// ==========================================
// 职责: 外部表格数据读取（目录工作簿、支架表、选型 CSV）
// 支持: Excel (.xlsx/.xls), CSV 文件, CSV 目录
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod selection_importer;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{
    CsvDirectoryParser, CsvParser, ExcelParser, FileParser, RawSheet, UniversalFileParser,
};
pub use selection_importer::{SelectionImport, SelectionImportReport, SelectionImporter};
