// ==========================================
// RadiaTool 散热器规格计算系统 - 导出层
// ==========================================
// 职责: 规格单 → 表格文档 → XLSX / CSV / JSON
// ==========================================

pub mod csv_writer;
pub mod document;
pub mod error;
pub mod formatter;
pub mod xlsx_writer;

pub use csv_writer::{
    minimal_csv, render_json, sheet_to_csv_string, write_document_csv, write_sheet_csv,
    SUGGESTED_FILE_STEM,
};
pub use document::{Cell, DocumentSheet, SpecDocument};
pub use error::{ExportError, ExportResult};
pub use formatter::{SpecFormatter, COLUMN_COUNT, DEFAULT_EXPORT_LOCALE};
pub use xlsx_writer::write_document_xlsx;
