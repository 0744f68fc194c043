// ==========================================
// RadiaTool 散热器规格计算系统 - CSV / JSON 渲染
// ==========================================
// 职责: SpecDocument → 分号分隔 CSV / JSON; 规格单 → 精简 (物料号;数量) CSV
// ==========================================

use crate::domain::specification::Specification;
use crate::export::document::{DocumentSheet, SpecDocument};
use crate::export::error::{ExportError, ExportResult};
use csv::WriterBuilder;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// 导出 CSV 分隔符
pub const CSV_DELIMITER: u8 = b';';

/// 建议导出文件名（不含扩展名）
pub const SUGGESTED_FILE_STEM: &str = "Расчёт стоимости";

/// 将单张工作表写为 CSV（行长度不一致时按原样输出）
pub fn write_sheet_csv<W: Write>(sheet: &DocumentSheet, writer: W) -> ExportResult<()> {
    let mut csv_writer = WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .flexible(true)
        .from_writer(writer);

    for row in &sheet.rows {
        if row.is_empty() {
            // 单个空字段会被写成 `""`, 空行写两个空字段
            csv_writer.write_record(["", ""])?;
        } else {
            csv_writer.write_record(row.iter().map(|c| c.to_string()))?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn sheet_to_csv_string(sheet: &DocumentSheet) -> ExportResult<String> {
    let mut buffer = Vec::new();
    write_sheet_csv(sheet, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// 写出整个文档: 第一张表写入 path, 其余表写入 `<stem>_<表名>.csv`
///
/// # 返回
/// 实际写出的文件列表
pub fn write_document_csv(document: &SpecDocument, path: &Path) -> ExportResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(document.sheets.len());

    for (idx, sheet) in document.sheets.iter().enumerate() {
        let target = if idx == 0 {
            path.to_path_buf()
        } else {
            sibling_path(path, &sheet.name)
        };
        let file = fs::File::create(&target)?;
        write_sheet_csv(sheet, file)?;
        written.push(target);
    }

    info!(files = written.len(), path = %path.display(), "CSV 导出完成");
    Ok(written)
}

/// 文档 JSON
pub fn render_json(document: &SpecDocument) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// 精简导出: 每行一个 (物料号;数量), 无表头
///
/// 包含全部明细行（散热器与支架）; 回读时支架行由选型导入跳过并重新推导
pub fn minimal_csv(spec: &Specification) -> ExportResult<String> {
    if spec.is_empty() {
        return Err(ExportError::EmptySpecification);
    }

    let mut csv_writer = WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .from_writer(Vec::new());
    for item in &spec.items {
        csv_writer.write_record([item.article.as_str(), &item.quantity.to_string()])?;
    }

    let buffer = csv_writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn sibling_path(path: &Path, sheet_name: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| SUGGESTED_FILE_STEM.to_string());
    path.with_file_name(format!("{}_{}.csv", stem, sheet_name))
}
