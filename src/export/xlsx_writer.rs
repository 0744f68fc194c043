// ==========================================
// RadiaTool 散热器规格计算系统 - XLSX 渲染
// ==========================================
// 职责: SpecDocument → 单个 .xlsx 工作簿（每张文档表一张工作表）
// 版式:
// - 首行为表头（加粗）
// - 金额/数值列两位小数格式
// - 只有一个文本单元格的说明行（重量/体积）横向合并至表宽
// ==========================================

use crate::export::document::{Cell, DocumentSheet, SpecDocument};
use crate::export::error::{ExportError, ExportResult};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};
use std::path::Path;
use tracing::info;

/// 数值单元格格式
const NUMBER_FORMAT: &str = "0.00";

/// 名称列宽（字符）
const WIDE_COLUMN: f64 = 48.0;

/// 写出 .xlsx 工作簿
///
/// # 参数
/// - document: 导出文档（至少一张表）
/// - path: 目标文件
pub fn write_document_xlsx(document: &SpecDocument, path: &Path) -> ExportResult<()> {
    if document.sheets.is_empty() {
        return Err(ExportError::EmptySpecification);
    }

    let mut workbook = Workbook::new();
    for sheet in &document.sheets {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, sheet)?;
    }
    workbook.save(path)?;

    info!(sheets = document.sheets.len(), path = %path.display(), "XLSX 导出完成");
    Ok(())
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &DocumentSheet) -> ExportResult<()> {
    worksheet.set_name(sheet.name.as_str())?;

    let header_format = Format::new().set_bold();
    let number_format = Format::new().set_num_format(NUMBER_FORMAT);
    let note_format = Format::new().set_align(FormatAlign::Left);

    let width = sheet.rows.iter().map(Vec::len).max().unwrap_or(0);

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let r = row_number(row_idx);

        if row_idx > 0 && width > 1 && is_note_row(row) {
            if let Some(text) = row[0].as_text() {
                worksheet.merge_range(r, 0, r, column_number(width - 1), text, &note_format)?;
                continue;
            }
        }

        for (col_idx, cell) in row.iter().enumerate() {
            let c = column_number(col_idx);
            match cell {
                Cell::Empty => {}
                Cell::Text(text) if row_idx == 0 => {
                    worksheet.write_string_with_format(r, c, text.as_str(), &header_format)?;
                }
                Cell::Text(text) => {
                    worksheet.write_string(r, c, text.as_str())?;
                }
                Cell::Integer(value) => {
                    worksheet.write_number(r, c, *value as f64)?;
                }
                Cell::Number(value) => {
                    worksheet.write_number_with_format(r, c, *value, &number_format)?;
                }
            }
        }
    }

    // 名称列
    if width > 2 {
        worksheet.set_column_width(2, WIDE_COLUMN)?;
    }
    Ok(())
}

/// 说明行: 仅一个文本单元格
fn is_note_row(row: &[Cell]) -> bool {
    row.len() == 1 && row[0].as_text().is_some()
}

// 超出 Excel 上限的行列号由 rust_xlsxwriter 报 RowColumnLimitError
fn row_number(idx: usize) -> u32 {
    u32::try_from(idx).unwrap_or(u32::MAX)
}

fn column_number(idx: usize) -> u16 {
    u16::try_from(idx).unwrap_or(u16::MAX)
}
