// ==========================================
// RadiaTool 散热器规格计算系统 - 目录载入器
// ==========================================
// 职责: 表格数据源 → CatalogIndex
// 流程:
// 1. 校验两个源文件存在（缺失即致命错误）, 无任何散热器行同样致命
// 2. 解析散热器工作簿（每个分区一张表）与支架表
// 3. 字段映射 + 清洗, 无法识别的表/行跳过并计入报告
// 4. 构建只读索引
// ==========================================

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::index::CatalogIndex;
use crate::domain::catalog::SheetKey;
use crate::importer::field_mapper::{columns, FieldMapper};
use crate::importer::file_parser::{RawSheet, UniversalFileParser};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// 散热器工作簿内与支架同名的表, 载入时忽略
pub const BRACKET_SHEET_NAME: &str = "Кронштейны";

/// 载入报告
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub sheets_loaded: usize,
    pub sheets_ignored: Vec<String>,
    pub radiators_loaded: usize,
    pub radiator_rows_skipped: usize,
    pub brackets_loaded: usize,
    pub bracket_rows_skipped: usize,
}

/// 载入结果
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub index: CatalogIndex,
    pub report: LoadReport,
}

// ==========================================
// CatalogLoader - 目录载入器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogLoader {
    mapper: FieldMapper,
    parser: UniversalFileParser,
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从文件载入目录
    ///
    /// # 参数
    /// - matrix_path: 散热器工作簿（.xlsx/.xls）或 CSV 目录
    /// - brackets_path: 支架表（.xlsx/.xls/.csv, 读取第一张表）
    ///
    /// # 返回
    /// - Err(MissingRadiatorSource / MissingBracketSource): 源文件缺失
    #[instrument(skip_all, fields(matrix = %matrix_path.display(), brackets = %brackets_path.display()))]
    pub fn load_from_paths(
        &self,
        matrix_path: &Path,
        brackets_path: &Path,
    ) -> CatalogResult<LoadedCatalog> {
        if !matrix_path.exists() {
            return Err(CatalogError::MissingRadiatorSource(
                matrix_path.display().to_string(),
            ));
        }
        if !brackets_path.exists() {
            return Err(CatalogError::MissingBracketSource(
                brackets_path.display().to_string(),
            ));
        }

        let radiator_sheets = self.parser.parse(matrix_path)?;
        let bracket_sheets = self.parser.parse(brackets_path)?;
        let bracket_sheet = bracket_sheets.into_iter().next().ok_or_else(|| {
            CatalogError::EmptyBracketSource(brackets_path.display().to_string())
        })?;

        self.load_from_tables(&radiator_sheets, &bracket_sheet)
    }

    /// 从内存表格载入目录
    pub fn load_from_tables(
        &self,
        radiator_sheets: &[RawSheet],
        bracket_sheet: &RawSheet,
    ) -> CatalogResult<LoadedCatalog> {
        let mut report = LoadReport::default();
        let mut builder = CatalogIndex::builder();

        for sheet in radiator_sheets {
            let name = sheet.name.trim();
            if name == BRACKET_SHEET_NAME {
                report.sheets_ignored.push(sheet.name.clone());
                continue;
            }

            let sheet_key = match name.parse::<SheetKey>() {
                Ok(key) => key,
                Err(reason) => {
                    warn!(sheet = %sheet.name, %reason, "无法识别的工作表, 跳过");
                    report.sheets_ignored.push(sheet.name.clone());
                    continue;
                }
            };

            if !sheet.rows.is_empty() && !sheet.has_column(columns::ARTICLE) {
                return Err(CatalogError::MissingColumn {
                    sheet: sheet.name.clone(),
                    column: columns::ARTICLE.to_string(),
                });
            }

            builder.add_sheet(sheet_key);
            report.sheets_loaded += 1;

            for (idx, row) in sheet.rows.iter().enumerate() {
                // 表头占第 1 行
                let row_number = idx + 2;
                match self.mapper.map_radiator(row, sheet_key, row_number) {
                    Ok(entry) => {
                        if builder.add_radiator(entry) {
                            report.radiators_loaded += 1;
                        } else {
                            debug!(sheet = %sheet_key, row_number, "物料号重复, 保留首条");
                            report.radiator_rows_skipped += 1;
                        }
                    }
                    Err(e) => {
                        warn!(sheet = %sheet_key, error = %e, "散热器行跳过");
                        report.radiator_rows_skipped += 1;
                    }
                }
            }
        }

        if report.radiators_loaded == 0 {
            return Err(CatalogError::EmptyCatalog(format!(
                "识别的分区 {} 个, 忽略的表 {} 个",
                report.sheets_loaded,
                report.sheets_ignored.len()
            )));
        }

        if !bracket_sheet.rows.is_empty() && !bracket_sheet.has_column(columns::ARTICLE) {
            return Err(CatalogError::MissingColumn {
                sheet: bracket_sheet.name.clone(),
                column: columns::ARTICLE.to_string(),
            });
        }

        for (idx, row) in bracket_sheet.rows.iter().enumerate() {
            match self.mapper.map_bracket(row, idx + 2) {
                Ok(entry) => {
                    if builder.add_bracket(entry) {
                        report.brackets_loaded += 1;
                    } else {
                        report.bracket_rows_skipped += 1;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "支架行跳过");
                    report.bracket_rows_skipped += 1;
                }
            }
        }

        let index = builder.build();
        info!(
            sheets = report.sheets_loaded,
            radiators = report.radiators_loaded,
            brackets = report.brackets_loaded,
            skipped = report.radiator_rows_skipped + report.bracket_rows_skipped,
            "目录载入完成"
        );

        Ok(LoadedCatalog { index, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIATOR_HEADERS: &[&str] = &[
        "Артикул",
        "Наименование",
        "Цена, руб",
        "Мощность, Вт",
        "Вес, кг",
        "Объем, м3",
    ];

    fn bracket_sheet() -> RawSheet {
        RawSheet::from_rows(
            "Лист1",
            &["Артикул", "Наименование", "Цена, руб"],
            &[
                vec!["К9.2L", "Кронштейн левый", "85"],
                vec!["К9.2R", "Кронштейн правый", "85"],
                vec!["", "пустая строка", "1"],
            ],
        )
    }

    #[test]
    fn test_load_from_tables_skips_unknown_sheets_and_bad_rows() {
        let sheets = vec![
            RawSheet::from_rows(
                "VK-правое 10",
                RADIATOR_HEADERS,
                &[
                    vec!["A1", "Радиатор VK 10/300мм/600мм", "1000", "500", "8", "0.01"],
                    vec!["A2", "Радиатор без размеров", "1000", "500", "8", "0.01"],
                ],
            ),
            RawSheet::from_rows("Кронштейны", &["Артикул"], &[vec!["К9.2L"]]),
            RawSheet::from_rows("Сводка", &["Артикул"], &[vec!["x"]]),
        ];

        let loaded = CatalogLoader::new()
            .load_from_tables(&sheets, &bracket_sheet())
            .unwrap();

        assert_eq!(loaded.report.sheets_loaded, 1);
        assert_eq!(loaded.report.sheets_ignored, vec!["Кронштейны", "Сводка"]);
        assert_eq!(loaded.report.radiators_loaded, 1);
        assert_eq!(loaded.report.radiator_rows_skipped, 1);
        assert_eq!(loaded.report.brackets_loaded, 2);
        assert_eq!(loaded.report.bracket_rows_skipped, 1);
        assert!(loaded.index.lookup_bracket("К9.2R").is_some());
    }

    #[test]
    fn test_missing_article_column_is_fatal() {
        let sheets = vec![RawSheet::from_rows(
            "VK-правое 10",
            &["Код", "Наименование"],
            &[vec!["A1", "Радиатор/300/600"]],
        )];
        let result = CatalogLoader::new().load_from_tables(&sheets, &bracket_sheet());
        assert!(matches!(result, Err(CatalogError::MissingColumn { .. })));
    }

    #[test]
    fn test_catalog_without_radiators_is_fatal() {
        let sheets = vec![
            RawSheet::from_rows("Сводка", &["Артикул"], &[vec!["x"]]),
            RawSheet::from_rows("VK-правое 10", RADIATOR_HEADERS, &[]),
        ];
        let result = CatalogLoader::new().load_from_tables(&sheets, &bracket_sheet());
        assert!(matches!(result, Err(CatalogError::EmptyCatalog(_))));
    }

    #[test]
    fn test_missing_files_are_fatal() {
        let loader = CatalogLoader::new();
        let result = loader.load_from_paths(
            Path::new("/nonexistent/Матрица.xlsx"),
            Path::new("/nonexistent/Кронштейны.xlsx"),
        );
        assert!(matches!(result, Err(CatalogError::MissingRadiatorSource(_))));
    }
}
