// ==========================================
// RadiaTool 散热器规格计算系统 - 选型 CSV 导入器
// ==========================================
// 职责: (物料号;数量) CSV → Selection
// 规则:
// - 表头可有可无（首行首列为 Артикул / article 时视为表头）
// - 分隔符按首行自动判断 ';' / ','
// - 物料号跨分区解析, 首个命中的分区为准
// - 支架物料号跳过（支架由规则重新派生）
// - 同一物料号多次出现时数量累加
// 红线: 未知物料号只记入报告, 不中断导入
// ==========================================

use crate::catalog::CatalogIndex;
use crate::domain::selection::{Selection, SelectionKey};
use crate::engine::quantity::QuantityParser;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::detect_delimiter;
use csv::ReaderBuilder;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument};

/// 被识别为表头的首列文本（小写比较）
const HEADER_ARTICLE_NAMES: &[&str] = &["артикул", "article"];

/// 选型导入报告
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionImportReport {
    pub rows_read: usize,
    pub cells_imported: usize,
    pub bracket_rows_skipped: usize,
    pub zero_quantity_rows: usize,
    pub unknown_articles: Vec<String>,
}

/// 选型导入结果
#[derive(Debug, Clone)]
pub struct SelectionImport {
    pub selection: Selection,
    pub report: SelectionImportReport,
}

// ==========================================
// SelectionImporter - 选型 CSV 导入器
// ==========================================
pub struct SelectionImporter<'a> {
    catalog: &'a CatalogIndex,
    parser: QuantityParser,
    cleaner: DataCleaner,
}

impl<'a> SelectionImporter<'a> {
    pub fn new(catalog: &'a CatalogIndex) -> Self {
        Self {
            catalog,
            parser: QuantityParser::new(),
            cleaner: DataCleaner,
        }
    }

    /// 从文件导入
    ///
    /// # 参数
    /// - path: CSV 文件路径
    ///
    /// # 返回
    /// - Err(FileNotFound / UnsupportedFormat / CsvParseError)
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn import_file(&self, path: &Path) -> ImportResult<SelectionImport> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let content = std::fs::read_to_string(path)?;
        self.import_str(&content)
    }

    /// 从 CSV 文本导入
    pub fn import_str(&self, content: &str) -> ImportResult<SelectionImport> {
        let content = content.trim_start_matches('\u{feff}');
        let first_line = content.lines().next().unwrap_or_default();

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(detect_delimiter(first_line))
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut report = SelectionImportReport::default();
        let mut quantities: BTreeMap<SelectionKey, u32> = BTreeMap::new();

        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let article = self.cleaner.clean_article(record.get(0).unwrap_or_default());
            let token = record.get(1).unwrap_or_default();

            if article.is_empty() {
                continue;
            }
            if idx == 0 && HEADER_ARTICLE_NAMES.contains(&article.to_lowercase().as_str()) {
                continue;
            }
            report.rows_read += 1;

            if self.catalog.lookup_bracket(&article).is_some() {
                report.bracket_rows_skipped += 1;
                continue;
            }

            let quantity = self.parser.parse_str(token);
            if quantity == 0 {
                report.zero_quantity_rows += 1;
                continue;
            }

            let Some(entry) = self.catalog.find_radiator_any_sheet(&article) else {
                debug!(article = %article, "物料号未在散热器目录中找到");
                if !report.unknown_articles.contains(&article) {
                    report.unknown_articles.push(article);
                }
                continue;
            };

            let slot = quantities
                .entry(SelectionKey::new(entry.sheet_key(), entry.article.clone()))
                .or_insert(0);
            *slot = slot.saturating_add(quantity);
        }

        report.cells_imported = quantities.len();
        let selection: Selection = quantities
            .into_iter()
            .map(|(key, qty)| (key, qty.to_string()))
            .collect();

        info!(
            rows = report.rows_read,
            cells = report.cells_imported,
            unknown = report.unknown_articles.len(),
            "选型导入完成"
        );

        Ok(SelectionImport { selection, report })
    }
}
