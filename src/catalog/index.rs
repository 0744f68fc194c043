// ==========================================
// RadiaTool 散热器规格计算系统 - 目录索引
// ==========================================
// 职责: 按物料号 / (高度, 长度) 查询散热器, 按物料号查询支架
// 红线: 构建完成后只读, 可在多个会话间共享 (Arc<CatalogIndex>)
// ==========================================

use crate::domain::catalog::{BracketEntry, CatalogEntry, SheetKey};
use crate::domain::types::{standard_lengths, STANDARD_HEIGHTS};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// 单个分区的索引
#[derive(Debug, Clone, Default)]
struct SheetIndex {
    by_article: HashMap<String, CatalogEntry>,
    by_dimensions: HashMap<(u32, u32), String>,
}

// ==========================================
// CatalogIndex - 目录索引（只读）
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    sheets: BTreeMap<SheetKey, SheetIndex>,
    brackets: HashMap<String, BracketEntry>,
}

impl CatalogIndex {
    pub fn builder() -> CatalogIndexBuilder {
        CatalogIndexBuilder::default()
    }

    /// 由条目列表直接构建（重复物料号保留首条）
    pub fn from_entries(
        radiators: impl IntoIterator<Item = CatalogEntry>,
        brackets: impl IntoIterator<Item = BracketEntry>,
    ) -> Self {
        let mut builder = CatalogIndex::builder();
        for entry in radiators {
            builder.add_radiator(entry);
        }
        for bracket in brackets {
            builder.add_bracket(bracket);
        }
        builder.build()
    }

    /// 按 (分区, 物料号) 查询散热器
    pub fn lookup_radiator(&self, sheet: SheetKey, article: &str) -> Option<&CatalogEntry> {
        self.sheets
            .get(&sheet)
            .and_then(|s| s.by_article.get(article.trim()))
    }

    /// 按物料号查询支架
    pub fn lookup_bracket(&self, article: &str) -> Option<&BracketEntry> {
        self.brackets.get(article.trim())
    }

    /// 按 (分区, 高度, 长度) 查询散热器（选型网格填充使用）
    pub fn radiator_at(&self, sheet: SheetKey, height_mm: u32, length_mm: u32) -> Option<&CatalogEntry> {
        let sheet_index = self.sheets.get(&sheet)?;
        let article = sheet_index.by_dimensions.get(&(height_mm, length_mm))?;
        sheet_index.by_article.get(article)
    }

    /// 跨分区按物料号查询（按分区键顺序, 首个命中）
    pub fn find_radiator_any_sheet(&self, article: &str) -> Option<&CatalogEntry> {
        let article = article.trim();
        self.sheets
            .values()
            .find_map(|s| s.by_article.get(article))
    }

    /// 已载入的分区键（有序）
    pub fn sheet_keys(&self) -> Vec<SheetKey> {
        self.sheets.keys().copied().collect()
    }

    pub fn contains_sheet(&self, sheet: SheetKey) -> bool {
        self.sheets.contains_key(&sheet)
    }

    /// 分区内全部散热器（按高度、长度排序）
    pub fn radiators_in(&self, sheet: SheetKey) -> Vec<&CatalogEntry> {
        let mut entries: Vec<&CatalogEntry> = self
            .sheets
            .get(&sheet)
            .map(|s| s.by_article.values().collect())
            .unwrap_or_default();
        entries.sort_by(|a, b| {
            (a.height_mm, a.length_mm, &a.article).cmp(&(b.height_mm, b.length_mm, &b.article))
        });
        entries
    }

    /// 选型网格: 行 = 标准长度, 列 = 标准高度, 单元格 = 物料号
    pub fn grid(&self, sheet: SheetKey) -> Option<RadiatorGrid> {
        if !self.contains_sheet(sheet) {
            return None;
        }

        let heights = STANDARD_HEIGHTS.to_vec();
        let lengths: Vec<u32> = standard_lengths().collect();
        let cells = lengths
            .iter()
            .map(|&length| {
                heights
                    .iter()
                    .map(|&height| {
                        self.radiator_at(sheet, height, length)
                            .map(|e| e.article.clone())
                    })
                    .collect()
            })
            .collect();

        Some(RadiatorGrid {
            sheet,
            heights,
            lengths,
            cells,
        })
    }

    pub fn radiator_count(&self) -> usize {
        self.sheets.values().map(|s| s.by_article.len()).sum()
    }

    pub fn bracket_count(&self) -> usize {
        self.brackets.len()
    }
}

// ==========================================
// CatalogIndexBuilder - 目录索引构建器
// ==========================================
#[derive(Debug, Default)]
pub struct CatalogIndexBuilder {
    index: CatalogIndex,
}

impl CatalogIndexBuilder {
    /// 添加散热器; 分区内物料号重复时保留首条并返回 false
    pub fn add_radiator(&mut self, entry: CatalogEntry) -> bool {
        let sheet = self.index.sheets.entry(entry.sheet_key()).or_default();
        if sheet.by_article.contains_key(&entry.article) {
            return false;
        }
        sheet
            .by_dimensions
            .entry((entry.height_mm, entry.length_mm))
            .or_insert_with(|| entry.article.clone());
        sheet.by_article.insert(entry.article.clone(), entry);
        true
    }

    /// 添加支架; 物料号重复时保留首条并返回 false
    pub fn add_bracket(&mut self, entry: BracketEntry) -> bool {
        if self.index.brackets.contains_key(&entry.article) {
            return false;
        }
        self.index.brackets.insert(entry.article.clone(), entry);
        true
    }

    /// 登记一个分区（即使没有任何散热器行）
    pub fn add_sheet(&mut self, sheet: SheetKey) {
        self.index.sheets.entry(sheet).or_default();
    }

    pub fn build(self) -> CatalogIndex {
        self.index
    }
}

/// 选型网格
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadiatorGrid {
    pub sheet: SheetKey,
    pub heights: Vec<u32>,
    pub lengths: Vec<u32>,
    /// cells[长度序号][高度序号]
    pub cells: Vec<Vec<Option<String>>>,
}

impl RadiatorGrid {
    pub fn article_at(&self, height_mm: u32, length_mm: u32) -> Option<&str> {
        let col = self.heights.iter().position(|&h| h == height_mm)?;
        let row = self.lengths.iter().position(|&l| l == length_mm)?;
        self.cells[row][col].as_deref()
    }

    /// 已填充单元格数
    pub fn populated(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }
}
