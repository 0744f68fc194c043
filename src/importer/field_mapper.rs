// ==========================================
// RadiaTool 散热器规格计算系统 - 字段映射器实现
// ==========================================
// 职责: 目录表列 → 强类型条目
// 列名: Артикул / Наименование / Цена, руб / Мощность, Вт / Вес, кг / Объем, м3
// ==========================================

use crate::domain::catalog::{BracketEntry, CatalogEntry, SheetKey};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;

/// 标准列名
pub mod columns {
    pub const ARTICLE: &str = "Артикул";
    pub const NAME: &str = "Наименование";
    pub const PRICE: &str = "Цена, руб";
    pub const POWER: &str = "Мощность, Вт";
    pub const WEIGHT: &str = "Вес, кг";
    pub const VOLUME: &str = "Объем, м3";
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 映射散热器行
    ///
    /// # 参数
    /// - row: 原始行记录
    /// - sheet: 所属分区（决定连接方式与型号）
    /// - row_number: 行号（用于报错）
    ///
    /// # 返回
    /// - Err(ArticleMissing): 物料号为空
    /// - Err(DimensionParseError): 名称无法解析出高度/长度
    pub fn map_radiator(
        &self,
        row: &HashMap<String, String>,
        sheet: SheetKey,
        row_number: usize,
    ) -> ImportResult<CatalogEntry> {
        let article = self.article(row, row_number)?;
        let name = self.get_string(row, columns::NAME).unwrap_or_default();

        let (height_mm, length_mm) =
            self.cleaner
                .parse_dimensions(&name)
                .ok_or_else(|| ImportError::DimensionParseError {
                    row: row_number,
                    name: name.clone(),
                })?;

        Ok(CatalogEntry {
            article,
            name,
            connection: sheet.connection,
            radiator_type: sheet.radiator_type,
            height_mm,
            length_mm,
            price: self.get_number(row, columns::PRICE),
            power_w: self.get_number(row, columns::POWER),
            weight_kg: self.get_number(row, columns::WEIGHT),
            volume_m3: self.get_number(row, columns::VOLUME),
        })
    }

    /// 映射支架行
    pub fn map_bracket(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<BracketEntry> {
        Ok(BracketEntry {
            article: self.article(row, row_number)?,
            name: self.get_string(row, columns::NAME).unwrap_or_default(),
            price: self.get_number(row, columns::PRICE),
        })
    }

    fn article(&self, row: &HashMap<String, String>, row_number: usize) -> ImportResult<String> {
        self.get_string(row, columns::ARTICLE)
            .map(|a| self.cleaner.clean_article(&a))
            .ok_or(ImportError::ArticleMissing(row_number))
    }

    /// 提取字符串字段, 支持多个可能的列名（别名）
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        let aliases: &[&str] = match key {
            columns::PRICE => &["Цена, руб", "Цена,руб", "Цена, руб (с НДС)"],
            columns::POWER => &["Мощность, Вт", "Мощность,Вт"],
            columns::WEIGHT => &["Вес, кг", "Вес,кг"],
            columns::VOLUME => &["Объем, м3", "Объем,м3", "Объём, м3"],
            _ => &[],
        };

        std::iter::once(key)
            .chain(aliases.iter().copied())
            .find_map(|alias| self.cleaner.normalize_null(row.get(alias).map(String::as_str)))
    }

    fn get_number(&self, row: &HashMap<String, String>, key: &str) -> f64 {
        self.cleaner
            .numeric_or_zero(self.get_string(row, key).as_deref())
    }
}
