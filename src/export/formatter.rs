// ==========================================
// RadiaTool 散热器规格计算系统 - 规格单导出格式化
// ==========================================
// 职责: Specification → SpecDocument
// 版式（主表）:
// - 9 列: №, 物料号, 名称, 功率（支架留空）, 单价, 折扣%, 折后单价, 数量, 金额
// - 合计行: 文本 "散热器数量/支架数量" + 总金额
// - 空行后两行说明: 总重量（1 位小数）与总体积（3 位小数）
// - 对照表（若提供）原样复制为第二张表
// 红线: 表头与说明文字全部走 i18n, 按格式化器自身的 locale 取值
// ==========================================

use crate::domain::specification::{LineItem, Specification};
use crate::export::document::{Cell, DocumentSheet, SpecDocument};
use crate::export::error::{ExportError, ExportResult};
use crate::i18n;

/// 默认导出语言
pub const DEFAULT_EXPORT_LOCALE: &str = "ru";

/// 表头键（按列顺序）
const HEADER_KEYS: [&str; 9] = [
    "export.header.index",
    "export.header.article",
    "export.header.name",
    "export.header.power",
    "export.header.price",
    "export.header.discount",
    "export.header.discounted_price",
    "export.header.quantity",
    "export.header.total",
];

pub const COLUMN_COUNT: usize = HEADER_KEYS.len();

// ==========================================
// SpecFormatter - 规格单导出格式化器
// ==========================================
#[derive(Debug, Clone)]
pub struct SpecFormatter {
    locale: String,
}

impl Default for SpecFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_EXPORT_LOCALE)
    }
}

impl SpecFormatter {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// 生成导出文档
    ///
    /// # 参数
    /// - spec: 规格单
    /// - correspondence: 对照表（可选, 原样复制）
    ///
    /// # 返回
    /// - Err(EmptySpecification): 规格单无任何行
    pub fn format(
        &self,
        spec: &Specification,
        correspondence: Option<&DocumentSheet>,
    ) -> ExportResult<SpecDocument> {
        if spec.is_empty() {
            return Err(ExportError::EmptySpecification);
        }

        let mut document = SpecDocument::new(self.label("export.title"));
        document.sheets.push(self.specification_sheet(spec));

        if let Some(sheet) = correspondence.filter(|s| !s.is_empty()) {
            let mut copy = sheet.clone();
            copy.name = self.label("export.sheet.correspondence");
            document.sheets.push(copy);
        }

        Ok(document)
    }

    /// 本地化表头
    pub fn headers(&self) -> Vec<String> {
        HEADER_KEYS.iter().map(|key| self.label(key)).collect()
    }

    /// 主表: 表头 + 明细 + 合计 + 空行 + 重量/体积说明
    pub fn specification_sheet(&self, spec: &Specification) -> DocumentSheet {
        let mut sheet = DocumentSheet::new(self.label("export.sheet.specification"));
        sheet.push_row(self.headers().into_iter().map(Cell::Text).collect());

        for item in &spec.items {
            sheet.push_row(line_row(item));
        }

        let totals = &spec.totals;
        let mut totals_row = vec![Cell::Empty; COLUMN_COUNT];
        totals_row[0] = Cell::text(self.label("export.totals"));
        totals_row[7] = Cell::text(format!(
            "{}/{}",
            totals.radiator_quantity, totals.bracket_quantity
        ));
        totals_row[8] = Cell::Number(totals.total_sum);
        sheet.push_row(totals_row);

        sheet.push_blank();
        sheet.push_row(vec![Cell::text(self.weight_line(totals.total_weight_kg))]);
        sheet.push_row(vec![Cell::text(self.volume_line(totals.total_volume_m3))]);

        sheet
    }

    pub fn weight_line(&self, weight_kg: f64) -> String {
        i18n::t_in_with_args(
            &self.locale,
            "export.weight_line",
            &[("weight", &format!("{:.1}", weight_kg))],
        )
    }

    pub fn volume_line(&self, volume_m3: f64) -> String {
        i18n::t_in_with_args(
            &self.locale,
            "export.volume_line",
            &[("volume", &format!("{:.3}", volume_m3))],
        )
    }

    fn label(&self, key: &str) -> String {
        i18n::t_in(&self.locale, key)
    }
}

fn line_row(item: &LineItem) -> Vec<Cell> {
    let power = if item.is_bracket() {
        Cell::Empty
    } else {
        Cell::Number(item.power_w)
    };

    vec![
        Cell::Integer(item.index as i64),
        Cell::text(item.article.clone()),
        Cell::text(item.name.clone()),
        power,
        Cell::Number(item.unit_price),
        Cell::Number(item.discount_pct),
        Cell::Number(item.discounted_price),
        Cell::from(item.quantity),
        Cell::Number(item.total),
    ]
}
