// ==========================================
// RadiaTool 散热器规格计算系统 - 规格单汇总引擎
// ==========================================
// 职责: 选型快照 → 带价格、去重、排序的规格单 + 汇总
// 流程:
// 1. 解析数量, 非零单元格在目录中解析为散热器（找不到则跳过）
// 2. 计算散热器折后价与行金额
// 3. 按 (连接方式, 型号, 高度, 长度) 排序并从 1 编号
// 4. 按排序后的散热器派生支架, 同物料号数量累加
// 5. 支架行按当前支架折扣统一定价（对全部累计数量生效）, 编号接续
// 6. 汇总金额、数量、功率、重量、体积
// 红线: 纯计算, 每次调用返回全新结果; 折扣不做范围校验
// ==========================================

use crate::catalog::CatalogIndex;
use crate::domain::catalog::CatalogEntry;
use crate::domain::selection::Selection;
use crate::domain::specification::{LineItem, RadiatorAttributes, SpecTotals, Specification};
use crate::domain::types::{LineCategory, MountKind};
use crate::engine::bracket_rule::BracketRuleEngine;
use crate::engine::pricing::{discounted_price, extended_total, round2};
use crate::engine::quantity::QuantityParser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// 计算参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivationOptions {
    pub radiator_discount_pct: f64,
    pub bracket_discount_pct: f64,
    pub mount_kind: MountKind,
}

impl Default for DerivationOptions {
    fn default() -> Self {
        Self {
            radiator_discount_pct: 0.0,
            bracket_discount_pct: 0.0,
            mount_kind: MountKind::Wall,
        }
    }
}

impl DerivationOptions {
    pub fn new(radiator_discount_pct: f64, bracket_discount_pct: f64, mount_kind: MountKind) -> Self {
        Self {
            radiator_discount_pct,
            bracket_discount_pct,
            mount_kind,
        }
    }
}

/// 支架累加器条目（仅在一次计算内存在）
#[derive(Debug, Clone)]
struct AccumulatedBracket {
    article: String,
    name: String,
    unit_price: f64,
    quantity: u32,
}

/// 支架累加器: 保持首次出现顺序
#[derive(Debug, Default)]
struct BracketAccumulator {
    entries: Vec<AccumulatedBracket>,
    positions: HashMap<String, usize>,
}

impl BracketAccumulator {
    fn add(&mut self, article: &str, name: &str, unit_price: f64, quantity: u32) {
        let key = article.trim();
        match self.positions.get(key) {
            Some(&pos) => {
                let entry = &mut self.entries[pos];
                entry.quantity = entry.quantity.saturating_add(quantity);
            }
            None => {
                self.positions.insert(key.to_string(), self.entries.len());
                self.entries.push(AccumulatedBracket {
                    article: key.to_string(),
                    name: name.to_string(),
                    unit_price,
                    quantity,
                });
            }
        }
    }

    /// 按当前支架折扣输出支架行, 编号从 first_index 开始
    fn flush(self, bracket_discount_pct: f64, first_index: usize) -> Vec<LineItem> {
        self.entries
            .into_iter()
            .enumerate()
            .map(|(offset, b)| {
                let price = discounted_price(b.unit_price, bracket_discount_pct);
                LineItem {
                    index: first_index + offset,
                    article: b.article,
                    name: b.name,
                    unit_price: b.unit_price,
                    discount_pct: bracket_discount_pct,
                    discounted_price: price,
                    quantity: b.quantity,
                    total: extended_total(price, b.quantity),
                    category: LineCategory::Bracket,
                    power_w: 0.0,
                    radiator: None,
                }
            })
            .collect()
    }
}

// ==========================================
// SpecificationAggregator - 规格单汇总引擎
// ==========================================
pub struct SpecificationAggregator<'a> {
    catalog: &'a CatalogIndex,
    rules: BracketRuleEngine,
    parser: QuantityParser,
}

impl<'a> SpecificationAggregator<'a> {
    pub fn new(catalog: &'a CatalogIndex) -> Self {
        Self {
            catalog,
            rules: BracketRuleEngine::new(),
            parser: QuantityParser::new(),
        }
    }

    pub fn with_rules(catalog: &'a CatalogIndex, rules: BracketRuleEngine) -> Self {
        Self {
            catalog,
            rules,
            parser: QuantityParser::new(),
        }
    }

    /// 计算规格单
    ///
    /// # 参数
    /// - selection: 选型快照（只读）
    /// - options: 折扣与安装方式
    ///
    /// # 返回
    /// 新分配的规格单（散热器行在前, 支架行在后, 编号连续）
    #[instrument(skip_all, fields(cells = selection.len(), mount = %options.mount_kind))]
    pub fn derive(&self, selection: &Selection, options: &DerivationOptions) -> Specification {
        // 1-2. 解析并定价散热器
        let mut radiators: Vec<(&CatalogEntry, LineItem)> = Vec::new();
        for (key, token) in selection.iter() {
            let quantity = self.parser.parse_str(token);
            if quantity == 0 {
                continue;
            }

            let Some(entry) = self.catalog.lookup_radiator(key.sheet, &key.article) else {
                debug!(sheet = %key.sheet, article = %key.article, "选型单元格未在目录中找到, 跳过");
                continue;
            };

            radiators.push((entry, radiator_line(entry, quantity, options.radiator_discount_pct)));
        }

        // 3. 排序（稳定排序）并编号
        radiators.sort_by_key(|(_, item)| item.radiator.map(|r| r.sort_key()));
        for (i, (_, item)) in radiators.iter_mut().enumerate() {
            item.index = i + 1;
        }

        // 4. 派生支架并累加
        let mut accumulator = BracketAccumulator::default();
        if options.mount_kind.requires_brackets() {
            for (entry, item) in &radiators {
                let requirements = self.rules.derive_brackets(
                    entry.radiator_type,
                    entry.length_mm,
                    entry.height_mm,
                    options.mount_kind,
                    item.quantity,
                );
                for req in requirements {
                    match self.catalog.lookup_bracket(req.article) {
                        Some(bracket) => accumulator.add(
                            &bracket.article,
                            &bracket.name,
                            bracket.price,
                            req.quantity,
                        ),
                        None => debug!(article = req.article, "支架不在支架目录中, 跳过"),
                    }
                }
            }
        }

        // 5. 支架行
        let first_bracket_index = radiators.len() + 1;
        let mut items: Vec<LineItem> = radiators.into_iter().map(|(_, item)| item).collect();
        items.extend(accumulator.flush(options.bracket_discount_pct, first_bracket_index));

        // 6. 汇总
        let totals = self.compute_totals(&items);

        info!(
            lines = items.len(),
            radiators = totals.radiator_quantity,
            brackets = totals.bracket_quantity,
            total_sum = totals.total_sum,
            "规格单计算完成"
        );

        Specification {
            items,
            totals,
            radiator_discount_pct: options.radiator_discount_pct,
            bracket_discount_pct: options.bracket_discount_pct,
            mount_kind: options.mount_kind,
        }
    }

    /// 汇总: 重量/体积按物料号二次查询目录, 找不到则不计入
    fn compute_totals(&self, items: &[LineItem]) -> SpecTotals {
        let mut totals = SpecTotals::default();

        for item in items {
            totals.total_sum += item.total;
            match item.category {
                LineCategory::Radiator => {
                    let qty = f64::from(item.quantity);
                    totals.radiator_quantity += u64::from(item.quantity);
                    totals.total_power_w += item.power_w * qty;
                    if let Some(entry) = self.catalog.find_radiator_any_sheet(&item.article) {
                        totals.total_weight_kg += entry.weight_kg * qty;
                        totals.total_volume_m3 += entry.volume_m3 * qty;
                    }
                }
                LineCategory::Bracket => {
                    totals.bracket_quantity += u64::from(item.quantity);
                }
            }
        }

        totals.total_sum = round2(totals.total_sum);
        totals
    }
}

fn radiator_line(entry: &CatalogEntry, quantity: u32, discount_pct: f64) -> LineItem {
    let price = discounted_price(entry.price, discount_pct);
    LineItem {
        index: 0,
        article: entry.article.clone(),
        name: entry.name.clone(),
        unit_price: entry.price,
        discount_pct,
        discounted_price: price,
        quantity,
        total: extended_total(price, quantity),
        category: LineCategory::Radiator,
        power_w: entry.power_w,
        radiator: Some(RadiatorAttributes {
            connection: entry.connection,
            radiator_type: entry.radiator_type,
            height_mm: entry.height_mm,
            length_mm: entry.length_mm,
        }),
    }
}
