// ==========================================
// RadiaTool 散热器规格计算系统 - 价格计算
// ==========================================
// 规则: 金额保留 2 位小数, 四舍五入（远离零）
// 红线: 折扣不做范围校验（负折扣涨价, 超过 100 得负价）
// ==========================================

/// 四舍五入到 2 位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 折后单价 = round(单价 × (1 − 折扣/100), 2)
pub fn discounted_price(unit_price: f64, discount_pct: f64) -> f64 {
    round2(unit_price * (1.0 - discount_pct / 100.0))
}

/// 行金额 = round(折后单价 × 数量, 2)
pub fn extended_total(discounted_price: f64, quantity: u32) -> f64 {
    round2(discounted_price * f64::from(quantity))
}
