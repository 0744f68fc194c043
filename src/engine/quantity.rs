// ==========================================
// RadiaTool 散热器规格计算系统 - 数量解析器
// ==========================================
// 职责: 将用户输入的数量文本归一为非负整数
// 规则:
// - 空 / 空白 → 0
// - 数值 → 四舍五入（远离零）
// - 文本 → 去首尾 '+', 按 '+' 拆分, 各段取整后求和（"3+2" → 5）
// - 任何解析失败 → 0（不向调用方抛错）
// ==========================================

use serde::{Deserialize, Serialize};
use tracing::debug;

/// 数量输入（网格单元格文本或表格数值单元格）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuantityToken {
    Number(f64),
    Text(String),
}

impl From<&str> for QuantityToken {
    fn from(value: &str) -> Self {
        QuantityToken::Text(value.to_string())
    }
}

impl From<String> for QuantityToken {
    fn from(value: String) -> Self {
        QuantityToken::Text(value)
    }
}

impl From<&String> for QuantityToken {
    fn from(value: &String) -> Self {
        QuantityToken::Text(value.clone())
    }
}

impl From<f64> for QuantityToken {
    fn from(value: f64) -> Self {
        QuantityToken::Number(value)
    }
}

impl From<i64> for QuantityToken {
    fn from(value: i64) -> Self {
        QuantityToken::Number(value as f64)
    }
}

impl From<u32> for QuantityToken {
    fn from(value: u32) -> Self {
        QuantityToken::Number(f64::from(value))
    }
}

// ==========================================
// QuantityParser - 数量解析器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantityParser;

impl QuantityParser {
    pub fn new() -> Self {
        Self
    }

    /// 解析数量文本, 失败时返回 0
    pub fn parse(&self, token: &QuantityToken) -> u32 {
        let result = match token {
            QuantityToken::Number(value) => round_number(*value),
            QuantityToken::Text(text) => parse_text(text),
        };

        match result {
            Some(sum) => clamp_to_quantity(sum),
            None => {
                debug!(token = ?token, "数量解析失败, 按 0 处理");
                0
            }
        }
    }

    /// 解析字符串形式的数量
    pub fn parse_str(&self, token: &str) -> u32 {
        self.parse(&QuantityToken::from(token))
    }
}

/// 便捷入口: `parse_quantity("3+2") == 5`
pub fn parse_quantity<T: Into<QuantityToken>>(token: T) -> u32 {
    QuantityParser.parse(&token.into())
}

fn round_number(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    Some(value.round() as i64)
}

fn parse_text(text: &str) -> Option<i64> {
    let body = text
        .trim()
        .trim_start_matches('+')
        .trim_end_matches('+');

    if body.trim().is_empty() {
        return Some(0);
    }

    let mut sum: i64 = 0;
    for part in body.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        let value = part.replace(',', ".").parse::<f64>().ok()?;
        sum = sum.checked_add(round_number(value)?)?;
    }
    Some(sum)
}

/// 负数归零, 超出 u32 上限按上限
fn clamp_to_quantity(sum: i64) -> u32 {
    sum.clamp(0, i64::from(u32::MAX)) as u32
}
