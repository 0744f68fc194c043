// ==========================================
// RadiaTool 散热器规格计算系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数值容错 / 名称尺寸解析
// 规则: 非数值的价格、重量、体积、功率一律按 0
// ==========================================

/// 毫米单位后缀
const MM_SUFFIX: &str = "мм";

#[derive(Debug, Clone, Copy, Default)]
pub struct DataCleaner;

impl DataCleaner {
    /// 去除首尾空白
    pub fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// 空白文本 → None
    pub fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 物料号标准化: TRIM; Excel 数值单元格的 "123.0" 还原为 "123"
    pub fn clean_article(&self, value: &str) -> String {
        let trimmed = value.trim();
        match trimmed.strip_suffix(".0") {
            Some(int_part) if !int_part.is_empty() && int_part.bytes().all(|b| b.is_ascii_digit()) => {
                int_part.to_string()
            }
            _ => trimmed.to_string(),
        }
    }

    /// 数值容错解析: 缺失或非数值 → 0
    ///
    /// 接受小数逗号（"5120,50"）及空格千分位（"5 120,50"）
    pub fn numeric_or_zero(&self, value: Option<&str>) -> f64 {
        value
            .map(|v| {
                v.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| if c == ',' { '.' } else { c })
                    .collect::<String>()
            })
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    /// 从名称解析 (高度, 长度)
    ///
    /// 名称约定: `.../<高度>мм/<长度>мм <附注>`, 取按 '/' 拆分后的最后两段,
    /// 去掉 "мм" 后缀及尾部非数字附注
    pub fn parse_dimensions(&self, name: &str) -> Option<(u32, u32)> {
        let parts: Vec<&str> = name.split('/').collect();
        if parts.len() < 2 {
            return None;
        }
        let height = leading_number(parts[parts.len() - 2])?;
        let length = leading_number(parts[parts.len() - 1])?;
        Some((height, length))
    }
}

/// 段首的整数（去掉 "мм" 与其后的附注）
fn leading_number(segment: &str) -> Option<u32> {
    let cleaned = segment.replace(MM_SUFFIX, " ");
    let first = cleaned.split_whitespace().next()?;
    let digits: String = first.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u32>().ok()
}
