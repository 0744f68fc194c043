// ==========================================
// RadiaTool 散热器规格计算系统 - 导出文档模型
// ==========================================
// 职责: 与输出格式无关的表格文档（工作表 → 行 → 单元格）
// 红线: 文档模型不含样式, 渲染器只负责序列化
// ==========================================

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// 单元格
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Text(String),
    Integer(i64),
    Number(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Integer(v) => write!(f, "{}", v),
            // 金额列保留两位小数
            Cell::Number(v) => write!(f, "{:.2}", v),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Integer(i64::from(value))
    }
}

/// 工作表
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl DocumentSheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// 由文本记录构建（外部表格原样复制）
    pub fn from_records(name: impl Into<String>, records: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows: records
                .into_iter()
                .map(|r| r.into_iter().map(Cell::Text).collect())
                .collect(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// 追加空行
    pub fn push_blank(&mut self) {
        self.rows.push(Vec::new());
    }

    pub fn header(&self) -> Option<&[Cell]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 导出文档
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecDocument {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub sheets: Vec<DocumentSheet>,
}

impl SpecDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            generated_at: Utc::now(),
            sheets: Vec::new(),
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&DocumentSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
