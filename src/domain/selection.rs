// ==========================================
// RadiaTool 散热器规格计算系统 - 选型网格快照
// ==========================================
// 职责: (分区键, 物料号) → 原始数量文本
// 红线: 引擎只读取快照, 不修改选型
// ==========================================

use crate::domain::catalog::SheetKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 选型单元格键
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SelectionKey {
    pub sheet: SheetKey,
    pub article: String,
}

impl SelectionKey {
    pub fn new(sheet: SheetKey, article: impl Into<String>) -> Self {
        Self {
            sheet,
            article: article.into(),
        }
    }
}

/// 选型快照
///
/// 每个键至多一个数量文本; 空文本等同于未选
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    cells: BTreeMap<SelectionKey, String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入单元格; 空白文本会清除该单元格
    pub fn set(&mut self, sheet: SheetKey, article: impl Into<String>, token: impl Into<String>) {
        let key = SelectionKey::new(sheet, article.into().trim().to_string());
        let token = token.into();
        if token.trim().is_empty() {
            self.cells.remove(&key);
        } else {
            self.cells.insert(key, token);
        }
    }

    pub fn get(&self, sheet: SheetKey, article: &str) -> Option<&str> {
        self.cells
            .get(&SelectionKey::new(sheet, article.trim()))
            .map(String::as_str)
    }

    pub fn remove(&mut self, sheet: SheetKey, article: &str) -> Option<String> {
        self.cells.remove(&SelectionKey::new(sheet, article.trim()))
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// 按键序遍历（分区键, 物料号）
    pub fn iter(&self) -> impl Iterator<Item = (&SelectionKey, &str)> {
        self.cells.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<(SelectionKey, String)> for Selection {
    fn from_iter<I: IntoIterator<Item = (SelectionKey, String)>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for (key, token) in iter {
            selection.set(key.sheet, key.article, token);
        }
        selection
    }
}
