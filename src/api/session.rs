// ==========================================
// RadiaTool 散热器规格计算系统 - 选型会话
// ==========================================
// 职责: 单个用户会话的可变状态（当前分区、选型单元格、折扣、安装方式）
// 红线: 会话之间互不共享; 目录通过 Arc 只读共享
// ==========================================

use crate::domain::catalog::SheetKey;
use crate::domain::selection::Selection;
use crate::domain::types::{ConnectionFamily, MountKind, RadiatorType};
use crate::engine::aggregator::DerivationOptions;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSession {
    current_sheet: SheetKey,
    selection: Selection,
    options: DerivationOptions,
}

impl Default for SelectionSession {
    fn default() -> Self {
        Self::new(DerivationOptions::default())
    }
}

impl SelectionSession {
    /// 新会话: 默认分区 VK-правое 10
    pub fn new(options: DerivationOptions) -> Self {
        Self {
            current_sheet: SheetKey::new(ConnectionFamily::VkRight, RadiatorType::T10),
            selection: Selection::new(),
            options,
        }
    }

    pub fn current_sheet(&self) -> SheetKey {
        self.current_sheet
    }

    pub(crate) fn set_current_sheet(&mut self, sheet: SheetKey) {
        self.current_sheet = sheet;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn replace_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn options(&self) -> DerivationOptions {
        self.options
    }

    pub fn mount_kind(&self) -> MountKind {
        self.options.mount_kind
    }

    pub fn set_mount_kind(&mut self, mount_kind: MountKind) {
        self.options.mount_kind = mount_kind;
    }

    pub(crate) fn set_discounts(&mut self, radiator_pct: f64, bracket_pct: f64) {
        self.options.radiator_discount_pct = radiator_pct;
        self.options.bracket_discount_pct = bracket_pct;
    }

    /// 清空选型（折扣与安装方式保留）
    pub fn reset(&mut self) {
        self.selection.clear();
    }
}
