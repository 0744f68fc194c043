// ==========================================
// RadiaTool 散热器规格计算系统 - 目录错误类型
// ==========================================
// 红线: 目录源文件缺失或无任何散热器数据均不可恢复, 不允许部分目录
// ==========================================

use crate::importer::error::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("散热器目录文件不存在: {0}")]
    MissingRadiatorSource(String),

    #[error("支架目录文件不存在: {0}")]
    MissingBracketSource(String),

    #[error("支架目录无数据表: {0}")]
    EmptyBracketSource(String),

    #[error("散热器目录无可用数据: {0}")]
    EmptyCatalog(String),

    #[error("必需列缺失 (表 {sheet}): {column}")]
    MissingColumn { sheet: String, column: String },

    #[error(transparent)]
    Import(#[from] ImportError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
