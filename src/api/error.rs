// ==========================================
// RadiaTool 散热器规格计算系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 将下层错误转换为面向用户的错误消息
// ==========================================

use crate::catalog::CatalogError;
use crate::export::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("折扣超出范围 [0, 100]: {field}={value}")]
    DiscountOutOfRange { field: &'static str, value: f64 },

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("无可导出的数据")]
    NoData,

    // ==========================================
    // 下层错误
    // ==========================================
    #[error("目录载入失败: {0}")]
    CatalogError(String),

    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Import(inner) => ApiError::from(inner),
            other => ApiError::CatalogError(other.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(path) => ApiError::NotFound(format!("文件 {}", path)),
            ImportError::UnsupportedFormat(ext) => {
                ApiError::InvalidInput(format!("文件格式不支持: {}", ext))
            }
            ImportError::Other(e) => ApiError::Other(e),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::EmptySpecification => ApiError::NoData,
            other => ApiError::ExportError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

/// 折扣范围校验（界面输入范围 0–100; 引擎本身不校验）
pub fn validate_discount(field: &'static str, value: f64) -> ApiResult<f64> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(ApiError::DiscountOutOfRange { field, value })
    }
}
