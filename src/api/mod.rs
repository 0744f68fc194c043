// ==========================================
// RadiaTool 散热器规格计算系统 - API 层
// ==========================================
// 职责: 会话状态 + 统一业务入口, 供命令行/界面调用
// ==========================================

pub mod error;
pub mod session;
pub mod spec_api;

pub use error::{validate_discount, ApiError, ApiResult};
pub use session::SelectionSession;
pub use spec_api::SpecificationApi;
