// ==========================================
// 仓储绩效奖金系统 - API 层
// ==========================================
// 职责: 请求解析、KPI 限额、参考数据获取,调用计算引擎
// ==========================================

pub mod dto;
pub mod error;
pub mod kpi_limit;
pub mod providers;
pub mod remuneration_api;

// 重导出核心类型
pub use dto::CalculationRequest;
pub use error::{ApiError, ApiResult};
pub use kpi_limit::{KpiLimitOutcome, KpiLimitPolicy, KpiRejectionReason, RejectedKpi};
pub use providers::{ActivityTierProvider, InMemoryReferenceStore, KpiWeightProvider};
pub use remuneration_api::{CalculationOutcome, RemunerationApi};
