// ==========================================
// 仓储绩效奖金系统 - 领域模型层
// ==========================================
// 职责: 定义计算输入、参考数据、计算结果
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod activity;
pub mod kpi;
pub mod remuneration;
pub mod types;

// 重导出核心类型
pub use activity::{ActivityMeasurement, ActivityTier};
pub use kpi::{KpiCredit, KpiWeight};
pub use remuneration::{
    ActivityInput, CalculationContext, ReferenceData, RemunerationBreakdown, ValidTaskInput,
};
pub use types::Shift;
