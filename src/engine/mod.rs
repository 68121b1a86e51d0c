// ==========================================
// 仓储绩效奖金系统 - 引擎层
// ==========================================
// 职责: 纯计算规则（档位判定、作业汇总、有效任务、KPI 奖金、报酬合成）
// 红线: 引擎无 I/O、无日志、无共享可变状态
//       所有调用方必须经 RemunerationCalculator,不得内联重算
// ==========================================

pub mod activity_value;
pub mod calculator;
pub mod error;
pub mod kpi_bonus;
pub mod productivity;
pub mod rounding;
pub mod valid_task;

// 重导出核心引擎
pub use activity_value::{aggregate_activities, ActivityAggregate, ActivityLine};
pub use calculator::RemunerationCalculator;
pub use error::{CalcError, CalcResult};
pub use kpi_bonus::{aggregate_kpi_bonus, resolve_weight, KpiBonus};
pub use productivity::{classify, Classification};
pub use rounding::{round_output, ACTIVITY_PAYOUT_SHARE, OUTPUT_DECIMALS};
pub use valid_task::{calculate_from_valid_tasks, ValidTaskAggregate};
