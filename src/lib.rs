// ==========================================
// 仓储绩效奖金系统 - 核心库
// ==========================================
// 职责: 仓库员工绩效报酬计算（作业量 / 有效任务 + KPI 奖金）
// 分层: domain → engine → api,config / importer 为外围
// 红线: 金额使用十进制定点数,仅在输出边界舍入
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 输入/输出与参考数据
pub mod domain;

// 引擎层 - 纯计算规则
pub mod engine;

// 导入层 - 参考表
pub mod importer;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 请求解析、限额、调用引擎
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    ActivityInput, ActivityMeasurement, ActivityTier, CalculationContext, KpiCredit, KpiWeight,
    ReferenceData, RemunerationBreakdown, Shift, ValidTaskInput,
};

// 引擎
pub use engine::{CalcError, CalcResult, RemunerationCalculator};

// 配置
pub use config::CalculatorConfig;

// API
pub use api::{CalculationOutcome, CalculationRequest, InMemoryReferenceStore, RemunerationApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "仓储绩效奖金系统";
