// ==========================================
// 仓储绩效奖金系统 - 配置层
// ==========================================
// 职责: 计算配置加载（默认值 / 文件 / 环境变量）
// ==========================================

pub mod calculator_config;

// 重导出核心配置
pub use calculator_config::{
    config_keys, CalculatorConfig, ConfigError, ConfigResult, KpiLimitConfig, ReferencePaths,
};
