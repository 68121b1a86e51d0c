// ==========================================
// 仓储绩效奖金系统 - 参考表导入层
// ==========================================
// 职责: 读取档位表 / KPI 权重表（CSV / Excel）
// 红线: 只读导入,不负责导出
// ==========================================

pub mod error;
pub mod file_parser;
pub mod reference_loader;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, UniversalFileParser};
pub use reference_loader::{
    map_activity_tiers, map_kpi_weights, parse_decimal, validate_tier_staircase,
    ReferenceTableLoader,
};
