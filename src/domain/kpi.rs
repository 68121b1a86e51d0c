// ==========================================
// 仓储绩效奖金系统 - KPI 领域模型
// ==========================================
// KpiWeight: KPI 奖金权重参考表（只读）
// KpiCredit: 已发放的 KPI 记录（调用方限额校验用）
// ==========================================

use crate::domain::types::Shift;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// KpiWeight - KPI 权重
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiWeight {
    pub kpi_name: String,
    pub role: String,
    pub shift: Shift,     // Geral = 该岗位全部班次
    pub amount: Decimal,  // 奖金金额
    pub active: bool,
}

impl KpiWeight {
    /// 权重行是否适用于 (岗位, 班次)，不检查 KPI 名称
    pub fn applies_to(&self, role: &str, shift: Shift) -> bool {
        self.active && self.role == role && self.shift.applies_to(shift)
    }
}

// ==========================================
// KpiCredit - 已计入的 KPI
// ==========================================
// 一条记录 = 某员工某天被计入一次某 KPI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiCredit {
    pub worker_id: String,
    pub kpi_name: String,
    pub credited_on: NaiveDate,
}
