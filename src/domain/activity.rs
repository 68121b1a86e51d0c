// ==========================================
// 仓储绩效奖金系统 - 作业量领域模型
// ==========================================
// ActivityMeasurement: 单次计算的作业量（不落库）
// ActivityTier: 生产率档位参考表（只读）
// ==========================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// ActivityMeasurement - 作业量记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityMeasurement {
    pub activity_name: String,       // 作业名称 (如 "Prod Amarração")
    pub quantity_produced: Decimal,  // 产出数量 (>= 0)
    pub hours_worked: Decimal,       // 工时 (> 0)
}

impl ActivityMeasurement {
    pub fn new(activity_name: &str, quantity_produced: Decimal, hours_worked: Decimal) -> Self {
        Self {
            activity_name: activity_name.to_string(),
            quantity_produced,
            hours_worked,
        }
    }
}

// ==========================================
// ActivityTier - 生产率档位
// ==========================================
// 同一 (activity_name, role) 下多行档位,按 min_productivity 严格递增
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTier {
    pub activity_name: String,
    pub role: String,
    pub min_productivity: Decimal, // 档位下限 (单位/小时)
    pub rate_amount: Decimal,      // 单价 (货币/单位)
    pub level_label: String,       // 档位名称 (如 "Nível 2")
    pub unit: String,              // 生产率单位 (如 "cxs/h")
}

impl ActivityTier {
    /// 是否属于给定作业与岗位
    pub fn belongs_to(&self, activity_name: &str, role: &str) -> bool {
        self.activity_name == activity_name && self.role == role
    }
}
