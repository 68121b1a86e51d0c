// ==========================================
// 仓储绩效奖金系统 - 计算输入/输出模型
// ==========================================
// 红线: 输入为纯值,输出为纯值,引擎不持有状态
// ==========================================

use crate::domain::activity::{ActivityMeasurement, ActivityTier};
use crate::domain::kpi::KpiWeight;
use crate::domain::types::Shift;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

// ==========================================
// CalculationContext - 计算上下文
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationContext {
    pub role: String,
    pub shift: Shift,
    /// 已达成 KPI（去重,保留首次出现顺序）
    pub achieved_kpis: Vec<String>,
    /// 调用方追加的固定金额（如额外作业补贴）,原样计入总额
    #[serde(default)]
    pub extra_amount: Option<Decimal>,
}

impl CalculationContext {
    pub fn new<I, S>(role: &str, shift: Shift, achieved_kpis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            role: role.to_string(),
            shift,
            achieved_kpis: dedup_names(achieved_kpis),
            extra_amount: None,
        }
    }

    pub fn with_extra_amount(mut self, amount: Decimal) -> Self {
        self.extra_amount = Some(amount);
        self
    }
}

/// 去除空白名称与重复名称,保持原始顺序
pub fn dedup_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(|name| name.into().trim().to_string())
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .collect()
}

// ==========================================
// ValidTaskInput - 有效任务数（叉车等岗位）
// ==========================================
// 原始数值的校验见 engine::valid_task (TryFrom<Decimal>)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ValidTaskInput {
    pub valid_task_count: u64,
}

impl From<ValidTaskInput> for Decimal {
    fn from(input: ValidTaskInput) -> Self {
        Decimal::from(input.valid_task_count)
    }
}

// ==========================================
// ActivityInput - 作业输入（二选一）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ActivityInput {
    /// 多作业路径: 作业量 × 档位单价
    Activities(Vec<ActivityMeasurement>),
    /// 有效任务路径: 任务数 × 固定单价
    ValidTasks(ValidTaskInput),
}

impl ActivityInput {
    pub fn kind(&self) -> &'static str {
        match self {
            ActivityInput::Activities(_) => "activities",
            ActivityInput::ValidTasks(_) => "valid_tasks",
        }
    }
}

// ==========================================
// ReferenceData - 参考数据快照
// ==========================================
// 单次计算期间不可变,由调用方一次性解析
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub activity_tiers: Vec<ActivityTier>,
    pub kpi_weights: Vec<KpiWeight>,
    /// 有效任务单价 (货币/任务)
    pub valid_task_rate: Decimal,
    /// 走有效任务路径的岗位
    pub valid_task_roles: BTreeSet<String>,
}

impl ReferenceData {
    pub fn is_valid_task_role(&self, role: &str) -> bool {
        self.valid_task_roles.contains(role)
    }
}

// ==========================================
// RemunerationBreakdown - 计算结果
// ==========================================
// 不变量: total_remuneration = activity_subtotal + kpi_bonus (+ extra_amount)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemunerationBreakdown {
    // ===== 金额 =====
    pub activity_subtotal: Decimal,
    pub kpi_bonus: Decimal,
    pub total_remuneration: Decimal,

    // ===== KPI =====
    pub achieved_kpis: Vec<String>, // 输入回显（含未匹配权重的 KPI）
    pub applied_kpis: Vec<String>,  // 实际计入奖金的 KPI

    // ===== 作业明细 =====
    pub productivity_achieved: Option<Decimal>,
    pub level_achieved: Option<String>,
    pub unit: Option<String>,
    pub activity_details: Vec<String>,
    pub valid_tasks_count: Option<u64>,
    pub gross_activity_value: Option<Decimal>,

    // ===== 调用方追加 =====
    pub extra_amount: Option<Decimal>,
}
