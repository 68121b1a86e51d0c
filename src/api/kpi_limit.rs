// ==========================================
// 仓储绩效奖金系统 - KPI 限额策略（调用方）
// ==========================================
// 规则（按请求顺序逐个判定）:
// 1) 同一天已计入过同名 KPI → 拒绝（重复）
// 2) 当天已计入数 >= max_per_day → 拒绝
// 3) 当月已计入数 >= max_per_month → 拒绝
// 4) 其他 → 允许,并计入当天/当月计数
// 红线: 在调用引擎之前执行,引擎本身不做限额
// ==========================================

use crate::config::KpiLimitConfig;
use crate::domain::kpi::KpiCredit;
use crate::domain::remuneration::dedup_names;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// 拒绝原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KpiRejectionReason {
    AlreadyCreditedToday,
    DailyLimitReached { limit: u32 },
    MonthlyLimitReached { limit: u32 },
}

/// 被拒绝的 KPI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedKpi {
    pub kpi_name: String,
    pub reason: KpiRejectionReason,
}

/// 限额判定结果
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KpiLimitOutcome {
    pub allowed: Vec<String>,
    pub rejected: Vec<RejectedKpi>,
}

// ==========================================
// KpiLimitPolicy - KPI 限额策略
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KpiLimitPolicy {
    pub max_per_day: Option<u32>,
    pub max_per_month: Option<u32>,
}

impl KpiLimitPolicy {
    pub fn new(max_per_day: Option<u32>, max_per_month: Option<u32>) -> Self {
        Self {
            max_per_day,
            max_per_month,
        }
    }

    /// 不限额
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn from_config(config: &KpiLimitConfig) -> Self {
        Self::new(config.max_per_day, config.max_per_month)
    }

    /// 按限额过滤请求的 KPI
    ///
    /// # 参数
    /// - worker_id: 员工标识; 为 Some 时只统计该员工的历史记录
    /// - requested: 请求计入的 KPI（会去重）
    /// - work_date: 作业日期
    /// - prior_credits: 已计入的 KPI 历史
    pub fn apply(
        &self,
        worker_id: Option<&str>,
        requested: &[String],
        work_date: NaiveDate,
        prior_credits: &[KpiCredit],
    ) -> KpiLimitOutcome {
        let history: Vec<&KpiCredit> = prior_credits
            .iter()
            .filter(|credit| worker_id.map_or(true, |id| credit.worker_id == id))
            .collect();

        let mut day_count = history
            .iter()
            .filter(|credit| credit.credited_on == work_date)
            .count() as u32;
        let mut month_count = history
            .iter()
            .filter(|credit| same_month(credit.credited_on, work_date))
            .count() as u32;

        let mut outcome = KpiLimitOutcome::default();

        for kpi_name in dedup_names(requested.iter().cloned()) {
            let already_credited = history
                .iter()
                .any(|credit| credit.credited_on == work_date && credit.kpi_name == kpi_name);

            let rejection = if already_credited {
                Some(KpiRejectionReason::AlreadyCreditedToday)
            } else if let Some(limit) = self.max_per_day.filter(|limit| day_count >= *limit) {
                Some(KpiRejectionReason::DailyLimitReached { limit })
            } else if let Some(limit) = self.max_per_month.filter(|limit| month_count >= *limit) {
                Some(KpiRejectionReason::MonthlyLimitReached { limit })
            } else {
                None
            };

            match rejection {
                Some(reason) => outcome.rejected.push(RejectedKpi { kpi_name, reason }),
                None => {
                    day_count += 1;
                    month_count += 1;
                    outcome.allowed.push(kpi_name);
                }
            }
        }

        outcome
    }
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
