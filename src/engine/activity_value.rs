// ==========================================
// 仓储绩效奖金系统 - 多作业价值汇总
// ==========================================
// 规则: line_value = quantity × tier.rate_amount
//       gross = Σ line_value
//       subtotal = round(gross, 2) × 50%
// 红线: 溢出返回 InvalidInput,不 panic
// ==========================================

use crate::domain::activity::{ActivityMeasurement, ActivityTier};
use crate::engine::error::{CalcError, CalcResult};
use crate::engine::productivity::classify;
use crate::engine::rounding::{payout_share, round_output};
use rust_decimal::Decimal;

/// 单项作业计算明细
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLine {
    pub activity_name: String,
    pub productivity: Decimal, // 2 位小数（展示值）
    pub level_label: String,
    pub unit: String,
    pub rate_amount: Decimal,
    pub line_value: Decimal,   // 全精度
}

impl ActivityLine {
    /// 审计/展示用文本（不参与计算）
    pub fn describe(&self) -> String {
        format!(
            "{}: {:.2} {} ({}) - R$ {:.2}",
            self.activity_name,
            self.productivity,
            self.unit,
            self.level_label,
            round_output(self.line_value),
        )
    }
}

/// 多作业汇总结果（gross 为全精度）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityAggregate {
    pub gross_value: Decimal,
    pub subtotal: Decimal,
    pub details: Vec<String>,
    pub lines: Vec<ActivityLine>,
}

/// 汇总多项作业价值
///
/// 空列表 → 全 0,无错误
/// 任一作业判定失败 → 整体失败（不返回部分结果）
pub fn aggregate_activities(
    measurements: &[ActivityMeasurement],
    role: &str,
    tiers: &[ActivityTier],
) -> CalcResult<ActivityAggregate> {
    let mut lines = Vec::with_capacity(measurements.len());

    for measurement in measurements {
        let classification = classify(
            &measurement.activity_name,
            role,
            measurement.quantity_produced,
            measurement.hours_worked,
            tiers,
        )?;

        let line_value = measurement
            .quantity_produced
            .checked_mul(classification.tier.rate_amount)
            .ok_or_else(|| {
                CalcError::invalid_input(
                    "quantity_produced",
                    format!(
                        "作业价值超出可计算范围 (activity={}, quantity={}, rate={})",
                        measurement.activity_name,
                        measurement.quantity_produced,
                        classification.tier.rate_amount
                    ),
                )
            })?;

        lines.push(ActivityLine {
            activity_name: measurement.activity_name.clone(),
            productivity: classification.reported_productivity(),
            level_label: classification.tier.level_label.clone(),
            unit: classification.tier.unit.clone(),
            rate_amount: classification.tier.rate_amount,
            line_value,
        });
    }

    let gross_value = lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.line_value))
        .ok_or_else(|| {
            CalcError::invalid_input("multiple_activities", "作业价值合计超出可计算范围")
        })?;
    let details = lines.iter().map(ActivityLine::describe).collect();

    Ok(ActivityAggregate {
        gross_value,
        subtotal: payout_share(gross_value),
        details,
        lines,
    })
}
