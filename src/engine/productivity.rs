// ==========================================
// 仓储绩效奖金系统 - 生产率档位判定
// ==========================================
// 规则: productivity = quantity / hours
//       取 min_productivity <= productivity 的最高档
//       低于最低档 → 取最低档（保底单价）
// 红线: 档位是"阶梯制",不做插值
// ==========================================

use crate::domain::activity::ActivityTier;
use crate::engine::error::{CalcError, CalcResult};
use crate::engine::rounding::round_output;
use rust_decimal::Decimal;

/// 档位判定结果
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<'a> {
    /// 全精度生产率（内部计算用）
    pub productivity: Decimal,
    pub tier: &'a ActivityTier,
}

impl Classification<'_> {
    /// 对外展示的生产率（2 位小数）
    pub fn reported_productivity(&self) -> Decimal {
        round_output(self.productivity)
    }
}

/// 判定单项作业的生产率档位
///
/// # 错误
/// - hours_worked <= 0 → InvalidInput
/// - quantity_produced < 0 → InvalidInput
/// - quantity / hours 超出 Decimal 范围 → InvalidInput
/// - 命中档位单价为负 → InvalidInput
/// - (activity_name, role) 无任何档位 → UnknownActivity
pub fn classify<'a>(
    activity_name: &str,
    role: &str,
    quantity_produced: Decimal,
    hours_worked: Decimal,
    tiers: &'a [ActivityTier],
) -> CalcResult<Classification<'a>> {
    if hours_worked <= Decimal::ZERO {
        return Err(CalcError::invalid_input(
            "hours_worked",
            format!("工时必须大于 0 (activity={}, hours={})", activity_name, hours_worked),
        ));
    }
    if quantity_produced < Decimal::ZERO {
        return Err(CalcError::invalid_input(
            "quantity_produced",
            format!(
                "产量不能为负 (activity={}, quantity={})",
                activity_name, quantity_produced
            ),
        ));
    }

    let mut staircase: Vec<&ActivityTier> = tiers
        .iter()
        .filter(|tier| tier.belongs_to(activity_name, role))
        .collect();

    if staircase.is_empty() {
        return Err(CalcError::UnknownActivity {
            activity: activity_name.to_string(),
            role: role.to_string(),
        });
    }

    // 参考表不保证有序
    staircase.sort_by(|a, b| a.min_productivity.cmp(&b.min_productivity));

    let productivity = quantity_produced.checked_div(hours_worked).ok_or_else(|| {
        CalcError::invalid_input(
            "quantity_produced",
            format!(
                "生产率超出可计算范围 (activity={}, quantity={}, hours={})",
                activity_name, quantity_produced, hours_worked
            ),
        )
    })?;

    let tier = staircase
        .iter()
        .rev()
        .find(|tier| tier.min_productivity <= productivity)
        .copied()
        .unwrap_or(staircase[0]);

    if tier.rate_amount < Decimal::ZERO {
        return Err(CalcError::invalid_input(
            "rate_amount",
            format!(
                "档位单价不能为负 (activity={}, level={}, rate={})",
                activity_name, tier.level_label, tier.rate_amount
            ),
        ));
    }

    Ok(Classification { productivity, tier })
}
