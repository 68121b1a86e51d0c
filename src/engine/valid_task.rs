// ==========================================
// 仓储绩效奖金系统 - 有效任务价值计算
// ==========================================
// 适用: 按有效任务计酬的岗位（如叉车操作员）
// 规则: gross = valid_task_count × rate_constant
//       subtotal = round(gross, 2) × 50%（与多作业路径相同）
// 红线: 与多作业路径互斥
// ==========================================

use crate::domain::remuneration::ValidTaskInput;
use crate::engine::error::{CalcError, CalcResult};
use crate::engine::rounding::{payout_share, round_output};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 有效任务计算结果（全精度）
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTaskAggregate {
    pub valid_task_count: u64,
    pub gross_value: Decimal,
    pub subtotal: Decimal,
    pub detail: String,
}

/// 原始任务数校验: 必须为 >= 0 的整数
impl TryFrom<Decimal> for ValidTaskInput {
    type Error = CalcError;

    fn try_from(raw: Decimal) -> Result<Self, Self::Error> {
        if raw.is_sign_negative() && !raw.is_zero() {
            return Err(CalcError::invalid_input(
                "valid_tasks_count",
                format!("有效任务数不能为负: {}", raw),
            ));
        }
        if !raw.fract().is_zero() {
            return Err(CalcError::invalid_input(
                "valid_tasks_count",
                format!("有效任务数必须为整数: {}", raw),
            ));
        }

        let valid_task_count = raw.trunc().to_u64().ok_or_else(|| {
            CalcError::invalid_input("valid_tasks_count", format!("有效任务数超出范围: {}", raw))
        })?;

        Ok(ValidTaskInput { valid_task_count })
    }
}

/// 按有效任务数计算作业价值
///
/// rate_constant 来自配置（参考值 0.093/任务）,负数视为配置错误
pub fn calculate_from_valid_tasks(
    input: ValidTaskInput,
    rate_constant: Decimal,
) -> CalcResult<ValidTaskAggregate> {
    if rate_constant < Decimal::ZERO {
        return Err(CalcError::invalid_input(
            "valid_task_rate",
            format!("有效任务单价不能为负: {}", rate_constant),
        ));
    }

    let gross_value = Decimal::from(input.valid_task_count)
        .checked_mul(rate_constant)
        .ok_or_else(|| {
            CalcError::invalid_input(
                "valid_tasks_count",
                format!(
                    "有效任务价值超出可计算范围 (count={}, rate={})",
                    input.valid_task_count, rate_constant
                ),
            )
        })?;

    Ok(ValidTaskAggregate {
        valid_task_count: input.valid_task_count,
        gross_value,
        subtotal: payout_share(gross_value),
        detail: format!(
            "Tarefas válidas: {} x R$ {} = R$ {:.2}",
            input.valid_task_count,
            rate_constant.normalize(),
            round_output(gross_value),
        ),
    })
}
