// ==========================================
// 仓储绩效奖金系统 - 报酬计算器（唯一入口）
// ==========================================
// 流程:
// 1) 校验输入互斥（多作业 / 有效任务）
// 2) 作业价值: 多作业汇总 或 有效任务计算（均取 50%）
// 3) KPI 奖金汇总
// 4) total = subtotal + bonus (+ extra_amount)
// 5) 输出边界统一舍入到 2 位小数; subtotal 由舍入后的毛值减半得出
// 红线: 无副作用、无日志、无 I/O; 错误原样返回,不返回部分结果
// ==========================================

use crate::domain::remuneration::{
    ActivityInput, CalculationContext, ReferenceData, RemunerationBreakdown,
};
use crate::engine::activity_value::aggregate_activities;
use crate::engine::error::{CalcError, CalcResult};
use crate::engine::kpi_bonus::aggregate_kpi_bonus;
use crate::engine::rounding::round_output;
use crate::engine::valid_task::calculate_from_valid_tasks;
use rust_decimal::Decimal;

/// 作业部分的中间结果
struct ActivityPart {
    gross_value: Decimal,
    subtotal: Decimal,
    details: Vec<String>,
    productivity: Option<Decimal>,
    level: Option<String>,
    unit: Option<String>,
    valid_tasks_count: Option<u64>,
}

// ==========================================
// RemunerationCalculator - 报酬计算器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct RemunerationCalculator;

impl RemunerationCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 计算单个员工的报酬明细
    ///
    /// # 错误
    /// - InvalidInput: 工时/产量/附加金额非法、单价或权重为负、金额溢出
    /// - UnknownActivity: 作业在该岗位下无档位
    /// - ConflictingInput: 岗位与输入路径不匹配
    pub fn calculate(
        &self,
        context: &CalculationContext,
        input: &ActivityInput,
        reference: &ReferenceData,
    ) -> CalcResult<RemunerationBreakdown> {
        if let Some(extra) = context.extra_amount {
            if extra < Decimal::ZERO {
                return Err(CalcError::invalid_input(
                    "extra_amount",
                    format!("附加金额不能为负: {}", extra),
                ));
            }
        }

        Self::check_input_path(context, input, reference)?;

        let activity = match input {
            ActivityInput::Activities(measurements) => {
                let aggregate =
                    aggregate_activities(measurements, &context.role, &reference.activity_tiers)?;

                // 单作业时回填生产率/档位/单位; 多作业时见明细
                let single = match aggregate.lines.as_slice() {
                    [line] => Some(line),
                    _ => None,
                };

                ActivityPart {
                    gross_value: aggregate.gross_value,
                    subtotal: aggregate.subtotal,
                    productivity: single.map(|line| line.productivity),
                    level: single.map(|line| line.level_label.clone()),
                    unit: single.map(|line| line.unit.clone()),
                    details: aggregate.details,
                    valid_tasks_count: None,
                }
            }
            ActivityInput::ValidTasks(valid_tasks) => {
                let aggregate =
                    calculate_from_valid_tasks(*valid_tasks, reference.valid_task_rate)?;

                ActivityPart {
                    gross_value: aggregate.gross_value,
                    subtotal: aggregate.subtotal,
                    details: vec![aggregate.detail],
                    productivity: None,
                    level: None,
                    unit: None,
                    valid_tasks_count: Some(aggregate.valid_task_count),
                }
            }
        };

        let kpi = aggregate_kpi_bonus(
            &context.achieved_kpis,
            &context.role,
            context.shift,
            &reference.kpi_weights,
        )?;

        let activity_subtotal = round_output(activity.subtotal);
        let kpi_bonus = round_output(kpi.bonus);
        let extra_amount = context.extra_amount.map(round_output);

        // 总额由已舍入分项相加,保证 total = subtotal + bonus (+ extra) 精确成立
        let total_remuneration = activity_subtotal
            .checked_add(kpi_bonus)
            .and_then(|sum| sum.checked_add(extra_amount.unwrap_or(Decimal::ZERO)))
            .ok_or_else(|| CalcError::invalid_input("extra_amount", "报酬合计超出可计算范围"))?;

        Ok(RemunerationBreakdown {
            activity_subtotal,
            kpi_bonus,
            total_remuneration,
            achieved_kpis: context.achieved_kpis.clone(),
            applied_kpis: kpi.applied_kpis,
            productivity_achieved: activity.productivity,
            level_achieved: activity.level,
            unit: activity.unit,
            activity_details: activity.details,
            valid_tasks_count: activity.valid_tasks_count,
            gross_activity_value: Some(round_output(activity.gross_value)),
            extra_amount,
        })
    }

    /// 岗位配置的计酬路径必须与提交的输入一致
    fn check_input_path(
        context: &CalculationContext,
        input: &ActivityInput,
        reference: &ReferenceData,
    ) -> CalcResult<()> {
        let valid_task_role = reference.is_valid_task_role(&context.role);

        match input {
            ActivityInput::Activities(measurements) if valid_task_role && !measurements.is_empty() => {
                Err(CalcError::ConflictingInput(format!(
                    "岗位 {} 按有效任务计酬,不能提交作业量 ({} 项)",
                    context.role,
                    measurements.len()
                )))
            }
            ActivityInput::ValidTasks(_) if !valid_task_role => {
                Err(CalcError::ConflictingInput(format!(
                    "岗位 {} 按作业量计酬,不能提交有效任务数",
                    context.role
                )))
            }
            _ => Ok(()),
        }
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::{ActivityMeasurement, ActivityTier};
    use crate::domain::kpi::KpiWeight;
    use crate::domain::remuneration::ValidTaskInput;
    use crate::domain::types::Shift;
    use std::collections::BTreeSet;
    use std::str::FromStr;

    const HELPER: &str = "Ajudante de Armazém";
    const FORKLIFT: &str = "Operador de Empilhadeira";

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn reference() -> ReferenceData {
        let tier = |min: &str, rate: &str, level: &str| ActivityTier {
            activity_name: "Prod Amarração".to_string(),
            role: HELPER.to_string(),
            min_productivity: dec(min),
            rate_amount: dec(rate),
            level_label: level.to_string(),
            unit: "cxs/h".to_string(),
        };
        let kpi = |name: &str, role: &str| KpiWeight {
            kpi_name: name.to_string(),
            role: role.to_string(),
            shift: Shift::Geral,
            amount: dec("3.00"),
            active: true,
        };

        ReferenceData {
            activity_tiers: vec![
                tier("0", "0.18", "Nível 1"),
                tier("10", "0.24", "Nível 2"),
                tier("15", "0.30", "Nível 3"),
            ],
            kpi_weights: vec![
                kpi("Ressuprimento", HELPER),
                kpi("EFC", HELPER),
                kpi("EFC", FORKLIFT),
            ],
            valid_task_rate: dec("0.093"),
            valid_task_roles: BTreeSet::from([FORKLIFT.to_string()]),
        }
    }

    #[test]
    fn test_scenario_1_helper_single_activity_with_kpis() {
        let calculator = RemunerationCalculator::new();
        let context = CalculationContext::new(HELPER, Shift::Manha, ["Ressuprimento", "EFC"]);
        let input = ActivityInput::Activities(vec![ActivityMeasurement::new(
            "Prod Amarração",
            dec("100"),
            dec("8"),
        )]);

        let result = calculator.calculate(&context, &input, &reference()).unwrap();

        assert_eq!(result.productivity_achieved, Some(dec("12.5")));
        assert_eq!(result.level_achieved.as_deref(), Some("Nível 2"));
        assert_eq!(result.unit.as_deref(), Some("cxs/h"));
        assert_eq!(result.gross_activity_value, Some(dec("24.00")));
        assert_eq!(result.activity_subtotal, dec("12.00"));
        assert_eq!(result.kpi_bonus, dec("6.00"));
        assert_eq!(result.total_remuneration, dec("18.00"));
        assert_eq!(result.applied_kpis, vec!["Ressuprimento", "EFC"]);
        assert_eq!(result.valid_tasks_count, None);
    }

    #[test]
    fn test_scenario_2_valid_tasks_rounding() {
        let calculator = RemunerationCalculator::new();
        let context = CalculationContext::new(FORKLIFT, Shift::Noite, Vec::<String>::new());
        let input = ActivityInput::ValidTasks(ValidTaskInput {
            valid_task_count: 150,
        });

        let result = calculator.calculate(&context, &input, &reference()).unwrap();

        assert_eq!(result.gross_activity_value, Some(dec("13.95")));
        assert_eq!(result.activity_subtotal, dec("6.98"));
        assert_eq!(result.kpi_bonus, Decimal::ZERO);
        assert_eq!(result.total_remuneration, dec("6.98"));
        assert_eq!(result.valid_tasks_count, Some(150));
        assert_eq!(result.productivity_achieved, None);
    }

    #[test]
    fn test_scenario_3_valid_task_role_with_activities_conflicts() {
        let calculator = RemunerationCalculator::new();
        let context = CalculationContext::new(FORKLIFT, Shift::Manha, ["EFC"]);
        let input = ActivityInput::Activities(vec![ActivityMeasurement::new(
            "Prod Amarração",
            dec("100"),
            dec("8"),
        )]);

        let err = calculator.calculate(&context, &input, &reference()).unwrap_err();
        assert_eq!(err.kind(), "CONFLICTING_INPUT");
    }

    #[test]
    fn test_scenario_4_activity_role_with_valid_tasks_conflicts() {
        let calculator = RemunerationCalculator::new();
        let context = CalculationContext::new(HELPER, Shift::Manha, ["EFC"]);
        let input = ActivityInput::ValidTasks(ValidTaskInput {
            valid_task_count: 10,
        });

        let err = calculator.calculate(&context, &input, &reference()).unwrap_err();
        assert_eq!(err.kind(), "CONFLICTING_INPUT");
    }

    #[test]
    fn test_scenario_5_valid_task_role_without_activities_only_kpi() {
        let calculator = RemunerationCalculator::new();
        let context = CalculationContext::new(FORKLIFT, Shift::Tarde, ["EFC"]);
        let input = ActivityInput::Activities(Vec::new());

        let result = calculator.calculate(&context, &input, &reference()).unwrap();

        assert_eq!(result.activity_subtotal, Decimal::ZERO);
        assert_eq!(result.kpi_bonus, dec("3.00"));
        assert_eq!(result.total_remuneration, dec("3.00"));
        assert!(result.activity_details.is_empty());
    }

    #[test]
    fn test_scenario_6_extra_amount_added_transparently() {
        let calculator = RemunerationCalculator::new();
        let context = CalculationContext::new(HELPER, Shift::Manha, ["EFC"])
            .with_extra_amount(dec("10.005"));
        let input = ActivityInput::Activities(vec![ActivityMeasurement::new(
            "Prod Amarração",
            dec("100"),
            dec("8"),
        )]);

        let result = calculator.calculate(&context, &input, &reference()).unwrap();

        assert_eq!(result.extra_amount, Some(dec("10.01")));
        assert_eq!(result.total_remuneration, dec("25.01"));
    }

    #[test]
    fn test_scenario_7_negative_extra_amount_rejected() {
        let calculator = RemunerationCalculator::new();
        let context = CalculationContext::new(HELPER, Shift::Manha, Vec::<String>::new())
            .with_extra_amount(dec("-1"));

        let err = calculator
            .calculate(&context, &ActivityInput::Activities(Vec::new()), &reference())
            .unwrap_err();
        assert_eq!(err.kind(), "INVALID_INPUT");
    }

    #[test]
    fn test_scenario_8_multiple_activities_leave_single_fields_empty() {
        let calculator = RemunerationCalculator::new();
        let context = CalculationContext::new(HELPER, Shift::Manha, Vec::<String>::new());
        let input = ActivityInput::Activities(vec![
            ActivityMeasurement::new("Prod Amarração", dec("100"), dec("8")),
            ActivityMeasurement::new("Prod Amarração", dec("160"), dec("8")),
        ]);

        let result = calculator.calculate(&context, &input, &reference()).unwrap();

        // 24.00 + 160 × 0.30 = 72.00 → 36.00
        assert_eq!(result.gross_activity_value, Some(dec("72.00")));
        assert_eq!(result.activity_subtotal, dec("36.00"));
        assert_eq!(result.productivity_achieved, None);
        assert_eq!(result.level_achieved, None);
        assert_eq!(result.activity_details.len(), 2);
    }

    #[test]
    fn test_scenario_9_negative_reference_amounts_rejected() {
        let calculator = RemunerationCalculator::new();
        let mut negative_rates = reference();
        for tier in &mut negative_rates.activity_tiers {
            tier.rate_amount = -tier.rate_amount;
        }
        let context = CalculationContext::new(HELPER, Shift::Manha, Vec::<String>::new());
        let input = ActivityInput::Activities(vec![ActivityMeasurement::new(
            "Prod Amarração",
            dec("100"),
            dec("8"),
        )]);

        let err = calculator.calculate(&context, &input, &negative_rates).unwrap_err();
        assert_eq!(err.kind(), "INVALID_INPUT");

        let mut negative_weight = reference();
        negative_weight.kpi_weights[1].amount = dec("-3.00");
        let context = CalculationContext::new(HELPER, Shift::Manha, ["EFC"]);
        let err = calculator
            .calculate(&context, &ActivityInput::Activities(Vec::new()), &negative_weight)
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "amount"));
    }

    #[test]
    fn test_scenario_10_overflowing_total_rejected() {
        let calculator = RemunerationCalculator::new();
        let context = CalculationContext::new(HELPER, Shift::Manha, ["EFC"])
            .with_extra_amount(Decimal::MAX);

        let err = calculator
            .calculate(&context, &ActivityInput::Activities(Vec::new()), &reference())
            .unwrap_err();
        assert_eq!(err.kind(), "INVALID_INPUT");
    }
}
