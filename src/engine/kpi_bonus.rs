// ==========================================
// 仓储绩效奖金系统 - KPI 奖金汇总
// ==========================================
// 匹配规则:
// 1) role 完全一致 且 active=true
// 2) shift = 员工班次 或 shift = Geral
// 3) 同名 KPI 同时存在班次行与 Geral 行 → 班次行优先（最具体者胜）
// 未匹配的 KPI 不计奖金、不报错（仍在结果中回显）
// 红线: 日/月限额不在此处执行,由调用方预先过滤
// ==========================================

use crate::domain::kpi::KpiWeight;
use crate::domain::types::Shift;
use crate::engine::error::{CalcError, CalcResult};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// KPI 奖金汇总结果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KpiBonus {
    pub bonus: Decimal,
    /// 实际计入奖金的 KPI（去重,保持输入顺序）
    pub applied_kpis: Vec<String>,
    /// 无有效权重的 KPI（数据质量提示）
    pub unresolved_kpis: Vec<String>,
}

/// 为单个 KPI 名称选出适用的权重行
pub fn resolve_weight<'a>(
    kpi_name: &str,
    role: &str,
    shift: Shift,
    weights: &'a [KpiWeight],
) -> Option<&'a KpiWeight> {
    let mut general = None;

    for weight in weights
        .iter()
        .filter(|w| w.kpi_name == kpi_name && w.applies_to(role, shift))
    {
        if weight.shift != Shift::Geral {
            return Some(weight);
        }
        general.get_or_insert(weight);
    }

    general
}

/// 汇总已达成 KPI 的奖金
///
/// # 错误
/// - 命中的权重金额为负 → InvalidInput
/// - 合计溢出 → InvalidInput
pub fn aggregate_kpi_bonus<S: AsRef<str>>(
    achieved_kpi_names: &[S],
    role: &str,
    shift: Shift,
    weights: &[KpiWeight],
) -> CalcResult<KpiBonus> {
    let mut seen = HashSet::new();
    let mut result = KpiBonus::default();

    for name in achieved_kpi_names.iter().map(|n| n.as_ref().trim()) {
        if name.is_empty() || !seen.insert(name) {
            continue;
        }

        match resolve_weight(name, role, shift, weights) {
            Some(weight) => {
                if weight.amount < Decimal::ZERO {
                    return Err(CalcError::invalid_input(
                        "amount",
                        format!(
                            "KPI 权重金额不能为负 (kpi={}, role={}, shift={}, amount={})",
                            name, role, weight.shift, weight.amount
                        ),
                    ));
                }
                result.bonus = result.bonus.checked_add(weight.amount).ok_or_else(|| {
                    CalcError::invalid_input("amount", "KPI 奖金合计超出可计算范围")
                })?;
                result.applied_kpis.push(name.to_string());
            }
            None => result.unresolved_kpis.push(name.to_string()),
        }
    }

    Ok(result)
}
