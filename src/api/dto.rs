// ==========================================
// 仓储绩效奖金系统 - 请求 DTO
// ==========================================
// 职责: 宽松请求体 → (CalculationContext, ActivityInput)
// 红线: 解析只在边界做一次,引擎只接收已校验的类型
// ==========================================

use crate::domain::activity::ActivityMeasurement;
use crate::domain::remuneration::{ActivityInput, CalculationContext, ValidTaskInput};
use crate::domain::types::Shift;
use crate::engine::error::{CalcError, CalcResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 单个员工的计算请求
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    #[serde(default)]
    pub worker_id: Option<String>,
    /// 作业日期,缺省为当天（用于 KPI 限额）
    #[serde(default)]
    pub work_date: Option<NaiveDate>,
    pub role: String,
    /// 班次名称（Manhã / Tarde / Noite / Geral）,空值按 Geral 处理
    #[serde(default)]
    pub shift: String,
    #[serde(default)]
    pub achieved_kpis: Vec<String>,
    #[serde(default)]
    pub multiple_activities: Option<Vec<ActivityMeasurement>>,
    #[serde(default)]
    pub valid_tasks_count: Option<Decimal>,
    #[serde(default)]
    pub extra_amount: Option<Decimal>,
}

impl CalculationRequest {
    /// 解析为引擎输入
    ///
    /// # 错误
    /// - InvalidInput: 岗位为空、班次未知、任务数非法
    /// - ConflictingInput: 同时提交作业列表与有效任务数
    pub fn into_parts(self) -> CalcResult<(CalculationContext, ActivityInput)> {
        let role = self.role.trim();
        if role.is_empty() {
            return Err(CalcError::invalid_input("role", "岗位不能为空"));
        }

        let shift = Shift::from_str(&self.shift)
            .map_err(|message| CalcError::invalid_input("shift", message))?;

        let activities = self.multiple_activities.unwrap_or_default();

        let input = match self.valid_tasks_count {
            Some(count) if !activities.is_empty() => {
                return Err(CalcError::ConflictingInput(format!(
                    "不能同时提交作业列表 ({} 项) 与有效任务数 ({})",
                    activities.len(),
                    count
                )));
            }
            Some(count) => ActivityInput::ValidTasks(ValidTaskInput::try_from(count)?),
            None => ActivityInput::Activities(activities),
        };

        let mut context = CalculationContext::new(role, shift, self.achieved_kpis);
        context.extra_amount = self.extra_amount;

        Ok((context, input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> CalculationRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_activities_request() {
        let (context, input) = request(json!({
            "role": "Ajudante de Armazém",
            "shift": "Manhã",
            "achieved_kpis": ["EFC", "EFC"],
            "multiple_activities": [
                {"activity_name": "Prod Amarração", "quantity_produced": 100, "hours_worked": 8}
            ]
        }))
        .into_parts()
        .unwrap();

        assert_eq!(context.shift, Shift::Manha);
        assert_eq!(context.achieved_kpis, vec!["EFC"]);
        assert!(matches!(input, ActivityInput::Activities(ref list) if list.len() == 1));
    }

    #[test]
    fn test_valid_tasks_request() {
        let (context, input) = request(json!({
            "role": "Operador de Empilhadeira",
            "shift": "Noite",
            "valid_tasks_count": 150,
            "extra_amount": 5
        }))
        .into_parts()
        .unwrap();

        assert_eq!(context.extra_amount, Some(Decimal::from(5)));
        assert_eq!(
            input,
            ActivityInput::ValidTasks(ValidTaskInput {
                valid_task_count: 150
            })
        );
    }

    #[test]
    fn test_both_inputs_conflict() {
        let err = request(json!({
            "role": "Operador de Empilhadeira",
            "valid_tasks_count": 10,
            "multiple_activities": [
                {"activity_name": "Prod Amarração", "quantity_produced": 1, "hours_worked": 1}
            ]
        }))
        .into_parts()
        .unwrap_err();

        assert_eq!(err.kind(), "CONFLICTING_INPUT");
    }

    #[test]
    fn test_empty_list_with_count_is_valid_tasks() {
        let (_, input) = request(json!({
            "role": "Operador de Empilhadeira",
            "valid_tasks_count": 3,
            "multiple_activities": []
        }))
        .into_parts()
        .unwrap();

        assert_eq!(input.kind(), "valid_tasks");
    }

    #[test]
    fn test_invalid_fields() {
        let negative = request(json!({"role": "R", "valid_tasks_count": -1}))
            .into_parts()
            .unwrap_err();
        assert_eq!(negative.kind(), "INVALID_INPUT");

        let fractional = request(json!({"role": "R", "valid_tasks_count": 1.5}))
            .into_parts()
            .unwrap_err();
        assert_eq!(fractional.kind(), "INVALID_INPUT");

        let shift = request(json!({"role": "R", "shift": "Madrugada"}))
            .into_parts()
            .unwrap_err();
        assert!(matches!(shift, CalcError::InvalidInput { ref field, .. } if field == "shift"));

        let role = request(json!({"role": "  "})).into_parts().unwrap_err();
        assert_eq!(role.kind(), "INVALID_INPUT");
    }
}
