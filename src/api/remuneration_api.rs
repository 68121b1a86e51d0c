// ==========================================
// 仓储绩效奖金系统 - 报酬计算 API
// ==========================================
// 流程:
// 1) 请求体 → (上下文, 作业输入)
// 2) 按岗位取一次参考数据快照
// 3) KPI 限额过滤（按员工 + 日期,无权重的 KPI 不占名额）
// 4) 调用引擎计算
// 5) 返回计算结果 + 被拒/未匹配 KPI + 待记录的 KPI 计入
// 红线: 引擎错误原样透传,不返回部分结果
// ==========================================

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::dto::CalculationRequest;
use crate::api::error::ApiResult;
use crate::api::kpi_limit::{KpiLimitPolicy, RejectedKpi};
use crate::api::providers::{ActivityTierProvider, KpiWeightProvider};
use crate::config::CalculatorConfig;
use crate::domain::kpi::KpiCredit;
use crate::domain::remuneration::RemunerationBreakdown;
use crate::engine::calculator::RemunerationCalculator;
use crate::engine::kpi_bonus::resolve_weight;

/// 单次计算的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationOutcome {
    pub calculation_id: Uuid,
    pub work_date: NaiveDate,
    pub breakdown: RemunerationBreakdown,
    /// 被限额策略拒绝的 KPI
    pub rejected_kpis: Vec<RejectedKpi>,
    /// 没有有效权重的 KPI（参考数据缺失,不参与限额）
    pub unresolved_kpis: Vec<String>,
    /// 本次应记录的 KPI 计入（仅当请求带 worker_id）
    pub new_credits: Vec<KpiCredit>,
}

// ==========================================
// RemunerationApi - 报酬计算 API
// ==========================================
pub struct RemunerationApi {
    tier_provider: Arc<dyn ActivityTierProvider>,
    weight_provider: Arc<dyn KpiWeightProvider>,
    limit_policy: KpiLimitPolicy,
    config: CalculatorConfig,
    calculator: RemunerationCalculator,
}

impl RemunerationApi {
    pub fn new(
        tier_provider: Arc<dyn ActivityTierProvider>,
        weight_provider: Arc<dyn KpiWeightProvider>,
        config: CalculatorConfig,
    ) -> Self {
        Self {
            tier_provider,
            weight_provider,
            limit_policy: KpiLimitPolicy::from_config(&config.kpi_limit),
            config,
            calculator: RemunerationCalculator::new(),
        }
    }

    /// 替换限额策略
    pub fn with_limit_policy(mut self, policy: KpiLimitPolicy) -> Self {
        self.limit_policy = policy;
        self
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// 计算单个员工的报酬
    ///
    /// # 参数
    /// - request: 计算请求
    /// - prior_credits: 已计入的 KPI 历史（用于限额判定）
    #[tracing::instrument(
        skip_all,
        fields(role = %request.role, worker = ?request.worker_id)
    )]
    pub fn calculate(
        &self,
        request: CalculationRequest,
        prior_credits: &[KpiCredit],
    ) -> ApiResult<CalculationOutcome> {
        let worker_id = request.worker_id.clone();
        let work_date = request
            .work_date
            .unwrap_or_else(|| Local::now().date_naive());

        let (mut context, input) = request.into_parts()?;

        // ===== 参考数据快照 =====
        let tiers = self.tier_provider.tiers_for_role(&context.role)?;
        let weights = self.weight_provider.weights_for_role(&context.role)?;

        // ===== KPI 限额（只对有有效权重的 KPI 占用名额） =====
        let (resolvable, unresolved): (Vec<String>, Vec<String>) = context
            .achieved_kpis
            .iter()
            .cloned()
            .partition(|name| resolve_weight(name, &context.role, context.shift, &weights).is_some());

        let limit = self.limit_policy.apply(
            worker_id.as_deref(),
            &resolvable,
            work_date,
            prior_credits,
        );
        for rejected in &limit.rejected {
            tracing::info!(
                "KPI 被限额拒绝: worker={:?}, kpi={}, reason={:?}",
                worker_id,
                rejected.kpi_name,
                rejected.reason
            );
        }
        context
            .achieved_kpis
            .retain(|name| limit.allowed.contains(name) || unresolved.contains(name));

        let reference = self.config.reference_data(tiers, weights);

        tracing::debug!(
            "开始计算: role={}, shift={}, input={}, tiers={}, weights={}",
            context.role,
            context.shift,
            input.kind(),
            reference.activity_tiers.len(),
            reference.kpi_weights.len()
        );

        let breakdown = self
            .calculator
            .calculate(&context, &input, &reference)
            .map_err(|e| {
                tracing::warn!("报酬计算失败: role={}, kind={}, {}", context.role, e.kind(), e);
                e
            })?;

        let unresolved_kpis: Vec<String> = breakdown
            .achieved_kpis
            .iter()
            .filter(|name| !breakdown.applied_kpis.contains(name))
            .cloned()
            .collect();
        if !unresolved_kpis.is_empty() {
            tracing::warn!(
                "KPI 无有效权重: role={}, shift={}, kpis={:?}",
                context.role,
                context.shift,
                unresolved_kpis
            );
        }

        let new_credits = match &worker_id {
            Some(id) => breakdown
                .applied_kpis
                .iter()
                .map(|kpi_name| KpiCredit {
                    worker_id: id.clone(),
                    kpi_name: kpi_name.clone(),
                    credited_on: work_date,
                })
                .collect(),
            None => Vec::new(),
        };

        let outcome = CalculationOutcome {
            calculation_id: Uuid::new_v4(),
            work_date,
            breakdown,
            rejected_kpis: limit.rejected,
            unresolved_kpis,
            new_credits,
        };

        tracing::info!(
            "报酬计算完成: id={}, role={}, subtotal={}, bonus={}, total={}",
            outcome.calculation_id,
            context.role,
            outcome.breakdown.activity_subtotal,
            outcome.breakdown.kpi_bonus,
            outcome.breakdown.total_remuneration
        );

        Ok(outcome)
    }

    /// 批量计算
    ///
    /// 每个请求独立成败; 前序成功请求产生的 KPI 计入参与后续请求的限额判定
    pub fn calculate_batch(
        &self,
        requests: Vec<CalculationRequest>,
        prior_credits: &[KpiCredit],
    ) -> Vec<ApiResult<CalculationOutcome>> {
        let mut credits = prior_credits.to_vec();
        let total = requests.len();

        let results: Vec<ApiResult<CalculationOutcome>> = requests
            .into_iter()
            .map(|request| {
                let result = self.calculate(request, &credits);
                if let Ok(outcome) = &result {
                    credits.extend(outcome.new_credits.iter().cloned());
                }
                result
            })
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        tracing::info!("批量计算完成: total={}, failed={}", total, failed);

        results
    }
}
