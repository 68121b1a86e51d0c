// ==========================================
// 仓储绩效奖金系统 - 命令行入口
// ==========================================
// 用法:
//   warehouse-bonus <request.json> [activity_tiers.(csv|xlsx)] [kpi_weights.(csv|xlsx)]
//
// request.json 为单个请求对象或请求数组（批量）
// 参考表路径: 命令行参数优先,其次配置文件/环境变量
// 结果以 JSON 输出到 stdout,日志输出到 stderr
// ==========================================

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use warehouse_bonus::api::{CalculationRequest, InMemoryReferenceStore, RemunerationApi};
use warehouse_bonus::config::CalculatorConfig;
use warehouse_bonus::importer::ReferenceTableLoader;
use warehouse_bonus::logging;

fn main() -> Result<()> {
    if std::env::var("WAREHOUSE_BONUS_LOG_JSON").is_ok() {
        logging::init_json();
    } else {
        logging::init();
    }

    let mut args = std::env::args().skip(1);
    let request_path = PathBuf::from(args.next().ok_or_else(|| {
        anyhow!("用法: warehouse-bonus <request.json> [activity_tiers] [kpi_weights]")
    })?);

    let config = CalculatorConfig::load().context("加载配置失败")?;

    let tiers_path = args
        .next()
        .map(PathBuf::from)
        .or_else(|| config.reference.activity_tiers_path.clone())
        .ok_or_else(|| anyhow!("未指定档位表路径"))?;
    let weights_path = args
        .next()
        .map(PathBuf::from)
        .or_else(|| config.reference.kpi_weights_path.clone())
        .ok_or_else(|| anyhow!("未指定 KPI 权重表路径"))?;

    tracing::info!(
        "{} v{}: tiers={}, weights={}",
        warehouse_bonus::APP_NAME,
        warehouse_bonus::VERSION,
        tiers_path.display(),
        weights_path.display()
    );

    let store = Arc::new(InMemoryReferenceStore::from_files(
        &ReferenceTableLoader::new(),
        &tiers_path,
        &weights_path,
    )?);
    tracing::info!(
        "参考表加载完成: tiers={}, weights={}",
        store.tier_count(),
        store.weight_count()
    );

    let api = RemunerationApi::new(store.clone(), store, config);

    let raw = std::fs::read_to_string(&request_path)
        .with_context(|| format!("读取请求文件失败: {}", request_path.display()))?;
    let payload: serde_json::Value = serde_json::from_str(&raw).context("请求文件不是合法 JSON")?;

    let output = if payload.is_array() {
        let requests: Vec<CalculationRequest> =
            serde_json::from_value(payload).context("请求格式错误")?;
        let results: Vec<serde_json::Value> = api
            .calculate_batch(requests, &[])
            .into_iter()
            .map(|result| match result {
                Ok(outcome) => serde_json::json!({ "ok": outcome }),
                Err(e) => serde_json::json!({ "error": { "kind": e.kind(), "message": e.to_string() } }),
            })
            .collect();
        serde_json::Value::Array(results)
    } else {
        let request: CalculationRequest =
            serde_json::from_value(payload).context("请求格式错误")?;
        let outcome = api.calculate(request, &[])?;
        serde_json::to_value(outcome)?
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
