// ==========================================
// 仓储绩效奖金系统 - 参考表加载
// ==========================================
// 职责: 原始行记录 → ActivityTier / KpiWeight
// 列名: snake_case 英文,兼容葡语别名（atividade / funcao / valor ...）
// 数值: 兼容 "0.24" 与 "0,24"、"1.234,56"、"R$ 3,00"
// ==========================================

use crate::domain::activity::ActivityTier;
use crate::domain::kpi::KpiWeight;
use crate::domain::types::Shift;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, UniversalFileParser};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

// ==========================================
// 列名（主名 + 别名）
// ==========================================
const COL_ACTIVITY: &[&str] = &["activity_name", "atividade"];
const COL_ROLE: &[&str] = &["role", "funcao", "função", "cargo"];
const COL_MIN_PRODUCTIVITY: &[&str] = &["min_productivity", "produtividade_minima"];
const COL_RATE: &[&str] = &["rate_amount", "valor_unitario", "valor"];
const COL_LEVEL: &[&str] = &["level_label", "nivel", "nível"];
const COL_UNIT: &[&str] = &["unit", "unidade"];
const COL_KPI: &[&str] = &["kpi_name", "nome_kpi", "kpi"];
const COL_SHIFT: &[&str] = &["shift", "turno"];
const COL_AMOUNT: &[&str] = &["amount", "peso", "valor"];
const COL_ACTIVE: &[&str] = &["active", "ativo"];

// ==========================================
// ReferenceTableLoader - 参考表加载器
// ==========================================
pub struct ReferenceTableLoader {
    parser: UniversalFileParser,
}

impl Default for ReferenceTableLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceTableLoader {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
        }
    }

    /// 加载生产率档位表并校验阶梯
    pub fn load_activity_tiers<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<ActivityTier>> {
        let records = self.parser.parse(path)?;
        let tiers = map_activity_tiers(&records)?;
        validate_tier_staircase(&tiers)?;
        Ok(tiers)
    }

    /// 加载 KPI 权重表
    pub fn load_kpi_weights<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<KpiWeight>> {
        let records = self.parser.parse(path)?;
        map_kpi_weights(&records)
    }
}

// ==========================================
// 行映射
// ==========================================

/// 行记录 → ActivityTier（行号从 1 开始,不含表头）
pub fn map_activity_tiers(records: &[RawRecord]) -> ImportResult<Vec<ActivityTier>> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| -> ImportResult<ActivityTier> {
            let row = idx + 1;
            Ok(ActivityTier {
                activity_name: required(record, row, COL_ACTIVITY)?.to_string(),
                role: required(record, row, COL_ROLE)?.to_string(),
                min_productivity: decimal_field(record, row, COL_MIN_PRODUCTIVITY)?,
                rate_amount: decimal_field(record, row, COL_RATE)?,
                level_label: required(record, row, COL_LEVEL)?.to_string(),
                unit: optional(record, COL_UNIT).unwrap_or_default().to_string(),
            })
        })
        .collect()
}

/// 行记录 → KpiWeight（shift 缺省为 Geral,active 缺省为 true,amount 不为负）
pub fn map_kpi_weights(records: &[RawRecord]) -> ImportResult<Vec<KpiWeight>> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| -> ImportResult<KpiWeight> {
            let row = idx + 1;

            let shift = Shift::from_str(optional(record, COL_SHIFT).unwrap_or_default()).map_err(
                |message| ImportError::TypeConversionError {
                    row,
                    field: COL_SHIFT[0].to_string(),
                    message,
                },
            )?;

            let active = match optional(record, COL_ACTIVE) {
                Some(raw) => parse_bool(raw).ok_or_else(|| ImportError::TypeConversionError {
                    row,
                    field: COL_ACTIVE[0].to_string(),
                    message: format!("无法识别的布尔值: {}", raw),
                })?,
                None => true,
            };

            let amount = decimal_field(record, row, COL_AMOUNT)?;
            if amount < Decimal::ZERO {
                return Err(ImportError::TypeConversionError {
                    row,
                    field: COL_AMOUNT[0].to_string(),
                    message: format!("KPI 金额不能为负: {}", amount),
                });
            }

            Ok(KpiWeight {
                kpi_name: required(record, row, COL_KPI)?.to_string(),
                role: required(record, row, COL_ROLE)?.to_string(),
                shift,
                amount,
                active,
            })
        })
        .collect()
}

// ==========================================
// 阶梯校验
// ==========================================

/// 同一 (作业, 岗位) 的档位下限必须严格递增,且下限/单价不为负
pub fn validate_tier_staircase(tiers: &[ActivityTier]) -> ImportResult<()> {
    let mut groups: BTreeMap<(&str, &str), Vec<&ActivityTier>> = BTreeMap::new();
    for tier in tiers {
        groups
            .entry((tier.activity_name.as_str(), tier.role.as_str()))
            .or_default()
            .push(tier);
    }

    for ((activity, role), mut group) in groups {
        let staircase_error = |message: String| ImportError::TierStaircaseError {
            activity: activity.to_string(),
            role: role.to_string(),
            message,
        };

        group.sort_by(|a, b| a.min_productivity.cmp(&b.min_productivity));

        for tier in &group {
            if tier.min_productivity < Decimal::ZERO || tier.rate_amount < Decimal::ZERO {
                return Err(staircase_error(format!(
                    "档位 {} 的下限或单价为负 (min={}, rate={})",
                    tier.level_label, tier.min_productivity, tier.rate_amount
                )));
            }
        }

        for pair in group.windows(2) {
            if pair[0].min_productivity == pair[1].min_productivity {
                return Err(staircase_error(format!(
                    "档位 {} 与 {} 下限相同: {}",
                    pair[0].level_label, pair[1].level_label, pair[0].min_productivity
                )));
            }
        }
    }

    Ok(())
}

// ==========================================
// 字段读取工具
// ==========================================

fn optional<'a>(record: &'a RawRecord, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| record.get(*name))
        .map(|value| value.as_str())
        .find(|value| !value.is_empty())
}

fn required<'a>(record: &'a RawRecord, row: usize, names: &[&str]) -> ImportResult<&'a str> {
    optional(record, names).ok_or_else(|| ImportError::MissingColumn {
        row,
        column: names[0].to_string(),
    })
}

fn decimal_field(record: &RawRecord, row: usize, names: &[&str]) -> ImportResult<Decimal> {
    let raw = required(record, row, names)?;
    parse_decimal(raw).ok_or_else(|| ImportError::TypeConversionError {
        row,
        field: names[0].to_string(),
        message: format!("无法解析数值: {}", raw),
    })
}

/// 宽松数值解析（货币符号、巴西千分位、小数逗号）
///
/// 有歧义的写法返回 None,不猜测:
/// - "1,234.56"（美式千分位）
/// - "1,234"（逗号后恰好三位且整数部分非 0,可能是千分位）
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let normalized = match (cleaned.rfind('.'), cleaned.rfind(',')) {
        // 1.234,56 → 1234.56
        (Some(dot), Some(comma)) if dot < comma => cleaned.replace('.', "").replace(',', "."),
        // 1,234.56
        (Some(_), Some(_)) => return None,
        // 0,24 → 0.24
        (None, Some(comma)) => {
            let (int_part, frac_part) = (&cleaned[..comma], &cleaned[comma + 1..]);
            let int_digits = int_part.trim_start_matches(['-', '+']);
            if frac_part.len() == 3 && !int_digits.trim_start_matches('0').is_empty() {
                return None;
            }
            cleaned.replace(',', ".")
        }
        _ => cleaned,
    };

    Decimal::from_str(&normalized).ok()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "sim" | "s" => Some(true),
        "0" | "false" | "no" | "n" | "não" | "nao" => Some(false),
        _ => None,
    }
}
