// ==========================================
// 仓储绩效奖金系统 - 计算配置
// ==========================================
// 加载顺序: 默认值 → 配置文件(JSON) → 环境变量覆写
// 配置文件: $WAREHOUSE_BONUS_CONFIG 或 <config_dir>/warehouse-bonus/config.json
// ==========================================

use crate::domain::activity::ActivityTier;
use crate::domain::kpi::KpiWeight;
use crate::domain::remuneration::ReferenceData;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // ===== 配置文件 =====
    pub const CONFIG_PATH_ENV: &str = "WAREHOUSE_BONUS_CONFIG";
    pub const CONFIG_DIR_NAME: &str = "warehouse-bonus";
    pub const CONFIG_FILE_NAME: &str = "config.json";

    // ===== 环境变量覆写 =====
    pub const VALID_TASK_RATE: &str = "WAREHOUSE_BONUS_VALID_TASK_RATE";
    pub const VALID_TASK_ROLES: &str = "WAREHOUSE_BONUS_VALID_TASK_ROLES";
    pub const KPI_MAX_PER_DAY: &str = "WAREHOUSE_BONUS_KPI_MAX_PER_DAY";
    pub const KPI_MAX_PER_MONTH: &str = "WAREHOUSE_BONUS_KPI_MAX_PER_MONTH";
    pub const ACTIVITY_TIERS_PATH: &str = "WAREHOUSE_BONUS_ACTIVITY_TIERS";
    pub const KPI_WEIGHTS_PATH: &str = "WAREHOUSE_BONUS_KPI_WEIGHTS";
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// KPI 限额配置（调用方策略）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiLimitConfig {
    /// 每员工每天最多计入的 KPI 数
    #[serde(default)]
    pub max_per_day: Option<u32>,
    /// 每员工每自然月最多计入的 KPI 数
    #[serde(default)]
    pub max_per_month: Option<u32>,
}

impl Default for KpiLimitConfig {
    fn default() -> Self {
        Self {
            max_per_day: Some(2),
            max_per_month: None,
        }
    }
}

// ==========================================
// 参考数据文件路径
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePaths {
    #[serde(default)]
    pub activity_tiers_path: Option<PathBuf>,
    #[serde(default)]
    pub kpi_weights_path: Option<PathBuf>,
}

// ==========================================
// CalculatorConfig - 计算配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// 有效任务单价 (货币/任务)
    #[serde(default = "default_valid_task_rate")]
    pub valid_task_rate: Decimal,

    /// 按有效任务计酬的岗位
    #[serde(default = "default_valid_task_roles")]
    pub valid_task_roles: Vec<String>,

    #[serde(default)]
    pub kpi_limit: KpiLimitConfig,

    #[serde(default)]
    pub reference: ReferencePaths,
}

fn default_valid_task_rate() -> Decimal {
    // 0.093
    Decimal::new(93, 3)
}

fn default_valid_task_roles() -> Vec<String> {
    vec!["Operador de Empilhadeira".to_string()]
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            valid_task_rate: default_valid_task_rate(),
            valid_task_roles: default_valid_task_roles(),
            kpi_limit: KpiLimitConfig::default(),
            reference: ReferencePaths::default(),
        }
    }
}

impl CalculatorConfig {
    /// 按默认顺序加载配置（文件可缺省）
    pub fn load() -> ConfigResult<Self> {
        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 配置文件路径: 环境变量优先,其次系统配置目录
    pub fn config_file_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(config_keys::CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }

        dirs::config_dir().map(|dir| {
            dir.join(config_keys::CONFIG_DIR_NAME)
                .join(config_keys::CONFIG_FILE_NAME)
        })
    }

    /// 从 JSON 文件读取
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 应用覆写（lookup 通常为环境变量读取,测试中可注入）
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value_of = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(raw) = value_of(config_keys::VALID_TASK_RATE) {
            // 兼容小数逗号 (0,093)
            self.valid_task_rate = Decimal::from_str(&raw.replace(',', "."))
                .map_err(|e| value_error(config_keys::VALID_TASK_RATE, &raw, e))?;
        }

        if let Some(raw) = value_of(config_keys::VALID_TASK_ROLES) {
            self.valid_task_roles = raw
                .split(';')
                .map(|role| role.trim().to_string())
                .filter(|role| !role.is_empty())
                .collect();
        }

        if let Some(raw) = value_of(config_keys::KPI_MAX_PER_DAY) {
            self.kpi_limit.max_per_day = parse_limit(config_keys::KPI_MAX_PER_DAY, &raw)?;
        }

        if let Some(raw) = value_of(config_keys::KPI_MAX_PER_MONTH) {
            self.kpi_limit.max_per_month = parse_limit(config_keys::KPI_MAX_PER_MONTH, &raw)?;
        }

        if let Some(raw) = value_of(config_keys::ACTIVITY_TIERS_PATH) {
            self.reference.activity_tiers_path = Some(PathBuf::from(raw));
        }

        if let Some(raw) = value_of(config_keys::KPI_WEIGHTS_PATH) {
            self.reference.kpi_weights_path = Some(PathBuf::from(raw));
        }

        Ok(())
    }

    /// 配置校验
    pub fn validate(&self) -> ConfigResult<()> {
        if self.valid_task_rate < Decimal::ZERO {
            return Err(value_error(
                "valid_task_rate",
                &self.valid_task_rate.to_string(),
                "有效任务单价不能为负",
            ));
        }
        Ok(())
    }

    /// 组装单次计算用的参考数据快照
    pub fn reference_data(
        &self,
        activity_tiers: Vec<ActivityTier>,
        kpi_weights: Vec<KpiWeight>,
    ) -> ReferenceData {
        ReferenceData {
            activity_tiers,
            kpi_weights,
            valid_task_rate: self.valid_task_rate,
            valid_task_roles: self.valid_task_roles.iter().cloned().collect(),
        }
    }
}

/// 限额: 数字或 none/off（取消限额）
fn parse_limit(key: &str, raw: &str) -> ConfigResult<Option<u32>> {
    match raw.to_lowercase().as_str() {
        "none" | "off" | "unlimited" => Ok(None),
        _ => raw
            .parse::<u32>()
            .map(Some)
            .map_err(|e| value_error(key, raw, e)),
    }
}

fn value_error(key: &str, value: &str, message: impl ToString) -> ConfigError {
    ConfigError::ConfigValueError {
        key: key.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.valid_task_rate, Decimal::from_str("0.093").unwrap());
        assert_eq!(config.valid_task_roles, vec!["Operador de Empilhadeira"]);
        assert_eq!(config.kpi_limit.max_per_day, Some(2));
        assert_eq!(config.kpi_limit.max_per_month, None);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CalculatorConfig::default();
        config
            .apply_overrides(lookup_from(&[
                (config_keys::VALID_TASK_RATE, "0,1"),
                (config_keys::VALID_TASK_ROLES, "Operador de Empilhadeira; Operador de Reach"),
                (config_keys::KPI_MAX_PER_DAY, "off"),
                (config_keys::KPI_MAX_PER_MONTH, "20"),
                (config_keys::ACTIVITY_TIERS_PATH, "/data/tiers.csv"),
            ]))
            .unwrap();

        assert_eq!(config.valid_task_rate, Decimal::from_str("0.1").unwrap());
        assert_eq!(config.valid_task_roles.len(), 2);
        assert_eq!(config.kpi_limit.max_per_day, None);
        assert_eq!(config.kpi_limit.max_per_month, Some(20));
        assert_eq!(
            config.reference.activity_tiers_path,
            Some(PathBuf::from("/data/tiers.csv"))
        );
    }

    #[test]
    fn test_invalid_override_reported_with_key() {
        let mut config = CalculatorConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[(config_keys::KPI_MAX_PER_DAY, "dois")]))
            .unwrap_err();

        assert!(err.to_string().contains(config_keys::KPI_MAX_PER_DAY));
    }

    #[test]
    fn test_from_file_with_partial_fields() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "valid_task_rate": 0.12, "kpi_limit": {{ "max_per_month": 30 }} }}"#)
            .unwrap();

        let config = CalculatorConfig::from_file(file.path()).unwrap();

        assert_eq!(config.valid_task_rate, Decimal::from_str("0.12").unwrap());
        assert_eq!(config.valid_task_roles, vec!["Operador de Empilhadeira"]);
        assert_eq!(config.kpi_limit.max_per_day, None);
        assert_eq!(config.kpi_limit.max_per_month, Some(30));
    }

    #[test]
    fn test_negative_rate_fails_validation() {
        let config = CalculatorConfig {
            valid_task_rate: Decimal::from_str("-0.01").unwrap(),
            ..CalculatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reference_data_snapshot() {
        let config = CalculatorConfig::default();
        let reference = config.reference_data(Vec::new(), Vec::new());

        assert!(reference.is_valid_task_role("Operador de Empilhadeira"));
        assert!(!reference.is_valid_task_role("Ajudante de Armazém"));
        assert_eq!(reference.valid_task_rate, config.valid_task_rate);
    }
}
