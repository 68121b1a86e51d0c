// ==========================================
// 仓储绩效奖金系统 - 领域类型定义
// ==========================================
// 班次 / 档位标签等枚举
// 序列化格式: 与业务数据一致（葡语原文）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 班次 (Shift)
// ==========================================
// Geral 为通用班次: KPI 权重行的 shift=Geral 表示对该岗位所有班次生效
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shift {
    #[serde(rename = "Manhã")]
    Manha, // 早班
    #[serde(rename = "Tarde")]
    Tarde, // 午班
    #[serde(rename = "Noite")]
    Noite, // 夜班
    #[serde(rename = "Geral")]
    Geral, // 通用
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Manha => "Manhã",
            Shift::Tarde => "Tarde",
            Shift::Noite => "Noite",
            Shift::Geral => "Geral",
        }
    }

    /// 权重行的班次是否适用于员工班次
    pub fn applies_to(&self, worker_shift: Shift) -> bool {
        *self == Shift::Geral || *self == worker_shift
    }
}

impl Default for Shift {
    fn default() -> Self {
        Shift::Geral
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Shift {
    type Err = String;

    /// 导入表格时宽松解析（大小写、重音、空值）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manhã" | "manha" | "morning" => Ok(Shift::Manha),
            "tarde" | "afternoon" => Ok(Shift::Tarde),
            "noite" | "night" => Ok(Shift::Noite),
            "geral" | "" | "all" => Ok(Shift::Geral),
            other => Err(format!("未知班次: {}", other)),
        }
    }
}
