// ==========================================
// 仓储绩效奖金系统 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 引擎不重试、不包装、不返回部分结果
// ==========================================

use thiserror::Error;

/// 计算引擎错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// 数值输入非法（工时 <= 0、产量为负、任务数非整数等）,调用方可修正
    #[error("无效输入 (field={field}): {message}")]
    InvalidInput { field: String, message: String },

    /// (作业, 岗位) 未配置任何档位,属于参考数据缺口
    #[error("未配置生产率档位: activity={activity}, role={role}")]
    UnknownActivity { activity: String, role: String },

    /// 作业输入与有效任务输入冲突,属于调用方缺陷
    #[error("输入冲突: {0}")]
    ConflictingInput(String),
}

impl CalcError {
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// 错误类别代码（供调用方日志/展示）
    pub fn kind(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownActivity { .. } => "UNKNOWN_ACTIVITY",
            CalcError::ConflictingInput(_) => "CONFLICTING_INPUT",
        }
    }
}

/// Result 类型别名
pub type CalcResult<T> = Result<T, CalcError>;
