// ==========================================
// 仓储绩效奖金系统 - API层错误类型
// ==========================================
// 职责: 汇总引擎/参考数据/导入错误,面向调用方
// 红线: 引擎错误原样透传（不改写类别与消息）
// ==========================================

use crate::engine::error::CalcError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 计算错误（透传）
    // ==========================================
    #[error(transparent)]
    Calculation(#[from] CalcError),

    // ==========================================
    // 参考数据错误
    // ==========================================
    #[error("参考数据不可用: {0}")]
    ReferenceDataUnavailable(String),

    #[error("参考表导入失败: {0}")]
    ImportError(String),
}

impl ApiError {
    /// 若为引擎错误,返回原始错误
    pub fn calc_error(&self) -> Option<&CalcError> {
        match self {
            ApiError::Calculation(err) => Some(err),
            _ => None,
        }
    }

    /// 错误类别代码
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Calculation(err) => err.kind(),
            ApiError::ReferenceDataUnavailable(_) => "REFERENCE_DATA_UNAVAILABLE",
            ApiError::ImportError(_) => "IMPORT_ERROR",
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_error_passes_through_unchanged() {
        let original = CalcError::UnknownActivity {
            activity: "Prod X".to_string(),
            role: "Conferente".to_string(),
        };
        let api_err: ApiError = original.clone().into();

        assert_eq!(api_err.calc_error(), Some(&original));
        assert_eq!(api_err.to_string(), original.to_string());
        assert_eq!(api_err.kind(), "UNKNOWN_ACTIVITY");
    }

    #[test]
    fn test_import_error_converted() {
        let api_err: ApiError = ImportError::FileNotFound("tiers.csv".to_string()).into();
        assert_eq!(api_err.kind(), "IMPORT_ERROR");
        assert!(api_err.to_string().contains("tiers.csv"));
    }
}
