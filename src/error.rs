//! 查询错误类型
//!
//! 所有错误都会在入口处被捕获并转换成对应的错误响应，
//! `Display` 的内容即响应中的 `error` 字段，因此保持英文。

use crate::models::ExamLevel;
use thiserror::Error;

/// 查询流程中可能出现的错误
#[derive(Debug, Error)]
pub enum LookupError {
    /// 考号格式错误或考试级别错误（不会发起网络请求）
    #[error("{0}")]
    Validation(String),

    /// 没有任何规则覆盖的考试年份
    #[error("Unsupported examination year {year} for level {level}")]
    UnsupportedYear { year: i32, level: ExamLevel },

    /// 网络请求失败（超时、DNS、非 2xx 状态码等）
    #[error("Failed to fetch {url}: {message}")]
    Transport { url: String, message: String },

    /// 页面中的表格数量不足
    #[error("Result table #{table_index} not found, page has {tables_found} table(s)")]
    PageStructure {
        table_index: usize,
        tables_found: usize,
    },

    /// 匹配到的行列数不足
    #[error("Malformed result row: expected at least 5 cells, found {cells}")]
    MalformedRow { cells: usize },
}

// ========== 便捷构造函数 ==========

impl LookupError {
    /// 考号格式错误
    pub fn invalid_index_number() -> Self {
        LookupError::Validation("Invalid index number".to_string())
    }

    /// 考试级别错误
    pub fn invalid_level() -> Self {
        LookupError::Validation("Invalid level".to_string())
    }

    /// 创建网络请求错误
    pub fn transport(url: impl Into<String>, source: impl std::fmt::Display) -> Self {
        LookupError::Transport {
            url: url.into(),
            message: source.to_string(),
        }
    }

    /// 是否属于用户输入类错误
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LookupError::Validation(_) | LookupError::UnsupportedYear { .. }
        )
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();
        LookupError::transport(url, err)
    }
}

// ========== Result 类型别名 ==========

/// 查询结果类型
pub type LookupResult<T> = Result<T, LookupError>;
