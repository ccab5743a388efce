//! 查询结果与错误响应的数据结构

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 查询成功的结果（新接口）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub gender: String,
    pub division: String,
    pub points: String,

    /// 按解析顺序排列的科目代码（不去重）
    pub subjects: Vec<String>,

    /// 科目 → 成绩，保持首次出现的顺序，重复科目以后出现的成绩为准
    pub subjects_grades: IndexMap<String, String>,

    /// 结果页面地址
    pub source: String,
}

/// 查询成功的结果（旧接口），科目为原始文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyRecord {
    pub gender: String,
    pub division: String,
    pub points: String,
    pub subjects: String,
    pub source: String,
}

/// 错误响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,

    /// 旧接口使用的状态码字段
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status_code: Option<u16>,

    /// 新接口"未找到"时使用的状态码字段
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub examination_number: Option<String>,
}

impl ErrorRecord {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Default::default()
        }
    }
}

/// 新接口的返回值
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LookupResponse {
    /// 找到结果
    Found(ResultRecord),
    /// 请求有效，但表中没有该考生
    NotFound(ErrorRecord),
    /// 校验、网络或解析失败
    Failed(ErrorRecord),
}

impl LookupResponse {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupResponse::Found(_))
    }

    pub fn record(&self) -> Option<&ResultRecord> {
        match self {
            LookupResponse::Found(record) => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorRecord> {
        match self {
            LookupResponse::Found(_) => None,
            LookupResponse::NotFound(e) | LookupResponse::Failed(e) => Some(e),
        }
    }
}
