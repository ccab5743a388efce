//! 响应构建服务
//!
//! 新旧两个接口的返回结构不同，分别构建，互不影响

use crate::error::LookupError;
use crate::models::{ErrorRecord, LegacyRecord, LookupResponse, ResultRecord};
use serde::Serialize;
use tracing::error;

pub const NOT_FOUND_MESSAGE: &str = "Result not found";
pub const LEGACY_NOT_FOUND_MESSAGE: &str = "Student is not found";

const NOT_FOUND_STATUS: u16 = 404;
const FAILURE_STATUS: u16 = 500;

// ========== 新接口 ==========

pub fn found(record: ResultRecord) -> LookupResponse {
    LookupResponse::Found(record)
}

/// 未找到考生时附带数据源和考试编号，便于排查
pub fn not_found(source: &str, examination_number: &str) -> LookupResponse {
    LookupResponse::NotFound(ErrorRecord {
        error: NOT_FOUND_MESSAGE.to_string(),
        status: Some(NOT_FOUND_STATUS),
        source: Some(source.to_string()),
        examination_number: Some(examination_number.to_string()),
        ..Default::default()
    })
}

pub fn failed(err: &LookupError) -> LookupResponse {
    LookupResponse::Failed(ErrorRecord::new(err.to_string()))
}

// ========== 旧接口（返回 JSON 字符串）==========

pub fn legacy_found(record: &LegacyRecord) -> String {
    to_json(record)
}

pub fn legacy_not_found() -> String {
    to_json(&ErrorRecord {
        error: LEGACY_NOT_FOUND_MESSAGE.to_string(),
        status_code: Some(NOT_FOUND_STATUS),
        ..Default::default()
    })
}

pub fn legacy_failed(err: &LookupError) -> String {
    to_json(&ErrorRecord {
        error: err.to_string(),
        status_code: Some(FAILURE_STATUS),
        ..Default::default()
    })
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        error!("序列化响应失败: {}", e);
        format!(
            r#"{{"error":"Failed to serialize response","status_code":{}}}"#,
            FAILURE_STATUS
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use serde_json::{json, Value};

    #[test]
    fn test_not_found_shape() {
        let value = serde_json::to_value(not_found("https://x.test/s0001.htm", "s0001/0002")).unwrap();
        assert_eq!(
            value,
            json!({
                "error": "Result not found",
                "status": 404,
                "source": "https://x.test/s0001.htm",
                "examination_number": "s0001/0002"
            })
        );
    }

    #[test]
    fn test_failed_shape_has_only_error() {
        let value = serde_json::to_value(failed(&LookupError::invalid_level())).unwrap();
        assert_eq!(value, json!({ "error": "Invalid level" }));
    }

    #[test]
    fn test_found_shape_keeps_subject_order() {
        let mut grades = IndexMap::new();
        grades.insert("MATH".to_string(), "A".to_string());
        grades.insert("BIO".to_string(), "B".to_string());
        let response = found(ResultRecord {
            gender: "F".into(),
            division: "I".into(),
            points: "7".into(),
            subjects: vec!["MATH".into(), "BIO".into()],
            subjects_grades: grades,
            source: "u".into(),
        });

        let text = serde_json::to_string(&response).unwrap();
        assert!(text.contains(r#""subjects_grades":{"MATH":"A","BIO":"B"}"#));
    }

    #[test]
    fn test_legacy_shapes() {
        let not_found: Value = serde_json::from_str(&legacy_not_found()).unwrap();
        assert_eq!(
            not_found,
            json!({ "error": "Student is not found", "status_code": 404 })
        );

        let failed: Value =
            serde_json::from_str(&legacy_failed(&LookupError::MalformedRow { cells: 1 })).unwrap();
        assert_eq!(failed["status_code"], 500);
        assert!(failed.get("status").is_none());

        let found: Value = serde_json::from_str(&legacy_found(&LegacyRecord {
            gender: "M".into(),
            division: "IV".into(),
            points: "31".into(),
            subjects: "CIV - 'D'".into(),
            source: "u".into(),
        }))
        .unwrap();
        assert_eq!(
            found,
            json!({
                "gender": "M",
                "division": "IV",
                "points": "31",
                "subjects": "CIV - 'D'",
                "source": "u"
            })
        );
    }
}
