//! 考号解析服务
//!
//! 只负责校验和拆分考号字符串，不发起任何网络请求

use crate::error::{LookupError, LookupResult};
use crate::models::{ExamLevel, Identifier};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// 点分隔：`S0101.0023.2019`
const DOTTED_PATTERN: &str = r"^S[0-9]{4}\.[0-9]{4}\.[0-9]{4}$";
/// 斜杠分隔：`S0101/0023/2019`
const SLASHED_PATTERN: &str = r"^S[0-9]{4}/[0-9]{4}/[0-9]{4}$";

fn index_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("{}|{}", DOTTED_PATTERN, SLASHED_PATTERN))
            .expect("index number pattern is valid")
    })
}

/// 校验并解析新接口的考号与考试级别
///
/// 支持 `S####.####.####` 和 `S####/####/####` 两种格式
pub fn parse(index_number: &str, level: &str) -> LookupResult<Identifier> {
    if !index_number_regex().is_match(index_number) {
        debug!("考号格式错误: {}", index_number);
        return Err(LookupError::invalid_index_number());
    }

    let level = ExamLevel::parse(level).ok_or_else(LookupError::invalid_level)?;

    let delimiter = if index_number.contains('.') { '.' } else { '/' };
    let (school_number, student_number, year) = split_three(index_number, delimiter)?;

    Ok(Identifier::new(school_number, student_number, year, level))
}

/// 解析旧接口的考号
///
/// 只接受斜杠分隔的 `学校/学生/年份`，级别固定为 csee
pub fn parse_legacy(index_number: &str) -> LookupResult<Identifier> {
    let (school_number, student_number, year) = split_three(index_number.trim(), '/')?;
    Ok(Identifier::new(
        school_number,
        student_number,
        year,
        ExamLevel::Csee,
    ))
}

fn split_three(raw: &str, delimiter: char) -> LookupResult<(&str, &str, i32)> {
    let parts: Vec<&str> = raw.split(delimiter).collect();

    let [school_number, student_number, year] = parts.as_slice() else {
        return Err(LookupError::invalid_index_number());
    };

    if school_number.is_empty() || student_number.is_empty() {
        return Err(LookupError::invalid_index_number());
    }

    let year = year
        .parse::<i32>()
        .map_err(|_| LookupError::invalid_index_number())?;

    Ok((*school_number, *student_number, year))
}
