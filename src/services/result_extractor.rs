//! 成绩提取服务
//!
//! 行布局固定：0 考试编号 / 1 性别 / 2 总分 / 3 等级 / 4 科目成绩文本

use crate::error::{LookupError, LookupResult};
use crate::models::{LegacyRecord, ResultRecord};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

const MIN_CELLS: usize = 5;

/// 形如 `CIV - 'C'` 的科目成绩片段
fn subject_grade_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Z]+)\s*-\s*'([A-Z])'").expect("subject pattern is valid"))
}

/// 解析科目成绩文本
///
/// # 返回
/// 返回 (按顺序的科目列表, 科目 → 成绩)。
/// 科目列表保留重复项；映射中重复科目保持首次出现的位置，成绩以最后一次为准。
pub fn parse_subjects(text: &str) -> (Vec<String>, IndexMap<String, String>) {
    let mut subjects = Vec::new();
    let mut grades = IndexMap::new();

    for caps in subject_grade_regex().captures_iter(text) {
        let subject = caps[1].to_string();
        let grade = caps[2].to_string();
        subjects.push(subject.clone());
        grades.insert(subject, grade);
    }

    debug!("解析到 {} 个科目成绩", subjects.len());
    (subjects, grades)
}

fn check_cells(cells: &[String]) -> LookupResult<()> {
    if cells.len() < MIN_CELLS {
        return Err(LookupError::MalformedRow { cells: cells.len() });
    }
    Ok(())
}

/// 从匹配行构建新接口的结果
pub fn extract(cells: &[String], source: &str) -> LookupResult<ResultRecord> {
    check_cells(cells)?;

    let (subjects, subjects_grades) = parse_subjects(&cells[4]);

    Ok(ResultRecord {
        gender: cells[1].clone(),
        division: cells[3].clone(),
        points: cells[2].clone(),
        subjects,
        subjects_grades,
        source: source.to_string(),
    })
}

/// 从匹配行构建旧接口的结果，科目保持原始文本
pub fn extract_legacy(cells: &[String], source: &str) -> LookupResult<LegacyRecord> {
    check_cells(cells)?;

    Ok(LegacyRecord {
        gender: cells[1].clone(),
        division: cells[3].clone(),
        points: cells[2].clone(),
        subjects: cells[4].clone(),
        source: source.to_string(),
    })
}
