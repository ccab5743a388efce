use super::ExamLevel;
use std::fmt::Display;

/// 考号
///
/// 由学校编号、学生编号、考试年份组成，例如 `S0101/0023/2019`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// 学校编号（已转小写，如 `s0101`）
    pub school_number: String,

    /// 学生编号
    pub student_number: String,

    /// 考试年份
    pub year: i32,

    /// 考试级别
    pub level: ExamLevel,
}

impl Identifier {
    pub fn new(
        school_number: impl Into<String>,
        student_number: impl Into<String>,
        year: i32,
        level: ExamLevel,
    ) -> Self {
        Self {
            school_number: school_number.into().to_lowercase(),
            student_number: student_number.into(),
            year,
            level,
        }
    }

    /// 结果表第一列中的考试编号，用作匹配键
    pub fn examination_number(&self) -> String {
        format!("{}/{}", self.school_number.to_lowercase(), self.student_number)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {} 年份#{}]",
            self.level,
            self.examination_number(),
            self.year
        )
    }
}

/// 数据源：结果页面地址 + 结果表序号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub url: String,

    /// 页面中第几个 `<table>`（从 0 开始）
    pub table_index: usize,
}
