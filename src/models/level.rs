/// 考试级别
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExamLevel {
    /// 中学毕业考试（Form Four），成绩次年公布
    #[default]
    Csee,
    /// 高中毕业考试（Form Six），成绩当年公布
    Acsee,
}

impl ExamLevel {
    /// 小写名称，用于 URL 路径
    pub fn as_str(self) -> &'static str {
        match self {
            ExamLevel::Csee => "csee",
            ExamLevel::Acsee => "acsee",
        }
    }

    /// 大写名称，用于归档站点路径
    pub fn upper(self) -> &'static str {
        match self {
            ExamLevel::Csee => "CSEE",
            ExamLevel::Acsee => "ACSEE",
        }
    }

    /// 从字符串解析（不区分大小写）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csee" => Some(ExamLevel::Csee),
            "acsee" => Some(ExamLevel::Acsee),
            _ => None,
        }
    }

    /// 成绩公布年份相对考试年份的偏移
    ///
    /// csee 的 Y 年成绩在 Y+1 年公布，acsee 当年公布
    pub fn publication_lag(self) -> i32 {
        match self {
            ExamLevel::Csee => 1,
            ExamLevel::Acsee => 0,
        }
    }
}

impl std::fmt::Display for ExamLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
