//! 结果页面地址解析服务
//!
//! NECTA 在不同年份把结果放在不同域名下：
//! - 2003-2015 的 csee 结果只存在于归档站点
//! - 2016 年起的历年结果在 onlinesys 域名
//! - 当年刚公布的结果先放在 matokeo 域名，3-5 个月后才迁回 onlinesys
//!
//! 个别年份的地址与通用规则不一致，统一记录在覆盖表里，优先于通用规则

use crate::error::{LookupError, LookupResult};
use crate::models::{ExamLevel, Identifier, ResolvedSource};
use chrono::Datelike;
use phf::phf_map;
use tracing::debug;

const ARCHIVE_BASE: &str = "https://maktaba.tetea.org/exam-results";
const ONLINESYS_BASE: &str = "https://onlinesys.necta.go.tz/results";
const MATOKEO_BASE: &str = "https://matokeo.necta.go.tz/results";

const ARCHIVE_FIRST_YEAR: i32 = 2003;
const ARCHIVE_LAST_YEAR: i32 = 2015;
const ONLINESYS_FIRST_YEAR: i32 = 2016;

/// 从该年份之后（不含）结果表前多了两个表格
const TABLE_SHIFT_AFTER_YEAR: i32 = 2018;

/// 旧接口中 `results/` 子路径出现的起始年份（不含）
const LEGACY_RESULTS_SEGMENT_AFTER_YEAR: i32 = 2014;

/// 按年份覆盖的地址模板，键为 `级别:年份`，`{school}` 为学校编号占位
static YEAR_OVERRIDES: phf::Map<&'static str, &'static str> = phf_map! {
    "csee:2021" => "https://onlinesys.necta.go.tz/results/2021/csee/results/{school}.htm",
    "csee:2022" => "https://matokeo.necta.go.tz/csee2022/results/{school}.htm",
};

/// 旧接口的覆盖表，键为年份
static LEGACY_YEAR_OVERRIDES: phf::Map<&'static str, &'static str> = phf_map! {
    "2021" => "https://onlinesys.necta.go.tz/results/2021/csee/results/{school}.htm",
    "2022" => "https://matokeo.necta.go.tz/csee2022/results/{school}.htm",
};

/// 结果表在页面中的序号
pub fn table_index(year: i32) -> usize {
    if year > TABLE_SHIFT_AFTER_YEAR {
        2
    } else {
        0
    }
}

fn fill_template(template: &str, school_number: &str) -> String {
    template.replace("{school}", school_number)
}

/// 地址解析器
///
/// 当前年份由外部注入，保证解析结果只依赖输入参数
#[derive(Debug, Clone, Copy)]
pub struct UrlResolver {
    calendar_year: i32,
}

impl UrlResolver {
    /// 使用指定的日历年份
    pub fn new(calendar_year: i32) -> Self {
        Self { calendar_year }
    }

    /// 使用本地时钟的当前年份
    pub fn from_clock() -> Self {
        Self::new(chrono::Local::now().year())
    }

    /// 有固定年份时使用固定年份，否则读取时钟
    pub fn with_reference_year(reference_year: Option<i32>) -> Self {
        reference_year.map_or_else(Self::from_clock, Self::new)
    }

    pub fn calendar_year(&self) -> i32 {
        self.calendar_year
    }

    /// 该级别"最新一届"的考试年份
    pub fn current_year(&self, level: ExamLevel) -> i32 {
        self.calendar_year - level.publication_lag()
    }

    pub fn resolve_identifier(&self, identifier: &Identifier) -> LookupResult<ResolvedSource> {
        self.resolve(identifier.year, &identifier.school_number, identifier.level)
    }

    /// 计算结果页面地址和结果表序号
    pub fn resolve(
        &self,
        year: i32,
        school_number: &str,
        level: ExamLevel,
    ) -> LookupResult<ResolvedSource> {
        let url = match Self::override_url(year, school_number, level) {
            Some(url) => url,
            None => self.range_url(year, school_number, level)?,
        };

        debug!("{} {} 年 {} -> {}", level, year, school_number, url);

        Ok(ResolvedSource {
            url,
            table_index: table_index(year),
        })
    }

    fn override_url(year: i32, school_number: &str, level: ExamLevel) -> Option<String> {
        let key = format!("{}:{}", level.as_str(), year);
        YEAR_OVERRIDES
            .get(key.as_str())
            .map(|template| fill_template(template, school_number))
    }

    fn range_url(&self, year: i32, school_number: &str, level: ExamLevel) -> LookupResult<String> {
        let current = self.current_year(level);

        if level == ExamLevel::Csee && (ARCHIVE_FIRST_YEAR..=ARCHIVE_LAST_YEAR).contains(&year) {
            return Ok(format!(
                "{}/{}{}/{}.htm",
                ARCHIVE_BASE,
                level.upper(),
                year,
                school_number
            ));
        }

        if (ONLINESYS_FIRST_YEAR..current).contains(&year) {
            return Ok(format!(
                "{}/{}/{}/results/{}.htm",
                ONLINESYS_BASE,
                year,
                level.as_str(),
                school_number
            ));
        }

        if year == current && year >= ONLINESYS_FIRST_YEAR {
            return Ok(format!(
                "{}/{}/{}/results/{}.htm",
                MATOKEO_BASE,
                year,
                level.as_str(),
                school_number
            ));
        }

        Err(LookupError::UnsupportedYear { year, level })
    }
}

/// 旧接口的地址规则
///
/// 不区分级别，也不会失败：2014 年以后带 `results/` 子路径，之前不带
pub fn resolve_legacy(year: i32, school_number: &str) -> ResolvedSource {
    let url = match LEGACY_YEAR_OVERRIDES.get(year.to_string().as_str()) {
        Some(template) => fill_template(template, school_number),
        None if year > LEGACY_RESULTS_SEGMENT_AFTER_YEAR => format!(
            "{}/{}/csee/results/{}.htm",
            ONLINESYS_BASE, year, school_number
        ),
        None => format!("{}/{}/csee/{}.htm", ONLINESYS_BASE, year, school_number),
    };

    ResolvedSource {
        url,
        table_index: table_index(year),
    }
}
