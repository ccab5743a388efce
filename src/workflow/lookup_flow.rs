//! 成绩查询流程 - 流程层
//!
//! 核心职责：定义"一次查询"的完整处理流程
//!
//! 流程顺序：
//! 1. 解析考号 → 2. 计算地址 → 3. 抓取页面 → 4. 匹配行 → 5. 提取并构建响应
//!
//! 新旧两个接口共用同一条流程，只在解析、地址规则、提取和响应结构上分叉

use tracing::{debug, info, warn};

use crate::clients::PageFetcher;
use crate::error::{LookupError, LookupResult};
use crate::models::{Identifier, LookupResponse, ResolvedSource};
use crate::services::{
    identifier_parser, resolve_legacy, response_builder, result_extractor, table_matcher,
    UrlResolver,
};
use crate::utils::truncate_text;

/// 流程分支
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupVariant<'a> {
    /// 旧接口：只接受斜杠分隔，固定 csee，返回 JSON 字符串
    Legacy,
    /// 新接口：点或斜杠分隔，需要考试级别，返回结构化结果
    Current { level: &'a str },
}

/// 流程前四步的产物
#[derive(Debug, Clone)]
pub struct RowMatch {
    pub identifier: Identifier,
    pub source: ResolvedSource,
    /// 匹配行的单元格文本，`None` 表示表中没有该考生
    pub cells: Option<Vec<String>>,
}

/// 成绩查询流程
///
/// - 不持有跨调用的状态，每次查询相互独立
/// - 每次查询最多一次网络请求
pub struct LookupFlow<F> {
    fetcher: F,
    resolver: UrlResolver,
}

impl<F: PageFetcher> LookupFlow<F> {
    pub fn new(fetcher: F, resolver: UrlResolver) -> Self {
        Self { fetcher, resolver }
    }

    pub fn resolver(&self) -> &UrlResolver {
        &self.resolver
    }

    /// 执行共用流程：解析 → 地址 → 抓取 → 匹配
    pub async fn run(
        &self,
        variant: LookupVariant<'_>,
        index_number: &str,
    ) -> LookupResult<RowMatch> {
        let (identifier, source) = match variant {
            LookupVariant::Legacy => {
                let identifier = identifier_parser::parse_legacy(index_number)?;
                let source = resolve_legacy(identifier.year, &identifier.school_number);
                (identifier, source)
            }
            LookupVariant::Current { level } => {
                let identifier = identifier_parser::parse(index_number, level)?;
                let source = self.resolver.resolve_identifier(&identifier)?;
                (identifier, source)
            }
        };

        info!("🔍 {} 查询: {}", identifier, source.url);

        let page = self.fetcher.fetch_page(&source.url).await?;
        debug!("页面预览: {}", truncate_text(&page, 120));

        let cells = table_matcher::find_row(
            &page,
            source.table_index,
            &identifier.examination_number(),
        )?;

        Ok(RowMatch {
            identifier,
            source,
            cells,
        })
    }

    /// 新接口查询
    pub async fn lookup(&self, index_number: &str, level: &str) -> LookupResponse {
        let row = match self.run(LookupVariant::Current { level }, index_number).await {
            Ok(row) => row,
            Err(e) => {
                log_failure(index_number, &e);
                return response_builder::failed(&e);
            }
        };

        let Some(cells) = row.cells else {
            info!("{} 未找到考生", row.identifier);
            return response_builder::not_found(
                &row.source.url,
                &row.identifier.examination_number(),
            );
        };

        match result_extractor::extract(&cells, &row.source.url) {
            Ok(record) => {
                info!("✓ {} 查询成功，等级 {}", row.identifier, record.division);
                response_builder::found(record)
            }
            Err(e) => {
                warn!("⚠️ {} 结果行解析失败: {}", row.identifier, e);
                response_builder::failed(&e)
            }
        }
    }

    /// 旧接口查询，返回 JSON 字符串
    pub async fn legacy_lookup(&self, index_number: &str) -> String {
        let row = match self.run(LookupVariant::Legacy, index_number).await {
            Ok(row) => row,
            Err(e) => {
                log_failure(index_number, &e);
                return response_builder::legacy_failed(&e);
            }
        };

        let Some(cells) = row.cells else {
            info!("{} 未找到考生", row.identifier);
            return response_builder::legacy_not_found();
        };

        match result_extractor::extract_legacy(&cells, &row.source.url) {
            Ok(record) => response_builder::legacy_found(&record),
            Err(e) => {
                warn!("⚠️ {} 结果行解析失败: {}", row.identifier, e);
                response_builder::legacy_failed(&e)
            }
        }
    }
}

/// 输入错误只记 info，其余记 warn
fn log_failure(index_number: &str, err: &LookupError) {
    if err.is_user_error() {
        info!("考号 {} 无效: {}", index_number, err);
    } else {
        warn!("⚠️ 查询 {} 失败: {}", index_number, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// 离线抓取：返回固定页面并记录请求地址
    struct StubFetcher {
        page: Option<String>,
        calls: AtomicUsize,
        last_url: Mutex<Option<String>>,
    }

    impl StubFetcher {
        fn serving(page: &str) -> Self {
            Self {
                page: Some(page.to_string()),
                calls: AtomicUsize::new(0),
                last_url: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                page: None,
                calls: AtomicUsize::new(0),
                last_url: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch_page(&self, url: &str) -> LookupResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_url.lock().unwrap() = Some(url.to_string());
            self.page
                .clone()
                .ok_or_else(|| LookupError::transport(url, "operation timed out"))
        }
    }

    fn results_page(rows: &str) -> String {
        format!(
            "<html><body><table><tr><td>header</td></tr></table>\
             <table><tr><td>summary</td></tr></table>\
             <table><tr><th>CNO</th><th>SEX</th><th>AGGT</th><th>DIV</th><th>SUBJECTS</th></tr>{}</table>\
             </body></html>",
            rows
        )
    }

    fn flow(fetcher: StubFetcher) -> LookupFlow<StubFetcher> {
        LookupFlow::new(fetcher, UrlResolver::new(2025))
    }

    #[test]
    fn test_validation_failure_never_fetches() {
        let flow = flow(StubFetcher::serving("<table></table>"));
        let response = tokio_test::block_on(flow.lookup("BAD123", "csee"));
        assert_eq!(response.error().unwrap().error, "Invalid index number");
        assert_eq!(flow.fetcher.calls.load(Ordering::SeqCst), 0);

        let response = tokio_test::block_on(flow.lookup("S0101/0023/2020", "form4"));
        assert_eq!(response.error().unwrap().error, "Invalid level");
        assert_eq!(flow.fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unsupported_year_never_fetches() {
        let flow = flow(StubFetcher::serving("<table></table>"));
        let response = tokio_test::block_on(flow.lookup("S0101/0023/2010", "acsee"));
        assert!(matches!(response, LookupResponse::Failed(_)));
        assert_eq!(flow.fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_found_uses_shifted_table() {
        let page = results_page(
            "<tr><td>S0101/0023</td><td>F</td><td>17</td><td>II</td><td>MATH - 'A'BIO - 'B'</td></tr>",
        );
        let flow = flow(StubFetcher::serving(&page));
        let response = tokio_test::block_on(flow.lookup("S0101.0023.2020", "csee"));

        let record = response.record().expect("should be found");
        assert_eq!(record.subjects, vec!["MATH", "BIO"]);
        assert_eq!(
            record.source,
            "https://onlinesys.necta.go.tz/results/2020/csee/results/s0101.htm"
        );
        assert_eq!(
            flow.fetcher.last_url.lock().unwrap().as_deref(),
            Some(record.source.as_str())
        );
    }

    #[test]
    fn test_not_found_carries_source() {
        let page = results_page(
            "<tr><td>S0101/0099</td><td>M</td><td>20</td><td>III</td><td>CIV - 'C'</td></tr>",
        );
        let flow = flow(StubFetcher::serving(&page));
        let response = tokio_test::block_on(flow.lookup("S0101/0023/2020", "csee"));

        let LookupResponse::NotFound(err) = response else {
            panic!("expected not found");
        };
        assert_eq!(err.status, Some(404));
        assert_eq!(err.examination_number.as_deref(), Some("s0101/0023"));
        assert_eq!(
            err.source.as_deref(),
            Some("https://onlinesys.necta.go.tz/results/2020/csee/results/s0101.htm")
        );
    }

    #[test]
    fn test_transport_failure_is_generic_error() {
        let flow = flow(StubFetcher::failing());
        let response = tokio_test::block_on(flow.lookup("S0101/0023/2020", "csee"));
        let err = response.error().unwrap();
        assert!(err.error.contains("operation timed out"));
        assert!(err.status.is_none());
        assert_eq!(flow.fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_short_matched_row_is_failure() {
        let page = results_page("<tr><td>S0101/0023</td><td>F</td></tr>");
        let flow = flow(StubFetcher::serving(&page));
        let response = tokio_test::block_on(flow.lookup("S0101/0023/2020", "csee"));
        assert!(matches!(response, LookupResponse::Failed(_)));
    }

    #[test]
    fn test_legacy_uses_first_table_before_2019() {
        let page = "<table><tr><td>S0101/0023</td><td>M</td><td>25</td><td>III</td><td>CIV - 'C'</td></tr></table>";
        let flow = flow(StubFetcher::serving(page));
        let json = tokio_test::block_on(flow.legacy_lookup("S0101/0023/2013"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["subjects"], "CIV - 'C'");
        assert_eq!(
            value["source"],
            "https://onlinesys.necta.go.tz/results/2013/csee/s0101.htm"
        );
    }

    #[test]
    fn test_legacy_errors() {
        let flow = flow(StubFetcher::serving("<table></table>"));
        let json = tokio_test::block_on(flow.legacy_lookup("S0101.0023.2013"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status_code"], 500);
        assert_eq!(value["error"], "Invalid index number");
        assert_eq!(flow.fetcher.calls.load(Ordering::SeqCst), 0);

        let json = tokio_test::block_on(flow.legacy_lookup("S0101/0023/2013"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status_code"], 404);
        assert_eq!(value["error"], "Student is not found");
    }
}
