use crate::clients::{HttpPageFetcher, PageFetcher};
use crate::config::Config;
use crate::error::LookupResult;
use crate::models::{ExamLevel, LookupResponse};
use crate::services::{response_builder, UrlResolver};
use crate::workflow::LookupFlow;
use tracing::debug;

/// 成绩查询入口
///
/// 提供两个相互独立的接口：
/// - `legacy_lookup`：旧接口，只接受 `学校/学生/年份`，返回 JSON 字符串
/// - `lookup`：新接口，支持点或斜杠分隔和考试级别，返回结构化结果
pub struct NectaClient<F = HttpPageFetcher> {
    flow: LookupFlow<F>,
}

impl NectaClient<HttpPageFetcher> {
    /// 根据配置创建使用 HTTP 抓取的客户端
    pub fn new(config: &Config) -> LookupResult<Self> {
        let fetcher = HttpPageFetcher::new(config)?;
        let resolver = UrlResolver::with_reference_year(config.reference_year);
        debug!(
            "初始化查询客户端: 日历年份 {}, 超时 {} 秒",
            resolver.calendar_year(),
            config.fetch_timeout_secs
        );
        Ok(Self::with_fetcher(fetcher, resolver))
    }
}

impl<F: PageFetcher> NectaClient<F> {
    /// 使用自定义抓取实现
    pub fn with_fetcher(fetcher: F, resolver: UrlResolver) -> Self {
        Self {
            flow: LookupFlow::new(fetcher, resolver),
        }
    }

    pub async fn lookup(&self, index_number: &str, level: &str) -> LookupResponse {
        self.flow.lookup(index_number, level).await
    }

    /// 新接口，级别默认为 csee
    pub async fn lookup_default(&self, index_number: &str) -> LookupResponse {
        self.lookup(index_number, ExamLevel::default().as_str()).await
    }

    pub async fn legacy_lookup(&self, index_number: &str) -> String {
        self.flow.legacy_lookup(index_number).await
    }
}

/// 使用默认配置执行旧接口查询
///
/// 客户端创建失败时同样返回旧接口的错误结构
pub async fn result(index_number: &str) -> String {
    match NectaClient::new(&Config::default()) {
        Ok(client) => client.legacy_lookup(index_number).await,
        Err(e) => response_builder::legacy_failed(&e),
    }
}
