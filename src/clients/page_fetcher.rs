/// 结果页面抓取客户端
///
/// 查询流程只依赖 `PageFetcher`，测试时可以替换为离线实现
use crate::config::Config;
use crate::error::{LookupError, LookupResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// 页面抓取能力
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 获取页面原始 HTML
    ///
    /// 超时、DNS 失败、非 2xx 状态码都返回 `LookupError::Transport`
    async fn fetch_page(&self, url: &str) -> LookupResult<String>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for std::sync::Arc<T> {
    async fn fetch_page(&self, url: &str) -> LookupResult<String> {
        (**self).fetch_page(url).await
    }
}

/// 基于 reqwest 的 HTTP 抓取客户端
///
/// 固定超时，不重试
pub struct HttpPageFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpPageFetcher {
    /// 根据配置创建客户端
    pub fn new(config: &Config) -> LookupResult<Self> {
        let timeout = Duration::from_secs(config.fetch_timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, url: &str) -> LookupResult<String> {
        debug!("正在抓取页面: {} (超时 {:?})", url, self.timeout);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!("页面抓取失败 {}: {}", url, e);
                LookupError::transport(url, e)
            })?;

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::transport(url, e))?;

        debug!("页面抓取完成，长度: {} 字节", body.len());
        Ok(body)
    }
}
