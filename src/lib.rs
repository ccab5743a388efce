//! # NECTA Results
//!
//! 根据考号查询 NECTA 考试成绩
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 持有 HTTP 客户端，只暴露"抓取页面"能力
//! - `PageFetcher` - 可替换的抓取接口，测试时使用离线实现
//!
//! ### ② 业务能力层（Services）
//! - `identifier_parser` - 考号校验与拆分
//! - `url_resolver` - 年份 / 级别 → 结果页面地址与表格序号
//! - `table_matcher` - 在结果表中定位考生所在行
//! - `result_extractor` - 提取性别、等级、总分、科目成绩
//! - `response_builder` - 新旧接口各自的响应结构
//!
//! ### ③ 流程层（Workflow）
//! - `LookupFlow` - 解析 → 地址 → 抓取 → 匹配 → 提取，新旧接口为同一流程的两个分支
//!
//! ### ④ 入口（App）
//! - `NectaClient` - `lookup` / `lookup_default` / `legacy_lookup`
//! - `result` - 使用默认配置的旧接口查询

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::{result, NectaClient};
pub use clients::{HttpPageFetcher, PageFetcher};
pub use config::Config;
pub use error::{LookupError, LookupResult};
pub use models::{
    ErrorRecord, ExamLevel, Identifier, LegacyRecord, LookupResponse, ResolvedSource,
    ResultRecord,
};
pub use services::UrlResolver;
pub use workflow::{LookupFlow, LookupVariant};
