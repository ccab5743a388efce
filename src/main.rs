use anyhow::{bail, Result};
use necta_results::utils::logging;
use necta_results::{Config, NectaClient};

const USAGE: &str = "用法: necta_results <考号> [csee|acsee|--legacy]";

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    let mut args = std::env::args().skip(1);
    let Some(index_number) = args.next() else {
        bail!(USAGE);
    };
    let mode = args.next().unwrap_or_else(|| "csee".to_string());

    let client = NectaClient::new(&config)?;

    let output = if mode == "--legacy" {
        logging::log_startup(&index_number, "旧接口");
        client.legacy_lookup(&index_number).await
    } else {
        logging::log_startup(&index_number, &mode);
        let response = client.lookup(&index_number, &mode).await;
        serde_json::to_string_pretty(&response)?
    };

    println!("{}", output);

    Ok(())
}
