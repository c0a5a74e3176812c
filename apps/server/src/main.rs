use agora::domain::config::{ApiConfig, LoggingConfig};
use agora::kernel::config::load_config;
use agora_logger::{Logger, parse_level};
use agora_server::Server;
use anyhow::Context;

fn init_logger(cfg: &LoggingConfig) -> anyhow::Result<Logger> {
    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).level(parse_level(&cfg.level)?);

    let logger = match &cfg.directory {
        Some(directory) => builder.path(directory).json(cfg.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}

#[agora_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig = load_config(None::<&str>).context("Critical: Configuration is malformed")?;

    let _log = init_logger(&cfg.logging)?;

    Server::builder().config(cfg).build()?.run().await
}
