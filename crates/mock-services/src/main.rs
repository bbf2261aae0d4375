//! Mock Showcase CLI
//!
//! 组件展示页 mock 数据服务的命令行入口点。

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use mock_services::cli::{Cli, CommandRunner};
use mock_services::factory::MockServiceFactory;
use showcase_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load("mock-showcase").context("加载配置失败")?;
    cli.apply_overrides(&mut config);

    // 优先使用环境变量 RUST_LOG，否则使用配置中的级别
    showcase_shared::observability::init(&config.observability)?;

    let factory = MockServiceFactory::get_instance((&config).into());
    let runner = CommandRunner::new(Arc::clone(&factory));

    runner.run(cli.command).await
}
