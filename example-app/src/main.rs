//! # 示例应用程序
//!
//! 演示如何启动容器、按 `BEAN_NAME` 查找 bean 以及扫描注册数据对象

use anyhow::Context;
use clap::{Parser, Subcommand};
use config_impl::{PropertyManager, TomlPropertySource};
use di_abstractions::BeanFactory;
use di_impl::{DefinitionLoader, JsonObjectRegistry};
use infrastructure_composition::{
    init_logging, scan_path, ContainerAccessor, ContainerBootstrap, ContextDefinitions,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod messages;
mod services;

use services::MessageService;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "容器桥接示例应用")]
struct Args {
    /// 属性文件路径
    #[arg(short, long, default_value = "config/app.toml")]
    properties: PathBuf,

    /// `classpath*:` 搜索根目录，可重复
    #[arg(long = "search-root")]
    search_roots: Vec<PathBuf>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 启动容器并列出所有 bean
    Beans {
        /// 定义位置，未指定时使用配置的位置
        #[arg(short, long = "location")]
        locations: Vec<String>,
    },
    /// 启动容器并调用 messageService
    Greet,
    /// 扫描模块路径并注册数据对象
    Scan {
        /// 模块路径，`.` 或 `::` 分隔
        #[arg(default_value = "example_app.messages")]
        path: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level)?;
    info!("启动容器桥接示例应用");

    let properties = PropertyManager::global();
    if args.properties.exists() {
        let source = TomlPropertySource::from_file(&args.properties)
            .with_context(|| format!("无法加载属性文件 {}", args.properties.display()))?;
        properties.add_source(Arc::new(source));
    }

    let mut loader = DefinitionLoader::new();
    for root in &args.search_roots {
        loader.add_search_root(root);
    }
    let bootstrap = ContainerBootstrap::new(properties).with_loader(loader);

    match args.command {
        Command::Beans { locations } => list_beans(&bootstrap, locations).await,
        Command::Greet => greet(&bootstrap).await,
        Command::Scan { path } => scan(&path),
    }
}

/// 列出容器中的 bean
async fn list_beans(bootstrap: &ContainerBootstrap, locations: Vec<String>) -> anyhow::Result<()> {
    let accessor = if locations.is_empty() {
        bootstrap.instance().await?
    } else {
        bootstrap
            .get_container_bean_with::<ContainerAccessor>(&ContextDefinitions::new(locations))
            .await?
    };

    let factory = accessor
        .bean_factory()
        .context("访问器未由容器管理")?;
    for name in factory.bean_names() {
        println!("{}", name);
    }
    Ok(())
}

/// 通过容器获取 messageService
async fn greet(bootstrap: &ContainerBootstrap) -> anyhow::Result<()> {
    let service = bootstrap.get_container_bean::<MessageService>().await?;
    for line in service.render() {
        println!("{}", line);
    }
    Ok(())
}

/// 扫描数据对象并打印注册结果
fn scan(path: &str) -> anyhow::Result<()> {
    let report = scan_path(path);
    println!("{}", report);

    let registry = JsonObjectRegistry::global();
    for type_name in registry.registered_types() {
        let json = registry.to_json(type_name).unwrap_or_default();
        println!("{} {}", type_name, serde_json::to_string(&json)?);
    }
    Ok(())
}
