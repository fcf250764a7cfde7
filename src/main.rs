mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};

use cli::{Cli, Commands, ConfigAction, OutputFormat};
use review_estimator::config::Config;
use review_estimator::models::CheckSet;
use review_estimator::operations::{accept_defaults, analyze, CheckPlan, InteractiveCollector};
use review_estimator::scanner::RepositorySource;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志，日志写到 stderr，stdout 只输出报告
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    // 根据命令执行相应操作
    match cli.command {
        Commands::Estimate {
            path,
            url,
            defaults,
            checks,
            lines_per_hour,
            hours_per_day,
            format,
            output,
            parallel,
            skip_blank_lines,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(lines_per_hour) = lines_per_hour {
                config.estimation.lines_per_hour = lines_per_hour;
            }
            if let Some(hours_per_day) = hours_per_day {
                config.estimation.hours_per_day = hours_per_day;
            }
            config.scan.parallel |= parallel;
            config.scan.skip_blank_lines |= skip_blank_lines;
            config.validate()?;

            let source = match url {
                Some(url) => RepositorySource::Remote(url),
                None => RepositorySource::Local(path.unwrap_or_else(|| PathBuf::from("."))),
            };

            let check_set = collect_checks(&config, defaults, checks.as_deref())?;
            run_estimate(&config, &source, check_set, format, output.as_deref())
        }
        Commands::Config { action } => run_config(action, cli.config.as_deref()),
    }
}

/// 加载配置
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(config_path) => Config::load_from_file(config_path)
            .with_context(|| format!("无法加载配置文件: {}", config_path.display())),
        None => Ok(Config::load_or_default()?),
    }
}

/// 按命令行选项选择检查项的来源
fn collect_checks(config: &Config, defaults: bool, plan_path: Option<&Path>) -> Result<CheckSet> {
    let definitions = &config.checks.definitions;

    if let Some(plan_path) = plan_path {
        let plan = CheckPlan::load_from_file(plan_path)
            .with_context(|| format!("无法加载检查计划: {}", plan_path.display()))?;
        return Ok(plan.build(definitions)?);
    }

    if defaults {
        return Ok(accept_defaults(definitions));
    }

    let stdin = io::stdin();
    let checks = InteractiveCollector::new(stdin.lock(), io::stdout()).collect(definitions)?;
    Ok(checks)
}

fn run_estimate(
    config: &Config,
    source: &RepositorySource,
    checks: CheckSet,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let checkout = source
        .acquire(&config.remote)
        .context("无法获取待分析的仓库")?;

    let analysis = analyze(checkout.root(), config, Some(checks), true)
        .with_context(|| format!("分析失败: {}", checkout.root().display()))?;

    let rendered = analysis.report().render(format.into())?;

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("无法写入报告: {}", path.display()))?;
            tracing::info!("报告已保存到: {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn run_config(action: ConfigAction, config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => Config::default_config_path()?,
    };

    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            let content = toml::to_string_pretty(&config).context("无法序列化配置")?;
            println!("{content}");
        }
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Reset => {
            Config::default().save_to_file(&path)?;
            tracing::info!("配置已重置: {}", path.display());
        }
    }

    Ok(())
}
