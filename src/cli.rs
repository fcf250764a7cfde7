use clap::{Parser, Subcommand};
use std::path::PathBuf;

use review_estimator::operations::ReportFormat;

#[derive(Parser)]
#[command(name = "review-estimator")]
#[command(about = "一个用于估算代码仓库人工审查工作量的 CLI 工具")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 详细输出
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 统计代码行数并估算审查时间
    Estimate {
        /// 本地仓库路径（默认当前目录）
        #[arg(conflicts_with = "url")]
        path: Option<PathBuf>,

        /// 远程仓库 URL，会被克隆到临时目录
        #[arg(short, long)]
        url: Option<String>,

        /// 全部附加检查项使用默认时长，不进行交互
        #[arg(long, conflicts_with = "checks")]
        defaults: bool,

        /// 从 TOML 检查计划文件读取附加检查项
        #[arg(long)]
        checks: Option<PathBuf>,

        /// 审查速度（行/小时）
        #[arg(long)]
        lines_per_hour: Option<f64>,

        /// 每个工作日的小时数
        #[arg(long)]
        hours_per_day: Option<f64>,

        /// 输出格式
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// 保存报告到文件
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 并行读取文件
        #[arg(long)]
        parallel: bool,

        /// 不统计空白行
        #[arg(long)]
        skip_blank_lines: bool,
    },

    /// 管理配置
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// 显示当前配置
    Show,

    /// 显示默认配置文件路径
    Path,

    /// 重置为默认配置
    Reset,
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum OutputFormat {
    /// 文本格式
    Text,
    /// JSON 格式
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}
