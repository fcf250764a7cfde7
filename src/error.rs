use std::path::PathBuf;
use thiserror::Error;

/// 估算流程中的错误类型
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// 根路径不存在或不是目录
    #[error("路径不存在或不是目录: {}", path.display())]
    PathNotFound { path: PathBuf },

    /// 单个文件没有读取权限（局部恢复，跳过该文件）
    #[error("没有权限读取: {}", path.display())]
    Permission {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 检测到二进制文件（局部恢复，不计数）
    #[error("检测到二进制文件: {}", path.display())]
    BinaryFile { path: PathBuf },

    /// 用户输入无效
    #[error("输入无效 '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    /// 检查项名称重复
    #[error("检查项 '{name}' 已存在")]
    DuplicateCheckName { name: String },

    /// 配置无效（吞吐量、每日工时等）
    #[error("配置无效: {message}")]
    InvalidConfiguration { message: String },

    /// 远程仓库克隆失败
    #[error("克隆仓库失败 {url}: {source}")]
    Clone {
        url: String,
        #[source]
        source: git2::Error,
    },

    /// 远程仓库克隆超时
    #[error("克隆仓库超时 {url}（超过 {timeout_secs} 秒）")]
    CloneTimeout { url: String, timeout_secs: u64 },

    /// 配置文件解析失败
    #[error("解析配置文件失败 {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// 序列化失败
    #[error("序列化失败: {0}")]
    Serialize(String),

    /// 标准 IO 错误
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EstimatorError {
    pub fn invalid_input(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
