use std::collections::BTreeSet;

use crate::models::CheckDefinition;

/// 默认审查速度（行/小时）
pub const DEFAULT_LINES_PER_HOUR: f64 = 80.0;

/// 默认每个工作日的小时数
pub const DEFAULT_HOURS_PER_DAY: f64 = 8.0;

/// 默认克隆超时时间（秒）
pub const DEFAULT_CLONE_TIMEOUT_SECS: u64 = 300;

pub struct DefaultConfig;

impl DefaultConfig {
    /// 默认忽略的目录名（整个子树都不会进入）
    pub fn default_ignore_dirs() -> Vec<String> {
        [
            // 依赖目录
            "node_modules",
            "vendor",
            "bower_components",
            "venv",
            ".venv",
            "env",
            "__pycache__",
            // 构建产物
            "dist",
            "build",
            "target",
            "out",
            // 版本控制
            ".git",
            ".svn",
            ".hg",
            // IDE 和工具目录
            ".idea",
            ".vscode",
            ".vs",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    /// 默认忽略的文件模式（gitignore 风格）
    pub fn default_ignore_files() -> Vec<String> {
        [
            // 压缩或打包后的产物
            "*.min.js",
            "*.bundle.js",
            // 锁文件
            "package-lock.json",
            "yarn.lock",
            "pnpm-lock.yaml",
            "Cargo.lock",
            // 环境与清单文件
            ".env",
            ".gitignore",
            ".dockerignore",
            "requirements.txt",
            "package.json",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    /// 默认统计的源代码扩展名（小写，保留前导点）
    pub fn default_target_extensions() -> BTreeSet<String> {
        [
            ".js", ".ts", ".jsx", ".tsx", // JavaScript/TypeScript
            ".py",    // Python
            ".java",  // Java
            ".cpp", ".hpp", ".c", ".h", // C/C++
            ".cs",    // C#
            ".go",    // Go
            ".rb",    // Ruby
            ".php",   // PHP
            ".swift", // Swift
            ".rs",    // Rust
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    /// 默认的附加检查项，顺序即报告中的规范顺序
    pub fn default_checks() -> Vec<CheckDefinition> {
        vec![
            CheckDefinition::new(
                "configuration",
                "Configuration Review",
                "Review of configuration files, environment variables, and settings",
                1.0,
            ),
            CheckDefinition::new(
                "dependencies",
                "Dependency Analysis",
                "Review of project dependencies, versions, and security implications",
                1.5,
            ),
            CheckDefinition::new(
                "security",
                "Security & Cryptography Assessment",
                "Review of security implementations, crypto usage, and potential vulnerabilities",
                2.0,
            ),
            CheckDefinition::new(
                "architecture",
                "Architecture Review",
                "High-level architecture and design pattern review",
                1.5,
            ),
        ]
    }
}
