use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::config::defaults::{
    DefaultConfig, DEFAULT_CLONE_TIMEOUT_SECS, DEFAULT_HOURS_PER_DAY, DEFAULT_LINES_PER_HOUR,
};
use crate::error::{EstimatorError, Result};
use crate::models::CheckDefinition;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 忽略配置
    pub ignore: IgnoreConfig,

    /// 扫描配置
    pub scan: ScanConfig,

    /// 估算参数
    pub estimation: EstimationConfig,

    /// 附加检查项定义
    pub checks: ChecksConfig,

    /// 远程仓库克隆配置
    pub remote: CloneConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// 忽略的目录名，命中后整个子树不再遍历
    pub directories: Vec<String>,

    /// 忽略的文件模式（gitignore 语法，后出现的规则优先）
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 需要统计的扩展名
    pub target_extensions: BTreeSet<String>,

    /// 最大扫描深度
    pub max_depth: Option<usize>,

    /// 是否跟随符号链接
    pub follow_symlinks: bool,

    /// 是否跳过空白行
    pub skip_blank_lines: bool,

    /// 是否并行读取文件
    pub parallel: bool,

    /// 并行模式下的线程数，0 表示按 CPU 核心数自动决定
    pub worker_threads: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    /// 审查速度（行/小时）
    pub lines_per_hour: f64,

    /// 每个工作日的小时数
    pub hours_per_day: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksConfig {
    /// 默认检查项，按规范顺序排列
    pub definitions: Vec<CheckDefinition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloneConfig {
    /// 克隆超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            directories: DefaultConfig::default_ignore_dirs(),
            files: DefaultConfig::default_ignore_files(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target_extensions: DefaultConfig::default_target_extensions(),
            max_depth: None,
            follow_symlinks: false,
            skip_blank_lines: false,
            parallel: false,
            worker_threads: 0,
        }
    }
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            lines_per_hour: DEFAULT_LINES_PER_HOUR,
            hours_per_day: DEFAULT_HOURS_PER_DAY,
        }
    }
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            definitions: DefaultConfig::default_checks(),
        }
    }
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_CLONE_TIMEOUT_SECS,
        }
    }
}

impl ScanConfig {
    /// 规范化后的扩展名集合：小写并带前导点
    pub fn normalized_extensions(&self) -> HashSet<String> {
        self.target_extensions
            .iter()
            .map(|ext| ext.trim())
            .filter(|ext| !ext.is_empty() && *ext != ".")
            .map(|ext| {
                let ext = ext.to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect()
    }
}

impl EstimationConfig {
    /// 吞吐量和每日工时都必须是正的有限数
    pub fn validate(&self) -> Result<()> {
        if !(self.lines_per_hour.is_finite() && self.lines_per_hour > 0.0) {
            return Err(EstimatorError::invalid_configuration(format!(
                "审查速度必须为正数，当前为 {}",
                self.lines_per_hour
            )));
        }
        if !(self.hours_per_day.is_finite() && self.hours_per_day > 0.0) {
            return Err(EstimatorError::invalid_configuration(format!(
                "每日工时必须为正数，当前为 {}",
                self.hours_per_day
            )));
        }
        Ok(())
    }
}

impl ChecksConfig {
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();

        for definition in &self.definitions {
            if definition.id.trim().is_empty() || definition.name.trim().is_empty() {
                return Err(EstimatorError::invalid_configuration(
                    "检查项的 id 和名称不能为空",
                ));
            }
            if !(definition.default_hours.is_finite() && definition.default_hours > 0.0) {
                return Err(EstimatorError::invalid_configuration(format!(
                    "检查项 '{}' 的默认时长必须为正数",
                    definition.name
                )));
            }
            if !ids.insert(definition.id.as_str()) {
                return Err(EstimatorError::invalid_configuration(format!(
                    "检查项 id '{}' 重复",
                    definition.id
                )));
            }
            if !names.insert(definition.name.as_str()) {
                return Err(EstimatorError::invalid_configuration(format!(
                    "检查项名称 '{}' 重复",
                    definition.name
                )));
            }
        }

        Ok(())
    }
}

impl Config {
    /// 从文件加载配置
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|source| EstimatorError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| EstimatorError::Serialize(e.to_string()))?;

        // 确保目录存在
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// 获取默认配置文件路径
    pub fn default_config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| EstimatorError::invalid_configuration("无法找到配置目录"))?;
        path.push("review-estimator");
        path.push("config.toml");
        Ok(path)
    }

    /// 加载默认位置的配置，文件不存在时使用内置默认值
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::default_config_path()?;

        if config_path.exists() {
            tracing::debug!("加载配置文件: {}", config_path.display());
            Self::load_from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// 在任何扫描或估算之前校验配置
    pub fn validate(&self) -> Result<()> {
        self.estimation.validate()?;
        self.checks.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.estimation.lines_per_hour, 80.0);
        assert_eq!(config.estimation.hours_per_day, 8.0);
        assert_eq!(config.checks.definitions.len(), 4);
        assert!(!config.scan.follow_symlinks);
        assert_eq!(config.scan.worker_threads, 0);
    }

    #[test]
    fn test_saved_config_does_not_pin_thread_count() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        Config::default().save_to_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("worker_threads = 0"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.estimation.lines_per_hour = 120.0;
        config.ignore.directories.push("third_party".to_string());
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[estimation]\nlines_per_hour = 100.0\n").unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.estimation.lines_per_hour, 100.0);
        assert_eq!(loaded.estimation.hours_per_day, 8.0);
        assert_eq!(loaded.scan.target_extensions, DefaultConfig::default_target_extensions());
    }

    #[test]
    fn test_zero_throughput_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[estimation]\nlines_per_hour = 0.0\n").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_malformed_file_reports_parse_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[estimation\nlines_per_hour = ").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, EstimatorError::ConfigParse { .. }));
    }

    #[test]
    fn test_duplicate_check_definitions_are_rejected() {
        let mut config = Config::default();
        let duplicate = config.checks.definitions[0].clone();
        config.checks.definitions.push(duplicate);

        assert!(matches!(
            config.validate(),
            Err(EstimatorError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_extensions_are_normalized() {
        let mut scan = ScanConfig::default();
        scan.target_extensions = ["RS", ".Py", " go ", ""]
            .into_iter()
            .map(String::from)
            .collect();

        let normalized = scan.normalized_extensions();
        assert_eq!(normalized.len(), 3);
        assert!(normalized.contains(".rs"));
        assert!(normalized.contains(".py"));
        assert!(normalized.contains(".go"));
    }
}
