use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

use crate::config::IgnoreConfig;
use crate::error::{EstimatorError, Result};

/// 忽略规则 - 目录规则剪掉整个子树，文件规则排除单个文件
pub struct IgnoreRules {
    directories: Gitignore,
    files: Gitignore,
}

impl IgnoreRules {
    /// 以扫描根目录为基准编译忽略规则
    pub fn new(root: &Path, config: &IgnoreConfig) -> Result<Self> {
        Ok(Self {
            directories: Self::compile(root, config.directories.iter())?,
            files: Self::compile(root, config.files.iter())?,
        })
    }

    fn compile<'a>(root: &Path, patterns: impl Iterator<Item = &'a String>) -> Result<Gitignore> {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in patterns {
            builder.add_line(None, pattern).map_err(|e| {
                EstimatorError::invalid_configuration(format!("忽略模式 '{pattern}' 无效: {e}"))
            })?;
        }
        builder
            .build()
            .map_err(|e| EstimatorError::invalid_configuration(format!("无法构建忽略规则: {e}")))
    }

    /// 目录名是否命中目录规则
    pub fn is_ignored_dir(&self, path: &Path) -> bool {
        self.directories.matched(path, true).is_ignore()
    }

    /// 文件是否命中文件规则
    pub fn is_ignored_file(&self, path: &Path) -> bool {
        self.files.matched(path, false).is_ignore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(dirs: &[&str], files: &[&str]) -> IgnoreRules {
        let config = IgnoreConfig {
            directories: dirs.iter().map(|s| s.to_string()).collect(),
            files: files.iter().map(|s| s.to_string()).collect(),
        };
        IgnoreRules::new(Path::new("/repo"), &config).unwrap()
    }

    #[test]
    fn test_directory_names_match_anywhere() {
        let rules = rules(&["node_modules", ".git", "*.egg-info"], &[]);

        assert!(rules.is_ignored_dir(Path::new("/repo/node_modules")));
        assert!(rules.is_ignored_dir(Path::new("/repo/packages/web/node_modules")));
        assert!(rules.is_ignored_dir(Path::new("/repo/.git")));
        assert!(rules.is_ignored_dir(Path::new("/repo/pkg.egg-info")));
        assert!(!rules.is_ignored_dir(Path::new("/repo/src")));
    }

    #[test]
    fn test_file_patterns() {
        let rules = rules(&[], &["*.min.js", "package-lock.json", "!keep.min.js"]);

        assert!(rules.is_ignored_file(Path::new("/repo/static/app.min.js")));
        assert!(rules.is_ignored_file(Path::new("/repo/package-lock.json")));
        assert!(!rules.is_ignored_file(Path::new("/repo/static/keep.min.js")));
        assert!(!rules.is_ignored_file(Path::new("/repo/src/app.js")));
    }

    #[test]
    fn test_later_file_patterns_win() {
        let kept = rules(&[], &["*.min.js", "!keep.min.js"]);
        assert!(!kept.is_ignored_file(Path::new("/repo/keep.min.js")));

        let overridden = rules(&[], &["!keep.min.js", "*.min.js"]);
        assert!(overridden.is_ignored_file(Path::new("/repo/keep.min.js")));
    }

    #[test]
    fn test_configured_order_survives_toml() {
        let mut config = IgnoreConfig::default();
        config.files = vec!["*.min.js".to_string(), "!keep.min.js".to_string()];

        let text = toml::to_string(&config).unwrap();
        let loaded: IgnoreConfig = toml::from_str(&text).unwrap();
        assert_eq!(loaded.files, config.files);

        let rules = IgnoreRules::new(Path::new("/repo"), &loaded).unwrap();
        assert!(!rules.is_ignored_file(Path::new("/repo/keep.min.js")));
        assert!(rules.is_ignored_file(Path::new("/repo/app.min.js")));
    }

    #[test]
    fn test_file_rules_do_not_prune_directories() {
        let rules = rules(&["dist"], &["*.lock"]);

        assert!(rules.is_ignored_dir(Path::new("/repo/dist")));
        assert!(!rules.is_ignored_file(Path::new("/repo/dist")));
        assert!(rules.is_ignored_file(Path::new("/repo/Cargo.lock")));
        assert!(!rules.is_ignored_dir(Path::new("/repo/Cargo.lock")));
    }
}
