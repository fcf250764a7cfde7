use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{Config, IgnoreConfig};
use crate::error::{EstimatorError, Result};
use crate::models::normalized_extension;
use crate::scanner::IgnoreRules;

/// 文件遍历器 - 负责遍历目录树并产出待统计的源文件
#[derive(Debug, Clone)]
pub struct FileWalker {
    ignore: IgnoreConfig,
    target_extensions: HashSet<String>,
    max_depth: Option<usize>,
    follow_symlinks: bool,
}

/// 遍历过程中的统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// 被目录规则剪掉的目录数量
    pub pruned_dirs: usize,

    /// 被文件规则排除的文件数量
    pub ignored_files: usize,

    /// 遍历时无法访问的条目数量
    pub unreadable_entries: usize,
}

impl FileWalker {
    /// 创建新的文件遍历器
    pub fn new(config: &Config) -> Self {
        Self {
            ignore: config.ignore.clone(),
            target_extensions: config.scan.normalized_extensions(),
            max_depth: config.scan.max_depth,
            follow_symlinks: config.scan.follow_symlinks,
        }
    }

    /// 根路径必须存在且是目录
    pub fn resolve_root(root: &Path) -> Result<PathBuf> {
        if !root.is_dir() {
            return Err(EstimatorError::PathNotFound {
                path: root.to_path_buf(),
            });
        }
        Ok(root.canonicalize()?)
    }

    /// 扩展名是否属于统计范围
    pub fn is_target_extension(&self, path: &Path) -> bool {
        normalized_extension(path).is_some_and(|ext| self.target_extensions.contains(&ext))
    }

    /// 惰性遍历 `root`，每次调用都会重新开始
    pub fn walk(&self, root: &Path) -> Result<CandidateFiles> {
        let root = Self::resolve_root(root)?;
        let rules = IgnoreRules::new(&root, &self.ignore)?;

        let mut walker = WalkDir::new(&root)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name();

        if let Some(max_depth) = self.max_depth {
            walker = walker.max_depth(max_depth);
        }

        tracing::debug!("开始遍历目录: {}", root.display());

        Ok(CandidateFiles {
            entries: walker.into_iter(),
            rules,
            walker: self.clone(),
            stats: WalkStats::default(),
        })
    }
}

/// 候选文件的惰性序列
pub struct CandidateFiles {
    entries: walkdir::IntoIter,
    rules: IgnoreRules,
    walker: FileWalker,
    stats: WalkStats,
}

impl CandidateFiles {
    /// 到目前为止的遍历统计
    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }

    fn report_error(&mut self, err: walkdir::Error) {
        let path = err
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        if let Some(ancestor) = err.loop_ancestor() {
            tracing::warn!(
                "检测到符号链接循环，已跳过: {} -> {}",
                path,
                ancestor.display()
            );
            return;
        }

        self.stats.unreadable_entries += 1;
        match err.io_error().map(|e| e.kind()) {
            Some(std::io::ErrorKind::PermissionDenied) => {
                tracing::warn!("没有权限访问，已跳过: {}", path);
            }
            _ => tracing::warn!("遍历目录时出错，已跳过: {}", err),
        }
    }
}

impl Iterator for CandidateFiles {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    self.report_error(err);
                    continue;
                }
            };

            let file_type = entry.file_type();

            if file_type.is_dir() {
                // 根目录本身不参与规则匹配
                if entry.depth() > 0 && self.rules.is_ignored_dir(entry.path()) {
                    tracing::debug!("忽略目录: {}", entry.path().display());
                    self.stats.pruned_dirs += 1;
                    self.entries.skip_current_dir();
                }
                continue;
            }

            // 未开启跟随时，符号链接一律视为叶子并跳过
            if file_type.is_symlink() {
                tracing::debug!("跳过符号链接: {}", entry.path().display());
                continue;
            }

            if !file_type.is_file() || !self.walker.is_target_extension(entry.path()) {
                continue;
            }

            if self.rules.is_ignored_file(entry.path()) {
                tracing::debug!("忽略文件: {}", entry.path().display());
                self.stats.ignored_files += 1;
                continue;
            }

            return Some(entry.into_path());
        }
    }
}
