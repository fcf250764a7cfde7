use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ScanConfig;
use crate::error::{EstimatorError, Result};
use crate::models::{normalized_extension, FileRecord, ScanResult};
use crate::scanner::FileWalker;

/// 二进制检测时检查的前缀长度
const BINARY_SNIFF_LEN: usize = 8 * 1024;

/// 行数统计器 - 读取候选文件并按扩展名汇总行数
#[derive(Debug, Clone)]
pub struct LineCounter {
    skip_blank_lines: bool,
    parallel: bool,
    worker_threads: usize,
    show_progress: bool,
}

impl LineCounter {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            skip_blank_lines: config.skip_blank_lines,
            parallel: config.parallel,
            worker_threads: match config.worker_threads {
                0 => num_cpus::get(),
                threads => threads,
            },
            show_progress: false,
        }
    }

    /// 是否显示进度条
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// 统计单个文件。二进制文件返回 `BinaryFile`，没有权限返回 `Permission`
    pub fn count_file(&self, path: &Path) -> Result<FileRecord> {
        let content = fs::read(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::PermissionDenied => EstimatorError::Permission {
                path: path.to_path_buf(),
                source,
            },
            _ => EstimatorError::Io(source),
        })?;

        if is_binary(&content) {
            return Err(EstimatorError::BinaryFile {
                path: path.to_path_buf(),
            });
        }

        let extension = normalized_extension(path).unwrap_or_default();
        let lines = count_lines(&content, self.skip_blank_lines);
        Ok(FileRecord::new(path.to_path_buf(), extension, lines))
    }

    /// 遍历 `root` 并汇总所有候选文件
    pub fn count_tree(&self, walker: &FileWalker, root: &Path) -> Result<ScanResult> {
        let mut files = walker.walk(root)?;
        let mut result = ScanResult::new();
        let progress = self.create_progress_bar();

        if self.parallel {
            let paths: Vec<PathBuf> = files.by_ref().collect();
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.worker_threads)
                .build()
                .map_err(|e| {
                    EstimatorError::invalid_configuration(format!("无法创建线程池: {e}"))
                })?;

            // collect 保持输入顺序，随后按遍历顺序合并，结果与串行模式一致
            let outcomes: Vec<Result<FileRecord>> =
                pool.install(|| paths.par_iter().map(|path| self.count_file(path)).collect());

            for outcome in outcomes {
                self.fold(&mut result, outcome, &progress)?;
            }
        } else {
            for path in files.by_ref() {
                let outcome = self.count_file(&path);
                self.fold(&mut result, outcome, &progress)?;
            }
        }

        let walk_stats = files.stats();
        result.stats.pruned_dirs = walk_stats.pruned_dirs;
        result.stats.ignored_files = walk_stats.ignored_files;
        result.stats.unreadable_files += walk_stats.unreadable_entries;

        progress.finish_and_clear();

        if result.stats.counted_files == 0 && result.stats.unreadable_files > 0 {
            tracing::warn!(
                "没有统计到任何文件，{} 个文件或目录因无法读取被跳过",
                result.stats.unreadable_files
            );
        }

        tracing::info!(
            "统计完成：{} 个文件，共 {} 行",
            result.stats.counted_files,
            result.total_lines()
        );

        Ok(result)
    }

    /// 把单个文件的统计结果归入汇总，可恢复的错误在这里消化
    fn fold(
        &self,
        result: &mut ScanResult,
        outcome: Result<FileRecord>,
        progress: &ProgressBar,
    ) -> Result<()> {
        match outcome {
            Ok(record) => {
                progress.inc(1);
                progress.set_message(format!(
                    "已统计 {} 个文件 | {} 行",
                    result.stats.counted_files + 1,
                    result.total_lines() + record.lines
                ));
                result.add_record(&record);
            }
            Err(EstimatorError::BinaryFile { path }) => {
                tracing::debug!("跳过二进制文件: {}", path.display());
                result.stats.binary_files += 1;
            }
            Err(EstimatorError::Permission { path, .. }) => {
                tracing::warn!("没有权限读取文件，已跳过: {}", path.display());
                result.stats.unreadable_files += 1;
            }
            Err(EstimatorError::Io(err)) => {
                tracing::warn!("读取文件失败，已跳过: {}", err);
                result.stats.unreadable_files += 1;
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    /// 创建进度条
    fn create_progress_bar(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// 样本中出现 NUL 字节即视为二进制文件
pub fn is_binary(content: &[u8]) -> bool {
    content.iter().take(BINARY_SNIFF_LEN).any(|b| *b == 0)
}

/// 按换行统计行数，没有结尾换行的最后一行也算一行
pub fn count_lines(content: &[u8], skip_blank_lines: bool) -> u64 {
    let text = String::from_utf8_lossy(content);
    let lines = text.lines();

    let count = if skip_blank_lines {
        lines.filter(|line| !line.trim().is_empty()).count()
    } else {
        lines.count()
    };

    count as u64
}
