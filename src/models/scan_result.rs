use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::FileRecord;

/// 按扩展名累计的行数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtensionTally {
    /// 扩展名 -> 行数，按字母序排列
    counts: BTreeMap<String, u64>,

    /// 总行数，始终等于 counts 之和
    total_lines: u64,
}

impl ExtensionTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// 归入一个文件记录
    pub fn record(&mut self, record: &FileRecord) {
        self.add(&record.extension, record.lines);
    }

    pub fn add(&mut self, extension: &str, lines: u64) {
        *self.counts.entry(extension.to_string()).or_insert(0) += lines;
        self.total_lines += lines;
    }

    pub fn total_lines(&self) -> u64 {
        self.total_lines
    }

    pub fn get(&self, extension: &str) -> Option<u64> {
        self.counts.get(extension).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(ext, count)| (ext.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(String, u64)> for ExtensionTally {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut tally = Self::new();
        for (extension, lines) in iter {
            tally.add(&extension, lines);
        }
        tally
    }
}

/// 扫描统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// 成功统计的文件数量
    pub counted_files: usize,

    /// 跳过的二进制文件数量
    pub binary_files: usize,

    /// 无法读取的文件数量
    pub unreadable_files: usize,

    /// 被文件模式忽略的文件数量
    pub ignored_files: usize,

    /// 被剪枝的目录数量
    pub pruned_dirs: usize,
}

/// 一次扫描的完整结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub tally: ExtensionTally,
    pub stats: ScanStats,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&mut self, record: &FileRecord) {
        self.tally.record(record);
        self.stats.counted_files += 1;
    }

    pub fn total_lines(&self) -> u64 {
        self.tally.total_lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_total_matches_sum_of_extensions() {
        let mut tally = ExtensionTally::new();
        tally.record(&FileRecord::new(PathBuf::from("a.py"), ".py".to_string(), 800));
        tally.record(&FileRecord::new(PathBuf::from("a.js"), ".js".to_string(), 1500));
        tally.record(&FileRecord::new(PathBuf::from("b.py"), ".py".to_string(), 20));

        assert_eq!(tally.get(".py"), Some(820));
        assert_eq!(tally.get(".js"), Some(1500));
        assert_eq!(tally.total_lines(), 2320);
        assert_eq!(tally.total_lines(), tally.iter().map(|(_, n)| n).sum::<u64>());
    }

    #[test]
    fn test_iteration_is_alphabetical() {
        let tally: ExtensionTally = [(".ts", 1), (".c", 2), (".py", 3)]
            .into_iter()
            .map(|(ext, n)| (ext.to_string(), n))
            .collect();

        let keys: Vec<&str> = tally.iter().map(|(ext, _)| ext).collect();
        assert_eq!(keys, vec![".c", ".py", ".ts"]);
    }

    #[test]
    fn test_empty_tally() {
        let result = ScanResult::new();
        assert!(result.tally.is_empty());
        assert_eq!(result.total_lines(), 0);
        assert_eq!(result.stats.counted_files, 0);
    }
}
