use serde::Serialize;
use std::path::{Path, PathBuf};

/// 单个被统计文件的记录，归入汇总后即丢弃
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// 文件路径
    pub path: PathBuf,

    /// 扩展名（小写，带前导点）
    pub extension: String,

    /// 行数
    pub lines: u64,
}

impl FileRecord {
    pub fn new(path: PathBuf, extension: String, lines: u64) -> Self {
        Self {
            path,
            extension,
            lines,
        }
    }
}

/// 提取规范化的扩展名，例如 `src/Main.RS` -> `.rs`
pub fn normalized_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_extension() {
        assert_eq!(normalized_extension(Path::new("a.py")), Some(".py".to_string()));
        assert_eq!(normalized_extension(Path::new("src/Main.RS")), Some(".rs".to_string()));
        assert_eq!(normalized_extension(Path::new("lib.min.js")), Some(".js".to_string()));
        assert_eq!(normalized_extension(Path::new("Makefile")), None);
        assert_eq!(normalized_extension(Path::new(".bashrc")), None);
    }
}
