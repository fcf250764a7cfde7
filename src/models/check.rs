use serde::{Deserialize, Serialize};

/// 默认附加检查项的定义（可通过配置覆盖）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDefinition {
    /// 稳定标识，用于检查计划文件
    pub id: String,

    /// 显示名称
    pub name: String,

    /// 描述
    pub description: String,

    /// 默认时长（小时）
    pub default_hours: f64,
}

impl CheckDefinition {
    pub fn new(id: &str, name: &str, description: &str, default_hours: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            default_hours,
        }
    }
}

/// 一项附加审查检查
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    pub description: String,
    pub hours: f64,
}

/// 有序的检查项集合：默认项在前（规范顺序），自定义项按录入顺序在后。
/// 名称唯一，且不包含时长为 0 的检查项。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CheckSet {
    checks: Vec<Check>,
}

impl CheckSet {
    pub(crate) fn from_checks(checks: Vec<Check>) -> Self {
        Self { checks }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Check> {
        self.checks.iter().find(|check| check.name == name)
    }

    /// 所有正时长检查项的小时数之和
    pub fn total_hours(&self) -> f64 {
        self.checks
            .iter()
            .map(|check| check.hours)
            .filter(|hours| *hours > 0.0)
            .sum()
    }
}

impl<'a> IntoIterator for &'a CheckSet {
    type Item = &'a Check;
    type IntoIter = std::slice::Iter<'a, Check>;

    fn into_iter(self) -> Self::IntoIter {
        self.checks.iter()
    }
}
