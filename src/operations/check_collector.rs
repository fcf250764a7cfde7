use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::{EstimatorError, Result};
use crate::models::{Check, CheckDefinition, CheckSet};
use crate::utils::format_hours;

/// 构建 `CheckSet` 的纯数据构建器，交互式输入、计划文件和测试都通过它汇合
#[derive(Debug, Clone)]
pub struct CheckSetBuilder {
    /// 默认检查项及其当前时长，保持规范顺序
    defaults: Vec<(CheckDefinition, f64)>,

    /// 自定义检查项，按录入顺序
    custom: Vec<Check>,
}

impl CheckSetBuilder {
    /// 所有默认检查项初始为默认时长
    pub fn new(definitions: &[CheckDefinition]) -> Self {
        Self {
            defaults: definitions
                .iter()
                .map(|definition| (definition.clone(), definition.default_hours))
                .collect(),
            custom: Vec::new(),
        }
    }

    pub fn definitions(&self) -> impl Iterator<Item = &CheckDefinition> {
        self.defaults.iter().map(|(definition, _)| definition)
    }

    pub fn accept_default(&mut self, id: &str) -> Result<()> {
        let slot = self.slot_mut(id)?;
        slot.1 = slot.0.default_hours;
        Ok(())
    }

    /// 覆盖默认检查项的时长，0 表示跳过
    pub fn set_hours(&mut self, id: &str, hours: f64) -> Result<()> {
        validate_hours(hours)?;
        self.slot_mut(id)?.1 = hours;
        Ok(())
    }

    /// 添加自定义检查项。名称与已有检查项（包括被跳过的默认项）重复时拒绝，构建器保持不变
    pub fn add_custom(&mut self, name: &str, description: &str, hours: f64) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EstimatorError::invalid_input(name, "检查项名称不能为空"));
        }
        if self.contains_name(name) {
            return Err(EstimatorError::DuplicateCheckName {
                name: name.to_string(),
            });
        }
        validate_hours(hours)?;
        if hours == 0.0 {
            return Err(EstimatorError::invalid_input(
                hours.to_string(),
                "自定义检查项的时长必须大于 0",
            ));
        }

        self.custom.push(Check {
            name: name.to_string(),
            description: description.trim().to_string(),
            hours,
        });
        Ok(())
    }

    /// 名称比较忽略首尾空白和大小写
    pub fn contains_name(&self, name: &str) -> bool {
        let wanted = name.trim().to_lowercase();
        self.definitions()
            .map(|definition| definition.name.as_str())
            .chain(self.custom.iter().map(|check| check.name.as_str()))
            .any(|existing| existing.trim().to_lowercase() == wanted)
    }

    /// 生成最终的检查项集合，时长为 0 的默认项被排除
    pub fn build(&self) -> CheckSet {
        let defaults = self
            .defaults
            .iter()
            .filter(|(_, hours)| *hours > 0.0)
            .map(|(definition, hours)| Check {
                name: definition.name.clone(),
                description: definition.description.clone(),
                hours: *hours,
            });

        CheckSet::from_checks(defaults.chain(self.custom.iter().cloned()).collect())
    }

    fn slot_mut(&mut self, id: &str) -> Result<&mut (CheckDefinition, f64)> {
        self.defaults
            .iter_mut()
            .find(|(definition, _)| definition.id == id)
            .ok_or_else(|| EstimatorError::invalid_input(id, "未知的检查项 id"))
    }
}

/// 全部接受默认值
pub fn accept_defaults(definitions: &[CheckDefinition]) -> CheckSet {
    CheckSetBuilder::new(definitions).build()
}

/// 解析时长输入。空输入使用 `default`，不会把无效输入当作 0
pub fn parse_hours(input: &str, default: Option<f64>) -> Result<f64> {
    let input = input.trim();
    if input.is_empty() {
        return default.ok_or_else(|| EstimatorError::invalid_input(input, "必须输入时长"));
    }

    let hours: f64 = input
        .parse()
        .map_err(|_| EstimatorError::invalid_input(input, "不是有效的数字"))?;
    validate_hours(hours)?;
    Ok(hours)
}

fn validate_hours(hours: f64) -> Result<()> {
    if !hours.is_finite() {
        return Err(EstimatorError::invalid_input(
            hours.to_string(),
            "时长必须是有限数",
        ));
    }
    if hours < 0.0 {
        return Err(EstimatorError::invalid_input(
            hours.to_string(),
            "时长不能为负数",
        ));
    }
    Ok(())
}

/// 非交互式的检查计划，通常从 TOML 文件加载
///
/// ```toml
/// [defaults]
/// security = 3.0
/// architecture = 0   # 跳过
///
/// [[custom]]
/// name = "Load Testing"
/// description = "Run the load test suite"
/// hours = 3.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckPlan {
    /// 默认检查项 id -> 时长，未列出的使用默认时长
    pub defaults: BTreeMap<String, f64>,

    /// 自定义检查项
    pub custom: Vec<CustomCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomCheck {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub hours: f64,
}

impl CheckPlan {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| EstimatorError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 把计划应用到构建器，遇到第一个无效条目即返回错误
    pub fn apply(&self, builder: &mut CheckSetBuilder) -> Result<()> {
        for (id, hours) in &self.defaults {
            builder.set_hours(id, *hours)?;
        }
        for check in &self.custom {
            builder.add_custom(&check.name, &check.description, check.hours)?;
        }
        Ok(())
    }

    pub fn build(&self, definitions: &[CheckDefinition]) -> Result<CheckSet> {
        let mut builder = CheckSetBuilder::new(definitions);
        self.apply(&mut builder)?;
        Ok(builder.build())
    }
}

/// 交互式收集器 - 逐项询问时长并允许添加自定义检查项
pub struct InteractiveCollector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractiveCollector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn collect(&mut self, definitions: &[CheckDefinition]) -> Result<CheckSet> {
        let mut builder = CheckSetBuilder::new(definitions);

        writeln!(self.output, "\n=== Additional Review Checks Configuration ===")?;
        writeln!(self.output, "Enter the time (in hours) for each additional check.")?;
        writeln!(
            self.output,
            "Press Enter to use the default value, or '0' to skip the check.\n"
        )?;

        for definition in definitions {
            self.prompt_default(&mut builder, definition)?;
        }

        while self.prompt_custom(&mut builder)? {}

        Ok(builder.build())
    }

    fn prompt_default(
        &mut self,
        builder: &mut CheckSetBuilder,
        definition: &CheckDefinition,
    ) -> Result<()> {
        loop {
            write!(
                self.output,
                "{} ({})\nDefault time: {} hours\nEnter hours (or press Enter for default): ",
                definition.name,
                definition.description,
                format_hours(definition.default_hours)
            )?;
            self.output.flush()?;

            // 输入结束时接受剩余的默认值
            let Some(line) = self.read_line()? else {
                return builder.accept_default(&definition.id);
            };

            match parse_hours(&line, Some(definition.default_hours)) {
                Ok(hours) => return builder.set_hours(&definition.id, hours),
                Err(_) => writeln!(self.output, "Please enter a valid non-negative number.")?,
            }
        }
    }

    /// 返回 false 表示结束自定义检查项的录入
    fn prompt_custom(&mut self, builder: &mut CheckSetBuilder) -> Result<bool> {
        write!(
            self.output,
            "\nAdd custom check? (Enter name or press Enter to finish): "
        )?;
        self.output.flush()?;

        let name = match self.read_line()? {
            Some(name) if !name.is_empty() => name,
            _ => return Ok(false),
        };

        if builder.contains_name(&name) {
            writeln!(
                self.output,
                "A check named '{name}' already exists. Please choose another name."
            )?;
            return Ok(true);
        }

        write!(self.output, "Enter description: ")?;
        self.output.flush()?;
        let description = self.read_line()?.unwrap_or_default();

        loop {
            write!(self.output, "Enter hours: ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output, "\nCustom check '{name}' cancelled.")?;
                return Ok(false);
            };

            match parse_hours(&line, None) {
                Ok(hours) if hours > 0.0 => {
                    builder.add_custom(&name, &description, hours)?;
                    return Ok(true);
                }
                Ok(_) => writeln!(self.output, "Custom checks need a positive number of hours.")?,
                Err(_) => writeln!(self.output, "Please enter a valid positive number.")?,
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultConfig;
    use std::io::Cursor;

    fn collect(input: &str) -> (CheckSet, String) {
        let mut output = Vec::new();
        let checks = InteractiveCollector::new(Cursor::new(input.as_bytes()), &mut output)
            .collect(&DefaultConfig::default_checks())
            .unwrap();
        (checks, String::from_utf8(output).unwrap())
    }

    fn names(checks: &CheckSet) -> Vec<&str> {
        checks.iter().map(|check| check.name.as_str()).collect()
    }

    #[test]
    fn test_defaults_in_canonical_order() {
        let checks = accept_defaults(&DefaultConfig::default_checks());

        assert_eq!(
            names(&checks),
            vec![
                "Configuration Review",
                "Dependency Analysis",
                "Security & Cryptography Assessment",
                "Architecture Review",
            ]
        );
        assert_eq!(checks.total_hours(), 6.0);
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_hours("", Some(1.5)).unwrap(), 1.5);
        assert_eq!(parse_hours(" 2.25 ", Some(1.5)).unwrap(), 2.25);
        assert_eq!(parse_hours("0", Some(1.5)).unwrap(), 0.0);

        for bad in ["abc", "-1", "inf", "NaN"] {
            assert!(matches!(
                parse_hours(bad, Some(1.0)),
                Err(EstimatorError::InvalidInput { .. })
            ));
        }
        assert!(parse_hours("", None).is_err());
    }

    #[test]
    fn test_zero_hours_removes_default() {
        let mut builder = CheckSetBuilder::new(&DefaultConfig::default_checks());
        builder.set_hours("dependencies", 0.0).unwrap();
        let checks = builder.build();

        assert_eq!(checks.len(), 3);
        assert!(checks.get("Dependency Analysis").is_none());

        // 被跳过的默认项仍可重新配置
        builder.accept_default("dependencies").unwrap();
        assert_eq!(builder.build().len(), 4);
    }

    #[test]
    fn test_duplicate_custom_name_is_rejected() {
        let mut builder = CheckSetBuilder::new(&DefaultConfig::default_checks());
        let before = builder.build();

        let err = builder
            .add_custom("Architecture Review", "again", 1.0)
            .unwrap_err();
        assert!(matches!(err, EstimatorError::DuplicateCheckName { .. }));
        assert_eq!(builder.build(), before);

        builder.add_custom("Load Testing", "", 3.0).unwrap();
        let err = builder.add_custom("load testing ", "", 1.0).unwrap_err();
        assert!(matches!(err, EstimatorError::DuplicateCheckName { .. }));
    }

    #[test]
    fn test_custom_check_validation() {
        let mut builder = CheckSetBuilder::new(&[]);

        assert!(matches!(
            builder.add_custom("  ", "", 1.0),
            Err(EstimatorError::InvalidInput { .. })
        ));
        assert!(matches!(
            builder.add_custom("Fuzzing", "", 0.0),
            Err(EstimatorError::InvalidInput { .. })
        ));
        assert!(matches!(
            builder.add_custom("Fuzzing", "", -2.0),
            Err(EstimatorError::InvalidInput { .. })
        ));
        assert!(builder.build().is_empty());
    }

    #[test]
    fn test_unknown_default_id() {
        let mut builder = CheckSetBuilder::new(&DefaultConfig::default_checks());
        assert!(matches!(
            builder.set_hours("performance", 1.0),
            Err(EstimatorError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_plan_matching_defaults_equals_accepting_defaults() {
        let definitions = DefaultConfig::default_checks();
        let plan = CheckPlan {
            defaults: definitions
                .iter()
                .map(|d| (d.id.clone(), d.default_hours))
                .collect(),
            custom: Vec::new(),
        };

        assert_eq!(plan.build(&definitions).unwrap(), accept_defaults(&definitions));
    }

    #[test]
    fn test_plan_from_toml() {
        let plan: CheckPlan = toml::from_str(
            r#"
[defaults]
security = 3.0
architecture = 0

[[custom]]
name = "Load Testing"
hours = 3.0
"#,
        )
        .unwrap();

        let checks = plan.build(&DefaultConfig::default_checks()).unwrap();
        assert_eq!(
            names(&checks),
            vec![
                "Configuration Review",
                "Dependency Analysis",
                "Security & Cryptography Assessment",
                "Load Testing",
            ]
        );
        assert_eq!(checks.total_hours(), 1.0 + 1.5 + 3.0 + 3.0);
    }

    #[test]
    fn test_interactive_accepting_all_defaults() {
        let (checks, output) = collect("\n\n\n\n\n");

        assert_eq!(checks, accept_defaults(&DefaultConfig::default_checks()));
        assert!(output.contains("Default time: 1.0 hours"));
        assert!(output.contains("Default time: 1.5 hours"));
        assert!(output.contains("Default time: 2.0 hours"));
    }

    #[test]
    fn test_interactive_overrides_skips_and_custom() {
        let input = "2\n0\nabc\n-1\n4\n\nArchitecture Review\nLoad Testing\nsoak tests\nzero\n0\n3\n\n";
        let (checks, output) = collect(input);

        assert_eq!(
            names(&checks),
            vec![
                "Configuration Review",
                "Security & Cryptography Assessment",
                "Architecture Review",
                "Load Testing",
            ]
        );
        assert_eq!(checks.get("Configuration Review").unwrap().hours, 2.0);
        assert_eq!(checks.get("Security & Cryptography Assessment").unwrap().hours, 4.0);
        assert_eq!(checks.get("Load Testing").unwrap().description, "soak tests");
        assert_eq!(checks.total_hours(), 2.0 + 4.0 + 1.5 + 3.0);

        assert_eq!(output.matches("Please enter a valid non-negative number.").count(), 2);
        assert!(output.contains("A check named 'Architecture Review' already exists."));
        assert!(output.contains("Custom checks need a positive number of hours."));
    }

    #[test]
    fn test_interactive_end_of_input_keeps_defaults() {
        let (checks, _) = collect("0\n");

        assert_eq!(checks.len(), 3);
        assert_eq!(checks.total_hours(), 5.0);
    }
}
