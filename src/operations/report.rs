use serde::Serialize;

use crate::error::{EstimatorError, Result};
use crate::models::{CheckSet, EstimationResult, ExtensionTally};
use crate::utils::{format_hours, format_thousands};

/// 报告输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

/// 一次估算的完整报告数据
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub lines_by_extension: &'a ExtensionTally,
    pub checks: &'a CheckSet,
    pub estimation: &'a EstimationResult,
}

impl<'a> Report<'a> {
    pub fn new(
        lines_by_extension: &'a ExtensionTally,
        checks: &'a CheckSet,
        estimation: &'a EstimationResult,
    ) -> Self {
        Self {
            lines_by_extension,
            checks,
            estimation,
        }
    }

    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => self.render_json(),
        }
    }

    pub fn render_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| EstimatorError::Serialize(e.to_string()))
    }

    pub fn render_text(&self) -> String {
        let estimation = self.estimation;
        let mut report = vec![
            "\n=== Code Review Estimation Report ===\n".to_string(),
            "Lines of Code by File Type:".to_string(),
        ];

        for (extension, count) in self.lines_by_extension.iter() {
            report.push(format!("  {extension}: {} lines", format_thousands(count)));
        }

        report.push(format!(
            "\nTotal Lines of Code: {}",
            format_thousands(estimation.total_lines)
        ));
        report.push(format!(
            "Code Review Speed: {} lines/hour",
            estimation.lines_per_hour
        ));
        report.push(format!(
            "Base Code Review Time: {} hours",
            format_hours(estimation.base_hours)
        ));

        // 时长为 0 的检查项不会进入 CheckSet，这里再过滤一次以防手工构造
        let checks: Vec<_> = self.checks.iter().filter(|check| check.hours > 0.0).collect();
        if !checks.is_empty() {
            report.push("\nAdditional Checks:".to_string());
            for check in checks {
                report.push(format!("  {}: {} hours", check.name, format_hours(check.hours)));
                report.push(format!("    Description: {}", check.description));
            }
            report.push(format!(
                "\nAdditional Checks Total Time: {} hours",
                format_hours(estimation.additional_hours)
            ));
        }

        report.push(format!(
            "\nTotal Estimated Review Time: {} hours",
            format_hours(estimation.total_hours)
        ));
        report.push(format!(
            "Working Days Required: {} ({}-hour days)",
            format_hours(estimation.working_days),
            estimation.hours_per_day
        ));

        report.join("\n")
    }
}
