use crate::config::EstimationConfig;
use crate::error::Result;
use crate::models::{CheckSet, EstimationResult, ExtensionTally};

/// 估算引擎 - 构造时校验参数，之后可重复估算
#[derive(Debug, Clone, Copy)]
pub struct Estimator {
    config: EstimationConfig,
}

impl Estimator {
    pub fn new(config: EstimationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn estimate(&self, tally: &ExtensionTally, checks: &CheckSet) -> EstimationResult {
        compute(tally, checks, self.config.lines_per_hour, self.config.hours_per_day)
    }
}

/// 由行数汇总和检查项计算估算结果。吞吐量或每日工时非正时返回 `InvalidConfiguration`
pub fn estimate(
    tally: &ExtensionTally,
    checks: &CheckSet,
    lines_per_hour: f64,
    hours_per_day: f64,
) -> Result<EstimationResult> {
    EstimationConfig {
        lines_per_hour,
        hours_per_day,
    }
    .validate()?;

    Ok(compute(tally, checks, lines_per_hour, hours_per_day))
}

fn compute(
    tally: &ExtensionTally,
    checks: &CheckSet,
    lines_per_hour: f64,
    hours_per_day: f64,
) -> EstimationResult {
    let total_lines = tally.total_lines();
    let base_hours = total_lines as f64 / lines_per_hour;
    let additional_hours = checks.total_hours();
    let total_hours = base_hours + additional_hours;

    EstimationResult {
        total_lines,
        lines_per_hour,
        hours_per_day,
        base_hours,
        additional_hours,
        total_hours,
        working_days: total_hours / hours_per_day,
    }
}
