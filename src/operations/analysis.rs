use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::models::{CheckSet, EstimationResult, ScanResult};
use crate::operations::check_collector::accept_defaults;
use crate::operations::estimator::Estimator;
use crate::operations::report::Report;
use crate::scanner::{FileWalker, LineCounter};

/// 一次完整估算的产物
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub scan: ScanResult,
    pub checks: CheckSet,
    pub estimation: EstimationResult,
}

impl Analysis {
    pub fn report(&self) -> Report<'_> {
        Report::new(&self.scan.tally, &self.checks, &self.estimation)
    }
}

/// 扫描 `root` 并估算审查时间。未提供检查项时使用配置中的默认检查项
pub fn analyze(
    root: &Path,
    config: &Config,
    checks: Option<CheckSet>,
    show_progress: bool,
) -> Result<Analysis> {
    // 配置无效时不做任何扫描
    config.validate()?;
    let estimator = Estimator::new(config.estimation)?;

    let walker = FileWalker::new(config);
    let scan = LineCounter::new(&config.scan)
        .with_progress(show_progress)
        .count_tree(&walker, root)?;

    let checks = checks.unwrap_or_else(|| accept_defaults(&config.checks.definitions));
    let estimation = estimator.estimate(&scan.tally, &checks);

    tracing::debug!(
        "估算结果：基础 {:.2} 小时，附加 {:.2} 小时",
        estimation.base_hours,
        estimation.additional_hours
    );

    Ok(Analysis {
        scan,
        checks,
        estimation,
    })
}
