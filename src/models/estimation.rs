use serde::Serialize;

/// 估算结果，全部字段由输入推导，不做任何取整
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimationResult {
    /// 代码总行数
    pub total_lines: u64,

    /// 使用的审查速度（行/小时）
    pub lines_per_hour: f64,

    /// 每个工作日的小时数
    pub hours_per_day: f64,

    /// 基础审查时间 = 总行数 / 审查速度
    pub base_hours: f64,

    /// 附加检查总时间
    pub additional_hours: f64,

    /// 总时间 = 基础 + 附加
    pub total_hours: f64,

    /// 工作日数 = 总时间 / 每日工时
    pub working_days: f64,
}
