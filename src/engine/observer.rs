// ==========================================
// 奶牛 IOFC 计算核心 - 计算过程观察者
// ==========================================
// 职责: 诊断输出（中间值 + 增广配方表）与返回值计算解耦
// 红线: 观察者只接收数据，不能影响计算结果
// ==========================================

use crate::domain::CostedRationLine;

/// 中间值名称
pub mod trace_names {
    pub const FAT_KG: &str = "fat_kg";
    pub const TRUE_PROTEIN_KG: &str = "true_protein_kg";
    pub const OTHER_SOLIDS_KG: &str = "other_solids_kg";
    pub const REVENUE: &str = "revenue";
    pub const FEED_COST: &str = "feed_cost";
    pub const IOFC: &str = "iofc";
}

// ==========================================
// 观察者 Trait
// ==========================================
pub trait IofcObserver {
    /// 命名中间值（按计算顺序回调）
    fn on_value(&mut self, name: &str, value: f64);

    /// 单个原料计价完成
    fn on_costed_line(&mut self, line: &CostedRationLine);
}

/// 空操作观察者（非 verbose 模式）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl IofcObserver for NoOpObserver {
    fn on_value(&mut self, _name: &str, _value: f64) {}

    fn on_costed_line(&mut self, _line: &CostedRationLine) {}
}

/// verbose 模式: 通过 tracing 输出可读的计算轨迹
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl IofcObserver for TracingObserver {
    fn on_value(&mut self, name: &str, value: f64) {
        tracing::info!(trace_name = name, value, "IOFC 中间值: {} = {:.4}", name, value);
    }

    fn on_costed_line(&mut self, line: &CostedRationLine) {
        tracing::info!(
            ingredient = %line.ingredient,
            kg_inclusion = line.dm_intake_kg,
            dm_perc = line.dm_perc,
            price_as_fed = line.price_as_fed,
            price_dm = line.price_dm,
            price_per_kg_dm = line.price_per_kg_dm,
            daily_cost = line.daily_cost,
            "配方计价行"
        );
    }
}

/// 在内存中记录完整轨迹
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub values: Vec<(String, f64)>,
    pub lines: Vec<CostedRationLine>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取最后一次记录的同名中间值
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// 中间值名称（按回调顺序）
    pub fn names(&self) -> Vec<&str> {
        self.values.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl IofcObserver for RecordingObserver {
    fn on_value(&mut self, name: &str, value: f64) {
        self.values.push((name.to_string(), value));
    }

    fn on_costed_line(&mut self, line: &CostedRationLine) {
        self.lines.push(line.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer_keeps_order_and_last_value() {
        let mut observer = RecordingObserver::new();
        observer.on_value(trace_names::REVENUE, 1.0);
        observer.on_value(trace_names::FEED_COST, 0.5);
        observer.on_value(trace_names::REVENUE, 2.0);

        assert_eq!(observer.names(), vec!["revenue", "feed_cost", "revenue"]);
        assert_eq!(observer.value(trace_names::REVENUE), Some(2.0));
        assert_eq!(observer.value(trace_names::IOFC), None);
    }
}
