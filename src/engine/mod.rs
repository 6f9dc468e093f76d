// ==========================================
// 奶牛 IOFC 计算核心 - 计算引擎层
// ==========================================
// 职责: 两条独立、无状态的 IOFC 计算路径 + 共用计价公式
// 红线: 计算器只读输入，不持有跨调用状态
// ==========================================

pub mod manual;
pub mod model_derived;
pub mod observer;
pub mod pricing;
pub mod validation;

// 重导出核心引擎
pub use manual::{manual_iofc, ManualIofcCalculator};
pub use model_derived::{model_iofc, ModelIofcCalculator};
pub use observer::{IofcObserver, NoOpObserver, RecordingObserver, TracingObserver};
