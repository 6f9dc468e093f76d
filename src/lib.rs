// ==========================================
// 奶牛 IOFC 计算核心 - 核心库
// ==========================================
// IOFC (Income Over Feed Cost) = 乳收入 - 饲料成本 ($/头/天)
// 系统定位: 一次性、纯函数式的价格加权聚合（无状态、无持久化）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 价格目录、日粮、模型接口、结果类型
pub mod domain;

// 配置层 - 键名与 JSON 加载
pub mod config;

// 引擎层 - 手工 / 模型推导两条计算路径
pub mod engine;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    model_keys, CalculationPath, ComponentYield, CostedRationLine, DietRow,
    IngredientPriceTable, IofcBreakdown, MilkComponents, ModelResultSource, PriceCatalog, Ration,
    RationLine, StaticModelResult,
};

pub use engine::{
    manual_iofc, model_iofc, IofcObserver, ManualIofcCalculator, ModelIofcCalculator,
    NoOpObserver, RecordingObserver, TracingObserver,
};

pub use error::{IofcError, IofcResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
