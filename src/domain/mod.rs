// ==========================================
// 奶牛 IOFC 计算核心 - 领域模型层
// ==========================================
// 职责: 定义价格目录、日粮、乳成分、模型接口与结果类型
// 红线: 不含计算逻辑，所有实体只在单次计算前构造、计算后丢弃
// ==========================================

pub mod catalog;
pub(crate) mod guards;
pub mod model_result;
pub mod ration;
pub mod types;

// 重导出核心类型
pub use catalog::{IngredientPriceTable, PriceCatalog, DEFAULT_MASS_UNIT_SCALE};
pub use model_result::{model_keys, DietRow, ModelResultSource, StaticModelResult};
pub use ration::{MilkComponents, Ration, RationLine};
pub use types::{CalculationPath, ComponentYield, CostedRationLine, IofcBreakdown};
