// ==========================================
// 奶牛 IOFC 计算核心 - 配置层
// ==========================================
// 职责: 价格目录键名 + JSON 配置加载
// 说明: 配置以显式类型记录承载，构造时即校验，不在计算中按字符串取值
// ==========================================

pub mod loader;

pub use loader::{load_ingredient_prices, load_price_catalog, load_ration};

/// 价格目录识别的键名
pub mod config_keys {
    // 乳成分
    pub const MILK_OTHER_SOLIDS_PRODUCTION_PERC: &str = "milk_other_solids_production_perc";
    pub const MILK_FAT_DOLLAR_KG: &str = "milk_fat_dollar_kg";
    pub const MILK_PROTEIN_DOLLAR_KG: &str = "milk_protein_dollar_kg";
    pub const OTHER_SOLIDS_DOLLAR_KG: &str = "other_solids_dollar_kg";

    // 原料价格单位换算（可选，默认 1000）
    pub const MASS_UNIT_SCALE: &str = "mass_unit_scale";

    /// 必填键
    pub const PRICE_CATALOG_REQUIRED: [&str; 4] = [
        MILK_OTHER_SOLIDS_PRODUCTION_PERC,
        MILK_FAT_DOLLAR_KG,
        MILK_PROTEIN_DOLLAR_KG,
        OTHER_SOLIDS_DOLLAR_KG,
    ];
}
