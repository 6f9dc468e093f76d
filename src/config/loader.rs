// ==========================================
// 奶牛 IOFC 计算核心 - 配置加载
// ==========================================
// 职责: 从 JSON 文本构造价格目录 / 原料价格表 / 日粮配方，并立即校验
// 红线: 必填键缺失时报告键名，不使用默认值替代
// ==========================================

use crate::config::config_keys;
use crate::domain::{IngredientPriceTable, PriceCatalog, Ration};
use crate::error::{IofcError, IofcResult};
use serde_json::Value;

const CATALOG_SOURCE: &str = "price_catalog";

/// 解析价格目录
///
/// # 参数
/// - `json`: 包含四个必填键的 JSON 对象（`mass_unit_scale` 可选）
///
/// # 返回
/// - Ok(PriceCatalog): 已通过不变量校验
/// - Err(MissingField): 缺少必填键
/// - Err(ConfigParse): JSON 格式或类型错误
pub fn load_price_catalog(json: &str) -> IofcResult<PriceCatalog> {
    let value: Value = serde_json::from_str(json)?;
    let object = value
        .as_object()
        .ok_or_else(|| IofcError::ConfigParse("价格目录必须是 JSON 对象".to_string()))?;

    // 先检查必填键，保证错误信息带上键名
    if let Some(missing) = config_keys::PRICE_CATALOG_REQUIRED
        .iter()
        .find(|key| !object.contains_key(**key))
    {
        return Err(IofcError::missing_field(CATALOG_SOURCE, missing));
    }

    let catalog: PriceCatalog = serde_json::from_value(value)?;
    catalog.validate()?;

    tracing::debug!(
        other_solids_perc = catalog.milk_other_solids_production_perc,
        mass_unit_scale = catalog.mass_unit_scale,
        "价格目录加载完成"
    );
    Ok(catalog)
}

/// 解析原料价格表（原料名 → $/t as-fed）
///
/// 同名原料重复出现时报 ConfigParse
pub fn load_ingredient_prices(json: &str) -> IofcResult<IngredientPriceTable> {
    let table: IngredientPriceTable = serde_json::from_str(json)?;
    table.validate()?;
    tracing::debug!(count = table.len(), "原料价格表加载完成");
    Ok(table)
}

/// 解析日粮配方（列: Ingredient / kg_inclusion / DM_perc）
pub fn load_ration(json: &str) -> IofcResult<Ration> {
    let ration: Ration = serde_json::from_str(json)?;
    ration.validate()?;
    tracing::debug!(lines = ration.len(), "日粮配方加载完成");
    Ok(ration)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"{
        "milk_other_solids_production_perc": 5.7,
        "milk_fat_dollar_kg": 13.30,
        "milk_protein_dollar_kg": 10.96,
        "other_solids_dollar_kg": 0.90
    }"#;

    #[test]
    fn test_load_price_catalog_defaults_scale() {
        let catalog = load_price_catalog(CATALOG_JSON).unwrap();
        assert_eq!(catalog, PriceCatalog::example());
        assert_eq!(catalog.mass_unit_scale, 1000.0);
    }

    #[test]
    fn test_load_price_catalog_missing_key_named() {
        let json = r#"{
            "milk_other_solids_production_perc": 5.7,
            "milk_fat_dollar_kg": 13.30,
            "other_solids_dollar_kg": 0.90
        }"#;
        match load_price_catalog(json) {
            Err(IofcError::MissingField { source_name, field }) => {
                assert_eq!(source_name, "price_catalog");
                assert_eq!(field, "milk_protein_dollar_kg");
            }
            other => panic!("期望 MissingField，实际 {:?}", other),
        }
    }

    #[test]
    fn test_load_price_catalog_ignores_extra_keys() {
        let json = r#"{
            "milk_other_solids_production_perc": 5.7,
            "milk_fat_dollar_kg": 13.30,
            "milk_protein_dollar_kg": 10.96,
            "other_solids_dollar_kg": 0.90,
            "currency": "USD"
        }"#;
        assert!(load_price_catalog(json).is_ok());
    }

    #[test]
    fn test_load_price_catalog_rejects_non_object() {
        assert!(matches!(
            load_price_catalog("[1, 2, 3]"),
            Err(IofcError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_load_price_catalog_rejects_negative_price() {
        let json = CATALOG_JSON.replace("13.30", "-13.30");
        assert!(matches!(
            load_price_catalog(&json),
            Err(IofcError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_load_ingredient_prices() {
        let table = load_ingredient_prices(r#"{"Canola": 400.0, "Wheat straw": 200}"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("Wheat straw"), Some(200.0));
    }

    #[test]
    fn test_load_ration_rejects_zero_dm() {
        let json = r#"[{"Ingredient": "Canola", "kg_inclusion": 1.5, "DM_perc": 0}]"#;
        assert!(matches!(load_ration(json), Err(IofcError::InvalidValue { .. })));
    }
}
