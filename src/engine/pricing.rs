// ==========================================
// 奶牛 IOFC 计算核心 - 计价公式
// ==========================================
// 职责: 两条计算路径共用的收入公式与 DM 口径换算
// 红线: DM 换算必须逐原料进行，不能在汇总值上换算
// ==========================================

use crate::domain::guards::ensure_finite;
use crate::domain::{ComponentYield, CostedRationLine, PriceCatalog};
use crate::error::IofcResult;

/// 按奶量与百分比计算成分产量 (kg/d)
pub fn component_mass_kg(milk_yield_kg: f64, perc: f64) -> f64 {
    milk_yield_kg * perc / 100.0
}

/// 其他固形物产量，百分比取自价格目录的固定常数
pub fn other_solids_kg(milk_yield_kg: f64, catalog: &PriceCatalog) -> f64 {
    component_mass_kg(milk_yield_kg, catalog.milk_other_solids_production_perc)
}

/// 乳收入 ($/d) = 脂 × 脂价 + 真蛋白 × 蛋白价 + 其他固形物 × 固形物价
pub fn component_revenue(components: &ComponentYield, catalog: &PriceCatalog) -> f64 {
    components.fat_kg * catalog.milk_fat_dollar_kg
        + components.true_protein_kg * catalog.milk_protein_dollar_kg
        + components.other_solids_kg * catalog.other_solids_dollar_kg
}

/// as-fed 价格换算为 DM 口径价格（同一质量单位）
///
/// DM% = 100 时换算为恒等
pub fn dm_basis_price(price_as_fed: f64, dm_perc: f64) -> f64 {
    // 直接返回，避免 x / 100 * 100 的舍入误差
    if dm_perc == 100.0 {
        return price_as_fed;
    }
    price_as_fed / dm_perc * 100.0
}

/// 单原料计价
///
/// # 参数
/// - `dm_intake_kg`: 干物质采食量 (kg/d)
/// - `dm_perc`: 干物质百分比，调用前已校验在 (0, 100]
/// - `price_as_fed`: as-fed 价格（每质量单位）
/// - `mass_unit_scale`: 价格质量单位与 kg 的换算（$/t 时为 1000）
///
/// 输入有限但乘除后溢出时报 InvalidValue（字段如 `daily_cost[Canola]`）
pub fn cost_line(
    ingredient: &str,
    dm_intake_kg: f64,
    dm_perc: f64,
    price_as_fed: f64,
    mass_unit_scale: f64,
) -> IofcResult<CostedRationLine> {
    let price_dm = ensure_finite(
        &format!("price_dm[{}]", ingredient),
        dm_basis_price(price_as_fed, dm_perc),
    )?;
    let price_per_kg_dm = price_dm / mass_unit_scale;
    let daily_cost = ensure_finite(
        &format!("daily_cost[{}]", ingredient),
        dm_intake_kg * price_per_kg_dm,
    )?;
    Ok(CostedRationLine {
        ingredient: ingredient.to_string(),
        dm_intake_kg,
        dm_perc,
        price_as_fed,
        price_dm,
        price_per_kg_dm,
        daily_cost,
    })
}

/// 饲料总成本 ($/d)，按行顺序累加
pub fn total_feed_cost(lines: &[CostedRationLine]) -> f64 {
    lines.iter().map(|line| line.daily_cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IofcError;

    #[test]
    fn test_dm_basis_price_identity_at_full_dm() {
        assert_eq!(dm_basis_price(250.0, 100.0), 250.0);
        assert_eq!(dm_basis_price(123.45, 100.0), 123.45);
    }

    #[test]
    fn test_dm_basis_price_scales_up_wet_feeds() {
        // 35% DM 的青贮: 每吨 DM 的价格约为 as-fed 的 2.86 倍
        let price = dm_basis_price(205.0, 35.0);
        assert!((price - 585.714_285_714).abs() < 1e-6);
    }

    #[test]
    fn test_cost_line_wheat_straw() {
        let line = cost_line("Wheat straw", 0.5, 90.0, 200.0, 1000.0).unwrap();
        assert!((line.price_dm - 222.222_222).abs() < 1e-5);
        assert!((line.price_per_kg_dm - 0.222_222).abs() < 1e-6);
        assert!((line.daily_cost - 0.1111).abs() < 1e-4);
    }

    #[test]
    fn test_cost_line_zero_intake_costs_nothing() {
        let line = cost_line("Canola", 0.0, 91.0, 400.0, 1000.0).unwrap();
        assert_eq!(line.daily_cost, 0.0);
    }

    #[test]
    fn test_cost_line_overflow_names_ingredient() {
        // DM 价格有限，乘以采食量后溢出
        match cost_line("Canola", 1e20, 50.0, 1e300, 1000.0) {
            Err(IofcError::InvalidValue { field, value, .. }) => {
                assert_eq!(field, "daily_cost[Canola]");
                assert!(value.is_infinite());
            }
            other => panic!("期望 InvalidValue，实际 {:?}", other),
        }

        // as-fed 价格接近上限时 DM 换算本身溢出
        match cost_line("Canola", 1.0, 50.0, 1e308, 1000.0) {
            Err(IofcError::InvalidValue { field, .. }) => assert_eq!(field, "price_dm[Canola]"),
            other => panic!("期望 InvalidValue，实际 {:?}", other),
        }
    }

    #[test]
    fn test_component_revenue_example() {
        let catalog = PriceCatalog::example();
        let components = ComponentYield {
            fat_kg: component_mass_kg(31.0, 3.6),
            true_protein_kg: component_mass_kg(31.0, 3.3),
            other_solids_kg: other_solids_kg(31.0, &catalog),
        };
        let revenue = component_revenue(&components, &catalog);
        assert!((revenue - 27.64518).abs() < 1e-9);
    }

    #[test]
    fn test_total_feed_cost_empty() {
        assert_eq!(total_feed_cost(&[]), 0.0);
    }
}
