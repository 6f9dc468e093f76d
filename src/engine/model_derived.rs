// ==========================================
// 奶牛 IOFC 计算核心 - 模型推导 IOFC 计算器
// ==========================================
// 输入: 价格目录 + 原料价格表 + 外部营养模型结果
// 输出: IOFC 分解 ($/d)
// 假设: 真蛋白等同于模型输出的 net protein（运行时不校验）
// ==========================================

use crate::domain::{
    guards::{ensure_finite, ensure_non_negative},
    model_keys, CalculationPath, ComponentYield, CostedRationLine, DietRow, IngredientPriceTable,
    IofcBreakdown, ModelResultSource, PriceCatalog,
};
use crate::engine::observer::{trace_names, IofcObserver, NoOpObserver};
use crate::engine::pricing;
use crate::engine::validation::validate_model_inputs;
use crate::error::IofcResult;
use tracing::instrument;

/// 模型输出 g → kg
const GRAMS_PER_KG: f64 = 1000.0;

// ==========================================
// ModelIofcCalculator - 模型推导 IOFC 计算器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelIofcCalculator {
    // 无状态计算器
}

impl ModelIofcCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算 IOFC
    pub fn calculate<M>(
        &self,
        catalog: &PriceCatalog,
        prices: &IngredientPriceTable,
        model: &M,
    ) -> IofcResult<IofcBreakdown>
    where
        M: ModelResultSource + ?Sized,
    {
        self.calculate_with_observer(catalog, prices, model, &mut NoOpObserver)
    }

    /// 计算 IOFC，并把中间值回调给观察者
    #[instrument(skip_all)]
    pub fn calculate_with_observer<M>(
        &self,
        catalog: &PriceCatalog,
        prices: &IngredientPriceTable,
        model: &M,
        observer: &mut dyn IofcObserver,
    ) -> IofcResult<IofcBreakdown>
    where
        M: ModelResultSource + ?Sized,
    {
        // 1. 读取模型输出并预检（与手工路径一致: 完整性校验先于计算）
        let components = self.component_yield(model, catalog)?;
        let diet = model.query_diet_table()?;
        validate_model_inputs(catalog, prices, &diet)?;

        observer.on_value(trace_names::FAT_KG, components.fat_kg);
        observer.on_value(trace_names::TRUE_PROTEIN_KG, components.true_protein_kg);
        observer.on_value(trace_names::OTHER_SOLIDS_KG, components.other_solids_kg);

        // 2. 收入（与手工路径同一公式）
        let revenue = ensure_finite(
            trace_names::REVENUE,
            pricing::component_revenue(&components, catalog),
        )?;
        observer.on_value(trace_names::REVENUE, revenue);

        // 3. 饲料成本（DM 采食量由模型直接给出）
        let lines = self.cost_diet(&diet, prices, catalog)?;
        for line in &lines {
            observer.on_costed_line(line);
        }
        let feed_cost = ensure_finite(trace_names::FEED_COST, pricing::total_feed_cost(&lines))?;
        observer.on_value(trace_names::FEED_COST, feed_cost);

        // 4. IOFC
        let breakdown = IofcBreakdown::assemble(
            CalculationPath::ModelDerived,
            components,
            revenue,
            feed_cost,
            lines,
        );
        ensure_finite(trace_names::IOFC, breakdown.iofc)?;
        observer.on_value(trace_names::IOFC, breakdown.iofc);

        tracing::debug!(
            diet_rows = diet.len(),
            revenue = breakdown.revenue,
            feed_cost = breakdown.feed_cost,
            iofc = breakdown.iofc,
            "模型推导 IOFC 计算完成"
        );
        Ok(breakdown)
    }

    /// 从模型输出提取成分产量 (kg/d)
    pub fn component_yield<M>(
        &self,
        model: &M,
        catalog: &PriceCatalog,
    ) -> IofcResult<ComponentYield>
    where
        M: ModelResultSource + ?Sized,
    {
        let fat_g = ensure_non_negative(
            model_keys::MILK_FAT_G,
            model.query_scalar(model_keys::MILK_FAT_G)?,
        )?;
        let true_protein_g = ensure_non_negative(
            model_keys::MILK_TRUE_PROTEIN_G,
            model.query_scalar(model_keys::MILK_TRUE_PROTEIN_G)?,
        )?;
        let milk_yield_kg = ensure_non_negative(
            model_keys::MILK_YIELD_KG,
            model.query_scalar(model_keys::MILK_YIELD_KG)?,
        )?;

        Ok(ComponentYield {
            fat_kg: fat_g / GRAMS_PER_KG,
            true_protein_kg: true_protein_g / GRAMS_PER_KG,
            other_solids_kg: pricing::other_solids_kg(milk_yield_kg, catalog),
        })
    }

    fn cost_diet(
        &self,
        diet: &[DietRow],
        prices: &IngredientPriceTable,
        catalog: &PriceCatalog,
    ) -> IofcResult<Vec<CostedRationLine>> {
        diet.iter()
            .map(|row| -> IofcResult<CostedRationLine> {
                let price_as_fed = prices.price_of(&row.feedstuff)?;
                pricing::cost_line(
                    &row.feedstuff,
                    row.dm_intake_kg,
                    row.dm_perc,
                    price_as_fed,
                    catalog.mass_unit_scale,
                )
            })
            .collect()
    }
}

/// 模型路径 IOFC ($/d)
pub fn model_iofc<M>(
    catalog: &PriceCatalog,
    prices: &IngredientPriceTable,
    model: &M,
) -> IofcResult<f64>
where
    M: ModelResultSource + ?Sized,
{
    ModelIofcCalculator::new()
        .calculate(catalog, prices, model)
        .map(|breakdown| breakdown.iofc)
}
