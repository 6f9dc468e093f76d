// ==========================================
// 奶牛 IOFC 计算核心 - 手工 IOFC 计算器
// ==========================================
// 输入: 价格目录 + 乳成分百分比 + 原料价格表 + 日粮配方
// 输出: IOFC 分解 ($/d)
// 红线: 任一原料缺少价格映射时，在计算前整体失败并报告完整集合
// ==========================================

use crate::domain::{
    guards::ensure_finite, CalculationPath, ComponentYield, CostedRationLine,
    IngredientPriceTable, IofcBreakdown, MilkComponents, PriceCatalog, Ration,
};
use crate::engine::observer::{trace_names, IofcObserver, NoOpObserver, TracingObserver};
use crate::engine::pricing;
use crate::engine::validation::validate_manual_inputs;
use crate::error::IofcResult;
use tracing::instrument;

// ==========================================
// ManualIofcCalculator - 手工 IOFC 计算器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualIofcCalculator {
    // 无状态计算器
}

impl ManualIofcCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算 IOFC
    ///
    /// # 参数
    /// - `verbose`: 仅控制诊断输出（tracing），不影响返回值
    pub fn calculate(
        &self,
        catalog: &PriceCatalog,
        milk: &MilkComponents,
        prices: &IngredientPriceTable,
        ration: &Ration,
        verbose: bool,
    ) -> IofcResult<IofcBreakdown> {
        if verbose {
            self.calculate_with_observer(catalog, milk, prices, ration, &mut TracingObserver)
        } else {
            self.calculate_with_observer(catalog, milk, prices, ration, &mut NoOpObserver)
        }
    }

    /// 计算 IOFC，并把中间值回调给观察者
    ///
    /// 顺序: 成分产量 → 收入 → 逐行计价 → 饲料成本 → IOFC
    #[instrument(skip_all, fields(lines = ration.len()))]
    pub fn calculate_with_observer(
        &self,
        catalog: &PriceCatalog,
        milk: &MilkComponents,
        prices: &IngredientPriceTable,
        ration: &Ration,
        observer: &mut dyn IofcObserver,
    ) -> IofcResult<IofcBreakdown> {
        validate_manual_inputs(catalog, milk, prices, ration)?;

        // 1. 成分产量
        let components = self.component_yield(milk, catalog);
        observer.on_value(trace_names::FAT_KG, components.fat_kg);
        observer.on_value(trace_names::TRUE_PROTEIN_KG, components.true_protein_kg);
        observer.on_value(trace_names::OTHER_SOLIDS_KG, components.other_solids_kg);

        // 2. 收入
        let revenue = ensure_finite(
            trace_names::REVENUE,
            pricing::component_revenue(&components, catalog),
        )?;
        observer.on_value(trace_names::REVENUE, revenue);

        // 3. 逐行计价
        let lines = self.cost_ration(ration, prices, catalog)?;
        for line in &lines {
            observer.on_costed_line(line);
        }

        // 4. 饲料成本
        let feed_cost = ensure_finite(trace_names::FEED_COST, pricing::total_feed_cost(&lines))?;
        observer.on_value(trace_names::FEED_COST, feed_cost);

        // 5. IOFC
        let breakdown =
            IofcBreakdown::assemble(CalculationPath::Manual, components, revenue, feed_cost, lines);
        ensure_finite(trace_names::IOFC, breakdown.iofc)?;
        observer.on_value(trace_names::IOFC, breakdown.iofc);

        tracing::debug!(
            revenue = breakdown.revenue,
            feed_cost = breakdown.feed_cost,
            iofc = breakdown.iofc,
            "手工 IOFC 计算完成"
        );
        Ok(breakdown)
    }

    /// 由乳成分百分比计算成分产量 (kg/d)
    pub fn component_yield(&self, milk: &MilkComponents, catalog: &PriceCatalog) -> ComponentYield {
        ComponentYield {
            fat_kg: pricing::component_mass_kg(milk.milk_yield_kg, milk.fat_perc),
            true_protein_kg: pricing::component_mass_kg(milk.milk_yield_kg, milk.true_protein_perc),
            other_solids_kg: pricing::other_solids_kg(milk.milk_yield_kg, catalog),
        }
    }

    /// 逐行计价（kg_inclusion 按 DM 采食量处理）
    fn cost_ration(
        &self,
        ration: &Ration,
        prices: &IngredientPriceTable,
        catalog: &PriceCatalog,
    ) -> IofcResult<Vec<CostedRationLine>> {
        ration
            .lines()
            .iter()
            .map(|line| -> IofcResult<CostedRationLine> {
                let price_as_fed = prices.price_of(&line.ingredient)?;
                pricing::cost_line(
                    &line.ingredient,
                    line.kg_inclusion,
                    line.dm_perc,
                    price_as_fed,
                    catalog.mass_unit_scale,
                )
            })
            .collect()
    }
}

/// 手工路径 IOFC ($/d)
pub fn manual_iofc(
    catalog: &PriceCatalog,
    milk: &MilkComponents,
    prices: &IngredientPriceTable,
    ration: &Ration,
) -> IofcResult<f64> {
    ManualIofcCalculator::new()
        .calculate(catalog, milk, prices, ration, false)
        .map(|breakdown| breakdown.iofc)
}
