// ==========================================
// 奶牛 IOFC 计算核心 - 输入前置校验
// ==========================================
// 职责: 计算前的全有或全无校验（价格映射完整性 + 数值域）
// 红线: 校验失败时不产生任何部分结果
// ==========================================

use crate::domain::{DietRow, IngredientPriceTable, MilkComponents, PriceCatalog, Ration};
use crate::error::{IofcError, IofcResult};

/// 校验全部原料都有价格映射
///
/// 失败时报告完整的未匹配集合，而不是第一个
pub fn ensure_prices_complete<'a, I>(
    prices: &IngredientPriceTable,
    identifiers: I,
) -> IofcResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let missing = prices.missing_identifiers(identifiers);
    if missing.is_empty() {
        return Ok(());
    }
    tracing::warn!(missing = ?missing, "原料价格映射缺失");
    Err(IofcError::MissingPriceMapping {
        identifiers: missing,
    })
}

/// 手工路径输入校验
pub fn validate_manual_inputs(
    catalog: &PriceCatalog,
    milk: &MilkComponents,
    prices: &IngredientPriceTable,
    ration: &Ration,
) -> IofcResult<()> {
    catalog.validate()?;
    prices.validate()?;
    milk.validate()?;
    ensure_prices_complete(prices, ration.identifiers())?;
    ration.validate()
}

/// 模型路径输入校验（日粮表同样做完整性预检）
pub fn validate_model_inputs(
    catalog: &PriceCatalog,
    prices: &IngredientPriceTable,
    diet: &[DietRow],
) -> IofcResult<()> {
    catalog.validate()?;
    prices.validate()?;
    ensure_prices_complete(prices, diet.iter().map(|row| row.feedstuff.as_str()))?;
    diet.iter().try_for_each(DietRow::validate)
}
