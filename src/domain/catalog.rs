// ==========================================
// 奶牛 IOFC 计算核心 - 价格目录领域模型
// ==========================================
// 职责: 乳成分价格 + 原料价格表（纯数据，不含计算逻辑）
// 红线: 原料价格按精确字符串查找，缺失即报错，不允许默认为 0
// ==========================================

use crate::domain::guards::{ensure_non_negative, ensure_percent};
use crate::error::{IofcError, IofcResult};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// 默认质量单位换算系数（价格按吨计，采食量按 kg 计）
pub const DEFAULT_MASS_UNIT_SCALE: f64 = 1000.0;

fn default_mass_unit_scale() -> f64 {
    DEFAULT_MASS_UNIT_SCALE
}

// ==========================================
// PriceCatalog - 乳成分价格目录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCatalog {
    /// 其他固形物产量占奶量百分比 (0~100)
    pub milk_other_solids_production_perc: f64,
    /// 乳脂价格 ($/kg)
    pub milk_fat_dollar_kg: f64,
    /// 真蛋白价格 ($/kg)
    pub milk_protein_dollar_kg: f64,
    /// 其他固形物价格 ($/kg)
    pub other_solids_dollar_kg: f64,
    /// 原料价格的质量单位换算 (1000 = $/t 对应 kg 采食量)
    #[serde(default = "default_mass_unit_scale")]
    pub mass_unit_scale: f64,
}

impl PriceCatalog {
    /// 创建并校验价格目录
    pub fn new(
        milk_other_solids_production_perc: f64,
        milk_fat_dollar_kg: f64,
        milk_protein_dollar_kg: f64,
        other_solids_dollar_kg: f64,
    ) -> IofcResult<Self> {
        let catalog = Self {
            milk_other_solids_production_perc,
            milk_fat_dollar_kg,
            milk_protein_dollar_kg,
            other_solids_dollar_kg,
            mass_unit_scale: DEFAULT_MASS_UNIT_SCALE,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// 覆盖质量单位换算系数
    pub fn with_mass_unit_scale(mut self, scale: f64) -> IofcResult<Self> {
        self.mass_unit_scale = scale;
        self.validate()?;
        Ok(self)
    }

    /// 校验不变量: 价格非负，百分比在 [0, 100]，换算系数 > 0
    pub fn validate(&self) -> IofcResult<()> {
        ensure_percent(
            "milk_other_solids_production_perc",
            self.milk_other_solids_production_perc,
        )?;
        ensure_non_negative("milk_fat_dollar_kg", self.milk_fat_dollar_kg)?;
        ensure_non_negative("milk_protein_dollar_kg", self.milk_protein_dollar_kg)?;
        ensure_non_negative("other_solids_dollar_kg", self.other_solids_dollar_kg)?;
        ensure_non_negative("mass_unit_scale", self.mass_unit_scale)?;
        if self.mass_unit_scale == 0.0 {
            return Err(IofcError::invalid_value(
                "mass_unit_scale",
                self.mass_unit_scale,
                "换算系数必须大于 0",
            ));
        }
        Ok(())
    }

    /// 示例目录: 其他固形物 5.7%，$13.30 / $10.96 / $0.90 每 kg
    pub fn example() -> Self {
        Self {
            milk_other_solids_production_perc: 5.7,
            milk_fat_dollar_kg: 13.30,
            milk_protein_dollar_kg: 10.96,
            other_solids_dollar_kg: 0.90,
            mass_unit_scale: DEFAULT_MASS_UNIT_SCALE,
        }
    }
}

// ==========================================
// IngredientPriceTable - 原料价格表 (as-fed)
// ==========================================
// 键唯一，计算器只读
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IngredientPriceTable {
    prices: BTreeMap<String, f64>,
}

impl IngredientPriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一条原料价格（$/t，as-fed），同名覆盖
    pub fn insert(&mut self, ingredient: impl Into<String>, price_as_fed: f64) -> IofcResult<()> {
        let ingredient = ingredient.into();
        ensure_non_negative(&format!("price[{}]", ingredient), price_as_fed)?;
        self.prices.insert(ingredient, price_as_fed);
        Ok(())
    }

    /// 从 (原料, 价格) 序列构造，逐条校验价格且拒绝重复原料
    pub fn try_from_entries<I, S>(entries: I) -> IofcResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (ingredient, price_as_fed) in entries {
            let ingredient = ingredient.into();
            if table.contains(&ingredient) {
                return Err(IofcError::invalid_value(
                    &format!("price[{}]", ingredient),
                    price_as_fed,
                    "原料重复定价",
                ));
            }
            table.insert(ingredient, price_as_fed)?;
        }
        Ok(table)
    }

    /// 链式构造
    pub fn with_price(
        mut self,
        ingredient: impl Into<String>,
        price_as_fed: f64,
    ) -> IofcResult<Self> {
        self.insert(ingredient, price_as_fed)?;
        Ok(self)
    }

    pub fn get(&self, ingredient: &str) -> Option<f64> {
        self.prices.get(ingredient).copied()
    }

    /// 查找原料价格，缺失时报 MissingPriceMapping
    pub fn price_of(&self, ingredient: &str) -> IofcResult<f64> {
        self.get(ingredient)
            .ok_or_else(|| IofcError::MissingPriceMapping {
                identifiers: vec![ingredient.to_string()],
            })
    }

    pub fn contains(&self, ingredient: &str) -> bool {
        self.prices.contains_key(ingredient)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prices.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// 计算未匹配的原料集合（输入标识 - 价格表键），排序去重
    pub fn missing_identifiers<'a, I>(&self, identifiers: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        identifiers
            .into_iter()
            .filter(|id| !self.contains(id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// 校验全部价格非负（用于反序列化后的数据）
    pub fn validate(&self) -> IofcResult<()> {
        for (ingredient, price) in &self.prices {
            ensure_non_negative(&format!("price[{}]", ingredient), *price)?;
        }
        Ok(())
    }

    /// 示例原料价格表（$/t，as-fed）
    pub fn example() -> Self {
        let prices = [
            ("Wheat straw", 200.0),
            ("Alfalfa Silage", 205.0),
            ("Corn silage", 120.0),
            ("Corn Grain HM", 250.0),
            ("Soybean meal", 500.0),
            ("Canola", 400.0),
            ("Vitamin/mineral mix", 900.0),
            ("Barley grain", 280.0),
        ];
        Self {
            prices: prices
                .iter()
                .map(|(name, price)| (name.to_string(), *price))
                .collect(),
        }
    }
}

// 手写反序列化: serde_json 对重复键默认后值覆盖前值，这里改为报错
impl<'de> Deserialize<'de> for IngredientPriceTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PriceTableVisitor;

        impl<'de> Visitor<'de> for PriceTableVisitor {
            type Value = IngredientPriceTable;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("原料名 → as-fed 价格的映射")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut prices = BTreeMap::new();
                while let Some((ingredient, price)) = map.next_entry::<String, f64>()? {
                    if prices.contains_key(&ingredient) {
                        return Err(de::Error::custom(format!(
                            "原料重复定价 (duplicate key): {}",
                            ingredient
                        )));
                    }
                    prices.insert(ingredient, price);
                }
                Ok(IngredientPriceTable { prices })
            }
        }

        deserializer.deserialize_map(PriceTableVisitor)
    }
}
