// ==========================================
// 奶牛 IOFC 计算核心 - 日粮与乳成分领域模型
// ==========================================
// 职责: 手工路径输入（乳成分 + 日粮配方）
// 注意: 同一原料重复出现会被重复计价（不做合并，不做纠正）
// ==========================================

use crate::domain::guards::{ensure_dm_percent, ensure_non_negative, ensure_percent};
use crate::error::IofcResult;
use serde::{Deserialize, Serialize};

// ==========================================
// RationLine - 日粮配方行
// ==========================================
// 列名与外部表格一致: Ingredient / kg_inclusion / DM_perc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RationLine {
    #[serde(rename = "Ingredient")]
    pub ingredient: String,
    /// 干物质采食量 (kg/d)
    pub kg_inclusion: f64,
    /// 原料干物质百分比 (0, 100]
    #[serde(rename = "DM_perc")]
    pub dm_perc: f64,
}

impl RationLine {
    pub fn new(ingredient: impl Into<String>, kg_inclusion: f64, dm_perc: f64) -> IofcResult<Self> {
        let line = Self {
            ingredient: ingredient.into(),
            kg_inclusion,
            dm_perc,
        };
        line.validate()?;
        Ok(line)
    }

    pub fn validate(&self) -> IofcResult<()> {
        ensure_non_negative("kg_inclusion", self.kg_inclusion)?;
        ensure_dm_percent("DM_perc", self.dm_perc)?;
        Ok(())
    }
}

// ==========================================
// Ration - 日粮配方
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ration {
    lines: Vec<RationLine>,
}

impl Ration {
    pub fn new(lines: Vec<RationLine>) -> Self {
        Self { lines }
    }

    pub fn push(&mut self, line: RationLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[RationLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 配方中的原料标识（保持行顺序，可能重复）
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.ingredient.as_str())
    }

    /// 逐行校验数值域
    pub fn validate(&self) -> IofcResult<()> {
        self.lines.iter().try_for_each(RationLine::validate)
    }

    /// 示例日粮（七种原料，合计 30 kg DM/d）
    pub fn example() -> Self {
        let rows = [
            ("Wheat straw", 0.5, 90.0),
            ("Alfalfa Silage", 9.2, 35.0),
            ("Corn silage", 12.3, 33.0),
            ("Corn Grain HM", 3.7, 87.0),
            ("Soybean meal", 2.4, 88.0),
            ("Canola", 1.5, 91.0),
            ("Vitamin/mineral mix", 0.4, 90.0),
        ];
        Self {
            lines: rows
                .iter()
                .map(|(ingredient, kg_inclusion, dm_perc)| RationLine {
                    ingredient: ingredient.to_string(),
                    kg_inclusion: *kg_inclusion,
                    dm_perc: *dm_perc,
                })
                .collect(),
        }
    }
}

// ==========================================
// MilkComponents - 乳量与乳成分（手工路径）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MilkComponents {
    /// 奶量 (kg/d)
    pub milk_yield_kg: f64,
    /// 乳脂率 (%)
    pub fat_perc: f64,
    /// 真蛋白率 (%)
    pub true_protein_perc: f64,
}

impl MilkComponents {
    pub fn new(milk_yield_kg: f64, fat_perc: f64, true_protein_perc: f64) -> IofcResult<Self> {
        let milk = Self {
            milk_yield_kg,
            fat_perc,
            true_protein_perc,
        };
        milk.validate()?;
        Ok(milk)
    }

    pub fn validate(&self) -> IofcResult<()> {
        ensure_non_negative("milk_yield_kg", self.milk_yield_kg)?;
        ensure_percent("fat_perc", self.fat_perc)?;
        ensure_percent("true_protein_perc", self.true_protein_perc)?;
        Ok(())
    }

    /// 示例: 31 kg/d，乳脂 3.6%，真蛋白 3.3%
    pub fn example() -> Self {
        Self {
            milk_yield_kg: 31.0,
            fat_perc: 3.6,
            true_protein_perc: 3.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IofcError;

    #[test]
    fn test_ration_line_rejects_zero_dm() {
        let result = RationLine::new("Corn silage", 10.0, 0.0);
        match result {
            Err(IofcError::InvalidValue { field, .. }) => assert_eq!(field, "DM_perc"),
            other => panic!("期望 InvalidValue，实际 {:?}", other),
        }
    }

    #[test]
    fn test_ration_line_rejects_negative_mass() {
        assert!(RationLine::new("Corn silage", -1.0, 33.0).is_err());
    }

    #[test]
    fn test_ration_deserializes_column_names() {
        let json = r#"[{"Ingredient": "Canola", "kg_inclusion": 1.5, "DM_perc": 91.0}]"#;
        let ration: Ration = serde_json::from_str(json).unwrap();
        assert_eq!(ration.len(), 1);
        assert_eq!(ration.lines()[0].ingredient, "Canola");
        assert_eq!(ration.lines()[0].dm_perc, 91.0);
    }

    #[test]
    fn test_identifiers_keep_duplicates() {
        let mut ration = Ration::default();
        ration.push(RationLine::new("Hay", 1.0, 88.0).unwrap());
        ration.push(RationLine::new("Hay", 2.0, 88.0).unwrap());
        assert_eq!(ration.identifiers().collect::<Vec<_>>(), vec!["Hay", "Hay"]);
    }

    #[test]
    fn test_milk_components_validation() {
        assert!(MilkComponents::new(31.0, 3.6, 3.3).is_ok());
        assert!(MilkComponents::new(-2.0, 3.6, 3.3).is_err());
        assert!(MilkComponents::new(31.0, 101.0, 3.3).is_err());
    }
}
