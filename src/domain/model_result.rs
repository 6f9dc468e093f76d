// ==========================================
// 奶牛 IOFC 计算核心 - 外部营养模型结果接口
// ==========================================
// 职责: 定义外部预测模型的最小查询契约（依赖倒置）
// 说明: 核心只依赖 query_scalar / query_diet_table 两个操作，
//       真实模型由调用方以适配器实现
// ==========================================

use crate::domain::guards::{ensure_dm_percent, ensure_finite, ensure_non_negative};
use crate::error::{IofcError, IofcResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 模型输出键名
pub mod model_keys {
    /// 乳脂产量 (g/d)
    pub const MILK_FAT_G: &str = "Mlk_Fat_g";
    /// 乳真蛋白产量 (g/d)，视同模型的 net protein
    pub const MILK_TRUE_PROTEIN_G: &str = "Mlk_NP_g";
    /// 奶量 (kg/d)
    pub const MILK_YIELD_KG: &str = "Mlk_Prod_comp";
}

const SOURCE_NAME: &str = "model_result";

// ==========================================
// DietRow - 模型日粮表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietRow {
    #[serde(rename = "Feedstuff")]
    pub feedstuff: String,
    /// 干物质百分比 (0, 100]
    #[serde(rename = "Fd_DMPerc")]
    pub dm_perc: f64,
    /// 干物质采食量 (kg/d)，已是 DM 口径
    #[serde(rename = "Fd_DMIn")]
    pub dm_intake_kg: f64,
}

impl DietRow {
    pub fn new(feedstuff: impl Into<String>, dm_perc: f64, dm_intake_kg: f64) -> Self {
        Self {
            feedstuff: feedstuff.into(),
            dm_perc,
            dm_intake_kg,
        }
    }

    pub fn validate(&self) -> IofcResult<()> {
        ensure_dm_percent("Fd_DMPerc", self.dm_perc)?;
        ensure_non_negative("Fd_DMIn", self.dm_intake_kg)?;
        Ok(())
    }
}

// ==========================================
// Trait: ModelResultSource
// ==========================================
/// 外部模型结果查询接口
///
/// # 实现说明
/// - 适配器负责把模型自身的错误转换为 `IofcError`（`anyhow::Error` 可直接 `?`）
/// - 缺失键应返回 `IofcError::MissingField`
pub trait ModelResultSource {
    /// 按名称查询标量输出
    fn query_scalar(&self, name: &str) -> IofcResult<f64>;

    /// 查询模型内部日粮表
    fn query_diet_table(&self) -> IofcResult<Vec<DietRow>>;
}

// ==========================================
// StaticModelResult - 内存适配器
// ==========================================
/// 已捕获的模型输出（可从 JSON 反序列化）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticModelResult {
    #[serde(default)]
    pub scalars: BTreeMap<String, f64>,
    #[serde(default)]
    pub diet: Vec<DietRow>,
}

impl StaticModelResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scalar(mut self, name: impl Into<String>, value: f64) -> Self {
        self.scalars.insert(name.into(), value);
        self
    }

    pub fn with_diet_row(mut self, row: DietRow) -> Self {
        self.diet.push(row);
        self
    }

    /// 从 JSON 文本解析
    pub fn from_json_str(json: &str) -> IofcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl ModelResultSource for StaticModelResult {
    fn query_scalar(&self, name: &str) -> IofcResult<f64> {
        let value = self
            .scalars
            .get(name)
            .copied()
            .ok_or_else(|| IofcError::missing_field(SOURCE_NAME, name))?;
        ensure_finite(name, value)
    }

    fn query_diet_table(&self) -> IofcResult<Vec<DietRow>> {
        Ok(self.diet.clone())
    }
}
