// ==========================================
// 奶牛 IOFC 计算核心 - 结果类型定义
// ==========================================
// 职责: 计算器输出（成分产量、计价后的日粮行、IOFC 分解）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 计算路径
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationPath {
    Manual,       // 手工输入乳成分 + 配方
    ModelDerived, // 外部营养模型输出
}

impl fmt::Display for CalculationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationPath::Manual => write!(f, "MANUAL"),
            CalculationPath::ModelDerived => write!(f, "MODEL_DERIVED"),
        }
    }
}

// ==========================================
// ComponentYield - 乳成分产量 (kg/d)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentYield {
    pub fat_kg: f64,
    pub true_protein_kg: f64,
    pub other_solids_kg: f64,
}

// ==========================================
// CostedRationLine - 计价后的日粮行
// ==========================================
// 对应诊断输出中的增广配方表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostedRationLine {
    pub ingredient: String,
    pub dm_intake_kg: f64,       // 干物质采食量 (kg/d)
    pub dm_perc: f64,            // 干物质百分比
    pub price_as_fed: f64,       // as-fed 价格 ($/t)
    pub price_dm: f64,           // DM 口径价格 ($/t)
    pub price_per_kg_dm: f64,    // DM 口径价格 ($/kg)
    pub daily_cost: f64,         // 日成本 ($/d)
}

// ==========================================
// IofcBreakdown - IOFC 分解结果
// ==========================================
// 不变量: iofc == revenue - feed_cost（无隐藏项，不做舍入）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IofcBreakdown {
    pub path: CalculationPath,
    pub components: ComponentYield,
    pub revenue: f64,   // 乳收入 ($/d)
    pub feed_cost: f64, // 饲料成本 ($/d)
    pub iofc: f64,      // 收益 ($/d)
    pub lines: Vec<CostedRationLine>,
}

impl IofcBreakdown {
    /// 由收入与计价行组装（iofc 在此统一计算）
    pub fn assemble(
        path: CalculationPath,
        components: ComponentYield,
        revenue: f64,
        feed_cost: f64,
        lines: Vec<CostedRationLine>,
    ) -> Self {
        Self {
            path,
            components,
            revenue,
            feed_cost,
            iofc: revenue - feed_cost,
            lines,
        }
    }
}
