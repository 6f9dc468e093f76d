// ==========================================
// 奶牛 IOFC 计算核心 - 错误类型
// ==========================================
// 工具: thiserror 派生宏
// 原则: 所有错误对单次计算是终止性的（无部分结果、无重试）
// ==========================================

use thiserror::Error;

/// IOFC 计算错误类型
#[derive(Error, Debug)]
pub enum IofcError {
    // ===== 价格映射错误 =====
    /// 配方/日粮表中的原料在价格表中没有对应条目
    ///
    /// identifiers 为完整的未匹配集合（已排序、去重）
    #[error("原料价格映射缺失 (no mapping): {}", .identifiers.join(", "))]
    MissingPriceMapping { identifiers: Vec<String> },

    // ===== 字段错误 =====
    #[error("必填字段缺失 ({source_name}): {field}")]
    MissingField { source_name: String, field: String },

    #[error("数值非法 (字段 {field}, 值 {value}): {reason}")]
    InvalidValue {
        field: String,
        value: f64,
        reason: String,
    },

    // ===== 配置错误 =====
    #[error("配置解析失败: {0}")]
    ConfigParse(String),

    // ===== 外部模型错误 =====
    #[error("外部模型查询失败: {0}")]
    Model(#[from] anyhow::Error),
}

impl IofcError {
    /// 构造字段缺失错误
    pub fn missing_field(source_name: &str, field: &str) -> Self {
        IofcError::MissingField {
            source_name: source_name.to_string(),
            field: field.to_string(),
        }
    }

    /// 构造数值非法错误
    pub fn invalid_value(field: &str, value: f64, reason: impl Into<String>) -> Self {
        IofcError::InvalidValue {
            field: field.to_string(),
            value,
            reason: reason.into(),
        }
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for IofcError {
    fn from(err: serde_json::Error) -> Self {
        IofcError::ConfigParse(err.to_string())
    }
}

/// Result 类型别名
pub type IofcResult<T> = Result<T, IofcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_mapping_message_lists_all_identifiers() {
        let err = IofcError::MissingPriceMapping {
            identifiers: vec!["Barley".to_string(), "Oats".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Barley"));
        assert!(msg.contains("Oats"));
        assert!(msg.contains("no mapping"));
    }

    #[test]
    fn test_serde_error_maps_to_config_parse() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: IofcError = parse_err.into();
        assert!(matches!(err, IofcError::ConfigParse(_)));
    }

    #[test]
    fn test_anyhow_error_maps_to_model() {
        let err: IofcError = anyhow::anyhow!("engine offline").into();
        assert!(matches!(err, IofcError::Model(_)));
        assert!(err.to_string().contains("engine offline"));
    }
}
