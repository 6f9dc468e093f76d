// ==========================================
// 奶牛 IOFC 计算核心 - 数值域校验
// ==========================================
// 职责: 构造与计算前的数值前置条件检查
// 红线: 非法数值必须报告，不能静默参与计算
// ==========================================

use crate::error::{IofcError, IofcResult};

/// 数值必须有限（拒绝 NaN / ±inf）
pub(crate) fn ensure_finite(field: &str, value: f64) -> IofcResult<f64> {
    if !value.is_finite() {
        return Err(IofcError::invalid_value(field, value, "数值必须为有限数"));
    }
    Ok(value)
}

/// 数值必须 >= 0
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> IofcResult<f64> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(IofcError::invalid_value(field, value, "数值不能为负"));
    }
    Ok(value)
}

/// 百分比必须在 [0, 100]
pub(crate) fn ensure_percent(field: &str, value: f64) -> IofcResult<f64> {
    ensure_finite(field, value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(IofcError::invalid_value(field, value, "百分比超出范围 [0, 100]"));
    }
    Ok(value)
}

/// 干物质百分比必须在 (0, 100]
///
/// DM% 作为除数参与价格换算，0 或负值会得到无穷大/负价格
pub(crate) fn ensure_dm_percent(field: &str, value: f64) -> IofcResult<f64> {
    ensure_finite(field, value)?;
    if value <= 0.0 || value > 100.0 {
        return Err(IofcError::invalid_value(
            field,
            value,
            "干物质百分比超出范围 (0, 100]",
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_non_negative() {
        assert!(ensure_non_negative("x", 0.0).is_ok());
        assert!(ensure_non_negative("x", 12.5).is_ok());
        assert!(ensure_non_negative("x", -0.1).is_err());
        assert!(ensure_non_negative("x", f64::NAN).is_err());
    }

    #[test]
    fn test_ensure_percent_bounds() {
        assert!(ensure_percent("p", 0.0).is_ok());
        assert!(ensure_percent("p", 100.0).is_ok());
        assert!(ensure_percent("p", 100.01).is_err());
        assert!(ensure_percent("p", -1.0).is_err());
    }

    #[test]
    fn test_ensure_dm_percent_rejects_zero() {
        assert!(ensure_dm_percent("DM_perc", 100.0).is_ok());
        assert!(ensure_dm_percent("DM_perc", 0.001).is_ok());
        assert!(ensure_dm_percent("DM_perc", 0.0).is_err());
        assert!(ensure_dm_percent("DM_perc", -5.0).is_err());
        assert!(ensure_dm_percent("DM_perc", f64::INFINITY).is_err());
    }
}
