//! 宽松的数值解析
//!
//! 后端对价格、数量、订单号的类型并不稳定（数字或数字字符串都会出现），
//! 这里统一在边界处归一化，非法值仍然报错。
//! 字符串与布尔字段可能是 `null`，按缺省值处理。

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// 数字、数字字符串或 null（视为 0）
pub fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(NumberOrText::Number(n)) => Ok(n),
        Some(NumberOrText::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("invalid number: {text:?}")))
        }
    }
}

/// 非负整数，接受数字字符串
pub fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = lenient_f64(deserializer)?;
    if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(D::Error::custom(format!("invalid quantity: {value}")));
    }
    Ok(value as u32)
}

/// 可选字符串，数字会被格式化为字符串
pub fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        None => None,
        Some(NumberOrText::Text(text)) => Some(text),
        Some(NumberOrText::Number(n)) if n.fract() == 0.0 => Some(format!("{}", n as i64)),
        Some(NumberOrText::Number(n)) => Some(n.to_string()),
    })
}

/// `null` 按类型缺省值处理（缺失字段仍需配合 `#[serde(default)]`）
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
