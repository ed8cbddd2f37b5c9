// =========================================================
// 配置常量 (Configuration Constants)
// =========================================================

const DEFAULT_API_BASE: &str = "https://canteen-order-backend.onrender.com/api/v1";
const DEFAULT_TOAST_MS: u32 = 3000;
const DEFAULT_PAGE_SIZE: usize = 5;
const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

/// 订单列表可选的每页条数
pub const PAGE_SIZE_CHOICES: [usize; 3] = [5, 10, 20];

pub const ENV_API_BASE: &str = "CANTEEN_API_BASE";
pub const ENV_TOAST_MS: &str = "CANTEEN_TOAST_MS";
pub const ENV_PAGE_SIZE: &str = "CANTEEN_PAGE_SIZE";
pub const ENV_LOG_LEVEL: &str = "CANTEEN_LOG_LEVEL";

// =========================================================
// 运行时配置
// =========================================================

/// 应用配置
///
/// 每一项都"读得到就用，读不到或无法解析就用默认值"。
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub toast_duration_ms: u32,
    pub orders_page_size: usize,
    pub log_level: log::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            toast_duration_ms: DEFAULT_TOAST_MS,
            orders_page_size: DEFAULT_PAGE_SIZE,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl AppConfig {
    /// 通过任意的变量查找函数构建配置
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            // 末尾的 '/' 去掉，接口路径都以 '/' 开头
            api_base_url: read(ENV_API_BASE)
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),

            toast_duration_ms: read(ENV_TOAST_MS)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOAST_MS),

            orders_page_size: read(ENV_PAGE_SIZE)
                .and_then(|v| v.parse().ok())
                .filter(|size| PAGE_SIZE_CHOICES.contains(size))
                .unwrap_or(DEFAULT_PAGE_SIZE),

            log_level: read(ENV_LOG_LEVEL)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }

    /// wasm 运行时没有进程环境变量，只能读取编译期捕获的值
    pub fn from_build_env() -> Self {
        Self::from_lookup(|name| {
            let value = match name {
                ENV_API_BASE => option_env!("CANTEEN_API_BASE"),
                ENV_TOAST_MS => option_env!("CANTEEN_TOAST_MS"),
                ENV_PAGE_SIZE => option_env!("CANTEEN_PAGE_SIZE"),
                ENV_LOG_LEVEL => option_env!("CANTEEN_LOG_LEVEL"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// 拼接完整的接口地址
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_vars_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(
            config.endpoint("/admin/login"),
            "https://canteen-order-backend.onrender.com/api/v1/admin/login"
        );
    }

    #[test]
    fn vars_override_and_invalid_values_are_ignored() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_API_BASE, "http://localhost:4000/api/v1/"),
            (ENV_TOAST_MS, "1500"),
            (ENV_PAGE_SIZE, "7"),
            (ENV_LOG_LEVEL, "debug"),
        ]);
        let config = AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.api_base_url, "http://localhost:4000/api/v1");
        assert_eq!(config.toast_duration_ms, 1500);
        // 7 不在可选列表中
        assert_eq!(config.orders_page_size, 5);
        assert_eq!(config.log_level, log::Level::Debug);
    }
}
