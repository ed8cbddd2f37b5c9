//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现核心库的 `KeyValueStore`。

use canteen_admin::{AdminError, AdminResult, KeyValueStore};

/// 浏览器 LocalStorage
///
/// 读失败视为键不存在，写失败（配额、隐私模式）返回 `Storage` 错误。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    fn require() -> AdminResult<web_sys::Storage> {
        Self::storage().ok_or_else(|| AdminError::storage("localStorage 不可用"))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> AdminResult<()> {
        Self::require()?
            .set_item(key, value)
            .map_err(|e| AdminError::storage(format!("{:?}", e)).in_op_with("storage.set", key))
    }

    fn delete(&self, key: &str) -> AdminResult<()> {
        Self::require()?
            .remove_item(key)
            .map_err(|e| AdminError::storage(format!("{:?}", e)).in_op_with("storage.delete", key))
    }
}
