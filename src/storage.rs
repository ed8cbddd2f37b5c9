//! 持久化存储抽象
//!
//! 浏览器中由 LocalStorage 实现，测试中使用内存实现。
//! 只有登录/登出会写入，启动时读取一次。

use crate::error::AdminResult;

/// 管理员身份快照（`AdminInfo` 的 JSON）
pub const KEY_ADMIN: &str = "admin";
pub const KEY_ADMIN_ID: &str = "adminId";
pub const KEY_ADMIN_TOKEN: &str = "adminToken";

/// 会话占用的全部键
pub const SESSION_KEYS: [&str; 3] = [KEY_ADMIN, KEY_ADMIN_ID, KEY_ADMIN_TOKEN];

/// 字符串键值存储
pub trait KeyValueStore {
    /// 键不存在或存储不可用时返回 `None`
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> AdminResult<()>;

    fn delete(&self, key: &str) -> AdminResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> AdminResult<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> AdminResult<()> {
        (**self).delete(key)
    }
}

// =========================================================
// 测试工具: MemoryStore
// =========================================================

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::error::AdminError;
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeMap;

    /// 内存键值存储，可模拟写入失败（例如配额已满）
    #[derive(Default)]
    pub struct MemoryStore {
        entries: RefCell<BTreeMap<String, String>>,
        reject_writes: Cell<bool>,
        pub writes: Cell<usize>,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_entries(entries: &[(&str, &str)]) -> Self {
            let store = Self::new();
            for (k, v) in entries {
                store
                    .entries
                    .borrow_mut()
                    .insert(k.to_string(), v.to_string());
            }
            store
        }

        pub fn reject_writes(&self, reject: bool) {
            self.reject_writes.set(reject);
        }

        pub fn snapshot(&self) -> BTreeMap<String, String> {
            self.entries.borrow().clone()
        }

        pub fn is_empty(&self) -> bool {
            self.entries.borrow().is_empty()
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> AdminResult<()> {
            if self.reject_writes.get() {
                return Err(AdminError::storage("QuotaExceededError").in_op_with("memory.set", key));
            }
            self.writes.set(self.writes.get() + 1);
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn delete(&self, key: &str) -> AdminResult<()> {
            self.writes.set(self.writes.get() + 1);
            self.entries.borrow_mut().remove(key);
            Ok(())
        }
    }
}
