//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生定时器 API。

use wasm_bindgen::prelude::*;

/// 周期性定时器
///
/// 封装 `setInterval` API。当 `Interval` 被 drop 时，自动清除定时器。
pub struct Interval {
    handle: i32,
    #[allow(dead_code)]
    closure: Closure<dyn Fn()>,
}

impl Interval {
    /// 创建新的周期性定时器
    ///
    /// 无法获取 window 或注册失败时返回 `None`。
    pub fn new<F>(millis: u32, callback: F) -> Option<Self>
    where
        F: Fn() + 'static,
    {
        let closure = Closure::<dyn Fn()>::new(callback);
        let handle = web_sys::window()?
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis as i32,
            )
            .ok()?;

        Some(Self { handle, closure })
    }

    pub fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// 一次性定时器，回调执行后自行释放
pub fn set_timeout<F>(millis: u32, callback: F)
where
    F: FnOnce() + 'static,
{
    let closure = Closure::once_into_js(callback);
    let registered = web_sys::window().and_then(|w| {
        w.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.unchecked_ref(),
            millis as i32,
        )
        .ok()
    });
    if registered.is_none() {
        log::warn!("[Timer] setTimeout 注册失败");
    }
}
