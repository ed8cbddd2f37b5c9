//! 提示消息 (toast)
//!
//! `ToastHub` 实现核心库的 `Notifier`，把提示写入信号并在到期后自动移除。

use crate::web::set_timeout;
use canteen_admin::{Notice, NoticeKind, Notifier};
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

#[derive(Clone, Copy)]
pub struct ToastHub {
    items: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
    duration_ms: u32,
}

impl ToastHub {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
            duration_ms,
        }
    }

    pub fn items(&self) -> ReadSignal<Vec<Toast>> {
        self.items.read_only()
    }

    pub fn dismiss(&self, id: u64) {
        // 页面已卸载时信号可能已被回收
        let _ = self.items.try_update(|list| list.retain(|t| t.id != id));
    }
}

impl Notifier for ToastHub {
    fn notify(&self, notice: Notice) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        match notice.kind {
            NoticeKind::Success => log::info!("[Toast] {}", notice.message),
            NoticeKind::Error => log::warn!("[Toast] {}", notice.message),
        }

        self.items.update(|list| list.push(Toast { id, notice }));

        let hub = *self;
        set_timeout(self.duration_ms, move || hub.dismiss(id));
    }
}

pub fn use_toasts() -> ToastHub {
    use_context::<ToastHub>().expect("ToastHub should be provided")
}

/// 右上角的提示区域
#[component]
pub fn ToastViewport() -> impl IntoView {
    let hub = use_toasts();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || hub.items().get()
                key=|t| t.id
                children=move |toast| {
                    let class = match toast.notice.kind {
                        NoticeKind::Success => "alert alert-success shadow-lg",
                        NoticeKind::Error => "alert alert-error shadow-lg",
                    };
                    let id = toast.id;
                    view! {
                        <div class=class on:click=move |_| hub.dismiss(id)>
                            <span>{toast.notice.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
