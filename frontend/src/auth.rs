//! 认证模块
//!
//! 把核心库的 `SessionStore` 接到 Leptos 的响应式系统上。
//! 路由服务只读取 `state` 信号，与会话存储本身解耦。

use crate::toast::ToastHub;
use crate::web::{BrowserStorage, FetchClient};
use canteen_admin::{AppConfig, CanteenApi, Session, SessionState, SessionStore};
use leptos::prelude::*;
use std::rc::Rc;

pub type Store = SessionStore<FetchClient, BrowserStorage, ToastHub>;
pub type Api = CanteenApi<FetchClient>;

/// 认证上下文
///
/// `store` 只在浏览器主线程上使用，因此存放为 local 值。
#[derive(Clone, Copy)]
pub struct AuthContext {
    store: StoredValue<Rc<Store>, LocalStorage>,
    /// 会话状态镜像（只读使用）
    pub state: RwSignal<SessionState>,
}

impl AuthContext {
    pub fn new(config: &AppConfig, toasts: ToastHub) -> Self {
        let api = CanteenApi::new(FetchClient, config.api_base_url.clone());
        let store = Rc::new(SessionStore::new(api, BrowserStorage, toasts));
        Self {
            store: StoredValue::new_local(store),
            state: RwSignal::new(SessionState::default()),
        }
    }

    pub fn store(&self) -> Rc<Store> {
        self.store.get_value()
    }

    pub fn api(&self) -> Api {
        self.store.with_value(|s| s.api().clone())
    }

    pub fn session(&self) -> Option<Session> {
        self.state.with_untracked(|s| s.session.clone())
    }

    /// 路由守卫注入用的只读信号
    pub fn state_signal(&self) -> Signal<SessionState> {
        self.state.into()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 订阅会话变化并从 LocalStorage 恢复
pub fn init_auth(ctx: &AuthContext) {
    let state = ctx.state;
    let store = ctx.store();
    store.subscribe(move |next| {
        let _ = state.try_set(next.clone());
    });
    let restored = store.restore();
    log::info!(
        "[Auth] session restored: authenticated={}",
        restored.is_authenticated()
    );
}

/// 登录
///
/// 失败提示由会话存储发出，这里只返回是否成功。
pub async fn login(ctx: &AuthContext, email: String, password: String) -> bool {
    ctx.store().login(&email, &password).await.is_ok()
}

/// 注销
///
/// 导航由路由服务监听会话状态变化后自动处理。
pub async fn logout(ctx: &AuthContext) {
    ctx.store().logout().await;
}
