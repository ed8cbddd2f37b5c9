//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 导航流程为"请求路径 -> 守卫决策 (`canteen_admin::guard`) -> 渲染或重定向"。

use canteen_admin::{AppRoute, GuardDecision, SessionState, guard};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 通过注入的会话状态信号与认证系统解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前请求的路径
    path: RwSignal<String>,
    /// 守卫决策，由路径与注入的会话状态推导
    decision: Memo<GuardDecision>,
    /// 最近一次被拦截的受保护路径
    return_to: RwSignal<Option<String>>,
}

impl RouterService {
    fn new(session: Signal<SessionState>) -> Self {
        let path = RwSignal::new(current_path());
        let decision = Memo::new(move |_| {
            let path = path.get();
            session.with(|state| guard(AppRoute::from_path(&path), &path, state))
        });
        Self {
            path,
            decision,
            return_to: RwSignal::new(None),
        }
    }

    /// 当前路由（按路径解析，未经过守卫）
    pub fn current_route(&self) -> Signal<AppRoute> {
        let path = self.path;
        Signal::derive(move || AppRoute::from_path(&path.get()))
    }

    /// 守卫决策信号
    pub fn decision(&self) -> Memo<GuardDecision> {
        self.decision
    }

    /// 登录前被拦截的路径
    pub fn return_to(&self) -> ReadSignal<Option<String>> {
        self.return_to.read_only()
    }

    /// 导航到指定路径，守卫在路径变化后统一执行
    pub fn navigate(&self, path: &str) {
        if self.path.get_untracked() == path {
            return;
        }
        log::info!("[Router] Navigate to {}", path);
        push_history_state(path);
        self.path.set(path.to_string());
    }

    pub fn navigate_to(&self, route: AppRoute) {
        self.navigate(route.to_path());
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let path = self.path;

        let closure = Closure::<dyn Fn()>::new(move || {
            let _ = path.try_set(current_path());
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 守卫给出重定向时替换当前 History 记录
    ///
    /// 会话状态变化（登录、登出、恢复完成）也会重新触发这里。
    fn setup_guard_redirect(&self) {
        let decision = self.decision;
        let path = self.path;
        let return_to = self.return_to;

        Effect::new(move |_| {
            if let GuardDecision::Redirect { to, from } = decision.get() {
                match &from {
                    Some(from) => log::info!("[Router] Access denied for {}. Redirecting to {}.", from, to),
                    None => log::info!("[Router] Redirecting to {}.", to),
                }
                if from.is_some() {
                    return_to.set(from);
                }
                replace_history_state(to.to_path());
                path.set(to.to_path().to_string());
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<SessionState>) -> RouterService {
    let router = RouterService::new(session);

    router.init_popstate_listener();
    router.setup_guard_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 会话状态信号
    session: Signal<SessionState>,
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 会话恢复前显示加载占位；重定向进行中不渲染任何页面。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();
    let decision = router.decision();

    move || match decision.get() {
        GuardDecision::Pending => view! {
            <div class="flex items-center justify-center min-h-screen">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
        GuardDecision::Render(route) => matcher(route),
        GuardDecision::Redirect { .. } => ().into_any(),
    }
}

/// 站内链接，点击时走路由服务而不是整页刷新
#[component]
pub fn Link(
    route: AppRoute,
    #[prop(into, optional)] class: Signal<String>,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate_to(route);
    };

    view! {
        <a href={route.to_path()} class=move || class.get() on:click=on_click>
            {children()}
        </a>
    }
}
