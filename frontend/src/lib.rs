//! 食堂管理端前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `canteen_admin::route`: 路由定义与守卫（领域模型，位于核心库）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话存储与响应式状态的桥接
//! - `toast`: 提示消息
//! - `components`: UI 组件层

mod auth;
mod components {
    pub mod analytics;
    mod charts;
    pub mod dashboard;
    pub mod feedback;
    pub mod food;
    mod food_dialog;
    mod icons;
    pub mod login;
    pub mod notifications;
    pub mod orders;
    pub mod profile;
    pub mod shell;
    pub mod signup;
}
mod toast;

use crate::auth::{AuthContext, init_auth};
use crate::components::analytics::AnalyticsPage;
use crate::components::dashboard::DashboardPage;
use crate::components::feedback::FeedbackPage;
use crate::components::food::FoodPage;
use crate::components::login::LoginPage;
use crate::components::notifications::NotificationsPage;
use crate::components::orders::OrdersPage;
use crate::components::profile::ProfilePage;
use crate::components::shell::Shell;
use crate::components::signup::SignupPage;
use crate::toast::{ToastHub, ToastViewport};

use canteen_admin::screens::notifications::Inbox;
use canteen_admin::{AppConfig, AppRoute};
use chrono::{DateTime, FixedOffset};
use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod files;
    mod http;
    pub mod router;
    mod storage;
    mod timer;

    pub use files::{download_text, read_upload, selected_file};
    pub use http::FetchClient;
    pub use storage::BrowserStorage;
    pub use timer::{Interval, set_timeout};
}

use web::router::{Router, RouterOutlet};

/// 浏览器本地时间
pub(crate) fn local_now() -> DateTime<FixedOffset> {
    chrono::Local::now().fixed_offset()
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件，受保护页面包在 `Shell` 中。
fn route_matcher(route: AppRoute) -> AnyView {
    let page = match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::SignUp => view! { <SignupPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Food => view! { <FoodPage /> }.into_any(),
        AppRoute::Order => view! { <OrdersPage /> }.into_any(),
        AppRoute::Analytics => view! { <AnalyticsPage /> }.into_any(),
        AppRoute::Feedback => view! { <FeedbackPage /> }.into_any(),
        AppRoute::Notifications => view! { <NotificationsPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        // 守卫会把未知路径重定向，这里只是兜底
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    };

    if route.shows_chrome() {
        view! { <Shell>{page}</Shell> }.into_any()
    } else {
        page
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 配置与提示出口
    let config = AppConfig::from_build_env();
    let toasts = ToastHub::new(config.toast_duration_ms);
    provide_context(toasts);

    // 2. 创建认证上下文
    let auth_ctx = AuthContext::new(&config, toasts);
    provide_context(auth_ctx);
    provide_context(config);

    // 3. 本地收件箱（导航栏铃铛与通知页共享）
    provide_context(RwSignal::new(Inbox::seeded()));

    // 4. 从 LocalStorage 恢复会话
    init_auth(&auth_ctx);

    view! {
        <ToastViewport />
        // 5. 路由器组件：注入会话状态信号实现守卫
        <Router session=auth_ctx.state_signal()>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}

pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().unwrap_or_default()
}

pub fn use_inbox() -> RwSignal<Inbox> {
    use_context::<RwSignal<Inbox>>().expect("Inbox should be provided")
}
