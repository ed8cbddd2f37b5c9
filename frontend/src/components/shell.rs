//! 页面框架：侧边栏 + 顶部导航栏

use crate::auth::{logout, use_auth};
use crate::components::icons::*;
use crate::web::Interval;
use crate::web::router::{Link, use_router};
use crate::{local_now, use_inbox};
use canteen_admin::AppRoute;
use canteen_shared::date::format_clock;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 侧边栏条目
const NAV_ITEMS: [AppRoute; 5] = [
    AppRoute::Dashboard,
    AppRoute::Food,
    AppRoute::Order,
    AppRoute::Analytics,
    AppRoute::Feedback,
];

fn nav_icon(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Dashboard => view! { <LayoutDashboard attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Food => view! { <Utensils attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Order => view! { <ShoppingBag attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Analytics => view! { <BarChart attr:class="h-5 w-5" /> }.into_any(),
        _ => view! { <MessageSquare attr:class="h-5 w-5" /> }.into_any(),
    }
}

#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="flex min-h-screen bg-base-200 font-sans">
            <Sidebar />
            <div class="flex-1 flex flex-col min-w-0">
                <Navbar />
                <main class="p-4 md:p-8 space-y-8">{children()}</main>
            </div>
        </div>
    }
}

#[component]
fn Sidebar() -> impl IntoView {
    let router = use_router();
    let auth = use_auth();
    let current = router.current_route();

    let on_logout = move |_| {
        spawn_local(async move { logout(&auth).await });
    };

    view! {
        <aside class="w-64 bg-base-100 shadow-xl hidden md:flex flex-col">
            <div class="flex items-center gap-2 p-6">
                <Utensils attr:class="h-6 w-6 text-primary" />
                <span class="text-xl font-bold">"Canteen Admin"</span>
            </div>
            <ul class="menu flex-1 gap-1 px-4">
                {NAV_ITEMS
                    .into_iter()
                    .map(|route| {
                        let class = Signal::derive(move || {
                            if current.get() == route {
                                "flex items-center gap-3 active".to_string()
                            } else {
                                "flex items-center gap-3".to_string()
                            }
                        });
                        view! {
                            <li>
                                <Link route=route class=class>
                                    {nav_icon(route)}
                                    {route.title()}
                                </Link>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <div class="p-4">
                <button on:click=on_logout class="btn btn-outline btn-error w-full gap-2">
                    <LogOut attr:class="h-4 w-4" /> "Logout"
                </button>
            </div>
        </aside>
    }
}

#[component]
fn Navbar() -> impl IntoView {
    let router = use_router();
    let auth = use_auth();
    let inbox = use_inbox();
    let current = router.current_route();

    // 实时时钟，每秒刷新
    let clock = RwSignal::new(format_clock(&local_now()));
    let interval = Interval::new(1000, move || {
        let _ = clock.try_set(format_clock(&local_now()));
    });
    if interval.is_none() {
        log::warn!("[Shell] 时钟定时器注册失败");
    }
    // 组件卸载时随所有者释放，Drop 中清除定时器
    let _interval = StoredValue::new_local(interval);

    let admin_name = move || {
        auth.state
            .with(|s| s.session.as_ref().map(|s| s.info.admin_name.clone()))
            .unwrap_or_default()
    };
    let unread = move || inbox.with(|i| i.unread_count());

    let on_logout = move |_| {
        spawn_local(async move { logout(&auth).await });
    };

    view! {
        <div class="navbar bg-base-100 shadow px-4 md:px-8 sticky top-0 z-40">
            <div class="flex-1">
                <h1 class="text-xl font-bold">{move || current.get().title()}</h1>
            </div>
            <div class="flex-none flex items-center gap-2">
                <div class="hidden md:flex items-center gap-2 font-mono text-sm opacity-70">
                    <Clock attr:class="h-4 w-4" />
                    {move || clock.get()}
                </div>
                <Link route=AppRoute::Notifications class="btn btn-ghost btn-circle">
                    <div class="indicator">
                        <Bell attr:class="h-5 w-5" />
                        <Show when=move || { unread() > 0 }>
                            <span class="badge badge-xs badge-error indicator-item">{unread}</span>
                        </Show>
                    </div>
                </Link>
                <Link route=AppRoute::Profile class="btn btn-ghost gap-2">
                    <User attr:class="h-5 w-5" />
                    <span class="hidden md:inline">{admin_name}</span>
                </Link>
                <button on:click=on_logout class="btn btn-ghost btn-circle md:hidden">
                    <LogOut attr:class="h-5 w-5" />
                </button>
            </div>
        </div>
    }
}
