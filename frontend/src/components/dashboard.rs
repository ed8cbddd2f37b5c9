use crate::auth::use_auth;
use crate::components::charts::{BarList, ColumnChart};
use crate::components::icons::*;
use crate::local_now;
use crate::toast::use_toasts;
use crate::web::router::Link;
use canteen_admin::AppRoute;
use canteen_admin::screens::dashboard::{DAYPART_LABELS, DashboardService, DashboardStats};
use canteen_admin::screens::format_money;
use canteen_admin::screens::orders::items_summary;
use canteen_shared::date::format_order_time;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn series<T: Copy + Into<f64>>(values: &[T]) -> Vec<(String, f64)> {
    let len = values.len();
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let label = match len - 1 - i {
                0 => "Today".to_string(),
                n => format!("-{}d", n),
            };
            (label, (*v).into())
        })
        .collect()
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let now = local_now();

    let stats = RwSignal::new(DashboardStats::default());
    let (loading, set_loading) = signal(true);

    let load_stats = move || {
        let Some(session) = auth.session() else { return };
        let api = auth.api();
        set_loading.set(true);
        spawn_local(async move {
            let result = DashboardService::new(&api, &session, &toasts).load().await;
            if let Ok((orders, menu)) = result {
                let _ = stats.try_set(DashboardStats::compute(&orders, &menu, &local_now()));
            }
            let _ = set_loading.try_set(false);
        });
    };

    // 初始加载
    load_stats();

    let order_trend = Signal::derive(move || {
        stats.with(|s| {
            let counts: Vec<u32> = s.order_trend.iter().map(|n| *n as u32).collect();
            series(&counts)
        })
    });
    let revenue_trend = Signal::derive(move || stats.with(|s| series(&s.revenue_trend)));
    let dayparts = Signal::derive(move || {
        stats.with(|s| {
            DAYPART_LABELS
                .iter()
                .zip(s.orders_by_daypart)
                .map(|(l, n)| (l.to_string(), n as f64))
                .collect::<Vec<_>>()
        })
    });
    let statuses = Signal::derive(move || {
        stats.with(|s| {
            s.status_breakdown
                .iter()
                .map(|(status, n)| (status.label(), *n as f64))
                .collect::<Vec<_>>()
        })
    });
    let categories = Signal::derive(move || {
        stats.with(|s| {
            s.menu_categories
                .iter()
                .map(|(c, n)| (c.clone(), *n as f64))
                .collect::<Vec<_>>()
        })
    });

    let greeting = move || {
        auth.state
            .with(|s| s.session.as_ref().map(|s| s.info.admin_name.clone()))
            .map(|name| format!("Welcome back, {}", name))
            .unwrap_or_default()
    };
    let offset = *now.offset();

    view! {
        <div class="flex items-center justify-between">
            <div>
                <h2 class="text-2xl font-bold">{greeting}</h2>
                <p class="text-base-content/70 text-sm">"Here is what is happening in your canteen today."</p>
            </div>
            <button on:click=move |_| load_stats() disabled=move || loading.get() class="btn btn-ghost btn-circle">
                <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
            </button>
        </div>

        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <div class="stat">
                <div class="stat-figure text-primary"><ShoppingBag attr:class="h-8 w-8" /></div>
                <div class="stat-title">"Today's Orders"</div>
                <div class="stat-value text-primary">{move || stats.get().today_orders}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Today's Revenue"</div>
                <div class="stat-value text-success text-2xl">"₹" {move || format_money(stats.get().today_revenue)}</div>
            </div>
            <div class="stat">
                <div class="stat-figure text-secondary"><User attr:class="h-8 w-8" /></div>
                <div class="stat-title">"Customers Today"</div>
                <div class="stat-value text-secondary">{move || stats.get().customers_today}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Top Seller Today"</div>
                <div class="stat-value text-xl">
                    {move || stats.get().top_food_today.unwrap_or_else(|| "-".to_string())}
                </div>
                <div class="stat-desc">
                    {move || format!("{} active menu items", stats.get().active_menu_items)}
                </div>
            </div>
        </div>

        <div class="grid md:grid-cols-2 gap-4">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Orders (last 6 days)"</h3>
                    <ColumnChart data=order_trend />
                </div>
            </div>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Revenue (last 6 days)"</h3>
                    <BarList data=revenue_trend money=true />
                </div>
            </div>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Orders by Time of Day"</h3>
                    <ColumnChart data=dayparts />
                </div>
            </div>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Order Status"</h3>
                    <BarList data=statuses />
                    <h3 class="card-title mt-4">"Menu Categories"</h3>
                    <BarList data=categories />
                </div>
            </div>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex items-center justify-between p-6 pb-2">
                    <h3 class="card-title">"Recent Orders"</h3>
                    <Link route=AppRoute::Order class="btn btn-ghost btn-sm">"View all"</Link>
                </div>
                <div class="overflow-x-auto w-full">
                    <table class="table w-full">
                        <tbody>
                            <Show when=move || stats.with(|s| s.recent_orders.is_empty()) && !loading.get()>
                                <tr>
                                    <td class="text-center py-8 text-base-content/50">"No orders yet."</td>
                                </tr>
                            </Show>
                            {move || {
                                stats
                                    .get()
                                    .recent_orders
                                    .into_iter()
                                    .map(|order| view! {
                                        <tr>
                                            <td class="font-mono font-bold">{order.display_number()}</td>
                                            <td>{order.customer_name().to_string()}</td>
                                            <td class="hidden md:table-cell text-sm">{items_summary(&order)}</td>
                                            <td class="font-mono">"₹" {format_money(order.total_price)}</td>
                                            <td class="text-sm opacity-70">{format_order_time(&order.created_at, &offset)}</td>
                                            <td><span class="badge badge-outline">{order.status.label()}</span></td>
                                        </tr>
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
