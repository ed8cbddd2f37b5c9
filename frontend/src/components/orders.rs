use crate::auth::use_auth;
use crate::components::icons::*;
use crate::toast::use_toasts;
use crate::{local_now, use_config};
use canteen_admin::config::PAGE_SIZE_CHOICES;
use canteen_admin::screens::format_money;
use canteen_admin::screens::orders::{
    OrderMetrics, OrderWindow, OrdersService, Pagination, apply_status, items_summary,
    visible_orders,
};
use canteen_shared::date::{DateRange, format_input_date, format_order_time, parse_input_date};
use canteen_shared::{Order, OrderStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn status_badge(status: &OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "badge badge-warning",
        OrderStatus::Preparing => "badge badge-info",
        OrderStatus::Ready => "badge badge-primary",
        OrderStatus::Delivered => "badge badge-success",
        OrderStatus::Other(_) => "badge badge-ghost",
    }
}

#[component]
pub fn OrdersPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let config = use_config();
    // 页面可能跨过午夜，加载订单与切换标签页时刷新
    let now = RwSignal::new(local_now());

    let orders = RwSignal::new(Vec::<Order>::new());
    let (loading, set_loading) = signal(true);
    let window = RwSignal::new(OrderWindow::default());
    let range = RwSignal::new(OrderWindow::default().default_range(&now.get_untracked()));
    let pagination = RwSignal::new(Pagination::new(config.orders_page_size));
    let dark = RwSignal::new(false);

    let load_orders = move || {
        let Some(session) = auth.session() else { return };
        let api = auth.api();
        set_loading.set(true);
        spawn_local(async move {
            if let Ok(list) = OrdersService::new(&api, &session, &toasts).load().await {
                let _ = now.try_set(local_now());
                let _ = orders.try_set(list);
            }
            let _ = set_loading.try_set(false);
        });
    };

    load_orders();

    let update_status = move |order_id: String, status: OrderStatus| {
        let Some(session) = auth.session() else { return };
        let api = auth.api();
        spawn_local(async move {
            let service = OrdersService::new(&api, &session, &toasts);
            if let Ok(status) = service.update_status(&order_id, status).await {
                let _ = orders.try_update(|list| apply_status(list, &order_id, &status));
            }
        });
    };

    // 切换标签页时重置日期区间与页码
    let select_window = move |next: OrderWindow| {
        let current = local_now();
        now.set(current);
        window.set(next);
        range.set(next.default_range(&current));
        pagination.update(|p| *p = p.reset());
    };

    let set_range = move |start: Option<String>, end: Option<String>| {
        range.update(|r| {
            let start = start.as_deref().and_then(parse_input_date).unwrap_or(r.start);
            let end = end.as_deref().and_then(parse_input_date).unwrap_or(r.end);
            *r = DateRange::new(start, end);
        });
        pagination.update(|p| *p = p.reset());
    };

    let visible = Memo::new(move |_| {
        let window = window.get();
        let range = range.get();
        let now = now.get();
        orders.with(|list| {
            visible_orders(list, window, &range, &now)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    });
    let metrics = Memo::new(move |_| {
        let now = now.get();
        orders.with(|list| OrderMetrics::today(list, &now))
    });
    let page_count = move || visible.with(|v| pagination.get().page_count(v.len()).max(1));
    let page_rows = move || visible.with(|v| pagination.get().slice(v).to_vec());

    let offset = *now.get_untracked().offset();

    view! {
        <div class=move || if dark.get() { "space-y-8 bg-neutral text-neutral-content p-4 rounded-box" } else { "space-y-8" }>
            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100 text-base-content">
                <div class="stat">
                    <div class="stat-title">"Today's Orders"</div>
                    <div class="stat-value text-primary">{move || metrics.get().total_orders}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Today's Revenue"</div>
                    <div class="stat-value text-success text-2xl">"₹" {move || format_money(metrics.get().total_revenue)}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Average Order Value"</div>
                    <div class="stat-value text-secondary text-2xl">"₹" {move || format_money(metrics.get().average_order_value)}</div>
                </div>
            </div>

            <div class="card bg-base-100 text-base-content shadow-xl">
                <div class="card-body p-0">
                    <div class="flex flex-wrap items-center justify-between gap-4 p-6 pb-2">
                        <div role="tablist" class="tabs tabs-boxed">
                            {OrderWindow::ALL
                                .into_iter()
                                .map(|w| view! {
                                    <a role="tab"
                                        class=move || if window.get() == w { "tab tab-active" } else { "tab" }
                                        on:click=move |_| select_window(w)
                                    >
                                        {w.label()}
                                    </a>
                                })
                                .collect_view()}
                        </div>
                        <div class="flex items-center gap-2">
                            <input type="date" class="input input-bordered input-sm"
                                prop:value=move || format_input_date(&range.get().start)
                                on:change=move |ev| set_range(Some(event_target_value(&ev)), None)
                            />
                            <span class="opacity-50">"to"</span>
                            <input type="date" class="input input-bordered input-sm"
                                prop:value=move || format_input_date(&range.get().end)
                                on:change=move |ev| set_range(None, Some(event_target_value(&ev)))
                            />
                            <button on:click=move |_| load_orders() disabled=move || loading.get() class="btn btn-ghost btn-circle btn-sm">
                                <RefreshCw attr:class=move || if loading.get() { "h-4 w-4 animate-spin" } else { "h-4 w-4" } />
                            </button>
                            <button on:click=move |_| dark.update(|d| *d = !*d) class="btn btn-ghost btn-circle btn-sm">
                                {move || if dark.get() {
                                    view! { <Sun attr:class="h-4 w-4" /> }.into_any()
                                } else {
                                    view! { <Moon attr:class="h-4 w-4" /> }.into_any()
                                }}
                            </button>
                        </div>
                    </div>

                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Order"</th>
                                    <th>"Customer"</th>
                                    <th class="hidden md:table-cell">"Items"</th>
                                    <th>"Total"</th>
                                    <th class="hidden md:table-cell">"Placed"</th>
                                    <th>"Status"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || visible.with(Vec::is_empty) && !loading.get()>
                                    <tr>
                                        <td colspan="6" class="text-center py-8 text-base-content/50">
                                            "No orders in this period."
                                        </td>
                                    </tr>
                                </Show>
                                {move || {
                                    page_rows()
                                        .into_iter()
                                        .map(|order| {
                                            let order_id = order.id.clone();
                                            let current = order.status.clone();
                                            let confirmed = current.as_str().to_string();
                                            view! {
                                                <tr>
                                                    <td class="font-mono font-bold">{order.display_number()}</td>
                                                    <td>
                                                        <div class="font-bold">{order.customer_name().to_string()}</div>
                                                        <div class="text-xs opacity-50">{order.customer_email().to_string()}</div>
                                                    </td>
                                                    <td class="hidden md:table-cell text-sm">{items_summary(&order)}</td>
                                                    <td class="font-mono">"₹" {format_money(order.total_price)}</td>
                                                    <td class="hidden md:table-cell text-sm opacity-70">
                                                        {format_order_time(&order.created_at, &offset)}
                                                    </td>
                                                    <td>
                                                        <div class="flex items-center gap-2">
                                                            <span class=status_badge(&current)>{current.label()}</span>
                                                            <select class="select select-bordered select-xs"
                                                                prop:value=confirmed.clone()
                                                                on:change=move |ev| {
                                                                    let next = OrderStatus::parse(&event_target_value(&ev));
                                                                    // 服务端确认后整行重新渲染
                                                                    event_target::<web_sys::HtmlSelectElement>(&ev).set_value(&confirmed);
                                                                    update_status(order_id.clone(), next);
                                                                }
                                                            >
                                                                {OrderStatus::SELECTABLE
                                                                    .iter()
                                                                    .map(|s| view! { <option value={s.as_str().to_string()}>{s.label()}</option> })
                                                                    .collect_view()}
                                                            </select>
                                                        </div>
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>
                    </div>

                    <div class="flex flex-wrap items-center justify-between gap-4 p-6">
                        <div class="flex items-center gap-2 text-sm">
                            <span>"Rows per page"</span>
                            <select class="select select-bordered select-sm"
                                prop:value=move || pagination.get().per_page.to_string()
                                on:change=move |ev| {
                                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                                        pagination.update(|p| *p = p.with_per_page(size));
                                    }
                                }
                            >
                                {PAGE_SIZE_CHOICES
                                    .iter()
                                    .map(|n| view! { <option value={n.to_string()}>{*n}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="join">
                            <button class="join-item btn btn-sm"
                                disabled=move || pagination.get().page == 0
                                on:click=move |_| pagination.update(|p| p.page = p.page.saturating_sub(1))
                            >
                                "«"
                            </button>
                            <button class="join-item btn btn-sm">
                                {move || format!("Page {} of {}", pagination.get().page + 1, page_count())}
                            </button>
                            <button class="join-item btn btn-sm"
                                disabled=move || pagination.get().page + 1 >= page_count()
                                on:click=move |_| pagination.update(|p| p.page += 1)
                            >
                                "»"
                            </button>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
