//! 数据分析页
//!
//! 没有专门的接口，全部由订单列表推导。

use crate::auth::use_auth;
use crate::components::charts::{BarList, ColumnChart};
use crate::components::icons::*;
use crate::local_now;
use crate::toast::use_toasts;
use crate::web::download_text;
use canteen_admin::Notifier;
use canteen_admin::screens::analytics::{
    AnalyticsSummary, PEAK_HOUR_LABELS, TimeRange, WEEKDAY_LABELS,
};
use canteen_admin::screens::format_money;
use canteen_admin::screens::orders::OrdersService;
use canteen_shared::Order;
use canteen_shared::date::{DateRange, format_input_date, parse_input_date};
use leptos::prelude::*;
use leptos::task::spawn_local;

const RANGE_CHOICES: [TimeRange; 3] = [TimeRange::Today, TimeRange::Week, TimeRange::Month];

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let now = local_now();

    let orders = RwSignal::new(Vec::<Order>::new());
    let (loading, set_loading) = signal(true);
    let time_range = RwSignal::new(TimeRange::default());

    let load_orders = move || {
        let Some(session) = auth.session() else { return };
        let api = auth.api();
        set_loading.set(true);
        spawn_local(async move {
            if let Ok(list) = OrdersService::new(&api, &session, &toasts).load().await {
                let _ = orders.try_set(list);
            }
            let _ = set_loading.try_set(false);
        });
    };

    load_orders();

    let summary = Memo::new(move |_| {
        let range = time_range.get().resolve(&now);
        orders.with(|list| AnalyticsSummary::compute(list, range, now.offset()))
    });

    let on_range_change = move |value: String| {
        let next = match value.as_str() {
            "day" => TimeRange::Today,
            "month" => TimeRange::Month,
            // 切到自定义时沿用当前区间作为初值
            "custom" => TimeRange::Custom(time_range.get_untracked().resolve(&now)),
            _ => TimeRange::Week,
        };
        time_range.set(next);
    };

    let set_custom = move |start: Option<String>, end: Option<String>| {
        let current = time_range.get_untracked().resolve(&now);
        let start = start.as_deref().and_then(parse_input_date).unwrap_or(current.start);
        let end = end.as_deref().and_then(parse_input_date).unwrap_or(current.end);
        time_range.set(TimeRange::Custom(DateRange::new(start, end)));
    };

    let on_export = move |_| {
        let summary = summary.get_untracked();
        match download_text(&summary.csv_file_name(), &summary.to_csv(), "text/csv;charset=utf-8") {
            Ok(()) => toasts.success("Report downloaded"),
            Err(e) => {
                log::error!("[Analytics] 导出失败: {}", e);
                toasts.error("Failed to export report");
            }
        }
    };

    let weekday = Signal::derive(move || {
        let sales = summary.get().sales_by_weekday;
        WEEKDAY_LABELS
            .iter()
            .zip(sales)
            .map(|(d, v)| (d.to_string(), v))
            .collect::<Vec<_>>()
    });
    let popularity = Signal::derive(move || {
        summary
            .get()
            .top_foods
            .into_iter()
            .map(|(name, qty)| (name, qty as f64))
            .collect::<Vec<_>>()
    });
    let weekly = Signal::derive(move || summary.get().weekly_revenue);
    let peak = Signal::derive(move || {
        let hours = summary.get().peak_hours;
        PEAK_HOUR_LABELS
            .iter()
            .zip(hours)
            .map(|(h, n)| (h.to_string(), n as f64))
            .collect::<Vec<_>>()
    });
    let is_custom = move || matches!(time_range.get(), TimeRange::Custom(_));

    view! {
        <div class="flex flex-wrap items-center justify-between gap-4">
            <div class="flex flex-wrap items-center gap-2">
                <select class="select select-bordered select-sm"
                    prop:value=move || time_range.get().value()
                    on:change=move |ev| on_range_change(event_target_value(&ev))
                >
                    {RANGE_CHOICES
                        .iter()
                        .map(|r| view! { <option value={r.value()}>{r.label()}</option> })
                        .collect_view()}
                    <option value="custom">"Custom Range"</option>
                </select>
                <Show when=is_custom>
                    <input type="date" class="input input-bordered input-sm"
                        prop:value=move || format_input_date(&time_range.get().resolve(&now).start)
                        on:change=move |ev| set_custom(Some(event_target_value(&ev)), None)
                    />
                    <span class="opacity-50">"to"</span>
                    <input type="date" class="input input-bordered input-sm"
                        prop:value=move || format_input_date(&time_range.get().resolve(&now).end)
                        on:change=move |ev| set_custom(None, Some(event_target_value(&ev)))
                    />
                </Show>
            </div>
            <div class="flex gap-2">
                <button on:click=move |_| load_orders() disabled=move || loading.get() class="btn btn-ghost btn-circle btn-sm">
                    <RefreshCw attr:class=move || if loading.get() { "h-4 w-4 animate-spin" } else { "h-4 w-4" } />
                </button>
                <button class="btn btn-outline btn-sm gap-2" on:click=on_export>
                    <Download attr:class="h-4 w-4" /> "Export CSV"
                </button>
            </div>
        </div>

        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <div class="stat">
                <div class="stat-title">"Orders"</div>
                <div class="stat-value text-primary">{move || summary.get().total_orders}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Revenue"</div>
                <div class="stat-value text-success text-2xl">"₹" {move || format_money(summary.get().total_revenue)}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Average Order"</div>
                <div class="stat-value text-secondary text-2xl">"₹" {move || format_money(summary.get().average_order_value)}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Items Sold"</div>
                <div class="stat-value">{move || summary.get().items_sold}</div>
            </div>
        </div>

        <div class="grid md:grid-cols-2 gap-4">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Sales by Day"</h3>
                    <ColumnChart data=weekday />
                </div>
            </div>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Food Popularity"</h3>
                    <BarList data=popularity />
                </div>
            </div>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Revenue Trend"</h3>
                    <BarList data=weekly money=true />
                </div>
            </div>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Peak Hours"</h3>
                    <ColumnChart data=peak />
                </div>
            </div>
        </div>
    }
}
