use crate::components::icons::Star;
use canteen_admin::screens::feedback::{
    FeedbackMetrics, FeedbackTab, RatingFilter, filter_feedback, seed_feedback,
};
use canteen_shared::date::format_short_date;
use leptos::prelude::*;

fn stars(rating: u8) -> impl IntoView {
    (1..=5u8)
        .map(|i| {
            let class = if i <= rating { "h-4 w-4 text-warning" } else { "h-4 w-4 opacity-20" };
            view! { <Star attr:class=class /> }
        })
        .collect_view()
}

#[component]
pub fn FeedbackPage() -> impl IntoView {
    // 没有后端接口，使用内置示例数据
    let entries = StoredValue::new(seed_feedback());
    let metrics = entries.with_value(|list| FeedbackMetrics::from_entries(list));

    let rating = RwSignal::new(RatingFilter::default());
    let tab = RwSignal::new(FeedbackTab::default());
    let visible = Memo::new(move |_| {
        let (rating, tab) = (rating.get(), tab.get());
        entries.with_value(|list| filter_feedback(list, rating, tab))
    });

    view! {
        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <div class="stat">
                <div class="stat-title">"Total Feedback"</div>
                <div class="stat-value text-primary">{metrics.total}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Today"</div>
                <div class="stat-value text-secondary">{metrics.today}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Average Rating"</div>
                <div class="stat-value text-warning">{metrics.average_label()}</div>
            </div>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex flex-wrap items-center justify-between gap-4">
                    <div role="tablist" class="tabs tabs-boxed">
                        {FeedbackTab::ALL
                            .into_iter()
                            .map(|t| view! {
                                <a role="tab"
                                    class=move || if tab.get() == t { "tab tab-active" } else { "tab" }
                                    on:click=move |_| tab.set(t)
                                >
                                    {t.label()}
                                </a>
                            })
                            .collect_view()}
                    </div>
                    <select class="select select-bordered select-sm"
                        on:change=move |ev| rating.set(RatingFilter::from_value(&event_target_value(&ev)))
                    >
                        <option value="all">"All Ratings"</option>
                        {(1..=5u8)
                            .rev()
                            .map(|r| view! { <option value={r.to_string()}>{format!("{} Stars", r)}</option> })
                            .collect_view()}
                    </select>
                </div>

                <div class="space-y-4 mt-4">
                    <Show when=move || visible.with(Vec::is_empty)>
                        <p class="text-center py-8 text-base-content/50">"No feedback matches these filters."</p>
                    </Show>
                    {move || {
                        visible
                            .get()
                            .into_iter()
                            .map(|f| {
                                let border = if f.is_critical() { "border-l-4 border-error" } else { "border-l-4 border-success" };
                                view! {
                                    <div class=format!("p-4 bg-base-200 rounded-box {}", border)>
                                        <div class="flex items-center justify-between">
                                            <div>
                                                <span class="font-bold">{f.customer.clone()}</span>
                                                <span class="text-xs opacity-50 ml-2">{format!("Order #{}", f.order_id)}</span>
                                            </div>
                                            <div class="flex">{stars(f.rating)}</div>
                                        </div>
                                        <p class="mt-2">{f.comment.clone()}</p>
                                        <p class="text-xs opacity-50 mt-1">
                                            {format!("{} {}", format_short_date(&f.date), f.time.format("%H:%M"))}
                                        </p>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </div>
        </div>
    }
}
