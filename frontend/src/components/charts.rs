//! 用 CSS 宽高绘制的简单图表

use leptos::prelude::*;

fn percent(value: f64, max: f64) -> f64 {
    if max > 0.0 { (value / max * 100.0).clamp(0.0, 100.0) } else { 0.0 }
}

fn max_of(data: &[(String, f64)]) -> f64 {
    data.iter().map(|(_, v)| *v).fold(0.0, f64::max)
}

/// 水平条形图：左侧标签，右侧数值
#[component]
pub fn BarList(
    #[prop(into)] data: Signal<Vec<(String, f64)>>,
    #[prop(optional)] money: bool,
) -> impl IntoView {
    let fmt = move |v: f64| {
        if money {
            format!("₹{}", canteen_admin::screens::format_money(v))
        } else {
            format!("{}", v)
        }
    };

    view! {
        <div class="space-y-2">
            {move || {
                let data = data.get();
                let max = max_of(&data);
                data.into_iter()
                    .map(|(label, value)| {
                        let width = format!("width: {:.1}%", percent(value, max));
                        view! {
                            <div class="flex items-center gap-3 text-sm">
                                <span class="w-24 truncate opacity-70">{label}</span>
                                <div class="flex-1 bg-base-200 rounded h-3">
                                    <div class="bg-primary rounded h-3" style=width></div>
                                </div>
                                <span class="w-20 text-right font-mono">{fmt(value)}</span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

/// 垂直柱状图
#[component]
pub fn ColumnChart(#[prop(into)] data: Signal<Vec<(String, f64)>>) -> impl IntoView {
    view! {
        <div class="flex items-end gap-2 h-40">
            {move || {
                let data = data.get();
                let max = max_of(&data);
                data.into_iter()
                    .map(|(label, value)| {
                        let height = format!("height: {:.1}%", percent(value, max));
                        view! {
                            <div class="flex-1 flex flex-col items-center justify-end h-full gap-1">
                                <div class="w-full bg-secondary rounded-t" style=height title=value.to_string()></div>
                                <span class="text-xs opacity-60">{label}</span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
