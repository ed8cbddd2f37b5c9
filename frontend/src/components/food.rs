use crate::auth::use_auth;
use crate::components::charts::BarList;
use crate::components::food_dialog::FoodDialog;
use crate::components::icons::*;
use crate::toast::use_toasts;
use canteen_admin::ImageUpload;
use canteen_admin::screens::format_money;
use canteen_admin::screens::menu::{
    FoodForm, MenuService, MenuStats, PRICE_BUCKETS, apply_delete, apply_toggle, apply_update,
};
use canteen_shared::FoodItem;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn FoodPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();

    let items = RwSignal::new(Vec::<FoodItem>::new());
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let dialog_open = RwSignal::new(false);
    let editing = RwSignal::new(Option::<FoodItem>::None);

    let load_items = move || {
        let Some(session) = auth.session() else { return };
        let api = auth.api();
        set_loading.set(true);
        spawn_local(async move {
            if let Ok(list) = MenuService::new(&api, &session, &toasts).load().await {
                let _ = items.try_set(list);
            }
            let _ = set_loading.try_set(false);
        });
    };

    // 初始加载
    load_items();

    let handle_save = move |(form, image): (FoodForm, Option<ImageUpload>)| {
        let Some(session) = auth.session() else { return };
        let api = auth.api();
        let target = editing.get_untracked();
        set_saving.set(true);

        spawn_local(async move {
            let service = MenuService::new(&api, &session, &toasts);
            let saved = match target {
                Some(item) => service
                    .update(&item.id, &form, image)
                    .await
                    .map(|(draft, new_image)| {
                        let _ = items.try_update(|list| apply_update(list, &item.id, &draft, new_image));
                    }),
                None => service.create(&form, image).await.map(|list| {
                    let _ = items.try_set(list);
                }),
            };
            if saved.is_ok() {
                let _ = dialog_open.try_set(false);
            }
            let _ = set_saving.try_set(false);
        });
    };

    let handle_toggle = move |item: FoodItem| {
        let Some(session) = auth.session() else { return };
        let api = auth.api();
        spawn_local(async move {
            if let Ok(next) = MenuService::new(&api, &session, &toasts).toggle(&item).await {
                let _ = items.try_update(|list| apply_toggle(list, &item.id, next));
            }
        });
    };

    let handle_delete = move |item: FoodItem| {
        if !confirm(&format!("Delete \"{}\"?", item.name)) {
            return;
        }
        let Some(session) = auth.session() else { return };
        let api = auth.api();
        spawn_local(async move {
            if MenuService::new(&api, &session, &toasts).delete(&item.id).await.is_ok() {
                let _ = items.try_update(|list| apply_delete(list, &item.id));
            }
        });
    };

    let stats = Memo::new(move |_| items.with(|list| MenuStats::from_items(list)));
    let availability = Signal::derive(move || {
        let (active, inactive) = stats.get().availability_percent();
        vec![("Active %".to_string(), active), ("Inactive %".to_string(), inactive)]
    });
    let distribution = Signal::derive(move || {
        let counts = stats.get().price_distribution;
        PRICE_BUCKETS
            .iter()
            .zip(counts)
            .map(|(label, count)| (label.to_string(), count as f64))
            .collect::<Vec<_>>()
    });

    view! {
        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            <div class="stat">
                <div class="stat-title">"Total Items"</div>
                <div class="stat-value text-primary">{move || stats.get().total_items}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Active"</div>
                <div class="stat-value text-success">{move || stats.get().active_count}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Inactive"</div>
                <div class="stat-value text-error">{move || stats.get().inactive_count}</div>
            </div>
            <div class="stat">
                <div class="stat-title">"Menu Value"</div>
                <div class="stat-value text-secondary text-2xl">
                    "₹" {move || format_money(stats.get().total_value)}
                </div>
            </div>
        </div>

        <div class="grid md:grid-cols-2 gap-4">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Availability"</h3>
                    <BarList data=availability />
                </div>
            </div>
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Price Distribution"</h3>
                    <BarList data=distribution />
                </div>
            </div>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex items-center justify-between p-6 pb-2">
                    <div>
                        <h3 class="card-title">"Menu Items"</h3>
                        <p class="text-base-content/70 text-sm">"Manage the dishes your canteen serves."</p>
                    </div>
                    <div class="flex gap-2">
                        <button on:click=move |_| load_items() disabled=move || loading.get() class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                        <FoodDialog open=dialog_open editing=editing saving=saving on_save=handle_save />
                    </div>
                </div>

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Item"</th>
                                <th>"Category"</th>
                                <th>"Price"</th>
                                <th class="hidden md:table-cell">"Type"</th>
                                <th>"Active"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || items.with(Vec::is_empty) && !loading.get()>
                                <tr>
                                    <td colspan="6" class="text-center py-8 text-base-content/50">
                                        "No menu items yet. Add one to get started."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || loading.get() && items.with(Vec::is_empty)>
                                <tr>
                                    <td colspan="6" class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span> " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            {move || {
                                items
                                    .get()
                                    .into_iter()
                                    .map(|item| {
                                        view! {
                                            <FoodRow
                                                item=item
                                                on_toggle=handle_toggle
                                                on_delete=handle_delete
                                                on_edit=move |item: FoodItem| {
                                                    editing.set(Some(item));
                                                    dialog_open.set(true);
                                                }
                                            />
                                        }
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

#[component]
fn FoodRow(
    item: FoodItem,
    #[prop(into)] on_toggle: Callback<FoodItem>,
    #[prop(into)] on_edit: Callback<FoodItem>,
    #[prop(into)] on_delete: Callback<FoodItem>,
) -> impl IntoView {
    let image = (!item.image.is_empty()).then(|| {
        view! {
            <div class="avatar">
                <div class="mask mask-squircle w-10 h-10">
                    <img src=item.image.clone() alt=item.name.clone() />
                </div>
            </div>
        }
    });
    let veg_badge = if item.is_veg {
        view! { <span class="badge badge-success">"Veg"</span> }.into_any()
    } else {
        view! { <span class="badge badge-error">"Non-Veg"</span> }.into_any()
    };
    let is_active = item.is_active;
    let toggle_item = item.clone();
    let edit_item = item.clone();
    let delete_item = item.clone();

    view! {
        <tr>
            <td>
                <div class="flex items-center gap-3">
                    {image}
                    <div>
                        <div class="font-bold">{item.name.clone()}</div>
                        <div class="text-xs opacity-50 line-clamp-1">{item.description.clone()}</div>
                    </div>
                </div>
            </td>
            <td>
                <div class="badge badge-accent badge-outline">{item.category.clone()}</div>
            </td>
            <td class="font-mono">"₹" {format_money(item.price)}</td>
            <td class="hidden md:table-cell">{veg_badge}</td>
            <td>
                <input type="checkbox" class="toggle toggle-success toggle-sm"
                    prop:checked=is_active
                    on:change=move |ev| {
                        // 以服务端确认为准，先还原勾选状态
                        event_target::<web_sys::HtmlInputElement>(&ev).set_checked(is_active);
                        on_toggle.run(toggle_item.clone());
                    }
                />
            </td>
            <td>
                <div class="flex gap-1">
                    <button class="btn btn-ghost btn-sm btn-square"
                        on:click=move |_| on_edit.run(edit_item.clone())
                    >
                        <Pencil attr:class="h-4 w-4" />
                    </button>
                    <button class="btn btn-ghost btn-sm btn-square text-error"
                        on:click=move |_| on_delete.run(delete_item.clone())
                    >
                        <Trash2 attr:class="h-4 w-4" />
                    </button>
                </div>
            </td>
        </tr>
    }
}
