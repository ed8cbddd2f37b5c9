//! 新建/编辑菜品对话框
//!
//! 表单字段整合为 `FormState`，负责：
//! - 数据的持有与重置
//! - 从已有菜品回填
//! - 转换为核心库的 `FoodForm`

use crate::components::icons::Plus;
use crate::web::{read_upload, selected_file};
use canteen_admin::ImageUpload;
use canteen_admin::screens::menu::FoodForm;
use canteen_shared::{FOOD_CATEGORIES, FoodItem};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合在闭包间传递。
#[derive(Clone, Copy)]
struct FormState {
    name: RwSignal<String>,
    price: RwSignal<String>,
    category: RwSignal<String>,
    description: RwSignal<String>,
    is_veg: RwSignal<bool>,
    is_active: RwSignal<bool>,
}

impl FormState {
    fn new() -> Self {
        let defaults = FoodForm::default();
        Self {
            name: RwSignal::new(defaults.name),
            price: RwSignal::new(defaults.price),
            category: RwSignal::new(defaults.category),
            description: RwSignal::new(defaults.description),
            is_veg: RwSignal::new(defaults.is_veg),
            is_active: RwSignal::new(defaults.is_active),
        }
    }

    fn load(&self, form: FoodForm) {
        self.name.set(form.name);
        self.price.set(form.price);
        self.category.set(form.category);
        self.description.set(form.description);
        self.is_veg.set(form.is_veg);
        self.is_active.set(form.is_active);
    }

    fn reset(&self) {
        self.load(FoodForm::default());
    }

    fn to_form(&self) -> FoodForm {
        FoodForm {
            name: self.name.get_untracked(),
            price: self.price.get_untracked(),
            category: self.category.get_untracked(),
            description: self.description.get_untracked(),
            is_veg: self.is_veg.get_untracked(),
            is_active: self.is_active.get_untracked(),
        }
    }
}

/// 对话框
///
/// `open` 与 `editing` 由页面持有；保存成功后由页面关闭对话框。
#[component]
pub fn FoodDialog(
    open: RwSignal<bool>,
    /// 正在编辑的菜品，`None` 表示新建
    editing: RwSignal<Option<FoodItem>>,
    /// 保存中（页面在请求期间置为 true）
    saving: ReadSignal<bool>,
    #[prop(into)] on_save: Callback<(FoodForm, Option<ImageUpload>)>,
) -> impl IntoView {
    let state = FormState::new();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    let file_ref = NodeRef::<leptos::html::Input>::new();

    // 打开时按编辑对象回填表单，关闭时清空
    Effect::new(move |_| {
        let is_open = open.get();
        if is_open {
            match editing.get_untracked() {
                Some(item) => state.load(FoodForm::from(&item)),
                None => state.reset(),
            }
        } else {
            state.reset();
            if let Some(input) = file_ref.get_untracked() {
                input.set_value("");
            }
        }

        if let Some(dialog) = dialog_ref.get() {
            if is_open {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = state.to_form();
        let file = file_ref.get_untracked().and_then(|input| selected_file(&input));

        spawn_local(async move {
            let upload = match file {
                Some(file) => match read_upload(&file).await {
                    Ok(upload) => Some(upload),
                    Err(e) => {
                        log::warn!("[Menu] 读取图片失败: {}", e);
                        None
                    }
                },
                None => None,
            };
            on_save.run((form, upload));
        });
    };

    let title = move || {
        if editing.with(Option::is_some) { "Edit Food Item" } else { "Add New Food Item" }
    };

    view! {
        <button
            class="btn btn-primary gap-2"
            on:click=move |_| {
                editing.set(None);
                open.set(true);
            }
        >
            <Plus attr:class="h-4 w-4" /> "Add Item"
        </button>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">{title}</h3>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="food_name" class="label">
                                <span class="label-text">"Name"</span>
                            </label>
                            <input id="food_name"
                                type="text"
                                placeholder="Masala Dosa"
                                on:input=move |ev| state.name.set(event_target_value(&ev))
                                prop:value=move || state.name.get()
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="food_price" class="label">
                                <span class="label-text">"Price (₹)"</span>
                            </label>
                            <input id="food_price"
                                type="number"
                                min="0"
                                step="0.01"
                                on:input=move |ev| state.price.set(event_target_value(&ev))
                                prop:value=move || state.price.get()
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="form-control">
                        <label for="food_category" class="label">
                            <span class="label-text">"Category"</span>
                        </label>
                        <select id="food_category"
                            class="select select-bordered w-full"
                            on:change=move |ev| state.category.set(event_target_value(&ev))
                            prop:value=move || state.category.get()
                        >
                            <option value="">"Select category"</option>
                            {FOOD_CATEGORIES
                                .iter()
                                .map(|c| view! { <option value={*c}>{*c}</option> })
                                .collect_view()}
                        </select>
                    </div>

                    <div class="form-control">
                        <label for="food_description" class="label">
                            <span class="label-text">"Description"</span>
                        </label>
                        <textarea id="food_description"
                            class="textarea textarea-bordered w-full"
                            on:input=move |ev| state.description.set(event_target_value(&ev))
                            prop:value=move || state.description.get()
                        ></textarea>
                    </div>

                    <div class="form-control">
                        <label for="food_image" class="label">
                            <span class="label-text">"Image"</span>
                        </label>
                        <input id="food_image"
                            type="file"
                            accept="image/*"
                            node_ref=file_ref
                            class="file-input file-input-bordered w-full"
                        />
                    </div>

                    <div class="flex gap-6">
                        <label class="label cursor-pointer gap-2">
                            <input type="checkbox" class="checkbox checkbox-success"
                                prop:checked=move || state.is_veg.get()
                                on:change=move |ev| state.is_veg.set(event_target_checked(&ev))
                            />
                            <span class="label-text">"Vegetarian"</span>
                        </label>
                        <label class="label cursor-pointer gap-2">
                            <input type="checkbox" class="toggle toggle-primary"
                                prop:checked=move || state.is_active.get()
                                on:change=move |ev| state.is_active.set(event_target_checked(&ev))
                            />
                            <span class="label-text">"Active"</span>
                        </label>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn" on:click=move |_| open.set(false)>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else {
                                "Save".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </dialog>
    }
}
