use crate::auth::use_auth;
use crate::components::icons::*;
use crate::local_now;
use crate::toast::use_toasts;
use canteen_admin::screens::profile::{ProfileEditor, ProfileService, ProfileView};
use canteen_shared::ProfileUpdate;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let offset = *local_now().offset();

    let view_model = RwSignal::new(Option::<ProfileView>::None);
    let editor = RwSignal::new(ProfileEditor::default());
    let (saving, set_saving) = signal(false);

    // 挂载时加载资料
    if let Some(session) = auth.session() {
        let api = auth.api();
        spawn_local(async move {
            if let Ok(profile) = ProfileService::new(&api, &session, &toasts).load().await {
                let _ = view_model.try_set(Some(ProfileView::from_profile(&profile, &offset)));
                let _ = editor.try_set(ProfileEditor::from_profile(&profile));
            }
        });
    }

    let on_save = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(session) = auth.session() else { return };
        let api = auth.api();
        let update = editor.with_untracked(|e| e.draft.clone());
        set_saving.set(true);

        spawn_local(async move {
            if let Ok(saved) = ProfileService::new(&api, &session, &toasts).save(update).await {
                let _ = view_model.try_set(Some(ProfileView::from_profile(&saved, &offset)));
                let _ = editor.try_update(|e| e.apply_saved(&saved));
            }
            let _ = set_saving.try_set(false);
        });
    };

    let field = move |label: &'static str, get: fn(&ProfileUpdate) -> String, set: fn(&mut ProfileUpdate, String)| {
        view! {
            <div class="form-control">
                <label class="label"><span class="label-text">{label}</span></label>
                <input type="text" class="input input-bordered w-full"
                    prop:disabled=move || !editor.with(|e| e.editing)
                    prop:value=move || editor.with(|e| get(&e.draft))
                    on:input=move |ev| editor.update(|e| set(&mut e.draft, event_target_value(&ev)))
                />
            </div>
        }
    };

    view! {
        <Show
            when=move || view_model.with(Option::is_some)
            fallback=|| view! {
                <div class="flex justify-center py-16">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
        >
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body flex-row items-center gap-6">
                    <div class="avatar placeholder">
                        <div class="bg-primary text-primary-content rounded-full w-20">
                            <span class="text-2xl">{move || view_model.get().map(|v| v.initials()).unwrap_or_default()}</span>
                        </div>
                    </div>
                    <div>
                        <h2 class="text-2xl font-bold">{move || view_model.get().map(|v| v.name).unwrap_or_default()}</h2>
                        <div class="badge badge-primary">{move || view_model.get().map(|v| v.role).unwrap_or_default()}</div>
                        <p class="text-sm opacity-60 mt-1">
                            "Joined " {move || view_model.get().map(|v| v.join_date).unwrap_or_default()}
                        </p>
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body" on:submit=on_save>
                    <div class="flex items-center justify-between">
                        <h3 class="card-title">"Personal Information"</h3>
                        <Show
                            when=move || editor.with(|e| e.editing)
                            fallback=move || view! {
                                <button type="button" class="btn btn-outline btn-sm gap-2"
                                    on:click=move |_| editor.update(|e| e.begin_edit())
                                >
                                    <Pencil attr:class="h-4 w-4" /> "Edit"
                                </button>
                            }
                        >
                            <div class="flex gap-2">
                                <button type="button" class="btn btn-ghost btn-sm"
                                    on:click=move |_| editor.update(|e| e.cancel())
                                >
                                    "Cancel"
                                </button>
                                <button type="submit" class="btn btn-primary btn-sm"
                                    disabled=move || saving.get() || !editor.with(|e| e.is_dirty())
                                >
                                    {move || if saving.get() { "Saving..." } else { "Save" }}
                                </button>
                            </div>
                        </Show>
                    </div>

                    <div class="grid md:grid-cols-2 gap-4 mt-4">
                        {field("Name", |d| d.admin_name.clone(), |d, v| d.admin_name = v)}
                        {field("Email", |d| d.admin_email.clone(), |d, v| d.admin_email = v)}
                        {field("Phone Number", |d| d.phone_number.clone(), |d, v| d.phone_number = v)}
                        {field("College", |d| d.college_name.clone(), |d, v| d.college_name = v)}
                    </div>
                </form>
            </div>
        </Show>
    }
}
