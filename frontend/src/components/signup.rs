//! 注册页
//!
//! 注册成功只提示并跳转登录页，不建立会话。

use crate::auth::use_auth;
use crate::components::icons::ShieldCheck;
use crate::toast::use_toasts;
use crate::web::router::{Link, use_router};
use canteen_admin::AppRoute;
use canteen_admin::screens::signup::{SignupForm, SignupService};
use canteen_shared::{AdminRole, College};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let router = use_router();

    let form = RwSignal::new(SignupForm::default());
    let colleges = RwSignal::new(Vec::<College>::new());
    let (is_submitting, set_is_submitting) = signal(false);

    // 挂载时拉取学院列表
    spawn_local(async move {
        let api = auth.api();
        if let Ok(list) = SignupService::new(&api, &toasts).colleges().await {
            let _ = colleges.try_set(list);
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        let snapshot = form.get_untracked();

        spawn_local(async move {
            let api = auth.api();
            if SignupService::new(&api, &toasts).submit(&snapshot).await.is_ok() {
                router.navigate_to(AppRoute::Login);
            }
            let _ = set_is_submitting.try_set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-lg">
                <div class="flex flex-col items-center gap-2 mb-4">
                    <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                        <ShieldCheck attr:class="h-8 w-8" />
                    </div>
                    <h1 class="text-3xl font-bold">"Create Admin Account"</h1>
                </div>

                <div class="card w-full shadow-2xl bg-base-100">
                    <form class="card-body space-y-2" on:submit=on_submit>
                        <TextField form=form id="admin_name" label="Name" kind="text" get={|f| f.admin_name.clone()} set={|f, v| f.admin_name = v} />
                        <TextField form=form id="admin_email" label="Email" kind="email" get={|f| f.admin_email.clone()} set={|f, v| f.admin_email = v} />
                        <TextField form=form id="phone_number" label="Phone Number" kind="tel" get={|f| f.phone_number.clone()} set={|f, v| f.phone_number = v} />

                        <div class="form-control">
                            <label class="label" for="college">
                                <span class="label-text">"College"</span>
                            </label>
                            <select
                                id="college"
                                class="select select-bordered w-full"
                                on:change=move |ev| form.update(|f| f.college_name = event_target_value(&ev))
                                prop:value=move || form.with(|f| f.college_name.clone())
                            >
                                <option value="">"Select your college"</option>
                                <For
                                    each=move || colleges.get()
                                    key=|c| c.college_name.clone()
                                    children=move |c| {
                                        let name = c.college_name.clone();
                                        let value = name.clone();
                                        view! { <option value=value>{name}</option> }
                                    }
                                />
                            </select>
                        </div>

                        <div class="form-control">
                            <label class="label" for="role">
                                <span class="label-text">"Role"</span>
                            </label>
                            <select
                                id="role"
                                class="select select-bordered w-full"
                                on:change=move |ev| form.update(|f| f.role = AdminRole::from_value(&event_target_value(&ev)))
                                prop:value=move || form.with(|f| f.role.as_str().to_string())
                            >
                                <option value={AdminRole::Admin.as_str()}>{AdminRole::Admin.label()}</option>
                                <option value={AdminRole::SuperAdmin.as_str()}>{AdminRole::SuperAdmin.label()}</option>
                            </select>
                        </div>

                        <TextField form=form id="admin_password" label="Password" kind="password" get={|f| f.admin_password.clone()} set={|f, v| f.admin_password = v} />
                        <TextField form=form id="confirm_password" label="Confirm Password" kind="password" get={|f| f.confirm_password.clone()} set={|f, v| f.confirm_password = v} />

                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                                } else {
                                    "Sign Up".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm">
                            "Already have an account? "
                            <Link route=AppRoute::Login class="link link-primary">"Login"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

/// 绑定到表单某个字符串字段的输入框
#[component]
fn TextField(
    form: RwSignal<SignupForm>,
    id: &'static str,
    label: &'static str,
    kind: &'static str,
    get: fn(&SignupForm) -> String,
    set: fn(&mut SignupForm, String),
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type=kind
                class="input input-bordered w-full"
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                prop:value=move || form.with(get)
            />
        </div>
    }
}
