use crate::components::icons::*;
use crate::use_inbox;
use canteen_admin::screens::notifications::InboxKind;
use leptos::prelude::*;

fn kind_icon(kind: InboxKind) -> AnyView {
    match kind {
        InboxKind::Order => view! { <ShoppingBag attr:class="h-5 w-5 text-primary" /> }.into_any(),
        InboxKind::Stock => view! { <Utensils attr:class="h-5 w-5 text-warning" /> }.into_any(),
        InboxKind::Feedback => view! { <MessageSquare attr:class="h-5 w-5 text-secondary" /> }.into_any(),
        InboxKind::System => view! { <Bell attr:class="h-5 w-5 text-info" /> }.into_any(),
    }
}

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let inbox = use_inbox();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex items-center justify-between">
                    <div>
                        <h3 class="card-title">"Notifications"</h3>
                        <p class="text-base-content/70 text-sm">
                            {move || format!("{} unread", inbox.with(|i| i.unread_count()))}
                        </p>
                    </div>
                    <button class="btn btn-ghost btn-sm gap-2"
                        disabled=move || inbox.with(|i| i.unread_count() == 0)
                        on:click=move |_| inbox.update(|i| i.mark_all_read())
                    >
                        <CheckCheck attr:class="h-4 w-4" /> "Mark all as read"
                    </button>
                </div>

                <ul class="divide-y divide-base-200 mt-4">
                    {move || {
                        inbox
                            .get()
                            .items()
                            .iter()
                            .cloned()
                            .map(|item| {
                                let id = item.id;
                                let class = if item.read { "flex gap-4 py-4 opacity-60" } else { "flex gap-4 py-4" };
                                view! {
                                    <li class=class>
                                        {kind_icon(item.kind)}
                                        <div class="flex-1">
                                            <div class="font-bold">{item.title}</div>
                                            <div class="text-sm">{item.message}</div>
                                            <div class="text-xs opacity-50">{item.time_ago}</div>
                                        </div>
                                        {(!item.read).then(|| view! {
                                            <button class="btn btn-ghost btn-xs" on:click=move |_| inbox.update(|i| i.mark_read(id))>
                                                "Mark as read"
                                            </button>
                                        })}
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </div>
        </div>
    }
}
