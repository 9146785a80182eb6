use leptos::{component, view, Callback, Callable, IntoView, Signal, SignalGet};

/// Blocking user notice; stays until dismissed
#[component]
#[must_use]
pub fn NoticeToast(notice: Signal<Option<String>>, on_dismiss: Callback<()>) -> impl IntoView {
    view! {
        {move || match notice.get() {
            Some(message) => view! {
                <div class="toast toast-visible" role="alert">
                    <span>{message}</span>
                    <button class="toast-dismiss" on:click=move |_| on_dismiss.call(())>"OK"</button>
                </div>
            }.into_view(),
            None => view! { <div class="toast"></div> }.into_view(),
        }}
    }
}
