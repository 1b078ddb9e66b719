use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="min-h-[70vh] flex flex-col items-center justify-center gap-4 px-6">
            <h1 class="text-2xl font-semibold text-slate-900">"Page not found"</h1>
            <A href="/" {..} class="text-sm font-medium text-blue-700 hover:underline">
                "Back to Cofre"
            </A>
        </div>
    }
}
