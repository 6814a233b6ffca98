use leptos::prelude::*;
use leptos_router::components::A;

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<h1>"Page introuvable"</h1>
		<A href="/">"Retour à l'accueil"</A>
	}
}
