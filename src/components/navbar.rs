use leptos::prelude::*;
use leptos_router::components::A;

/// Links to the two solver pages.
#[component]
pub fn Navbar() -> impl IntoView {
	view! {
		<nav class="navbar">
			<A href="/">"Demoucron"</A>
			<A href="/maximum">"Chemin maximum"</A>
			<A href="/minimum">"Chemin minimum"</A>
		</nav>
	}
}
