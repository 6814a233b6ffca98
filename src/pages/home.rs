use leptos::prelude::*;
use leptos_router::components::A;

/// Landing page introducing the two variants.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<div class="home">
			<h1>"Algorithme de Demoucron"</h1>
			<p class="subtitle">
				"Construisez un graphe orienté sans circuit, puis suivez pas à pas le calcul des matrices D1 à Dn."
			</p>
			<ul class="variants">
				<li>
					<A href="/maximum">"Chemin de valeur maximale"</A>
					" : la valeur 0 signifie qu'aucun chemin n'est connu."
				</li>
				<li>
					<A href="/minimum">"Chemin de valeur minimale"</A>
					" : la valeur +∞ signifie qu'aucun chemin n'est connu."
				</li>
			</ul>
			<p>"Le graphe est enregistré dans le navigateur et partagé par les deux pages."</p>
		</div>
	}
}
