use leptos::prelude::*;
use log::{debug, warn};

use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::components::graph_form::GraphForm;
use crate::components::matrix_table::MatrixTable;
use crate::config::AppConfig;
use crate::editor::GraphEditor;
use crate::engine::{Mode, PlaybackState, StepView, compute_steps};
use crate::store::{GraphStore, LocalStorageStore, load_or_empty};

/// Solver page for one mode: canvas, forms and the step-by-step matrices.
#[component]
pub fn Solver(mode: Mode) -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let store = LocalStorageStore::new(&config);
	let (nodes, edges) = load_or_empty(&store);

	let editor = RwSignal::new(GraphEditor::from_parts(nodes, edges));
	let selected = RwSignal::new(None::<String>);
	let playback = RwSignal::new(PlaybackState::default());

	// Recompute only when an edit went through, not on rejected attempts
	let revision = Memo::new(move |_| editor.with(|e| e.revision()));
	let relaxation = Memo::new(move |_| {
		revision.track();
		editor.with_untracked(|e| compute_steps(e.nodes(), e.edges(), mode))
	});

	let save_store = store.clone();
	Effect::new(move |prev: Option<u64>| {
		let rev = revision.get();
		if prev.is_some_and(|p| p != rev) {
			playback.set(PlaybackState::default());
			let saved = editor.with_untracked(|e| save_store.save(e.nodes(), e.edges()));
			if let Err(e) = saved {
				warn!("Could not save graph: {}", e);
			}
			debug!("Graph saved at revision {}", rev);
		}
		rev
	});

	let graph_data = Signal::derive(move || {
		relaxation.with(|r| {
			let view = StepView::project(r, playback.get());
			editor.with(|e| GraphData::from_graph(e.nodes(), e.edges(), &view))
		})
	});

	let endpoints = move || {
		relaxation.with(|r| match (r.source_node_id(), r.sink_node_id()) {
			(Some(source), Some(sink)) => format!("Sommet initial : {source} · Sommet final : {sink}"),
			_ => "Pas de sommet initial et final uniques.".to_string(),
		})
	};

	let clear = move |_| {
		editor.update(|e| e.clear());
		selected.set(None);
		if let Err(e) = store.clear() {
			warn!("Could not clear saved graph: {}", e);
		}
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Une erreur est survenue"</h1>

				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="solver">
				<div class="graph-pane">
					<h1>{format!("Algorithme de Demoucron ({})", mode.title())}</h1>
					<ForceGraphCanvas
						data=graph_data
						height=Some(520.0)
						on_select=Callback::new(move |id: String| selected.set(Some(id)))
					/>
					<p class="endpoints">{endpoints}</p>
				</div>
				<div class="side-pane">
					<GraphForm editor=editor selected=selected />
					<button class="danger" on:click=clear>"Vider les données"</button>
					<MatrixTable relaxation=relaxation playback=playback />
				</div>
			</div>
		</ErrorBoundary>
	}
}
