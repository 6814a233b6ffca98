use leptos::prelude::*;

use crate::editor::{self, GraphEditor};

/// Outcome line shown under the forms.
#[derive(Clone, Debug, PartialEq)]
enum Notice {
	Error(String),
	Success(String),
}

/// Applies `edit` and turns its outcome into a notice.
fn apply(
	editor: RwSignal<GraphEditor>,
	notice: RwSignal<Option<Notice>>,
	success: String,
	edit: impl FnOnce(&mut GraphEditor) -> editor::Result<()>,
) -> bool {
	let mut outcome = Ok(());
	editor.update(|e| outcome = edit(e));
	match outcome {
		Ok(()) => {
			notice.set(Some(Notice::Success(success)));
			true
		}
		Err(err) => {
			notice.set(Some(Notice::Error(err.to_string())));
			false
		}
	}
}

/// Node and edge forms. Selecting a node on the canvas fills the edit section.
#[component]
pub fn GraphForm(editor: RwSignal<GraphEditor>, selected: RwSignal<Option<String>>) -> impl IntoView {
	let notice = RwSignal::new(None::<Notice>);

	let node_id = RwSignal::new(String::new());
	let node_label = RwSignal::new(String::new());
	let add_node = move |_| {
		let (id, label) = (node_id.get_untracked(), node_label.get_untracked());
		if apply(editor, notice, format!("Sommet '{}' ajouté.", id.trim()), |e| {
			e.add_node(&id, &label)
		}) {
			node_id.set(String::new());
			node_label.set(String::new());
		}
	};

	let source = RwSignal::new(String::new());
	let target = RwSignal::new(String::new());
	let weight = RwSignal::new(String::new());
	let add_edge = move |_| {
		let (s, t, w) = (source.get_untracked(), target.get_untracked(), weight.get_untracked());
		if apply(editor, notice, format!("Arête '{} → {}' ajoutée.", s.trim(), t.trim()), |e| {
			e.add_edge(&s, &t, &w)
		}) {
			source.set(String::new());
			target.set(String::new());
			weight.set(String::new());
		}
	};

	let rename = RwSignal::new(String::new());
	let rename_node = move |_| {
		let Some(id) = selected.get_untracked() else {
			return;
		};
		let label = rename.get_untracked();
		if apply(editor, notice, format!("Sommet '{id}' renommé."), |e| {
			e.rename_node(&id, &label)
		}) {
			rename.set(String::new());
		}
	};
	let delete_node = move |_| {
		let Some(id) = selected.get_untracked() else {
			return;
		};
		if apply(editor, notice, format!("Sommet '{id}' supprimé."), |e| e.delete_node(&id)) {
			selected.set(None);
		}
	};

	// Edges leaving the selected node, editable in place
	let outgoing = move || {
		let id = selected.get()?;
		let edges = editor.with(|e| {
			e.edges()
				.iter()
				.filter(|edge| edge.source == id)
				.cloned()
				.collect::<Vec<_>>()
		});
		Some(
			edges
				.into_iter()
				.map(|edge| {
					let key = edge.key();
					let (key_set, key_del) = (key.clone(), key.clone());
					let draft = RwSignal::new(edge.label.clone().unwrap_or_default());
					view! {
						<li>
							{format!("{} → {}", edge.source, edge.target)}
							<input
								type="text"
								prop:value=move || draft.get()
								on:input=move |ev| draft.set(event_target_value(&ev))
							/>
							<button on:click=move |_| {
								let w = draft.get_untracked();
								apply(editor, notice, format!("Arête '{}' modifiée.", key_set), |e| {
									e.set_edge_weight(&key_set, &w)
								});
							}>"Modifier"</button>
							<button on:click=move |_| {
								apply(editor, notice, format!("Arête '{}' supprimée.", key_del), |e| {
									e.delete_edge(&key_del)
								});
							}>"Supprimer"</button>
						</li>
					}
				})
				.collect_view(),
		)
	};

	let notice_line = move || {
		notice.get().map(|n| match n {
			Notice::Error(msg) => view! { <p class="notice error">{msg}</p> }.into_any(),
			Notice::Success(msg) => view! { <p class="notice success">{msg}</p> }.into_any(),
		})
	};

	view! {
		<section class="graph-form">
			<h3>"Sommets"</h3>
			<div class="form-row">
				<input
					type="text"
					placeholder="ID (ex: 1)"
					prop:value=move || node_id.get()
					on:input=move |ev| node_id.set(event_target_value(&ev))
				/>
				<input
					type="text"
					placeholder="Label (optionnel)"
					prop:value=move || node_label.get()
					on:input=move |ev| node_label.set(event_target_value(&ev))
				/>
				<button on:click=add_node>"Ajouter"</button>
			</div>

			<h3>"Arêtes"</h3>
			<div class="form-row">
				<input
					type="text"
					placeholder="Source"
					prop:value=move || source.get()
					on:input=move |ev| source.set(event_target_value(&ev))
				/>
				<input
					type="text"
					placeholder="Cible"
					prop:value=move || target.get()
					on:input=move |ev| target.set(event_target_value(&ev))
				/>
				<input
					type="text"
					placeholder="Poids"
					prop:value=move || weight.get()
					on:input=move |ev| weight.set(event_target_value(&ev))
				/>
				<button on:click=add_edge>"Ajouter"</button>
			</div>

			<Show when=move || selected.get().is_some()>
				<div class="selection">
					<h3>{move || format!("Sommet sélectionné : {}", selected.get().unwrap_or_default())}</h3>
					<div class="form-row">
						<input
							type="text"
							placeholder="Nouveau label"
							prop:value=move || rename.get()
							on:input=move |ev| rename.set(event_target_value(&ev))
						/>
						<button on:click=rename_node>"Renommer"</button>
						<button on:click=delete_node>"Supprimer"</button>
						<button on:click=move |_| selected.set(None)>"Fermer"</button>
					</div>
					<ul class="edge-list">{outgoing}</ul>
				</div>
			</Show>

			{notice_line}
		</section>
	}
}
