use leptos::prelude::*;

use crate::engine::{CellRef, Mode, PlaybackState, Relaxation, StepView, format_value};

/// CSS class of a matrix cell: changed cells first, then path cells on the
/// final step, then any reachable value on the final step.
fn cell_class(view: &StepView, cell: CellRef, is_sentinel: bool) -> &'static str {
	if view.changed_cells.contains(&cell) {
		"cell changed"
	} else if view.solution_cells.contains(&cell) {
		"cell on-path"
	} else if view.is_final && !is_sentinel {
		"cell reached"
	} else {
		"cell"
	}
}

/// One line per topological level, `"Rang r : a, b"`, then the nodes left
/// unranked by a cycle.
fn rank_lines(relaxation: &Relaxation) -> Vec<String> {
	let top = relaxation.ranks.iter().flatten().max().map_or(0, |&r| r + 1);
	let ids_at = |rank: Option<usize>| {
		relaxation
			.ranks
			.iter()
			.zip(&relaxation.node_ids)
			.filter(|(r, _)| **r == rank)
			.map(|(_, id)| id.as_str())
			.collect::<Vec<_>>()
			.join(", ")
	};
	let mut lines: Vec<String> = (0..top)
		.map(|r| format!("Rang {r} : {}", ids_at(Some(r))))
		.collect();
	let unranked = ids_at(None);
	if !unranked.is_empty() {
		lines.push(format!("Sans rang (cycle) : {unranked}"));
	}
	lines
}

/// Step-by-step matrix display with restart / previous / next / solution controls.
#[component]
pub fn MatrixTable(
	#[prop(into)] relaxation: Signal<Relaxation>,
	playback: RwSignal<PlaybackState>,
) -> impl IntoView {
	let len = move || relaxation.with(|r| r.len());
	let view_of = Memo::new(move |_| relaxation.with(|r| StepView::project(r, playback.get())));

	let restart = move |_| playback.update(|p| *p = p.restart());
	let previous = move |_| playback.update(|p| *p = p.previous(len()));
	let next = move |_| playback.update(|p| *p = p.next(len()));
	let to_final = move |_| playback.update(|p| *p = p.jump_to_final(len()));
	let reveal = move |_| playback.update(|p| *p = p.reveal(len()));

	let table = move || {
		let sv = view_of.get();
		relaxation.with(|r| {
			let step = r.steps.get(playback.get().step_index.min(r.len().saturating_sub(1)))?;
			let header = r
				.node_ids
				.iter()
				.map(|id| view! { <th>{id.clone()}</th> })
				.collect_view();
			let rows = sv
				.rows
				.iter()
				.zip(&r.node_ids)
				.enumerate()
				.map(|(i, (row, id))| {
					let cells = row
						.iter()
						.enumerate()
						.map(|(j, text)| {
							let cell = CellRef::new(i, j);
							let class = cell_class(&sv, cell, r.mode.is_sentinel(step.value(cell)));
							view! { <td class=class>{text.clone()}</td> }
						})
						.collect_view();
					view! {
						<tr>
							<th>{id.clone()}</th>
							{cells}
						</tr>
					}
				})
				.collect_view();
			Some(view! {
				<table class="matrix">
					<thead>
						<tr>
							<th></th>
							{header}
						</tr>
					</thead>
					<tbody>{rows}</tbody>
				</table>
			})
		})
	};

	let summary = move || {
		let sv = view_of.get();
		let mode = relaxation.with(|r| r.mode);
		sv.is_final.then(|| match sv.total {
			Some(total) => view! {
				<p class="solution-total">
					{format!("Solution {} = {}", mode.title(), format_value(total))}
				</p>
			}
			.into_any(),
			None => view! {
				<p class="solution-total none">"Aucun chemin entre un sommet initial et un sommet final unique."</p>
			}
			.into_any(),
		})
	};

	// Topological levels, MIN mode only
	let ranks = move || {
		relaxation.with(|r| {
			(r.mode == Mode::Min).then(|| {
				view! {
					<div class="ranks">
						<h3>"Rangs topologiques"</h3>
						{rank_lines(r)
							.into_iter()
							.map(|line| view! { <div class="rank">{line}</div> })
							.collect_view()}
					</div>
				}
			})
		})
	};

	let derivations = move || {
		let sv = view_of.get();
		let heading = if playback.get().step_index == 0 {
			"Calculs pour l'étape initiale".to_string()
		} else {
			format!("Calculs pour l'étape k={}", playback.get().step_index)
		};
		(!sv.derivations.is_empty()).then(|| {
			view! {
				<div class="derivations">
					<h3>{heading}</h3>
					{sv
						.derivations
						.into_iter()
						.map(|line| view! { <div class="derivation">{line}</div> })
						.collect_view()}
				</div>
			}
		})
	};

	view! {
		<section class="matrix-panel">
			<Show
				when=move || { len() > 0 }
				fallback=|| view! { <p>"Aucun sommet. Ajoutez des sommets pour commencer."</p> }
			>
				<h2>{move || view_of.get().title}</h2>
				{summary}
				{ranks}
				<div class="matrix-scroll">{table}</div>
				{derivations}
				<div class="playback">
					<button on:click=restart>"Recommencer"</button>
					<button on:click=previous disabled=move || !playback.get().can_go_back()>
						"Précédent"
					</button>
					<button on:click=next disabled=move || !playback.get().can_go_forward(len())>
						"Suivant"
					</button>
					<button on:click=to_final disabled=move || !playback.get().can_go_forward(len())>
						"Dernière étape"
					</button>
					<button on:click=reveal disabled=move || !playback.get().is_final(len())>
						"Afficher Solution"
					</button>
				</div>
			</Show>
		</section>
	}
}
