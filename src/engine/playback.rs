use std::collections::BTreeSet;

use super::relax::Relaxation;
use super::types::{CellRef, PathEdge, format_value};

/// Which precomputed step is on screen and whether the solution is revealed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackState {
	pub step_index: usize,
	pub reveal_solution: bool,
}

impl PlaybackState {
	fn last(len: usize) -> usize {
		len.saturating_sub(1)
	}

	pub fn is_final(&self, len: usize) -> bool {
		len > 0 && self.step_index == Self::last(len)
	}

	/// Selects `index`, clamped to the history. Leaving the final step hides the solution.
	pub fn select(self, index: usize, len: usize) -> Self {
		let step_index = index.min(Self::last(len));
		let next = Self {
			step_index,
			reveal_solution: self.reveal_solution,
		};
		if next.is_final(len) {
			next
		} else {
			Self {
				reveal_solution: false,
				..next
			}
		}
	}

	pub fn next(self, len: usize) -> Self {
		self.select(self.step_index + 1, len)
	}

	pub fn previous(self, len: usize) -> Self {
		self.select(self.step_index.saturating_sub(1), len)
	}

	pub fn restart(self) -> Self {
		Self::default()
	}

	pub fn jump_to_final(self, len: usize) -> Self {
		self.select(Self::last(len), len)
	}

	/// Reveals the solution; ignored unless the final step is selected.
	pub fn reveal(self, len: usize) -> Self {
		Self {
			reveal_solution: self.is_final(len),
			..self
		}
	}

	pub fn can_go_back(&self) -> bool {
		self.step_index > 0
	}

	pub fn can_go_forward(&self, len: usize) -> bool {
		self.step_index < Self::last(len)
	}
}

/// Read-only projection of one step for the matrix table and canvas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepView {
	pub title: String,
	pub rows: Vec<Vec<String>>,
	pub changed_cells: BTreeSet<CellRef>,
	pub derivations: Vec<String>,
	pub is_final: bool,
	/// Path cells, only on the final step.
	pub solution_cells: BTreeSet<CellRef>,
	/// Path total, only on the final step of a solved graph.
	pub total: Option<f64>,
	/// Graph edges for cells that changed in this round.
	pub changed_edges: Vec<PathEdge>,
	/// Solution edges, only once revealed.
	pub solution_edges: Vec<PathEdge>,
}

impl StepView {
	pub fn project(relaxation: &Relaxation, state: PlaybackState) -> Self {
		let len = relaxation.len();
		if len == 0 {
			return Self::default();
		}
		let state = state.select(state.step_index, len);
		let k = state.step_index;
		let step = &relaxation.steps[k];
		let is_final = state.is_final(len);
		let ids = &relaxation.node_ids;

		let title = if k == 0 {
			"Matrice initiale D1".to_string()
		} else {
			format!("Matrice D{} (k={})", k + 1, k)
		};
		let rows = step
			.matrix
			.iter()
			.map(|row| row.iter().map(|&v| format_value(v)).collect())
			.collect();
		let changed_edges = step
			.changed_cells
			.iter()
			.map(|c| PathEdge {
				source: ids[c.row].clone(),
				target: ids[c.col].clone(),
			})
			.collect();
		let solution = &relaxation.solution;

		Self {
			title,
			rows,
			changed_cells: step.changed_cells.clone(),
			derivations: step.derivation_lines().map(str::to_owned).collect(),
			is_final,
			solution_cells: if is_final {
				solution.cells.clone()
			} else {
				BTreeSet::new()
			},
			total: solution.total.filter(|_| is_final),
			changed_edges,
			solution_edges: if state.reveal_solution {
				solution.edges.clone()
			} else {
				Vec::new()
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::{Edge, Mode, Node, compute_steps};

	fn chain() -> Relaxation {
		compute_steps(
			&[Node::new("1"), Node::new("2"), Node::new("3")],
			&[Edge::new("1", "2", 5), Edge::new("2", "3", 3)],
			Mode::Max,
		)
	}

	#[test]
	fn navigation_is_clamped() {
		let s = PlaybackState::default();
		assert_eq!(s.previous(3).step_index, 0);
		assert_eq!(s.next(3).next(3).next(3).step_index, 2);
		assert_eq!(s.jump_to_final(3).step_index, 2);
		assert_eq!(s.jump_to_final(3).restart(), PlaybackState::default());
		assert_eq!(s.select(1, 3), s.select(1, 3).select(1, 3));
		assert_eq!(s.next(0).step_index, 0);
	}

	#[test]
	fn reveal_only_on_final_step() {
		let s = PlaybackState::default();
		assert!(!s.reveal(3).reveal_solution);
		let revealed = s.jump_to_final(3).reveal(3);
		assert!(revealed.reveal_solution);
		assert!(!revealed.previous(3).reveal_solution);
		assert!(revealed.select(2, 3).reveal_solution);
	}

	#[test]
	fn final_view_shows_total_and_solution() {
		let relaxation = chain();
		let state = PlaybackState::default().jump_to_final(relaxation.len());
		let view = StepView::project(&relaxation, state);
		assert!(view.is_final);
		assert_eq!(view.title, "Matrice D3 (k=2)");
		assert_eq!(view.total, Some(8.0));
		assert_eq!(view.rows[0], vec!["0", "5", "8"]);
		assert!(view.solution_edges.is_empty());
		assert_eq!(view.changed_edges.len(), 1);

		let view = StepView::project(&relaxation, state.reveal(relaxation.len()));
		assert_eq!(view.solution_edges.len(), 2);
	}

	#[test]
	fn initial_view_hides_result() {
		let relaxation = chain();
		let view = StepView::project(&relaxation, PlaybackState::default());
		assert_eq!(view.title, "Matrice initiale D1");
		assert!(!view.is_final);
		assert!(view.total.is_none());
		assert!(view.solution_cells.is_empty());
		assert!(view.derivations.is_empty());
	}

	#[test]
	fn empty_relaxation_projects_default() {
		let relaxation = compute_steps(&[], &[], Mode::Min);
		assert_eq!(
			StepView::project(&relaxation, PlaybackState::default()),
			StepView::default()
		);
	}
}
