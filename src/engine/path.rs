use std::collections::BTreeSet;

use super::relax::{Matrix, Predecessors};
use super::types::{CellRef, Mode, NodeId, PathEdge};

/// Optimal path found after the last round. Empty `path` means unsolved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solution {
	pub source: Option<usize>,
	pub sink: Option<usize>,
	/// Vertex indices from source to sink.
	pub path: Vec<usize>,
	pub edges: Vec<PathEdge>,
	/// Matrix cells of consecutive path pairs.
	pub cells: BTreeSet<CellRef>,
	pub total: Option<f64>,
}

impl Solution {
	pub fn is_solved(&self) -> bool {
		!self.path.is_empty()
	}

	pub fn contains_edge(&self, source: &str, target: &str) -> bool {
		self.edges
			.iter()
			.any(|e| e.source == source && e.target == target)
	}

	pub fn contains_node(&self, id: &str) -> bool {
		self.edges.iter().any(|e| e.source == id || e.target == id)
	}
}

/// Locates source and sink in the final matrix and walks the predecessors between them.
pub fn solve(ids: &[NodeId], matrix: &Matrix, predecessors: &Predecessors, mode: Mode) -> Solution {
	let (source, sink) = (find_source(matrix, mode), find_sink(matrix, mode));
	let mut solution = Solution {
		source,
		sink,
		..Default::default()
	};
	let (Some(source), Some(sink)) = (source, sink) else {
		return solution;
	};
	if source == sink {
		return solution;
	}
	let Some(path) = walk(predecessors, source, sink) else {
		return solution;
	};

	let mut total = 0.0;
	for pair in path.windows(2) {
		let (a, b) = (pair[0], pair[1]);
		total += matrix[a][b];
		solution.cells.insert(CellRef::new(a, b));
		solution.edges.push(PathEdge {
			source: ids[a].clone(),
			target: ids[b].clone(),
		});
	}
	solution.total = Some(total);
	solution.path = path;
	solution
}

/// The unique vertex with no incoming non-sentinel value.
pub fn find_source(matrix: &Matrix, mode: Mode) -> Option<usize> {
	unique((0..matrix.len()).filter(|&j| {
		(0..matrix.len()).all(|i| i == j || mode.is_sentinel(matrix[i][j]))
	}))
}

/// The unique vertex with no outgoing non-sentinel value.
pub fn find_sink(matrix: &Matrix, mode: Mode) -> Option<usize> {
	unique((0..matrix.len()).filter(|&i| {
		matrix[i]
			.iter()
			.enumerate()
			.all(|(j, &v)| i == j || mode.is_sentinel(v))
	}))
}

fn unique(mut candidates: impl Iterator<Item = usize>) -> Option<usize> {
	let first = candidates.next()?;
	candidates.next().is_none().then_some(first)
}

/// Follows `predecessors[source]` back from `sink`. Returns `None` on a
/// repeated vertex or when the chain stops short of `source`.
pub fn walk(predecessors: &Predecessors, source: usize, sink: usize) -> Option<Vec<usize>> {
	let mut path = vec![sink];
	let mut current = sink;
	while current != source {
		let next = predecessors[source][current]?;
		if path.contains(&next) {
			return None;
		}
		path.push(next);
		current = next;
	}
	path.reverse();
	Some(path)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unique_source_and_sink_in_chain() {
		let m = vec![
			vec![0.0, 5.0, 8.0],
			vec![0.0, 0.0, 3.0],
			vec![0.0, 0.0, 0.0],
		];
		assert_eq!(find_source(&m, Mode::Max), Some(0));
		assert_eq!(find_sink(&m, Mode::Max), Some(2));
	}

	#[test]
	fn several_candidates_yield_none() {
		let inf = f64::INFINITY;
		let m = vec![vec![inf, inf], vec![inf, inf]];
		assert_eq!(find_source(&m, Mode::Min), None);
		assert_eq!(find_sink(&m, Mode::Min), None);
	}

	#[test]
	fn walk_stops_on_repeated_vertex() {
		// 0 -> 1 <-> 2 loop in predecessor row 0
		let preds = vec![
			vec![None, Some(2), Some(1)],
			vec![None; 3],
			vec![None; 3],
		];
		assert_eq!(walk(&preds, 0, 2), None);
	}

	#[test]
	fn walk_requires_reaching_source() {
		let preds = vec![vec![None, None, Some(1)], vec![None; 3], vec![None; 3]];
		assert_eq!(walk(&preds, 0, 2), None);
		let preds = vec![vec![None, Some(0), Some(1)], vec![None; 3], vec![None; 3]];
		assert_eq!(walk(&preds, 0, 2), Some(vec![0, 1, 2]));
	}

	#[test]
	fn solve_sums_final_values() {
		let ids: Vec<NodeId> = vec!["a".into(), "b".into(), "c".into()];
		let m = vec![
			vec![0.0, 5.0, 8.0],
			vec![0.0, 0.0, 3.0],
			vec![0.0, 0.0, 0.0],
		];
		let preds = vec![
			vec![None, Some(0), Some(1)],
			vec![None, None, Some(1)],
			vec![None; 3],
		];
		let solution = solve(&ids, &m, &preds, Mode::Max);
		assert_eq!(solution.path, vec![0, 1, 2]);
		assert_eq!(solution.total, Some(8.0));
		assert!(solution.contains_edge("a", "b"));
		assert!(solution.contains_node("c"));
		assert!(solution.cells.contains(&CellRef::new(1, 2)));
	}
}
