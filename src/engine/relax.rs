use std::collections::{BTreeSet, HashMap};

use log::debug;

use super::path::{self, Solution};
use super::rank::topological_ranks;
use super::types::{CellRef, Edge, Mode, Node, NodeId, format_value};

/// Distance matrix indexed by node position.
pub type Matrix = Vec<Vec<f64>>;
/// `predecessors[i][j]` is the vertex preceding `j` on the best known `i -> j` path.
pub type Predecessors = Vec<Vec<Option<usize>>>;

/// Snapshot taken after one relaxation round. Step 0 is the unrelaxed matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
	pub matrix: Matrix,
	pub predecessors: Predecessors,
	/// Cells whose value strictly improved during this round.
	pub changed_cells: BTreeSet<CellRef>,
	/// Derivation text for every pair that had a candidate through the round's vertex.
	pub derivations: Vec<Vec<Option<String>>>,
}

impl Step {
	pub fn value(&self, cell: CellRef) -> f64 {
		self.matrix[cell.row][cell.col]
	}

	/// Non-empty derivations in row-major order.
	pub fn derivation_lines(&self) -> impl Iterator<Item = &str> {
		self.derivations
			.iter()
			.flatten()
			.filter_map(|d| d.as_deref())
	}
}

/// Complete output of one computation: the step history and the solved path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Relaxation {
	pub mode: Mode,
	/// Node ids in matrix order.
	pub node_ids: Vec<NodeId>,
	/// Topological level of each node, `None` for nodes caught in a cycle.
	pub ranks: Vec<Option<usize>>,
	pub steps: Vec<Step>,
	pub solution: Solution,
}

impl Relaxation {
	pub fn len(&self) -> usize {
		self.steps.len()
	}

	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	pub fn final_step(&self) -> Option<&Step> {
		self.steps.last()
	}

	pub fn final_matrix(&self) -> Option<&Matrix> {
		self.final_step().map(|s| &s.matrix)
	}

	pub fn source_node_id(&self) -> Option<&str> {
		self.solution.source.map(|i| self.node_ids[i].as_str())
	}

	pub fn sink_node_id(&self) -> Option<&str> {
		self.solution.sink.map(|i| self.node_ids[i].as_str())
	}
}

/// Runs the Demoucron relaxation over `nodes` and `edges`.
///
/// Nodes must carry distinct ids; their order fixes the matrix indices. The
/// graph is assumed acyclic: rounds iterate over intermediate vertices in node
/// order for exactly `n - 1` rounds, so cyclic inputs are not guaranteed to
/// reach a true optimum. Edges with unknown endpoints or equal endpoints are
/// ignored, and a later edge for the same ordered pair overwrites an earlier one.
pub fn compute_steps(nodes: &[Node], edges: &[Edge], mode: Mode) -> Relaxation {
	let n = nodes.len();
	let node_ids: Vec<NodeId> = nodes.iter().map(|node| node.id.clone()).collect();
	let ranks = topological_ranks(nodes, edges);
	if n == 0 {
		return Relaxation {
			mode,
			node_ids,
			ranks,
			..Default::default()
		};
	}

	let mut steps = Vec::with_capacity(n);
	steps.push(initial_step(&node_ids, edges, mode));

	for k in 0..n - 1 {
		let next = relax_round(&steps[k], &node_ids, k, mode);
		steps.push(next);
	}

	let solution = match steps.last() {
		Some(last) => path::solve(&node_ids, &last.matrix, &last.predecessors, mode),
		None => Solution::default(),
	};
	debug!(
		"{} relaxation over {} nodes: {} steps, solved={}",
		mode.title(),
		n,
		steps.len(),
		solution.is_solved()
	);

	Relaxation {
		mode,
		node_ids,
		ranks,
		steps,
		solution,
	}
}

fn initial_step(node_ids: &[NodeId], edges: &[Edge], mode: Mode) -> Step {
	let n = node_ids.len();
	let mut index: HashMap<&str, usize> = HashMap::with_capacity(n);
	for (i, id) in node_ids.iter().enumerate() {
		index.entry(id.as_str()).or_insert(i);
	}

	let mut matrix = vec![vec![mode.sentinel(); n]; n];
	let mut predecessors = vec![vec![None; n]; n];
	for edge in edges {
		let (Some(&src), Some(&tgt)) = (
			index.get(edge.source.as_str()),
			index.get(edge.target.as_str()),
		) else {
			continue;
		};
		let weight = edge.weight();
		if src == tgt || !mode.accepts_weight(weight) {
			continue;
		}
		matrix[src][tgt] = weight;
		predecessors[src][tgt] = Some(src);
	}

	Step {
		matrix,
		predecessors,
		changed_cells: BTreeSet::new(),
		derivations: vec![vec![None; n]; n],
	}
}

/// One round through intermediate vertex `k`, reading only from `prev`.
fn relax_round(prev: &Step, node_ids: &[NodeId], k: usize, mode: Mode) -> Step {
	let n = node_ids.len();
	let mut matrix = prev.matrix.clone();
	let mut predecessors = prev.predecessors.clone();
	let mut changed_cells = BTreeSet::new();
	let mut derivations = vec![vec![None; n]; n];

	for i in 0..n {
		for j in 0..n {
			if i == j {
				continue;
			}
			let (ik, kj, current) = (prev.matrix[i][k], prev.matrix[k][j], prev.matrix[i][j]);
			if mode.is_sentinel(ik) || mode.is_sentinel(kj) {
				continue;
			}

			let via_k = ik + kj;
			let improved = mode.improves(via_k, current);
			let value = if improved { via_k } else { current };
			derivations[i][j] = Some(derivation(node_ids, i, j, k, ik, kj, current, value, mode));

			if improved {
				matrix[i][j] = value;
				predecessors[i][j] = prev.predecessors[k][j];
				changed_cells.insert(CellRef::new(i, j));
			}
		}
	}

	Step {
		matrix,
		predecessors,
		changed_cells,
		derivations,
	}
}

#[allow(clippy::too_many_arguments)]
fn derivation(
	ids: &[NodeId],
	i: usize,
	j: usize,
	k: usize,
	ik: f64,
	kj: f64,
	current: f64,
	value: f64,
	mode: Mode,
) -> String {
	let (a, b, c) = (&ids[i], &ids[j], &ids[k]);
	let via_k = ik + kj;
	format!(
		"W_{a}{b}({next}) = V_{a}{c}({k}) + V_{c}{b}({k}) = {} + {} = {}, V_{a}{b}({next}) = {op}({}, {}) = {}",
		format_value(ik),
		format_value(kj),
		format_value(via_k),
		format_value(via_k),
		format_value(current),
		format_value(value),
		next = k + 1,
		op = mode.operator(),
	)
}
