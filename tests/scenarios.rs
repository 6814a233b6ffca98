use demoucron_canvas::engine::{CellRef, Edge, Mode, Node, PathEdge, compute_steps};

fn nodes(ids: &[&str]) -> Vec<Node> {
	ids.iter().map(|id| Node::new(*id)).collect()
}

fn path(pairs: &[(&str, &str)]) -> Vec<PathEdge> {
	pairs
		.iter()
		.map(|(s, t)| PathEdge {
			source: s.to_string(),
			target: t.to_string(),
		})
		.collect()
}

#[test]
fn max_path_through_chain() {
	let result = compute_steps(
		&nodes(&["1", "2", "3"]),
		&[Edge::new("1", "2", 5), Edge::new("2", "3", 3)],
		Mode::Max,
	);
	assert_eq!(result.len(), 3);
	assert_eq!(result.final_matrix().unwrap()[0][2], 8.0);
	assert_eq!(result.solution.edges, path(&[("1", "2"), ("2", "3")]));
	assert_eq!(result.solution.total, Some(8.0));
	assert_eq!(result.source_node_id(), Some("1"));
	assert_eq!(result.sink_node_id(), Some("3"));
}

#[test]
fn min_path_prefers_detour_over_direct_edge() {
	let result = compute_steps(
		&nodes(&["1", "2", "3"]),
		&[
			Edge::new("1", "2", 5),
			Edge::new("2", "3", 3),
			Edge::new("1", "3", 10),
		],
		Mode::Min,
	);
	assert_eq!(result.final_matrix().unwrap()[0][2], 8.0);
	assert_eq!(result.solution.edges, path(&[("1", "2"), ("2", "3")]));
	assert_eq!(result.solution.total, Some(8.0));
	assert!(result.steps[2].changed_cells.contains(&CellRef::new(0, 2)));
}

#[test]
fn max_path_keeps_heavier_direct_edge() {
	let result = compute_steps(
		&nodes(&["1", "2", "3"]),
		&[
			Edge::new("1", "2", 5),
			Edge::new("2", "3", 3),
			Edge::new("1", "3", 10),
		],
		Mode::Max,
	);
	// 2 still has both an incoming and an outgoing edge, so 1 and 3 are the endpoints
	assert_eq!(result.solution.edges, path(&[("1", "3")]));
	assert_eq!(result.solution.total, Some(10.0));
}

#[test]
fn no_edges_means_no_solution() {
	for mode in [Mode::Max, Mode::Min] {
		let result = compute_steps(&nodes(&["1", "2"]), &[], mode);
		assert_eq!(result.len(), 2);
		let sentinel = mode.sentinel();
		assert!(
			result
				.final_matrix()
				.unwrap()
				.iter()
				.flatten()
				.all(|&v| v == sentinel)
		);
		assert!(result.solution.edges.is_empty());
		assert_eq!(result.solution.total, None);
	}
}

#[test]
fn single_node_yields_one_step() {
	let result = compute_steps(&nodes(&["1"]), &[], Mode::Max);
	assert_eq!(result.len(), 1);
	assert!(!result.solution.is_solved());
}

#[test]
fn cycle_has_no_unique_endpoints() {
	let edges = [
		Edge::new("1", "2", 1),
		Edge::new("2", "3", 1),
		Edge::new("3", "1", 1),
	];
	for mode in [Mode::Max, Mode::Min] {
		let result = compute_steps(&nodes(&["1", "2", "3"]), &edges, mode);
		assert_eq!(result.len(), 3);
		assert_eq!(result.source_node_id(), None);
		assert_eq!(result.sink_node_id(), None);
		assert!(result.solution.edges.is_empty());
	}
}

#[test]
fn two_sources_leave_graph_unsolved() {
	let result = compute_steps(
		&nodes(&["1", "2", "3"]),
		&[Edge::new("1", "3", 2), Edge::new("2", "3", 4)],
		Mode::Max,
	);
	assert_eq!(result.source_node_id(), None);
	assert_eq!(result.sink_node_id(), Some("3"));
	assert!(!result.solution.is_solved());
}

#[test]
fn rounds_follow_insertion_order() {
	// The chain 1 -> 2 -> 3 needs 2 as intermediate, but it comes last here
	// and the last vertex never gets a round of its own.
	let late = compute_steps(
		&nodes(&["3", "1", "2"]),
		&[Edge::new("1", "2", 2), Edge::new("2", "3", 7)],
		Mode::Max,
	);
	assert_eq!(late.final_matrix().unwrap()[1][0], 0.0);
	assert_eq!(late.source_node_id(), Some("1"));
	assert_eq!(late.sink_node_id(), Some("3"));
	assert!(!late.solution.is_solved());

	let early = compute_steps(
		&nodes(&["2", "3", "1"]),
		&[Edge::new("1", "2", 2), Edge::new("2", "3", 7)],
		Mode::Max,
	);
	assert_eq!(early.final_matrix().unwrap()[2][1], 9.0);
	assert_eq!(early.solution.edges, path(&[("1", "2"), ("2", "3")]));
	assert_eq!(early.solution.total, Some(9.0));
}
