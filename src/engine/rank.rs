use std::collections::{HashMap, VecDeque};

use super::types::{Edge, Node};

/// Topological level of every node, in node order.
///
/// Nodes without incoming edges sit at level 0; a node's level is one more
/// than the level at which its last incoming edge was released. Nodes on or
/// behind a cycle never get released and stay `None`. Edges with unknown or
/// equal endpoints are ignored.
pub fn topological_ranks(nodes: &[Node], edges: &[Edge]) -> Vec<Option<usize>> {
	let n = nodes.len();
	let mut index: HashMap<&str, usize> = HashMap::with_capacity(n);
	for (i, node) in nodes.iter().enumerate() {
		index.entry(node.id.as_str()).or_insert(i);
	}

	let mut outgoing = vec![Vec::new(); n];
	let mut in_degree = vec![0usize; n];
	for edge in edges {
		let (Some(&src), Some(&tgt)) = (
			index.get(edge.source.as_str()),
			index.get(edge.target.as_str()),
		) else {
			continue;
		};
		if src == tgt {
			continue;
		}
		outgoing[src].push(tgt);
		in_degree[tgt] += 1;
	}

	let mut ranks = vec![None; n];
	let mut level: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
	let mut rank = 0;
	while !level.is_empty() {
		let mut next = VecDeque::new();
		for node in level {
			ranks[node] = Some(rank);
			for &tgt in &outgoing[node] {
				in_degree[tgt] -= 1;
				if in_degree[tgt] == 0 {
					next.push_back(tgt);
				}
			}
		}
		level = next;
		rank += 1;
	}
	ranks
}

#[cfg(test)]
mod tests {
	use super::*;

	fn nodes(n: usize) -> Vec<Node> {
		(1..=n).map(|i| Node::new(i.to_string())).collect()
	}

	#[test]
	fn levels_follow_longest_chain() {
		let edges = vec![
			Edge::new("1", "2", 5),
			Edge::new("2", "3", 3),
			Edge::new("1", "3", 10),
			Edge::new("4", "3", 1),
		];
		assert_eq!(
			topological_ranks(&nodes(4), &edges),
			vec![Some(0), Some(1), Some(2), Some(0)]
		);
	}

	#[test]
	fn cycle_members_have_no_rank() {
		let edges = vec![
			Edge::new("1", "2", 1),
			Edge::new("2", "3", 1),
			Edge::new("3", "2", 1),
			Edge::new("3", "4", 1),
		];
		assert_eq!(
			topological_ranks(&nodes(4), &edges),
			vec![Some(0), None, None, None]
		);
	}

	#[test]
	fn self_loops_and_unknown_endpoints_are_ignored() {
		let edges = vec![Edge::new("1", "1", 1), Edge::new("9", "2", 1)];
		assert_eq!(topological_ranks(&nodes(2), &edges), vec![Some(0), Some(0)]);
		assert!(topological_ranks(&[], &edges).is_empty());
	}
}
