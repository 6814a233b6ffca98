use crate::engine::{Edge, Node, PathEdge, StepView};

/// How an edge is highlighted on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinkStyle {
	#[default]
	Normal,
	/// Its matrix cell improved in the displayed round.
	Changed,
	/// Part of the revealed optimal path.
	Solution,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: Option<String>,
	pub on_path: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub label: Option<String>,
	pub style: LinkStyle,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Canvas data for the graph with the step's highlights applied.
	/// A changed cell wins over a solution edge, as the step being studied.
	pub fn from_graph(nodes: &[Node], edges: &[Edge], view: &StepView) -> Self {
		let in_view = |list: &[PathEdge], e: &Edge| {
			list.iter()
				.any(|p| p.source == e.source && p.target == e.target)
		};
		let nodes = nodes
			.iter()
			.map(|n| GraphNode {
				id: n.id.clone(),
				label: Some(n.display_label()),
				on_path: view
					.solution_edges
					.iter()
					.any(|p| p.source == n.id || p.target == n.id),
			})
			.collect();
		let links = edges
			.iter()
			.map(|e| GraphLink {
				source: e.source.clone(),
				target: e.target.clone(),
				label: e.label.clone(),
				style: if in_view(view.changed_edges.as_slice(), e) {
					LinkStyle::Changed
				} else if in_view(view.solution_edges.as_slice(), e) {
					LinkStyle::Solution
				} else {
					LinkStyle::Normal
				},
			})
			.collect();
		Self { nodes, links }
	}

	/// Node ids and link endpoints, ignoring labels and highlights.
	pub fn structure(&self) -> (Vec<&str>, Vec<(&str, &str)>) {
		(
			self.nodes.iter().map(|n| n.id.as_str()).collect(),
			self.links
				.iter()
				.map(|l| (l.source.as_str(), l.target.as_str()))
				.collect(),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::{Mode, PlaybackState, compute_steps};

	#[test]
	fn highlights_follow_the_view() {
		let nodes = vec![Node::new("1"), Node::new("2"), Node::new("3"), Node::new("4")];
		let edges = vec![
			Edge::new("1", "2", 5),
			Edge::new("2", "3", 3),
			Edge::new("3", "4", 1),
		];
		let relaxation = compute_steps(&nodes, &edges, Mode::Max);
		let len = relaxation.len();
		let state = PlaybackState::default().jump_to_final(len).reveal(len);
		let view = StepView::project(&relaxation, state);
		let data = GraphData::from_graph(&nodes, &edges, &view);

		assert!(data.nodes.iter().all(|n| n.on_path));
		assert_eq!(data.nodes[0].label.as_deref(), Some("S1"));
		assert!(data.links.iter().all(|l| l.style == LinkStyle::Solution));
		assert_eq!(data.links[0].label.as_deref(), Some("5"));

		let hidden = StepView::project(&relaxation, PlaybackState::default());
		let data = GraphData::from_graph(&nodes, &edges, &hidden);
		assert!(data.nodes.iter().all(|n| !n.on_path));
		assert!(data.links.iter().all(|l| l.style == LinkStyle::Normal));
	}

	#[test]
	fn changed_cell_edge_is_marked() {
		let nodes = vec![Node::new("1"), Node::new("2"), Node::new("3")];
		let edges = vec![
			Edge::new("1", "2", 1),
			Edge::new("2", "3", 1),
			Edge::new("1", "3", 5),
		];
		let relaxation = compute_steps(&nodes, &edges, Mode::Min);
		let view = StepView::project(&relaxation, PlaybackState::default().jump_to_final(3));
		let data = GraphData::from_graph(&nodes, &edges, &view);
		assert_eq!(data.links[2].style, LinkStyle::Changed);
		assert_eq!(data.links[0].style, LinkStyle::Normal);
		assert_eq!(data.structure().1, vec![("1", "2"), ("2", "3"), ("1", "3")]);
	}
}
