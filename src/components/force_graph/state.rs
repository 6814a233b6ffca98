use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::{GraphData, LinkStyle};
use crate::config::SimulationConfig;

pub const NODE_COLOR: &str = "#2E86C1";
pub const PATH_NODE_COLOR: &str = "#2ca02c";

pub const NODE_RADIUS: f64 = 14.0;
pub const HIT_RADIUS: f64 = 18.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: Option<String>,
	pub color: String,
}

#[derive(Clone, Debug, Default)]
pub struct LinkInfo {
	pub label: Option<String>,
	pub style: LinkStyle,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

type Structure = (Vec<String>, Vec<(String, String)>);

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	links: HashMap<(DefaultNodeIdx, DefaultNodeIdx), LinkInfo>,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	structure: Structure,
}

fn owned_structure(data: &GraphData) -> Structure {
	let (ids, links) = data.structure();
	(
		ids.into_iter().map(str::to_owned).collect(),
		links
			.into_iter()
			.map(|(s, t)| (s.to_owned(), t.to_owned()))
			.collect(),
	)
}

impl ForceGraphState {
	pub fn new(data: &GraphData, width: f64, height: f64, sim: &SimulationConfig) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters::from(sim));
		let mut id_to_idx = HashMap::new();
		let mut links = HashMap::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let (x, y) = (
				(100.0 * angle.cos()) as f32,
				(100.0 * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: node_color(node.on_path).into(),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				links.insert(
					(src, tgt),
					LinkInfo {
						label: link.label.clone(),
						style: link.style,
					},
				);
			}
		}

		Self {
			graph,
			links,
			id_to_idx,
			structure: owned_structure(data),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			flow_time: 0.0,
		}
	}

	/// Whether `data` has the same nodes and links as the simulated graph.
	pub fn same_structure(&self, data: &GraphData) -> bool {
		self.structure == owned_structure(data)
	}

	/// Applies labels and highlights from `data` without resetting positions.
	/// The structure must be unchanged.
	pub fn restyle(&mut self, data: &GraphData) {
		let on_path: HashMap<&str, (bool, Option<&String>)> = data
			.nodes
			.iter()
			.map(|n| (n.id.as_str(), (n.on_path, n.label.as_ref())))
			.collect();
		self.graph.visit_nodes_mut(|node| {
			if let Some(&(path, label)) = on_path.get(node.data.user_data.id.as_str()) {
				node.data.user_data.color = node_color(path).into();
				node.data.user_data.label = label.cloned();
			}
		});
		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(self.id_to_idx.get(&link.source), self.id_to_idx.get(&link.target))
			{
				if let Some(info) = self.links.get_mut(&(src, tgt)) {
					info.label = link.label.clone();
					info.style = link.style;
				}
			}
		}
	}

	pub fn link(&self, src: DefaultNodeIdx, tgt: DefaultNodeIdx) -> Option<&LinkInfo> {
		self.links.get(&(src, tgt))
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the previous highlight around while it fades out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in self.links.keys() {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.flow_time += dt as f64;

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

fn node_color(on_path: bool) -> &'static str {
	if on_path { PATH_NODE_COLOR } else { NODE_COLOR }
}
