//! Validated edits to the node and edge lists.
//!
//! The relaxation engine trusts its input; every rule it relies on (unique
//! ids, known endpoints, no self-loops, one edge per ordered pair, positive
//! numeric weights) is enforced here before a graph reaches it.

use log::{info, warn};
use thiserror::Error;

use crate::engine::{Edge, Node};

pub type Result<T> = std::result::Result<T, EditError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
	#[error("L'ID du nœud est requis.")]
	EmptyNodeId,

	#[error("L'ID du nœud doit être un entier positif (ex: 1, 2), reçu \"{0}\".")]
	InvalidNodeId(String),

	#[error("Un nœud avec l'ID \"{0}\" existe déjà. Essayez un autre ID.")]
	DuplicateNode(String),

	#[error("Tous les champs doivent être remplis.")]
	MissingField,

	#[error("Les sommets '{from}' ou '{to}' n'existent pas.")]
	UnknownEndpoint { from: String, to: String },

	#[error("Les arêtes ne peuvent pas connecter un sommet à lui-même ('{0}').")]
	SelfLoop(String),

	#[error("Une arête de '{from}' à '{to}' existe déjà.")]
	DuplicateEdge { from: String, to: String },

	#[error("Le poids de l'arête doit être un nombre positif (ex: 5), reçu \"{0}\".")]
	InvalidWeight(String),

	#[error("Le label ne peut pas être vide.")]
	EmptyLabel,

	#[error("Sommet inconnu '{0}'.")]
	UnknownNode(String),

	#[error("Arête inconnue '{0}'.")]
	UnknownEdge(String),
}

/// Owns the graph the solver works on. Each successful edit bumps `revision`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphEditor {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	revision: u64,
}

impl GraphEditor {
	/// Wraps an already validated graph, e.g. one loaded from storage.
	pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		Self {
			nodes,
			edges,
			revision: 0,
		}
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn revision(&self) -> u64 {
		self.revision
	}

	fn touch(&mut self, what: &str) {
		self.revision += 1;
		info!("Graph edit applied: {} (revision {})", what, self.revision);
	}

	fn has_node(&self, id: &str) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}

	/// Adds a node; the label defaults to `S<id>`.
	pub fn add_node(&mut self, id: &str, label: &str) -> Result<()> {
		let id = id.trim();
		let res = (|| {
			if id.is_empty() {
				return Err(EditError::EmptyNodeId);
			}
			if !is_positive_integer(id) {
				return Err(EditError::InvalidNodeId(id.into()));
			}
			if self.has_node(id) {
				return Err(EditError::DuplicateNode(id.into()));
			}
			Ok(())
		})();
		reject(res)?;

		let label = label.trim();
		self.nodes.push(Node {
			id: id.into(),
			label: Some(if label.is_empty() {
				format!("S{id}")
			} else {
				label.into()
			}),
		});
		self.touch(&format!("add node {id}"));
		Ok(())
	}

	pub fn rename_node(&mut self, id: &str, label: &str) -> Result<()> {
		let label = label.trim();
		if label.is_empty() {
			return reject(Err(EditError::EmptyLabel));
		}
		let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
			return reject(Err(EditError::UnknownNode(id.into())));
		};
		node.label = Some(label.into());
		self.touch(&format!("rename node {id}"));
		Ok(())
	}

	/// Removes a node together with every edge touching it.
	pub fn delete_node(&mut self, id: &str) -> Result<()> {
		if !self.has_node(id) {
			return reject(Err(EditError::UnknownNode(id.into())));
		}
		self.nodes.retain(|n| n.id != id);
		self.edges.retain(|e| e.source != id && e.target != id);
		self.touch(&format!("delete node {id}"));
		Ok(())
	}

	pub fn add_edge(&mut self, source: &str, target: &str, weight: &str) -> Result<()> {
		let (source, target, weight) = (source.trim(), target.trim(), weight.trim());
		let res = (|| {
			if source.is_empty() || target.is_empty() || weight.is_empty() {
				return Err(EditError::MissingField);
			}
			if !self.has_node(source) || !self.has_node(target) {
				return Err(EditError::UnknownEndpoint {
					from: source.into(),
					to: target.into(),
				});
			}
			if source == target {
				return Err(EditError::SelfLoop(source.into()));
			}
			if self
				.edges
				.iter()
				.any(|e| e.source == source && e.target == target)
			{
				return Err(EditError::DuplicateEdge {
					from: source.into(),
					to: target.into(),
				});
			}
			validate_weight(weight)
		})();
		reject(res)?;

		self.edges.push(Edge::new(source, target, weight));
		self.touch(&format!("add edge {source}->{target}"));
		Ok(())
	}

	/// Changes the weight of the edge with key `key` (see [`Edge::key`]).
	pub fn set_edge_weight(&mut self, key: &str, weight: &str) -> Result<()> {
		let weight = weight.trim();
		if weight.is_empty() {
			return reject(Err(EditError::EmptyLabel));
		}
		reject(validate_weight(weight))?;
		let Some(edge) = self.edges.iter_mut().find(|e| e.key() == key) else {
			return reject(Err(EditError::UnknownEdge(key.into())));
		};
		edge.label = Some(weight.into());
		self.touch(&format!("reweight edge {key}"));
		Ok(())
	}

	pub fn delete_edge(&mut self, key: &str) -> Result<()> {
		let before = self.edges.len();
		self.edges.retain(|e| e.key() != key);
		if self.edges.len() == before {
			return reject(Err(EditError::UnknownEdge(key.into())));
		}
		self.touch(&format!("delete edge {key}"));
		Ok(())
	}

	pub fn clear(&mut self) {
		self.nodes.clear();
		self.edges.clear();
		self.touch("clear");
	}
}

fn reject(res: Result<()>) -> Result<()> {
	if let Err(ref e) = res {
		warn!("Graph edit rejected: {}", e);
	}
	res
}

fn is_positive_integer(id: &str) -> bool {
	let mut chars = id.chars();
	matches!(chars.next(), Some('1'..='9')) && chars.all(|c| c.is_ascii_digit())
}

fn validate_weight(weight: &str) -> Result<()> {
	match weight.parse::<f64>() {
		Ok(w) if w.is_finite() && w > 0.0 => Ok(()),
		_ => Err(EditError::InvalidWeight(weight.into())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn editor() -> GraphEditor {
		let mut editor = GraphEditor::default();
		editor.add_node("1", "").unwrap();
		editor.add_node("2", "Start").unwrap();
		editor.add_node("3", "").unwrap();
		editor
	}

	#[test]
	fn node_ids_are_positive_integers() {
		let mut editor = editor();
		assert_eq!(editor.add_node("", ""), Err(EditError::EmptyNodeId));
		assert_eq!(editor.add_node("0", ""), Err(EditError::InvalidNodeId("0".into())));
		assert_eq!(editor.add_node("01", ""), Err(EditError::InvalidNodeId("01".into())));
		assert_eq!(editor.add_node("a", ""), Err(EditError::InvalidNodeId("a".into())));
		assert_eq!(editor.add_node("2", ""), Err(EditError::DuplicateNode("2".into())));
		assert_eq!(editor.nodes()[0].label.as_deref(), Some("S1"));
		assert_eq!(editor.nodes()[1].label.as_deref(), Some("Start"));
		assert_eq!(editor.revision(), 3);
	}

	#[test]
	fn edge_rules() {
		let mut editor = editor();
		editor.add_edge("1", "2", "5").unwrap();
		assert_eq!(editor.add_edge("1", "", "5"), Err(EditError::MissingField));
		assert_eq!(
			editor.add_edge("1", "9", "5"),
			Err(EditError::UnknownEndpoint {
				from: "1".into(),
				to: "9".into()
			})
		);
		assert_eq!(editor.add_edge("1", "1", "5"), Err(EditError::SelfLoop("1".into())));
		assert_eq!(
			editor.add_edge("1", "2", "3"),
			Err(EditError::DuplicateEdge {
				from: "1".into(),
				to: "2".into()
			})
		);
		assert_eq!(editor.add_edge("2", "3", "-1"), Err(EditError::InvalidWeight("-1".into())));
		assert_eq!(editor.add_edge("2", "3", "x"), Err(EditError::InvalidWeight("x".into())));
		editor.add_edge("2", "1", "2.5").unwrap();
		assert_eq!(editor.edges().len(), 2);
		assert_eq!(editor.edges()[0].id.as_deref(), Some("1-2"));
	}

	#[test]
	fn deleting_a_node_drops_its_edges() {
		let mut editor = editor();
		editor.add_edge("1", "2", "5").unwrap();
		editor.add_edge("2", "3", "5").unwrap();
		editor.add_edge("1", "3", "5").unwrap();
		editor.delete_node("2").unwrap();
		assert_eq!(editor.nodes().len(), 2);
		assert_eq!(editor.edges().len(), 1);
		assert_eq!(editor.edges()[0].key(), "1-3");
		assert_eq!(editor.delete_node("2"), Err(EditError::UnknownNode("2".into())));
	}

	#[test]
	fn edge_weight_and_labels_can_change() {
		let mut editor = editor();
		editor.add_edge("1", "2", "5").unwrap();
		editor.set_edge_weight("1-2", "9").unwrap();
		assert_eq!(editor.edges()[0].weight(), 9.0);
		assert_eq!(editor.set_edge_weight("1-2", "0"), Err(EditError::InvalidWeight("0".into())));
		assert_eq!(editor.set_edge_weight("1-2", " "), Err(EditError::EmptyLabel));
		assert_eq!(editor.set_edge_weight("2-1", "3"), Err(EditError::UnknownEdge("2-1".into())));
		editor.rename_node("1", "Départ").unwrap();
		assert_eq!(editor.rename_node("1", ""), Err(EditError::EmptyLabel));
		editor.delete_edge("1-2").unwrap();
		assert!(editor.edges().is_empty());
	}

	#[test]
	fn rejected_edits_keep_revision() {
		let mut editor = editor();
		let revision = editor.revision();
		let _ = editor.add_edge("1", "1", "5");
		assert_eq!(editor.revision(), revision);
		editor.clear();
		assert_eq!(editor.revision(), revision + 1);
		assert!(editor.nodes().is_empty());
	}
}
