//! Persistence of the node and edge lists.
//!
//! Both collections are stored independently as JSON arrays. A missing key
//! loads as an empty list.

use std::cell::RefCell;

use log::warn;
use thiserror::Error;

use crate::config::AppConfig;
use crate::engine::{Edge, Node};

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
	/// No window or no localStorage in this environment.
	#[error("storage unavailable")]
	Unavailable,

	/// The browser storage threw.
	#[error("storage backend error: {0}")]
	Backend(String),

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Loads and saves the graph between sessions.
pub trait GraphStore {
	fn load(&self) -> Result<(Vec<Node>, Vec<Edge>)>;
	fn save(&self, nodes: &[Node], edges: &[Edge]) -> Result<()>;
	fn clear(&self) -> Result<()>;
}

/// Loads from `store`, falling back to an empty graph on failure.
pub fn load_or_empty(store: &dyn GraphStore) -> (Vec<Node>, Vec<Edge>) {
	store.load().unwrap_or_else(|e| {
		warn!("Could not load saved graph: {}", e);
		(Vec::new(), Vec::new())
	})
}

/// In-memory store holding serialized JSON, used off-browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
	nodes: RefCell<Option<String>>,
	edges: RefCell<Option<String>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seeds raw JSON, as another tab or an older version would have written it.
	pub fn with_raw(nodes: Option<&str>, edges: Option<&str>) -> Self {
		Self {
			nodes: RefCell::new(nodes.map(str::to_owned)),
			edges: RefCell::new(edges.map(str::to_owned)),
		}
	}
}

impl GraphStore for MemoryStore {
	fn load(&self) -> Result<(Vec<Node>, Vec<Edge>)> {
		Ok((
			parse_list(self.nodes.borrow().as_deref())?,
			parse_list(self.edges.borrow().as_deref())?,
		))
	}

	fn save(&self, nodes: &[Node], edges: &[Edge]) -> Result<()> {
		*self.nodes.borrow_mut() = Some(serde_json::to_string(nodes)?);
		*self.edges.borrow_mut() = Some(serde_json::to_string(edges)?);
		Ok(())
	}

	fn clear(&self) -> Result<()> {
		self.nodes.borrow_mut().take();
		self.edges.borrow_mut().take();
		Ok(())
	}
}

/// Browser `localStorage` backend.
#[derive(Clone, Debug)]
pub struct LocalStorageStore {
	nodes_key: String,
	edges_key: String,
}

impl LocalStorageStore {
	pub fn new(config: &AppConfig) -> Self {
		Self {
			nodes_key: config.nodes_key.clone(),
			edges_key: config.edges_key.clone(),
		}
	}

	fn storage(&self) -> Result<web_sys::Storage> {
		web_sys::window()
			.ok_or(StoreError::Unavailable)?
			.local_storage()
			.map_err(js_error)?
			.ok_or(StoreError::Unavailable)
	}
}

impl GraphStore for LocalStorageStore {
	fn load(&self) -> Result<(Vec<Node>, Vec<Edge>)> {
		let storage = self.storage()?;
		let nodes = storage.get_item(&self.nodes_key).map_err(js_error)?;
		let edges = storage.get_item(&self.edges_key).map_err(js_error)?;
		Ok((parse_list(nodes.as_deref())?, parse_list(edges.as_deref())?))
	}

	fn save(&self, nodes: &[Node], edges: &[Edge]) -> Result<()> {
		let storage = self.storage()?;
		storage
			.set_item(&self.nodes_key, &serde_json::to_string(nodes)?)
			.map_err(js_error)?;
		storage
			.set_item(&self.edges_key, &serde_json::to_string(edges)?)
			.map_err(js_error)
	}

	fn clear(&self) -> Result<()> {
		let storage = self.storage()?;
		storage.remove_item(&self.nodes_key).map_err(js_error)?;
		storage.remove_item(&self.edges_key).map_err(js_error)
	}
}

fn js_error(err: wasm_bindgen::JsValue) -> StoreError {
	StoreError::Backend(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

fn parse_list<T: serde::de::DeserializeOwned>(raw: Option<&str>) -> Result<Vec<T>> {
	match raw {
		Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(raw)?),
		_ => Ok(Vec::new()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_keys_load_empty() {
		let store = MemoryStore::new();
		let (nodes, edges) = store.load().unwrap();
		assert!(nodes.is_empty());
		assert!(edges.is_empty());
	}

	#[test]
	fn saved_graph_loads_back() {
		let store = MemoryStore::new();
		let nodes = vec![Node::new("1"), Node::new("2")];
		let edges = vec![Edge::new("1", "2", 4)];
		store.save(&nodes, &edges).unwrap();
		assert_eq!(store.load().unwrap(), (nodes, edges));
		store.clear().unwrap();
		assert_eq!(store.load().unwrap(), (Vec::new(), Vec::new()));
	}

	#[test]
	fn reads_lists_without_optional_fields() {
		let store = MemoryStore::with_raw(
			Some(r#"[{"id":"1","label":"S1","x":12.5},{"id":"2"}]"#),
			Some(r#"[{"source":"1","target":"2","label":"7"}]"#),
		);
		let (nodes, edges) = store.load().unwrap();
		assert_eq!(nodes[0].label.as_deref(), Some("S1"));
		assert_eq!(nodes[1].label, None);
		assert_eq!(edges[0].id, None);
		assert_eq!(edges[0].weight(), 7.0);
	}

	#[test]
	fn corrupt_data_falls_back_to_empty() {
		let store = MemoryStore::with_raw(Some("{not json"), None);
		assert!(matches!(store.load(), Err(StoreError::Serialization(_))));
		let (nodes, edges) = load_or_empty(&store);
		assert!(nodes.is_empty() && edges.is_empty());
	}
}
