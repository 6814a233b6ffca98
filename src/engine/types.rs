use std::fmt;

use serde::{Deserialize, Serialize};

/// Node identifier as entered by the user (e.g. `"1"`).
pub type NodeId = String;

/// A graph vertex. Only `id` takes part in the computation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
	pub id: NodeId,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
}

impl Node {
	pub fn new(id: impl Into<NodeId>) -> Self {
		Self {
			id: id.into(),
			label: None,
		}
	}

	/// Label shown on the canvas, `S<id>` when none was given.
	pub fn display_label(&self) -> String {
		self.label
			.clone()
			.unwrap_or_else(|| format!("S{}", self.id))
	}
}

/// A directed, weighted edge. The weight travels as a decimal string label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	pub source: NodeId,
	pub target: NodeId,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
}

impl Edge {
	pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, weight: impl ToString) -> Self {
		let (source, target) = (source.into(), target.into());
		Self {
			id: Some(format!("{source}-{target}")),
			source,
			target,
			label: Some(weight.to_string()),
		}
	}

	/// Key identifying this edge: its id, or `"<source>-<target>"`.
	pub fn key(&self) -> String {
		self.id
			.clone()
			.unwrap_or_else(|| format!("{}-{}", self.source, self.target))
	}

	/// Parsed weight. Absent or non-numeric labels weigh 1.
	pub fn weight(&self) -> f64 {
		self.label
			.as_deref()
			.and_then(|l| l.trim().parse::<f64>().ok())
			.filter(|w| w.is_finite())
			.unwrap_or(1.0)
	}
}

/// Which optimum the relaxation looks for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
	/// Minimum-weight path; the sentinel is `+∞`.
	Min,
	/// Maximum-weight path; the sentinel is `0`.
	#[default]
	Max,
}

impl Mode {
	/// Matrix value meaning "no known path".
	pub fn sentinel(self) -> f64 {
		match self {
			Mode::Min => f64::INFINITY,
			Mode::Max => 0.0,
		}
	}

	pub fn is_sentinel(self, value: f64) -> bool {
		value == self.sentinel()
	}

	/// Strict improvement test; ties keep the current value.
	pub fn improves(self, candidate: f64, current: f64) -> bool {
		match self {
			Mode::Min => candidate < current,
			Mode::Max => candidate > current,
		}
	}

	/// Whether an edge of this weight enters the matrix. Non-positive
	/// weights collide with the `0` sentinel in MAX mode.
	pub fn accepts_weight(self, weight: f64) -> bool {
		match self {
			Mode::Min => true,
			Mode::Max => weight > 0.0,
		}
	}

	/// Operator name used in derivation text.
	pub fn operator(self) -> &'static str {
		match self {
			Mode::Min => "min",
			Mode::Max => "max",
		}
	}

	pub fn title(self) -> &'static str {
		match self {
			Mode::Min => "MIN",
			Mode::Max => "MAX",
		}
	}
}

/// Renders a matrix value, `+∞` for infinities.
pub fn format_value(value: f64) -> String {
	if value == f64::INFINITY {
		"+∞".into()
	} else if value == f64::NEG_INFINITY {
		"-∞".into()
	} else {
		value.to_string()
	}
}

/// Matrix cell position `(row, column)`, displayed as `"i-j"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
	pub row: usize,
	pub col: usize,
}

impl CellRef {
	pub fn new(row: usize, col: usize) -> Self {
		Self { row, col }
	}
}

impl fmt::Display for CellRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.row, self.col)
	}
}

/// Edge of the reconstructed optimal path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEdge {
	pub source: NodeId,
	pub target: NodeId,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn weight_defaults_to_one() {
		let mut edge = Edge::new("1", "2", "abc");
		assert_eq!(edge.weight(), 1.0);
		edge.label = None;
		assert_eq!(edge.weight(), 1.0);
		edge.label = Some(" 2.5 ".into());
		assert_eq!(edge.weight(), 2.5);
	}

	#[test]
	fn edge_key_falls_back_to_endpoints() {
		let edge = Edge {
			id: None,
			source: "3".into(),
			target: "4".into(),
			label: None,
		};
		assert_eq!(edge.key(), "3-4");
		assert_eq!(Edge::new("1", "2", 5).key(), "1-2");
	}

	#[test]
	fn mode_sentinels_and_ties() {
		assert!(Mode::Max.is_sentinel(0.0));
		assert!(Mode::Min.is_sentinel(f64::INFINITY));
		assert!(!Mode::Max.improves(5.0, 5.0));
		assert!(!Mode::Min.improves(5.0, 5.0));
		assert!(Mode::Min.improves(4.0, f64::INFINITY));
		assert!(!Mode::Max.accepts_weight(-2.0));
		assert!(Mode::Min.accepts_weight(-2.0));
	}

	#[test]
	fn values_render_without_trailing_zero() {
		assert_eq!(format_value(8.0), "8");
		assert_eq!(format_value(2.5), "2.5");
		assert_eq!(format_value(f64::INFINITY), "+∞");
		assert_eq!(CellRef::new(0, 2).to_string(), "0-2");
	}
}
