//! Application settings shared through Leptos context.

use force_graph::SimulationParameters;

/// Force simulation tuning for the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

impl From<&SimulationConfig> for SimulationParameters {
	fn from(c: &SimulationConfig) -> Self {
		SimulationParameters {
			force_charge: c.force_charge,
			force_spring: c.force_spring,
			force_max: c.force_max,
			node_speed: c.node_speed,
			damping_factor: c.damping_factor,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	/// localStorage key holding the node list.
	pub nodes_key: String,
	/// localStorage key holding the edge list.
	pub edges_key: String,
	pub simulation: SimulationConfig,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			nodes_key: "graphNodes".into(),
			edges_key: "graphEdges".into(),
			simulation: SimulationConfig::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_stored_keys() {
		let config = AppConfig::default();
		assert_eq!(config.nodes_key, "graphNodes");
		assert_eq!(config.edges_key, "graphEdges");
		let params = SimulationParameters::from(&config.simulation);
		assert_eq!(params.force_charge, 150.0);
		assert_eq!(params.damping_factor, 0.9);
	}
}
