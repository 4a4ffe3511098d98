//! Tunables for the graph view and the browser UI.

use force_graph::SimulationParameters;
use serde::{Deserialize, Serialize};

/// Layout and physics settings for the Nebula view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NebulaConfig {
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
	/// Radius of the pinned center node.
	pub center_radius: f64,
	/// Radius of the most and least relevant satellites.
	pub max_radius: f64,
	pub min_radius: f64,
	/// Starting distance from the center for the most and least relevant satellites.
	pub min_orbit: f64,
	pub max_orbit: f64,
	/// Opacity of the radial link to the most and least relevant satellites.
	pub max_link_opacity: f64,
	pub min_link_opacity: f64,
	/// Every n-th satellite gets a structural link to the next one.
	pub structural_every: usize,
	/// Satellites ranked below this only get a label on hover.
	pub labeled_ranks: usize,
	/// Pointer travel, in pixels, beyond which a press is a drag rather than a click.
	pub click_slop: f64,
}

impl Default for NebulaConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			center_radius: 14.0,
			max_radius: 9.0,
			min_radius: 3.0,
			min_orbit: 60.0,
			max_orbit: 260.0,
			max_link_opacity: 0.8,
			min_link_opacity: 0.08,
			structural_every: 3,
			labeled_ranks: 8,
			click_slop: 4.0,
		}
	}
}

impl NebulaConfig {
	pub fn simulation_parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

/// Browser page settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
	/// Quiet period before a search keystroke reaches the filter state.
	pub search_debounce_ms: u32,
}

impl Default for UiConfig {
	fn default() -> Self {
		Self {
			search_debounce_ms: 250,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_partial_config_falls_back_to_defaults() {
		let config: NebulaConfig =
			serde_json::from_str(r#"{"center_radius": 20.0, "structural_every": 4}"#).unwrap();
		assert_eq!(config.center_radius, 20.0);
		assert_eq!(config.structural_every, 4);
		assert_eq!(config.max_orbit, NebulaConfig::default().max_orbit);
	}
}
