//! Maps a relevance-ordered result list onto graph nodes and links.
//!
//! Only list position is known here, never the scores behind it: index 0 is
//! the center, everything after it decays with rank.

use crate::config::NebulaConfig;
use crate::records::{ContentRecord, RecordRef};

const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

#[derive(Clone, Debug, PartialEq)]
pub struct NebulaNode {
	pub record: RecordRef,
	pub title: String,
	pub rank: usize,
	/// 1.0 for the center, `1 - rank/len` otherwise.
	pub relevance: f64,
	pub is_center: bool,
	pub radius: f64,
	pub labeled: bool,
	pub x: f64,
	pub y: f64,
	/// Pinned position, only set for the center.
	pub fx: Option<f64>,
	pub fy: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
	/// Satellite to center.
	Radial,
	/// Satellite to the next satellite, cosmetic.
	Structural,
}

/// Link between two entries of [`NebulaLayout::nodes`], by rank.
#[derive(Clone, Debug, PartialEq)]
pub struct NebulaLink {
	pub source: usize,
	pub target: usize,
	pub kind: LinkKind,
	pub opacity: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NebulaLayout {
	pub nodes: Vec<NebulaNode>,
	pub links: Vec<NebulaLink>,
}

pub fn relevance_for_rank(index: usize, len: usize) -> f64 {
	if index == 0 || len == 0 {
		return 1.0;
	}
	1.0 - index as f64 / len as f64
}

pub fn node_radius(relevance: f64, config: &NebulaConfig) -> f64 {
	lerp(config.min_radius, config.max_radius, relevance)
}

pub fn link_opacity(relevance: f64, config: &NebulaConfig) -> f64 {
	lerp(config.min_link_opacity, config.max_link_opacity, relevance)
}

/// Starting distance from the center; the closest satellites are the most relevant.
pub fn orbit_distance(relevance: f64, config: &NebulaConfig) -> f64 {
	lerp(config.max_orbit, config.min_orbit, relevance)
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
	from + (to - from) * t.clamp(0.0, 1.0)
}

pub fn build_layout(records: &[ContentRecord], config: &NebulaConfig) -> NebulaLayout {
	let len = records.len();
	let nodes: Vec<NebulaNode> = records
		.iter()
		.enumerate()
		.map(|(rank, record)| {
			let relevance = relevance_for_rank(rank, len);
			let is_center = rank == 0;
			let (x, y) = if is_center {
				(0.0, 0.0)
			} else {
				let angle = rank as f64 * GOLDEN_ANGLE;
				let distance = orbit_distance(relevance, config);
				(distance * angle.cos(), distance * angle.sin())
			};
			NebulaNode {
				record: record.record_ref(),
				title: record.display_title().to_string(),
				rank,
				relevance,
				is_center,
				radius: if is_center {
					config.center_radius
				} else {
					node_radius(relevance, config)
				},
				labeled: rank < config.labeled_ranks,
				x,
				y,
				fx: is_center.then_some(0.0),
				fy: is_center.then_some(0.0),
			}
		})
		.collect();

	let mut links = Vec::new();
	for node in nodes.iter().skip(1) {
		links.push(NebulaLink {
			source: 0,
			target: node.rank,
			kind: LinkKind::Radial,
			opacity: link_opacity(node.relevance, config),
		});
	}
	if config.structural_every > 0 {
		for node in nodes.iter().skip(1) {
			let next = node.rank + 1;
			if node.rank % config.structural_every == 0 && next < len {
				links.push(NebulaLink {
					source: node.rank,
					target: next,
					kind: LinkKind::Structural,
					opacity: link_opacity(nodes[next].relevance, config) * 0.5,
				});
			}
		}
	}

	NebulaLayout { nodes, links }
}
