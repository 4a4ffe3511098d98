use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};
use log::{debug, info};

use super::layout::{LinkKind, build_layout};
use crate::config::NebulaConfig;
use crate::records::{ContentRecord, RecordRef};

/// Extra world-space slack around a node that still counts as a hit.
const HIT_SLACK: f64 = 3.0;

#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub record: RecordRef,
	pub title: String,
	pub rank: usize,
	pub relevance: f64,
	pub radius: f64,
	pub is_center: bool,
	pub labeled: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct LinkInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub kind: LinkKind,
	pub opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphPhase {
	/// Simulation running with nothing to show yet.
	Initialized,
	Populated,
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
	pub node_idx: Option<DefaultNodeIdx>,
	pub moved: bool,
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

pub struct NebulaState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub links: Vec<LinkInfo>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub flow_time: f64,
	pub config: NebulaConfig,
	center: Option<DefaultNodeIdx>,
	phase: GraphPhase,
}

impl NebulaState {
	pub fn new(width: f64, height: f64, config: NebulaConfig) -> Self {
		Self {
			graph: ForceGraph::new(config.simulation_parameters()),
			links: Vec::new(),
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
			config,
			center: None,
			phase: GraphPhase::Initialized,
		}
	}

	pub fn phase(&self) -> GraphPhase {
		self.phase
	}

	/// Swaps in a new result list. Empty input leaves the current graph alone
	/// and returns `false`.
	pub fn replace(&mut self, records: &[ContentRecord]) -> bool {
		if records.is_empty() {
			debug!("nebula: empty result list, keeping previous graph");
			return false;
		}

		let layout = build_layout(records, &self.config);
		let mut graph = ForceGraph::new(self.config.simulation_parameters());
		let mut by_rank = Vec::with_capacity(layout.nodes.len());

		for node in layout.nodes {
			let idx = graph.add_node(NodeData {
				x: node.x as f32,
				y: node.y as f32,
				mass: 10.0,
				is_anchor: node.is_center,
				user_data: NodeInfo {
					record: node.record,
					title: node.title,
					rank: node.rank,
					relevance: node.relevance,
					radius: node.radius,
					is_center: node.is_center,
					labeled: node.labeled,
				},
			});
			by_rank.push(idx);
		}

		let links: Vec<LinkInfo> = layout
			.links
			.iter()
			.map(|link| {
				let (source, target) = (by_rank[link.source], by_rank[link.target]);
				graph.add_edge(source, target, EdgeData::default());
				LinkInfo {
					source,
					target,
					kind: link.kind,
					opacity: link.opacity,
				}
			})
			.collect();

		info!(
			"nebula: populated with {} nodes and {} links",
			by_rank.len(),
			links.len()
		);
		self.graph = graph;
		self.links = links;
		self.center = by_rank.first().copied();
		self.drag = DragState::default();
		self.hover = HoverState::default();
		self.phase = GraphPhase::Populated;
		true
	}

	pub fn node_count(&self) -> usize {
		let mut count = 0;
		self.graph.visit_nodes(|_| count += 1);
		count
	}

	pub fn center_position(&self) -> Option<(f32, f32)> {
		let center = self.center?;
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.index() == center {
				pos = Some((node.x(), node.y()));
			}
		});
		pos
	}

	pub fn node_position(&self, record: &RecordRef) -> Option<(f64, f64)> {
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.data.user_data.record == *record {
				pos = Some((node.x() as f64, node.y() as f64));
			}
		});
		pos
	}

	pub fn relevance_of(&self, record: &RecordRef) -> Option<f64> {
		let mut relevance = None;
		self.graph.visit_nodes(|node| {
			if node.data.user_data.record == *record {
				relevance = Some(node.data.user_data.relevance);
			}
		});
		relevance
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(
			gx * self.transform.k + self.transform.x,
			gy * self.transform.k + self.transform.y,
		)
	}

	/// Closest node under the pointer, if any.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found: Option<(DefaultNodeIdx, f64)> = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist < node.data.user_data.radius + HIT_SLACK
				&& found.is_none_or(|(_, best)| dist < best)
			{
				found = Some((node.index(), dist));
			}
		});
		found.map(|(idx, _)| idx)
	}

	pub fn record_at(&self, sx: f64, sy: f64) -> Option<RecordRef> {
		let idx = self.node_at_position(sx, sy)?;
		self.record_of(idx)
	}

	fn record_of(&self, idx: DefaultNodeIdx) -> Option<RecordRef> {
		let mut record = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				record = Some(node.data.user_data.record.clone());
			}
		});
		record
	}

	/// Starts a node drag (or a click, if the pointer never moves) or a pan.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		if let Some(idx) = self.node_at_position(sx, sy) {
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				moved: false,
				start_x: sx,
				start_y: sy,
				..DragState::default()
			};
			let drag = &mut self.drag;
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					drag.node_start_x = node.x();
					drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan = PanState {
				active: true,
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(sx, sy);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
			if (dx * dx + dy * dy).sqrt() > self.config.click_slop {
				self.drag.moved = true;
			}
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			if !self.drag.moved || Some(idx) == self.center {
				return;
			}
			let k = self.transform.k;
			let (nx, ny) = (
				self.drag.node_start_x + (dx / k) as f32,
				self.drag.node_start_y + (dy / k) as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Ends the gesture. Returns the record when it was a click on a node.
	pub fn pointer_up(&mut self) -> Option<RecordRef> {
		let clicked = match (self.drag.active, self.drag.moved, self.drag.node_idx) {
			(true, false, Some(idx)) => self.record_of(idx),
			_ => None,
		};
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	pub fn pointer_leave(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	/// Wheel zoom around the pointer.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Keep the previous highlight around while it fades out.
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
			for link in &self.links {
				if link.source == idx {
					self.hover.neighbors.insert(link.target);
				} else if link.target == idx {
					self.hover.neighbors.insert(link.source);
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

	/// Node positions in graph space, for drawing links.
	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn tick(&mut self, dt: f32) {
		if self.phase == GraphPhase::Populated {
			self.graph.update(dt);
			self.pin_center();
		}
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

	/// The center sits at the graph origin whatever the forces say.
	fn pin_center(&mut self) {
		let Some(center) = self.center else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == center {
				node.data.x = 0.0;
				node.data.y = 0.0;
			}
		});
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::records::RecordType;

	fn records(prefix: &str, n: usize) -> Vec<ContentRecord> {
		(0..n)
			.map(|i| {
				let mut record = ContentRecord::new(format!("{}{}", prefix, i), RecordType::Archive);
				record.title = Some(format!("Result {}", i));
				record
			})
			.collect()
	}

	fn populated(n: usize) -> (NebulaState, Vec<ContentRecord>) {
		let mut state = NebulaState::new(800.0, 600.0, NebulaConfig::default());
		let records = records("r", n);
		assert!(state.replace(&records));
		(state, records)
	}

	fn relevances(state: &NebulaState, records: &[ContentRecord]) -> Vec<Option<f64>> {
		records
			.iter()
			.map(|r| state.relevance_of(&r.record_ref()))
			.collect()
	}

	#[test]
	fn test_phases() {
		let mut state = NebulaState::new(800.0, 600.0, NebulaConfig::default());
		assert_eq!(state.phase(), GraphPhase::Initialized);
		assert_eq!(state.node_count(), 0);
		state.tick(0.016);
		assert!(state.replace(&records("r", 4)));
		assert_eq!(state.phase(), GraphPhase::Populated);
		assert_eq!(state.node_count(), 4);
	}

	#[test]
	fn test_center_stays_pinned_for_100_ticks() {
		let (mut state, _) = populated(15);
		for _ in 0..100 {
			state.tick(0.016);
			assert_eq!(state.center_position(), Some((0.0, 0.0)));
		}
	}

	#[test]
	fn test_center_cannot_be_dragged() {
		let (mut state, _) = populated(6);
		let (cx, cy) = state.graph_to_screen(0.0, 0.0);
		state.pointer_down(cx, cy);
		state.pointer_move(cx + 120.0, cy + 80.0);
		state.tick(0.016);
		assert_eq!(state.pointer_up(), None);
		assert_eq!(state.center_position(), Some((0.0, 0.0)));
	}

	#[test]
	fn test_empty_replace_keeps_last_graph() {
		let (mut state, records) = populated(5);
		let before = relevances(&state, &records);
		assert!(!state.replace(&[]));
		assert_eq!(state.phase(), GraphPhase::Populated);
		assert_eq!(state.node_count(), 5);
		assert_eq!(relevances(&state, &records), before);
	}

	#[test]
	fn test_replace_swaps_node_set() {
		let (mut state, old) = populated(5);
		let new = records("s", 3);
		assert!(state.replace(&new));
		assert_eq!(state.node_count(), 3);
		assert!(state.relevance_of(&old[1].record_ref()).is_none());
		assert_eq!(state.relevance_of(&new[0].record_ref()), Some(1.0));
		assert_eq!(state.links.len(), 2);
	}

	#[test]
	fn test_click_on_node_yields_its_record() {
		let (mut state, records) = populated(5);
		let target = records[2].record_ref();
		let (gx, gy) = state.node_position(&target).unwrap();
		let (sx, sy) = state.graph_to_screen(gx, gy);
		state.pointer_down(sx, sy);
		state.pointer_move(sx + 1.0, sy);
		assert_eq!(state.pointer_up(), Some(target));
	}

	#[test]
	fn test_drag_is_not_a_click() {
		let (mut state, records) = populated(5);
		let target = records[3].record_ref();
		let (gx, gy) = state.node_position(&target).unwrap();
		let (sx, sy) = state.graph_to_screen(gx, gy);
		state.pointer_down(sx, sy);
		state.pointer_move(sx + 40.0, sy + 40.0);
		assert_eq!(state.pointer_up(), None);
		let (nx, ny) = state.node_position(&target).unwrap();
		assert!((nx - (gx + 40.0)).abs() < 1e-3);
		assert!((ny - (gy + 40.0)).abs() < 1e-3);
	}

	#[test]
	fn test_view_operations_leave_relevance_alone() {
		let (mut state, records) = populated(8);
		let before = relevances(&state, &records);
		state.zoom_at(100.0, 100.0, -1.0);
		state.zoom_at(300.0, 200.0, 1.0);
		state.pointer_down(5.0, 5.0);
		state.pointer_move(60.0, 30.0);
		state.pointer_up();
		state.resize(1024.0, 768.0);
		assert_eq!(relevances(&state, &records), before);
		assert_eq!(state.node_count(), 8);
		assert_eq!((state.width, state.height), (1024.0, 768.0));
	}

	#[test]
	fn test_pan_moves_transform() {
		let (mut state, _) = populated(3);
		let (x0, y0) = (state.transform.x, state.transform.y);
		state.pointer_down(2.0, 2.0);
		state.pointer_move(12.0, 22.0);
		state.pointer_up();
		assert_eq!((state.transform.x, state.transform.y), (x0 + 10.0, y0 + 20.0));
	}

	#[test]
	fn test_hover_highlights_neighbours() {
		let (mut state, records) = populated(5);
		let (gx, gy) = state.node_position(&records[0].record_ref()).unwrap();
		let (sx, sy) = state.graph_to_screen(gx, gy);
		state.pointer_move(sx, sy);
		assert!(state.has_active_highlight());
		assert_eq!(state.hover.neighbors.len(), 4);
		state.pointer_leave();
		assert!(state.hover.node.is_none());
		assert!(state.hover.prev_node.is_some());
	}
}
