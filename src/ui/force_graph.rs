// src/ui/force_graph.rs
use std::collections::HashMap;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Undirected;
use rand::Rng;

use crate::model::{NodeKind, SpatialGraph};

// Layout runs in a normalized unit square and is scaled to the panel rect
// at paint time. Tuning assumes the dozen-or-so nodes a typical brief
// produces; repulsion is O(n^2).
const START_TEMPERATURE: f32 = 0.10;
const DRAG_REHEAT: f32 = 0.04;
const COOLING: f32 = 0.96;
const SETTLED: f32 = 5e-4;
const CENTER_PULL: f32 = 0.05;
const MIN_SEPARATION: f32 = 0.07;
const EDGE_MARGIN: f32 = 0.05;

pub fn kind_color(kind: NodeKind) -> Color32 {
    match kind {
        NodeKind::Zone => Color32::from_rgb(0x06, 0xb6, 0xd4),
        NodeKind::User => Color32::from_rgb(0xf4, 0x3f, 0x5e),
        NodeKind::Element => Color32::from_rgb(0x8b, 0x5c, 0xf6),
    }
}

fn kind_radius(kind: NodeKind) -> f32 {
    match kind {
        NodeKind::Zone => 12.0,
        NodeKind::User => 8.0,
        NodeKind::Element => 6.0,
    }
}

#[derive(Debug)]
struct LayoutNode {
    label: String,
    kind: NodeKind,
    /// Position in the unit square.
    pos: Pos2,
}

/// Force-directed view of one spatial graph. Built fresh for every result
/// and dropped when the success view leaves the screen, so no layout state
/// survives across analyses.
pub struct ForceGraphView {
    graph: Graph<LayoutNode, f32, Undirected>,
    temperature: f32,
    dragged: Option<NodeIndex>,
}

impl ForceGraphView {
    pub fn new(data: &SpatialGraph) -> Self {
        let mut rng = rand::thread_rng();
        let mut graph = Graph::new_undirected();
        let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

        let count = data.nodes.len().max(1);
        for (i, node) in data.nodes.iter().enumerate() {
            // Seed on a circle with a little jitter so symmetric briefs do
            // not start in a degenerate line.
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let pos = Pos2::new(
                0.5 + 0.32 * angle.cos() + rng.gen_range(-0.02..0.02),
                0.5 + 0.32 * angle.sin() + rng.gen_range(-0.02..0.02),
            );
            let idx = graph.add_node(LayoutNode {
                label: node.label.clone(),
                kind: node.kind,
                pos,
            });
            indices.insert(node.id.as_str(), idx);
        }

        for link in &data.links {
            if let (Some(&a), Some(&b)) = (
                indices.get(link.source.as_str()),
                indices.get(link.target.as_str()),
            ) {
                graph.add_edge(a, b, link.strength as f32);
            }
        }

        Self {
            graph,
            temperature: START_TEMPERATURE,
            dragged: None,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.temperature < SETTLED
    }

    /// One relaxation pass: pairwise repulsion, attraction along links
    /// scaled by strength, a weak centering pull, then a separation pass
    /// standing in for collision avoidance. The dragged node is pinned.
    fn step(&mut self) {
        let nodes: Vec<NodeIndex> = self.graph.node_indices().collect();
        let n = nodes.len();
        if n <= 1 {
            self.temperature = 0.0;
            return;
        }

        let k = (1.0 / n as f32).sqrt().max(1e-3);
        let k2 = k * k;
        let mut disp: Vec<Vec2> = vec![Vec2::ZERO; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = self.graph[nodes[i]].pos - self.graph[nodes[j]].pos;
                let dist = delta.length().max(1e-3);
                let push = delta / dist * (k2 / dist);
                disp[i] += push;
                disp[j] -= push;
            }
        }

        for edge in self.graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            let delta = self.graph[edge.source()].pos - self.graph[edge.target()].pos;
            let dist = delta.length().max(1e-3);
            let strength = edge.weight().clamp(1.0, 10.0) / 10.0 + 0.5;
            let pull = delta / dist * (dist * dist / k).min(5.0) * strength;
            disp[a] -= pull;
            disp[b] += pull;
        }

        let center = Pos2::new(0.5, 0.5);
        for (i, &idx) in nodes.iter().enumerate() {
            disp[i] += (center - self.graph[idx].pos) * CENTER_PULL;
        }

        for (i, &idx) in nodes.iter().enumerate() {
            if Some(idx) == self.dragged {
                continue;
            }
            let magnitude = disp[i].length();
            if magnitude < 1e-6 {
                continue;
            }
            let step = magnitude.min(self.temperature);
            let pos = self.graph[idx].pos + disp[i] / magnitude * step;
            self.graph[idx].pos = clamp_to_box(pos);
        }

        // Separate overlapping pairs.
        for i in 0..n {
            for j in (i + 1)..n {
                let delta = self.graph[nodes[i]].pos - self.graph[nodes[j]].pos;
                let dist = delta.length().max(1e-3);
                if dist < MIN_SEPARATION {
                    let shove = delta / dist * (MIN_SEPARATION - dist) * 0.5;
                    if Some(nodes[i]) != self.dragged {
                        let pos = self.graph[nodes[i]].pos + shove;
                        self.graph[nodes[i]].pos = clamp_to_box(pos);
                    }
                    if Some(nodes[j]) != self.dragged {
                        let pos = self.graph[nodes[j]].pos - shove;
                        self.graph[nodes[j]].pos = clamp_to_box(pos);
                    }
                }
            }
        }

        self.temperature *= COOLING;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, height: f32) {
        let (response, painter) =
            ui.allocate_painter(Vec2::new(ui.available_width(), height), Sense::hover());
        let rect = response.rect;
        painter.rect_filled(rect, 8.0, ui.visuals().extreme_bg_color);

        self.handle_drag(ui, &response, rect);
        if !self.is_settled() {
            self.step();
            ui.ctx().request_repaint();
        }

        let link_stroke = Color32::from_rgba_unmultiplied(0x47, 0x55, 0x69, 0xa0);
        for edge in self.graph.edge_references() {
            let a = to_screen(rect, self.graph[edge.source()].pos);
            let b = to_screen(rect, self.graph[edge.target()].pos);
            let width = (edge.weight().sqrt() * 1.2).clamp(1.0, 4.0);
            painter.line_segment([a, b], Stroke::new(width, link_stroke));
        }

        for idx in self.graph.node_indices() {
            let node = &self.graph[idx];
            let center = to_screen(rect, node.pos);
            let radius = kind_radius(node.kind);
            painter.circle_filled(center, radius, kind_color(node.kind));
            painter.circle_stroke(center, radius, Stroke::new(1.5, Color32::WHITE));
            painter.text(
                center + Vec2::new(radius + 4.0, 0.0),
                Align2::LEFT_CENTER,
                &node.label,
                FontId::proportional(if node.kind == NodeKind::Zone { 12.0 } else { 10.5 }),
                Color32::from_rgb(0xcb, 0xd5, 0xe1),
            );
        }

        self.draw_legend(&painter, rect);
    }

    fn handle_drag(&mut self, ui: &mut egui::Ui, response: &egui::Response, rect: Rect) {
        let indices: Vec<NodeIndex> = self.graph.node_indices().collect();
        for idx in indices {
            let center = to_screen(rect, self.graph[idx].pos);
            let grab = kind_radius(self.graph[idx].kind) + 4.0;
            let node_rect = Rect::from_center_size(center, Vec2::splat(grab * 2.0));
            let node_response =
                ui.interact(node_rect, response.id.with(idx.index()), Sense::drag());

            if node_response.drag_started() {
                self.dragged = Some(idx);
            }
            if self.dragged == Some(idx) {
                if let Some(pointer) = node_response.interact_pointer_pos() {
                    self.graph[idx].pos = clamp_to_box(from_screen(rect, pointer));
                    // Let the rest of the graph react to the move.
                    self.temperature = self.temperature.max(DRAG_REHEAT);
                }
                if node_response.drag_released() {
                    self.dragged = None;
                }
            }
        }
    }

    fn draw_legend(&self, painter: &egui::Painter, rect: Rect) {
        let mut cursor = rect.left_top() + Vec2::new(12.0, 14.0);
        painter.text(
            cursor,
            Align2::LEFT_CENTER,
            "Spatial relationship graph",
            FontId::proportional(12.0),
            Color32::from_rgb(0x94, 0xa3, 0xb8),
        );
        cursor.y += 18.0;
        for kind in [NodeKind::Zone, NodeKind::User, NodeKind::Element] {
            painter.circle_filled(cursor, 4.0, kind_color(kind));
            painter.text(
                cursor + Vec2::new(8.0, 0.0),
                Align2::LEFT_CENTER,
                kind.display_name(),
                FontId::proportional(10.5),
                Color32::from_rgb(0x94, 0xa3, 0xb8),
            );
            cursor.y += 14.0;
        }
    }
}

fn clamp_to_box(pos: Pos2) -> Pos2 {
    Pos2::new(
        pos.x.clamp(EDGE_MARGIN, 1.0 - EDGE_MARGIN),
        pos.y.clamp(EDGE_MARGIN, 1.0 - EDGE_MARGIN),
    )
}

fn to_screen(rect: Rect, pos: Pos2) -> Pos2 {
    Pos2::new(
        rect.left() + pos.x * rect.width(),
        rect.top() + pos.y * rect.height(),
    )
}

fn from_screen(rect: Rect, pos: Pos2) -> Pos2 {
    Pos2::new(
        ((pos.x - rect.left()) / rect.width().max(1.0)).clamp(0.0, 1.0),
        ((pos.y - rect.top()) / rect.height().max(1.0)).clamp(0.0, 1.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_graph() -> SpatialGraph {
        serde_json::from_value(json!({
            "nodes": [
                { "id": "entry", "label": "Entry", "group": 1, "type": "zone" },
                { "id": "pods", "label": "Study pods", "group": 3, "type": "element" },
                { "id": "students", "label": "Students", "group": 2, "type": "user" },
                { "id": "terrace", "label": "Terrace", "group": 1, "type": "zone" }
            ],
            "links": [
                { "source": "entry", "target": "students", "value": 7 },
                { "source": "students", "target": "pods", "value": 9 },
                { "source": "entry", "target": "terrace", "value": 3 }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn builds_one_layout_node_per_graph_node() {
        let view = ForceGraphView::new(&sample_graph());
        assert_eq!(view.graph.node_count(), 4);
        assert_eq!(view.graph.edge_count(), 3);
        assert!(!view.is_settled());
    }

    #[test]
    fn positions_stay_inside_the_unit_box() {
        let mut view = ForceGraphView::new(&sample_graph());
        for _ in 0..300 {
            view.step();
        }
        for idx in view.graph.node_indices() {
            let pos = view.graph[idx].pos;
            assert!((0.0..=1.0).contains(&pos.x), "x out of bounds: {pos:?}");
            assert!((0.0..=1.0).contains(&pos.y), "y out of bounds: {pos:?}");
        }
    }

    #[test]
    fn simulation_cools_to_settled() {
        let mut view = ForceGraphView::new(&sample_graph());
        for _ in 0..1000 {
            if view.is_settled() {
                break;
            }
            view.step();
        }
        assert!(view.is_settled());
    }

    #[test]
    fn single_node_settles_immediately() {
        let graph: SpatialGraph = serde_json::from_value(json!({
            "nodes": [{ "id": "solo", "label": "Solo", "group": 1, "type": "zone" }],
            "links": []
        }))
        .unwrap();
        let mut view = ForceGraphView::new(&graph);
        view.step();
        assert!(view.is_settled());
    }

    #[test]
    fn links_with_unknown_endpoints_are_skipped() {
        // The view tolerates unsanitized data rather than panicking.
        let mut data = sample_graph();
        data.links.push(crate::model::GraphLink {
            source: "entry".to_string(),
            target: "ghost".to_string(),
            strength: 2.0,
        });
        let view = ForceGraphView::new(&data);
        assert_eq!(view.graph.edge_count(), 3);
    }
}
