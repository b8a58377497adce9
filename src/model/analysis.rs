// src/model/analysis.rs
use std::collections::HashSet;

use serde::Deserialize;

/// Structured strategy result returned by the generative service.
///
/// Field names follow the wire contract (`coreConcept`, `radarChartData`,
/// ...) so the candidate text deserializes directly. A response missing any
/// of these fields fails deserialization outright; there is no partially
/// populated analysis.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyAnalysis {
    pub core_concept: String,
    pub design_principles: Vec<String>,
    pub radar_chart_data: Vec<RadarAxis>,
    pub spatial_graph_data: SpatialGraph,
    /// Markdown narrative explaining the spatial relationships and metrics.
    pub detailed_analysis: String,
    /// Hex color strings, 4 expected.
    pub color_palette_suggestion: Vec<String>,
}

/// One radar dimension scored 0-100 against a fixed maximum.
#[derive(Debug, Clone, Deserialize)]
pub struct RadarAxis {
    pub subject: String,
    /// Proposed design score, 0-100. The wire name is the series key "A".
    #[serde(rename = "A")]
    pub score: f64,
    #[serde(rename = "fullMark")]
    pub full_mark: f64,
}

impl RadarAxis {
    /// Score normalized to 0.0..=1.0 for rendering. Clamped here rather than
    /// rejected; out-of-range scores are a contract violation of the
    /// upstream service.
    pub fn normalized(&self) -> f64 {
        let full = if self.full_mark > 0.0 { self.full_mark } else { 100.0 };
        (self.score / full).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpatialGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl SpatialGraph {
    /// Drop links whose endpoints name no node, returning how many were
    /// removed. The upstream schema promises referential integrity but does
    /// not enforce it; dropping here keeps the rendered link set consistent
    /// with the nodes that actually arrived.
    pub fn sanitize(&mut self) -> usize {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let before = self.links.len();
        self.links
            .retain(|l| ids.contains(l.source.as_str()) && ids.contains(l.target.as_str()));
        before - self.links.len()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    /// Grouping id used by the service (1=zone, 2=user, 3=element).
    pub group: u32,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Zone,
    User,
    Element,
}

impl NodeKind {
    pub fn display_name(self) -> &'static str {
        match self {
            NodeKind::Zone => "Zone",
            NodeKind::User => "User group",
            NodeKind::Element => "Design element",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    /// Strength of the relationship, 1-10.
    #[serde(rename = "value")]
    pub strength: f64,
}

/// Parse a "#RRGGBB" hex string (leading '#' optional, "#RGB" shorthand
/// accepted) into RGB components. The palette swatches render `None` as a
/// neutral placeholder.
pub fn parse_hex_rgb(value: &str) -> Option<[u8; 3]> {
    let trimmed = value.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String;
    let hex = match hex.len() {
        6 => hex,
        3 => {
            expanded = hex.chars().flat_map(|c| [c, c]).collect();
            &expanded
        }
        _ => return None,
    };
    let rgb = u32::from_str_radix(hex, 16).ok()?;
    Some([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8])
}
