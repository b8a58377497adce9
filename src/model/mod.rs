// src/model/mod.rs
pub mod analysis;
pub mod brief;

// Re-export commonly used types
pub use analysis::{GraphLink, GraphNode, NodeKind, RadarAxis, SpatialGraph, StrategyAnalysis};
pub use brief::DesignInput;
