//! Turns fetched graph data plus a layout into drawable primitives.

use super::layout::Layout;
use super::types::{GraphData, Point};

pub const ACTIVE_NODE_RADIUS: f64 = 18.0;
pub const NODE_RADIUS: f64 = 14.0;
/// Distance below the active node's center where its label sits.
pub const LABEL_OFFSET: f64 = 34.0;

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSegment {
    pub from: Point,
    pub to: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeMarker {
    pub path: String,
    pub title: String,
    pub position: Point,
    pub radius: f64,
    pub is_active: bool,
}

impl NodeMarker {
    pub fn tooltip(&self) -> String {
        format!("{}\n{}", self.title, self.path)
    }

    pub fn label_position(&self) -> Option<Point> {
        self.is_active.then(|| Point {
            x: self.position.x,
            y: self.position.y + LABEL_OFFSET,
        })
    }

    /// Where a click on this marker navigates; the focus note goes nowhere.
    pub fn navigation_target(&self) -> Option<&str> {
        (!self.is_active).then_some(self.path.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub edges: Vec<EdgeSegment>,
    pub nodes: Vec<NodeMarker>,
}

pub fn build_scene(graph: &GraphData, layout: &Layout, active_path: Option<&str>) -> Scene {
    let edges = graph
        .edges
        .iter()
        .filter_map(|edge| {
            let from = layout.get(&edge.from)?;
            let to = layout.get(&edge.to)?;
            Some(EdgeSegment {
                from: *from,
                to: *to,
            })
        })
        .collect();

    let nodes = graph
        .nodes
        .iter()
        .filter_map(|node| {
            let position = *layout.get(&node.path)?;
            let is_active = active_path == Some(node.path.as_str());
            Some(NodeMarker {
                path: node.path.clone(),
                title: node.title.clone(),
                position,
                radius: if is_active {
                    ACTIVE_NODE_RADIUS
                } else {
                    NODE_RADIUS
                },
                is_active,
            })
        })
        .collect();

    Scene { edges, nodes }
}

pub fn summary(graph: &GraphData) -> String {
    format!("{} nodes · {} edges", graph.nodes.len(), graph.edges.len())
}

/// Shown when the backend cut the neighborhood short.
pub fn truncation_notice(graph: &GraphData) -> Option<String> {
    if !graph.truncated {
        return None;
    }
    let total = graph.total_nodes.filter(|total| *total > 0)?;
    Some(format!("Showing {} of {} nodes.", graph.nodes.len(), total))
}
