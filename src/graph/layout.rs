use std::collections::HashMap;
use std::f64::consts::PI;

use super::types::{CanvasSize, GraphNode, Point};

/// Fraction of the shorter canvas side used as the neighbor ring radius.
pub const RING_RATIO: f64 = 0.32;

pub type Layout = HashMap<String, Point>;

/// Focus at the canvas center, every other node on one ring at equal angles,
/// in the order given. Angle 0 points along +x.
pub fn radial_layout(nodes: &[GraphNode], focus: Option<&str>, canvas: CanvasSize) -> Layout {
    let mut positions = Layout::new();
    let Some(focus) = focus else {
        return positions;
    };

    let center = canvas.center();
    positions.insert(focus.to_string(), center);

    let neighbors: Vec<&GraphNode> = nodes.iter().filter(|node| node.path != focus).collect();
    if neighbors.is_empty() {
        return positions;
    }

    let radius = canvas.width.min(canvas.height) * RING_RATIO;
    let count = neighbors.len() as f64;
    for (index, node) in neighbors.into_iter().enumerate() {
        let angle = (index as f64 / count) * PI * 2.0;
        positions.insert(
            node.path.clone(),
            Point {
                x: center.x + angle.cos() * radius,
                y: center.y + angle.sin() * radius,
            },
        );
    }
    positions
}
