use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub path: String,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

/// Local graph as returned by the backend's `get_local_graph`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
    #[serde(default)]
    pub truncated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_nodes: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 680.0,
            height: 420.0,
        }
    }
}

impl CanvasSize {
    pub fn center(self) -> Point {
        Point {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }

    pub fn view_box(self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_payload() {
        let json = r#"{
            "nodes": [{"path": "a.md", "title": "A"}, {"path": "b.md", "title": "B"}],
            "edges": [{"from": "a.md", "to": "b.md"}],
            "truncated": true,
            "totalNodes": 40
        }"#;
        let graph: GraphData = serde_json::from_str(json).unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges[0].to, "b.md");
        assert!(graph.truncated);
        assert_eq!(graph.total_nodes, Some(40));
    }

    #[test]
    fn optional_fields_default() {
        let graph: GraphData = serde_json::from_str(r#"{"nodes": []}"#).unwrap();
        assert!(!graph.truncated);
        assert_eq!(graph.total_nodes, None);
        assert!(graph.edges.is_empty());
    }
}
