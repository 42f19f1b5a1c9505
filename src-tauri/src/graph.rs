//! Builds the 1-hop link neighborhood of a note from the vault's wiki links.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::vault::{file_stem, normalize_link_key, normalize_rel_path, strip_md, VaultNote};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub path: String,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub truncated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_nodes: Option<usize>,
}

/// Note part of `target#heading|alias`.
fn wikilink_target(inner: &str) -> &str {
    let target_and_heading = inner.split_once('|').map_or(inner, |(left, _)| left);
    target_and_heading
        .split_once('#')
        .map_or(target_and_heading, |(left, _)| left)
}

/// Targets of every `[[target#heading|alias]]` in `content`, in order.
pub fn extract_link_targets(content: &str) -> Vec<String> {
    static WIKI_RE: OnceLock<Regex> = OnceLock::new();
    let wiki_re = WIKI_RE.get_or_init(|| Regex::new(r"\[\[([^\]\n]+)\]\]").unwrap());

    wiki_re
        .captures_iter(content)
        .filter_map(|caps| {
            let inner = caps.get(1)?.as_str();
            let target = wikilink_target(inner).trim();
            (!target.is_empty()).then(|| target.to_string())
        })
        .collect()
}

/// First `# ` heading, else the file stem.
pub fn note_title(path: &str, content: &str) -> String {
    content
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| file_stem(path))
}

/// Case-insensitive lookup of link targets against note paths.
pub struct LinkResolver<'a> {
    by_path: HashMap<String, &'a str>,
    by_stem: HashMap<String, Vec<&'a str>>,
}

impl<'a> LinkResolver<'a> {
    pub fn new(notes: &'a [VaultNote]) -> Self {
        let mut by_path = HashMap::new();
        let mut by_stem: HashMap<String, Vec<&'a str>> = HashMap::new();
        for note in notes {
            by_path.insert(normalize_link_key(&note.path), note.path.as_str());
            by_path
                .entry(normalize_link_key(&strip_md(&note.path)))
                .or_insert(note.path.as_str());
            by_stem
                .entry(file_stem(&note.path).to_ascii_lowercase())
                .or_default()
                .push(note.path.as_str());
        }
        Self { by_path, by_stem }
    }

    /// Exact path (with or without `.md`) wins; a bare name resolves only
    /// when exactly one note carries that stem.
    pub fn resolve(&self, target: &str) -> Option<&'a str> {
        let key = normalize_link_key(target);
        if let Some(path) = self.by_path.get(&key) {
            return Some(*path);
        }
        match self.by_stem.get(&file_stem(&key)).map(Vec::as_slice) {
            Some([only]) => Some(*only),
            _ => None,
        }
    }
}

/// Focus note plus everything it links to or is linked from.
///
/// Neighbors are ordered by path. When more than `node_limit` nodes would be
/// returned, neighbors are cut and `total_nodes` reports the full count.
/// Edges are every resolved link between retained nodes.
pub fn build_local_graph(notes: &[VaultNote], focus: &str, node_limit: usize) -> GraphData {
    let focus = normalize_rel_path(focus);
    let resolver = LinkResolver::new(notes);

    let mut links: BTreeSet<(&str, &str)> = BTreeSet::new();
    for note in notes {
        for target in extract_link_targets(&note.content) {
            if let Some(resolved) = resolver.resolve(&target) {
                if resolved != note.path {
                    links.insert((note.path.as_str(), resolved));
                }
            }
        }
    }

    let neighbors: BTreeSet<&str> = links
        .iter()
        .filter_map(|&(from, to)| {
            if from == focus {
                Some(to)
            } else if to == focus {
                Some(from)
            } else {
                None
            }
        })
        .collect();

    let total = neighbors.len() + 1;
    let keep = node_limit.max(1) - 1;
    let truncated = neighbors.len() > keep;
    let kept: Vec<&str> = neighbors.into_iter().take(keep).collect();

    let titles: HashMap<&str, String> = notes
        .iter()
        .map(|note| (note.path.as_str(), note_title(&note.path, &note.content)))
        .collect();
    let title_of = |path: &str| {
        titles
            .get(path)
            .cloned()
            .unwrap_or_else(|| file_stem(path))
    };

    let mut nodes = Vec::with_capacity(kept.len() + 1);
    nodes.push(GraphNode {
        path: focus.clone(),
        title: title_of(focus.as_str()),
    });
    nodes.extend(kept.iter().map(|&path| GraphNode {
        path: path.to_string(),
        title: title_of(path),
    }));

    let retained: BTreeSet<&str> = nodes.iter().map(|node| node.path.as_str()).collect();
    let edges = links
        .iter()
        .filter(|(from, to)| retained.contains(from) && retained.contains(to))
        .map(|(from, to)| GraphEdge {
            from: from.to_string(),
            to: to.to_string(),
        })
        .collect();

    GraphData {
        nodes,
        edges,
        truncated,
        total_nodes: truncated.then_some(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(path: &str, content: &str) -> VaultNote {
        VaultNote {
            path: path.to_string(),
            content: content.to_string(),
        }
    }

    fn paths(graph: &GraphData) -> Vec<&str> {
        graph.nodes.iter().map(|node| node.path.as_str()).collect()
    }

    #[test]
    fn extracts_targets_without_heading_or_alias() {
        let targets = extract_link_targets("[[A]] and [[dir/B#Part|shown]] and [[ ]] [[C|]]");
        assert_eq!(targets, vec!["A", "dir/B", "C"]);
    }

    #[test]
    fn title_prefers_first_heading() {
        assert_eq!(note_title("x/Note.md", "intro\n# Real Title\n# Other"), "Real Title");
        assert_eq!(note_title("x/Note.md", "no heading"), "Note");
    }

    #[test]
    fn resolver_matches_paths_and_unique_stems() {
        let notes = vec![
            note("Welcome.md", ""),
            note("projects/Alpha.md", ""),
            note("a/Dup.md", ""),
            note("b/Dup.md", ""),
        ];
        let resolver = LinkResolver::new(&notes);
        assert_eq!(resolver.resolve("welcome"), Some("Welcome.md"));
        assert_eq!(resolver.resolve("Projects/Alpha.md"), Some("projects/Alpha.md"));
        assert_eq!(resolver.resolve("alpha"), Some("projects/Alpha.md"));
        assert_eq!(resolver.resolve("a/Dup"), Some("a/Dup.md"));
        assert_eq!(resolver.resolve("Dup"), None);
        assert_eq!(resolver.resolve("Missing"), None);
    }

    #[test]
    fn collects_outgoing_and_incoming_neighbors() {
        let notes = vec![
            note("focus.md", "# Focus\nsee [[b]] and [[missing]]"),
            note("a.md", "back to [[focus]]"),
            note("b.md", "links [[a]]"),
            note("c.md", "unrelated [[b]]"),
        ];
        let graph = build_local_graph(&notes, "focus.md", 50);

        assert_eq!(paths(&graph), vec!["focus.md", "a.md", "b.md"]);
        assert_eq!(graph.nodes[0].title, "Focus");
        assert!(!graph.truncated);
        assert_eq!(graph.total_nodes, None);

        let edges: Vec<(&str, &str)> = graph
            .edges
            .iter()
            .map(|edge| (edge.from.as_str(), edge.to.as_str()))
            .collect();
        assert_eq!(
            edges,
            vec![("a.md", "focus.md"), ("b.md", "a.md"), ("focus.md", "b.md")]
        );
    }

    #[test]
    fn truncates_to_node_limit() {
        let mut notes = vec![note(
            "hub.md",
            &(0..10).map(|i| format!("[[n{i}]] ")).collect::<String>(),
        )];
        notes.extend((0..10).map(|i| note(&format!("n{i}.md"), "")));

        let graph = build_local_graph(&notes, "hub.md", 5);
        assert_eq!(graph.nodes.len(), 5);
        assert!(graph.truncated);
        assert_eq!(graph.total_nodes, Some(11));
        assert_eq!(graph.edges.len(), 4);
        assert!(graph
            .edges
            .iter()
            .all(|edge| graph.nodes.iter().any(|node| node.path == edge.to)));
    }

    #[test]
    fn unknown_focus_yields_lone_node() {
        let notes = vec![note("a.md", "[[b]]"), note("b.md", "")];
        let graph = build_local_graph(&notes, "ghost.md", 50);
        assert_eq!(paths(&graph), vec!["ghost.md"]);
        assert_eq!(graph.nodes[0].title, "ghost");
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn self_links_are_dropped() {
        let notes = vec![note("a.md", "[[a]] [[A.md]]")];
        let graph = build_local_graph(&notes, "a.md", 50);
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn serializes_camel_case() {
        let graph = GraphData {
            truncated: true,
            total_nodes: Some(3),
            ..GraphData::default()
        };
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["totalNodes"], 3);
        assert_eq!(json["truncated"], true);
    }
}
