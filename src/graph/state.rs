use log::{debug, info, warn};

use super::client::GraphFetchError;
use super::types::GraphData;

/// What the panel is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphPhase {
    Closed,
    NoActiveNote,
    Loading,
    /// Fetched with at most the focus node, or the fetch failed.
    Empty,
    Populated,
}

/// Identifies one fetch; only the most recent ticket may update the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub path: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphViewState {
    open: bool,
    active_path: Option<String>,
    graph: Option<GraphData>,
    loading: bool,
    generation: u64,
}

impl GraphViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn active_path(&self) -> Option<&str> {
        self.active_path.as_deref()
    }

    pub fn graph(&self) -> Option<&GraphData> {
        self.graph.as_ref()
    }

    pub fn phase(&self) -> GraphPhase {
        if !self.open {
            return GraphPhase::Closed;
        }
        if self.active_path.is_none() {
            return GraphPhase::NoActiveNote;
        }
        if self.loading {
            return GraphPhase::Loading;
        }
        match &self.graph {
            Some(graph) if graph.nodes.len() > 1 => GraphPhase::Populated,
            _ => GraphPhase::Empty,
        }
    }

    /// Reconciles with the panel's inputs. Returns a ticket when a fetch must
    /// be started; calling again with unchanged inputs is a no-op.
    pub fn sync(&mut self, open: bool, active_path: Option<String>) -> Option<FetchTicket> {
        if !open {
            if self.open {
                self.close();
            }
            self.active_path = active_path;
            return None;
        }
        if !self.open {
            self.active_path = active_path;
            return self.open();
        }
        self.set_active_path(active_path)
    }

    pub fn open(&mut self) -> Option<FetchTicket> {
        if self.open {
            return None;
        }
        self.open = true;
        self.request()
    }

    pub fn close(&mut self) {
        self.open = false;
        self.loading = false;
        self.graph = None;
        // Anything still in flight is now stale.
        self.generation += 1;
    }

    pub fn set_active_path(&mut self, path: Option<String>) -> Option<FetchTicket> {
        if self.active_path == path {
            return None;
        }
        self.active_path = path;
        if !self.open {
            return None;
        }
        self.request()
    }

    fn request(&mut self) -> Option<FetchTicket> {
        self.generation += 1;
        self.graph = None;
        match &self.active_path {
            Some(path) => {
                self.loading = true;
                Some(FetchTicket {
                    generation: self.generation,
                    path: path.clone(),
                })
            }
            None => {
                self.loading = false;
                None
            }
        }
    }

    /// Applies a finished fetch. Returns `false` when the result was stale
    /// and discarded.
    pub fn resolve(
        &mut self,
        ticket: &FetchTicket,
        result: Result<GraphData, GraphFetchError>,
    ) -> bool {
        let current = self.open
            && ticket.generation == self.generation
            && self.active_path.as_deref() == Some(ticket.path.as_str());
        if !current {
            debug!("graph: discarding stale result for {}", ticket.path);
            return false;
        }

        self.loading = false;
        match result {
            Ok(graph) => {
                info!(
                    "graph: {} nodes, {} edges for {}",
                    graph.nodes.len(),
                    graph.edges.len(),
                    ticket.path
                );
                self.graph = Some(graph);
            }
            Err(err) => {
                warn!("graph: failed to load {}: {err}", ticket.path);
                self.graph = None;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::GraphNode;

    fn graph_of(paths: &[&str]) -> GraphData {
        GraphData {
            nodes: paths
                .iter()
                .map(|path| GraphNode {
                    path: path.to_string(),
                    title: path.to_string(),
                })
                .collect(),
            ..GraphData::default()
        }
    }

    #[test]
    fn starts_closed() {
        let state = GraphViewState::new();
        assert_eq!(state.phase(), GraphPhase::Closed);
        assert!(!state.is_loading());
    }

    #[test]
    fn opening_with_active_note_loads() {
        let mut state = GraphViewState::new();
        assert!(state.set_active_path(Some("a.md".into())).is_none());

        let ticket = state.open().expect("fetch requested");
        assert_eq!(ticket.path, "a.md");
        assert_eq!(state.phase(), GraphPhase::Loading);

        assert!(state.resolve(&ticket, Ok(graph_of(&["a.md", "b.md"]))));
        assert_eq!(state.phase(), GraphPhase::Populated);
        assert!(!state.is_loading());
    }

    #[test]
    fn lone_focus_is_empty() {
        let mut state = GraphViewState::new();
        let ticket = state.sync(true, Some("a.md".into())).unwrap();
        state.resolve(&ticket, Ok(graph_of(&["a.md"])));
        assert_eq!(state.phase(), GraphPhase::Empty);
        assert_eq!(state.graph().map(|g| g.nodes.len()), Some(1));
    }

    #[test]
    fn failed_fetch_clears_graph() {
        let mut state = GraphViewState::new();
        let ticket = state.sync(true, Some("a.md".into())).unwrap();
        assert!(state.resolve(&ticket, Err(GraphFetchError::NoVault)));
        assert_eq!(state.phase(), GraphPhase::Empty);
        assert!(state.graph().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn open_without_note() {
        let mut state = GraphViewState::new();
        assert!(state.sync(true, None).is_none());
        assert_eq!(state.phase(), GraphPhase::NoActiveNote);
        assert!(!state.is_loading());
    }

    #[test]
    fn stale_response_never_shown() {
        let mut state = GraphViewState::new();
        let ticket_a = state.sync(true, Some("a.md".into())).unwrap();
        let ticket_b = state.sync(true, Some("b.md".into())).unwrap();

        assert!(!state.resolve(&ticket_a, Ok(graph_of(&["a.md", "x.md"]))));
        assert_eq!(state.phase(), GraphPhase::Loading);
        assert!(state.graph().is_none());

        assert!(state.resolve(&ticket_b, Ok(graph_of(&["b.md", "y.md"]))));
        let shown = state.graph().unwrap();
        assert_eq!(shown.nodes[0].path, "b.md");
    }

    #[test]
    fn late_response_after_switching_back_is_ignored() {
        let mut state = GraphViewState::new();
        let first_a = state.sync(true, Some("a.md".into())).unwrap();
        state.sync(true, Some("b.md".into()));
        let second_a = state.sync(true, Some("a.md".into())).unwrap();

        // Same path, older request.
        assert!(!state.resolve(&first_a, Ok(graph_of(&["a.md", "old.md"]))));
        assert!(state.resolve(&second_a, Ok(graph_of(&["a.md", "new.md"]))));
        assert_eq!(state.graph().unwrap().nodes[1].path, "new.md");
    }

    #[test]
    fn path_change_after_load_refetches() {
        let mut state = GraphViewState::new();
        let ticket_a = state.sync(true, Some("a.md".into())).unwrap();
        assert!(state.resolve(&ticket_a, Ok(graph_of(&["a.md", "b.md"]))));
        assert_eq!(state.phase(), GraphPhase::Populated);

        let ticket_b = state.sync(true, Some("b.md".into())).expect("refetch for b");
        assert_eq!(ticket_b.path, "b.md");
        assert_eq!(state.phase(), GraphPhase::Loading);
        assert!(state.graph().is_none());
    }

    #[test]
    fn path_change_from_empty_refetches() {
        let mut state = GraphViewState::new();
        let ticket_a = state.sync(true, Some("a.md".into())).unwrap();
        state.resolve(&ticket_a, Ok(graph_of(&["a.md"])));
        assert_eq!(state.phase(), GraphPhase::Empty);

        assert!(state.sync(true, Some("c.md".into())).is_some());
        assert_eq!(state.phase(), GraphPhase::Loading);
    }

    #[test]
    fn response_after_close_is_ignored() {
        let mut state = GraphViewState::new();
        let ticket = state.sync(true, Some("a.md".into())).unwrap();
        state.sync(false, Some("a.md".into()));

        assert!(!state.resolve(&ticket, Ok(graph_of(&["a.md", "b.md"]))));
        assert_eq!(state.phase(), GraphPhase::Closed);
        assert!(state.graph().is_none());
    }

    #[test]
    fn reopening_refetches() {
        let mut state = GraphViewState::new();
        let first = state.sync(true, Some("a.md".into())).unwrap();
        state.resolve(&first, Ok(graph_of(&["a.md", "b.md"])));
        state.close();

        let second = state.open().expect("refetch on reopen");
        assert!(second.generation > first.generation);
        assert_eq!(state.phase(), GraphPhase::Loading);
    }

    #[test]
    fn unchanged_inputs_do_not_refetch() {
        let mut state = GraphViewState::new();
        assert!(state.sync(true, Some("a.md".into())).is_some());
        assert!(state.sync(true, Some("a.md".into())).is_none());
    }

    #[test]
    fn path_change_while_closed_waits_for_open() {
        let mut state = GraphViewState::new();
        assert!(state.sync(false, Some("a.md".into())).is_none());
        assert!(state.set_active_path(Some("b.md".into())).is_none());
        assert_eq!(state.open().unwrap().path, "b.md");
    }

    #[test]
    fn clearing_active_note_while_open() {
        let mut state = GraphViewState::new();
        let ticket = state.sync(true, Some("a.md".into())).unwrap();
        assert!(state.set_active_path(None).is_none());
        assert_eq!(state.phase(), GraphPhase::NoActiveNote);
        assert!(!state.resolve(&ticket, Ok(graph_of(&["a.md", "b.md"]))));
    }
}
