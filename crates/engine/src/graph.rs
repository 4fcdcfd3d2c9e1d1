//! Module graph built from resolved, loaded and transformed modules.

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};

use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::{DfsPostOrder, EdgeRef};

/// A module after the resolve/load/transform pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNode {
    /// Resolved id.
    pub id: String,

    /// Transformed code.
    pub code: String,
}

/// Modules keyed by resolved id. Edges run from importer to imported module.
///
/// Nodes are never removed: a changed module is marked stale and reloaded on
/// its next import, so node indices stay valid for the session.
#[derive(Debug, Default)]
pub struct ModuleGraph {
    /// Mapping from resolved id to node index.
    nodes: HashMap<String, NodeIndex>,

    /// The underlying directed graph.
    graph: DiGraph<ModuleNode, ()>,

    /// Modules whose code is out of date.
    stale: HashSet<NodeIndex>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module or replaces its code, keeping existing edges.
    pub fn insert(&mut self, node: ModuleNode) {
        match self.nodes.get(&node.id) {
            Some(&idx) => {
                self.stale.remove(&idx);
                self.graph[idx] = node;
            }
            None => {
                let id = node.id.clone();
                let idx = self.graph.add_node(node);
                self.nodes.insert(id, idx);
            }
        }
    }

    /// Replaces the outgoing edges of `id` with edges to `imports`.
    pub fn set_imports(&mut self, id: &str, imports: &[String]) {
        let Some(&from) = self.nodes.get(id) else {
            return;
        };

        // Highest index first: removal swaps the last edge into the hole.
        let mut edges: Vec<EdgeIndex> = self
            .graph
            .edges_directed(from, Direction::Outgoing)
            .map(|edge| edge.id())
            .collect();
        edges.sort_unstable_by(|a, b| b.cmp(a));
        for edge in edges {
            self.graph.remove_edge(edge);
        }

        for import in imports {
            if let Some(&to) = self.nodes.get(import) {
                self.graph.update_edge(from, to, ());
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&ModuleNode> {
        self.nodes.get(id).map(|&idx| &self.graph[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// True if the module is in the graph and up to date.
    pub fn is_fresh(&self, id: &str) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|idx| !self.stale.contains(idx))
    }

    /// Marks a module stale so the next import reloads it. Returns false if
    /// the module is not in the graph.
    pub fn invalidate(&mut self, id: &str) -> bool {
        match self.nodes.get(id) {
            Some(&idx) => {
                self.stale.insert(idx);
                true
            }
            None => false,
        }
    }

    /// Ids of modules `id` imports, in source order.
    pub fn imports(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Ids of modules that import `id`.
    pub fn importers(&self, id: &str) -> Vec<&str> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Modules reachable from `entry`, each once, dependencies first.
    pub fn walk(&self, entry: &str) -> Vec<&ModuleNode> {
        let Some(&start) = self.nodes.get(entry) else {
            return Vec::new();
        };

        let mut dfs = DfsPostOrder::new(&self.graph, start);
        let mut modules = Vec::new();
        while let Some(idx) = dfs.next(&self.graph) {
            modules.push(&self.graph[idx]);
        }
        modules
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.nodes.get(id) else {
            return Vec::new();
        };

        // petgraph yields the most recently added edge first.
        let mut ids: Vec<&str> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|neighbor| self.graph[neighbor].id.as_str())
            .collect();
        ids.reverse();
        ids
    }
}

/// Lexically removes `.` and `..` components.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    normalized
}
