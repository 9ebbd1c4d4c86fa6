//! Dependency graph of the derived timeline state.
//!
//! Every derived node declares the exact set of nodes it is computed from.
//! When inputs change, only the derived nodes downstream of them are
//! recomputed, in topological order.

use std::collections::BTreeSet;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, strum_macros::EnumIter)]
pub enum Node {
    // inputs
    SearchTerm,
    Density,
    ItemsPerRow,
    ConnectorHeight,

    // derived
    Filtered,
    Visible,
    Layout,
}

impl Node {
    /// The nodes this node is computed from
    pub fn inputs(self) -> &'static [Node] {
        match self {
            Node::SearchTerm | Node::Density | Node::ItemsPerRow | Node::ConnectorHeight => &[],
            Node::Filtered => &[Node::SearchTerm],
            Node::Visible => &[Node::Filtered, Node::Density],
            Node::Layout => &[Node::Visible, Node::ItemsPerRow, Node::ConnectorHeight],
        }
    }

    pub fn is_input(self) -> bool {
        self.inputs().is_empty()
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone)]
pub struct DependencyGraph {
    nodes: Vec<Node>,
    /// Every node, upstream before downstream
    topo_order: Vec<Node>,
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyGraph {
    pub fn new() -> Self {
        use strum::IntoEnumIterator;
        Self::from_nodes(Node::iter().collect())
    }

    fn from_nodes(nodes: Vec<Node>) -> Self {
        let topo_order = topo_sort(&nodes);
        Self { nodes, topo_order }
    }

    pub fn topo_order(&self) -> &[Node] {
        &self.topo_order
    }

    /// Nodes computed directly from `node`
    pub fn downstream(&self, node: Node) -> Vec<Node> {
        self.nodes
            .iter()
            .copied()
            .filter(|n| n.inputs().contains(&node))
            .collect()
    }

    /// Derived nodes that need recomputing after `changed` inputs changed,
    /// in evaluation order.
    pub fn dirty_from(&self, changed: &[Node]) -> Vec<Node> {
        let mut dirty: BTreeSet<Node> = BTreeSet::new();
        let mut stack: Vec<Node> = changed.to_vec();

        while let Some(node) = stack.pop() {
            for next in self.downstream(node) {
                if dirty.insert(next) {
                    stack.push(next);
                }
            }
        }

        self.topo_order
            .iter()
            .copied()
            .filter(|n| dirty.contains(n))
            .collect()
    }

    /// Every derived node, in evaluation order
    pub fn all_derived(&self) -> Vec<Node> {
        self.topo_order
            .iter()
            .copied()
            .filter(|n| !n.is_input())
            .collect()
    }
}

/// Kahn's algorithm. Ties are broken by node order for determinism.
///
/// # Panics
///
/// Panics if the declared inputs form a cycle.
fn topo_sort(nodes: &[Node]) -> Vec<Node> {
    let n = nodes.len();
    let mut in_degree = vec![0usize; n];
    let mut adj: Vec<Vec<Node>> = vec![Vec::new(); n];

    for node in nodes {
        for input in node.inputs() {
            in_degree[node.index()] += 1;
            adj[input.index()].push(*node);
        }
    }

    let mut ready: BTreeSet<Node> = nodes
        .iter()
        .copied()
        .filter(|node| in_degree[node.index()] == 0)
        .collect();

    let mut order = Vec::with_capacity(n);
    while let Some(node) = ready.pop_first() {
        order.push(node);
        for next in &adj[node.index()] {
            in_degree[next.index()] -= 1;
            if in_degree[next.index()] == 0 {
                ready.insert(*next);
            }
        }
    }

    assert_eq!(
        order.len(),
        n,
        "dependency graph has a cycle: only {} of {} nodes ordered",
        order.len(),
        n
    );

    order
}
