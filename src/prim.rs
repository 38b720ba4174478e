//! Prim's minimum spanning tree over a [`BinomialHeap`]
//!
//! Every vertex is queued up front at the unreachable sentinel, and the
//! source is then decreased to zero. Each pop settles the cheapest vertex and
//! relaxes its unsettled neighbors through their stable heap handles.
//!
//! ```text
//! unvisited ──seed──▶ queued(∞) ──relax──▶ relaxed(w) ──pop──▶ settled
//!                          └──────────────────pop (∞): stop, rest unreachable
//! ```
//!
//! Heap priorities are `(key, vertex id)`, so vertices with equal keys
//! settle in ascending identity order. A neighbor's predecessor is only
//! replaced by a strictly lighter edge; on a tie the first one found stays.
//!
//! # Example
//!
//! ```rust
//! use prim_mst::graph::Graph;
//! use prim_mst::prim::minimum_spanning_tree;
//!
//! let mut graph = Graph::new();
//! graph.add_edge(1, 2, 1);
//! graph.add_edge(2, 3, 2);
//! graph.add_edge(3, 4, 1);
//! graph.add_edge(1, 4, 4);
//!
//! let tree = minimum_spanning_tree(&mut graph).unwrap();
//! assert_eq!(tree.total_weight(), 4);
//! assert_eq!(tree.to_string(), "0: 1\n1: 2(1)1\n2: 3(2)2\n3: 4(3)1\nweight: 4");
//! ```

use crate::binomial::BinomialHeap;
use crate::graph::{Graph, Key, TotalWeight, VertexId, VertexIndex, Weight};
use std::fmt;
use tracing::{debug, trace};

type Priority = (Key, VertexId);

/// One edge of the spanning tree, written `child(parent)weight`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEdge {
    pub child: VertexId,
    pub parent: VertexId,
    pub weight: Weight,
}

impl fmt::Display for TreeEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}){}", self.child, self.parent, self.weight)
    }
}

/// Spanning tree of the source's component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimumSpanningTree {
    source: VertexId,
    /// `levels[d]` holds the edges whose child sits at depth `d + 1`
    levels: Vec<Vec<TreeEdge>>,
    total_weight: TotalWeight,
}

impl MinimumSpanningTree {
    /// Root of the tree
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Tree edges grouped by the depth of their child, starting at depth 1
    pub fn levels(&self) -> &[Vec<TreeEdge>] {
        &self.levels
    }

    /// All tree edges, level by level
    pub fn edges(&self) -> impl Iterator<Item = &TreeEdge> {
        self.levels.iter().flatten()
    }

    /// Sum of the tree edge weights
    pub fn total_weight(&self) -> TotalWeight {
        self.total_weight
    }

    /// Number of vertices spanned, the source included
    pub fn len(&self) -> usize {
        1 + self.levels.iter().map(Vec::len).sum::<usize>()
    }

    /// Always false: a tree contains at least its source
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Identities of all spanned vertices, source first
    pub fn vertices(&self) -> Vec<VertexId> {
        std::iter::once(self.source)
            .chain(self.edges().map(|edge| edge.child))
            .collect()
    }
}

impl fmt::Display for MinimumSpanningTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "0: {}", self.source)?;
        for (depth, level) in self.levels.iter().enumerate() {
            write!(f, "{}:", depth + 1)?;
            for edge in level {
                write!(f, " {edge}")?;
            }
            writeln!(f)?;
        }
        write!(f, "weight: {}", self.total_weight)
    }
}

/// MST grown from the graph's default source; `None` for an empty graph
pub fn minimum_spanning_tree(graph: &mut Graph) -> Option<MinimumSpanningTree> {
    let source = graph.source()?;
    Some(grow(graph, source))
}

/// MST grown from the vertex with identity `source`
///
/// Returns `None` if no such vertex exists.
pub fn minimum_spanning_tree_from(
    graph: &mut Graph,
    source: VertexId,
) -> Option<MinimumSpanningTree> {
    let source = graph.find(source)?;
    Some(grow(graph, source))
}

fn grow(graph: &mut Graph, source: VertexIndex) -> MinimumSpanningTree {
    graph.reset();

    let mut heap: BinomialHeap<VertexIndex, Priority> = BinomialHeap::new();
    for index in 0..graph.vertex_count() {
        let id = graph.vertex(index).id;
        let handle = heap.insert((Key::Unreachable, id), index);
        graph.vertex_mut(index).heap_handle = Some(handle);
    }
    relax(graph, &mut heap, source, Key::Finite(0), None);

    let mut total_weight = 0;
    while let Some(((key, id), u)) = heap.delete_min() {
        graph.vertex_mut(u).heap_handle = None;
        let Key::Finite(weight) = key else {
            debug!(
                vertex = id,
                unreachable = heap.len() + 1,
                "remaining vertices are not connected to the source"
            );
            break;
        };

        let vertex = graph.vertex_mut(u);
        vertex.visited = true;
        if let Some(parent) = vertex.predecessor {
            graph.vertex_mut(parent).successors.push(u);
            total_weight += TotalWeight::from(weight);
        }
        trace!(vertex = id, weight, "settled");

        for i in 0..graph.vertex(u).neighbors.len() {
            let neighbor = graph.vertex(u).neighbors[i];
            let weight = Key::Finite(graph.vertex(u).weights[i]);
            let candidate = graph.vertex(neighbor);
            if !candidate.visited && weight < candidate.key {
                relax(graph, &mut heap, neighbor, weight, Some(u));
            }
        }
    }

    for index in 0..graph.vertex_count() {
        graph.vertex_mut(index).heap_handle = None;
    }

    let tree = collect_levels(graph, source, total_weight);
    debug!(
        source = tree.source,
        spanned = tree.len(),
        weight = tree.total_weight,
        "spanning tree complete"
    );
    tree
}

/// Lowers a queued vertex's key and records where the edge came from
fn relax(
    graph: &mut Graph,
    heap: &mut BinomialHeap<VertexIndex, Priority>,
    index: VertexIndex,
    key: Key,
    predecessor: Option<VertexIndex>,
) {
    let vertex = graph.vertex_mut(index);
    vertex.key = key;
    vertex.predecessor = predecessor;
    let handle = vertex
        .heap_handle
        .expect("unsettled vertex is still queued");
    heap.decrease_key(&handle, (key, vertex.id))
        .expect("relaxation only ever lowers a queued key");
}

/// Walks successor lists breadth-first from the source
fn collect_levels(graph: &Graph, source: VertexIndex, total_weight: TotalWeight) -> MinimumSpanningTree {
    let mut levels = Vec::new();
    let mut frontier = vec![source];
    loop {
        let mut next = Vec::new();
        let mut level = Vec::new();
        for &parent in &frontier {
            for &child in &graph.vertex(parent).successors {
                let weight = match graph.vertex(child).key {
                    Key::Finite(weight) => weight,
                    Key::Unreachable => unreachable!("settled vertex has a finite key"),
                };
                level.push(TreeEdge {
                    child: graph.vertex(child).id,
                    parent: graph.vertex(parent).id,
                    weight,
                });
                next.push(child);
            }
        }
        if level.is_empty() {
            break;
        }
        levels.push(level);
        frontier = next;
    }

    MinimumSpanningTree {
        source: graph.vertex(source).id,
        levels,
        total_weight,
    }
}
