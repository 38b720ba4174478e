//! Undirected weighted graph built from edge records
//!
//! Vertices live in a `Vec` and are addressed by [`VertexIndex`]. Two
//! [`AvlTree`]s de-duplicate the input: one maps vertex identities to their
//! index, the other records every edge seen so far regardless of direction.
//! A repeated edge is dropped even if it carries a different weight.
//!
//! Each [`Vertex`] also carries the working state Prim's algorithm reads and
//! writes (key, predecessor, visited flag, heap handle, successors).

use crate::avl::AvlTree;
use crate::binomial::BinomialHandle;
use crate::scanner::EdgeRecord;
use std::borrow::Borrow;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Vertex identity as it appears in the edge file
pub type VertexId = i64;

/// Edge weight
pub type Weight = u32;

/// Sum of edge weights
///
/// A tree of `u32` weights cannot overflow it.
pub type TotalWeight = u64;

/// Position of a vertex in [`Graph::vertices`]
pub type VertexIndex = usize;

/// Best known connecting weight of a vertex
///
/// `Finite` sorts before `Unreachable`, so the sentinel compares greater than
/// every real weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Key {
    Finite(Weight),
    #[default]
    Unreachable,
}

/// A vertex and its adjacency
#[derive(Debug, Clone)]
pub struct Vertex {
    pub id: VertexId,
    pub key: Key,
    pub predecessor: Option<VertexIndex>,
    pub visited: bool,
    /// Neighbor indices, parallel to `weights`
    pub neighbors: Vec<VertexIndex>,
    pub weights: Vec<Weight>,
    /// Live heap entry while the vertex is queued
    pub heap_handle: Option<BinomialHandle>,
    /// Tree children in the order they were settled
    pub successors: Vec<VertexIndex>,
}

impl Vertex {
    fn new(id: VertexId) -> Self {
        Self {
            id,
            key: Key::Unreachable,
            predecessor: None,
            visited: false,
            neighbors: Vec::new(),
            weights: Vec::new(),
            heap_handle: None,
            successors: Vec::new(),
        }
    }

    /// Neighbors paired with the weight of the connecting edge
    pub fn adjacency(&self) -> impl Iterator<Item = (VertexIndex, Weight)> + '_ {
        self.neighbors.iter().copied().zip(self.weights.iter().copied())
    }

    pub(crate) fn reset(&mut self) {
        self.key = Key::Unreachable;
        self.predecessor = None;
        self.visited = false;
        self.heap_handle = None;
        self.successors.clear();
    }
}

/// Identity → index entry of the vertex registry
struct VertexSlot {
    id: VertexId,
    index: VertexIndex,
}

impl PartialEq for VertexSlot {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for VertexSlot {}

impl PartialOrd for VertexSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VertexSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Borrow<VertexId> for VertexSlot {
    fn borrow(&self) -> &VertexId {
        &self.id
    }
}

/// An undirected edge
///
/// Edges compare by their unordered endpoint pair; the weight is not part of
/// the identity.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub endpoint1: VertexId,
    pub endpoint2: VertexId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(endpoint1: VertexId, endpoint2: VertexId, weight: Weight) -> Self {
        Self {
            endpoint1,
            endpoint2,
            weight,
        }
    }

    fn endpoints(&self) -> (VertexId, VertexId) {
        if self.endpoint1 <= self.endpoint2 {
            (self.endpoint1, self.endpoint2)
        } else {
            (self.endpoint2, self.endpoint1)
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.endpoints() == other.endpoints()
    }
}

impl Eq for Edge {}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.endpoints().cmp(&other.endpoints())
    }
}

/// Graph under construction and, later, under Prim's algorithm
///
/// # Example
///
/// ```rust
/// use prim_mst::graph::Graph;
///
/// let mut graph = Graph::new();
/// assert!(graph.add_edge(1, 2, 3));
/// assert!(!graph.add_edge(2, 1, 9));
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    registry: AvlTree<VertexSlot>,
    edges: AvlTree<Edge>,
    source: Option<VertexIndex>,
}

impl Graph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from parsed records
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        let mut graph = Self::new();
        for record in records {
            graph.add_edge(record.u, record.v, record.weight);
        }
        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "graph built"
        );
        graph
    }

    /// Adds an undirected edge unless one between the same endpoints exists
    ///
    /// Returns true if the edge was added. The first endpoint of the first
    /// edge ever added becomes the default source. A self-loop registers its
    /// vertex but never joins an adjacency list.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, weight: Weight) -> bool {
        let edge = Edge::new(u, v, weight);
        if self.edges.contains(&edge) {
            trace!(u, v, weight, "duplicate edge ignored");
            return false;
        }
        self.edges.insert(edge);

        let a = self.add_vertex(u);
        let b = self.add_vertex(v);
        if self.source.is_none() {
            self.source = Some(a);
        }
        if a == b {
            trace!(u, "self-loop ignored");
            return true;
        }

        self.vertices[a].neighbors.push(b);
        self.vertices[a].weights.push(weight);
        self.vertices[b].neighbors.push(a);
        self.vertices[b].weights.push(weight);
        true
    }

    fn add_vertex(&mut self, id: VertexId) -> VertexIndex {
        if let Some(slot) = self.registry.find(&id) {
            return slot.index;
        }
        let index = self.vertices.len();
        self.vertices.push(Vertex::new(id));
        self.registry.insert(VertexSlot { id, index });
        index
    }

    /// Index of the vertex with identity `id`
    pub fn find(&self, id: VertexId) -> Option<VertexIndex> {
        self.registry.find(&id).map(|slot| slot.index)
    }

    /// Returns true if the graph has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of distinct vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct edges, self-loops included
    pub fn edge_count(&self) -> usize {
        self.edges.size()
    }

    /// Default source: the first endpoint of the first edge
    pub fn source(&self) -> Option<VertexIndex> {
        self.source
    }

    /// All vertices in insertion order
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The vertex at `index`
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self.vertices[index]
    }

    pub(crate) fn vertex_mut(&mut self, index: VertexIndex) -> &mut Vertex {
        &mut self.vertices[index]
    }

    /// Weight of the stored edge between `u` and `v`
    pub fn edge_weight(&self, u: VertexId, v: VertexId) -> Option<Weight> {
        self.edges.find(&Edge::new(u, v, 0)).map(|edge| edge.weight)
    }

    pub(crate) fn reset(&mut self) {
        for vertex in &mut self.vertices {
            vertex.reset();
        }
    }
}
