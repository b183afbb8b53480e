//! undirected simple graph on the dense vertex range \[0, n\)
//!
//! The adjacency relation is stored as one hashed set per vertex so that the
//! adjacency test, the hottest query of the clique search, runs in expected O(1)
//! whatever the degree distribution is.
//! The graph is built once from an edge sequence and never mutated by the search.

use anyhow::anyhow;

use ahash::AHashSet;

use petgraph::graph::{Graph, IndexType};
use petgraph::{visit::*, Undirected};

/// An undirected simple graph. Vertices are u32 in \[0, nb_nodes\).
/// Self loops are ignored, duplicate edges are idempotent.
pub struct UGraph {
    /// number of vertices
    nb_nodes: usize,
    /// number of distinct undirected edges really inserted
    nb_edges: usize,
    /// adjacency sets, symmetric and irreflexive
    adj: Vec<AHashSet<u32>>,
} // end of struct UGraph

impl UGraph {
    /// allocate a graph on nb_nodes vertices and no edge.
    /// nb_nodes = 0 gives the empty graph (no clique at all); input layers are
    /// expected to have rejected a non positive vertex count before getting here.
    pub fn new(nb_nodes: usize) -> Self {
        let adj = (0..nb_nodes).map(|_| AHashSet::<u32>::new()).collect();
        UGraph {
            nb_nodes,
            nb_edges: 0,
            adj,
        }
    } // end of new

    /// insert the undirected edge (u,v).
    /// returns Ok(true) if the edge is new, Ok(false) for a self loop or an already
    /// present edge, and an error if an endpoint is out of \[0, nb_nodes\).
    /// The caller decides whether an out of range edge is fatal or just skipped.
    pub fn add_edge(&mut self, u: u32, v: u32) -> anyhow::Result<bool> {
        if (u as usize) >= self.nb_nodes || (v as usize) >= self.nb_nodes {
            return Err(anyhow!(
                "add_edge : endpoint out of range, u : {}, v : {}, nb_nodes : {}",
                u,
                v,
                self.nb_nodes
            ));
        }
        if u == v {
            return Ok(false);
        }
        let inserted = self.adj[u as usize].insert(v);
        self.adj[v as usize].insert(u);
        if inserted {
            self.nb_edges += 1;
        }
        Ok(inserted)
    } // end of add_edge

    /// build a graph from an explicit edge list. Any out of range endpoint is an error.
    pub fn from_edges(nb_nodes: usize, edges: &[(u32, u32)]) -> anyhow::Result<Self> {
        let mut graph = UGraph::new(nb_nodes);
        for (u, v) in edges {
            graph.add_edge(*u, *v)?;
        }
        Ok(graph)
    } // end of from_edges

    /// build a graph from an undirected petgraph Graph, keeping node indices.
    /// Edge weights and node data are not needed here and are dropped.
    pub fn from_petgraph<N, E, Ix>(pgraph: &Graph<N, E, Undirected, Ix>) -> Self
    where
        Ix: IndexType,
    {
        let mut graph = UGraph::new(pgraph.node_count());
        for edge in pgraph.edge_references() {
            let u = edge.source().index() as u32;
            let v = edge.target().index() as u32;
            // node indices of a petgraph Graph are dense so this cannot fail
            let _ = graph.add_edge(u, v);
        }
        graph
    } // end of from_petgraph

    /// get number of vertices
    pub fn get_nb_nodes(&self) -> usize {
        self.nb_nodes
    }

    /// get number of distinct edges
    pub fn get_nb_edges(&self) -> usize {
        self.nb_edges
    }

    /// get degree of vertex v in O(1)
    pub fn degree(&self, v: u32) -> usize {
        self.adj[v as usize].len()
    }

    /// get the neighbour set of v. Iteration order over the set is unspecified.
    pub fn neighbours(&self, v: u32) -> &AHashSet<u32> {
        &self.adj[v as usize]
    }

    /// adjacency test in expected O(1)
    pub fn is_adjacent(&self, u: u32, v: u32) -> bool {
        self.adj[u as usize].contains(&v)
    }
} // end of impl UGraph

//==========================================================================================================

// end of mod tests
