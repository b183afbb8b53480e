//! degeneracy ordering by iterated minimum degree peeling
//!
//! We implement the bucket peeling scheme of Batagelj-Zaversnik
//! _An O(m) Algorithm for Cores Decomposition of Networks_ [2003](https://arxiv.org/abs/cs/0310049)
//! as used for clique enumeration by Eppstein-Löffler-Strash
//! _Listing All Maximal Cliques in Sparse Graphs in Near-Optimal Time_ [2010](https://arxiv.org/abs/1006.5440)
//!
//! The vertex extracted at each step has minimum residual degree among the vertices
//! still present, so every vertex has at most `degeneracy` neighbours occurring
//! later in the produced order. This is the property bounding the branching of the
//! clique search seeded along this order.

use cpu_time::ProcessTime;
use std::time::SystemTime;

use crate::graph::UGraph;

/// A peeling order of all vertices together with its inverse permutation and
/// the degeneracy of the graph (the largest residual degree met while peeling).
pub struct DegeneracyOrdering {
    /// vertices in peel order, first peeled first
    order: Vec<u32>,
    /// pos\[v\] is the rank of vertex v in order
    pos: Vec<u32>,
    /// the graph degeneracy
    degeneracy: usize,
} // end of struct DegeneracyOrdering

impl DegeneracyOrdering {
    /// get the order as a slice of vertices
    pub fn get_order(&self) -> &[u32] {
        &self.order
    }

    /// get rank of vertex v in the order
    pub fn position(&self, v: u32) -> usize {
        self.pos[v as usize] as usize
    }

    /// get the slice of ranks, indexed by vertex
    pub fn get_positions(&self) -> &[u32] {
        &self.pos
    }

    /// get graph degeneracy
    pub fn get_degeneracy(&self) -> usize {
        self.degeneracy
    }
} // end of impl DegeneracyOrdering

/// computes the degeneracy ordering of graph in O(n + m).
///
/// Buckets are indexed by residual degree. A vertex is pushed again each time its
/// residual degree decreases; stale bucket entries are recognized by comparing the
/// entry degree with the current one and skipped, so extraction stays amortized O(1).
/// Isolated vertices sit in bucket 0 and are peeled as soon as that bucket is reached.
/// Ties inside a bucket are broken by extraction order, any consistent choice is valid.
pub fn degeneracy_ordering(graph: &UGraph) -> DegeneracyOrdering {
    //
    let cpu_start = ProcessTime::now();
    let sys_start = SystemTime::now();
    //
    let nb_nodes = graph.get_nb_nodes();
    let mut cur_deg: Vec<usize> = (0..nb_nodes).map(|v| graph.degree(v as u32)).collect();
    let mut buckets: Vec<Vec<u32>> = (0..nb_nodes).map(|_| Vec::<u32>::new()).collect();
    for v in 0..nb_nodes {
        buckets[cur_deg[v]].push(v as u32);
    }
    //
    let mut removed = vec![false; nb_nodes];
    let mut order = Vec::<u32>::with_capacity(nb_nodes);
    let mut degeneracy = 0usize;
    let mut d = 0usize;
    //
    while order.len() < nb_nodes {
        while d < buckets.len() && buckets[d].is_empty() {
            d += 1;
        }
        let v = buckets[d].pop().unwrap();
        if removed[v as usize] || cur_deg[v as usize] != d {
            // stale entry, the vertex moved to a lower bucket since it was pushed
            continue;
        }
        removed[v as usize] = true;
        order.push(v);
        degeneracy = degeneracy.max(d);
        for &w in graph.neighbours(v).iter() {
            if !removed[w as usize] {
                cur_deg[w as usize] -= 1;
                buckets[cur_deg[w as usize]].push(w);
            }
        }
        // a decremented neighbour can now sit one bucket below the current one
        d = d.saturating_sub(1);
    } // end of peeling loop
      //
    let mut pos = vec![0u32; nb_nodes];
    for (rank, &v) in order.iter().enumerate() {
        pos[v as usize] = rank as u32;
    }
    //
    log::info!(
        "degeneracy_ordering : nb_nodes {}, nb_edges {}, degeneracy {}, sys time(s) {:.2e} cpu time(s) {:.2e}",
        nb_nodes,
        graph.get_nb_edges(),
        degeneracy,
        sys_start.elapsed().unwrap().as_secs_f64(),
        cpu_start.elapsed().as_secs_f64()
    );
    //
    DegeneracyOrdering {
        order,
        pos,
        degeneracy,
    }
} // end of degeneracy_ordering

//==========================================================================================================

// end of mod tests
