//! maximal clique enumeration
//!
//! Bron-Kerbosch search with pivoting, seeded along a degeneracy ordering as in
//! Eppstein-Löffler-Strash _Listing All Maximal Cliques in Sparse Graphs in Near-Optimal Time_ [2010](https://arxiv.org/abs/1006.5440).
//! The pivot rule (maximize the candidate overlap over P ∪ X) is the one of
//! Tomita-Tanaka-Takahashi [2006](https://doi.org/10.1016/j.tcs.2006.06.015).
//!
//! Each vertex of the order is the root of one independent expansion, so the outer
//! loop can run sequentially or on a rayon pool. Expansions share nothing mutable
//! but the sink, which is locked per reported clique in the parallel driver.
//! Output size is worst case exponential in n (3^(n/3) for Moon-Moser graphs), an
//! optional clique budget aborts the run with an error instead of truncating silently.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use cpu_time::ProcessTime;
use std::time::SystemTime;

use anyhow::anyhow;

use ahash::AHashSet;
use parking_lot::Mutex;
use rayon::prelude::*;

use crate::degeneracy::{degeneracy_ordering, DegeneracyOrdering};
use crate::graph::UGraph;
use crate::sink::CliqueSink;

/// knobs of one enumeration run
#[derive(Copy, Clone, Debug, Default)]
pub struct SearchParams {
    /// distribute the root expansions on a rayon pool
    parallel: bool,
    /// abort the run once more than this many cliques have been reported
    max_cliques: Option<u64>,
} // end of struct SearchParams

impl SearchParams {
    pub fn new(parallel: bool, max_cliques: Option<u64>) -> Self {
        SearchParams {
            parallel,
            max_cliques,
        }
    }

    /// do we run the outer loop in parallel?
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// get the clique budget if any
    pub fn get_max_cliques(&self) -> Option<u64> {
        self.max_cliques
    }
} // end of impl SearchParams

// counts reported cliques and trips once the budget is exceeded.
// Checked between root iterations and between expansion steps, shared across
// workers in the parallel driver, hence the atomics.
struct ReportGate {
    nb_reported: AtomicU64,
    limit: u64,
    tripped: AtomicBool,
}

impl ReportGate {
    fn new(max_cliques: Option<u64>) -> Self {
        ReportGate {
            nb_reported: AtomicU64::new(0),
            limit: max_cliques.unwrap_or(u64::MAX),
            tripped: AtomicBool::new(false),
        }
    }

    fn aborted(&self) -> bool {
        self.tripped.load(Ordering::Relaxed)
    }

    // reserve one report slot. false means the budget is exhausted and the
    // clique must not be forwarded.
    fn try_report(&self) -> bool {
        let already = self.nb_reported.fetch_add(1, Ordering::Relaxed);
        if already >= self.limit {
            self.tripped.store(true, Ordering::Relaxed);
            return false;
        }
        true
    }
} // end of impl ReportGate

// intersection of a P or X set with a neighbour set, iterating the smaller side
fn intersect(set: &AHashSet<u32>, nbrs: &AHashSet<u32>) -> AHashSet<u32> {
    if set.len() <= nbrs.len() {
        set.iter().filter(|w| nbrs.contains(w)).copied().collect()
    } else {
        nbrs.iter().filter(|w| set.contains(w)).copied().collect()
    }
} // end of intersect

// pivot choice : the vertex of P ∪ X with the most neighbours inside P.
// Any maximizer is correct, only the pruning quality depends on the choice.
// Never called with both sets empty, that is the terminal case of expand.
fn choose_pivot(graph: &UGraph, candidates: &AHashSet<u32>, excluded: &AHashSet<u32>) -> u32 {
    let mut best: Option<u32> = None;
    let mut best_count = 0usize;
    for &u in candidates.iter().chain(excluded.iter()) {
        let nbrs = graph.neighbours(u);
        let count = if nbrs.len() <= candidates.len() {
            nbrs.iter().filter(|w| candidates.contains(w)).count()
        } else {
            candidates.iter().filter(|w| nbrs.contains(w)).count()
        };
        if best.is_none() || count > best_count {
            best = Some(u);
            best_count = count;
        }
    }
    best.unwrap()
} // end of choose_pivot

// one Bron-Kerbosch descent. rclique is the clique under construction, extended
// and restored around each recursive call. candidates and excluded are owned by
// this frame, the parent keeps its own copies and only mutates them between
// sibling branches, never across a recursive call.
fn expand<F>(
    graph: &UGraph,
    gate: &ReportGate,
    rclique: &mut Vec<u32>,
    mut candidates: AHashSet<u32>,
    mut excluded: AHashSet<u32>,
    report: &mut F,
) where
    F: FnMut(&[u32]),
{
    if candidates.is_empty() && excluded.is_empty() {
        // rclique cannot be extended and no superset was reported on this path
        if gate.try_report() {
            report(rclique);
        }
        return;
    }
    //
    let pivot = choose_pivot(graph, &candidates, &excluded);
    let pivot_nbrs = graph.neighbours(pivot);
    // neighbours of the pivot need no branch of their own, every maximal clique
    // through them is also reached through some non neighbour of the pivot
    let branch: Vec<u32> = candidates
        .iter()
        .filter(|v| !pivot_nbrs.contains(v))
        .copied()
        .collect();
    //
    for v in branch {
        if gate.aborted() {
            return;
        }
        let v_nbrs = graph.neighbours(v);
        let new_candidates = intersect(&candidates, v_nbrs);
        let new_excluded = intersect(&excluded, v_nbrs);
        rclique.push(v);
        expand(graph, gate, rclique, new_candidates, new_excluded, report);
        rclique.pop();
        // v must not be retried by the next siblings, any clique through it is done
        candidates.remove(&v);
        excluded.insert(v);
    }
} // end of expand

// seed one expansion at root v : candidates are the neighbours occurring after v
// in the order, excluded the ones occurring before. Cliques whose earliest vertex
// in the order is v are found here and nowhere else.
fn expand_root<F>(
    graph: &UGraph,
    ordering: &DegeneracyOrdering,
    v: u32,
    gate: &ReportGate,
    report: &mut F,
) where
    F: FnMut(&[u32]),
{
    let v_pos = ordering.position(v);
    let mut candidates = AHashSet::<u32>::new();
    let mut excluded = AHashSet::<u32>::new();
    for &w in graph.neighbours(v).iter() {
        if ordering.position(w) > v_pos {
            candidates.insert(w);
        } else {
            excluded.insert(w);
        }
    }
    let mut rclique = vec![v];
    expand(graph, gate, &mut rclique, candidates, excluded, report);
} // end of expand_root

/// sequential enumeration of all maximal cliques of graph along ordering.
/// Each clique is forwarded to sink exactly once. An exhausted clique budget
/// surfaces as an error, the sink content is then incomplete.
pub fn maximal_cliques<S>(
    graph: &UGraph,
    ordering: &DegeneracyOrdering,
    params: &SearchParams,
    sink: &mut S,
) -> anyhow::Result<()>
where
    S: CliqueSink,
{
    if ordering.get_order().len() != graph.get_nb_nodes() {
        return Err(anyhow!(
            "maximal_cliques : ordering size {} does not match graph size {}",
            ordering.get_order().len(),
            graph.get_nb_nodes()
        ));
    }
    //
    let cpu_start = ProcessTime::now();
    let sys_start = SystemTime::now();
    let gate = ReportGate::new(params.get_max_cliques());
    //
    let mut report = |clique: &[u32]| sink.collect_clique(clique);
    for &v in ordering.get_order() {
        if gate.aborted() {
            break;
        }
        expand_root(graph, ordering, v, &gate, &mut report);
    }
    //
    log::info!(
        "maximal_cliques sys time(s) {:.2e} cpu time(s) {:.2e}",
        sys_start.elapsed().unwrap().as_secs_f64(),
        cpu_start.elapsed().as_secs_f64()
    );
    if gate.aborted() {
        return Err(anyhow!(
            "maximal_cliques : clique budget exceeded, limit : {}",
            gate.limit
        ));
    }
    Ok(())
} // end of maximal_cliques

/// parallel enumeration, one rayon task per root of the ordering.
/// Root expansions are independent, they share the immutable graph and ordering
/// only, so the sole synchronization point is the sink lock taken per clique.
pub fn maximal_cliques_parallel<S>(
    graph: &UGraph,
    ordering: &DegeneracyOrdering,
    params: &SearchParams,
    sink: &mut S,
) -> anyhow::Result<()>
where
    S: CliqueSink + Send,
{
    if ordering.get_order().len() != graph.get_nb_nodes() {
        return Err(anyhow!(
            "maximal_cliques_parallel : ordering size {} does not match graph size {}",
            ordering.get_order().len(),
            graph.get_nb_nodes()
        ));
    }
    //
    let cpu_start = ProcessTime::now();
    let sys_start = SystemTime::now();
    let gate = ReportGate::new(params.get_max_cliques());
    let shared_sink = Mutex::new(sink);
    //
    ordering.get_order().par_iter().for_each(|&v| {
        if gate.aborted() {
            return;
        }
        let mut report = |clique: &[u32]| {
            shared_sink.lock().collect_clique(clique);
        };
        expand_root(graph, ordering, v, &gate, &mut report);
    });
    //
    log::info!(
        "maximal_cliques_parallel sys time(s) {:.2e} cpu time(s) {:.2e}",
        sys_start.elapsed().unwrap().as_secs_f64(),
        cpu_start.elapsed().as_secs_f64()
    );
    if gate.aborted() {
        return Err(anyhow!(
            "maximal_cliques_parallel : clique budget exceeded, limit : {}",
            gate.limit
        ));
    }
    Ok(())
} // end of maximal_cliques_parallel

/// computes the degeneracy ordering and runs the enumeration in one call,
/// dispatching on params. This is the entry point used by the cliques binary.
pub fn enumerate_maximal_cliques<S>(
    graph: &UGraph,
    params: &SearchParams,
    sink: &mut S,
) -> anyhow::Result<()>
where
    S: CliqueSink + Send,
{
    let ordering = degeneracy_ordering(graph);
    if params.is_parallel() {
        maximal_cliques_parallel(graph, &ordering, params, sink)
    } else {
        maximal_cliques(graph, &ordering, params, sink)
    }
} // end of enumerate_maximal_cliques

//==========================================================================================================

#[cfg(test)]
mod tests {

    use super::*;
    use crate::sink::{CliqueCollector, CliqueStats};
    use crate::tools::randgraph::gnp_random_graph;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // cliques as sorted sets, list sorted, to compare independently of discovery order
    fn normalize(cliques: &[Vec<u32>]) -> Vec<Vec<u32>> {
        let mut normalized: Vec<Vec<u32>> = cliques
            .iter()
            .map(|c| {
                let mut c = c.clone();
                c.sort_unstable();
                c
            })
            .collect();
        normalized.sort();
        normalized
    } // end of normalize

    fn is_clique(graph: &UGraph, verts: &[u32]) -> bool {
        for (i, &u) in verts.iter().enumerate() {
            for &v in &verts[i + 1..] {
                if !graph.is_adjacent(u, v) {
                    return false;
                }
            }
        }
        true
    } // end of is_clique

    // exhaustive reference for small n, every vertex subset is examined
    fn brute_force_cliques(graph: &UGraph) -> Vec<Vec<u32>> {
        let nb_nodes = graph.get_nb_nodes();
        assert!(nb_nodes <= 16);
        let mut cliques = Vec::new();
        for mask in 1u32..(1 << nb_nodes) {
            let verts: Vec<u32> = (0..nb_nodes as u32)
                .filter(|v| mask & (1u32 << v) != 0)
                .collect();
            if !is_clique(graph, &verts) {
                continue;
            }
            let maximal = (0..nb_nodes as u32)
                .filter(|v| !verts.contains(v))
                .all(|v| !verts.iter().all(|&u| graph.is_adjacent(u, v)));
            if maximal {
                cliques.push(verts);
            }
        }
        cliques.sort();
        cliques
    } // end of brute_force_cliques

    fn enumerate_normalized(graph: &UGraph) -> Vec<Vec<u32>> {
        let ordering = degeneracy_ordering(graph);
        let mut collector = CliqueCollector::new();
        maximal_cliques(graph, &ordering, &SearchParams::default(), &mut collector).unwrap();
        normalize(collector.get_cliques())
    } // end of enumerate_normalized

    #[test]
    fn cliques_triangle_plus_isolated() {
        log_init_test();
        //
        let graph = UGraph::from_edges(4, &[(0, 1), (1, 2), (0, 2)]).unwrap();
        let ordering = degeneracy_ordering(&graph);
        let mut collector = CliqueCollector::new();
        maximal_cliques(&graph, &ordering, &SearchParams::default(), &mut collector).unwrap();
        //
        let cliques = normalize(collector.get_cliques());
        assert_eq!(cliques, vec![vec![0, 1, 2], vec![3]]);
        let stats = collector.get_stats();
        assert_eq!(stats.get_nb_cliques(), 2);
        assert_eq!(stats.get_histogram().get(&3), Some(&1));
        assert_eq!(stats.get_histogram().get(&1), Some(&1));
    } // end of cliques_triangle_plus_isolated

    #[test]
    fn cliques_path_p4() {
        log_init_test();
        //
        let graph = UGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let ordering = degeneracy_ordering(&graph);
        let mut collector = CliqueCollector::new();
        maximal_cliques(&graph, &ordering, &SearchParams::default(), &mut collector).unwrap();
        //
        let cliques = normalize(collector.get_cliques());
        assert_eq!(cliques, vec![vec![0, 1], vec![1, 2], vec![2, 3]]);
        let stats = collector.get_stats();
        assert_eq!(stats.get_nb_cliques(), 3);
        assert_eq!(stats.get_histogram().get(&2), Some(&3));
    } // end of cliques_path_p4

    #[test]
    fn cliques_complete_graph() {
        log_init_test();
        //
        let nb_nodes = 6;
        let mut edges = Vec::new();
        for u in 0..nb_nodes as u32 {
            for v in (u + 1)..nb_nodes as u32 {
                edges.push((u, v));
            }
        }
        let graph = UGraph::from_edges(nb_nodes, &edges).unwrap();
        let cliques = enumerate_normalized(&graph);
        assert_eq!(cliques.len(), 1);
        assert_eq!(cliques[0], (0..nb_nodes as u32).collect::<Vec<u32>>());
    } // end of cliques_complete_graph

    #[test]
    fn cliques_no_edges() {
        log_init_test();
        //
        // every vertex is a singleton maximal clique
        let graph = UGraph::new(5);
        let cliques = enumerate_normalized(&graph);
        assert_eq!(cliques.len(), 5);
        for (v, clique) in cliques.iter().enumerate() {
            assert_eq!(clique, &vec![v as u32]);
        }
        // and the empty graph has none
        let graph = UGraph::new(0);
        assert_eq!(enumerate_normalized(&graph).len(), 0);
    } // end of cliques_no_edges

    #[test]
    fn cliques_match_brute_force() {
        log_init_test();
        //
        for seed in 0..8u64 {
            let graph = gnp_random_graph(11, 0.4, seed);
            let cliques = enumerate_normalized(&graph);
            let reference = brute_force_cliques(&graph);
            // completeness, soundness and no duplicate in one comparison
            assert_eq!(cliques, reference, "seed {}", seed);
        }
    } // end of cliques_match_brute_force

    #[test]
    fn cliques_relabel_invariance() {
        log_init_test();
        //
        let nb_nodes = 10usize;
        let graph = gnp_random_graph(nb_nodes, 0.5, 17);
        // relabel v -> (v * 7 + 3) mod 10, a permutation of [0, 10)
        let relabel = |v: u32| -> u32 { (v * 7 + 3) % nb_nodes as u32 };
        let mut permuted = UGraph::new(nb_nodes);
        for u in 0..nb_nodes as u32 {
            for &v in graph.neighbours(u).iter() {
                permuted.add_edge(relabel(u), relabel(v)).unwrap();
            }
        }
        //
        let cliques = enumerate_normalized(&graph);
        let relabeled: Vec<Vec<u32>> = cliques
            .iter()
            .map(|c| c.iter().map(|&v| relabel(v)).collect())
            .collect();
        assert_eq!(normalize(&relabeled), enumerate_normalized(&permuted));
    } // end of cliques_relabel_invariance

    #[test]
    fn cliques_parallel_matches_sequential() {
        log_init_test();
        //
        let graph = gnp_random_graph(60, 0.2, 23);
        let ordering = degeneracy_ordering(&graph);
        //
        let mut sequential = CliqueCollector::new();
        maximal_cliques(
            &graph,
            &ordering,
            &SearchParams::new(false, None),
            &mut sequential,
        )
        .unwrap();
        let mut parallel = CliqueCollector::new();
        maximal_cliques_parallel(
            &graph,
            &ordering,
            &SearchParams::new(true, None),
            &mut parallel,
        )
        .unwrap();
        //
        assert_eq!(
            normalize(sequential.get_cliques()),
            normalize(parallel.get_cliques())
        );
        assert_eq!(
            sequential.get_stats().get_nb_cliques(),
            parallel.get_stats().get_nb_cliques()
        );
        assert_eq!(
            sequential.get_stats().get_histogram(),
            parallel.get_stats().get_histogram()
        );
    } // end of cliques_parallel_matches_sequential

    #[test]
    fn cliques_budget_exhaustion() {
        log_init_test();
        //
        let graph = gnp_random_graph(30, 0.3, 5);
        let mut stats = CliqueStats::new();
        let res = enumerate_maximal_cliques(&graph, &SearchParams::new(false, Some(2)), &mut stats);
        assert!(res.is_err());
        log::info!("got expected error : {:?}", res.err());
        // nothing beyond the budget was forwarded
        assert!(stats.get_nb_cliques() <= 2);
    } // end of cliques_budget_exhaustion

    #[test]
    fn cliques_convenience_driver() {
        log_init_test();
        //
        let graph = UGraph::from_edges(4, &[(0, 1), (1, 2), (0, 2)]).unwrap();
        let mut stats = CliqueStats::new();
        enumerate_maximal_cliques(&graph, &SearchParams::new(true, None), &mut stats).unwrap();
        assert_eq!(stats.get_nb_cliques(), 2);
        assert_eq!(stats.get_max_size(), 3);
    } // end of cliques_convenience_driver
} // end of mod tests
