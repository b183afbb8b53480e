//! seeded random graph generation, used by tests and benchmarks to cross check
//! the enumeration against a brute force reference

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::graph::UGraph;

/// Erdös-Rényi G(n,p) : each of the n(n-1)/2 possible edges is present with
/// probability p, independently. The generator is seeded so runs are reproducible.
pub fn gnp_random_graph(nb_nodes: usize, p: f64, seed: u64) -> UGraph {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut graph = UGraph::new(nb_nodes);
    for u in 0..nb_nodes as u32 {
        for v in (u + 1)..nb_nodes as u32 {
            if rng.gen_bool(p) {
                // endpoints are in range by construction
                let _ = graph.add_edge(u, v);
            }
        }
    }
    log::debug!(
        "gnp_random_graph : nb_nodes {}, p {:.3e}, seed {}, nb_edges {}",
        nb_nodes,
        p,
        seed,
        graph.get_nb_edges()
    );
    graph
} // end of gnp_random_graph

//==========================================================================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn gnp_deterministic() {
        log_init_test();
        //
        let first = gnp_random_graph(20, 0.3, 42);
        let second = gnp_random_graph(20, 0.3, 42);
        assert_eq!(first.get_nb_edges(), second.get_nb_edges());
        for v in 0..20u32 {
            assert_eq!(first.degree(v), second.degree(v));
        }
    } // end of gnp_deterministic

    #[test]
    fn gnp_degenerate_probabilities() {
        log_init_test();
        //
        let empty = gnp_random_graph(10, 0., 1);
        assert_eq!(empty.get_nb_edges(), 0);
        let complete = gnp_random_graph(10, 1., 1);
        assert_eq!(complete.get_nb_edges(), 10 * 9 / 2);
    } // end of gnp_degenerate_probabilities
} // end of mod tests
