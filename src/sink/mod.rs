//! collection of enumerated maximal cliques
//!
//! The search reports each maximal clique exactly once to a [CliqueSink].
//! Aggregation (count and size histogram) is decoupled from the search strategy,
//! so the same sink contract serves the sequential and the root-parallel drivers.
//! Reporting never fails, a sink deferring work to some fallible collaborator
//! must surface errors at the end of the run (see io::output::StreamingSink).

use std::collections::BTreeMap;

/// receives each maximal clique as it is discovered.
/// The slice is the clique in construction order (root vertex first), the callee
/// copies what it needs and must not block the search for long.
pub trait CliqueSink {
    fn collect_clique(&mut self, clique: &[u32]);
} // end of trait CliqueSink

/// running totals of one enumeration : number of maximal cliques and the
/// size distribution. The histogram is kept in a sorted map as sizes are small.
#[derive(Clone, Debug, Default)]
pub struct CliqueStats {
    /// total number of maximal cliques collected
    nb_cliques: u64,
    /// clique size -> number of maximal cliques of that size
    histogram: BTreeMap<usize, u64>,
} // end of struct CliqueStats

impl CliqueStats {
    pub fn new() -> Self {
        CliqueStats::default()
    }

    /// get total number of cliques
    pub fn get_nb_cliques(&self) -> u64 {
        self.nb_cliques
    }

    /// get the size histogram
    pub fn get_histogram(&self) -> &BTreeMap<usize, u64> {
        &self.histogram
    }

    /// get the largest clique size collected, 0 if none
    pub fn get_max_size(&self) -> usize {
        self.histogram.keys().next_back().copied().unwrap_or(0)
    }

    /// merge counts collected elsewhere, used when joining per thread results
    pub fn merge(&mut self, other: &CliqueStats) {
        self.nb_cliques += other.nb_cliques;
        for (size, count) in &other.histogram {
            *self.histogram.entry(*size).or_insert(0) += count;
        }
    } // end of merge

    /// dump totals in the log
    pub fn log_summary(&self) {
        log::info!("nb maximal cliques : {}", self.nb_cliques);
        for (size, count) in &self.histogram {
            log::info!("size : {}, nb cliques : {}", size, count);
        }
    } // end of log_summary
} // end of impl CliqueStats

impl CliqueSink for CliqueStats {
    fn collect_clique(&mut self, clique: &[u32]) {
        self.nb_cliques += 1;
        *self.histogram.entry(clique.len()).or_insert(0) += 1;
    }
} // end of impl CliqueSink for CliqueStats

/// a sink materializing the cliques besides the running totals.
/// Memory is bounded by the full output size which can be exponential in n,
/// use [CliqueStats] alone or a streaming sink on large graphs.
#[derive(Default)]
pub struct CliqueCollector {
    stats: CliqueStats,
    cliques: Vec<Vec<u32>>,
} // end of struct CliqueCollector

impl CliqueCollector {
    pub fn new() -> Self {
        CliqueCollector::default()
    }

    /// get collected stats
    pub fn get_stats(&self) -> &CliqueStats {
        &self.stats
    }

    /// get the collected cliques
    pub fn get_cliques(&self) -> &Vec<Vec<u32>> {
        &self.cliques
    }

    /// consume the collector, returning the cliques
    pub fn into_cliques(self) -> Vec<Vec<u32>> {
        self.cliques
    }
} // end of impl CliqueCollector

impl CliqueSink for CliqueCollector {
    fn collect_clique(&mut self, clique: &[u32]) {
        self.stats.collect_clique(clique);
        self.cliques.push(clique.to_vec());
    }
} // end of impl CliqueSink for CliqueCollector

//==========================================================================================================

// end of mod tests
