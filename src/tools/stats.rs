//! degree statistics of a graph, logged before an enumeration run

use hdrhistogram::Histogram;

use crate::graph::UGraph;

/// log::info the degree quantiles of graph, returns the quantile values.
/// Gives an idea of how sparse the graph is before launching the search.
pub fn degree_statistics(graph: &UGraph, quantiles: &[f64]) -> Vec<u64> {
    //
    log::info!("quantiles used : {:?}", quantiles);
    let mut histo = Histogram::<u64>::new(2).unwrap();
    for v in 0..graph.get_nb_nodes() {
        histo += graph.degree(v as u32) as u64;
    }
    let degrees = quantiles
        .iter()
        .map(|f| histo.value_at_quantile(*f))
        .collect::<Vec<u64>>();
    log::info!(
        " nb_nodes : {}, nb_edges : {}, degree quantiles : {:?}",
        graph.get_nb_nodes(),
        graph.get_nb_edges(),
        degrees
    );
    //
    degrees
} // end of degree_statistics

//==========================================================================================================

// end of mod tests
