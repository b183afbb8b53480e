//! Construct a graph from an edge list file
//!
//! Expected format, as in the SNAP repository files (<https://snap.stanford.edu/data/index.html>):
//! lines beginning with # or % are comments, the first data record gives the number
//! of vertices and edges, each following record is one edge "u v".
//! Vertex identifiers may be sparse or arbitrary, they are remapped to the dense
//! range \[0, n\) in order of first appearance and the mapping is returned with the
//! graph. An edge falling outside the declared vertex count after remapping is
//! dropped with a warning, a bad vertex count is fatal.

use log::*;

use anyhow::anyhow;

use std::fs::OpenOptions;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use indexmap::IndexMap;

use crate::graph::UGraph;

// dense id of an external id, allocating the next rank at first sight
fn remap(idmap: &mut IndexMap<usize, u32>, id: usize) -> u32 {
    match idmap.get(&id) {
        Some(dense) => *dense,
        None => {
            let dense = idmap.len() as u32;
            idmap.insert(id, dense);
            dense
        }
    }
} // end of remap

/// load an edge list file into a graph. delim is the field delimiter (b'\t' for
/// SNAP files, b' ' for space separated ones).
/// Returns the graph and the map from external ids to dense vertex ids.
pub fn edgelist_to_graph(
    filepath: &Path,
    delim: u8,
) -> anyhow::Result<(UGraph, IndexMap<usize, u32>)> {
    //
    let fileres = OpenOptions::new().read(true).open(filepath);
    if fileres.is_err() {
        log::error!(
            "edgelist_to_graph : could not open file {:?}",
            filepath.as_os_str()
        );
        return Err(anyhow!("edgelist_to_graph : could not open file"));
    }
    let file = fileres.unwrap();
    let mut rdr = ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(BufReader::new(file));
    //
    let mut graph: Option<UGraph> = None;
    let mut nb_edges_declared = 0usize;
    let mut idmap = IndexMap::<usize, u32>::new();
    let mut nb_inserted = 0usize;
    let mut nb_dropped = 0usize;
    //
    for result in rdr.records() {
        let record = result?;
        // repeated delimiters give empty fields, skip them
        let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
        if fields.is_empty() || fields[0].starts_with('%') {
            continue;
        }
        if fields.len() < 2 {
            return Err(anyhow!(
                "edgelist_to_graph : expected 2 fields, got record {:?}",
                record
            ));
        }
        if graph.is_none() {
            // first data record is the header : nb_nodes nb_edges
            let nb_nodes = fields[0].parse::<i64>()?;
            let nb_edges = fields[1].parse::<i64>()?;
            if nb_nodes <= 0 || nb_edges < 0 {
                log::error!(
                    "edgelist_to_graph : invalid graph size, nb_nodes : {}, nb_edges : {}",
                    nb_nodes,
                    nb_edges
                );
                return Err(anyhow!("edgelist_to_graph : invalid graph size"));
            }
            nb_edges_declared = nb_edges as usize;
            graph = Some(UGraph::new(nb_nodes as usize));
            continue;
        }
        //
        let u = fields[0].parse::<usize>()?;
        let v = fields[1].parse::<usize>()?;
        let du = remap(&mut idmap, u);
        let dv = remap(&mut idmap, v);
        match graph.as_mut().unwrap().add_edge(du, dv) {
            Ok(_) => {
                nb_inserted += 1;
            }
            Err(_) => {
                // more distinct ids than declared vertices, keep going as the
                // rest of the file may still be consistent
                nb_dropped += 1;
                log::warn!(
                    "edgelist_to_graph : dropping edge ({}, {}), remapped ({}, {}) out of range",
                    u,
                    v,
                    du,
                    dv
                );
            }
        }
    } // end of loop on records
      //
    let graph = match graph {
        Some(graph) => graph,
        None => {
            return Err(anyhow!(
                "edgelist_to_graph : no header record in file {:?}",
                filepath.as_os_str()
            ));
        }
    };
    if nb_inserted != nb_edges_declared {
        log::debug!(
            "edgelist_to_graph : header declared {} edges, file provided {}",
            nb_edges_declared,
            nb_inserted
        );
    }
    log::info!(
        "edgelist_to_graph : loaded {:?}, nb_nodes : {}, nb distinct edges : {}, dropped : {}",
        filepath.as_os_str(),
        graph.get_nb_nodes(),
        graph.get_nb_edges(),
        nb_dropped
    );
    //
    Ok((graph, idmap))
} // end of edgelist_to_graph

//==========================================================================================================

// end of mod tests
