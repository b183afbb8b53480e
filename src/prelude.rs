//! To ease access to most frequently items
//!


pub use crate::io::{edgelist::*, output::*};

pub use crate::graph::UGraph;

pub use crate::degeneracy::{degeneracy_ordering, DegeneracyOrdering};

pub use crate::enumerate::{
    enumerate_maximal_cliques, maximal_cliques, maximal_cliques_parallel, SearchParams,
};

pub use crate::sink::{CliqueCollector, CliqueSink, CliqueStats};
