//! small utilities : random graph generation, degree statistics


pub mod randgraph;

pub mod stats;
