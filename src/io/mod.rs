//! the input and output collaborators of the enumeration engine.
//! The engine itself never touches a file, everything here feeds it or dumps
//! what the sink aggregated.


pub mod edgelist;

pub mod output;
