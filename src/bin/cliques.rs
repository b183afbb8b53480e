//! an executable enumerating all maximal cliques of a graph given as an edge list file
//! example usage:
//! cliques --csv "wiki-Vote.txt"
//! cliques --csv "wiki-Vote.txt" --out cliques_wiki.txt --parallel
//! cliques --csv "ca-GrQc.txt" --countonly --maxcliques 10000000
//!
//! the input file format is the SNAP one : # or % comment lines, a "n m" header
//! record, then one "u v" record per edge, ids remapped to \[0, n\) on the fly.
//! Output goes to a result file (cliques, histogram, total), or only to the log
//! with --countonly.


use clap::{Arg, Command};

use cpu_time::ProcessTime;
use std::time::SystemTime;

use graphclique::prelude::*;
use graphclique::tools::stats::degree_statistics;

pub fn main() {
    //
    let _ = env_logger::builder().try_init();
    log::info!("logger initialized");
    //
    let matches = Command::new("cliques")
        .arg(Arg::new("csvfile")
            .long("csv")
            .takes_value(true)
            .required(true)
            .help("expecting an edge list file"))
        .arg(Arg::new("outfile")
            .long("out")
            .short('o')
            .takes_value(true)
            .help("result file name, default is clique_output.txt"))
        .arg(Arg::new("delim")
            .long("delim")
            .takes_value(true)
            .help("field delimiter, \"tab\" (default) or \"space\""))
        .arg(Arg::new("parallel")
            .long("parallel")
            .takes_value(false)
            .help("distribute root expansions on a thread pool"))
        .arg(Arg::new("maxcliques")
            .long("maxcliques")
            .takes_value(true)
            .help("abort once more than this many cliques are found"))
        .arg(Arg::new("countonly")
            .long("countonly")
            .takes_value(false)
            .help("do not dump the cliques, count and histogram only"))
    .get_matches();

    // decode args

    let mut fname = String::from("");
    if matches.is_present("csvfile") {
        let csv_file = matches.value_of("csvfile").ok_or("").unwrap().parse::<String>().unwrap();
        if csv_file == "" {
            println!("parsing of csv file name failed");
            std::process::exit(1);
        }
        else {
            log::info!("input file : {:?}", csv_file.clone());
            fname = csv_file.clone();
        }
    }

    let outname = match matches.value_of("outfile") {
        Some(name) => String::from(name),
        None => String::from("clique_output.txt"),
    };

    let delim = match matches.value_of("delim") {
        Some("tab") | None => b'\t',
        Some("space") => b' ',
        Some(other) => {
            println!("unknown delimiter : {}, expecting tab or space", other);
            std::process::exit(1);
        }
    };

    let max_cliques = match matches.value_of("maxcliques") {
        Some(str) => {
            let res = str.parse::<u64>();
            if res.is_ok() {
                Some(res.unwrap())
            }
            else {
                println!("could not parse maxcliques, exiting");
                std::process::exit(1);
            }
        },
        _ => None,
    }; // end match

    let parallel = matches.is_present("parallel");
    let countonly = matches.is_present("countonly");
    if parallel {
        log::info!("parallel enumeration, nb cores : {}", num_cpus::get());
    }

    //
    // load the graph, log its degree profile, order it
    //
    let path = std::path::Path::new(&fname);
    let res = edgelist_to_graph(path, delim);
    if res.is_err() {
        log::error!("error : {:?}", res.as_ref().err());
        log::error!("cliques : could not load {:?}", path.as_os_str());
        std::process::exit(1);
    }
    let (graph, _idmap) = res.unwrap();
    println!("Successfully processed {} edges.", graph.get_nb_edges());
    degree_statistics(&graph, &[0.05, 0.25, 0.5, 0.75, 0.95]);
    //
    let ordering = degeneracy_ordering(&graph);
    log::info!("graph degeneracy : {}", ordering.get_degeneracy());
    //
    let params = SearchParams::new(parallel, max_cliques);
    let cpu_start = ProcessTime::now();
    let sys_start = SystemTime::now();
    //
    let nb_cliques;
    if countonly {
        let mut stats = CliqueStats::new();
        let res = if parallel {
            maximal_cliques_parallel(&graph, &ordering, &params, &mut stats)
        } else {
            maximal_cliques(&graph, &ordering, &params, &mut stats)
        };
        if res.is_err() {
            log::error!("enumeration failed : {:?}", res.err());
            std::process::exit(1);
        }
        stats.log_summary();
        nb_cliques = stats.get_nb_cliques();
    }
    else {
        let writer = match CliqueWriter::new(std::path::Path::new(&outname)) {
            Ok(writer) => writer,
            Err(err) => {
                log::error!("error : {:?}", err);
                std::process::exit(1);
            }
        };
        let mut sink = StreamingSink::new(writer);
        let res = if parallel {
            maximal_cliques_parallel(&graph, &ordering, &params, &mut sink)
        } else {
            maximal_cliques(&graph, &ordering, &params, &mut sink)
        };
        if res.is_err() {
            log::error!("enumeration failed : {:?}", res.err());
            std::process::exit(1);
        }
        let stats = match sink.finish() {
            Ok(stats) => stats,
            Err(err) => {
                log::error!("error : {:?}", err);
                std::process::exit(1);
            }
        };
        stats.log_summary();
        println!("Results saved to {}", outname);
        nb_cliques = stats.get_nb_cliques();
    }
    //
    log::info!(
        "enumeration sys time(s) {:.2e} cpu time(s) {:.2e}",
        sys_start.elapsed().unwrap().as_secs_f64(),
        cpu_start.elapsed().as_secs_f64()
    );
    println!("Total Number of Maximal Cliques: {}", nb_cliques);
    println!(
        "Time taken: {} ms",
        sys_start.elapsed().unwrap().as_millis()
    );
} // end of main
