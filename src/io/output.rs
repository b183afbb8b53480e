//! To dump an enumeration result to a file
//!
//! The file layout is the historical one : a block listing the cliques, the size
//! histogram, then the total count. Writes go through a BufWriter, flushed once at
//! the end of the run, never per clique.

use anyhow::anyhow;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::sink::{CliqueSink, CliqueStats};

/// buffered writer for the clique listing and the final summary
pub struct CliqueWriter {
    /// where the result file goes
    path: PathBuf,
    bufw: BufWriter<File>,
    nb_written: u64,
} // end of struct CliqueWriter

impl CliqueWriter {
    /// create the result file, truncating any previous content
    pub fn new(path: &Path) -> anyhow::Result<Self> {
        let fileres = File::create(path);
        if fileres.is_err() {
            log::error!(
                "CliqueWriter::new : could not create file {:?}",
                path.as_os_str()
            );
            return Err(anyhow!("CliqueWriter::new : could not create file"));
        }
        let mut bufw = BufWriter::new(fileres.unwrap());
        writeln!(bufw, "Maximal Cliques:")?;
        Ok(CliqueWriter {
            path: path.to_path_buf(),
            bufw,
            nb_written: 0,
        })
    } // end of new

    /// append one clique, written as "{ v1 v2 ... }" on its own line
    pub fn write_clique(&mut self, clique: &[u32]) -> anyhow::Result<()> {
        write!(self.bufw, "{{ ")?;
        for v in clique {
            write!(self.bufw, "{} ", v)?;
        }
        writeln!(self.bufw, "}}")?;
        self.nb_written += 1;
        Ok(())
    } // end of write_clique

    /// append the histogram and total blocks and flush everything
    pub fn write_summary(&mut self, stats: &CliqueStats) -> anyhow::Result<()> {
        writeln!(self.bufw)?;
        writeln!(self.bufw, "Clique Size Distribution (Histogram):")?;
        for (size, count) in stats.get_histogram() {
            writeln!(self.bufw, "Size {}: {} cliques", size, count)?;
        }
        writeln!(self.bufw)?;
        writeln!(
            self.bufw,
            "Total Number of Maximal Cliques: {}",
            stats.get_nb_cliques()
        )?;
        self.bufw.flush()?;
        Ok(())
    } // end of write_summary

    /// get number of cliques written so far
    pub fn get_nb_written(&self) -> u64 {
        self.nb_written
    }

    /// get the result file path
    pub fn get_path(&self) -> &Path {
        &self.path
    }
} // end of impl CliqueWriter

/// a sink streaming every clique to a [CliqueWriter] while keeping running stats.
/// Reporting from the search cannot fail, so a write failure is just remembered
/// and surfaced by [StreamingSink::finish], which also writes the summary.
pub struct StreamingSink {
    stats: CliqueStats,
    writer: CliqueWriter,
    write_failed: bool,
} // end of struct StreamingSink

impl StreamingSink {
    pub fn new(writer: CliqueWriter) -> Self {
        StreamingSink {
            stats: CliqueStats::new(),
            writer,
            write_failed: false,
        }
    }

    /// get stats collected so far
    pub fn get_stats(&self) -> &CliqueStats {
        &self.stats
    }

    /// write the summary, flush, and return the stats.
    /// Fails if any clique write failed during the run.
    pub fn finish(mut self) -> anyhow::Result<CliqueStats> {
        if self.write_failed {
            return Err(anyhow!(
                "StreamingSink : write failed on {:?}",
                self.writer.get_path()
            ));
        }
        self.writer.write_summary(&self.stats)?;
        Ok(self.stats)
    } // end of finish
} // end of impl StreamingSink

impl CliqueSink for StreamingSink {
    fn collect_clique(&mut self, clique: &[u32]) {
        self.stats.collect_clique(clique);
        if !self.write_failed && self.writer.write_clique(clique).is_err() {
            self.write_failed = true;
        }
    }
} // end of impl CliqueSink for StreamingSink

//==========================================================================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn writer_dumps_result_file() {
        log_init_test();
        //
        let path = std::env::temp_dir().join("graphclique_writer.txt");
        let writer = CliqueWriter::new(&path).unwrap();
        let mut sink = StreamingSink::new(writer);
        sink.collect_clique(&[0, 1, 2]);
        sink.collect_clique(&[3]);
        let stats = sink.finish().unwrap();
        assert_eq!(stats.get_nb_cliques(), 2);
        //
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Maximal Cliques:"));
        assert!(content.contains("{ 0 1 2 }"));
        assert!(content.contains("{ 3 }"));
        assert!(content.contains("Size 3: 1 cliques"));
        assert!(content.contains("Size 1: 1 cliques"));
        assert!(content.contains("Total Number of Maximal Cliques: 2"));
    } // end of writer_dumps_result_file
} // end of mod tests
