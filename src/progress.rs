// src/progress.rs
use crate::job::Source;
use crate::runner::{RunSummary, SourceReport};

/// Lightweight progress reporting for a run.
/// The CLI implements this to print status lines; tests pass nothing.
pub trait Progress {
    /// A source is about to be scraped.
    fn begin(&mut self, _source: Source) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One result page was loaded and parsed.
    fn page_done(&mut self, _source: Source, _page: usize, _cards: usize) {}

    /// A source finished, successfully or not.
    fn source_done(&mut self, _report: &SourceReport) {}

    /// Called once at the end with the full summary.
    fn finish(&mut self, _summary: &RunSummary) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints a line per source and a final summary to stdout.
#[derive(Default)]
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn begin(&mut self, source: Source) {
        println!("Scraping {source}...");
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn source_done(&mut self, r: &SourceReport) {
        println!(
            "Found {} jobs from {} (took {:.2} seconds; {})",
            r.accepted,
            r.source,
            r.elapsed.as_secs_f64(),
            r.end
        );
    }

    fn finish(&mut self, summary: &RunSummary) {
        if summary.dry_run {
            println!("Dry run: {} new jobs not written", summary.total());
        } else {
            println!("Appended {} new jobs to {}", summary.appended, summary.sheet.display());
        }
        println!("Total jobs scraped: {}", summary.total());
        println!("Total execution time: {:.2} seconds", summary.elapsed.as_secs_f64());
        for r in &summary.sources {
            println!("  - {}: {} (took {:.2}s)", r.source, r.accepted, r.elapsed.as_secs_f64());
        }
    }
}
