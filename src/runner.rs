// src/runner.rs
//! One scrape run: load state, walk every source, persist, summarize.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::core::{Fetch, HttpClient};
use crate::error::Result;
use crate::job::{JobRecord, Source};
use crate::pipeline::{assemble, Batch, SeenLinks};
use crate::progress::Progress;
use crate::sheet::{self, CsvSheet, Sheet};
use crate::specs::{JobSite, LinkedIn, Pages, RemoteRocketship, Stop};
use crate::store::SeenStore;

/// How a source's extraction ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceEnd {
    /// The per-source cap was reached before paging ran out.
    Capped,
    Stopped(Stop),
    /// `prepare` declined (e.g. no credentials).
    Skipped,
    /// `prepare` failed (e.g. login rejected, login page unreachable).
    Failed(String),
}

impl fmt::Display for SourceEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceEnd::Capped => f.write_str("cap reached"),
            SourceEnd::Stopped(stop) => write!(f, "{stop}"),
            SourceEnd::Skipped => f.write_str("skipped"),
            SourceEnd::Failed(e) => write!(f, "failed: {e}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SourceReport {
    pub source: Source,
    pub accepted: usize,
    pub pages: usize,
    pub end: SourceEnd,
    pub elapsed: Duration,
}

#[derive(Clone, Debug)]
pub struct RunSummary {
    pub sources: Vec<SourceReport>,
    /// Rows written to the sheet (0 on a dry run).
    pub appended: usize,
    pub sheet: PathBuf,
    pub dry_run: bool,
    /// The final batch, in output order.
    pub jobs: Vec<JobRecord>,
    /// Wall time of the whole run.
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.jobs.len()
    }
}

/// State carried through one run. Loaded from the seen store at start;
/// the accepted links are flushed back at the end.
pub struct RunContext {
    seen: SeenLinks,
    max_per_source: usize,
    delay: Duration,
}

impl RunContext {
    pub fn new(seen: SeenLinks, cfg: &Config) -> Self {
        Self {
            seen,
            max_per_source: cfg.max_jobs_per_source,
            delay: Duration::from_millis(cfg.page_delay_ms),
        }
    }

    pub fn seen(&self) -> &SeenLinks {
        &self.seen
    }

    /// Scrape one source to completion and run it through the pipeline.
    pub fn collect(
        &mut self,
        site: &dyn JobSite,
        net: &dyn Fetch,
        mut progress: Option<&mut (dyn Progress + '_)>,
    ) -> (Vec<JobRecord>, SourceReport) {
        let source = site.source();
        let started = Instant::now();
        if let Some(p) = progress.as_deref_mut() {
            p.begin(source);
        }

        let report = |accepted, pages, end| SourceReport {
            source,
            accepted,
            pages,
            end,
            elapsed: started.elapsed(),
        };

        match site.prepare(net) {
            Ok(true) => {}
            Ok(false) => return (Vec::new(), report(0, 0, SourceEnd::Skipped)),
            Err(e) => {
                loge!("{source}: {e}");
                return (Vec::new(), report(0, 0, SourceEnd::Failed(e.to_string())));
            }
        }

        let mut pages = Pages::new(site, net, self.delay, progress.as_deref_mut());
        let jobs = assemble(source, &mut pages, &mut self.seen, self.max_per_source);
        let end = match pages.stop() {
            Some(stop) => SourceEnd::Stopped(stop.clone()),
            None => SourceEnd::Capped,
        };
        let pages_fetched = pages.pages_fetched();
        drop(pages);

        let accepted = jobs.len();
        logf!("{source}: accepted {accepted} job(s) from {pages_fetched} page(s); {end}");
        (jobs, report(accepted, pages_fetched, end))
    }
}

/// Full run against the real network and the configured files.
pub fn run(cfg: &Config, dry_run: bool, progress: Option<&mut dyn Progress>) -> Result<RunSummary> {
    let net = HttpClient::new()?;
    let sites: Vec<Box<dyn JobSite>> = vec![
        Box::new(RemoteRocketship::new(cfg.max_pages)),
        Box::new(LinkedIn::new(cfg.credentials(), cfg.max_pages)),
    ];
    let mut sheet = CsvSheet::new(&cfg.sheet_path);
    let store = SeenStore::new(&cfg.seen_links_path);
    run_with(cfg, &sites, &net, &mut sheet, &store, dry_run, progress)
}

/// The run with every collaborator injected. Sources are scraped in
/// `Source` order regardless of the order of `sites`.
///
/// Only a sheet failure is fatal. A seen-file failure is logged: the rows
/// are already in the sheet at that point.
pub fn run_with(
    cfg: &Config,
    sites: &[Box<dyn JobSite>],
    net: &dyn Fetch,
    sheet: &mut dyn Sheet,
    store: &SeenStore,
    dry_run: bool,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let started = Instant::now();
    let mut ctx = RunContext::new(store.load(), cfg);
    logd!("Starting run with {} seen links, cap {}", ctx.seen().len(), cfg.max_jobs_per_source);

    let mut ordered: Vec<&dyn JobSite> = sites.iter().map(|s| s.as_ref()).collect();
    ordered.sort_by_key(|s| s.source());

    let mut batch = Batch::new();
    let mut reports = Vec::with_capacity(ordered.len());
    for site in ordered {
        let (jobs, report) = ctx.collect(site, net, progress.as_deref_mut());
        if let Some(p) = progress.as_deref_mut() {
            p.source_done(&report);
        }
        batch.push(report.source, jobs);
        reports.push(report);
    }

    let jobs = batch.finish(cfg.max_jobs_per_source);
    let sheet_path = cfg.sheet_path.clone();

    let appended = if dry_run || jobs.is_empty() {
        0
    } else {
        let n = sheet::publish(sheet, &jobs)?;
        match store.append(jobs.iter().map(JobRecord::link)) {
            Ok(_) => {}
            Err(e) => loge!("Error updating seen links file {}: {e}", store.path().display()),
        }
        n
    };

    let summary = RunSummary {
        sources: reports,
        appended,
        sheet: sheet_path,
        dry_run,
        jobs,
        elapsed: started.elapsed(),
    };
    if let Some(p) = progress.as_deref_mut() {
        p.finish(&summary);
    }
    Ok(summary)
}
