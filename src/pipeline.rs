// src/pipeline.rs
//! Dedup & assembly: turns raw extractor output into the batch to persist.
//!
//! Per candidate, in extraction order:
//! 1. drop if title, company or link is blank (a link of only slashes counts)
//! 2. drop if the normalized link is already seen
//! 3. drop if the posted label fails the recency filter
//! 4. accept, and mark the link seen right away
//!
//! Candidates are pulled lazily, so reaching the cap also stops whatever
//! is producing them (e.g. further page fetches).

use std::collections::HashSet;

use crate::job::{JobRecord, RawJob, Source};
use crate::link::normalize;
use crate::recency::is_recent;

/// Normalized links already reported, this run or earlier ones.
/// Only ever grows.
#[derive(Clone, Debug, Default)]
pub struct SeenLinks {
    links: HashSet<String>,
}

impl SeenLinks {
    pub fn new() -> Self { Self::default() }

    /// Normalizes `link` before checking.
    pub fn contains(&self, link: &str) -> bool {
        self.links.contains(&normalize(Some(link)))
    }

    /// Normalizes `link` before inserting. Returns false if it was known.
    pub fn insert(&mut self, link: &str) -> bool {
        let key = normalize(Some(link));
        if key.is_empty() {
            return false;
        }
        self.links.insert(key)
    }

    pub fn len(&self) -> usize { self.links.len() }
    pub fn is_empty(&self) -> bool { self.links.is_empty() }
}

impl<S: AsRef<str>> FromIterator<S> for SeenLinks {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut seen = SeenLinks::new();
        for l in iter {
            seen.insert(l.as_ref());
        }
        seen
    }
}

/// Run one source's candidates through the filters. Stops pulling once
/// `max` records are accepted.
pub fn assemble<I>(source: Source, candidates: I, seen: &mut SeenLinks, max: usize) -> Vec<JobRecord>
where
    I: IntoIterator<Item = RawJob>,
{
    let mut out = Vec::new();
    if max == 0 {
        return out;
    }

    for raw in candidates {
        if !raw.is_complete() {
            logd!("{source}: skipping incomplete card {:?}", raw.title);
            continue;
        }
        let key = normalize(Some(&raw.link));
        if key.is_empty() {
            logd!("{source}: link {:?} has no usable key", raw.link);
            continue;
        }
        if seen.links.contains(&key) {
            logd!("{source}: already seen {key}");
            continue;
        }
        if !is_recent(&raw.posted, Some(source)) {
            logd!("{source}: too old ({:?}) {key}", raw.posted);
            continue;
        }

        seen.links.insert(key);
        out.push(JobRecord::from_raw(raw, source));
        if out.len() >= max {
            break;
        }
    }
    out
}

/// Per-source results of one run, waiting to be flattened.
#[derive(Clone, Debug, Default)]
pub struct Batch {
    parts: Vec<(Source, Vec<JobRecord>)>,
}

impl Batch {
    pub fn new() -> Self { Self::default() }

    /// Add (or extend) a source's accepted records.
    pub fn push(&mut self, source: Source, jobs: Vec<JobRecord>) {
        match self.parts.iter_mut().find(|(s, _)| *s == source) {
            Some((_, existing)) => existing.extend(jobs),
            None => self.parts.push((source, jobs)),
        }
    }

    #[cfg(test)]
    pub fn count(&self, source: Source) -> usize {
        self.parts
            .iter()
            .find(|(s, _)| *s == source)
            .map_or(0, |(_, v)| v.len())
    }

    /// Re-cap every source at `max`, then concatenate in source order.
    pub fn finish(mut self, max: usize) -> Vec<JobRecord> {
        self.parts.sort_by_key(|(s, _)| *s);
        let mut out = Vec::new();
        for (_, mut jobs) in self.parts {
            jobs.truncate(max);
            out.append(&mut jobs);
        }
        out
    }
}
