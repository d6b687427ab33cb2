// src/job.rs
//! Job-level types shared by the extractors, the pipeline and the sinks.

use std::fmt;

/// Where a posting came from. Variant order is the order sources are
/// scraped and written out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Source {
    RemoteRocketship,
    LinkedIn,
}

impl Source {
    /// Case-insensitive lookup by key (`"linkedin"`, `"remoterocketship"`).
    /// `None` means an unrecognized source.
    pub fn parse(key: &str) -> Option<Source> {
        match key.trim().to_ascii_lowercase().as_str() {
            "remoterocketship" => Some(Source::RemoteRocketship),
            "linkedin" => Some(Source::LinkedIn),
            _ => None,
        }
    }

    /// Name written into the Source column.
    pub fn name(self) -> &'static str {
        match self {
            Source::RemoteRocketship => "RemoteRocketship",
            Source::LinkedIn => "LinkedIn",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One card as an extractor read it. Empty strings mean "not found".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawJob {
    pub title: String,
    pub company: String,
    pub link: String,
    pub posted: String,
}

impl RawJob {
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        link: impl Into<String>,
        posted: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            link: link.into(),
            posted: posted.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !(self.title.trim().is_empty()
            || self.company.trim().is_empty()
            || self.link.trim().is_empty())
    }
}

/// An accepted posting. Built only by the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobRecord {
    title: String,
    company: String,
    link: String,
    source: Source,
    posted: String,
}

impl JobRecord {
    pub(crate) fn from_raw(raw: RawJob, source: Source) -> Self {
        Self {
            title: raw.title,
            company: raw.company,
            link: raw.link,
            source,
            posted: raw.posted,
        }
    }

    pub fn title(&self) -> &str { &self.title }
    pub fn company(&self) -> &str { &self.company }
    pub fn link(&self) -> &str { &self.link }
    pub fn source(&self) -> Source { self.source }
    pub fn posted(&self) -> &str { &self.posted }

    /// Sheet row: Title, Company, Apply Link, Source, Posted.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.company.clone(),
            self.link.clone(),
            s!(self.source.name()),
            self.posted.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Source::parse("LinkedIn"), Some(Source::LinkedIn));
        assert_eq!(Source::parse(" remoterocketship "), Some(Source::RemoteRocketship));
        assert_eq!(Source::parse("unknownsource"), None);
    }

    #[test]
    fn scrape_order_follows_variant_order() {
        let mut v = vec![Source::LinkedIn, Source::RemoteRocketship];
        v.sort();
        assert_eq!(v, vec![Source::RemoteRocketship, Source::LinkedIn]);
    }

    #[test]
    fn blank_fields_make_raw_job_incomplete() {
        assert!(RawJob::new("PM", "Acme", "http://x.com/a", "").is_complete());
        assert!(!RawJob::new("PM", "  ", "http://x.com/a", "").is_complete());
        assert!(!RawJob::new("", "Acme", "http://x.com/a", "").is_complete());
        assert!(!RawJob::new("PM", "Acme", "", "1h").is_complete());
    }

    #[test]
    fn row_uses_display_name() {
        let rec = JobRecord::from_raw(RawJob::new("PM", "Acme", "http://x", "1h"), Source::LinkedIn);
        assert_eq!(rec.to_row(), vec!["PM", "Acme", "http://x", "LinkedIn", "1h"]);
    }
}
