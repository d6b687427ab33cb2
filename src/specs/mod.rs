// src/specs/mod.rs
//! # Site scraping specs
//!
//! One module per job site. Each spec knows *where the postings live in the
//! HTML* of that site and how to read them robustly; nothing else.
//!
//! ## What lives here
//! - The [`JobSite`] trait: result-page URLs, card extraction, login-wall
//!   detection and an optional login step.
//! - **Selector fallback chains.** Sites reshuffle their markup often, so
//!   every field is read through a priority list of selectors; the first one
//!   that yields non-empty text wins. The chains are private to each spec.
//! - [`Pages`], a lazy walker that fetches result pages one by one and
//!   yields [`RawJob`]s, recording why it stopped.
//!
//! ## What does **not** live here
//! - Dedup, recency and capping (`pipeline`).
//! - Persistence (`store`, `sheet`).
//!
//! ## Stopping rules
//! A source ends on the first of:
//! - an empty page (no cards found),
//! - a login wall / bot check (partial results kept, no retry),
//! - a fetch error or timeout (partial results kept, no retry),
//! - the page limit.
//!
//! Specs are tested offline against inline HTML fixtures.

pub mod linkedin;
pub mod login_wall;
pub mod remoterocketship;

use std::fmt;
use std::thread;
use std::time::Duration;

use scraper::Html;

use crate::core::Fetch;
use crate::error::Result;
use crate::job::{RawJob, Source};
use crate::progress::Progress;

pub use linkedin::LinkedIn;
pub use remoterocketship::RemoteRocketship;

pub trait JobSite {
    fn source(&self) -> Source;

    /// URL of result page `page` (1-based); `None` past the last page.
    fn page_url(&self, page: usize) -> Option<String>;

    /// Read every job card on one loaded page.
    fn extract(&self, doc: &Html) -> Vec<RawJob>;

    /// Reason the page is a login wall or bot check, if it is one.
    fn blocked(&self, doc: &Html, raw: &str) -> Option<String> {
        login_wall::detect(doc, raw)
    }

    /// Runs once before the first page. `Ok(false)` skips the source.
    fn prepare(&self, _net: &dyn Fetch) -> Result<bool> {
        Ok(true)
    }
}

/// Why a source stopped producing pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stop {
    /// A page came back with no cards.
    Exhausted,
    PageLimit,
    LoginWall(String),
    Network(String),
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stop::Exhausted => f.write_str("no more results"),
            Stop::PageLimit => f.write_str("page limit reached"),
            Stop::LoginWall(why) => write!(f, "login wall ({why})"),
            Stop::Network(e) => write!(f, "fetch failed ({e})"),
        }
    }
}

/// Lazy page walker. Yields cards page by page and fetches the next page
/// only when the consumer asks for more.
pub struct Pages<'a, 'p> {
    site: &'a dyn JobSite,
    net: &'a dyn Fetch,
    delay: Duration,
    progress: Option<&'a mut (dyn Progress + 'p)>,
    page: usize,
    pending: std::vec::IntoIter<RawJob>,
    stop: Option<Stop>,
}

impl<'a, 'p> Pages<'a, 'p> {
    pub fn new(
        site: &'a dyn JobSite,
        net: &'a dyn Fetch,
        delay: Duration,
        progress: Option<&'a mut (dyn Progress + 'p)>,
    ) -> Self {
        Self {
            site,
            net,
            delay,
            progress,
            page: 0,
            pending: Vec::new().into_iter(),
            stop: None,
        }
    }

    /// Set once paging ended on its own. `None` while pages remain, which
    /// after a finished run means the consumer stopped early.
    pub fn stop(&self) -> Option<&Stop> {
        self.stop.as_ref()
    }

    pub fn pages_fetched(&self) -> usize {
        self.page
    }

    fn halt(&mut self, stop: Stop) {
        let source = self.site.source();
        match &stop {
            Stop::LoginWall(_) | Stop::Network(_) => logw!("{source}: page {}: {stop}. Stopping.", self.page),
            _ => logd!("{source}: {stop} after {} page(s)", self.page),
        }
        self.stop = Some(stop);
    }

    /// Fetch and parse the next page into `pending`.
    fn load_next(&mut self) {
        let next = self.page + 1;
        let Some(url) = self.site.page_url(next) else {
            self.halt(Stop::PageLimit);
            return;
        };
        if self.page > 0 && !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.page = next;
        logd!("{}: fetching page {next}: {url}", self.site.source());

        let body = match self.net.get(&url) {
            Ok(b) => b,
            Err(e) => return self.halt(Stop::Network(e.to_string())),
        };

        let doc = Html::parse_document(&body);
        if let Some(why) = self.site.blocked(&doc, &body) {
            return self.halt(Stop::LoginWall(why));
        }
        let cards = self.site.extract(&doc);
        if let Some(p) = self.progress.as_deref_mut() {
            p.page_done(self.site.source(), next, cards.len());
        }
        if cards.is_empty() {
            return self.halt(Stop::Exhausted);
        }
        self.pending = cards.into_iter();
    }
}

impl Iterator for Pages<'_, '_> {
    type Item = RawJob;

    fn next(&mut self) -> Option<RawJob> {
        loop {
            if let Some(job) = self.pending.next() {
                return Some(job);
            }
            if self.stop.is_some() {
                return None;
            }
            self.load_next();
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeNet;
    use super::*;

    /// Cards are `<li data-link=…>title</li>`; every field filled in.
    struct ListSite {
        max_pages: usize,
    }

    impl JobSite for ListSite {
        fn source(&self) -> Source { Source::RemoteRocketship }

        fn page_url(&self, page: usize) -> Option<String> {
            (page <= self.max_pages).then(|| format!("http://t/{page}"))
        }

        fn extract(&self, doc: &Html) -> Vec<RawJob> {
            doc.select(sel!("li"))
                .map(|li| {
                    let link = li.value().attr("data-link").unwrap_or("");
                    RawJob::new(li.text().collect::<String>(), "Acme", link, "")
                })
                .collect()
        }
    }

    fn list(links: &[&str]) -> String {
        let items: String = links.iter().map(|l| format!(r#"<li data-link="{l}">{l}</li>"#)).collect();
        format!("<html><body><ul>{items}</ul></body></html>")
    }

    #[test]
    fn walks_until_empty_page() {
        let net = FakeNet::default()
            .page("http://t/1", list(&["a", "b"]))
            .page("http://t/2", list(&["c"]))
            .page("http://t/3", list(&[]));
        let site = ListSite { max_pages: 5 };
        let mut pages = Pages::new(&site, &net, Duration::ZERO, None);
        let links: Vec<String> = pages.by_ref().map(|j| j.link).collect();
        assert_eq!(links, vec!["a", "b", "c"]);
        assert_eq!(pages.stop(), Some(&Stop::Exhausted));
        assert_eq!(pages.pages_fetched(), 3);
    }

    #[test]
    fn page_limit_ends_walk() {
        let net = FakeNet::default()
            .page("http://t/1", list(&["a"]))
            .page("http://t/2", list(&["b"]));
        let site = ListSite { max_pages: 1 };
        let mut pages = Pages::new(&site, &net, Duration::ZERO, None);
        assert_eq!(pages.by_ref().count(), 1);
        assert_eq!(pages.stop(), Some(&Stop::PageLimit));
        assert_eq!(net.requests(), vec!["GET http://t/1"]);
    }

    #[test]
    fn fetch_error_keeps_earlier_cards() {
        let net = FakeNet::default().page("http://t/1", list(&["a"]));
        let site = ListSite { max_pages: 5 };
        let mut pages = Pages::new(&site, &net, Duration::ZERO, None);
        assert_eq!(pages.by_ref().count(), 1);
        assert!(matches!(pages.stop(), Some(Stop::Network(_))));
    }

    #[test]
    fn login_wall_stops_immediately() {
        let wall = r#"<html><body><form action="/Login"><input type="password"></form></body></html>"#;
        let net = FakeNet::default()
            .page("http://t/1", list(&["a"]))
            .page("http://t/2", wall);
        let site = ListSite { max_pages: 5 };
        let mut pages = Pages::new(&site, &net, Duration::ZERO, None);
        assert_eq!(pages.by_ref().count(), 1);
        assert!(matches!(pages.stop(), Some(Stop::LoginWall(_))));
    }

    #[test]
    fn consumer_stopping_early_avoids_fetches() {
        let net = FakeNet::default()
            .page("http://t/1", list(&["a", "b"]))
            .page("http://t/2", list(&["c"]));
        let site = ListSite { max_pages: 5 };
        let mut pages = Pages::new(&site, &net, Duration::ZERO, None);
        let first: Vec<_> = pages.by_ref().take(2).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(pages.stop(), None);
        assert_eq!(net.requests(), vec!["GET http://t/1"]);
    }
}
