// src/specs/remoterocketship.rs
//! Scraping spec for RemoteRocketship search results.
//!
//! Page: `/country/india/jobs/product-manager?page=N&…`, newest first.
//!
//! Card markup seen so far (Tailwind, class names drift between deploys):
//! ```html
//! <div class="relative cursor-pointer">
//!   <h3 class="text-lg"><a href="/company/acme/jobs/pm-123">Product Manager</a></h3>
//!   <h4 class="text-md"><a href="/company/acme">Acme</a></h4>
//!   <p class="text-sm">2 hours ago</p>
//! </div>
//! ```
//! Older or A/B variants use `data-testid="job-card"` or `.job-card`, hence
//! the fallback chains below.

use scraper::{ElementRef, Html};

use super::JobSite;
use crate::config::consts::{DEFAULT_MAX_PAGES, RRS_BASE, RRS_SEARCH_PATH, RRS_SEARCH_QUERY};
use crate::core::html::{attr_of, first_text, select_first_nonempty, text_of};
use crate::job::{RawJob, Source};
use crate::link::absolutize;

pub struct RemoteRocketship {
    max_pages: usize,
}

impl RemoteRocketship {
    pub fn new(max_pages: usize) -> Self {
        Self { max_pages }
    }
}

impl Default for RemoteRocketship {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAGES)
    }
}

impl JobSite for RemoteRocketship {
    fn source(&self) -> Source {
        Source::RemoteRocketship
    }

    fn page_url(&self, page: usize) -> Option<String> {
        if page == 0 || page > self.max_pages {
            return None;
        }
        Some(join!(RRS_BASE, RRS_SEARCH_PATH, "?page=", &page.to_string(), "&", RRS_SEARCH_QUERY))
    }

    fn extract(&self, doc: &Html) -> Vec<RawJob> {
        let cards = select_first_nonempty(
            doc,
            sels![
                "div.relative.cursor-pointer",
                r#"div[data-testid="job-card"]"#,
                "div.job-card",
                "div.cursor-pointer",
            ],
        );
        cards.into_iter().map(parse_card).collect()
    }
}

fn parse_card(card: ElementRef<'_>) -> RawJob {
    let (title, href) = title_and_link(card);
    let link = absolutize(&href, RRS_BASE);

    let mut company = first_text(card, sels!["h4.text-md a"]);
    if company.is_empty() {
        company = first_text(card, sels!["div.text-sm", "span.text-sm"]);
    }

    let posted = first_text(card, sels!["p.text-sm"]);

    RawJob { title, company, link, posted }
}

/// First anchor (by priority) that has both text and an href.
fn title_and_link(card: ElementRef<'_>) -> (String, String) {
    for sel in sels!["h3.text-lg a[href]", "h3 a[href]", "a[href]"] {
        if let Some(a) = card.select(sel).next() {
            let title = text_of(a);
            let href = attr_of(a, "href");
            if !title.is_empty() && !href.is_empty() {
                return (title, href);
            }
        }
    }
    (s!(), s!())
}
