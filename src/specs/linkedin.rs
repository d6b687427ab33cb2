// src/specs/linkedin.rs
//! Scraping spec for LinkedIn job search (logged in).
//!
//! Purpose:
//! - Log in with the configured account (cookie jar lives in the client).
//! - Walk `/jobs/search/?…&start=N` (25 cards per page) for remote product
//!   manager roles posted in the last 24h.
//! - Read title / company / posted label / link from each card.
//!
//! LinkedIn serves several card layouts (guest list, logged-in list, the
//! older `job-card-list`), so every field goes through a fallback chain.
//! When the company is missing, it is guessed from a `…-at-<company>-…` link.

use scraper::{ElementRef, Html};

use super::JobSite;
use crate::config::Credentials;
use crate::config::consts::*;
use crate::core::Fetch;
use crate::core::html::{attr_of, first_text, select_first_nonempty, text_of};
use crate::core::sanitize::title_case;
use crate::error::{Result, ScrapeError};
use crate::job::{RawJob, Source};
use crate::link::absolutize;

pub struct LinkedIn {
    credentials: Option<Credentials>,
    max_pages: usize,
}

impl LinkedIn {
    pub fn new(credentials: Option<Credentials>, max_pages: usize) -> Self {
        Self { credentials, max_pages }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum LoginOutcome {
    LoggedIn,
    Rejected(String),
    /// Neither the nav bar nor an error showed up.
    Unclear,
}

fn login_outcome(doc: &Html) -> LoginOutcome {
    if doc.select(sel!(r#".global-nav, [data-test-id="nav-logo"]"#)).next().is_some() {
        return LoginOutcome::LoggedIn;
    }
    if let Some(err) = doc
        .select(sel!(r#".alert-error, .error, [data-test-id="login-error"]"#))
        .next()
    {
        let text = text_of(err);
        return LoginOutcome::Rejected(if text.is_empty() { s!("error shown on login page") } else { text });
    }
    LoginOutcome::Unclear
}

fn csrf_token(login_page: &str) -> String {
    let doc = Html::parse_document(login_page);
    doc.select(sel!(r#"input[name="loginCsrfParam"]"#))
        .next()
        .map(|e| attr_of(e, "value"))
        .unwrap_or_default()
}

impl JobSite for LinkedIn {
    fn source(&self) -> Source {
        Source::LinkedIn
    }

    fn page_url(&self, page: usize) -> Option<String> {
        if page == 0 || page > self.max_pages {
            return None;
        }
        let mut url = join!(LINKEDIN_BASE, LINKEDIN_SEARCH_PATH, "?", LINKEDIN_SEARCH_QUERY);
        if page > 1 {
            url.push_str(&format!("&start={}", (page - 1) * LINKEDIN_PAGE_SIZE));
        }
        Some(url)
    }

    /// Log in. Without credentials the source is skipped.
    fn prepare(&self, net: &dyn Fetch) -> Result<bool> {
        let Some(creds) = &self.credentials else {
            logw!("LinkedIn credentials not provided in config. Skipping LinkedIn.");
            return Ok(false);
        };

        let login_page = net.get(&join!(LINKEDIN_BASE, LINKEDIN_LOGIN_PATH))?;
        let csrf = csrf_token(&login_page);
        if csrf.is_empty() {
            logd!("LinkedIn: no loginCsrfParam on login page");
        }

        let resp = net.post_form(
            &join!(LINKEDIN_BASE, LINKEDIN_LOGIN_SUBMIT_PATH),
            &[
                ("session_key", creds.email.as_str()),
                ("session_password", creds.password.as_str()),
                ("loginCsrfParam", csrf.as_str()),
            ],
        )?;

        match login_outcome(&Html::parse_document(&resp)) {
            LoginOutcome::LoggedIn => {
                logf!("LinkedIn: logged in as {}", creds.email);
                Ok(true)
            }
            LoginOutcome::Rejected(msg) => Err(ScrapeError::login(msg)),
            LoginOutcome::Unclear => {
                logd!("LinkedIn: login result unclear; continuing");
                Ok(true)
            }
        }
    }

    fn extract(&self, doc: &Html) -> Vec<RawJob> {
        let cards = select_first_nonempty(
            doc,
            sels![
                ".job-search-card",
                "[data-job-id]",
                ".job-card-container",
                ".job-card",
                ".jobs-search__results-list li",
                ".jobs-search-results__list-item",
            ],
        );
        cards.into_iter().map(parse_card).collect()
    }

    /// The generic wall check trips on LinkedIn's own nav buttons, so only
    /// the auth wall and a password prompt count here.
    fn blocked(&self, doc: &Html, raw: &str) -> Option<String> {
        let lower = raw.to_lowercase();
        if lower.contains("authwall") {
            return Some(s!("authwall"));
        }
        if lower.contains("sign in to continue") {
            return Some(s!("\"sign in to continue\""));
        }
        if doc.select(sel!(r#"input[type="password"]"#)).next().is_some() {
            return Some(s!("password field"));
        }
        None
    }
}

fn parse_card(card: ElementRef<'_>) -> RawJob {
    let title = first_text(
        card,
        sels![
            ".job-search-card__title",
            ".job-card-container__link",
            ".job-card-container__title",
            "h3",
            r#"a[data-control-name="job_card_click"]"#,
            ".job-card-list__title",
        ],
    );

    let mut company = first_text(
        card,
        sels![
            ".job-search-card__subtitle",
            ".job-card-container__company-name",
            ".job-card-container__subtitle",
            r#"[data-test-id="job-card-company-name"]"#,
            ".job-search-card__company-name",
            ".job-card-list__company-name",
        ],
    );

    let posted = first_text(
        card,
        sels![
            ".job-search-card__listdate",
            ".job-card-container__listdate",
            ".job-card-list__date",
            ".job-search-card__time-badge",
            ".job-card-container__time-badge",
            ".job-card-list__time-badge",
            r#"[data-test-id="job-card-posted-time"]"#,
            ".job-search-card__time",
            ".job-card-container__time",
        ],
    );

    let href = card
        .select(sel!("a"))
        .next()
        .map(|a| attr_of(a, "href"))
        .unwrap_or_default();

    if company.is_empty() {
        company = company_from_link(&href);
    }

    RawJob {
        title,
        company,
        link: absolutize(&href, LINKEDIN_BASE),
        posted,
    }
}

/// `/jobs/view/product-manager-at-acme-123?x=y` → `"Acme"`.
fn company_from_link(link: &str) -> String {
    let Some((_, rest)) = link.split_once("at-") else { return s!() };
    let rest = rest.split('?').next().unwrap_or("");
    let word = rest.split('-').next().unwrap_or("");
    title_case(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::testing::FakeNet;

    fn site() -> LinkedIn {
        LinkedIn::new(
            Some(Credentials { email: s!("me@example.com"), password: s!("pw") }),
            DEFAULT_MAX_PAGES,
        )
    }

    fn parse(html: &str) -> Vec<RawJob> {
        site().extract(&Html::parse_document(html))
    }

    #[test]
    fn page_urls_step_by_page_size() {
        let s = site();
        assert_eq!(
            s.page_url(1).as_deref(),
            Some("https://www.linkedin.com/jobs/search/?keywords=product%20manager&location=Remote&f_TPR=r86400&f_WT=2")
        );
        assert!(s.page_url(3).unwrap().ends_with("&start=50"));
        assert_eq!(s.page_url(DEFAULT_MAX_PAGES + 1), None);
    }

    #[test]
    fn guest_style_cards() {
        let jobs = parse(
            r#"<html><body><ul class="jobs-search__results-list">
            <li><div class="job-search-card" data-entity-urn="1">
              <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/pm-at-acme-1?refId=x">link</a>
              <h3 class="job-search-card__title"> Product Manager </h3>
              <h4 class="job-search-card__subtitle"><a>Acme Inc</a></h4>
              <time class="job-search-card__listdate">3 hours ago</time>
            </div></li>
            </ul></body></html>"#,
        );
        assert_eq!(jobs, vec![RawJob::new(
            "Product Manager",
            "Acme Inc",
            "https://www.linkedin.com/jobs/view/pm-at-acme-1?refId=x",
            "3 hours ago",
        )]);
    }

    #[test]
    fn logged_in_cards_with_relative_links() {
        let jobs = parse(
            r#"<html><body><ul>
            <li data-job-id="42">
              <a class="job-card-container__link" href="/jobs/view/42/">Senior PM</a>
              <span class="job-card-container__company-name">Globex</span>
              <span class="job-card-container__listdate">1 day ago</span>
            </li></ul></body></html>"#,
        );
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Senior PM");
        assert_eq!(jobs[0].company, "Globex");
        assert_eq!(jobs[0].link, "https://www.linkedin.com/jobs/view/42/");
        assert_eq!(jobs[0].posted, "1 day ago");
    }

    #[test]
    fn company_guessed_from_link() {
        let jobs = parse(
            r#"<html><body><div class="job-card">
              <a href="/jobs/view/product-manager-at-initech-labs-77?trk=1">x</a>
              <h3>Product Manager</h3>
            </div></body></html>"#,
        );
        assert_eq!(jobs[0].company, "Initech");
        assert_eq!(company_from_link("/jobs/view/123"), "");
        assert_eq!(company_from_link("https://x/pm-at-HOOLI?x=1"), "Hooli");
    }

    #[test]
    fn blocked_only_on_auth_signals() {
        let s = site();
        let nav = r#"<html><body><button>Sign up</button><h1>Jobs</h1></body></html>"#;
        assert_eq!(s.blocked(&Html::parse_document(nav), nav), None);
        let wall = r#"<html><body><a href="https://www.linkedin.com/authwall?x">Join</a></body></html>"#;
        assert!(s.blocked(&Html::parse_document(wall), wall).is_some());
    }

    #[test]
    fn prepare_skips_without_credentials() {
        let net = FakeNet::default();
        let s = LinkedIn::new(None, 5);
        assert!(!s.prepare(&net).unwrap());
        assert!(net.requests().is_empty());
    }

    #[test]
    fn prepare_posts_csrf_and_reads_outcome() {
        let login = r#"<html><body><form><input type="hidden" name="loginCsrfParam" value="tok"></form></body></html>"#;
        let home = r#"<html><body><nav class="global-nav"></nav></body></html>"#;
        let net = FakeNet::default()
            .page("https://www.linkedin.com/login", login)
            .post("https://www.linkedin.com/checkpoint/lg/login-submit", home);
        assert!(site().prepare(&net).unwrap());
        assert_eq!(net.requests()[1], "POST https://www.linkedin.com/checkpoint/lg/login-submit session_key,session_password,loginCsrfParam");
    }

    #[test]
    fn prepare_fails_on_login_error() {
        let err = r#"<html><body><div class="alert-error">Wrong password</div></body></html>"#;
        let net = FakeNet::default()
            .page("https://www.linkedin.com/login", "<html></html>")
            .post("https://www.linkedin.com/checkpoint/lg/login-submit", err);
        match site().prepare(&net) {
            Err(ScrapeError::Login(msg)) => assert_eq!(msg, "Wrong password"),
            other => panic!("expected login error, got {other:?}"),
        }
    }
}
