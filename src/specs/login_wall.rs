// src/specs/login_wall.rs
//! Detects pages that ask for a login or a bot check instead of showing
//! results. Any single signal counts.

use scraper::Html;

use crate::core::html::{attr_of, text_of};

const WALL_PHRASES: [&str; 7] = [
    "vercel security checkpoint",
    "please log in to continue",
    "sign in to continue",
    "login to view",
    "sign up to view",
    "authentication required",
    "please authenticate",
];

/// `raw` is the page source the document was parsed from.
pub fn detect(doc: &Html, raw: &str) -> Option<String> {
    if let Some(form) = doc
        .select(sel!("form[action]"))
        .find(|f| attr_of(*f, "action").to_lowercase().contains("login"))
    {
        return Some(format!("login form ({})", attr_of(form, "action")));
    }

    for button in doc.select(sel!("button")) {
        let text = text_of(button).to_lowercase();
        if text.contains("log in") || text.contains("sign up") {
            return Some(format!("`{}` button", text_of(button)));
        }
    }

    if doc.select(sel!(r#"input[type="password"]"#)).next().is_some() {
        return Some(s!("password field"));
    }

    for h1 in doc.select(sel!("h1")) {
        let text = text_of(h1).to_lowercase();
        if text.contains("log in") || text.contains("sign in") {
            return Some(format!("`{}` heading", text_of(h1)));
        }
    }

    if doc.select(sel!("div.login-form, div#login, div.auth-form")).next().is_some() {
        return Some(s!("login container"));
    }

    let lower = raw.to_lowercase();
    WALL_PHRASES
        .iter()
        .find(|p| lower.contains(*p))
        .map(|p| format!("\"{p}\""))
}
