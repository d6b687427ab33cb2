// src/recency.rs
//! Freshness check over the free-text "posted" label of a card.
//!
//! The filter is lenient: almost every label passes. The only
//! rejections are a LinkedIn label with an hour count above 24 and any
//! label from an unrecognized source.

use std::sync::OnceLock;

use regex::Regex;

use crate::job::Source;

pub const MAX_AGE_HOURS: u64 = 24;

const HOUR_TOKENS: [&str; 3] = ["hour", "hr", "h"];
const LINKEDIN_FRESH: [&str; 4] = ["today", "yesterday", "posted", "recent"];
const ROCKETSHIP_FRESH: [&str; 6] = ["yesterday", "today", "recent", "new", "posted", "ago"];

fn hours_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*(?:hour|hr|h)").expect("static regex"))
}

/// `source == None` is an unrecognized source.
pub fn is_recent(posted: &str, source: Option<Source>) -> bool {
    let Some(source) = source else { return false };
    if posted.is_empty() {
        return true;
    }
    let text = posted.to_lowercase();
    match source {
        Source::LinkedIn => linkedin_is_recent(&text),
        Source::RemoteRocketship => rocketship_is_recent(&text),
    }
}

fn linkedin_is_recent(text: &str) -> bool {
    if HOUR_TOKENS.iter().any(|t| text.contains(t)) {
        if let Some(hours) = first_hour_count(text) {
            return hours <= MAX_AGE_HOURS;
        }
    }
    if LINKEDIN_FRESH.iter().any(|t| text.contains(t)) {
        return true;
    }
    // No usable signal; accepted as-is.
    true
}

fn rocketship_is_recent(text: &str) -> bool {
    if ROCKETSHIP_FRESH.iter().any(|t| text.contains(t)) {
        return true;
    }
    true
}

/// First integer directly followed by an hour token. Overflow counts as old.
fn first_hour_count(text: &str) -> Option<u64> {
    let caps = hours_re().captures(text)?;
    Some(caps[1].parse::<u64>().unwrap_or(u64::MAX))
}
