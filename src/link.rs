// src/link.rs

/// Dedup key for a job link: trimmed, trailing `/` removed, lowercased.
///
/// Case and trailing slashes collapse; query strings and paths are
/// compared as-is. Never shown to the user.
pub fn normalize(link: Option<&str>) -> String {
    let Some(link) = link else { return s!() };
    link.trim()
        .trim_end_matches(|c: char| c == '/' || c.is_whitespace())
        .to_lowercase()
}

/// Prefix site-relative hrefs with `base` (no trailing slash).
pub fn absolutize(href: &str, base: &str) -> String {
    let href = href.trim();
    if href.is_empty() || href.starts_with("http") {
        return s!(href);
    }
    if href.starts_with('/') {
        format!("{base}{href}")
    } else {
        format!("{base}/{href}")
    }
}
