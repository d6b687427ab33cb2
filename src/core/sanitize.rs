// src/core/sanitize.rs

/// Collapse runs of whitespace to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// `"acme"` → `"Acme"`, `"ACME"` → `"Acme"`.
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => s!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses_and_trims() {
        assert_eq!(normalize_ws("  Senior \n\t PM  "), "Senior PM");
        assert_eq!(normalize_ws(""), "");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("acme"), "Acme");
        assert_eq!(title_case("ACME"), "Acme");
        assert_eq!(title_case(""), "");
    }
}
