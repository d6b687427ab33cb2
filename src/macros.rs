// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, &str or &String
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // URL concatenation shorthand!
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

/// Compile a CSS selector once per call site.
/// Only for literal selectors; a bad literal is a programming error.
#[macro_export]
macro_rules! sel {
    ($css:expr) => {{
        static SEL: ::std::sync::OnceLock<::scraper::Selector> = ::std::sync::OnceLock::new();
        SEL.get_or_init(|| ::scraper::Selector::parse($css).expect("static selector"))
    }};
}

/// Compile a selector fallback chain once per call site, in priority order.
#[macro_export]
macro_rules! sels {
    ($($css:expr),+ $(,)?) => {{
        static SELS: ::std::sync::OnceLock<::std::vec::Vec<::scraper::Selector>> =
            ::std::sync::OnceLock::new();
        SELS.get_or_init(|| {
            vec![$(::scraper::Selector::parse($css).expect("static selector")),+]
        })
        .as_slice()
    }};
}
